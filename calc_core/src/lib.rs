//! # calc_core - OmniCalc Calculation Engine
//!
//! `calc_core` is the computational heart of OmniCalc: unit conversion,
//! physics formulas, personal-finance projections, BMI and keypad
//! arithmetic behind a small, JSON-friendly API. Symbolic algebra is
//! delegated to an external engine through the [`symbolic::SymbolicEngine`]
//! trait.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All inputs and outputs implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, never NaN or infinity
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::{amortize_loan, convert_unit};
//!
//! let fahrenheit = convert_unit(100.0, "celsius", "fahrenheit", "temperature").unwrap();
//! assert!((fahrenheit - 212.0).abs() < 1e-9);
//!
//! let loan = amortize_loan(200_000.0, 5.5, 30.0).unwrap();
//! assert_eq!(loan.summary.monthly_payment, 1136.0);
//! ```
//!
//! ## Modules
//!
//! - [`units`] - Unit enums, categories and quantities
//! - [`conversions`] - Table, formula and rate-based conversion
//! - [`formulas`] - Physics formula registry
//! - [`finance`] - Investment, loan and salary calculations
//! - [`calculations`] - BMI, arithmetic and the per-tool request type
//! - [`symbolic`] - Contract for an external computer algebra system
//! - [`settings`] - User preferences
//! - [`errors`] - Structured error types
//! - [`file_io`] - Settings persistence with atomic saves

pub mod calculations;
pub mod conversions;
pub mod errors;
pub mod file_io;
pub mod finance;
pub mod formulas;
pub mod settings;
pub mod symbolic;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::bmi::calculate_bmi;
pub use calculations::{CalculationOutput, CalculationRequest, Tool};
pub use conversions::convert_unit;
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_settings, load_settings_or_default, save_settings};
pub use finance::{amortize_loan, convert_salary, project_investment_growth};
pub use formulas::{evaluate_physics_formula, FormulaResult};
pub use settings::CalculatorSettings;
pub use symbolic::{SymbolicAnswer, SymbolicEngine, SymbolicRequest};
