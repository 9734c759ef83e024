//! # Physics Formulas
//!
//! Named physics formulas evaluated from raw text inputs.
//!
//! ## Modules
//!
//! - [`physics`] - The formula functions themselves
//! - [`registry`] - Formula specs, registry and documentation generation
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use calc_core::formulas::evaluate_physics_formula;
//!
//! let inputs = HashMap::from([("d", "100"), ("t", "9.58")]);
//! let result = evaluate_physics_formula("velocity", &inputs).unwrap();
//! assert_eq!(result.unit, "m/s");
//! ```

pub mod physics;
pub mod registry;

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use once_cell::sync::Lazy;

use crate::errors::CalcResult;

pub use registry::{
    formulas_markdown, Field, Formula, FormulaInputs, FormulaRegistry, FormulaResult, FormulaSpec,
    ALL_FORMULAS,
};

/// Registry of the built-in formulas, built on first use
pub static STANDARD_FORMULAS: Lazy<FormulaRegistry> = Lazy::new(FormulaRegistry::standard);

/// Evaluate a built-in formula by name against raw text inputs.
///
/// # Errors
///
/// - `UnsupportedOperation` if the formula is not registered
/// - `InvalidInput` if a field is missing or not a finite number
/// - `DivisionByZero` if a divisor field is zero
pub fn evaluate_physics_formula<K, V>(name: &str, inputs: &HashMap<K, V>) -> CalcResult<FormulaResult>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
{
    STANDARD_FORMULAS.evaluate(name, inputs)
}
