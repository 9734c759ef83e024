//! # Calculation Tools
//!
//! Every tool of the calculator menu as an explicit per-call input struct.
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` / output - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<_, CalcError>` - Pure calculation function
//!
//! [`CalculationRequest`] wraps the inputs of all tools so a front end can
//! hold "the form currently open" as one value and run it with
//! [`CalculationRequest::run`].
//!
//! ## Available Calculations
//!
//! - [`bmi`] - Body-mass index and weight class
//! - [`arithmetic`] - Keypad binary operations
//! - unit conversion, physics formulas and finance live in
//!   [`crate::conversions`], [`crate::formulas`] and [`crate::finance`]
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{CalculationOutput, CalculationRequest};
//!
//! let json = r#"{"tool":"salary","hourly_rate":25.0,"hours_per_week":40.0,"weeks_per_year":52.0}"#;
//! let request: CalculationRequest = serde_json::from_str(json).unwrap();
//! match request.run().unwrap() {
//!     CalculationOutput::Salary(pay) => assert_eq!(pay.annual, 52_000.0),
//!     other => panic!("unexpected output {:?}", other),
//! }
//! ```

pub mod arithmetic;
pub mod bmi;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::conversions::convert_between;
use crate::errors::CalcResult;
use crate::finance::{investment, loan, salary};
use crate::finance::{
    InvestmentInput, InvestmentProjection, LoanAmortization, LoanInput, SalaryBreakdown, SalaryInput,
};
use crate::formulas::{evaluate_physics_formula, FormulaResult};
use crate::units::{Unit, UnitCategory};

pub use arithmetic::{ArithmeticInput, BinaryOp};
pub use bmi::{BmiCategory, BmiInput, BmiResult};

// ============================================================================
// Menu
// ============================================================================

/// Entries of the calculator menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Arithmetic,
    Converter,
    Bmi,
    Physics,
    Finance,
    Mathematics,
}

impl Tool {
    /// Menu order
    pub const ALL: [Tool; 6] = [
        Tool::Arithmetic,
        Tool::Converter,
        Tool::Bmi,
        Tool::Physics,
        Tool::Finance,
        Tool::Mathematics,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Tool::Arithmetic => "Arithmetic",
            Tool::Converter => "Converter",
            Tool::Bmi => "BMI Calculator",
            Tool::Physics => "Physics",
            Tool::Finance => "Finance",
            Tool::Mathematics => "Mathematics",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tool::Arithmetic => "Standard & Scientific Operations",
            Tool::Converter => "Length, Mass, Temp, & More",
            Tool::Bmi => "Body Mass Index & Analysis",
            Tool::Physics => "Velocity, Force, Displacement",
            Tool::Finance => "Investment Growth & Interest",
            Tool::Mathematics => "Algebra, Graphing & Theorems",
        }
    }
}

// ============================================================================
// Per-tool inputs not owned by another module
// ============================================================================

/// Unit conversion request with raw identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionInput {
    pub value: f64,
    pub from_unit: String,
    pub to_unit: String,
    pub category: String,
}

/// Converted value and the unit it is expressed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionOutput {
    pub value: f64,
    pub unit: String,
    pub symbol: String,
}

/// Physics formula request with raw text field values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsInput {
    pub formula: String,
    pub inputs: HashMap<String, String>,
}

// ============================================================================
// Request / output
// ============================================================================

/// Inputs of any tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum CalculationRequest {
    Convert(ConversionInput),
    Physics(PhysicsInput),
    Investment(InvestmentInput),
    Loan(LoanInput),
    Salary(SalaryInput),
    Bmi(BmiInput),
    Arithmetic(ArithmeticInput),
}

/// Results of any tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum CalculationOutput {
    Convert(ConversionOutput),
    Physics(FormulaResult),
    Investment(InvestmentProjection),
    Loan(LoanAmortization),
    Salary(SalaryBreakdown),
    Bmi(BmiResult),
    Arithmetic { value: f64 },
}

impl CalculationRequest {
    /// Menu entry this request belongs to
    pub fn tool(&self) -> Tool {
        match self {
            CalculationRequest::Convert(_) => Tool::Converter,
            CalculationRequest::Physics(_) => Tool::Physics,
            CalculationRequest::Investment(_)
            | CalculationRequest::Loan(_)
            | CalculationRequest::Salary(_) => Tool::Finance,
            CalculationRequest::Bmi(_) => Tool::Bmi,
            CalculationRequest::Arithmetic(_) => Tool::Arithmetic,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationRequest::Convert(_) => "convert",
            CalculationRequest::Physics(_) => "physics",
            CalculationRequest::Investment(_) => "investment",
            CalculationRequest::Loan(_) => "loan",
            CalculationRequest::Salary(_) => "salary",
            CalculationRequest::Bmi(_) => "bmi",
            CalculationRequest::Arithmetic(_) => "arithmetic",
        }
    }

    /// Run the calculation. Pure: identical requests give identical outputs.
    pub fn run(&self) -> CalcResult<CalculationOutput> {
        debug!(calc_type = self.calc_type(), "running calculation");
        let output = match self {
            CalculationRequest::Convert(input) => {
                let category = UnitCategory::parse(&input.category)?;
                let from = Unit::parse(&input.from_unit, category)?;
                let to = Unit::parse(&input.to_unit, category)?;
                let value = convert_between(input.value, from, to)?;
                CalculationOutput::Convert(ConversionOutput {
                    value,
                    unit: to.key().to_string(),
                    symbol: to.symbol().to_string(),
                })
            }
            CalculationRequest::Physics(input) => {
                CalculationOutput::Physics(evaluate_physics_formula(&input.formula, &input.inputs)?)
            }
            CalculationRequest::Investment(input) => CalculationOutput::Investment(investment::project(input)?),
            CalculationRequest::Loan(input) => CalculationOutput::Loan(loan::amortize(input)?),
            CalculationRequest::Salary(input) => CalculationOutput::Salary(salary::convert(input)?),
            CalculationRequest::Bmi(input) => CalculationOutput::Bmi(bmi::calculate(input)?),
            CalculationRequest::Arithmetic(input) => CalculationOutput::Arithmetic {
                value: arithmetic::calculate(input)?,
            },
        };
        Ok(output)
    }
}
