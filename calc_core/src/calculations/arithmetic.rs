//! # Arithmetic Operations
//!
//! The binary operations of the basic keypad. Expression parsing is not
//! handled here; callers supply two operands and an operator.
//!
//! `%` is the truncated remainder: the result takes the sign of the dividend
//! (`-7 % 3 == -1`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{finite_result, require_finite, CalcError, CalcResult};

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 5] = [
        BinaryOp::Add,
        BinaryOp::Subtract,
        BinaryOp::Multiply,
        BinaryOp::Divide,
        BinaryOp::Remainder,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "×",
            BinaryOp::Divide => "÷",
            BinaryOp::Remainder => "%",
        }
    }

    /// Apply the operator; dividing by zero is an error, not infinity.
    pub fn apply(&self, a: f64, b: f64) -> CalcResult<f64> {
        require_finite("a", a)?;
        require_finite("b", b)?;
        let value = match self {
            BinaryOp::Add => a + b,
            BinaryOp::Subtract => a - b,
            BinaryOp::Multiply => a * b,
            BinaryOp::Divide => {
                if b == 0.0 {
                    return Err(CalcError::division_by_zero("division", "b"));
                }
                a / b
            }
            BinaryOp::Remainder => {
                if b == 0.0 {
                    return Err(CalcError::division_by_zero("remainder", "b"));
                }
                a % b
            }
        };
        finite_result("arithmetic", value)
    }
}

impl FromStr for BinaryOp {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s.trim().to_ascii_lowercase().as_str() {
            "+" | "add" | "addition" | "plus" => BinaryOp::Add,
            "-" | "sub" | "subtract" | "subtraction" | "minus" => BinaryOp::Subtract,
            "*" | "x" | "×" | "mul" | "multiply" | "multiplication" | "times" => BinaryOp::Multiply,
            "/" | "÷" | "div" | "divide" | "division" => BinaryOp::Divide,
            "%" | "mod" | "rem" | "remainder" | "modulo" => BinaryOp::Remainder,
            other => return Err(CalcError::unsupported(format!("operator '{}'", other))),
        };
        Ok(op)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One keypad operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArithmeticInput {
    pub a: f64,
    pub op: BinaryOp,
    pub b: f64,
}

/// Evaluate a keypad operation.
pub fn calculate(input: &ArithmeticInput) -> CalcResult<f64> {
    input.op.apply(input.a, input.b)
}
