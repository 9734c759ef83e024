//! # Symbolic Math Seam
//!
//! The mathematics tool hands free-text algebra to an external computer
//! algebra system. calc_core does not embed one; it defines the narrow
//! contract such an engine must satisfy, classifies the user's text into a
//! request, and samples compiled functions for plotting.
//!
//! ## Request classification
//!
//! | Input                         | Request                     |
//! |-------------------------------|-----------------------------|
//! | contains `=`                  | `Solve` for the first letter (default `x`) |
//! | `diff(...)`, `derivative(...)`| `Differentiate`             |
//! | `integrate(...)`, `int(...)`  | `Integrate`                 |
//! | anything else                 | `Simplify`                  |
//!
//! ## Example
//!
//! ```rust
//! use calc_core::symbolic::SymbolicRequest;
//!
//! let request = SymbolicRequest::parse("2*y + 4 = 10").unwrap();
//! assert_eq!(
//!     request,
//!     SymbolicRequest::Solve { equation: "2*y + 4 = 10".to_string(), variable: 'y' }
//! );
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};

/// A classified symbolic-math request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SymbolicRequest {
    /// Solve an equation for one variable
    Solve { equation: String, variable: char },
    /// Differentiate an expression
    Differentiate { expression: String },
    /// Integrate an expression
    Integrate { expression: String },
    /// Simplify or evaluate an expression
    Simplify { expression: String },
}

impl SymbolicRequest {
    /// Classify free text into a request.
    pub fn parse(text: &str) -> CalcResult<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CalcError::invalid_input("expression", "", "expression is empty"));
        }

        if text.contains('=') {
            let variable = text.chars().find(|c| c.is_ascii_alphabetic()).unwrap_or('x');
            return Ok(SymbolicRequest::Solve {
                equation: text.to_string(),
                variable,
            });
        }

        if let Some(inner) = strip_call(text, &["derivative", "diff"]) {
            return Ok(SymbolicRequest::Differentiate { expression: inner });
        }
        if let Some(inner) = strip_call(text, &["integrate", "int"]) {
            return Ok(SymbolicRequest::Integrate { expression: inner });
        }

        Ok(SymbolicRequest::Simplify {
            expression: text.to_string(),
        })
    }

    /// The expression or equation text handed to the engine
    pub fn expression(&self) -> &str {
        match self {
            SymbolicRequest::Solve { equation, .. } => equation,
            SymbolicRequest::Differentiate { expression }
            | SymbolicRequest::Integrate { expression }
            | SymbolicRequest::Simplify { expression } => expression,
        }
    }

    /// One-line explanation of what was done, for display next to the answer
    pub fn explanation(&self) -> String {
        match self {
            SymbolicRequest::Solve { variable, .. } => format!("Solved for variable '{}'.", variable),
            SymbolicRequest::Differentiate { .. } => "Calculated the derivative.".to_string(),
            SymbolicRequest::Integrate { .. } => "Calculated the indefinite integral.".to_string(),
            SymbolicRequest::Simplify { .. } => "Simplified the expression.".to_string(),
        }
    }
}

/// Strip a `name(...)` wrapper, matching names case-insensitively.
///
/// Longer names must come first so `int` does not shadow `integrate`.
fn strip_call(text: &str, names: &[&str]) -> Option<String> {
    let lower = text.to_ascii_lowercase();
    for name in names {
        let prefix = format!("{}(", name);
        if lower.starts_with(&prefix) {
            let inner = &text[prefix.len()..];
            let inner = inner.strip_suffix(')').unwrap_or(inner);
            return Some(inner.trim().to_string());
        }
    }
    None
}

/// Answer from the symbolic engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SymbolicAnswer {
    Single(String),
    Multiple(Vec<String>),
}

impl fmt::Display for SymbolicAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolicAnswer::Single(s) => f.write_str(s),
            SymbolicAnswer::Multiple(all) => write!(f, "[{}]", all.join(", ")),
        }
    }
}

/// A one-variable numeric function compiled by the engine.
pub type CompiledFunction = Box<dyn Fn(f64) -> f64 + Send + Sync>;

/// Contract of the external computer algebra system.
///
/// Implementations must report parse and solve failures as
/// [`CalcError::SymbolicFailure`] instead of panicking.
pub trait SymbolicEngine {
    /// Solve, differentiate, integrate or simplify
    fn evaluate(&self, request: &SymbolicRequest) -> CalcResult<SymbolicAnswer>;

    /// Compile an expression in `x` into a numeric function for plotting
    fn compile(&self, expression: &str) -> CalcResult<CompiledFunction>;
}

/// Classify free text and hand it to an engine.
pub fn solve_text(engine: &dyn SymbolicEngine, text: &str) -> CalcResult<(SymbolicRequest, SymbolicAnswer)> {
    let request = SymbolicRequest::parse(text)?;
    debug!(?request, "symbolic request");
    let answer = engine.evaluate(&request)?;
    Ok((request, answer))
}

/// A sampled point of a plotted function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

/// Sample `f` at `steps + 1` evenly spaced points on `[x_min, x_max]`.
///
/// Points where `f` is not finite (poles, domain errors) are skipped.
pub fn sample_function<F>(f: F, x_min: f64, x_max: f64, steps: usize) -> CalcResult<Vec<PlotPoint>>
where
    F: Fn(f64) -> f64,
{
    if !x_min.is_finite() || !x_max.is_finite() || x_min >= x_max {
        return Err(CalcError::invalid_input(
            "range",
            format!("[{}, {}]", x_min, x_max),
            "range must be finite with x_min < x_max",
        ));
    }
    if steps == 0 {
        return Err(CalcError::invalid_input("steps", "0", "at least one step is required"));
    }

    let width = (x_max - x_min) / steps as f64;
    let points = (0..=steps)
        .map(|i| x_min + width * i as f64)
        .filter_map(|x| {
            let y = f(x);
            y.is_finite().then_some(PlotPoint { x, y })
        })
        .collect();
    Ok(points)
}

/// Compile an expression through an engine and sample it.
pub fn plot(
    engine: &dyn SymbolicEngine,
    expression: &str,
    x_min: f64,
    x_max: f64,
    steps: usize,
) -> CalcResult<Vec<PlotPoint>> {
    let f = engine.compile(expression)?;
    sample_function(f, x_min, x_max, steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Engine that knows a couple of canned answers
    struct CannedEngine;

    impl SymbolicEngine for CannedEngine {
        fn evaluate(&self, request: &SymbolicRequest) -> CalcResult<SymbolicAnswer> {
            match request {
                SymbolicRequest::Solve { equation, .. } if equation == "x^2 = 4" => {
                    Ok(SymbolicAnswer::Multiple(vec!["2".to_string(), "-2".to_string()]))
                }
                SymbolicRequest::Differentiate { expression } if expression == "x^2" => {
                    Ok(SymbolicAnswer::Single("2*x".to_string()))
                }
                other => Err(CalcError::symbolic_failure(other.expression(), "unsupported")),
            }
        }

        fn compile(&self, expression: &str) -> CalcResult<CompiledFunction> {
            match expression {
                "1/x" => Ok(Box::new(|x: f64| 1.0 / x)),
                "x^2" => Ok(Box::new(|x: f64| x * x)),
                other => Err(CalcError::symbolic_failure(other, "cannot compile")),
            }
        }
    }

    #[test]
    fn test_classification() {
        assert_eq!(
            SymbolicRequest::parse("x^2 = 4").unwrap(),
            SymbolicRequest::Solve {
                equation: "x^2 = 4".to_string(),
                variable: 'x'
            }
        );
        assert_eq!(
            SymbolicRequest::parse("Diff(x^3)").unwrap(),
            SymbolicRequest::Differentiate {
                expression: "x^3".to_string()
            }
        );
        assert_eq!(
            SymbolicRequest::parse("integrate(sin(x))").unwrap(),
            SymbolicRequest::Integrate {
                expression: "sin(x)".to_string()
            }
        );
        assert_eq!(
            SymbolicRequest::parse("int(x)").unwrap(),
            SymbolicRequest::Integrate {
                expression: "x".to_string()
            }
        );
        assert_eq!(
            SymbolicRequest::parse("(x+1)^2").unwrap(),
            SymbolicRequest::Simplify {
                expression: "(x+1)^2".to_string()
            }
        );
        assert!(SymbolicRequest::parse("   ").is_err());
    }

    #[test]
    fn test_solve_variable_defaults_to_x() {
        let request = SymbolicRequest::parse("2 = 2").unwrap();
        assert!(matches!(request, SymbolicRequest::Solve { variable: 'x', .. }));
    }

    #[test]
    fn test_solve_text_with_engine() {
        let (request, answer) = solve_text(&CannedEngine, "x^2 = 4").unwrap();
        assert_eq!(request.explanation(), "Solved for variable 'x'.");
        assert_eq!(answer.to_string(), "[2, -2]");

        let (_, answer) = solve_text(&CannedEngine, "diff(x^2)").unwrap();
        assert_eq!(answer, SymbolicAnswer::Single("2*x".to_string()));
    }

    #[test]
    fn test_engine_failure_is_typed() {
        let err = solve_text(&CannedEngine, "x^5 + x = 1").unwrap_err();
        assert_eq!(err.error_code(), "SYMBOLIC_FAILURE");
    }

    #[test]
    fn test_plot_skips_poles() {
        let points = plot(&CannedEngine, "1/x", -1.0, 1.0, 4).unwrap();
        // x = 0 is dropped
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![-1.0, -0.5, 0.5, 1.0]);
    }

    #[test]
    fn test_sample_function_validation() {
        assert!(sample_function(|x| x, 1.0, 1.0, 10).is_err());
        assert!(sample_function(|x| x, 0.0, 1.0, 0).is_err());
        let points = sample_function(|x| x * 2.0, 0.0, 1.0, 2).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[2], PlotPoint { x: 1.0, y: 2.0 });
    }

    #[test]
    fn test_compile_failure() {
        assert!(plot(&CannedEngine, "tan(", -1.0, 1.0, 10).is_err());
    }
}
