//! # Body-Mass Index
//!
//! BMI from weight in kilograms and height in centimeters, with the adult
//! weight-status classes.
//!
//! ```text
//! BMI = weight_kg / (height_cm / 100)²
//! ```
//!
//! | BMI          | Class       |
//! |--------------|-------------|
//! | < 18.5       | Underweight |
//! | 18.5 – 24.9  | Normal      |
//! | 25.0 – 29.9  | Overweight  |
//! | ≥ 30.0       | Obese       |
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::bmi::{calculate_bmi, BmiCategory};
//!
//! let result = calculate_bmi(70.0, 175.0).unwrap();
//! assert_eq!(result.rounded, 22.9);
//! assert_eq!(result.category, BmiCategory::Normal);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{finite_result, require_finite, CalcError, CalcResult};

/// Upper end of the BMI gauge
pub const GAUGE_MAX_BMI: f64 = 40.0;

/// Input parameters for a BMI calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiInput {
    pub weight_kg: f64,
    pub height_cm: f64,
}

impl BmiInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_finite("weight_kg", self.weight_kg)?;
        require_finite("height_cm", self.height_cm)?;
        if self.weight_kg <= 0.0 {
            return Err(CalcError::invalid_input(
                "weight_kg",
                self.weight_kg.to_string(),
                "Weight must be positive",
            ));
        }
        if self.height_cm == 0.0 {
            return Err(CalcError::division_by_zero("bmi", "height_cm"));
        }
        if self.height_cm < 0.0 {
            return Err(CalcError::invalid_input(
                "height_cm",
                self.height_cm.to_string(),
                "Height must be positive",
            ));
        }
        Ok(())
    }
}

/// Weight-status class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Class for a BMI value
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

/// BMI calculation results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    /// Unrounded BMI
    pub bmi: f64,
    /// BMI rounded to one decimal
    pub rounded: f64,
    pub category: BmiCategory,
    /// Position on a 0–40 gauge, clamped to `[0, 1]`
    pub gauge_position: f64,
}

/// Calculate BMI from an input struct.
pub fn calculate(input: &BmiInput) -> CalcResult<BmiResult> {
    input.validate()?;
    let height_m = input.height_cm / 100.0;
    let bmi = finite_result("bmi", input.weight_kg / (height_m * height_m))?;
    Ok(BmiResult {
        bmi,
        rounded: (bmi * 10.0).round() / 10.0,
        category: BmiCategory::classify(bmi),
        gauge_position: (bmi / GAUGE_MAX_BMI).clamp(0.0, 1.0),
    })
}

/// Calculate BMI from weight (kg) and height (cm).
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> CalcResult<BmiResult> {
    calculate(&BmiInput { weight_kg, height_cm })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_adult() {
        let result = calculate_bmi(70.0, 175.0).unwrap();
        assert!((result.bmi - 22.857).abs() < 1e-3);
        assert_eq!(result.rounded, 22.9);
        assert_eq!(result.category, BmiCategory::Normal);
    }

    #[test]
    fn test_class_boundaries() {
        assert_eq!(BmiCategory::classify(18.49), BmiCategory::Underweight);
        assert_eq!(BmiCategory::classify(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::classify(24.99), BmiCategory::Normal);
        assert_eq!(BmiCategory::classify(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::classify(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_gauge_is_clamped() {
        let heavy = calculate_bmi(200.0, 150.0).unwrap();
        assert_eq!(heavy.gauge_position, 1.0);
        assert_eq!(heavy.category, BmiCategory::Obese);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            calculate_bmi(70.0, 0.0),
            Err(CalcError::DivisionByZero { .. })
        ));
        assert!(matches!(
            calculate_bmi(0.0, 170.0),
            Err(CalcError::InvalidInput { .. })
        ));
        assert!(calculate_bmi(70.0, -170.0).is_err());
    }
}
