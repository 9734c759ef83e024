//! # Salary Conversion
//!
//! Derives daily, weekly, monthly and annual pay from an hourly rate.
//!
//! ```text
//! annual  = hourly · hours_per_week · weeks_per_year
//! monthly = annual / 12
//! weekly  = annual / 52
//! daily   = weekly / 5
//! ```
//!
//! `weekly` always divides by 52 calendar weeks, even when fewer working
//! weeks are entered, so unpaid weeks are spread across the year.

use serde::{Deserialize, Serialize};

use crate::errors::{finite_result, require_finite, CalcError, CalcResult};

/// Working days in a week (fixed policy, not configurable)
pub const WORK_DAYS_PER_WEEK: f64 = 5.0;

/// Calendar weeks used to derive weekly pay
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// Months used to derive monthly pay
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Input parameters for a salary conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryInput {
    pub hourly_rate: f64,
    pub hours_per_week: f64,
    pub weeks_per_year: f64,
}

impl SalaryInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("hourly_rate", self.hourly_rate),
            ("hours_per_week", self.hours_per_week),
            ("weeks_per_year", self.weeks_per_year),
        ] {
            require_finite(field, value)?;
            if value < 0.0 {
                return Err(CalcError::invalid_input(field, value.to_string(), "Value cannot be negative"));
            }
        }
        Ok(())
    }
}

/// Pay expressed per day, week, month and year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
    pub annual: f64,
}

/// Convert an hourly rate into a pay breakdown.
pub fn convert(input: &SalaryInput) -> CalcResult<SalaryBreakdown> {
    input.validate()?;
    let annual = finite_result(
        "salary conversion",
        input.hourly_rate * input.hours_per_week * input.weeks_per_year,
    )?;
    let weekly = annual / WEEKS_PER_YEAR;
    Ok(SalaryBreakdown {
        daily: finite_result("salary conversion", weekly / WORK_DAYS_PER_WEEK)?,
        weekly: finite_result("salary conversion", weekly)?,
        monthly: finite_result("salary conversion", annual / MONTHS_PER_YEAR)?,
        annual,
    })
}

/// Convert an hourly rate from positional arguments.
pub fn convert_salary(hourly_rate: f64, hours_per_week: f64, weeks_per_year: f64) -> CalcResult<SalaryBreakdown> {
    convert(&SalaryInput {
        hourly_rate,
        hours_per_week,
        weeks_per_year,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_full_time_breakdown() {
        let pay = convert_salary(25.0, 40.0, 52.0).unwrap();
        assert_eq!(pay.annual, 52_000.0);
        assert_relative_eq!(pay.monthly, 52_000.0 / 12.0);
        assert_eq!(pay.weekly, 1_000.0);
        assert_eq!(pay.daily, 200.0);
    }

    #[test]
    fn test_weekly_spreads_unpaid_weeks() {
        let pay = convert_salary(20.0, 40.0, 48.0).unwrap();
        assert_eq!(pay.annual, 38_400.0);
        assert_relative_eq!(pay.weekly, 38_400.0 / 52.0);
        assert_relative_eq!(pay.daily, pay.weekly / 5.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            convert_salary(-1.0, 40.0, 52.0),
            Err(CalcError::InvalidInput { ref field, .. }) if field == "hourly_rate"
        ));
        assert!(convert_salary(20.0, f64::NAN, 52.0).is_err());
    }

    #[test]
    fn test_overflow_is_an_error() {
        let result = convert_salary(1e200, 1e200, 52.0);
        assert!(matches!(result, Err(CalcError::CalculationFailed { .. })), "got {:?}", result);
    }
}
