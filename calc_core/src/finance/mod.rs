//! # Financial Projections
//!
//! Monthly-period projections for the finance tool. Each calculation follows
//! the pattern used across calc_core:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Summary` / `*Breakdown` - Aggregate results
//! - a pure function from input to result
//!
//! ## Available Projections
//!
//! - [`investment`] - Compound growth with a fixed monthly contribution
//! - [`loan`] - Annuity payment and yearly amortization schedule
//! - [`salary`] - Hourly rate to daily/weekly/monthly/annual pay
//!
//! Schedules and summaries are always produced by the same pass over the
//! recurrence, so they describe the same parameters and period count.

pub mod investment;
pub mod loan;
pub mod salary;
pub mod schedule;

use crate::errors::{require_finite, CalcError, CalcResult};

pub use investment::{project_investment_growth, InvestmentInput, InvestmentProjection, InvestmentSummary};
pub use loan::{amortize_loan, LoanAmortization, LoanInput, LoanSummary};
pub use salary::{convert_salary, SalaryBreakdown, SalaryInput, WORK_DAYS_PER_WEEK};
pub use schedule::{AmortizationSchedule, Snapshot};

/// Compounding periods per year
pub const MONTHS_PER_YEAR: u32 = 12;

/// Longest accepted projection horizon
pub const MAX_YEARS: f64 = 100.0;

/// Number of monthly periods in a horizon given in years.
///
/// Fractional years are accepted as long as they describe a whole number of
/// months (e.g., 2.5 years = 30 months).
pub fn months_for_years(field: &str, years: f64) -> CalcResult<u32> {
    require_finite(field, years)?;
    if years < 0.0 {
        return Err(CalcError::invalid_input(field, years.to_string(), "Years cannot be negative"));
    }
    if years > MAX_YEARS {
        return Err(CalcError::invalid_input(
            field,
            years.to_string(),
            format!("Horizon exceeds {} years", MAX_YEARS),
        ));
    }
    let months = years * MONTHS_PER_YEAR as f64;
    if (months - months.round()).abs() > 1e-9 {
        return Err(CalcError::invalid_input(
            field,
            years.to_string(),
            "Horizon must be a whole number of months",
        ));
    }
    Ok(months.round() as u32)
}

/// Monthly rate from an annual percentage (7.0 -> 0.07 / 12)
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / MONTHS_PER_YEAR as f64
}
