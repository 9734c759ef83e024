//! # Loan Amortization
//!
//! Fixed monthly payment and yearly remaining-balance schedule for a fully
//! amortizing loan.
//!
//! ## Payment (annuity formula)
//!
//! ```text
//! m = P·r·(1+r)^n / ((1+r)^n − 1)     r > 0
//! m = P / n                           r = 0
//! ```
//!
//! A zero-length term (`n = 0`) is rejected with `DivisionByZero`; a
//! negative rate is rejected with `InvalidInput`.
//!
//! ## Schedule
//!
//! Starting from `P`, the balance is simulated month by month:
//! `interest = balance·r`, `principal_paid = m − interest`,
//! `balance −= principal_paid`. Months are skipped once the balance has
//! reached zero. A snapshot is taken at month 0 and at every year boundary.
//!
//! When the term is not a whole number of years a closing snapshot is added
//! at month `n`, labelled with the partial year it falls in (30 months ends
//! in period 3), so the schedule always ends at the paid-off balance.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::finance::amortize_loan;
//!
//! let loan = amortize_loan(200_000.0, 5.5, 30.0).unwrap();
//! assert_eq!(loan.summary.monthly_payment, 1136.0);
//! assert!(loan.schedule.last().unwrap().balance.abs() < 1.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::schedule::{AmortizationSchedule, Snapshot};
use super::{monthly_rate, months_for_years, MONTHS_PER_YEAR};
use crate::errors::{finite_result, require_finite, CalcError, CalcResult};

/// Input parameters for a loan.
///
/// ## JSON Example
///
/// ```json
/// {
///   "principal": 200000.0,
///   "annual_rate_percent": 5.5,
///   "years": 30.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    /// Amount borrowed
    pub principal: f64,
    /// Nominal annual interest rate in percent
    pub annual_rate_percent: f64,
    /// Loan term in years
    pub years: f64,
}

impl LoanInput {
    /// Validate input parameters, returning the number of monthly payments.
    pub fn validate(&self) -> CalcResult<u32> {
        require_finite("principal", self.principal)?;
        require_finite("annual_rate_percent", self.annual_rate_percent)?;
        if self.principal < 0.0 {
            return Err(CalcError::invalid_input(
                "principal",
                self.principal.to_string(),
                "Loan amount cannot be negative",
            ));
        }
        if self.annual_rate_percent < 0.0 {
            return Err(CalcError::invalid_input(
                "annual_rate_percent",
                self.annual_rate_percent.to_string(),
                "Interest rate cannot be negative",
            ));
        }
        let months = months_for_years("years", self.years)?;
        if months == 0 {
            return Err(CalcError::division_by_zero("loan amortization", "years"));
        }
        Ok(months)
    }
}

/// Aggregate figures of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    /// Monthly payment rounded to the nearest unit
    pub monthly_payment: f64,
    /// Unrounded monthly payment
    pub exact_monthly_payment: f64,
    /// `round(m·n)`
    pub total_paid: f64,
    /// `total_paid − principal`
    pub total_interest: f64,
}

/// Yearly balance schedule together with its summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanAmortization {
    pub schedule: AmortizationSchedule,
    pub summary: LoanSummary,
}

/// Fixed monthly payment for `principal` over `months` at monthly rate `r`.
pub fn monthly_payment(principal: f64, r: f64, months: u32) -> CalcResult<f64> {
    if months == 0 {
        return Err(CalcError::division_by_zero("loan payment", "years"));
    }
    let n = months as f64;
    // (1+r)^n − 1 via ln_1p/exp_m1; powf rounds to exactly 1 for tiny r
    let growth_m1 = if r > 0.0 { (n * r.ln_1p()).exp_m1() } else { 0.0 };
    let payment = if growth_m1 > 0.0 {
        principal * r * (growth_m1 + 1.0) / growth_m1
    } else {
        principal / n
    };
    finite_result("loan payment", payment)
}

/// Compute the payment and yearly schedule of a loan.
pub fn amortize(input: &LoanInput) -> CalcResult<LoanAmortization> {
    let months = input.validate()?;
    let r = monthly_rate(input.annual_rate_percent);
    let m = monthly_payment(input.principal, r, months)?;

    let mut balance = input.principal;
    let mut paid = 0.0;
    let mut snapshots = Vec::with_capacity((months / MONTHS_PER_YEAR) as usize + 2);
    snapshots.push(Snapshot {
        period: 0,
        month: 0,
        balance,
        contributed: paid,
    });

    for month in 1..=months {
        if balance > 0.0 {
            let interest = balance * r;
            let principal_paid = m - interest;
            balance -= principal_paid;
            paid += m;
        }
        if month % MONTHS_PER_YEAR == 0 || month == months {
            snapshots.push(Snapshot {
                period: month.div_ceil(MONTHS_PER_YEAR),
                month,
                balance,
                contributed: paid,
            });
        }
    }

    let total_paid = finite_result("loan amortization", (m * months as f64).round())?;
    let summary = LoanSummary {
        monthly_payment: m.round(),
        exact_monthly_payment: m,
        total_paid,
        total_interest: finite_result("loan amortization", total_paid - input.principal)?,
    };

    debug!(
        months,
        payment = m,
        final_balance = balance,
        total_paid = summary.total_paid,
        "amortized loan"
    );

    Ok(LoanAmortization {
        schedule: AmortizationSchedule::from_snapshots(snapshots),
        summary,
    })
}

/// Amortize a loan from positional arguments.
pub fn amortize_loan(principal: f64, annual_rate_percent: f64, years: f64) -> CalcResult<LoanAmortization> {
    amortize(&LoanInput {
        principal,
        annual_rate_percent,
        years,
    })
}
