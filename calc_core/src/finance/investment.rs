//! # Investment Growth
//!
//! Compound growth of a starting amount with a fixed monthly contribution.
//!
//! ## Recurrence
//!
//! With `r = annual_rate_percent / 100 / 12` and `n = years * 12`:
//!
//! ```text
//! balance[0]  = principal          invested[0]  = principal
//! balance[i+1] = balance[i]·(1+r) + pmt
//! invested[i+1] = invested[i] + pmt
//! ```
//!
//! Months `0..=n` are visited; at every year boundary the pre-advance values
//! are recorded before the month is advanced. The loop therefore advances one
//! step past the last recorded month, and the summary removes one
//! contribution from both totals (`total = balance_end - pmt`).
//!
//! NOTE: that correction removes the extra contribution but not the extra
//! month of interest, so for `r != 0` the summary total exceeds the last
//! snapshot by one month of growth. It is kept because the calculator has
//! always reported these figures; treat it as a candidate defect rather than
//! a financial convention.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::finance::project_investment_growth;
//!
//! let projection = project_investment_growth(1000.0, 200.0, 7.0, 10.0).unwrap();
//! assert_eq!(projection.schedule.len(), 11); // years 0..=10
//! assert!(projection.summary.interest > 0.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::schedule::{AmortizationSchedule, Snapshot};
use super::{monthly_rate, months_for_years, MONTHS_PER_YEAR};
use crate::errors::{finite_result, require_finite, CalcResult};

/// Input parameters for an investment projection.
///
/// ## JSON Example
///
/// ```json
/// {
///   "principal": 1000.0,
///   "monthly_contribution": 200.0,
///   "annual_rate_percent": 7.0,
///   "years": 10.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentInput {
    /// Starting amount
    pub principal: f64,
    /// Amount added at the end of every month
    pub monthly_contribution: f64,
    /// Annual return in percent (7.0 = 7 %); zero or negative allowed
    pub annual_rate_percent: f64,
    /// Projection horizon in years
    pub years: f64,
}

impl InvestmentInput {
    /// Validate input parameters, returning the number of monthly periods.
    pub fn validate(&self) -> CalcResult<u32> {
        require_finite("principal", self.principal)?;
        require_finite("monthly_contribution", self.monthly_contribution)?;
        require_finite("annual_rate_percent", self.annual_rate_percent)?;
        months_for_years("years", self.years)
    }
}

/// Aggregate figures of an investment projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentSummary {
    /// Final value
    pub total: f64,
    /// Principal plus contributions
    pub invested: f64,
    /// `total - invested`
    pub interest: f64,
}

/// Yearly schedule together with its summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentProjection {
    pub schedule: AmortizationSchedule,
    pub summary: InvestmentSummary,
}

/// Run the investment recurrence.
pub fn project(input: &InvestmentInput) -> CalcResult<InvestmentProjection> {
    let months = input.validate()?;
    let r = monthly_rate(input.annual_rate_percent);
    let pmt = input.monthly_contribution;

    let mut balance = input.principal;
    let mut invested = input.principal;

    if months == 0 {
        let schedule = AmortizationSchedule::from_snapshots(vec![Snapshot {
            period: 0,
            month: 0,
            balance,
            contributed: invested,
        }]);
        return Ok(InvestmentProjection {
            schedule,
            summary: InvestmentSummary {
                total: balance,
                invested,
                interest: 0.0,
            },
        });
    }

    let mut snapshots = Vec::with_capacity((months / MONTHS_PER_YEAR) as usize + 1);
    for month in 0..=months {
        if month % MONTHS_PER_YEAR == 0 {
            snapshots.push(Snapshot {
                period: month / MONTHS_PER_YEAR,
                month,
                balance,
                contributed: invested,
            });
        }
        balance = balance * (1.0 + r) + pmt;
        invested += pmt;
    }

    let total = finite_result("investment projection", balance - pmt)?;
    let invested = finite_result("investment projection", invested - pmt)?;
    let summary = InvestmentSummary {
        total,
        invested,
        interest: total - invested,
    };

    debug!(
        months,
        snapshots = snapshots.len(),
        total = summary.total,
        interest = summary.interest,
        "projected investment growth"
    );

    Ok(InvestmentProjection {
        schedule: AmortizationSchedule::from_snapshots(snapshots),
        summary,
    })
}

/// Project investment growth from positional arguments.
pub fn project_investment_growth(
    principal: f64,
    monthly_contribution: f64,
    annual_rate_percent: f64,
    years: f64,
) -> CalcResult<InvestmentProjection> {
    project(&InvestmentInput {
        principal,
        monthly_contribution,
        annual_rate_percent,
        years,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;
    use approx::assert_relative_eq;

    /// Closed form of the recurrence after `k` advances
    fn closed_form(principal: f64, pmt: f64, r: f64, k: i32) -> f64 {
        let growth = (1.0 + r).powi(k);
        principal * growth + pmt * (growth - 1.0) / r
    }

    #[test]
    fn test_no_money_no_growth() {
        let projection = project_investment_growth(0.0, 0.0, 0.0, 5.0).unwrap();
        assert_eq!(projection.summary.total, 0.0);
        assert_eq!(projection.summary.interest, 0.0);
        assert_eq!(projection.schedule.len(), 6);
    }

    #[test]
    fn test_zero_years_is_a_single_snapshot() {
        let projection = project_investment_growth(1500.0, 100.0, 8.0, 0.0).unwrap();
        assert_eq!(projection.schedule.len(), 1);
        let only = projection.schedule.first().unwrap();
        assert_eq!((only.period, only.balance, only.contributed), (0, 1500.0, 1500.0));
        assert_eq!(projection.summary.total, 1500.0);
        assert_eq!(projection.summary.interest, 0.0);
    }

    #[test]
    fn test_zero_rate_is_simple_addition() {
        let projection = project_investment_growth(1000.0, 100.0, 0.0, 2.0).unwrap();
        let balances: Vec<f64> = projection.schedule.iter().map(|s| s.balance).collect();
        assert_eq!(balances, vec![1000.0, 2200.0, 3400.0]);

        // With no interest the corrected totals match the last snapshot
        assert_eq!(projection.summary.total, 3400.0);
        assert_eq!(projection.summary.invested, 3400.0);
        assert_eq!(projection.summary.interest, 0.0);
    }

    #[test]
    fn test_snapshots_follow_the_recurrence() {
        let (principal, pmt, rate) = (1000.0, 200.0, 7.0);
        let r = rate / 100.0 / 12.0;
        let projection = project_investment_growth(principal, pmt, rate, 10.0).unwrap();

        assert_eq!(projection.schedule.len(), 11);
        for snapshot in &projection.schedule {
            let k = snapshot.month as i32;
            assert_relative_eq!(snapshot.balance, closed_form(principal, pmt, r, k), max_relative = 1e-12);
            assert_relative_eq!(snapshot.contributed, principal + pmt * k as f64, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_summary_keeps_one_contribution_correction() {
        let (principal, pmt, rate) = (1000.0, 200.0, 7.0);
        let r = rate / 100.0 / 12.0;
        let projection = project_investment_growth(principal, pmt, rate, 10.0).unwrap();
        let summary = projection.summary;

        // 121 advances happen for 120 months; one contribution is removed
        assert_relative_eq!(summary.total, closed_form(principal, pmt, r, 121) - pmt, max_relative = 1e-12);
        assert_relative_eq!(summary.invested, principal + pmt * 120.0, max_relative = 1e-12);
        assert_relative_eq!(summary.interest, summary.total - summary.invested);

        // Reported total is one month of growth above the last sample
        let last = projection.schedule.last().unwrap();
        assert_relative_eq!(summary.total, last.balance * (1.0 + r), max_relative = 1e-12);
    }

    #[test]
    fn test_negative_rate_still_applies() {
        let projection = project_investment_growth(1000.0, 0.0, -12.0, 1.0).unwrap();
        let last = projection.schedule.last().unwrap();
        assert_relative_eq!(last.balance, 1000.0 * 0.99f64.powi(12), max_relative = 1e-12);
        assert!(projection.summary.interest < 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            project_investment_growth(f64::NAN, 0.0, 5.0, 1.0),
            Err(CalcError::InvalidInput { ref field, .. }) if field == "principal"
        ));
        assert!(matches!(
            project_investment_growth(100.0, 0.0, 5.0, -2.0),
            Err(CalcError::InvalidInput { ref field, .. }) if field == "years"
        ));
    }

    #[test]
    fn test_recomputation_is_deterministic() {
        let a = project_investment_growth(2500.0, 150.0, 6.5, 15.0).unwrap();
        let b = project_investment_growth(2500.0, 150.0, 6.5, 15.0).unwrap();
        assert_eq!(a, b);
    }
}
