//! # Calculator Settings
//!
//! User preferences persisted between sessions: display precision, the
//! default currency and the starting values of the finance forms.
//!
//! Settings are stored as JSON (see [`crate::file_io`] for atomic saves).
//!
//! ## Example
//!
//! ```rust
//! use calc_core::settings::CalculatorSettings;
//!
//! let settings = CalculatorSettings::default();
//! assert_eq!(settings.display_precision, 4);
//! assert_eq!(settings.loan.years, 30.0);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::finance::{InvestmentInput, LoanInput, SalaryInput};
use crate::units::CurrencyCode;

/// Current schema version for settings files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Largest accepted display precision
pub const MAX_DISPLAY_PRECISION: usize = 12;

/// Persisted calculator preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorSettings {
    /// Schema version of the file this was loaded from
    pub version: String,

    /// Decimal places shown for results
    pub display_precision: usize,

    /// Currency preselected in the converter
    pub default_currency: CurrencyCode,

    /// Initial investment form
    #[serde(default = "default_investment")]
    pub investment: InvestmentInput,

    /// Initial loan form
    #[serde(default = "default_loan")]
    pub loan: LoanInput,

    /// Initial salary form
    #[serde(default = "default_salary")]
    pub salary: SalaryInput,

    /// Last save time, set by [`crate::file_io::save_settings`]
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        CalculatorSettings {
            version: SCHEMA_VERSION.to_string(),
            display_precision: 4,
            default_currency: CurrencyCode::Usd,
            investment: default_investment(),
            loan: default_loan(),
            salary: default_salary(),
            saved_at: None,
        }
    }
}

impl CalculatorSettings {
    /// Check the stored form values before handing them to a calculation.
    pub fn validate(&self) -> CalcResult<()> {
        if self.display_precision > MAX_DISPLAY_PRECISION {
            return Err(CalcError::invalid_input(
                "display_precision",
                self.display_precision.to_string(),
                format!("Precision must be at most {}", MAX_DISPLAY_PRECISION),
            ));
        }
        self.investment.validate()?;
        self.salary.validate()?;
        self.loan.validate()?;
        Ok(())
    }

    /// Format a result with the configured precision
    pub fn format_value(&self, value: f64) -> String {
        format!("{:.*}", self.display_precision, value)
    }
}

fn default_investment() -> InvestmentInput {
    InvestmentInput {
        principal: 1_000.0,
        monthly_contribution: 200.0,
        annual_rate_percent: 7.0,
        years: 10.0,
    }
}

fn default_loan() -> LoanInput {
    LoanInput {
        principal: 200_000.0,
        annual_rate_percent: 5.5,
        years: 30.0,
    }
}

fn default_salary() -> SalaryInput {
    SalaryInput {
        hourly_rate: 25.0,
        hours_per_week: 40.0,
        weeks_per_year: 52.0,
    }
}
