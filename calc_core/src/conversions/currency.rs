//! # Currency Rate Snapshot
//!
//! Cross-rate conversion through a compiled-in table of rates relative to
//! USD. The table is an approximate snapshot (December 2024 estimate) and is
//! never refreshed at runtime: results are indicative only.
//!
//! `convert = value / rate[from] * rate[to]`

use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;
use tracing::trace;

use crate::errors::{CalcError, CalcResult};
use crate::units::CurrencyCode;

/// Labeled, dated table of currency rates.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RateSnapshot {
    /// Human-readable provenance label
    pub label: &'static str,
    /// Year the rates were estimated
    pub year: i32,
    /// Month the rates were estimated
    pub month: u32,
    /// Reference currency (rate 1.0)
    pub base: CurrencyCode,
    /// Units of each currency per one unit of `base`
    pub rates: &'static [(CurrencyCode, f64)],
}

/// The snapshot used by the converter
pub static RATE_SNAPSHOT: RateSnapshot = RateSnapshot {
    label: "Approximate rates relative to USD (estimate, not a live feed)",
    year: 2024,
    month: 12,
    base: CurrencyCode::Usd,
    rates: &[
        (CurrencyCode::Usd, 1.0),
        (CurrencyCode::Eur, 0.91),
        (CurrencyCode::Gbp, 0.76),
        (CurrencyCode::Jpy, 142.5),
        (CurrencyCode::Cad, 1.35),
        (CurrencyCode::Aud, 1.50),
        (CurrencyCode::Zar, 18.50),
    ],
};

impl RateSnapshot {
    /// First day of the month the snapshot was taken
    pub fn as_of(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Whole months elapsed between the snapshot and `today`
    pub fn age_in_months(&self, today: NaiveDate) -> i32 {
        (today.year() - self.year) * 12 + today.month() as i32 - self.month as i32
    }

    /// Whole months elapsed between the snapshot and the current UTC date
    pub fn age_today(&self) -> i32 {
        self.age_in_months(Utc::now().date_naive())
    }

    /// Units of `code` per one unit of the base currency
    pub fn rate(&self, code: CurrencyCode) -> CalcResult<f64> {
        let rate = self
            .rates
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, r)| *r)
            .ok_or_else(|| CalcError::unknown_unit(code.key(), "currency"))?;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(CalcError::division_by_zero("currency conversion", code.key()));
        }
        Ok(rate)
    }

    /// Value expressed in the base currency
    pub fn to_base(&self, value: f64, from: CurrencyCode) -> CalcResult<f64> {
        Ok(value / self.rate(from)?)
    }

    /// Base-currency value expressed in `to`
    pub fn from_base(&self, base_value: f64, to: CurrencyCode) -> CalcResult<f64> {
        Ok(base_value * self.rate(to)?)
    }

    /// Cross-rate conversion through the base currency
    pub fn convert(&self, value: f64, from: CurrencyCode, to: CurrencyCode) -> CalcResult<f64> {
        let base_value = self.to_base(value, from)?;
        let result = self.from_base(base_value, to)?;
        trace!(%from, %to, value, result, "currency cross-rate");
        Ok(result)
    }
}
