//! # Unit Conversion
//!
//! Dispatches a conversion to the table or nonlinear rule of its category and
//! drives `from -> canonical -> to`.
//!
//! ## Modules
//!
//! - [`tables`] - Scalar factor tables (length, mass)
//! - [`nonlinear`] - Temperature and angle rules
//! - [`currency`] - Static USD rate snapshot
//!
//! ## Example
//!
//! ```rust
//! use calc_core::conversions::convert_unit;
//!
//! let f = convert_unit(100.0, "celsius", "fahrenheit", "temperature").unwrap();
//! assert!((f - 212.0).abs() < 1e-9);
//!
//! assert!(convert_unit(1.0, "parsec", "meter", "length").is_err());
//! ```

pub mod currency;
pub mod nonlinear;
pub mod tables;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{finite_result, require_finite, CalcError, CalcResult};
use crate::units::{Quantity, Unit, UnitCategory};

pub use currency::{RateSnapshot, RATE_SNAPSHOT};
pub use nonlinear::{NonlinearRule, ANGLE_RULE, TEMPERATURE_RULE};
pub use tables::{ConversionTable, LENGTH_TABLE, MASS_TABLE};

/// How a category converts between its units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversionStrategy {
    /// One scalar factor per unit
    Table,
    /// Affine or base-change functions
    Nonlinear,
    /// Per-unit rate table (`value / from * to`)
    RateTable,
}

impl UnitCategory {
    /// Conversion strategy used for this category
    pub fn strategy(&self) -> ConversionStrategy {
        match self {
            UnitCategory::Length | UnitCategory::Mass => ConversionStrategy::Table,
            UnitCategory::Temperature | UnitCategory::Angle => ConversionStrategy::Nonlinear,
            UnitCategory::Currency => ConversionStrategy::RateTable,
        }
    }
}

/// Convert a value between two units given as identifiers.
///
/// # Errors
///
/// - `UnknownCategory` if `category` is not recognized
/// - `UnknownUnit` if either unit is not part of the category
/// - `InvalidInput` if `value` is not finite
pub fn convert_unit(value: f64, from_unit: &str, to_unit: &str, category: &str) -> CalcResult<f64> {
    let category = UnitCategory::parse(category)?;
    let from = Unit::parse(from_unit, category)?;
    let to = Unit::parse(to_unit, category)?;
    convert_between(value, from, to)
}

/// Convert a quantity into another unit of the same category.
pub fn convert(quantity: Quantity, to: Unit) -> CalcResult<Quantity> {
    let value = convert_between(quantity.value, quantity.unit, to)?;
    Ok(Quantity::new(value, to))
}

/// Convert a value between two typed units.
pub fn convert_between(value: f64, from: Unit, to: Unit) -> CalcResult<f64> {
    require_finite("value", value)?;

    let category = from.category();
    if to.category() != category {
        return Err(CalcError::unknown_unit(to.key(), category.key()));
    }
    if from == to {
        return Ok(value);
    }

    let result = match (from, to) {
        (Unit::Temperature(f), Unit::Temperature(t)) => TEMPERATURE_RULE.convert(value, f, t),
        (Unit::Angle(f), Unit::Angle(t)) => ANGLE_RULE.convert(value, f, t),
        (Unit::Currency(f), Unit::Currency(t)) => RATE_SNAPSHOT.convert(value, f, t)?,
        _ => from_canonical(to_canonical(value, from)?, to)?,
    };

    debug!(%category, %from, %to, value, result, strategy = ?category.strategy(), "converted");
    finite_result("unit conversion", result)
}

/// Express a value in its category's canonical unit.
pub fn to_canonical(value: f64, unit: Unit) -> CalcResult<f64> {
    match unit {
        Unit::Length(u) => LENGTH_TABLE.to_canonical(value, u, u.key()),
        Unit::Mass(u) => MASS_TABLE.to_canonical(value, u, u.key()),
        Unit::Temperature(u) => Ok((TEMPERATURE_RULE.to_canonical)(value, u)),
        Unit::Angle(u) => Ok((ANGLE_RULE.to_canonical)(value, u)),
        Unit::Currency(u) => RATE_SNAPSHOT.to_base(value, u),
    }
}

/// Express a canonical value in `unit`.
pub fn from_canonical(canonical: f64, unit: Unit) -> CalcResult<f64> {
    match unit {
        Unit::Length(u) => LENGTH_TABLE.from_canonical(canonical, u, u.key()),
        Unit::Mass(u) => MASS_TABLE.from_canonical(canonical, u, u.key()),
        Unit::Temperature(u) => Ok((TEMPERATURE_RULE.from_canonical)(canonical, u)),
        Unit::Angle(u) => Ok((ANGLE_RULE.from_canonical)(canonical, u)),
        Unit::Currency(u) => RATE_SNAPSHOT.from_base(canonical, u),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{LengthUnit, MassUnit};
    use approx::assert_relative_eq;

    #[test]
    fn test_self_conversion_identity() {
        for category in UnitCategory::ALL {
            for unit in category.units() {
                for value in [-12.5, 0.0, 1.0, 98.6, 1.0e6] {
                    let result = convert_unit(value, unit.key(), unit.key(), category.key()).unwrap();
                    assert!((result - value).abs() <= 1e-9, "{} {}", category, unit);
                }
            }
        }
    }

    #[test]
    fn test_round_trip_for_every_pair() {
        for category in UnitCategory::ALL {
            let units = category.units();
            for a in &units {
                for b in &units {
                    let there = convert_between(123.456, *a, *b).unwrap();
                    let back = convert_between(there, *b, *a).unwrap();
                    assert_relative_eq!(back, 123.456, max_relative = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_temperature_reference_points() {
        assert_eq!(convert_unit(0.0, "celsius", "fahrenheit", "temperature").unwrap(), 32.0);
        assert_relative_eq!(
            convert_unit(100.0, "celsius", "kelvin", "temperature").unwrap(),
            373.15,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_rule_categories_match_their_rules() {
        use crate::units::{AngleUnit, CurrencyCode, TemperatureUnit};

        let f = convert_between(
            37.0,
            Unit::Temperature(TemperatureUnit::Celsius),
            Unit::Temperature(TemperatureUnit::Fahrenheit),
        )
        .unwrap();
        assert_eq!(f, TEMPERATURE_RULE.convert(37.0, TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit));

        let grad = convert_between(45.0, Unit::Angle(AngleUnit::Degree), Unit::Angle(AngleUnit::Gradian)).unwrap();
        assert_relative_eq!(grad, 50.0, epsilon = 1e-12);

        let eur = convert_between(50.0, Unit::Currency(CurrencyCode::Gbp), Unit::Currency(CurrencyCode::Eur)).unwrap();
        assert_eq!(eur, RATE_SNAPSHOT.convert(50.0, CurrencyCode::Gbp, CurrencyCode::Eur).unwrap());
    }

    #[test]
    fn test_table_conversions() {
        assert_relative_eq!(convert_unit(1.0, "mile", "kilometer", "length").unwrap(), 1.60934, epsilon = 1e-12);
        assert_relative_eq!(convert_unit(12.0, "inch", "foot", "length").unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(convert_unit(1.0, "kg", "lb", "mass").unwrap(), 1000.0 / 453.592, epsilon = 1e-12);
    }

    #[test]
    fn test_typed_errors() {
        assert!(matches!(
            convert_unit(1.0, "meter", "cubit", "length"),
            Err(CalcError::UnknownUnit { .. })
        ));
        assert!(matches!(
            convert_unit(1.0, "liter", "gallon", "volume"),
            Err(CalcError::UnknownCategory { .. })
        ));
        assert!(matches!(
            convert_unit(f64::NAN, "meter", "foot", "length"),
            Err(CalcError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_cross_category_quantity_is_rejected() {
        let q = Quantity::new(1.0, Unit::Length(LengthUnit::Meter));
        let err = convert(q, Unit::Mass(MassUnit::Gram)).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_UNIT");
    }

    #[test]
    fn test_strategy_per_category() {
        assert_eq!(UnitCategory::Length.strategy(), ConversionStrategy::Table);
        assert_eq!(UnitCategory::Angle.strategy(), ConversionStrategy::Nonlinear);
        assert_eq!(UnitCategory::Currency.strategy(), ConversionStrategy::RateTable);
    }
}
