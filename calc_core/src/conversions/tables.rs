//! # Unit Table Registry
//!
//! Scalar conversion tables for categories whose units differ only by a
//! constant factor. Each entry reads "1 unit = factor canonical units".
//!
//! ## Tables
//!
//! | Category | Canonical | Source of factors |
//! |----------|-----------|-------------------|
//! | Length   | meter     | International yard and pound agreement (1959), mile rounded to 1609.34 m |
//! | Mass     | gram      | Avoirdupois pound 453.592 g, ounce 28.3495 g |

use std::fmt::Debug;

use crate::errors::{CalcError, CalcResult};
use crate::units::{LengthUnit, MassUnit, UnitCategory};

/// Static factor table for one category.
#[derive(Debug, Clone, Copy)]
pub struct ConversionTable<U: 'static> {
    /// Category the table converts within
    pub category: UnitCategory,
    /// `(unit, factor)` pairs; factor is canonical units per one `unit`
    pub entries: &'static [(U, f64)],
}

impl<U: Copy + PartialEq + Debug + 'static> ConversionTable<U> {
    /// Factor for a unit, if the table lists it
    pub fn factor(&self, unit: U) -> Option<f64> {
        self.entries
            .iter()
            .find(|(u, _)| *u == unit)
            .map(|(_, factor)| *factor)
    }

    /// The single unit whose factor is exactly 1
    pub fn canonical(&self) -> Option<U> {
        let mut ones = self.entries.iter().filter(|(_, f)| *f == 1.0);
        match (ones.next(), ones.next()) {
            (Some((unit, _)), None) => Some(*unit),
            _ => None,
        }
    }

    /// Check the table invariants: one canonical unit, all factors positive
    /// and finite.
    pub fn validate(&self) -> CalcResult<()> {
        if self.canonical().is_none() {
            return Err(CalcError::Internal {
                message: format!("{} table must have exactly one unit with factor 1", self.category),
            });
        }
        for (unit, factor) in self.entries {
            if !factor.is_finite() || *factor <= 0.0 {
                return Err(CalcError::Internal {
                    message: format!("{} table has invalid factor {} for {:?}", self.category, factor, unit),
                });
            }
        }
        Ok(())
    }

    /// Normalize a value to the canonical unit: `value * factor`
    pub fn to_canonical(&self, value: f64, unit: U, key: &str) -> CalcResult<f64> {
        let factor = self.usable_factor(unit, key)?;
        Ok(value * factor)
    }

    /// Denormalize a canonical value: `canonical / factor`
    pub fn from_canonical(&self, canonical: f64, unit: U, key: &str) -> CalcResult<f64> {
        let factor = self.usable_factor(unit, key)?;
        Ok(canonical / factor)
    }

    fn usable_factor(&self, unit: U, key: &str) -> CalcResult<f64> {
        match self.factor(unit) {
            Some(factor) if factor.is_finite() && factor > 0.0 => Ok(factor),
            Some(_) => Err(CalcError::division_by_zero(
                format!("{} conversion", self.category),
                key,
            )),
            None => Err(CalcError::unknown_unit(key, self.category.key())),
        }
    }
}

/// Length factors in meters
pub static LENGTH_TABLE: ConversionTable<LengthUnit> = ConversionTable {
    category: UnitCategory::Length,
    entries: &[
        (LengthUnit::Meter, 1.0),
        (LengthUnit::Kilometer, 1000.0),
        (LengthUnit::Centimeter, 0.01),
        (LengthUnit::Millimeter, 0.001),
        (LengthUnit::Inch, 0.0254),
        (LengthUnit::Foot, 0.3048),
        (LengthUnit::Yard, 0.9144),
        (LengthUnit::Mile, 1609.34),
    ],
};

/// Mass factors in grams
pub static MASS_TABLE: ConversionTable<MassUnit> = ConversionTable {
    category: UnitCategory::Mass,
    entries: &[
        (MassUnit::Kilogram, 1000.0),
        (MassUnit::Gram, 1.0),
        (MassUnit::Milligram, 0.001),
        (MassUnit::Pound, 453.592),
        (MassUnit::Ounce, 28.3495),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tables_are_valid() {
        assert!(LENGTH_TABLE.validate().is_ok());
        assert!(MASS_TABLE.validate().is_ok());
        assert_eq!(LENGTH_TABLE.canonical(), Some(LengthUnit::Meter));
        assert_eq!(MASS_TABLE.canonical(), Some(MassUnit::Gram));
    }

    #[test]
    fn test_every_unit_has_a_factor() {
        for unit in LengthUnit::ALL {
            assert!(LENGTH_TABLE.factor(*unit).is_some(), "missing {}", unit);
        }
        for unit in MassUnit::ALL {
            assert!(MASS_TABLE.factor(*unit).is_some(), "missing {}", unit);
        }
    }

    #[test]
    fn test_normalize_and_denormalize() {
        let meters = LENGTH_TABLE.to_canonical(3.0, LengthUnit::Foot, "foot").unwrap();
        assert_relative_eq!(meters, 0.9144, epsilon = 1e-12);

        let yards = LENGTH_TABLE.from_canonical(meters, LengthUnit::Yard, "yard").unwrap();
        assert_relative_eq!(yards, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_two_canonical_units_fail_validation() {
        static BROKEN: ConversionTable<MassUnit> = ConversionTable {
            category: UnitCategory::Mass,
            entries: &[(MassUnit::Gram, 1.0), (MassUnit::Kilogram, 1.0)],
        };
        assert!(BROKEN.validate().is_err());
    }

    #[test]
    fn test_zero_factor_is_an_error_not_infinity() {
        static ZEROED: ConversionTable<MassUnit> = ConversionTable {
            category: UnitCategory::Mass,
            entries: &[(MassUnit::Gram, 1.0), (MassUnit::Ounce, 0.0)],
        };
        assert!(ZEROED.validate().is_err());
        assert!(matches!(
            ZEROED.from_canonical(10.0, MassUnit::Ounce, "ounce"),
            Err(CalcError::DivisionByZero { .. })
        ));
        assert!(matches!(
            ZEROED.to_canonical(10.0, MassUnit::Pound, "pound"),
            Err(CalcError::UnknownUnit { .. })
        ));
    }
}
