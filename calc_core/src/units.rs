//! # Unit Identifiers
//!
//! Closed enumerations of every unit the converter understands, grouped by
//! [`UnitCategory`]. A [`Unit`] always carries its category, so a
//! [`Quantity`] can never hold a unit from the wrong category.
//!
//! Identifiers parse case-insensitively and accept common aliases
//! (`m`, `km`, `lb`, `°F`, `rad`, ...). Serialized form is the canonical key.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{LengthUnit, Quantity, Unit, UnitCategory};
//!
//! let unit = Unit::parse("ft", UnitCategory::Length).unwrap();
//! assert_eq!(unit, Unit::Length(LengthUnit::Foot));
//!
//! let q = Quantity::new(12.0, unit);
//! assert_eq!(q.category(), UnitCategory::Length);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Unit enum generator (macro to reduce boilerplate)
// ============================================================================

macro_rules! unit_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $key:literal, $symbol:literal, [$($alias:literal),*];
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $key)]
                $variant,
            )+
        }

        impl $name {
            /// Every unit of this kind, in menu order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical identifier (e.g., "meter", "USD")
            pub fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            /// Short display symbol (e.g., "m", "$")
            pub fn symbol(self) -> &'static str {
                match self {
                    $($name::$variant => $symbol),+
                }
            }

            /// Look up a unit by key or alias, ignoring ASCII case
            pub fn from_key(s: &str) -> Option<Self> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($key) $(|| s.eq_ignore_ascii_case($alias))* {
                        return Some($name::$variant);
                    }
                )+
                None
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }
    };
}

// ============================================================================
// Per-category units
// ============================================================================

unit_enum! {
    /// Length units (canonical: meter)
    LengthUnit {
        Meter => "meter", "m", ["m", "meters", "metre", "metres"];
        Kilometer => "kilometer", "km", ["km", "kilometers", "kilometre", "kilometres"];
        Centimeter => "centimeter", "cm", ["cm", "centimeters", "centimetre", "centimetres"];
        Millimeter => "millimeter", "mm", ["mm", "millimeters", "millimetre", "millimetres"];
        Inch => "inch", "in", ["in", "inches", "\""];
        Foot => "foot", "ft", ["ft", "feet", "'"];
        Yard => "yard", "yd", ["yd", "yards"];
        Mile => "mile", "mi", ["mi", "miles"];
    }
}

unit_enum! {
    /// Mass units (canonical: gram)
    MassUnit {
        Kilogram => "kilogram", "kg", ["kg", "kilograms", "kilo", "kilos"];
        Gram => "gram", "g", ["g", "grams"];
        Milligram => "milligram", "mg", ["mg", "milligrams"];
        Pound => "pound", "lb", ["lb", "lbs", "pounds"];
        Ounce => "ounce", "oz", ["oz", "ounces"];
    }
}

unit_enum! {
    /// Temperature scales (canonical: celsius)
    TemperatureUnit {
        Celsius => "celsius", "°C", ["c", "°c", "degc"];
        Fahrenheit => "fahrenheit", "°F", ["f", "°f", "degf"];
        Kelvin => "kelvin", "K", ["k"];
    }
}

unit_enum! {
    /// Plane angle units (canonical: degree)
    AngleUnit {
        Degree => "degree", "°", ["deg", "degrees", "°"];
        Radian => "radian", "rad", ["rad", "radians"];
        Gradian => "gradian", "grad", ["grad", "gradians", "gon"];
    }
}

unit_enum! {
    /// ISO 4217 currency codes in the static rate snapshot (canonical: USD)
    CurrencyCode {
        Usd => "USD", "$", ["dollar", "us dollar"];
        Eur => "EUR", "€", ["euro"];
        Gbp => "GBP", "£", ["pound sterling", "sterling"];
        Jpy => "JPY", "¥", ["yen"];
        Cad => "CAD", "C$", ["canadian dollar"];
        Aud => "AUD", "A$", ["australian dollar"];
        Zar => "ZAR", "R", ["rand"];
    }
}

// ============================================================================
// Categories
// ============================================================================

/// Conversion category offered by the converter tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    Length,
    Mass,
    Temperature,
    Angle,
    Currency,
}

impl UnitCategory {
    /// All categories in menu order
    pub const ALL: [UnitCategory; 5] = [
        UnitCategory::Length,
        UnitCategory::Mass,
        UnitCategory::Temperature,
        UnitCategory::Angle,
        UnitCategory::Currency,
    ];

    /// Canonical identifier
    pub fn key(&self) -> &'static str {
        match self {
            UnitCategory::Length => "length",
            UnitCategory::Mass => "mass",
            UnitCategory::Temperature => "temperature",
            UnitCategory::Angle => "angle",
            UnitCategory::Currency => "currency",
        }
    }

    /// Display name for menus
    pub fn display_name(&self) -> &'static str {
        match self {
            UnitCategory::Length => "Length",
            UnitCategory::Mass => "Mass",
            UnitCategory::Temperature => "Temperature",
            UnitCategory::Angle => "Angle",
            UnitCategory::Currency => "Currency",
        }
    }

    /// Parse a category identifier.
    ///
    /// "degrees" is accepted for angle and "weight" for mass, matching the
    /// labels used by the calculator menus.
    pub fn parse(s: &str) -> CalcResult<Self> {
        let s = s.trim();
        let category = match s.to_ascii_lowercase().as_str() {
            "length" | "distance" => UnitCategory::Length,
            "mass" | "weight" => UnitCategory::Mass,
            "temperature" | "temp" => UnitCategory::Temperature,
            "angle" | "degrees" | "angles" => UnitCategory::Angle,
            "currency" | "money" => UnitCategory::Currency,
            _ => return Err(CalcError::unknown_category(s)),
        };
        Ok(category)
    }

    /// Every unit of this category, in menu order
    pub fn units(&self) -> Vec<Unit> {
        match self {
            UnitCategory::Length => LengthUnit::ALL.iter().copied().map(Unit::Length).collect(),
            UnitCategory::Mass => MassUnit::ALL.iter().copied().map(Unit::Mass).collect(),
            UnitCategory::Temperature => TemperatureUnit::ALL
                .iter()
                .copied()
                .map(Unit::Temperature)
                .collect(),
            UnitCategory::Angle => AngleUnit::ALL.iter().copied().map(Unit::Angle).collect(),
            UnitCategory::Currency => CurrencyCode::ALL.iter().copied().map(Unit::Currency).collect(),
        }
    }

    /// The unit every other unit of the category is normalized through
    pub fn canonical_unit(&self) -> Unit {
        match self {
            UnitCategory::Length => Unit::Length(LengthUnit::Meter),
            UnitCategory::Mass => Unit::Mass(MassUnit::Gram),
            UnitCategory::Temperature => Unit::Temperature(TemperatureUnit::Celsius),
            UnitCategory::Angle => Unit::Angle(AngleUnit::Degree),
            UnitCategory::Currency => Unit::Currency(CurrencyCode::Usd),
        }
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for UnitCategory {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitCategory::parse(s)
    }
}

// ============================================================================
// Unit
// ============================================================================

/// A unit tagged with its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", content = "unit", rename_all = "lowercase")]
pub enum Unit {
    Length(LengthUnit),
    Mass(MassUnit),
    Temperature(TemperatureUnit),
    Angle(AngleUnit),
    Currency(CurrencyCode),
}

impl Unit {
    /// Parse a unit identifier within a category.
    ///
    /// Returns `UnknownUnit` when the identifier is not part of the category,
    /// even if it names a unit of another category.
    pub fn parse(s: &str, category: UnitCategory) -> CalcResult<Self> {
        let unit = match category {
            UnitCategory::Length => LengthUnit::from_key(s).map(Unit::Length),
            UnitCategory::Mass => MassUnit::from_key(s).map(Unit::Mass),
            UnitCategory::Temperature => TemperatureUnit::from_key(s).map(Unit::Temperature),
            UnitCategory::Angle => AngleUnit::from_key(s).map(Unit::Angle),
            UnitCategory::Currency => CurrencyCode::from_key(s).map(Unit::Currency),
        };
        unit.ok_or_else(|| CalcError::unknown_unit(s.trim(), category.key()))
    }

    /// Category this unit belongs to
    pub fn category(&self) -> UnitCategory {
        match self {
            Unit::Length(_) => UnitCategory::Length,
            Unit::Mass(_) => UnitCategory::Mass,
            Unit::Temperature(_) => UnitCategory::Temperature,
            Unit::Angle(_) => UnitCategory::Angle,
            Unit::Currency(_) => UnitCategory::Currency,
        }
    }

    /// Canonical identifier
    pub fn key(&self) -> &'static str {
        match self {
            Unit::Length(u) => u.key(),
            Unit::Mass(u) => u.key(),
            Unit::Temperature(u) => u.key(),
            Unit::Angle(u) => u.key(),
            Unit::Currency(u) => u.key(),
        }
    }

    /// Short display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Length(u) => u.symbol(),
            Unit::Mass(u) => u.symbol(),
            Unit::Temperature(u) => u.symbol(),
            Unit::Angle(u) => u.symbol(),
            Unit::Currency(u) => u.symbol(),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ============================================================================
// Quantity
// ============================================================================

/// A numeric value tagged with a unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    /// Build a quantity from raw identifiers.
    ///
    /// ```rust
    /// use calc_core::units::Quantity;
    ///
    /// let q = Quantity::parse(5.0, "km", "length").unwrap();
    /// assert_eq!(q.unit.key(), "kilometer");
    /// assert!(Quantity::parse(5.0, "kg", "length").is_err());
    /// ```
    pub fn parse(value: f64, unit: &str, category: &str) -> CalcResult<Self> {
        let category = UnitCategory::parse(category)?;
        let unit = Unit::parse(unit, category)?;
        Ok(Quantity { value, unit })
    }

    /// Category of the quantity's unit
    pub fn category(&self) -> UnitCategory {
        self.unit.category()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_parsing() {
        assert_eq!(LengthUnit::from_key("Feet"), Some(LengthUnit::Foot));
        assert_eq!(MassUnit::from_key(" lbs "), Some(MassUnit::Pound));
        assert_eq!(TemperatureUnit::from_key("°F"), Some(TemperatureUnit::Fahrenheit));
        assert_eq!(CurrencyCode::from_key("eur"), Some(CurrencyCode::Eur));
        assert_eq!(AngleUnit::from_key("furlong"), None);
    }

    #[test]
    fn test_unit_outside_category_is_rejected() {
        let err = Unit::parse("kilogram", UnitCategory::Length).unwrap_err();
        assert_eq!(
            err,
            CalcError::UnknownUnit {
                unit: "kilogram".to_string(),
                category: "length".to_string(),
            }
        );
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!(UnitCategory::parse("Degrees").unwrap(), UnitCategory::Angle);
        assert_eq!("weight".parse::<UnitCategory>().unwrap(), UnitCategory::Mass);
        assert!(matches!(
            UnitCategory::parse("volume"),
            Err(CalcError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn test_every_unit_belongs_to_its_category() {
        for category in UnitCategory::ALL {
            let units = category.units();
            assert!(!units.is_empty());
            for unit in units {
                assert_eq!(unit.category(), category);
                assert_eq!(Unit::parse(unit.key(), category).unwrap(), unit);
            }
            assert_eq!(category.canonical_unit().category(), category);
        }
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&CurrencyCode::Gbp).unwrap();
        assert_eq!(json, "\"GBP\"");

        let unit = Unit::Length(LengthUnit::Mile);
        let json = serde_json::to_string(&unit).unwrap();
        assert_eq!(json, r#"{"category":"length","unit":"mile"}"#);

        let roundtrip: Unit = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, unit);
    }

    #[test]
    fn test_quantity_display() {
        let q = Quantity::new(32.0, Unit::Temperature(TemperatureUnit::Fahrenheit));
        assert_eq!(q.to_string(), "32 °F");
    }
}
