//! # Nonlinear Converters
//!
//! Categories whose units are not related by a single scalar factor.
//! Each rule is a pair of pure functions through the category's canonical
//! unit (celsius for temperature, degree for angle).
//!
//! ## Formulas
//!
//! | From        | To canonical         | From canonical       |
//! |-------------|----------------------|----------------------|
//! | fahrenheit  | (v - 32) * 5/9       | v * 9/5 + 32         |
//! | kelvin      | v - 273.15           | v + 273.15           |
//! | radian      | v * 180/π            | v * π/180            |
//! | gradian     | v * 0.9              | v / 0.9              |

use std::f64::consts::PI;

use crate::units::{AngleUnit, TemperatureUnit};

/// Offset between the kelvin and celsius scales
pub const KELVIN_OFFSET: f64 = 273.15;

/// Degrees per gradian (a right angle is 100 gradians)
pub const DEGREES_PER_GRADIAN: f64 = 0.9;

/// A conversion expressed as a pair of functions through a canonical unit.
#[derive(Debug, Clone, Copy)]
pub struct NonlinearRule<U: 'static> {
    pub to_canonical: fn(f64, U) -> f64,
    pub from_canonical: fn(f64, U) -> f64,
}

impl<U: Copy> NonlinearRule<U> {
    /// Drive `from -> canonical -> to`
    pub fn convert(&self, value: f64, from: U, to: U) -> f64 {
        (self.from_canonical)((self.to_canonical)(value, from), to)
    }
}

/// Affine temperature rule (canonical: celsius)
pub const TEMPERATURE_RULE: NonlinearRule<TemperatureUnit> = NonlinearRule {
    to_canonical: temperature_to_celsius,
    from_canonical: temperature_from_celsius,
};

/// Angle rule (canonical: degree)
pub const ANGLE_RULE: NonlinearRule<AngleUnit> = NonlinearRule {
    to_canonical: angle_to_degrees,
    from_canonical: angle_from_degrees,
};

pub fn temperature_to_celsius(value: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => value,
        TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        TemperatureUnit::Kelvin => value - KELVIN_OFFSET,
    }
}

pub fn temperature_from_celsius(celsius: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        TemperatureUnit::Kelvin => celsius + KELVIN_OFFSET,
    }
}

pub fn angle_to_degrees(value: f64, unit: AngleUnit) -> f64 {
    match unit {
        AngleUnit::Degree => value,
        AngleUnit::Radian => value * 180.0 / PI,
        AngleUnit::Gradian => value * DEGREES_PER_GRADIAN,
    }
}

pub fn angle_from_degrees(degrees: f64, unit: AngleUnit) -> f64 {
    match unit {
        AngleUnit::Degree => degrees,
        AngleUnit::Radian => degrees * PI / 180.0,
        AngleUnit::Gradian => degrees / DEGREES_PER_GRADIAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_fixed_points() {
        let rule = TEMPERATURE_RULE;
        assert_abs_diff_eq!(
            rule.convert(0.0, TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit),
            32.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            rule.convert(100.0, TemperatureUnit::Celsius, TemperatureUnit::Kelvin),
            373.15,
            epsilon = 1e-9
        );
        // -40 is the same on both scales
        assert_abs_diff_eq!(
            rule.convert(-40.0, TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius),
            -40.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_temperature_inverse_pairs() {
        for unit in TemperatureUnit::ALL {
            for value in [-459.67, -40.0, 0.0, 36.6, 1000.0] {
                let back = temperature_from_celsius(temperature_to_celsius(value, *unit), *unit);
                assert_abs_diff_eq!(back, value, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_angle_conversions() {
        assert_abs_diff_eq!(ANGLE_RULE.convert(PI, AngleUnit::Radian, AngleUnit::Degree), 180.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ANGLE_RULE.convert(90.0, AngleUnit::Degree, AngleUnit::Gradian), 100.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            ANGLE_RULE.convert(200.0, AngleUnit::Gradian, AngleUnit::Radian),
            PI,
            epsilon = 1e-12
        );
    }
}
