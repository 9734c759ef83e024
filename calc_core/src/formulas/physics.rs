//! # Kinematics and Dynamics Formulas
//!
//! Plain functions behind the physics formula registry. SI units are implied
//! (m, s, kg) but not enforced; the caller guards divisors.
//!
//! ## Notation
//!
//! - `d` = Distance or displacement
//! - `t` = Time
//! - `v` = Velocity
//! - `m` = Mass
//! - `a` = Acceleration

/// Average velocity v = d/t
#[inline]
pub fn velocity(d: f64, t: f64) -> f64 {
    d / t
}

/// Displacement at constant velocity d = v·t
#[inline]
pub fn displacement(v: f64, t: f64) -> f64 {
    v * t
}

/// Newton's second law F = m·a
#[inline]
pub fn force(m: f64, a: f64) -> f64 {
    m * a
}

/// Translational kinetic energy KE = ½·m·v²
#[inline]
pub fn kinetic_energy(m: f64, v: f64) -> f64 {
    0.5 * m * v * v
}
