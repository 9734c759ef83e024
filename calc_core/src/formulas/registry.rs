//! # Formula Registry
//!
//! Named physics formulas, each declaring its required input fields, a
//! compute function and a result unit.
//!
//! ## Architecture
//!
//! - [`Formula`] is the closed set of built-in formulas; [`Formula::spec`]
//!   maps each variant to a [`FormulaSpec`] behavior record.
//! - [`FormulaRegistry`] holds specs by key. Additional formulas are
//!   registered with [`FormulaRegistry::with_formula`]; evaluation never
//!   changes when the set grows.
//!
//! ## Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use calc_core::formulas::registry::{Formula, FormulaRegistry};
//!
//! let registry = FormulaRegistry::standard();
//! let inputs = HashMap::from([("m", "2"), ("v", "3")]);
//! let result = registry.evaluate("kinetic", &inputs).unwrap();
//! assert_eq!(result.value, 9.0);
//! assert_eq!(result.unit, "J");
//!
//! println!("{}", Formula::Force.spec().equation);
//! ```

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::physics;
use crate::errors::{finite_result, CalcError, CalcResult};

// ============================================================================
// Field Definition
// ============================================================================

/// A named input of a formula.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// Symbol used as the input key (e.g., "d", "t")
    pub symbol: &'static str,
    /// Physical meaning
    pub description: &'static str,
    /// Implied unit (informational, not enforced)
    pub units: &'static str,
}

impl Field {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Parsed inputs
// ============================================================================

/// Validated numeric inputs keyed by field symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormulaInputs {
    values: BTreeMap<String, f64>,
}

impl FormulaInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, symbol: impl Into<String>, value: f64) -> Self {
        self.values.insert(symbol.into(), value);
        self
    }

    /// Value of a field; NaN when absent so a bad compute cannot pass the
    /// finite-result check.
    pub fn get(&self, symbol: &str) -> f64 {
        self.values.get(symbol).copied().unwrap_or(f64::NAN)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.values.contains_key(symbol)
    }
}

// ============================================================================
// Formula spec
// ============================================================================

/// Behavior record for one formula.
#[derive(Debug, Clone)]
pub struct FormulaSpec {
    /// Registry key (e.g., "velocity")
    pub key: &'static str,
    /// Display name
    pub name: &'static str,
    /// Equation in plain text (e.g., "v = d / t")
    pub equation: &'static str,
    /// What the formula calculates
    pub description: &'static str,
    /// Required inputs, in form order
    pub fields: Vec<Field>,
    /// Fields that appear as divisors and must be non-zero
    pub divisors: Vec<&'static str>,
    /// Label of the result unit
    pub unit: &'static str,
    /// Pure compute function over validated inputs
    pub compute: fn(&FormulaInputs) -> f64,
}

/// Output of a formula evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaResult {
    pub value: f64,
    pub unit: String,
}

impl FormulaSpec {
    /// Parse raw text inputs against the declared fields.
    ///
    /// Every field must be present and parse to a finite number; nothing is
    /// computed otherwise.
    pub fn parse_inputs<K, V>(&self, inputs: &HashMap<K, V>) -> CalcResult<FormulaInputs>
    where
        K: Borrow<str> + Hash + Eq,
        V: AsRef<str>,
    {
        let mut parsed = FormulaInputs::new();
        for field in &self.fields {
            let raw = inputs.get(field.symbol).map(|v| v.as_ref().trim()).unwrap_or("");
            if raw.is_empty() {
                return Err(CalcError::invalid_input(field.symbol, "", "missing value"));
            }
            let value: f64 = raw
                .parse()
                .map_err(|_| CalcError::invalid_input(field.symbol, raw, "not a number"))?;
            if !value.is_finite() {
                return Err(CalcError::invalid_input(field.symbol, raw, "value must be finite"));
            }
            parsed = parsed.with(field.symbol, value);
        }
        Ok(parsed)
    }

    /// Compute the result from already-parsed inputs.
    pub fn compute_values(&self, inputs: &FormulaInputs) -> CalcResult<FormulaResult> {
        for field in &self.fields {
            if !inputs.contains(field.symbol) {
                return Err(CalcError::invalid_input(field.symbol, "", "missing value"));
            }
        }
        for divisor in &self.divisors {
            if inputs.get(divisor) == 0.0 {
                return Err(CalcError::division_by_zero(self.key, *divisor));
            }
        }
        let value = finite_result(self.key, (self.compute)(inputs))?;
        Ok(FormulaResult {
            value,
            unit: self.unit.to_string(),
        })
    }

    /// Parse and compute in one step.
    pub fn evaluate<K, V>(&self, inputs: &HashMap<K, V>) -> CalcResult<FormulaResult>
    where
        K: Borrow<str> + Hash + Eq,
        V: AsRef<str>,
    {
        let parsed = self.parse_inputs(inputs)?;
        self.compute_values(&parsed)
    }
}

// ============================================================================
// Built-in formulas
// ============================================================================

/// The built-in physics formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Formula {
    /// v = d / t
    Velocity,
    /// d = v × t
    Displacement,
    /// F = m × a
    Force,
    /// KE = 0.5 × m × v²
    #[serde(rename = "kinetic")]
    KineticEnergy,
}

/// All built-in formulas in menu order
pub const ALL_FORMULAS: &[Formula] = &[
    Formula::Velocity,
    Formula::Displacement,
    Formula::Force,
    Formula::KineticEnergy,
];

impl Formula {
    /// Registry key
    pub fn key(&self) -> &'static str {
        match self {
            Formula::Velocity => "velocity",
            Formula::Displacement => "displacement",
            Formula::Force => "force",
            Formula::KineticEnergy => "kinetic",
        }
    }

    /// Look up a built-in formula by key
    pub fn from_key(key: &str) -> Option<Formula> {
        ALL_FORMULAS
            .iter()
            .copied()
            .find(|f| f.key().eq_ignore_ascii_case(key.trim()))
    }

    /// Behavior record for this formula
    pub fn spec(&self) -> FormulaSpec {
        match self {
            Formula::Velocity => FormulaSpec {
                key: "velocity",
                name: "Velocity",
                equation: "v = d / t",
                description: "Average velocity over a distance travelled in a given time",
                fields: vec![
                    Field::new("d", "Distance", "m"),
                    Field::new("t", "Time", "s"),
                ],
                divisors: vec!["t"],
                unit: "m/s",
                compute: |i| physics::velocity(i.get("d"), i.get("t")),
            },

            Formula::Displacement => FormulaSpec {
                key: "displacement",
                name: "Displacement",
                equation: "d = v × t",
                description: "Distance covered at constant velocity",
                fields: vec![
                    Field::new("v", "Velocity", "m/s"),
                    Field::new("t", "Time", "s"),
                ],
                divisors: vec![],
                unit: "m",
                compute: |i| physics::displacement(i.get("v"), i.get("t")),
            },

            Formula::Force => FormulaSpec {
                key: "force",
                name: "Force",
                equation: "F = m × a",
                description: "Net force from Newton's second law",
                fields: vec![
                    Field::new("m", "Mass", "kg"),
                    Field::new("a", "Acceleration", "m/s²"),
                ],
                divisors: vec![],
                unit: "N",
                compute: |i| physics::force(i.get("m"), i.get("a")),
            },

            Formula::KineticEnergy => FormulaSpec {
                key: "kinetic",
                name: "Kinetic Energy",
                equation: "KE = 0.5 × m × v²",
                description: "Translational kinetic energy of a moving mass",
                fields: vec![
                    Field::new("m", "Mass", "kg"),
                    Field::new("v", "Velocity", "m/s"),
                ],
                divisors: vec![],
                unit: "J",
                compute: |i| physics::kinetic_energy(i.get("m"), i.get("v")),
            },
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Formula specs keyed by name.
#[derive(Debug, Clone, Default)]
pub struct FormulaRegistry {
    specs: Vec<FormulaSpec>,
}

impl FormulaRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in formula
    pub fn standard() -> Self {
        ALL_FORMULAS
            .iter()
            .fold(Self::new(), |registry, formula| registry.with_formula(formula.spec()))
    }

    /// Register a formula, replacing any existing one with the same key
    pub fn with_formula(mut self, spec: FormulaSpec) -> Self {
        self.register(spec);
        self
    }

    /// In-place variant of [`with_formula`](Self::with_formula)
    pub fn register(&mut self, spec: FormulaSpec) {
        match self.specs.iter_mut().find(|s| s.key == spec.key) {
            Some(existing) => *existing = spec,
            None => self.specs.push(spec),
        }
    }

    /// Look up a spec; `UnsupportedOperation` when not registered
    pub fn get(&self, key: &str) -> CalcResult<&FormulaSpec> {
        let key = key.trim();
        self.specs
            .iter()
            .find(|s| s.key.eq_ignore_ascii_case(key))
            .ok_or_else(|| CalcError::unsupported(format!("formula '{}'", key)))
    }

    /// Registered keys in registration order
    pub fn keys(&self) -> Vec<&'static str> {
        self.specs.iter().map(|s| s.key).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormulaSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Evaluate a named formula against raw text inputs.
    pub fn evaluate<K, V>(&self, name: &str, inputs: &HashMap<K, V>) -> CalcResult<FormulaResult>
    where
        K: Borrow<str> + Hash + Eq,
        V: AsRef<str>,
    {
        let spec = self.get(name)?;
        let result = spec.evaluate(inputs)?;
        debug!(formula = spec.key, value = result.value, unit = %result.unit, "evaluated formula");
        Ok(result)
    }
}

// ============================================================================
// Documentation generation
// ============================================================================

/// Render a markdown reference of every formula in a registry.
pub fn formulas_markdown(registry: &FormulaRegistry) -> String {
    let mut output = String::with_capacity(4_096);

    output.push_str(
        r#"# OmniCalc Physics Formulas

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-formulas`

Inputs are plain numbers; the units listed are the implied SI units.

---

"#,
    );

    for spec in registry.iter() {
        output.push_str(&format!("## {}\n\n", spec.name));
        output.push_str(&format!("{}\n\n", spec.description));
        output.push_str(&format!("**Formula:** `{}`\n\n", spec.equation));
        output.push_str(&format!("**Key:** `{}` | **Result unit:** {}\n\n", spec.key, spec.unit));

        if !spec.fields.is_empty() {
            output.push_str("| Symbol | Description | Units |\n");
            output.push_str("|--------|-------------|-------|\n");
            for field in &spec.fields {
                output.push_str(&format!("| {} | {} | {} |\n", field.symbol, field.description, field.units));
            }
            output.push('\n');
        }

        if !spec.divisors.is_empty() {
            output.push_str(&format!("**Must be non-zero:** {}\n\n", spec.divisors.join(", ")));
        }

        output.push_str("---\n\n");
    }

    output.push_str(&format!("**Total formulas:** {}\n", registry.len()));
    output
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(pairs: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_all_formulas_have_specs() {
        for formula in ALL_FORMULAS {
            let spec = formula.spec();
            assert_eq!(spec.key, formula.key());
            assert!(!spec.fields.is_empty(), "{} has no fields", spec.key);
            assert!(!spec.unit.is_empty());
            for divisor in &spec.divisors {
                assert!(spec.fields.iter().any(|f| f.symbol == *divisor));
            }
            assert_eq!(Formula::from_key(spec.key), Some(*formula));
        }
    }

    #[test]
    fn test_kinetic_energy() {
        let registry = FormulaRegistry::standard();
        let result = registry.evaluate("kinetic", &inputs(&[("m", "2"), ("v", "3")])).unwrap();
        assert_eq!(
            result,
            FormulaResult {
                value: 9.0,
                unit: "J".to_string()
            }
        );
    }

    #[test]
    fn test_each_builtin() {
        let registry = FormulaRegistry::standard();
        let v = registry.evaluate("velocity", &inputs(&[("d", "100"), ("t", "20")])).unwrap();
        assert_eq!((v.value, v.unit.as_str()), (5.0, "m/s"));

        let d = registry.evaluate("displacement", &inputs(&[("v", "3"), ("t", " 4 ")])).unwrap();
        assert_eq!((d.value, d.unit.as_str()), (12.0, "m"));

        let f = registry.evaluate("Force", &inputs(&[("m", "10"), ("a", "-9.81")])).unwrap();
        assert_eq!(f.unit, "N");
        assert!((f.value + 98.1).abs() < 1e-9);
    }

    #[test]
    fn test_zero_time_velocity() {
        let registry = FormulaRegistry::standard();
        let err = registry.evaluate("velocity", &inputs(&[("d", "10"), ("t", "0")])).unwrap_err();
        assert_eq!(err, CalcError::division_by_zero("velocity", "t"));
    }

    #[test]
    fn test_invalid_and_missing_fields() {
        let registry = FormulaRegistry::standard();

        let err = registry.evaluate("force", &inputs(&[("m", "abc"), ("a", "2")])).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "m"));

        let err = registry.evaluate("force", &inputs(&[("m", "3")])).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "a"));

        let err = registry.evaluate("force", &inputs(&[("m", "inf"), ("a", "2")])).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_unknown_formula() {
        let registry = FormulaRegistry::standard();
        let err = registry.evaluate("momentum", &inputs(&[("m", "1"), ("v", "1")])).unwrap_err();
        assert!(matches!(err, CalcError::UnsupportedOperation { .. }));
    }

    #[test]
    fn test_overflow_is_not_reported_as_success() {
        let registry = FormulaRegistry::standard();
        let err = registry
            .evaluate("kinetic", &inputs(&[("m", "1e300"), ("v", "1e300")]))
            .unwrap_err();
        assert!(matches!(err, CalcError::CalculationFailed { .. }));
    }

    #[test]
    fn test_registry_is_extensible() {
        let momentum = FormulaSpec {
            key: "momentum",
            name: "Momentum",
            equation: "p = m × v",
            description: "Linear momentum",
            fields: vec![Field::new("m", "Mass", "kg"), Field::new("v", "Velocity", "m/s")],
            divisors: vec![],
            unit: "kg·m/s",
            compute: |i| i.get("m") * i.get("v"),
        };
        let registry = FormulaRegistry::standard().with_formula(momentum);
        assert_eq!(registry.len(), ALL_FORMULAS.len() + 1);

        let p = registry.evaluate("momentum", &inputs(&[("m", "2"), ("v", "5")])).unwrap();
        assert_eq!(p.value, 10.0);
        assert_eq!(p.unit, "kg·m/s");
    }

    #[test]
    fn test_register_replaces_same_key() {
        let mut registry = FormulaRegistry::standard();
        let mut spec = Formula::Force.spec();
        spec.unit = "kN";
        spec.compute = |i| i.get("m") * i.get("a") / 1000.0;
        registry.register(spec);

        assert_eq!(registry.len(), ALL_FORMULAS.len());
        let f = registry.evaluate("force", &inputs(&[("m", "1000"), ("a", "2")])).unwrap();
        assert_eq!((f.value, f.unit.as_str()), (2.0, "kN"));
    }

    #[test]
    fn test_generate_markdown() {
        let markdown = formulas_markdown(&FormulaRegistry::standard());
        assert!(markdown.contains("# OmniCalc Physics Formulas"));
        assert!(markdown.contains("## Kinetic Energy"));
        assert!(markdown.contains("`v = d / t`"));
        assert!(markdown.contains("**Must be non-zero:** t"));
        assert!(markdown.contains("**Total formulas:** 4"));
    }
}
