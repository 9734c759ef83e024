//! # Projection Schedules
//!
//! Time series produced by the investment and loan projections. A schedule
//! is built once per parameter set and never mutated afterwards; changing any
//! input means running the projection again.

use serde::{Deserialize, Serialize};

/// One recorded point of a projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Year index (0 = start)
    pub period: u32,
    /// Month index the snapshot was taken at
    pub month: u32,
    /// Accumulated value (investment) or remaining balance (loan)
    pub balance: f64,
    /// Cumulative amount contributed (investment) or paid (loan)
    pub contributed: f64,
}

/// Ordered, immutable sequence of snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AmortizationSchedule {
    snapshots: Vec<Snapshot>,
}

impl AmortizationSchedule {
    pub(crate) fn from_snapshots(snapshots: Vec<Snapshot>) -> Self {
        AmortizationSchedule { snapshots }
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn first(&self) -> Option<&Snapshot> {
        self.snapshots.first()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    /// Snapshot recorded for a given year, if any
    pub fn at_period(&self, period: u32) -> Option<&Snapshot> {
        self.snapshots.iter().find(|s| s.period == period)
    }
}

impl<'a> IntoIterator for &'a AmortizationSchedule {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AmortizationSchedule {
        AmortizationSchedule::from_snapshots(vec![
            Snapshot { period: 0, month: 0, balance: 100.0, contributed: 100.0 },
            Snapshot { period: 1, month: 12, balance: 150.0, contributed: 140.0 },
        ])
    }

    #[test]
    fn test_accessors() {
        let schedule = sample();
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.first().map(|s| s.balance), Some(100.0));
        assert_eq!(schedule.last().map(|s| s.month), Some(12));
        assert_eq!(schedule.at_period(1).map(|s| s.contributed), Some(140.0));
        assert!(schedule.at_period(5).is_none());
        assert_eq!((&schedule).into_iter().count(), 2);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.starts_with('['));
        let roundtrip: AmortizationSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, sample());
    }
}
