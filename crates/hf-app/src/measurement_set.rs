//! Ordered collection of measurement results.

use hf_case::Measurement;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Measurement values in request order, one entry per measurement.
///
/// Values are SI, in the unit given by [`Measurement::unit`]. Serializes as a
/// map keyed by measurement name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementSet {
    entries: Vec<(Measurement, f64)>,
}

impl MeasurementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value. A measurement already present keeps its first position
    /// and value; returns whether the value was stored.
    pub fn insert(&mut self, measurement: Measurement, value: f64) -> bool {
        if self.contains(measurement) {
            return false;
        }
        self.entries.push((measurement, value));
        true
    }

    pub fn get(&self, measurement: Measurement) -> Option<f64> {
        self.entries
            .iter()
            .find(|(m, _)| *m == measurement)
            .map(|&(_, v)| v)
    }

    pub fn contains(&self, measurement: Measurement) -> bool {
        self.entries.iter().any(|(m, _)| *m == measurement)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Measurement, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn measurements(&self) -> impl Iterator<Item = Measurement> + '_ {
        self.entries.iter().map(|&(m, _)| m)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a MeasurementSet {
    type Item = (Measurement, f64);
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, (Measurement, f64)>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().copied()
    }
}

impl Serialize for MeasurementSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (m, v) in &self.entries {
            map.serialize_entry(m.name(), v)?;
        }
        map.end()
    }
}
