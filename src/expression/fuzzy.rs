//! Wire-facing `metric` vocabulary for `string_distance`/
//! `fuzzy_string_filter`. Decoding only; kernels live in
//! [`crate::engine::distance`].

use crate::engine::distance::DistanceMetric;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetricWire {
    Levenshtein,
    JaroWinkler,
    Jaro,
    DamerauLevenshtein,
    SorensenDice,
}

impl From<DistanceMetricWire> for DistanceMetric {
    fn from(wire: DistanceMetricWire) -> Self {
        match wire {
            DistanceMetricWire::Levenshtein => DistanceMetric::Levenshtein,
            DistanceMetricWire::JaroWinkler => DistanceMetric::JaroWinkler,
            DistanceMetricWire::Jaro => DistanceMetric::Jaro,
            DistanceMetricWire::DamerauLevenshtein => DistanceMetric::DamerauLevenshtein,
            DistanceMetricWire::SorensenDice => DistanceMetric::SorensenDice,
        }
    }
}
