use crate::errors::DebiasError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Direction of the association between a flagged feature and the target.
///
/// Positive means the feature mass concentrates in the positive-target group,
/// negative the opposite. Neutral covers the knife-edge case where the two
/// group sums tie; a neutral entry always yields a zero adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Negative,
    Neutral,
    Positive,
}

impl Direction {
    /// Derive a direction from the difference between the positive-group
    /// and negative-group value sums. A NaN difference maps to neutral.
    pub fn from_sign(diff: f64) -> Self {
        if diff > 0.0 {
            Direction::Positive
        } else if diff < 0.0 {
            Direction::Negative
        } else {
            Direction::Neutral
        }
    }

    /// Signed multiplier applied to correction offsets.
    pub fn signum(&self) -> f64 {
        match self {
            Direction::Positive => 1.0,
            Direction::Neutral => 0.0,
            Direction::Negative => -1.0,
        }
    }
}

/// A single flagged feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiasEntry {
    /// Column index of the flagged feature.
    pub feature: usize,
    /// Direction of the association with the target.
    pub direction: Direction,
}

/// Audit result listing flagged features in ascending column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiasReport {
    /// Flagged features, ordered by column index.
    pub entries: Vec<BiasEntry>,
}

impl BiasReport {
    pub fn new(entries: Vec<BiasEntry>) -> Self {
        BiasReport { entries }
    }

    /// Number of flagged features.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no feature was flagged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Serialization helpers shared by report types.
pub trait ReportIO: Serialize + DeserializeOwned + Sized {
    /// Save a report as a json object to a file.
    ///
    /// * `path` - Path to save report.
    fn save_report<P: AsRef<Path>>(&self, path: P) -> Result<(), DebiasError> {
        fs::write(path, self.json_dump()?).map_err(|e| DebiasError::UnableToWrite(e.to_string()))
    }

    /// Dump a report as a json object
    fn json_dump(&self) -> Result<String, DebiasError> {
        serde_json::to_string(self).map_err(|e| DebiasError::UnableToWrite(e.to_string()))
    }

    /// Load a report from Json string
    ///
    /// * `json_str` - String object, which can be serialized to json.
    fn from_json(json_str: &str) -> Result<Self, DebiasError> {
        serde_json::from_str::<Self>(json_str).map_err(|e| DebiasError::UnableToRead(e.to_string()))
    }

    /// Load a report from a path to a json report object.
    ///
    /// * `path` - Path to load report from.
    fn load_report<P: AsRef<Path>>(path: P) -> Result<Self, DebiasError> {
        let json_str = fs::read_to_string(path).map_err(|e| DebiasError::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

impl ReportIO for BiasReport {}
