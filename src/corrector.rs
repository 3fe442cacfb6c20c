//! Bias corrector
//!
//! Rewrites flagged feature columns in place to weaken their association
//! with the target. Two strategies are available: a mean shift, and an
//! adversarial offset driven by a probe model's predicted probabilities.

use crate::constants::TARGET_CUTOFF;
use crate::data::{Matrix, MatrixMut};
use crate::errors::DebiasError;
use crate::probe::{Probe, ProbeModel};
use crate::report::{BiasReport, Direction};
use crate::utils::{items_to_strings, mean};
use log::info;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Correction strategies for flagged features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrectionMethod {
    /// Subtract the column mean from every row, signed by the direction
    /// of the bias.
    MeanShift,
    /// Subtract a probe model's predicted probability from each row,
    /// signed by the direction of the bias.
    Adversarial,
}

fn get_parse_error(s: &str) -> DebiasError {
    DebiasError::ParseString(
        s.to_string(),
        "CorrectionMethod".to_string(),
        items_to_strings(vec!["MeanShift", "Adversarial"]),
    )
}

impl FromStr for CorrectionMethod {
    type Err = DebiasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MeanShift" => Ok(CorrectionMethod::MeanShift),
            "Adversarial" => Ok(CorrectionMethod::Adversarial),
            _ => Err(get_parse_error(s)),
        }
    }
}

/// Bias corrector object
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct BiasCorrector {
    pub probe: Probe,
}

impl BiasCorrector {
    /// Set the probe on the corrector.
    /// * `probe` - The probe model backing the adversarial method.
    pub fn set_probe(mut self, probe: Probe) -> Self {
        self.probe = probe;
        self
    }

    /// Correct the features named in a report, in place.
    ///
    /// For the adversarial method all probe fits and offsets are gathered
    /// before any column is touched, so a probe failure leaves the data
    /// exactly as it was. An empty report is a no-op and never fits a probe;
    /// the same holds for entries with a neutral direction.
    ///
    /// * `data` - The feature matrix, rewritten in place.
    /// * `target` - Target values, one per row.
    /// * `report` - Audit report listing the features to correct.
    /// * `method` - Correction strategy to apply.
    pub fn correct(
        &self,
        data: &mut MatrixMut<f64>,
        target: &[f64],
        report: &BiasReport,
        method: CorrectionMethod,
    ) -> Result<(), DebiasError> {
        if data.rows != target.len() {
            return Err(DebiasError::DimensionMismatch(data.rows, target.len()));
        }
        for entry in &report.entries {
            if entry.feature >= data.cols {
                return Err(DebiasError::InvalidFeatureIndex(entry.feature, data.cols));
            }
        }
        if report.is_empty() {
            return Ok(());
        }

        match method {
            CorrectionMethod::MeanShift => {
                for entry in &report.entries {
                    if entry.direction == Direction::Neutral {
                        continue;
                    }
                    let offset = entry.direction.signum() * mean(data.get_col(entry.feature));
                    for value in data.get_col_mut(entry.feature) {
                        *value -= offset;
                    }
                }
            }
            CorrectionMethod::Adversarial => {
                let labels: Vec<f64> = target
                    .iter()
                    .map(|y| if *y >= TARGET_CUTOFF { 1.0 } else { 0.0 })
                    .collect();

                // Gather phase. One probe per flagged feature, fitted on that
                // single column, so fit and prediction shapes always agree.
                let mut offsets: Vec<Option<Vec<f64>>> = Vec::with_capacity(report.len());
                for entry in &report.entries {
                    if entry.direction == Direction::Neutral {
                        offsets.push(None);
                        continue;
                    }
                    let column = Matrix::new(data.get_col(entry.feature), data.rows, 1);
                    let fitted = self.probe.fit(&column, &labels)?;
                    let probabilities = fitted.predict_probability(&column)?;
                    if probabilities.len() != data.rows {
                        return Err(DebiasError::ProbeFailure(format!(
                            "probe returned {} probabilities for {} rows",
                            probabilities.len(),
                            data.rows
                        )));
                    }
                    let scale = entry.direction.signum();
                    offsets.push(Some(probabilities.iter().map(|p| scale * p).collect()));
                }

                // Apply phase, reached only when every probe succeeded.
                for (entry, offset) in report.entries.iter().zip(offsets) {
                    if let Some(offset) = offset {
                        for (value, o) in data.get_col_mut(entry.feature).iter_mut().zip(offset) {
                            *value -= o;
                        }
                    }
                }
            }
        }

        info!("Corrected {0} features with {1:?}.", report.len(), method);

        Ok(())
    }
}
