//! Bias detector
//!
//! Flags feature columns whose distribution depends on the target class,
//! using a per-feature Chi-squared test of independence on a 2x2 table.

use crate::constants::{DEFAULT_THRESHOLD, TARGET_CUTOFF};
use crate::data::Matrix;
use crate::errors::DebiasError;
use crate::report::{BiasEntry, BiasReport, Direction};
use crate::stats::{chi2_contingency_2x2, contingency_table, grouped_sums};
use hashbrown::HashMap;
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Bias detector object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiasDetector {
    /// Chi-squared statistic above which a feature is flagged.
    pub threshold: f64,
}

impl Default for BiasDetector {
    fn default() -> Self {
        BiasDetector {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl BiasDetector {
    /// Set the flagging threshold on the detector.
    /// * `threshold` - Chi-squared statistic above which a feature is flagged.
    pub fn set_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn validate_parameters(&self) -> Result<(), DebiasError> {
        if self.threshold.is_nan() || self.threshold <= 0.0 {
            return Err(DebiasError::InvalidParameter(
                "threshold".to_string(),
                "positive real value".to_string(),
                self.threshold.to_string(),
            ));
        }
        Ok(())
    }

    /// Audit every feature column against a binary target.
    ///
    /// Each column is split at its mean, the target at 0.5, and the resulting
    /// 2x2 table is tested for independence. Columns whose statistic strictly
    /// exceeds the threshold are flagged, tagged with the direction of the
    /// association, and returned in ascending column order.
    ///
    /// Degenerate columns (constant values, single-class target) produce a
    /// zero statistic and are never flagged.
    ///
    /// * `data` - The feature matrix.
    /// * `target` - Target values, one per row.
    /// * `parallel` - If `true`, columns are audited in parallel using Rayon.
    pub fn detect(&self, data: &Matrix<f64>, target: &[f64], parallel: bool) -> Result<BiasReport, DebiasError> {
        self.validate_parameters()?;
        if data.rows != target.len() {
            return Err(DebiasError::DimensionMismatch(data.rows, target.len()));
        }

        if !target.is_empty() {
            let positives = target.iter().filter(|y| **y >= TARGET_CUTOFF).count();
            if positives == 0 || positives == target.len() {
                warn!("Target holds a single class, no feature can be flagged.");
            }
        }

        let audit_col = |j: usize| -> Option<BiasEntry> {
            let col = data.get_col(j);
            let (a, b, c, d) = contingency_table(col, target);
            if a + b == 0.0 || c + d == 0.0 {
                warn!("Feature {0} splits into a single group, skipping.", j);
                return None;
            }
            let stat = chi2_contingency_2x2(a, b, c, d);
            if stat > self.threshold {
                let (positive, negative) = grouped_sums(col, target);
                let direction = Direction::from_sign(positive - negative);
                debug!("Feature {0} flagged with statistic {1:.4}, direction {2:?}.", j, stat, direction);
                Some(BiasEntry { feature: j, direction })
            } else {
                None
            }
        };

        let entries: Vec<BiasEntry> = if parallel {
            (0..data.cols).into_par_iter().filter_map(audit_col).collect()
        } else {
            (0..data.cols).filter_map(audit_col).collect()
        };

        info!("Audited {0} features, flagged {1}.", data.cols, entries.len());

        Ok(BiasReport::new(entries))
    }

    /// Calculate the Chi-squared statistic for every feature.
    /// - `data`: the feature matrix.
    /// - `target`: target values, one per row.
    /// - `parallel`: if `true`, statistics are computed in parallel using Rayon.
    pub fn feature_statistics(
        &self,
        data: &Matrix<f64>,
        target: &[f64],
        parallel: bool,
    ) -> Result<HashMap<usize, f64>, DebiasError> {
        if data.rows != target.len() {
            return Err(DebiasError::DimensionMismatch(data.rows, target.len()));
        }
        let stat_col = |j: usize| -> (usize, f64) {
            let col = data.get_col(j);
            let (a, b, c, d) = contingency_table(col, target);
            (j, chi2_contingency_2x2(a, b, c, d))
        };
        let stats: HashMap<usize, f64> = if parallel {
            (0..data.cols).into_par_iter().map(stat_col).collect()
        } else {
            (0..data.cols).map(stat_col).collect()
        };
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn leaky_dataset() -> (Vec<f64>, Vec<f64>) {
        // 100 rows, two columns. Column 0 copies the target, column 1
        // alternates independently of it.
        let target: Vec<f64> = (0..100).map(|i| if i < 50 { 0.0 } else { 1.0 }).collect();
        let mut data = target.clone();
        data.extend((0..100).map(|i| (i % 2) as f64));
        (data, target)
    }

    #[test]
    fn test_detect_flags_leaky_feature() {
        let (data_vec, target) = leaky_dataset();
        let data = Matrix::new(&data_vec, 100, 2);
        let report = BiasDetector::default().detect(&data, &target, false).unwrap();

        assert_eq!(report.len(), 1);
        assert_eq!(report.entries[0].feature, 0);
        assert_eq!(report.entries[0].direction, Direction::Positive);
    }

    #[test]
    fn test_detect_direction_negative() {
        // Column carries mass in the negative-target group.
        let target: Vec<f64> = (0..100).map(|i| if i < 50 { 0.0 } else { 1.0 }).collect();
        let data_vec: Vec<f64> = target.iter().map(|y| 1.0 - y).collect();
        let data = Matrix::new(&data_vec, 100, 1);

        let report = BiasDetector::default().detect(&data, &target, false).unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.entries[0].direction, Direction::Negative);
    }

    #[test]
    fn test_detect_report_ordered() {
        // Columns 0, 2 and 4 leak the target, columns 1 and 3 are constant.
        let target: Vec<f64> = (0..100).map(|i| if i < 50 { 0.0 } else { 1.0 }).collect();
        let mut data_vec = Vec::new();
        for j in 0..5 {
            if j % 2 == 0 {
                data_vec.extend(target.iter().copied());
            } else {
                data_vec.extend(vec![1.0; 100]);
            }
        }
        let data = Matrix::new(&data_vec, 100, 5);

        let report = BiasDetector::default().detect(&data, &target, false).unwrap();
        let features: Vec<usize> = report.entries.iter().map(|e| e.feature).collect();
        assert_eq!(features, vec![0, 2, 4]);
    }

    #[test]
    fn test_detect_constant_column_not_flagged() {
        let target: Vec<f64> = (0..50).map(|i| (i % 2) as f64).collect();
        let data_vec = vec![7.5; 50];
        let data = Matrix::new(&data_vec, 50, 1);

        let report = BiasDetector::default().detect(&data, &target, false).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_detect_single_class_target() {
        let target = vec![1.0; 100];
        let data_vec: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let data = Matrix::new(&data_vec, 100, 1);

        let report = BiasDetector::default().detect(&data, &target, false).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_detect_threshold_strictly_greater() {
        // Perfect split over 4 rows gives a statistic of exactly 4.0.
        let data_vec = vec![0.0, 0.0, 1.0, 1.0];
        let target = vec![0.0, 0.0, 1.0, 1.0];
        let data = Matrix::new(&data_vec, 4, 1);

        let at_threshold = BiasDetector::default().set_threshold(4.0);
        assert!(at_threshold.detect(&data, &target, false).unwrap().is_empty());

        let below_threshold = BiasDetector::default().set_threshold(3.9);
        assert_eq!(below_threshold.detect(&data, &target, false).unwrap().len(), 1);
    }

    #[test]
    fn test_detect_dimension_mismatch() {
        let data_vec = vec![1.0, 2.0, 3.0, 4.0];
        let target = vec![0.0, 1.0];
        let data = Matrix::new(&data_vec, 4, 1);

        let err = BiasDetector::default().detect(&data, &target, false).unwrap_err();
        assert!(matches!(err, DebiasError::DimensionMismatch(4, 2)));
    }

    #[test]
    fn test_detect_bad_threshold() {
        let data_vec = vec![1.0, 2.0];
        let target = vec![0.0, 1.0];
        let data = Matrix::new(&data_vec, 2, 1);

        for bad in [0.0, -3.0, f64::NAN] {
            let detector = BiasDetector::default().set_threshold(bad);
            let err = detector.detect(&data, &target, false).unwrap_err();
            assert!(matches!(err, DebiasError::InvalidParameter(_, _, _)));
        }
    }

    #[test]
    fn test_detect_parallel_matches_serial() {
        let (data_vec, target) = leaky_dataset();
        let data = Matrix::new(&data_vec, 100, 2);
        let detector = BiasDetector::default();

        let serial = detector.detect(&data, &target, false).unwrap();
        let parallel = detector.detect(&data, &target, true).unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_feature_statistics() {
        let (data_vec, target) = leaky_dataset();
        let data = Matrix::new(&data_vec, 100, 2);
        let detector = BiasDetector::default();

        let stats = detector.feature_statistics(&data, &target, false).unwrap();
        assert_eq!(stats.len(), 2);
        assert_relative_eq!(stats[&0], 100.0);
        assert_relative_eq!(stats[&1], 0.0);

        let parallel = detector.feature_statistics(&data, &target, true).unwrap();
        assert_eq!(stats, parallel);
    }

    #[test]
    fn test_detect_noise_rarely_flagged() {
        // Independent noise should clear the default threshold only with
        // probability around 0.002 per column, so 200 trials stay well
        // under a handful of flags.
        let mut rng = StdRng::seed_from_u64(42);
        let detector = BiasDetector::default();
        let mut flagged = 0;
        for _ in 0..200 {
            let target: Vec<f64> = (0..100).map(|_| if rng.gen_bool(0.5) { 1.0 } else { 0.0 }).collect();
            let data_vec: Vec<f64> = (0..100).map(|_| rng.gen_range(0.0..1.0)).collect();
            let data = Matrix::new(&data_vec, 100, 1);
            flagged += detector.detect(&data, &target, false).unwrap().len();
        }
        assert!(flagged <= 5);
    }
}
