//! Probe models
//!
//! A probe is a small classifier trained to predict the target from feature
//! data. The adversarial correction method uses a probe's predicted
//! probabilities as per-row offsets. The [`ProbeModel`] trait lets callers
//! swap in their own classifier; [`LogisticProbe`] is the built-in default.

use crate::constants::{DEFAULT_ITERATIONS, DEFAULT_L2, DEFAULT_LEARNING_RATE};
use crate::data::Matrix;
use crate::errors::DebiasError;
use crate::utils::{fast_sum, odds, validate_positive_float_parameter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A classifier that can be trained on feature data and a binary target.
///
/// Implementations receive class labels already mapped to 0.0/1.0. Fit
/// failures are propagated to the caller unchanged.
pub trait ProbeModel: Send + Sync {
    /// Train the probe, returning a fitted model ready to score rows.
    fn fit(&self, data: &Matrix<f64>, y: &[f64]) -> Result<Box<dyn FittedProbe>, DebiasError>;
}

/// A trained probe that scores rows with the predicted probability of the
/// positive class.
pub trait FittedProbe {
    /// Predicted probability of the positive class, one value per row.
    fn predict_probability(&self, data: &Matrix<f64>) -> Result<Vec<f64>, DebiasError>;
}

/// Logistic regression trained with full-batch gradient descent.
///
/// Weights start at zero so a fit is fully deterministic for a given
/// dataset and parameter set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticProbe {
    pub learning_rate: f64,
    pub iterations: usize,
    pub l2: f64,
}

impl Default for LogisticProbe {
    fn default() -> Self {
        LogisticProbe {
            learning_rate: DEFAULT_LEARNING_RATE,
            iterations: DEFAULT_ITERATIONS,
            l2: DEFAULT_L2,
        }
    }
}

impl LogisticProbe {
    /// Set the learning_rate on the probe.
    /// * `learning_rate` - Step size of each gradient descent update.
    pub fn set_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set the number of iterations on the probe.
    /// * `iterations` - Number of full-batch gradient descent passes.
    pub fn set_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the l2 on the probe.
    /// * `l2` - Ridge penalty applied to the feature weights.
    pub fn set_l2(mut self, l2: f64) -> Self {
        self.l2 = l2;
        self
    }

    pub fn validate_parameters(&self) -> Result<(), DebiasError> {
        validate_positive_float_parameter(self.learning_rate, "learning_rate")?;
        validate_positive_float_parameter(self.l2, "l2")
    }
}

impl ProbeModel for LogisticProbe {
    fn fit(&self, data: &Matrix<f64>, y: &[f64]) -> Result<Box<dyn FittedProbe>, DebiasError> {
        self.validate_parameters()?;
        if data.rows != y.len() {
            return Err(DebiasError::DimensionMismatch(data.rows, y.len()));
        }
        if data.rows == 0 {
            return Err(DebiasError::ProbeFailure("cannot fit on zero rows".to_string()));
        }

        let n = data.rows as f64;
        let mut weights = vec![0.0; data.cols];
        let mut intercept = 0.0;
        let mut margins = vec![0.0; data.rows];
        let mut residuals = vec![0.0; data.rows];

        for _ in 0..self.iterations {
            margins.iter_mut().for_each(|margin| *margin = intercept);
            for (j, w) in weights.iter().enumerate() {
                for (margin, &value) in margins.iter_mut().zip(data.get_col(j)) {
                    *margin += *w * value;
                }
            }
            for ((residual, &margin), &y_) in residuals.iter_mut().zip(margins.iter()).zip(y) {
                *residual = odds(margin) - y_;
            }
            for (j, w) in weights.iter_mut().enumerate() {
                let mut grad = 0.0;
                for (&residual, &value) in residuals.iter().zip(data.get_col(j)) {
                    grad += residual * value;
                }
                // The intercept is left out of the ridge penalty.
                *w -= self.learning_rate * (grad / n + self.l2 * *w);
            }
            intercept -= self.learning_rate * fast_sum(&residuals) / n;
        }

        if !intercept.is_finite() || weights.iter().any(|w| !w.is_finite()) {
            return Err(DebiasError::ProbeFailure(
                "optimization produced non-finite weights".to_string(),
            ));
        }

        Ok(Box::new(FittedLogistic { weights, intercept }))
    }
}

/// Coefficients learned by a [`LogisticProbe`] fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedLogistic {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl FittedProbe for FittedLogistic {
    fn predict_probability(&self, data: &Matrix<f64>) -> Result<Vec<f64>, DebiasError> {
        if data.cols != self.weights.len() {
            return Err(DebiasError::ProbeFailure(format!(
                "probe was fitted on {} features but asked to score {}",
                self.weights.len(),
                data.cols
            )));
        }
        let mut margins = vec![self.intercept; data.rows];
        for (j, w) in self.weights.iter().enumerate() {
            for (margin, &value) in margins.iter_mut().zip(data.get_col(j)) {
                *margin += *w * value;
            }
        }
        Ok(margins.into_iter().map(odds).collect())
    }
}

/// Probe types that can back the adversarial correction method.
#[derive(Serialize, Deserialize, Clone)]
pub enum Probe {
    Logistic(LogisticProbe),
    #[serde(skip)]
    Custom(Arc<dyn ProbeModel>),
}

impl Default for Probe {
    fn default() -> Self {
        Probe::Logistic(LogisticProbe::default())
    }
}

impl Probe {
    pub fn new_custom<T>(probe: T) -> Self
    where
        T: ProbeModel + 'static,
    {
        Probe::Custom(Arc::new(probe))
    }
}

impl ProbeModel for Probe {
    fn fit(&self, data: &Matrix<f64>, y: &[f64]) -> Result<Box<dyn FittedProbe>, DebiasError> {
        match self {
            Probe::Logistic(probe) => probe.fit(data, y),
            Probe::Custom(arc) => arc.fit(data, y),
        }
    }
}
