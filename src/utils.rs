use crate::data::FloatData;
use crate::errors::DebiasError;
use std::convert::TryInto;

/// Create a string of all available items.
pub fn items_to_strings(items: Vec<&str>) -> String {
    let mut s = String::new();
    for i in items {
        s.push_str(i);
        s.push_str(&String::from(", "));
    }
    s
}

// Validation
pub fn validate_positive_float_parameter<T: FloatData<T>>(value: T, parameter: &str) -> Result<(), DebiasError> {
    validate_float_parameter(value, T::ZERO, T::INFINITY, parameter)
}
pub fn validate_float_parameter<T: FloatData<T>>(value: T, min: T, max: T, parameter: &str) -> Result<(), DebiasError> {
    if value.is_nan() || value < min || max < value {
        let ex_msg = format!("real value within range {} and {}", min, max);
        Err(DebiasError::InvalidParameter(
            parameter.to_string(),
            ex_msg,
            value.to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Convert Log odds to probability
#[inline]
pub fn odds(v: f64) -> f64 {
    1. / (1. + (-v).exp())
}

const LANES: usize = 16;

/// Fast summation, ends up being roughly 8 to 10 times faster
/// than values.iter().copied().sum().
/// Shamelessly stolen from https://stackoverflow.com/a/67191480
#[inline]
pub fn fast_sum<T: FloatData<T>>(values: &[T]) -> T {
    let chunks = values.chunks_exact(LANES);
    let remainder = chunks.remainder();

    let sum = chunks.fold([T::ZERO; LANES], |mut acc, chunk| {
        let chunk: [T; LANES] = chunk.try_into().unwrap();
        for i in 0..LANES {
            acc[i] += chunk[i];
        }
        acc
    });

    let remainder: T = remainder.iter().copied().sum();

    let mut reduced = T::ZERO;
    for s in sum.iter().take(LANES) {
        reduced += *s;
    }
    reduced + remainder
}

/// Arithmetic mean of a slice, zero when the slice is empty.
#[inline]
pub fn mean<T: FloatData<T>>(values: &[T]) -> T {
    if values.is_empty() {
        T::ZERO
    } else {
        fast_sum(values) / T::from_usize(values.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_sum() {
        let v: Vec<f64> = (1..=100).map(|i| i as f64).collect();
        assert_eq!(fast_sum(&v), 5050.0);
        let short = vec![1.5, 2.5, 3.0];
        assert_eq!(fast_sum(&short), 7.0);
        let empty: Vec<f64> = Vec::new();
        assert_eq!(fast_sum(&empty), 0.0);
    }

    #[test]
    fn test_mean() {
        let v = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(mean(&v), 2.5);
        let empty: Vec<f64> = Vec::new();
        assert_eq!(mean(&empty), 0.0);
    }

    #[test]
    fn test_odds() {
        assert_eq!(odds(0.0), 0.5);
        assert!(odds(4.0) > 0.98);
        assert!(odds(-4.0) < 0.02);
    }

    #[test]
    fn test_validate_float_parameter() {
        assert!(validate_positive_float_parameter(10.0, "threshold").is_ok());
        assert!(validate_positive_float_parameter(-1.0, "threshold").is_err());
        assert!(validate_positive_float_parameter(f64::NAN, "threshold").is_err());
        assert!(validate_float_parameter(0.5, 0.0, 1.0, "learning_rate").is_ok());
        assert!(validate_float_parameter(1.5, 0.0, 1.0, "learning_rate").is_err());
    }
}
