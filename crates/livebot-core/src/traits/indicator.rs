//! Indicator trait definition.

use crate::error::IndicatorError;

/// Trait for technical indicators over an ordered price history.
///
/// The output is aligned 1:1 with the input: position `i` of the
/// result corresponds to position `i` of `data`, and positions before
/// the warm-up length hold `None` instead of a value.
pub trait Indicator: Send + Sync {
    /// Compute indicator values aligned with the input.
    fn compute(&self, data: &[f64]) -> Vec<Option<f64>>;

    /// Number of leading positions that stay undefined.
    fn warmup(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that there's enough data for at least one value.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        if data.len() <= self.warmup() {
            return Err(IndicatorError::InsufficientData {
                required: self.warmup() + 1,
                available: data.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Lag {
        period: usize,
    }

    impl Indicator for Lag {
        fn compute(&self, data: &[f64]) -> Vec<Option<f64>> {
            data.iter()
                .enumerate()
                .map(|(i, _)| {
                    if i < self.period {
                        None
                    } else {
                        Some(data[i - self.period])
                    }
                })
                .collect()
        }

        fn warmup(&self) -> usize {
            self.period
        }

        fn name(&self) -> &str {
            "lag"
        }
    }

    #[test]
    fn test_alignment_contract() {
        let indicator = Lag { period: 2 };
        let data = vec![1.0, 2.0, 3.0, 4.0];
        let out = indicator.compute(&data);

        assert_eq!(out.len(), data.len());
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert_eq!(out[2], Some(1.0));
        assert_eq!(out[3], Some(2.0));
    }

    #[test]
    fn test_validation() {
        let indicator = Lag { period: 3 };
        assert!(indicator.validate_data(&[1.0, 2.0, 3.0]).is_err());
        assert!(indicator.validate_data(&[1.0, 2.0, 3.0, 4.0]).is_ok());
    }
}
