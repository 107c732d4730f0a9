//! Scheduler configuration.
//!
//! An immutable parameter set: the retention target, the interval cap, and
//! the 17 model weights. Validated once at engine construction; a scheduler
//! holding an `FSRSParameters` value never re-checks it.

use serde::{Deserialize, Serialize};

use super::algorithm::DEFAULT_WEIGHTS;

/// Number of model weights the scheduling formulas consume.
pub const WEIGHT_COUNT: usize = 17;

/// Default recall-probability target at the next due instant.
pub const DEFAULT_REQUEST_RETENTION: f64 = 0.9;

/// Default upper bound on any scheduled interval, in days (one century).
pub const DEFAULT_MAXIMUM_INTERVAL: i64 = 36500;

// ============================================================================
// ERRORS
// ============================================================================

/// Rejected configuration. Detected at construction; the engine refuses to
/// build rather than schedule with a broken parameter set.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterError {
    /// Weight slice of the wrong length.
    #[error("expected 17 model weights, got {0}")]
    WeightCount(usize),
    /// Retention target outside the open unit interval.
    #[error("request_retention must lie in (0, 1), got {0}")]
    RequestRetention(f64),
    /// Interval cap below one day.
    #[error("maximum_interval must be at least 1 day, got {0}")]
    MaximumInterval(i64),
}

// ============================================================================
// PARAMETERS
// ============================================================================

/// Immutable scheduler configuration.
///
/// `learning_steps`, `relearning_steps`, and `enable_fuzzing` are part of the
/// persisted configuration surface and round-trip through serialization, but
/// the scheduling arithmetic does not consult them: short-term retry offsets
/// are fixed and intervals are never jittered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FSRSParameters {
    /// Target recall probability at the next due instant, in (0, 1).
    pub request_retention: f64,
    /// Upper cap on scheduled intervals, in days.
    pub maximum_interval: i64,
    /// The 17 model weights.
    pub w: [f64; WEIGHT_COUNT],
    /// Learning-step lengths in minutes. Carried, not consulted.
    #[serde(default = "default_learning_steps")]
    pub learning_steps: Vec<i64>,
    /// Relearning-step lengths in minutes. Carried, not consulted.
    #[serde(default = "default_relearning_steps")]
    pub relearning_steps: Vec<i64>,
    /// Interval fuzzing toggle. Carried, not consulted.
    #[serde(default)]
    pub enable_fuzzing: bool,
}

fn default_learning_steps() -> Vec<i64> {
    vec![1, 10]
}

fn default_relearning_steps() -> Vec<i64> {
    vec![10]
}

impl Default for FSRSParameters {
    fn default() -> Self {
        Self {
            request_retention: DEFAULT_REQUEST_RETENTION,
            maximum_interval: DEFAULT_MAXIMUM_INTERVAL,
            w: DEFAULT_WEIGHTS,
            learning_steps: default_learning_steps(),
            relearning_steps: default_relearning_steps(),
            enable_fuzzing: false,
        }
    }
}

impl FSRSParameters {
    /// Default configuration with a custom weight slice.
    ///
    /// Fails if the slice is not exactly [`WEIGHT_COUNT`] long; this is the
    /// entry point for hosts that load weights from storage.
    pub fn with_weights(weights: &[f64]) -> Result<Self, ParameterError> {
        let w: [f64; WEIGHT_COUNT] = weights
            .try_into()
            .map_err(|_| ParameterError::WeightCount(weights.len()))?;
        Ok(Self {
            w,
            ..Self::default()
        })
    }

    /// Check the constructible-engine preconditions.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !(self.request_retention > 0.0 && self.request_retention < 1.0) {
            return Err(ParameterError::RequestRetention(self.request_retention));
        }
        if self.maximum_interval < 1 {
            return Err(ParameterError::MaximumInterval(self.maximum_interval));
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let params = FSRSParameters::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.request_retention, 0.9);
        assert_eq!(params.maximum_interval, 36500);
        assert_eq!(params.w, DEFAULT_WEIGHTS);
        assert!(!params.enable_fuzzing);
    }

    #[test]
    fn test_with_weights_rejects_wrong_length() {
        let err = FSRSParameters::with_weights(&[0.4; 16]).unwrap_err();
        assert_eq!(err, ParameterError::WeightCount(16));
        let err = FSRSParameters::with_weights(&[0.4; 18]).unwrap_err();
        assert_eq!(err, ParameterError::WeightCount(18));
        assert!(FSRSParameters::with_weights(&DEFAULT_WEIGHTS).is_ok());
    }

    #[test]
    fn test_retention_bounds_rejected() {
        for retention in [0.0, 1.0, -0.2, 1.7, f64::NAN] {
            let params = FSRSParameters {
                request_retention: retention,
                ..Default::default()
            };
            assert!(params.validate().is_err(), "retention {retention} must be rejected");
        }
    }

    #[test]
    fn test_interval_cap_rejected_below_one() {
        let params = FSRSParameters {
            maximum_interval: 0,
            ..Default::default()
        };
        assert_eq!(
            params.validate().unwrap_err(),
            ParameterError::MaximumInterval(0)
        );
    }

    #[test]
    fn test_round_trip_preserves_inert_fields() {
        let params = FSRSParameters {
            learning_steps: vec![1, 5, 15],
            relearning_steps: vec![5, 20],
            enable_fuzzing: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&params).unwrap();
        let back: FSRSParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn test_error_messages_name_the_field() {
        let msg = ParameterError::RequestRetention(1.5).to_string();
        assert!(msg.contains("request_retention"));
        let msg = ParameterError::WeightCount(3).to_string();
        assert!(msg.contains("17"));
    }
}
