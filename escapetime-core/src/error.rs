//! Error taxonomy shared by the grid builder and the evaluators.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EscapeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("render cancelled")]
    Cancelled,

    #[error("invalid render request: {0}")]
    Config(#[from] serde_json::Error),
}

impl EscapeError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Reject negative iteration budgets instead of clamping them.
pub fn validate_budget(max_iterations: i64) -> Result<u32, EscapeError> {
    if max_iterations < 0 {
        return Err(EscapeError::invalid(format!(
            "max_iterations must be non-negative, got {max_iterations}"
        )));
    }
    // The cap value is budget + 1 and must still fit in a u32.
    u32::try_from(max_iterations)
        .ok()
        .filter(|budget| *budget < u32::MAX)
        .ok_or_else(|| {
            EscapeError::invalid(format!(
                "max_iterations {max_iterations} exceeds {}",
                u32::MAX - 1
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_budget_is_invalid_argument() {
        let err = validate_budget(-1).unwrap_err();
        assert!(matches!(err, EscapeError::InvalidArgument(_)));
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn zero_and_positive_budgets_pass_through() {
        assert_eq!(validate_budget(0).unwrap(), 0);
        assert_eq!(validate_budget(255).unwrap(), 255);
    }

    #[test]
    fn budget_must_leave_room_for_cap_value() {
        assert!(validate_budget(u32::MAX as i64).is_err());
        assert!(validate_budget(i64::MAX).is_err());
        assert_eq!(validate_budget(u32::MAX as i64 - 1).unwrap(), u32::MAX - 1);
    }

    #[test]
    fn shape_mismatch_message_names_both_shapes() {
        let err = EscapeError::ShapeMismatch {
            expected: (3, 4),
            actual: (4, 3),
        };
        assert_eq!(err.to_string(), "shape mismatch: expected (3, 4), got (4, 3)");
    }
}
