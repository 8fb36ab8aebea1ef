use thiserror::Error;

use crate::id::NodeId;

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Configuration faults raised at the call that introduced them.
///
/// These are programmer errors: nothing in the toolkit retries or recovers
/// from them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("negative {dimension}: {value}")]
    NegativeSize { dimension: &'static str, value: f64 },

    #[error("fraction must be finite, got {value}")]
    InvalidFraction { value: f64 },

    #[error("mismatched lengths: {keys} keys for {values} values")]
    LengthMismatch { keys: usize, values: usize },

    #[error("aligning node {node} would create an alignment cycle")]
    AlignmentCycle { node: NodeId },

    #[error("node {child} already belongs to container {owner}")]
    AlreadyParented { child: NodeId, owner: NodeId },
}

impl LayoutError {
    #[must_use]
    pub fn negative(dimension: &'static str, value: impl Into<f64>) -> Self {
        Self::NegativeSize {
            dimension,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_fault() {
        assert_eq!(
            LayoutError::negative("width", -4).to_string(),
            "negative width: -4"
        );
        assert_eq!(
            LayoutError::LengthMismatch { keys: 3, values: 2 }.to_string(),
            "mismatched lengths: 3 keys for 2 values"
        );
    }
}
