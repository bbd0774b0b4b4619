use std::fmt::{self, Display};
use std::io;

use crate::view::ElementId;

/// Provides `InterventionError` and maps other errors to
/// convert to an `InterventionError`
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum InterventionError {
    IoError(io::Error),
    JsonError(serde_json::Error),
    /// The duration field of the block at `block` (display position) is not a positive integer.
    InvalidDuration { block: usize, value: String },
    /// The compliance field of the block at `block` is not a number in [0, 1].
    InvalidCompliance { block: usize, value: String },
    /// An interaction space of the block at `block` is not an integer.
    InvalidSpace { block: usize, value: String },
    MismatchedInputs {
        interventions: usize,
        compliance: usize,
        num_days: usize,
        spaces: usize,
    },
    UnknownBlock(ElementId),
    InterventionError(String),
}

impl From<io::Error> for InterventionError {
    fn from(error: io::Error) -> Self {
        InterventionError::IoError(error)
    }
}

impl From<serde_json::Error> for InterventionError {
    fn from(error: serde_json::Error) -> Self {
        InterventionError::JsonError(error)
    }
}

impl From<String> for InterventionError {
    fn from(error: String) -> Self {
        InterventionError::InterventionError(error)
    }
}

impl From<&str> for InterventionError {
    fn from(error: &str) -> Self {
        InterventionError::InterventionError(error.to_string())
    }
}

impl std::error::Error for InterventionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InterventionError::IoError(error) => Some(error),
            InterventionError::JsonError(error) => Some(error),
            _ => None,
        }
    }
}

impl Display for InterventionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InterventionError::IoError(error) => write!(f, "I/O error: {error}"),
            InterventionError::JsonError(error) => write!(f, "Invalid JSON: {error}"),
            InterventionError::InvalidDuration { block, value } => write!(
                f,
                "Block {}: duration must be a whole number of days of at least 1, got {value:?}",
                block + 1
            ),
            InterventionError::InvalidCompliance { block, value } => write!(
                f,
                "Block {}: compliance probability must be a number between 0 and 1, got {value:?}",
                block + 1
            ),
            InterventionError::InvalidSpace { block, value } => write!(
                f,
                "Block {}: interaction space must be an integer code, got {value:?}",
                block + 1
            ),
            InterventionError::MismatchedInputs {
                interventions,
                compliance,
                num_days,
                spaces,
            } => write!(
                f,
                "Form arrays have different lengths: {interventions} intervention lists, \
                 {compliance} compliance values, {num_days} durations, {spaces} space lists"
            ),
            InterventionError::UnknownBlock(id) => {
                write!(f, "No intervention block with id {id} in the form")
            }
            InterventionError::InterventionError(message) => write!(f, "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_count_blocks_from_one() {
        let error = InterventionError::InvalidDuration {
            block: 0,
            value: "0".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Block 1: duration must be a whole number of days of at least 1, got \"0\""
        );
    }

    #[test]
    fn json_errors_convert() {
        let json_error = serde_json::from_str::<u32>("nope").unwrap_err();
        let error: InterventionError = json_error.into();
        assert!(matches!(error, InterventionError::JsonError(_)));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn plain_messages_pass_through() {
        let error: InterventionError = "Intervention name must not be empty".into();
        assert_eq!(error.to_string(), "Intervention name must not be empty");
    }
}
