//! Generation errors
//!
//! Only broken invariants and bad configuration are errors. Running out of
//! room candidates or failing to find a path are ordinary outcomes and are
//! reported as `None` or empty results instead.

use thiserror::Error;

use crate::geometry::Position;

/// Errors that abort a generation run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("could not pick a non-empty component to connect after {attempts} attempts")]
    NoCandidateComponent { attempts: usize },

    #[error("component {component} has no path to any other component from {from}")]
    UnreachableComponent { component: usize, from: Position },

    #[error("invalid generator configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GenerationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GenerationError::UnreachableComponent {
            component: 3,
            from: Position::new(4, 5),
        };
        assert!(err.to_string().contains("component 3"));
        assert!(err.to_string().contains("(4, 5)"));

        let err = GenerationError::NoCandidateComponent { attempts: 100 };
        assert!(err.to_string().contains("100 attempts"));
    }
}
