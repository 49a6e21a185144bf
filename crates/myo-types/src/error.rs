//! Error types for simulation operations.

use thiserror::Error;

/// Errors that can occur while building or running a simulation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// Invalid configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },

    /// A rigid-body handle did not resolve to a body in the world.
    #[error("invalid body handle: {context}")]
    InvalidBodyHandle {
        /// Where the handle was used.
        context: String,
    },

    /// Reference to an elastic element that is not in the registry.
    #[error("unknown elastic element: {0}")]
    UnknownElastic(u64),

    /// Reference to a controller that is not in the registry.
    #[error("unknown controller: {0}")]
    UnknownController(u64),

    /// Reference to a load element that is not in the registry.
    #[error("unknown load element: {0}")]
    UnknownLoad(u64),

    /// Reference to a controller couple that is not in the registry.
    #[error("unknown couple: {0}")]
    UnknownCouple(u64),

    /// An antagonist couple referenced the same controller on both sides.
    #[error("antagonist couple references controller {0} on both sides")]
    DegenerateCouple(u64),

    /// Simulation diverged (`NaN` or `Inf` detected).
    #[error("simulation diverged: {reason}")]
    Diverged {
        /// Description of what went wrong.
        reason: String,
    },
}

impl SimError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create an invalid body handle error.
    #[must_use]
    pub fn invalid_body(context: impl Into<String>) -> Self {
        Self::InvalidBodyHandle {
            context: context.into(),
        }
    }

    /// Create a diverged error.
    #[must_use]
    pub fn diverged(reason: impl Into<String>) -> Self {
        Self::Diverged {
            reason: reason.into(),
        }
    }

    /// Check if this is a divergence error.
    #[must_use]
    pub fn is_diverged(&self) -> bool {
        matches!(self, Self::Diverged { .. })
    }

    /// Check if this is a configuration error.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimError::UnknownElastic(7);
        assert!(err.to_string().contains('7'));

        let err = SimError::invalid_body("revolute joint parent");
        assert!(err.to_string().contains("revolute joint parent"));

        let err = SimError::diverged("NaN in body position");
        assert!(err.to_string().contains("NaN"));
    }

    #[test]
    fn test_error_predicates() {
        let err = SimError::diverged("test");
        assert!(err.is_diverged());
        assert!(!err.is_config_error());

        let err = SimError::invalid_config("bad value");
        assert!(err.is_config_error());
        assert!(!err.is_diverged());
    }
}
