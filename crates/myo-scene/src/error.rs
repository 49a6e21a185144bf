//! Error types for scene loading and construction.

use myo_types::SimError;
use thiserror::Error;

/// Errors that can occur while loading or building a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// YAML parsing or serialization error.
    #[error("scene parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Two scene entries of the same kind share an id.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId {
        /// The kind of entry ("body", "elastic", ...).
        kind: &'static str,
        /// The duplicated id.
        id: String,
    },

    /// Reference to an undefined body id.
    #[error("reference to undefined body: {id} in {context}")]
    UndefinedBody {
        /// The body id that was referenced.
        id: String,
        /// Where it was referenced.
        context: String,
    },

    /// Reference to an undefined elastic id.
    #[error("reference to undefined elastic: {id} in {context}")]
    UndefinedElastic {
        /// The elastic id that was referenced.
        id: String,
        /// Where it was referenced.
        context: String,
    },

    /// Reference to an undefined controller id.
    #[error("reference to undefined controller: {id} in {context}")]
    UndefinedController {
        /// The controller id that was referenced.
        id: String,
        /// Where it was referenced.
        context: String,
    },

    /// Simulation-level construction error.
    #[error(transparent)]
    Sim(#[from] SimError),
}

impl SceneError {
    /// Create a duplicate id error.
    #[must_use]
    pub fn duplicate_id(kind: &'static str, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            kind,
            id: id.into(),
        }
    }

    /// Create an undefined body error.
    #[must_use]
    pub fn undefined_body(id: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UndefinedBody {
            id: id.into(),
            context: context.into(),
        }
    }

    /// Create an undefined elastic error.
    #[must_use]
    pub fn undefined_elastic(id: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UndefinedElastic {
            id: id.into(),
            context: context.into(),
        }
    }

    /// Create an undefined controller error.
    #[must_use]
    pub fn undefined_controller(id: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UndefinedController {
            id: id.into(),
            context: context.into(),
        }
    }
}
