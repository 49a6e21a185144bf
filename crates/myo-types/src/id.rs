//! Registry identifiers.
//!
//! The simulation aggregate owns flat registries of tendons, loads,
//! controllers, and antagonist couples. These newtypes are the handles it
//! hands out; they are plain indices with no lifetime attached, valid for
//! the life of the simulation that issued them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for a tendon (elastic) element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElasticId(pub u64);

impl ElasticId {
    /// Create a new elastic ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Get the registry index for this ID.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u64> for ElasticId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ElasticId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Elastic({})", self.0)
    }
}

/// Unique identifier for a tendon controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControllerId(pub u64);

impl ControllerId {
    /// Create a new controller ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Get the registry index for this ID.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u64> for ControllerId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ControllerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Controller({})", self.0)
    }
}

/// Unique identifier for a load element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoadId(pub u64);

impl LoadId {
    /// Create a new load ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Get the registry index for this ID.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u64> for LoadId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for LoadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Load({})", self.0)
    }
}

/// Unique identifier for an antagonist controller couple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoupleId(pub u64);

impl CoupleId {
    /// Create a new couple ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Get the registry index for this ID.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u64> for CoupleId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CoupleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Couple({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = ElasticId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(id.index(), 42);
        assert_eq!(id.to_string(), "Elastic(42)");

        let id2: ElasticId = 42.into();
        assert_eq!(id, id2);
    }

    #[test]
    fn test_display() {
        assert_eq!(ControllerId::new(3).to_string(), "Controller(3)");
        assert_eq!(LoadId::new(0).to_string(), "Load(0)");
        assert_eq!(CoupleId::new(1).to_string(), "Couple(1)");
    }
}
