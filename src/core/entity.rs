//! Identifiers for matches and card instances.
//!
//! ## ID Layout
//!
//! - `MatchId`: a UUID, either supplied by the caller or generated.
//! - `InstanceId`: allocated from a per-match counter. The counter is part
//!   of the match state and survives a full reset, so an instance id is
//!   never handed out twice within one match.
//!
//! ```
//! use rift_table::core::{InstanceId, MatchId};
//!
//! let id: MatchId = "2f1c6d2e-3b7a-4f0e-9a51-1c2d3e4f5a6b".parse().unwrap();
//! assert_eq!(id.to_string(), "2f1c6d2e-3b7a-4f0e-9a51-1c2d3e4f5a6b");
//!
//! assert!(InstanceId(3) < InstanceId(4));
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of one physical card token within a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Create an instance ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}

/// Identifier of a live match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchId(pub Uuid);

impl MatchId {
    /// Generate a fresh random match ID.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn uuid(self) -> Uuid {
        self.0
    }
}

impl FromStr for MatchId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_id_ordering() {
        assert!(InstanceId(1) < InstanceId(2));
        assert_eq!(InstanceId::new(7).raw(), 7);
        assert_eq!(InstanceId::from(9), InstanceId(9));
    }

    #[test]
    fn test_instance_display() {
        assert_eq!(format!("{}", InstanceId(42)), "Instance(42)");
    }

    #[test]
    fn test_match_id_parse_roundtrip() {
        let id = MatchId::random();
        let parsed: MatchId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_match_id_parse_rejects_garbage() {
        assert!("not-a-match".parse::<MatchId>().is_err());
    }

    #[test]
    fn test_random_ids_differ() {
        assert_ne!(MatchId::random(), MatchId::random());
    }
}
