//! Core types: identifiers, sides, RNG, configuration and errors.
//!
//! These are the building blocks shared by the zone store, the transition
//! engine and the match store.

pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{TableConfig, ZoneConfig, ZoneVisibility};
pub use entity::{InstanceId, MatchId};
pub use error::{StorageError, TableError, TableResult};
pub use player::{Side, SideMap};
pub use rng::{GameRng, GameRngState};
