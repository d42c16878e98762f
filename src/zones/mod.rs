//! Zone system for card locations.
//!
//! Unlike a general engine, the table has a fixed set of nine zones per
//! side. Each (owner, zone) pair forms a pile ordered by `position`.
//!
//! ## Key Types
//!
//! - `Zone`: The enumerated zones
//! - `DeckKind`: The two drawable decks and their draw destinations
//! - `ZoneManager`: Card instance store and pile queries
//!
//! Position sequencing (`next_position`, `bottom_position`,
//! `shuffle_pile`) lives in `sequencer`.

pub mod manager;
pub mod sequencer;
pub mod zone;

pub use manager::ZoneManager;
pub use zone::{DeckKind, UnknownZone, Zone};
