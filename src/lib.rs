//! # rift-table
//!
//! Board state engine for a shared two-player virtual tabletop.
//!
//! Tracks where every physical card token is (side, zone, position), how it
//! is turned (face up, exhausted, temporary might) and which battlefield
//! sub-area it occupies, and lets two remote clients manipulate that state
//! through discrete transitions.
//!
//! ## Design Principles
//!
//! 1. **Bookkeeping, not refereeing**: The engine validates structure
//!    (ownership, zone acceptance, score range), never game legality.
//!
//! 2. **Owners are permanent**: A move changes zone, position and
//!    battlefield side. It never changes who owns the card.
//!
//! 3. **All or nothing**: Every mutation runs on a clone of the match and
//!    is committed by swapping, so a failure leaves no partial state.
//!
//! ## Architecture
//!
//! - **Per-match locking**: `MatchStore` keeps each match behind its own
//!   mutex. Two players acting on one match are serialized; different
//!   matches never contend.
//!
//! - **Persistent Data Structures**: O(1) cloning of the card table via
//!   `im-rs` makes the working copy cheap.
//!
//! - **Signals, not transports**: Mutations return `Applied<T>` with a
//!   `MatchChanged`; `TableService` hands it to a `ChangeNotifier`.
//!
//! ## Modules
//!
//! - `core`: Identifiers, sides, RNG, configuration, errors
//! - `cards`: Catalogue entries, card instances, catalogue lookup
//! - `zones`: The nine zones, the instance store, position sequencing
//! - `engine`: Zone transitions, battlefield sort, deck loading
//! - `matches`: Match aggregate, board read models, concurrent store
//! - `notify`: Change signals, notifier seam, publishing façade

pub mod core;
pub mod zones;
pub mod cards;
pub mod engine;
pub mod matches;
pub mod notify;

// Re-export commonly used types
pub use crate::core::{
    InstanceId, MatchId,
    Side, SideMap,
    GameRng, GameRngState,
    TableConfig, ZoneConfig, ZoneVisibility,
    StorageError, TableError, TableResult,
};

pub use crate::zones::{DeckKind, Zone, ZoneManager};

pub use crate::cards::{
    CatalogueId, CardKind, CardDefinition, CardInstance,
    CardCatalogue, CardRegistry, AttributeKey, AttributeValue, Attributes,
};

pub use crate::engine::{
    BoardEngine, MatchSetup,
    MoveOutcome, MoveRequest, PlacementOptions,
    DeckEntry, DeckList, DeckLoadReport,
};

pub use crate::matches::{
    MatchAggregate, MatchStatus, MatchState, MatchSnapshot, MatchStore,
    BoardSnapshot, SideBoard, CardView, RedactedSide,
    SnapshotSink, NullSink, MemorySink,
};

pub use crate::notify::{
    Applied, ChangeReason, MatchChanged, PeekNotice,
    ChangeNotifier, NoopNotifier, NotifyError, RecordingNotifier,
    TableService,
};
