//! Live matches: aggregate metadata, full state, read models and the
//! concurrent store.
//!
//! ## Key Types
//!
//! - `MatchAggregate`: Status, scores, deck references, battlegrounds
//! - `MatchState`: Aggregate plus card table plus shuffle RNG
//! - `MatchStore`: Per-match locked store with atomic transactions
//! - `SnapshotSink`: Persistence seam behind every commit
//! - `BoardSnapshot`: Full per-side zone listing for re-sync

pub mod aggregate;
pub mod board;
pub mod sink;
pub mod state;
pub mod store;

pub use aggregate::{MatchAggregate, MatchStatus};
pub use board::{BoardSnapshot, CardView, RedactedSide, SideBoard};
pub use sink::{MemorySink, NullSink, SnapshotSink};
pub use state::{MatchSnapshot, MatchState};
pub use store::MatchStore;
