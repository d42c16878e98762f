//! Zone transition engine.
//!
//! ## Key Types
//!
//! - `BoardEngine`: Every table operation, addressed by match id
//! - `Rules`: Configuration and catalogue used to validate a transition
//! - `MoveRequest` / `MoveOutcome`: Input and result of a card move
//! - `DeckList` / `DeckLoadReport`: Deck loading input and summary
//!
//! The free functions in `transitions`, `battlefield` and `deck` operate on
//! a single `MatchState`; `BoardEngine` wraps each in a store transaction.

pub mod battlefield;
pub mod deck;
pub mod table;
pub mod transitions;

pub use battlefield::reorder_battlefield;
pub use deck::{DeckEntry, DeckList, DeckLoadReport};
pub use table::{BoardEngine, MatchSetup};
pub use transitions::{MoveOutcome, MoveRequest, PlacementOptions, Rules};
