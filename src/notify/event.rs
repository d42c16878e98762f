//! Change events emitted by committed mutations.
//!
//! The engine never talks to a transport. Every successful mutation hands
//! back an `Applied<T>` carrying exactly one `MatchChanged`; the caller
//! decides how (and whether) to fan it out to other viewers.

use serde::{Deserialize, Serialize};

use crate::core::entity::MatchId;
use crate::core::player::Side;
use crate::zones::DeckKind;

/// Which operation produced a change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeReason {
    MatchCreated,
    StatusChanged,
    CardAdded,
    TokenSpawned,
    CardMoved,
    CardRemoved,
    CardFlipped,
    CardExhausted,
    TempMightSet,
    CardDrawn,
    CardRecycled,
    PileRecycled,
    PileShuffled,
    BattlefieldSorted,
    DeckLoaded,
    ScoreSet,
    BattlegroundSet,
    MatchReset,
}

/// "Match changed" signal addressed to one match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchChanged {
    pub match_id: MatchId,
    /// Match version after the change. Strictly increasing per match.
    pub version: u64,
    pub reason: ChangeReason,
}

/// Result of a committed mutation together with its change signal.
#[derive(Clone, Debug, PartialEq)]
pub struct Applied<T> {
    pub value: T,
    pub change: MatchChanged,
}

impl<T> Applied<T> {
    pub fn into_value(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Applied<U> {
        Applied {
            value: f(self.value),
            change: self.change,
        }
    }
}

/// A player looked at the top of one of their decks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeekNotice {
    pub match_id: MatchId,
    pub side: Side,
    pub deck: DeckKind,
    pub count: u32,
}
