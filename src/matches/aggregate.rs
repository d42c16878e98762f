//! Per-match metadata: status, scores, deck references and active
//! battleground selections.

use serde::{Deserialize, Serialize};

use crate::core::config::TableConfig;
use crate::core::entity::{InstanceId, MatchId};
use crate::core::error::{TableError, TableResult};
use crate::core::player::{Side, SideMap};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Active,
    Completed,
    Abandoned,
}

/// Match-level fields that live alongside the card table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchAggregate {
    pub id: MatchId,
    pub status: MatchStatus,

    /// Deck selection reference per side, if a deck has been loaded.
    pub decks: SideMap<Option<String>>,

    /// Battleground each side has claimed.
    pub active_battlegrounds: SideMap<Option<InstanceId>>,

    pub scores: SideMap<i32>,

    /// Bumped on every committed change.
    pub version: u64,
}

impl MatchAggregate {
    #[must_use]
    pub fn new(id: MatchId) -> Self {
        Self {
            id,
            status: MatchStatus::Active,
            decks: SideMap::default(),
            active_battlegrounds: SideMap::default(),
            scores: SideMap::with_value(0),
            version: 0,
        }
    }

    /// Set a side's score. Values outside the configured range are
    /// rejected, not clamped.
    pub fn set_score(&mut self, side: Side, score: i32, config: &TableConfig) -> TableResult<()> {
        if !config.score_in_range(score) {
            return Err(TableError::invalid(format!(
                "score {score} outside {}..={}",
                config.min_score, config.max_score
            )));
        }
        self.scores[side] = score;
        Ok(())
    }

    pub fn set_active_battleground(&mut self, side: Side, instance: Option<InstanceId>) {
        self.active_battlegrounds[side] = instance;
    }

    /// Drop battleground selections that point at `instance`.
    pub fn forget_battleground(&mut self, instance: InstanceId) {
        for side in Side::ALL {
            if self.active_battlegrounds[side] == Some(instance) {
                self.active_battlegrounds[side] = None;
            }
        }
    }

    /// Advance the version and return the new value.
    pub fn bump(&mut self) -> u64 {
        self.version += 1;
        self.version
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == MatchStatus::Active
    }
}
