//! Full state of one match and its serializable snapshot.

use serde::{Deserialize, Serialize};

use super::aggregate::MatchAggregate;
use crate::cards::CardInstance;
use crate::core::entity::{InstanceId, MatchId};
use crate::core::error::{TableError, TableResult};
use crate::core::rng::{GameRng, GameRngState};
use crate::zones::ZoneManager;

/// Everything the engine knows about one match.
///
/// Cloning is cheap: the card table is a persistent map. Transactions clone
/// the state, mutate the clone and swap it in on success.
#[derive(Clone, Debug)]
pub struct MatchState {
    pub aggregate: MatchAggregate,
    pub zones: ZoneManager,
    pub rng: GameRng,
}

impl MatchState {
    #[must_use]
    pub fn new(id: MatchId, rng: GameRng) -> Self {
        Self {
            aggregate: MatchAggregate::new(id),
            zones: ZoneManager::new(),
            rng,
        }
    }

    #[must_use]
    pub fn id(&self) -> MatchId {
        self.aggregate.id
    }

    /// Look up an instance, reporting a miss as `InstanceNotFound`.
    pub fn card(&self, instance: InstanceId) -> TableResult<&CardInstance> {
        self.zones.get(instance).ok_or(TableError::InstanceNotFound {
            match_id: self.id(),
            instance,
        })
    }

    pub(crate) fn card_mut(&mut self, instance: InstanceId) -> TableResult<&mut CardInstance> {
        let match_id = self.id();
        self.zones
            .get_mut(instance)
            .ok_or(TableError::InstanceNotFound { match_id, instance })
    }

    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            aggregate: self.aggregate.clone(),
            zones: self.zones.clone(),
            rng: self.rng.state(),
        }
    }

    #[must_use]
    pub fn from_snapshot(snapshot: MatchSnapshot) -> Self {
        Self {
            aggregate: snapshot.aggregate,
            zones: snapshot.zones,
            rng: GameRng::from_state(&snapshot.rng),
        }
    }
}

/// Serializable image of a match, written to the snapshot sink after
/// every committed change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub aggregate: MatchAggregate,
    pub zones: ZoneManager,
    pub rng: GameRngState,
}

impl MatchSnapshot {
    pub fn encode(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CatalogueId;
    use crate::core::player::Side;
    use crate::zones::Zone;

    #[test]
    fn test_card_lookup_errors() {
        let state = MatchState::new(MatchId::random(), GameRng::new(1));
        let err = state.card(InstanceId(3)).unwrap_err();
        assert!(matches!(err, TableError::InstanceNotFound { instance: InstanceId(3), .. }));
    }

    #[test]
    fn test_snapshot_roundtrip_preserves_rng_stream() {
        let mut state = MatchState::new(MatchId::random(), GameRng::new(7));
        for i in 0..5 {
            state
                .zones
                .create(Side::Red, Zone::MainDeck, CatalogueId::new(format!("C{i}")));
        }
        state.aggregate.scores[Side::Blue] = 3;

        let bytes = state.snapshot().encode().unwrap();
        let mut restored = MatchState::from_snapshot(MatchSnapshot::decode(&bytes).unwrap());

        assert_eq!(restored.snapshot(), state.snapshot());
        assert_eq!(
            restored.rng.gen_range_usize(0..1000),
            state.rng.gen_range_usize(0..1000)
        );
    }
}
