//! The board engine: every table operation, addressed by match id.
//!
//! `BoardEngine` owns the configuration, the catalogue handle and the
//! match store. Each mutating call runs as one store transaction and
//! returns an `Applied` carrying the change signal for the caller to
//! publish.

use std::sync::Arc;

use tracing::info;

use super::battlefield::reorder_battlefield;
use super::deck::{load_deck, DeckList, DeckLoadReport};
use super::transitions::{self, MoveOutcome, MoveRequest, PlacementOptions, Rules};
use crate::cards::{CardCatalogue, CardInstance, CatalogueId};
use crate::core::config::TableConfig;
use crate::core::entity::{InstanceId, MatchId};
use crate::core::error::{TableError, TableResult};
use crate::core::player::{Side, SideMap};
use crate::core::rng::GameRng;
use crate::matches::{
    BoardSnapshot, MatchAggregate, MatchSnapshot, MatchState, MatchStatus, MatchStore,
    RedactedSide, SideBoard, SnapshotSink,
};
use crate::notify::event::{Applied, ChangeReason, MatchChanged};
use crate::zones::{DeckKind, Zone};

/// Parameters for a new match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchSetup {
    /// Use this id instead of a random one.
    pub id: Option<MatchId>,
    /// Deck selection reference per side.
    pub decks: SideMap<Option<String>>,
}

impl MatchSetup {
    #[must_use]
    pub fn with_id(mut self, id: MatchId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn with_deck(mut self, side: Side, reference: impl Into<String>) -> Self {
        self.decks[side] = Some(reference.into());
        self
    }
}

/// Shared tabletop state for any number of concurrent matches.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use rift_table::cards::{CardDefinition, CardKind, CardRegistry, CatalogueId};
/// use rift_table::core::{Side, TableConfig};
/// use rift_table::engine::{BoardEngine, MatchSetup, PlacementOptions};
/// use rift_table::zones::{DeckKind, Zone};
///
/// let registry: CardRegistry = [CardDefinition::new("OGN-001", "Vi", CardKind::Unit)]
///     .into_iter()
///     .collect();
/// let engine = BoardEngine::new(Arc::new(registry), TableConfig::default().with_seed(1)).unwrap();
///
/// let id = engine.create_match(MatchSetup::default()).unwrap().value.id;
/// engine
///     .add_card(id, Side::Red, Zone::MainDeck, CatalogueId::new("OGN-001"), PlacementOptions::default())
///     .unwrap();
///
/// let drawn = engine.draw(id, Side::Red, DeckKind::Main).unwrap().unwrap();
/// assert_eq!(drawn.value.zone, Zone::Hand);
/// assert!(engine.draw(id, Side::Red, DeckKind::Main).unwrap().is_none());
/// ```
pub struct BoardEngine {
    config: TableConfig,
    catalogue: Arc<dyn CardCatalogue>,
    store: MatchStore,
}

impl std::fmt::Debug for BoardEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardEngine")
            .field("config", &self.config)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl BoardEngine {
    /// Create an engine with an in-memory store and no persistence.
    pub fn new(catalogue: Arc<dyn CardCatalogue>, config: TableConfig) -> TableResult<Self> {
        Self::with_store(catalogue, config, MatchStore::new())
    }

    /// Create an engine that persists every commit to `sink`.
    pub fn with_sink(
        catalogue: Arc<dyn CardCatalogue>,
        config: TableConfig,
        sink: Arc<dyn SnapshotSink>,
    ) -> TableResult<Self> {
        Self::with_store(catalogue, config, MatchStore::with_sink(sink))
    }

    pub fn with_store(
        catalogue: Arc<dyn CardCatalogue>,
        config: TableConfig,
        store: MatchStore,
    ) -> TableResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            catalogue,
            store,
        })
    }

    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    #[must_use]
    pub fn catalogue(&self) -> &dyn CardCatalogue {
        self.catalogue.as_ref()
    }

    fn rules(&self) -> Rules<'_> {
        Rules::new(&self.config, self.catalogue.as_ref())
    }

    fn new_rng(&self) -> GameRng {
        self.config.seed.map_or_else(GameRng::from_entropy, GameRng::new)
    }

    // === Match lifecycle ===

    pub fn create_match(&self, setup: MatchSetup) -> TableResult<Applied<MatchAggregate>> {
        let id = setup.id.unwrap_or_else(MatchId::random);
        let mut state = MatchState::new(id, self.new_rng());
        state.aggregate.decks = setup.decks;

        let aggregate = self.store.insert(state)?;
        info!(match_id = %id, "match created");
        Ok(Applied {
            change: MatchChanged {
                match_id: id,
                version: aggregate.version,
                reason: ChangeReason::MatchCreated,
            },
            value: aggregate,
        })
    }

    /// Register a match from a persisted snapshot.
    pub fn restore_match(&self, snapshot: MatchSnapshot) -> TableResult<MatchAggregate> {
        let aggregate = self.store.restore(snapshot)?;
        info!(match_id = %aggregate.id, version = aggregate.version, "match restored");
        Ok(aggregate)
    }

    #[must_use]
    pub fn find_match(&self, id: MatchId) -> Option<MatchAggregate> {
        self.store.read(id, |state| Ok(state.aggregate.clone())).ok()
    }

    /// Every match whose status is `Active`.
    #[must_use]
    pub fn active_matches(&self) -> Vec<MatchAggregate> {
        let mut active: Vec<_> = self
            .store
            .aggregates()
            .into_iter()
            .filter(MatchAggregate::is_active)
            .collect();
        active.sort_by_key(|a| a.id);
        active
    }

    pub fn update_status(&self, id: MatchId, status: MatchStatus) -> TableResult<Applied<MatchAggregate>> {
        self.store.transact(id, ChangeReason::StatusChanged, |state| {
            state.aggregate.status = status;
            Ok(state.aggregate.clone())
        })
    }

    /// Delete a match and everything in it. Returns whether it existed.
    pub fn delete_match(&self, id: MatchId) -> TableResult<bool> {
        self.store.remove(id)
    }

    /// Delete every card in the match, keeping scores and selections.
    pub fn reset_match(&self, id: MatchId) -> TableResult<Applied<usize>> {
        let applied = self
            .store
            .transact(id, ChangeReason::MatchReset, |state| Ok(transitions::reset(state)))?;
        info!(match_id = %id, removed = applied.value, "match reset");
        Ok(applied)
    }

    /// Serializable image of a match.
    pub fn snapshot(&self, id: MatchId) -> TableResult<MatchSnapshot> {
        self.store.read(id, |state| Ok(state.snapshot()))
    }

    // === Card transitions ===

    pub fn add_card(
        &self,
        id: MatchId,
        owner: Side,
        zone: Zone,
        catalogue_id: CatalogueId,
        options: PlacementOptions,
    ) -> TableResult<Applied<CardInstance>> {
        let rules = self.rules();
        self.store.transact(id, ChangeReason::CardAdded, |state| {
            transitions::add_card(state, &rules, owner, zone, catalogue_id, options)
        })
    }

    /// Put a token into the owner's base, face up and ready.
    pub fn spawn_token(
        &self,
        id: MatchId,
        owner: Side,
        catalogue_id: CatalogueId,
    ) -> TableResult<Applied<CardInstance>> {
        let rules = self.rules();
        self.store.transact(id, ChangeReason::TokenSpawned, |state| {
            transitions::add_card(state, &rules, owner, Zone::Base, catalogue_id, PlacementOptions::face_up())
        })
    }

    pub fn move_card(&self, id: MatchId, request: MoveRequest) -> TableResult<Applied<MoveOutcome>> {
        let rules = self.rules();
        self.store.transact(id, ChangeReason::CardMoved, |state| {
            transitions::move_card(state, &rules, request)
        })
    }

    pub fn flip(&self, id: MatchId, instance: InstanceId) -> TableResult<Applied<CardInstance>> {
        self.store
            .transact(id, ChangeReason::CardFlipped, |state| transitions::flip(state, instance))
    }

    pub fn exhaust(&self, id: MatchId, instance: InstanceId) -> TableResult<Applied<CardInstance>> {
        let rules = self.rules();
        self.store.transact(id, ChangeReason::CardExhausted, |state| {
            transitions::exhaust(state, &rules, instance)
        })
    }

    pub fn set_temp_might(
        &self,
        id: MatchId,
        instance: InstanceId,
        value: Option<i32>,
    ) -> TableResult<Applied<CardInstance>> {
        self.store.transact(id, ChangeReason::TempMightSet, |state| {
            transitions::set_temp_might(state, instance, value)
        })
    }

    /// Draw the top card of a deck. `Ok(None)` means the deck is empty;
    /// nothing is committed and no change is signalled.
    pub fn draw(&self, id: MatchId, owner: Side, deck: DeckKind) -> TableResult<Option<Applied<CardInstance>>> {
        let rules = self.rules();
        self.store.transact_if(id, ChangeReason::CardDrawn, |state| {
            transitions::draw(state, &rules, owner, deck)
        })
    }

    pub fn peek(&self, id: MatchId, owner: Side, deck: DeckKind) -> TableResult<Option<CardInstance>> {
        let rules = self.rules();
        self.store.read(id, |state| {
            rules.check_ordered(deck.zone())?;
            Ok(transitions::peek(state, owner, deck))
        })
    }

    pub fn peek_many(
        &self,
        id: MatchId,
        owner: Side,
        deck: DeckKind,
        count: usize,
    ) -> TableResult<Vec<CardInstance>> {
        let rules = self.rules();
        self.store.read(id, |state| {
            rules.check_ordered(deck.zone())?;
            Ok(transitions::peek_many(state, owner, deck, count))
        })
    }

    pub fn recycle_one(
        &self,
        id: MatchId,
        owner: Side,
        instance: InstanceId,
        into: DeckKind,
    ) -> TableResult<Applied<CardInstance>> {
        let rules = self.rules();
        self.store.transact(id, ChangeReason::CardRecycled, |state| {
            transitions::recycle_one(state, &rules, owner, instance, into)
        })
    }

    /// Move a whole pile to the bottom of a deck in one step.
    pub fn recycle_all(
        &self,
        id: MatchId,
        owner: Side,
        from: Zone,
        into: DeckKind,
    ) -> TableResult<Applied<Vec<InstanceId>>> {
        let rules = self.rules();
        self.store.transact(id, ChangeReason::PileRecycled, |state| {
            transitions::recycle_all(state, &rules, owner, from, into)
        })
    }

    pub fn remove_card(&self, id: MatchId, instance: InstanceId) -> TableResult<Applied<CardInstance>> {
        self.store.transact(id, ChangeReason::CardRemoved, |state| {
            transitions::remove_card(state, instance)
        })
    }

    pub fn shuffle(&self, id: MatchId, owner: Side, zone: Zone) -> TableResult<Applied<usize>> {
        self.store.transact(id, ChangeReason::PileShuffled, |state| {
            Ok(transitions::shuffle(state, owner, zone))
        })
    }

    pub fn reorder_battlefield(&self, id: MatchId, owner: Side) -> TableResult<Applied<Vec<InstanceId>>> {
        let rules = self.rules();
        self.store.transact(id, ChangeReason::BattlefieldSorted, |state| {
            Ok(reorder_battlefield(state, &rules, owner))
        })
    }

    pub fn load_deck(&self, id: MatchId, side: Side, deck: &DeckList) -> TableResult<Applied<DeckLoadReport>> {
        let rules = self.rules();
        let applied = self.store.transact(id, ChangeReason::DeckLoaded, |state| {
            load_deck(state, &rules, side, deck)
        })?;
        info!(
            match_id = %id,
            %side,
            deck = %deck.reference,
            placed = applied.value.total_placed(),
            "deck loaded"
        );
        Ok(applied)
    }

    // === Match aggregate ===

    pub fn set_score(&self, id: MatchId, side: Side, score: i32) -> TableResult<Applied<SideMap<i32>>> {
        self.store.transact(id, ChangeReason::ScoreSet, |state| {
            state.aggregate.set_score(side, score, &self.config)?;
            Ok(state.aggregate.scores.clone())
        })
    }

    pub fn get_scores(&self, id: MatchId) -> TableResult<SideMap<i32>> {
        self.store.read(id, |state| Ok(state.aggregate.scores.clone()))
    }

    /// Select (or clear) the battleground a side has claimed.
    pub fn set_active_battleground(
        &self,
        id: MatchId,
        side: Side,
        instance: Option<InstanceId>,
    ) -> TableResult<Applied<SideMap<Option<InstanceId>>>> {
        self.store.transact(id, ChangeReason::BattlegroundSet, |state| {
            if let Some(instance) = instance {
                state.card(instance)?;
            }
            state.aggregate.set_active_battleground(side, instance);
            Ok(state.aggregate.active_battlegrounds.clone())
        })
    }

    pub fn get_active_battlegrounds(&self, id: MatchId) -> TableResult<SideMap<Option<InstanceId>>> {
        self.store
            .read(id, |state| Ok(state.aggregate.active_battlegrounds.clone()))
    }

    // === Queries ===

    pub fn get_card(&self, id: MatchId, instance: InstanceId) -> TableResult<CardInstance> {
        self.store.read(id, |state| state.card(instance).cloned())
    }

    /// One pile, bottom first.
    pub fn get_zone(&self, id: MatchId, side: Side, zone: Zone) -> TableResult<Vec<CardInstance>> {
        self.store
            .read(id, |state| Ok(state.zones.pile(side, zone).into_iter().cloned().collect()))
    }

    pub fn get_side_board(&self, id: MatchId, side: Side) -> TableResult<SideBoard> {
        self.store.read(id, |state| Ok(SideBoard::build(state, side)))
    }

    pub fn get_board_state(&self, id: MatchId) -> TableResult<BoardSnapshot> {
        self.store.read(id, |state| Ok(BoardSnapshot::build(state)))
    }

    /// Both sides of the board as `viewer` may see them.
    pub fn get_board_view(&self, id: MatchId, viewer: Side) -> TableResult<SideMap<RedactedSide>> {
        let board = self.get_board_state(id)?;
        Ok(board
            .sides
            .map(|_, side| side.redacted_for(viewer, &self.config)))
    }

    /// Fail with `MatchNotFound` unless the match exists.
    pub fn ensure_match(&self, id: MatchId) -> TableResult<()> {
        if self.store.contains(id) {
            Ok(())
        } else {
            Err(TableError::MatchNotFound(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardKind, CardRegistry};

    fn engine() -> BoardEngine {
        let registry: CardRegistry = [
            CardDefinition::new("UNIT-1", "Vi", CardKind::Unit),
            CardDefinition::new("UNIT-2", "Annie", CardKind::Unit),
            CardDefinition::new("RUNE-1", "Calm Rune", CardKind::BasicRune),
            CardDefinition::new("TOKEN-1", "Recruit", CardKind::TokenUnit),
            CardDefinition::new("BF-1", "Monastery", CardKind::Battlefield),
        ]
        .into_iter()
        .collect();
        BoardEngine::new(Arc::new(registry), TableConfig::default().with_seed(3)).unwrap()
    }

    fn new_match(engine: &BoardEngine) -> MatchId {
        engine.create_match(MatchSetup::default()).unwrap().value.id
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = TableConfig::default().with_score_range(5, 1);
        let err = BoardEngine::new(Arc::new(CardRegistry::new()), config).unwrap_err();
        assert!(matches!(err, TableError::InvalidConfig(_)));
    }

    #[test]
    fn test_partial_zone_config_keeps_rune_rule() {
        let config = TableConfig::from_json(
            r#"{ "zones": [{ "zone": "hand", "ordered": false, "visibility": "OwnerOnly", "accepts": null }], "seed": 1 }"#,
        )
        .unwrap();
        let registry: CardRegistry = [CardDefinition::new("UNIT-1", "Vi", CardKind::Unit)]
            .into_iter()
            .collect();
        let engine = BoardEngine::new(Arc::new(registry), config).unwrap();
        let id = new_match(&engine);
        let unit = engine
            .add_card(id, Side::Red, Zone::Hand, CatalogueId::new("UNIT-1"), PlacementOptions::default())
            .unwrap()
            .value;

        let err = engine
            .move_card(id, MoveRequest::new(unit.id, Zone::Runes))
            .unwrap_err();
        assert!(matches!(err, TableError::InvalidTransition(_)));
        assert_eq!(engine.get_card(id, unit.id).unwrap().zone, Zone::Hand);
    }

    #[test]
    fn test_create_match_defaults() {
        let engine = engine();
        let created = engine
            .create_match(MatchSetup::default().with_deck(Side::Blue, "blue-deck"))
            .unwrap();

        assert_eq!(created.change.version, 0);
        assert_eq!(created.change.reason, ChangeReason::MatchCreated);
        let aggregate = engine.find_match(created.value.id).unwrap();
        assert_eq!(aggregate.status, MatchStatus::Active);
        assert_eq!(aggregate.decks[Side::Blue].as_deref(), Some("blue-deck"));
        assert_eq!(engine.get_scores(aggregate.id).unwrap(), SideMap::with_value(0));
    }

    #[test]
    fn test_create_duplicate_id() {
        let engine = engine();
        let id = new_match(&engine);
        assert!(engine.create_match(MatchSetup::default().with_id(id)).is_err());
    }

    #[test]
    fn test_active_matches_and_status() {
        let engine = engine();
        let a = new_match(&engine);
        let b = new_match(&engine);

        let applied = engine.update_status(a, MatchStatus::Completed).unwrap();
        assert_eq!(applied.change.version, 1);

        let active: Vec<_> = engine.active_matches().into_iter().map(|m| m.id).collect();
        assert_eq!(active, vec![b]);
    }

    #[test]
    fn test_versions_increase_per_mutation() {
        let engine = engine();
        let id = new_match(&engine);

        let card = engine
            .add_card(id, Side::Red, Zone::Hand, CatalogueId::new("UNIT-1"), PlacementOptions::default())
            .unwrap();
        let flipped = engine.flip(id, card.value.id).unwrap();
        let exhausted = engine.exhaust(id, card.value.id).unwrap();

        assert_eq!(card.change.version, 1);
        assert_eq!(flipped.change.version, 2);
        assert_eq!(exhausted.change.version, 3);
        assert_eq!(engine.get_board_state(id).unwrap().version, 3);
    }

    #[test]
    fn test_rejected_transition_keeps_version() {
        let engine = engine();
        let id = new_match(&engine);

        let err = engine
            .add_card(id, Side::Red, Zone::Runes, CatalogueId::new("UNIT-1"), PlacementOptions::default())
            .unwrap_err();

        assert!(matches!(err, TableError::InvalidTransition(_)));
        assert_eq!(engine.find_match(id).unwrap().version, 0);
    }

    #[test]
    fn test_unknown_match_and_instance() {
        let engine = engine();
        let missing = MatchId::random();
        assert!(engine.flip(missing, InstanceId(0)).unwrap_err().is_not_found());
        assert!(engine.ensure_match(missing).is_err());

        let id = new_match(&engine);
        let err = engine.flip(id, InstanceId(42)).unwrap_err();
        assert!(matches!(err, TableError::InstanceNotFound { .. }));
    }

    #[test]
    fn test_spawn_token_then_trash() {
        let engine = engine();
        let id = new_match(&engine);

        let token = engine.spawn_token(id, Side::Blue, CatalogueId::new("TOKEN-1")).unwrap().value;
        assert_eq!(token.zone, Zone::Base);
        assert!(token.face_up);

        let outcome = engine
            .move_card(id, MoveRequest::new(token.id, Zone::Trash).from(Zone::Base))
            .unwrap();
        assert!(outcome.value.is_removed());
        assert!(engine.get_zone(id, Side::Blue, Zone::Trash).unwrap().is_empty());
    }

    #[test]
    fn test_active_battleground() {
        let engine = engine();
        let id = new_match(&engine);
        let ground = engine
            .add_card(id, Side::Red, Zone::Battlefield, CatalogueId::new("BF-1"), PlacementOptions::face_up())
            .unwrap()
            .value;

        engine.set_active_battleground(id, Side::Red, Some(ground.id)).unwrap();
        assert_eq!(engine.get_active_battlegrounds(id).unwrap()[Side::Red], Some(ground.id));

        assert!(engine.set_active_battleground(id, Side::Blue, Some(InstanceId(99))).is_err());

        engine.remove_card(id, ground.id).unwrap();
        assert_eq!(engine.get_active_battlegrounds(id).unwrap()[Side::Red], None);
    }

    #[test]
    fn test_reset_keeps_scores() {
        let engine = engine();
        let id = new_match(&engine);
        engine
            .add_card(id, Side::Red, Zone::Hand, CatalogueId::new("UNIT-1"), PlacementOptions::default())
            .unwrap();
        engine.set_score(id, Side::Red, 4).unwrap();

        let applied = engine.reset_match(id).unwrap();

        assert_eq!(applied.value, 1);
        let board = engine.get_board_state(id).unwrap();
        assert_eq!(board.side(Side::Red).total(), 0);
        assert_eq!(board.scores[Side::Red], 4);
    }

    #[test]
    fn test_board_view_hides_opponent_hand() {
        let engine = engine();
        let id = new_match(&engine);
        engine
            .add_card(id, Side::Red, Zone::Hand, CatalogueId::new("UNIT-1"), PlacementOptions::default())
            .unwrap();

        let blue_view = engine.get_board_view(id, Side::Blue).unwrap();
        assert_eq!(blue_view[Side::Red].zones[&Zone::Hand][0].catalogue_id, None);

        let red_view = engine.get_board_view(id, Side::Red).unwrap();
        assert!(red_view[Side::Red].zones[&Zone::Hand][0].catalogue_id.is_some());
    }

    #[test]
    fn test_side_board_lists_every_zone() {
        let engine = engine();
        let id = new_match(&engine);
        let first = engine
            .add_card(id, Side::Blue, Zone::Base, CatalogueId::new("UNIT-1"), PlacementOptions::default())
            .unwrap()
            .value;
        let second = engine
            .add_card(id, Side::Blue, Zone::Base, CatalogueId::new("UNIT-2"), PlacementOptions::default())
            .unwrap()
            .value;

        let board = engine.get_side_board(id, Side::Blue).unwrap();
        assert_eq!(board.side, Side::Blue);
        assert_eq!(board.zones.len(), Zone::ALL.len());
        let base: Vec<_> = board.zone(Zone::Base).iter().map(|c| c.id).collect();
        assert_eq!(base, vec![first.id, second.id]);
        assert_eq!(board.total(), 2);
        assert_eq!(engine.get_side_board(id, Side::Red).unwrap().total(), 0);
    }

    #[test]
    fn test_delete_match() {
        let engine = engine();
        let id = new_match(&engine);

        assert!(engine.delete_match(id).unwrap());
        assert!(!engine.delete_match(id).unwrap());
        assert!(engine.find_match(id).is_none());
        assert!(matches!(engine.get_board_state(id), Err(TableError::MatchNotFound(_))));
    }

    #[test]
    fn test_snapshot_restore() {
        let engine = engine();
        let id = new_match(&engine);
        engine
            .add_card(id, Side::Red, Zone::MainDeck, CatalogueId::new("UNIT-1"), PlacementOptions::default())
            .unwrap();
        let snapshot = engine.snapshot(id).unwrap();

        let other = self::engine();
        let restored = other.restore_match(snapshot).unwrap();

        assert_eq!(restored.version, 1);
        assert_eq!(other.get_zone(id, Side::Red, Zone::MainDeck).unwrap().len(), 1);
    }
}
