//! Engine façade that publishes every committed change.

use tracing::warn;

use super::event::{Applied, PeekNotice};
use super::notifier::ChangeNotifier;
use crate::cards::{CardInstance, CatalogueId};
use crate::core::entity::{InstanceId, MatchId};
use crate::core::error::{TableError, TableResult};
use crate::core::player::{Side, SideMap};
use crate::engine::{BoardEngine, DeckList, DeckLoadReport, MatchSetup, MoveOutcome, MoveRequest, PlacementOptions};
use crate::matches::{MatchAggregate, MatchStatus};
use crate::zones::{DeckKind, Zone};

/// Wraps a `BoardEngine` and forwards exactly one `match_changed` per
/// successful mutation to the notifier.
///
/// Rejected calls publish nothing. A failed notification is logged and
/// the call still succeeds: the committed state is authoritative.
#[derive(Debug)]
pub struct TableService<N> {
    engine: BoardEngine,
    notifier: N,
}

impl<N: ChangeNotifier> TableService<N> {
    pub fn new(engine: BoardEngine, notifier: N) -> Self {
        Self { engine, notifier }
    }

    /// Read access to the engine for queries.
    pub fn engine(&self) -> &BoardEngine {
        &self.engine
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn publish<T>(&self, applied: Applied<T>) -> T {
        if let Err(e) = self.notifier.match_changed(&applied.change) {
            warn!(
                match_id = %applied.change.match_id,
                version = applied.change.version,
                error = %e,
                "change notification failed"
            );
        }
        applied.value
    }

    pub fn create_match(&self, setup: MatchSetup) -> TableResult<MatchAggregate> {
        Ok(self.publish(self.engine.create_match(setup)?))
    }

    pub fn update_status(&self, id: MatchId, status: MatchStatus) -> TableResult<MatchAggregate> {
        Ok(self.publish(self.engine.update_status(id, status)?))
    }

    /// Deleting a match publishes nothing; there is no one left to tell.
    pub fn delete_match(&self, id: MatchId) -> TableResult<bool> {
        self.engine.delete_match(id)
    }

    pub fn reset_match(&self, id: MatchId) -> TableResult<usize> {
        Ok(self.publish(self.engine.reset_match(id)?))
    }

    pub fn add_card(
        &self,
        id: MatchId,
        owner: Side,
        zone: Zone,
        catalogue_id: CatalogueId,
        options: PlacementOptions,
    ) -> TableResult<CardInstance> {
        Ok(self.publish(self.engine.add_card(id, owner, zone, catalogue_id, options)?))
    }

    pub fn spawn_token(&self, id: MatchId, owner: Side, catalogue_id: CatalogueId) -> TableResult<CardInstance> {
        Ok(self.publish(self.engine.spawn_token(id, owner, catalogue_id)?))
    }

    pub fn move_card(&self, id: MatchId, request: MoveRequest) -> TableResult<MoveOutcome> {
        Ok(self.publish(self.engine.move_card(id, request)?))
    }

    pub fn flip(&self, id: MatchId, instance: InstanceId) -> TableResult<CardInstance> {
        Ok(self.publish(self.engine.flip(id, instance)?))
    }

    pub fn exhaust(&self, id: MatchId, instance: InstanceId) -> TableResult<CardInstance> {
        Ok(self.publish(self.engine.exhaust(id, instance)?))
    }

    pub fn set_temp_might(&self, id: MatchId, instance: InstanceId, value: Option<i32>) -> TableResult<CardInstance> {
        Ok(self.publish(self.engine.set_temp_might(id, instance, value)?))
    }

    /// Draw the top card. `Ok(None)` when the deck is empty.
    pub fn draw(&self, id: MatchId, owner: Side, deck: DeckKind) -> TableResult<Option<CardInstance>> {
        Ok(self
            .engine
            .draw(id, owner, deck)?
            .map(|applied| self.publish(applied)))
    }

    /// Like `draw`, but an empty deck is a `TableError::EmptyPile`.
    pub fn draw_or_err(&self, id: MatchId, owner: Side, deck: DeckKind) -> TableResult<CardInstance> {
        self.draw(id, owner, deck)?
            .ok_or(TableError::EmptyPile { side: owner, deck })
    }

    pub fn peek(&self, id: MatchId, owner: Side, deck: DeckKind) -> TableResult<Option<CardInstance>> {
        self.engine.peek(id, owner, deck)
    }

    /// Tell the other viewers that `side` looked at `count` cards. Nothing
    /// in the match changes.
    pub fn notify_peek(&self, id: MatchId, side: Side, deck: DeckKind, count: u32) -> TableResult<()> {
        self.engine.ensure_match(id)?;
        let notice = PeekNotice {
            match_id: id,
            side,
            deck,
            count,
        };
        if let Err(e) = self.notifier.player_peeked(&notice) {
            warn!(match_id = %id, %side, error = %e, "peek notification failed");
        }
        Ok(())
    }

    pub fn recycle_one(
        &self,
        id: MatchId,
        owner: Side,
        instance: InstanceId,
        into: DeckKind,
    ) -> TableResult<CardInstance> {
        Ok(self.publish(self.engine.recycle_one(id, owner, instance, into)?))
    }

    pub fn recycle_all(&self, id: MatchId, owner: Side, from: Zone, into: DeckKind) -> TableResult<Vec<InstanceId>> {
        Ok(self.publish(self.engine.recycle_all(id, owner, from, into)?))
    }

    pub fn remove_card(&self, id: MatchId, instance: InstanceId) -> TableResult<CardInstance> {
        Ok(self.publish(self.engine.remove_card(id, instance)?))
    }

    pub fn shuffle(&self, id: MatchId, owner: Side, zone: Zone) -> TableResult<usize> {
        Ok(self.publish(self.engine.shuffle(id, owner, zone)?))
    }

    pub fn reorder_battlefield(&self, id: MatchId, owner: Side) -> TableResult<Vec<InstanceId>> {
        Ok(self.publish(self.engine.reorder_battlefield(id, owner)?))
    }

    pub fn load_deck(&self, id: MatchId, side: Side, deck: &DeckList) -> TableResult<DeckLoadReport> {
        Ok(self.publish(self.engine.load_deck(id, side, deck)?))
    }

    pub fn set_score(&self, id: MatchId, side: Side, score: i32) -> TableResult<SideMap<i32>> {
        Ok(self.publish(self.engine.set_score(id, side, score)?))
    }

    pub fn set_active_battleground(
        &self,
        id: MatchId,
        side: Side,
        instance: Option<InstanceId>,
    ) -> TableResult<SideMap<Option<InstanceId>>> {
        Ok(self.publish(self.engine.set_active_battleground(id, side, instance)?))
    }
}
