//! Zone transitions on a single match.
//!
//! Each function here mutates a `MatchState` that the store has already
//! cloned for the current transaction. Returning an error is enough to
//! abandon every change made so far, so functions validate as they go
//! rather than up front.

use crate::cards::{CardCatalogue, CardInstance, CardKind, CatalogueId};
use crate::core::config::TableConfig;
use crate::core::entity::InstanceId;
use crate::core::error::{TableError, TableResult};
use crate::core::player::Side;
use crate::matches::MatchState;
use crate::zones::{DeckKind, Zone};

use super::battlefield::reorder_battlefield;

/// Configuration and catalogue needed to validate transitions.
#[derive(Clone, Copy)]
pub struct Rules<'a> {
    pub config: &'a TableConfig,
    pub catalogue: &'a dyn CardCatalogue,
}

impl<'a> Rules<'a> {
    #[must_use]
    pub fn new(config: &'a TableConfig, catalogue: &'a dyn CardCatalogue) -> Self {
        Self { config, catalogue }
    }

    /// Kind of a catalogue entry, if the catalogue knows it.
    #[must_use]
    pub fn kind_of(&self, id: &CatalogueId) -> Option<CardKind> {
        self.catalogue.lookup(id).map(|card| card.kind)
    }

    #[must_use]
    pub fn is_token(&self, id: &CatalogueId) -> bool {
        self.kind_of(id).is_some_and(|kind| self.config.is_token(kind))
    }

    #[must_use]
    pub fn is_battleground(&self, id: &CatalogueId) -> bool {
        self.kind_of(id)
            .is_some_and(|kind| self.config.is_battleground(kind))
    }

    /// Apply the zone's acceptance predicate to a card.
    ///
    /// Restricted zones need the card's kind, so an unknown catalogue id is
    /// an error there. Unrestricted zones take anything.
    pub fn check_entry(&self, id: &CatalogueId, zone: Zone) -> TableResult<()> {
        let Some(accepts) = self.config.zone(zone).and_then(|z| z.accepts.as_ref()) else {
            return Ok(());
        };
        let card = self.catalogue.resolve(id)?;
        if accepts.contains(&card.kind) {
            Ok(())
        } else {
            Err(TableError::invalid(format!(
                "{} ({}) cannot enter {zone}",
                card.name, card.kind
            )))
        }
    }

    /// Top and bottom only mean something in an ordered pile.
    pub fn check_ordered(&self, zone: Zone) -> TableResult<()> {
        if self.config.is_ordered(zone) {
            Ok(())
        } else {
            Err(TableError::invalid(format!("{zone} is not an ordered pile")))
        }
    }
}

/// Orientation of a newly added card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlacementOptions {
    pub face_up: bool,
    pub exhausted: bool,
}

impl PlacementOptions {
    #[must_use]
    pub fn face_up() -> Self {
        Self {
            face_up: true,
            exhausted: false,
        }
    }

    #[must_use]
    pub fn exhausted(mut self) -> Self {
        self.exhausted = true;
        self
    }
}

/// A request to move one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    pub instance: InstanceId,
    /// Zone the caller believes the card is in. Checked when present.
    pub from_zone: Option<Zone>,
    pub to_zone: Zone,
    /// Battlefield sub-area. Ignored unless moving to the battlefield.
    pub battlefield_side: Option<Side>,
}

impl MoveRequest {
    #[must_use]
    pub fn new(instance: InstanceId, to_zone: Zone) -> Self {
        Self {
            instance,
            from_zone: None,
            to_zone,
            battlefield_side: None,
        }
    }

    #[must_use]
    pub fn from(mut self, zone: Zone) -> Self {
        self.from_zone = Some(zone);
        self
    }

    #[must_use]
    pub fn on_side(mut self, side: Side) -> Self {
        self.battlefield_side = Some(side);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The card now sits in the target zone.
    Moved(CardInstance),
    /// A token sent to the trash left the game instead.
    Removed(CardInstance),
}

impl MoveOutcome {
    #[must_use]
    pub fn card(&self) -> &CardInstance {
        match self {
            MoveOutcome::Moved(card) | MoveOutcome::Removed(card) => card,
        }
    }

    #[must_use]
    pub fn is_removed(&self) -> bool {
        matches!(self, MoveOutcome::Removed(_))
    }
}

/// Create a card on top of the (owner, zone) pile.
pub fn add_card(
    state: &mut MatchState,
    rules: &Rules<'_>,
    owner: Side,
    zone: Zone,
    catalogue_id: CatalogueId,
    options: PlacementOptions,
) -> TableResult<CardInstance> {
    rules.check_entry(&catalogue_id, zone)?;

    let id = state.zones.create(owner, zone, catalogue_id).id;
    let card = state.card_mut(id)?;
    card.face_up = options.face_up;
    card.exhausted = options.exhausted;

    if zone == Zone::Battlefield {
        reorder_battlefield(state, rules, owner);
    }
    state.card(id).cloned()
}

/// Move a card to the top of another pile. The owner never changes.
pub fn move_card(
    state: &mut MatchState,
    rules: &Rules<'_>,
    request: MoveRequest,
) -> TableResult<MoveOutcome> {
    let card = state.card(request.instance)?;
    if let Some(expected) = request.from_zone {
        if card.zone != expected {
            return Err(TableError::invalid(format!(
                "{} is in {}, not {expected}",
                card.id, card.zone
            )));
        }
    }

    if request.to_zone == Zone::Trash && rules.is_token(&card.catalogue_id) {
        return remove_card(state, request.instance).map(MoveOutcome::Removed);
    }

    rules.check_entry(&card.catalogue_id, request.to_zone)?;

    let owner = card.owner();
    let position = state.zones.next_position(owner, request.to_zone);
    state
        .card_mut(request.instance)?
        .place(request.to_zone, position, request.battlefield_side);

    if request.to_zone == Zone::Battlefield {
        reorder_battlefield(state, rules, owner);
    }
    state.card(request.instance).cloned().map(MoveOutcome::Moved)
}

/// Toggle face orientation.
pub fn flip(state: &mut MatchState, instance: InstanceId) -> TableResult<CardInstance> {
    let card = state.card_mut(instance)?;
    card.face_up = !card.face_up;
    Ok(card.clone())
}

/// Toggle the exhausted marker. One-shot kinds cannot be exhausted.
pub fn exhaust(
    state: &mut MatchState,
    rules: &Rules<'_>,
    instance: InstanceId,
) -> TableResult<CardInstance> {
    let kind = rules.kind_of(&state.card(instance)?.catalogue_id);
    if let Some(kind) = kind.filter(|&k| !rules.config.can_exhaust(k)) {
        return Err(TableError::invalid(format!("{kind} cards cannot be exhausted")));
    }

    let card = state.card_mut(instance)?;
    card.exhausted = !card.exhausted;
    Ok(card.clone())
}

/// Set or clear the temporary might modifier.
pub fn set_temp_might(
    state: &mut MatchState,
    instance: InstanceId,
    value: Option<i32>,
) -> TableResult<CardInstance> {
    let card = state.card_mut(instance)?;
    card.temp_might = value;
    Ok(card.clone())
}

/// Move the top card of a deck to its destination zone, face up.
///
/// An empty deck is not an error: the result is `Ok(None)` and nothing
/// changes.
pub fn draw(
    state: &mut MatchState,
    rules: &Rules<'_>,
    owner: Side,
    deck: DeckKind,
) -> TableResult<Option<CardInstance>> {
    rules.check_ordered(deck.zone())?;
    let Some(top) = state.zones.top(owner, deck.zone()) else {
        return Ok(None);
    };
    let id = top.id;
    let destination = deck.draw_destination();
    rules.check_entry(&top.catalogue_id, destination)?;

    let position = state.zones.next_position(owner, destination);
    let card = state.card_mut(id)?;
    card.place(destination, position, None);
    card.face_up = true;
    Ok(Some(card.clone()))
}

/// The top card of a deck, without touching it.
#[must_use]
pub fn peek(state: &MatchState, owner: Side, deck: DeckKind) -> Option<CardInstance> {
    state.zones.top(owner, deck.zone()).cloned()
}

/// Up to `count` cards from the top of a deck, top first.
#[must_use]
pub fn peek_many(state: &MatchState, owner: Side, deck: DeckKind, count: usize) -> Vec<CardInstance> {
    let pile = state.zones.pile(owner, deck.zone());
    pile.into_iter().rev().take(count).cloned().collect()
}

/// Return one card to the bottom of its owner's deck, face down and ready.
pub fn recycle_one(
    state: &mut MatchState,
    rules: &Rules<'_>,
    owner: Side,
    instance: InstanceId,
    into: DeckKind,
) -> TableResult<CardInstance> {
    let card = state.card(instance)?;
    if card.owner() != owner {
        return Err(TableError::invalid(format!(
            "{instance} belongs to {}, not {owner}",
            card.owner()
        )));
    }
    rules.check_ordered(into.zone())?;
    rules.check_entry(&card.catalogue_id, into.zone())?;

    let position = state.zones.bottom_position(owner, into.zone());
    let card = state.card_mut(instance)?;
    card.place(into.zone(), position, None);
    card.reset_for_deck();
    Ok(card.clone())
}

/// Return every card in one of the owner's zones to the bottom of a deck.
///
/// Cards go in ascending position order, each below the previous one, so
/// the former bottom of `from` ends up nearest the deck's original
/// cards. Returns the moved ids in that order.
pub fn recycle_all(
    state: &mut MatchState,
    rules: &Rules<'_>,
    owner: Side,
    from: Zone,
    into: DeckKind,
) -> TableResult<Vec<InstanceId>> {
    if from == into.zone() {
        return Err(TableError::invalid(format!("cannot recycle {from} into itself")));
    }
    rules.check_ordered(into.zone())?;

    let ids = state.zones.pile_ids(owner, from);
    for &id in &ids {
        rules.check_entry(&state.card(id)?.catalogue_id, into.zone())?;
        let position = state.zones.bottom_position(owner, into.zone());
        let card = state.card_mut(id)?;
        card.place(into.zone(), position, None);
        card.reset_for_deck();
    }
    Ok(ids)
}

/// Delete a card permanently.
pub fn remove_card(state: &mut MatchState, instance: InstanceId) -> TableResult<CardInstance> {
    let card = state.card(instance)?.clone();
    state.zones.remove(instance);
    state.aggregate.forget_battleground(instance);
    Ok(card)
}

/// Randomly reorder one pile. Returns the pile size.
pub fn shuffle(state: &mut MatchState, owner: Side, zone: Zone) -> usize {
    let MatchState { zones, rng, .. } = state;
    zones.shuffle_pile(owner, zone, rng)
}

/// Delete every card in the match. Scores, battleground selections and
/// deck references are left for the caller to re-initialize.
pub fn reset(state: &mut MatchState) -> usize {
    state.zones.clear()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardRegistry};
    use crate::core::entity::MatchId;
    use crate::core::rng::GameRng;

    fn registry() -> CardRegistry {
        [
            CardDefinition::new("UNIT-1", "Vi", CardKind::Unit),
            CardDefinition::new("UNIT-2", "Annie", CardKind::Unit),
            CardDefinition::new("RUNE-1", "Fury Rune", CardKind::BasicRune),
            CardDefinition::new("SPELL-1", "Blast", CardKind::Spell),
            CardDefinition::new("TOKEN-1", "Recruit", CardKind::TokenUnit),
            CardDefinition::new("BF-1", "Sunken Temple", CardKind::Battlefield),
        ]
        .into_iter()
        .collect()
    }

    struct Fixture {
        config: TableConfig,
        registry: CardRegistry,
        state: MatchState,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                config: TableConfig::default(),
                registry: registry(),
                state: MatchState::new(MatchId::random(), GameRng::new(9)),
            }
        }

        fn add(&mut self, owner: Side, zone: Zone, id: &str) -> CardInstance {
            let rules = Rules::new(&self.config, &self.registry);
            add_card(
                &mut self.state,
                &rules,
                owner,
                zone,
                CatalogueId::new(id),
                PlacementOptions::default(),
            )
            .unwrap()
        }

        fn run<T>(&mut self, f: impl FnOnce(&mut MatchState, &Rules<'_>) -> T) -> T {
            let rules = Rules::new(&self.config, &self.registry);
            f(&mut self.state, &rules)
        }
    }

    #[test]
    fn test_add_rejects_non_rune_in_runes() {
        let mut fx = Fixture::new();
        let err = fx
            .run(|s, r| {
                add_card(s, r, Side::Red, Zone::Runes, CatalogueId::new("UNIT-1"), PlacementOptions::default())
            })
            .unwrap_err();

        assert!(matches!(err, TableError::InvalidTransition(_)));
        fx.add(Side::Red, Zone::Runes, "RUNE-1");
    }

    #[test]
    fn test_add_unknown_card_to_restricted_zone() {
        let mut fx = Fixture::new();
        let err = fx
            .run(|s, r| {
                add_card(s, r, Side::Red, Zone::RuneDeck, CatalogueId::new("NOPE"), PlacementOptions::default())
            })
            .unwrap_err();
        assert!(matches!(err, TableError::CardNotFound(_)));

        // Unrestricted zones do not consult the catalogue.
        fx.add(Side::Red, Zone::Base, "NOPE");
    }

    #[test]
    fn test_move_keeps_owner_and_sets_side() {
        let mut fx = Fixture::new();
        let card = fx.add(Side::Red, Zone::Hand, "UNIT-1");

        let outcome = fx
            .run(|s, r| {
                move_card(s, r, MoveRequest::new(card.id, Zone::Battlefield).on_side(Side::Blue))
            })
            .unwrap();

        let moved = outcome.card();
        assert!(!outcome.is_removed());
        assert_eq!(moved.owner(), Side::Red);
        assert_eq!(moved.zone, Zone::Battlefield);
        assert_eq!(moved.battlefield_side, Some(Side::Blue));
    }

    #[test]
    fn test_move_stale_from_zone_rejected() {
        let mut fx = Fixture::new();
        let card = fx.add(Side::Red, Zone::Hand, "UNIT-1");

        let err = fx
            .run(|s, r| move_card(s, r, MoveRequest::new(card.id, Zone::Base).from(Zone::Trash)))
            .unwrap_err();

        assert!(matches!(err, TableError::InvalidTransition(_)));
    }

    #[test]
    fn test_move_token_to_trash_removes() {
        let mut fx = Fixture::new();
        let token = fx.add(Side::Blue, Zone::Base, "TOKEN-1");

        let outcome = fx
            .run(|s, r| move_card(s, r, MoveRequest::new(token.id, Zone::Trash)))
            .unwrap();

        assert!(outcome.is_removed());
        assert!(!fx.state.zones.contains(token.id));
    }

    #[test]
    fn test_move_into_same_zone_goes_on_top() {
        let mut fx = Fixture::new();
        let first = fx.add(Side::Red, Zone::Base, "UNIT-1");
        let second = fx.add(Side::Red, Zone::Base, "UNIT-2");

        fx.run(|s, r| move_card(s, r, MoveRequest::new(first.id, Zone::Base)))
            .unwrap();

        assert_eq!(fx.state.zones.pile_ids(Side::Red, Zone::Base), vec![second.id, first.id]);
    }

    #[test]
    fn test_flip_twice_is_noop() {
        let mut fx = Fixture::new();
        let card = fx.add(Side::Red, Zone::Base, "UNIT-1");

        flip(&mut fx.state, card.id).unwrap();
        assert!(fx.state.card(card.id).unwrap().face_up);
        flip(&mut fx.state, card.id).unwrap();
        assert_eq!(fx.state.card(card.id).unwrap(), &card);
    }

    #[test]
    fn test_exhaust_rejects_spells() {
        let mut fx = Fixture::new();
        let unit = fx.add(Side::Red, Zone::Base, "UNIT-1");
        let spell = fx.add(Side::Red, Zone::Base, "SPELL-1");

        assert!(fx.run(|s, r| exhaust(s, r, unit.id)).unwrap().exhausted);
        assert!(fx.run(|s, r| exhaust(s, r, spell.id)).is_err());
        assert!(!fx.state.card(spell.id).unwrap().exhausted);
    }

    #[test]
    fn test_temp_might_set_and_clear() {
        let mut fx = Fixture::new();
        let card = fx.add(Side::Red, Zone::Base, "UNIT-1");

        assert_eq!(set_temp_might(&mut fx.state, card.id, Some(0)).unwrap().temp_might, Some(0));
        assert_eq!(set_temp_might(&mut fx.state, card.id, None).unwrap().temp_might, None);
    }

    #[test]
    fn test_draw_takes_top() {
        let mut fx = Fixture::new();
        fx.add(Side::Red, Zone::RuneDeck, "RUNE-1");
        let top = fx.add(Side::Red, Zone::RuneDeck, "RUNE-1");

        let peeked = peek(&fx.state, Side::Red, DeckKind::Rune).unwrap();
        assert_eq!(peeked, top);

        let drawn = fx
            .run(|s, r| draw(s, r, Side::Red, DeckKind::Rune))
            .unwrap()
            .unwrap();
        assert_eq!(drawn.id, top.id);
        assert_eq!(drawn.zone, Zone::Runes);
        assert!(drawn.face_up);
    }

    #[test]
    fn test_draw_empty_is_none() {
        let mut fx = Fixture::new();
        let drawn = fx.run(|s, r| draw(s, r, Side::Blue, DeckKind::Main)).unwrap();
        assert!(drawn.is_none());
        assert!(peek(&fx.state, Side::Blue, DeckKind::Main).is_none());
    }

    #[test]
    fn test_peek_many_top_first() {
        let mut fx = Fixture::new();
        let ids: Vec<_> = (0..4).map(|_| fx.add(Side::Red, Zone::MainDeck, "UNIT-1").id).collect();

        let seen: Vec<_> = peek_many(&fx.state, Side::Red, DeckKind::Main, 2)
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(seen, vec![ids[3], ids[2]]);
        assert_eq!(peek_many(&fx.state, Side::Red, DeckKind::Main, 10).len(), 4);
    }

    #[test]
    fn test_recycle_one_goes_to_bottom() {
        let mut fx = Fixture::new();
        fx.add(Side::Red, Zone::MainDeck, "UNIT-1");
        let card = fx.add(Side::Red, Zone::Hand, "UNIT-2");
        flip(&mut fx.state, card.id).unwrap();

        let recycled = fx
            .run(|s, r| recycle_one(s, r, Side::Red, card.id, DeckKind::Main))
            .unwrap();

        assert_eq!(recycled.zone, Zone::MainDeck);
        assert!(!recycled.face_up);
        assert_eq!(fx.state.zones.pile_ids(Side::Red, Zone::MainDeck)[0], card.id);
    }

    #[test]
    fn test_recycle_one_checks_owner() {
        let mut fx = Fixture::new();
        let card = fx.add(Side::Red, Zone::Hand, "UNIT-1");

        let err = fx
            .run(|s, r| recycle_one(s, r, Side::Blue, card.id, DeckKind::Main))
            .unwrap_err();
        assert!(matches!(err, TableError::InvalidTransition(_)));
    }

    #[test]
    fn test_recycle_all_rejects_same_zone() {
        let mut fx = Fixture::new();
        let err = fx
            .run(|s, r| recycle_all(s, r, Side::Red, Zone::MainDeck, DeckKind::Main))
            .unwrap_err();
        assert!(matches!(err, TableError::InvalidTransition(_)));
    }

    #[test]
    fn test_recycle_all_stops_on_rejected_card() {
        let mut fx = Fixture::new();
        fx.add(Side::Red, Zone::Trash, "RUNE-1");
        fx.add(Side::Red, Zone::Trash, "UNIT-1");

        // The unit cannot enter the rune deck; the caller discards the state.
        let result = fx.run(|s, r| recycle_all(s, r, Side::Red, Zone::Trash, DeckKind::Rune));
        assert!(result.is_err());
    }

    #[test]
    fn test_unordered_deck_has_no_top_or_bottom() {
        let mut fx = Fixture::new();
        fx.config = TableConfig::default()
            .with_zone(crate::core::config::ZoneConfig::new(Zone::MainDeck).hidden());
        let card = fx.add(Side::Red, Zone::MainDeck, "UNIT-1");
        let other = fx.add(Side::Red, Zone::Hand, "UNIT-2");

        let err = fx.run(|s, r| draw(s, r, Side::Red, DeckKind::Main)).unwrap_err();
        assert!(matches!(err, TableError::InvalidTransition(_)));
        let err = fx
            .run(|s, r| recycle_one(s, r, Side::Red, other.id, DeckKind::Main))
            .unwrap_err();
        assert!(matches!(err, TableError::InvalidTransition(_)));
        assert!(fx
            .run(|s, r| recycle_all(s, r, Side::Red, Zone::Hand, DeckKind::Main))
            .is_err());

        assert_eq!(fx.state.card(card.id).unwrap().zone, Zone::MainDeck);
    }

    #[test]
    fn test_remove_forgets_battleground() {
        let mut fx = Fixture::new();
        let ground = fx.add(Side::Red, Zone::Battlefield, "BF-1");
        fx.state.aggregate.set_active_battleground(Side::Red, Some(ground.id));

        remove_card(&mut fx.state, ground.id).unwrap();

        assert_eq!(fx.state.aggregate.active_battlegrounds[Side::Red], None);
        assert!(remove_card(&mut fx.state, ground.id).is_err());
    }

    #[test]
    fn test_reset_clears_cards_only() {
        let mut fx = Fixture::new();
        fx.add(Side::Red, Zone::Hand, "UNIT-1");
        fx.add(Side::Blue, Zone::Hand, "UNIT-2");
        fx.state.aggregate.scores[Side::Red] = 4;

        assert_eq!(reset(&mut fx.state), 2);
        assert!(fx.state.zones.is_empty());
        assert_eq!(fx.state.aggregate.scores[Side::Red], 4);
    }
}
