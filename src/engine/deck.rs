//! Deck loading: placing a resolved deck list onto one side of the table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalogue, CardDefinition, CardKind, CatalogueId};
use crate::core::error::TableResult;
use crate::core::player::Side;
use crate::matches::MatchState;
use crate::zones::Zone;

use super::battlefield::reorder_battlefield;
use super::transitions::Rules;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    /// Full catalogue id, or the set-and-number prefix without the
    /// collector suffix.
    pub catalogue_id: CatalogueId,
    pub quantity: u32,
}

/// A deck to load, already parsed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckList {
    /// Recorded on the match as the side's deck selection.
    pub reference: String,
    pub entries: Vec<DeckEntry>,
}

impl DeckList {
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, catalogue_id: impl Into<CatalogueId>, quantity: u32) -> Self {
        self.entries.push(DeckEntry {
            catalogue_id: catalogue_id.into(),
            quantity,
        });
        self
    }

    #[must_use]
    pub fn total_cards(&self) -> u32 {
        self.entries.iter().map(|e| e.quantity).sum()
    }
}

/// What `load_deck` did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckLoadReport {
    /// Cards the side had before loading, all deleted.
    pub removed: usize,
    /// Cards created, per zone.
    pub placed: BTreeMap<Zone, usize>,
    /// Legends beyond the first.
    pub skipped: Vec<CatalogueId>,
    /// Entries the catalogue could not resolve.
    pub unknown: Vec<CatalogueId>,
}

impl DeckLoadReport {
    #[must_use]
    pub fn placed_in(&self, zone: Zone) -> usize {
        self.placed.get(&zone).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total_placed(&self) -> usize {
        self.placed.values().sum()
    }
}

/// Replace a side's cards with a deck.
///
/// Placement by kind:
/// - first legend: `legend`, face up (later legends are skipped)
/// - first champion unit: one copy to `champion` face up, the rest to
///   `main-deck`
/// - basic runes: `rune-deck`
/// - battlefields: `battlefield`, face up
/// - everything else: `main-deck`, face down
///
/// Both decks are shuffled afterwards.
pub fn load_deck(
    state: &mut MatchState,
    rules: &Rules<'_>,
    side: Side,
    deck: &DeckList,
) -> TableResult<DeckLoadReport> {
    let mut report = DeckLoadReport {
        removed: state.zones.clear_side(side),
        ..DeckLoadReport::default()
    };
    prune_battlegrounds(state);

    let mut legend_placed = false;
    let mut champion_placed = false;

    for entry in deck.entries.iter().filter(|e| e.quantity > 0) {
        let Some(card) = resolve_entry(rules.catalogue, &entry.catalogue_id) else {
            report.unknown.push(entry.catalogue_id.clone());
            continue;
        };
        let mut placer = Placer {
            state: &mut *state,
            rules,
            side,
            card,
            report: &mut report,
        };

        match card.kind {
            kind if kind.is_legend() => {
                if legend_placed {
                    placer.report.skipped.push(card.id.clone());
                    continue;
                }
                legend_placed = true;
                placer.put(Zone::Legend, true, entry.quantity)?;
            }
            CardKind::ChampionUnit if !champion_placed => {
                champion_placed = true;
                placer.put(Zone::MainDeck, false, entry.quantity - 1)?;
                placer.put(Zone::Champion, true, 1)?;
            }
            CardKind::BasicRune => placer.put(Zone::RuneDeck, false, entry.quantity)?,
            CardKind::Battlefield => placer.put(Zone::Battlefield, true, entry.quantity)?,
            _ => placer.put(Zone::MainDeck, false, entry.quantity)?,
        }
    }

    if report.placed_in(Zone::Battlefield) > 0 {
        reorder_battlefield(state, rules, side);
    }
    let MatchState { zones, rng, .. } = &mut *state;
    zones.shuffle_pile(side, Zone::MainDeck, rng);
    zones.shuffle_pile(side, Zone::RuneDeck, rng);

    state.aggregate.decks[side] = Some(deck.reference.clone());
    Ok(report)
}

fn resolve_entry<'c>(catalogue: &'c dyn CardCatalogue, id: &CatalogueId) -> Option<&'c CardDefinition> {
    catalogue
        .lookup(id)
        .or_else(|| catalogue.lookup_prefix(id.prefix()))
}

/// Clear battleground selections whose instance no longer exists.
fn prune_battlegrounds(state: &mut MatchState) {
    for side in Side::ALL {
        if let Some(id) = state.aggregate.active_battlegrounds[side] {
            if !state.zones.contains(id) {
                state.aggregate.active_battlegrounds[side] = None;
            }
        }
    }
}

struct Placer<'s, 'r, 'c> {
    state: &'s mut MatchState,
    rules: &'r Rules<'c>,
    side: Side,
    card: &'c CardDefinition,
    report: &'s mut DeckLoadReport,
}

impl Placer<'_, '_, '_> {
    fn put(&mut self, zone: Zone, face_up: bool, copies: u32) -> TableResult<()> {
        if copies == 0 {
            return Ok(());
        }
        self.rules.check_entry(&self.card.id, zone)?;
        for _ in 0..copies {
            let id = self.state.zones.create(self.side, zone, self.card.id.clone()).id;
            self.state.card_mut(id)?.face_up = face_up;
        }
        *self.report.placed.entry(zone).or_default() += copies as usize;
        Ok(())
    }
}
