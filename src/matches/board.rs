//! Read models: per-side zone listings and the full board snapshot used to
//! re-sync a client after reconnecting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::aggregate::MatchStatus;
use super::state::MatchState;
use crate::cards::{CardInstance, CatalogueId};
use crate::core::config::{TableConfig, ZoneVisibility};
use crate::core::entity::{InstanceId, MatchId};
use crate::core::player::{Side, SideMap};
use crate::zones::Zone;

/// Every zone of one side, each pile ordered bottom first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SideBoard {
    pub side: Side,
    pub zones: BTreeMap<Zone, Vec<CardInstance>>,
}

impl SideBoard {
    /// Collect a side's piles. All nine zones are present, possibly empty.
    #[must_use]
    pub fn build(state: &MatchState, side: Side) -> Self {
        let zones = Zone::ALL
            .into_iter()
            .map(|zone| {
                let pile = state.zones.pile(side, zone).into_iter().cloned().collect();
                (zone, pile)
            })
            .collect();
        Self { side, zones }
    }

    #[must_use]
    pub fn zone(&self, zone: Zone) -> &[CardInstance] {
        self.zones.get(&zone).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn count(&self, zone: Zone) -> usize {
        self.zone(zone).len()
    }

    /// Total cards this side owns.
    #[must_use]
    pub fn total(&self) -> usize {
        self.zones.values().map(Vec::len).sum()
    }

    /// The board as `viewer` may see it.
    ///
    /// Owners see their public and owner-only zones in full. Everyone else
    /// only sees face-up cards in public zones. Hidden zones reveal nothing
    /// to anyone.
    #[must_use]
    pub fn redacted_for(&self, viewer: Side, config: &TableConfig) -> RedactedSide {
        let zones = self
            .zones
            .iter()
            .map(|(&zone, pile)| {
                let visibility = config.visibility(zone);
                let views = pile
                    .iter()
                    .map(|card| CardView::of(card, card_visible(card, viewer, visibility)))
                    .collect();
                (zone, views)
            })
            .collect();
        RedactedSide {
            side: self.side,
            zones,
        }
    }
}

fn card_visible(card: &CardInstance, viewer: Side, visibility: ZoneVisibility) -> bool {
    let owns = card.owner() == viewer;
    match visibility {
        ZoneVisibility::Public => card.face_up || owns,
        ZoneVisibility::OwnerOnly => owns,
        ZoneVisibility::Hidden => false,
    }
}

/// A card as shown to a particular viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: InstanceId,
    /// `None` when the viewer may not see what the card is.
    pub catalogue_id: Option<CatalogueId>,
    pub owner: Side,
    pub zone: Zone,
    pub position: i64,
    pub face_up: bool,
    pub exhausted: bool,
    pub battlefield_side: Option<Side>,
    pub temp_might: Option<i32>,
}

impl CardView {
    fn of(card: &CardInstance, visible: bool) -> Self {
        Self {
            id: card.id,
            catalogue_id: visible.then(|| card.catalogue_id.clone()),
            owner: card.owner(),
            zone: card.zone,
            position: card.position,
            face_up: card.face_up,
            exhausted: card.exhausted,
            battlefield_side: card.battlefield_side,
            temp_might: card.temp_might,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RedactedSide {
    pub side: Side,
    pub zones: BTreeMap<Zone, Vec<CardView>>,
}

/// Full authoritative state of a match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub match_id: MatchId,
    pub version: u64,
    pub status: MatchStatus,
    pub scores: SideMap<i32>,
    pub active_battlegrounds: SideMap<Option<InstanceId>>,
    pub sides: SideMap<SideBoard>,
}

impl BoardSnapshot {
    #[must_use]
    pub fn build(state: &MatchState) -> Self {
        let aggregate = &state.aggregate;
        Self {
            match_id: aggregate.id,
            version: aggregate.version,
            status: aggregate.status,
            scores: aggregate.scores.clone(),
            active_battlegrounds: aggregate.active_battlegrounds.clone(),
            sides: SideMap::new(|side| SideBoard::build(state, side)),
        }
    }

    #[must_use]
    pub fn side(&self, side: Side) -> &SideBoard {
        &self.sides[side]
    }
}
