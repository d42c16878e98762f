//! Card instances - one physical token on the table.
//!
//! A `CardInstance` tracks where a token sits and how it is turned: zone,
//! position in the owner's pile for that zone, face orientation,
//! exhaustion, battlefield sub-area and temporary might modifier.
//!
//! ## Ownership
//!
//! The owner is fixed at creation and has no setter. A card sitting on the
//! opponent's half of the battlefield is still owned by whoever brought
//! it; only `battlefield_side` records where it physically is.

use serde::{Deserialize, Serialize};

use super::definition::CatalogueId;
use crate::core::entity::InstanceId;
use crate::core::player::Side;
use crate::zones::Zone;

/// A card token in a live match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Stable identifier, never reused within the match.
    pub id: InstanceId,

    /// Reference to the catalogue entry.
    pub catalogue_id: CatalogueId,

    owner: Side,

    pub zone: Zone,

    /// Order key within the (owner, zone) pile. Higher is closer to the top.
    pub position: i64,

    pub face_up: bool,

    pub exhausted: bool,

    /// Battlefield sub-area, present exactly while `zone` is the battlefield.
    pub battlefield_side: Option<Side>,

    /// Temporary might modifier. `None` means no modifier.
    pub temp_might: Option<i32>,
}

impl CardInstance {
    /// Create a card instance, face down and ready.
    ///
    /// A card created directly on the battlefield sits on its owner's half.
    #[must_use]
    pub fn new(
        id: InstanceId,
        catalogue_id: CatalogueId,
        owner: Side,
        zone: Zone,
        position: i64,
    ) -> Self {
        Self {
            id,
            catalogue_id,
            owner,
            zone,
            position,
            face_up: false,
            exhausted: false,
            battlefield_side: (zone == Zone::Battlefield).then_some(owner),
            temp_might: None,
        }
    }

    #[must_use]
    pub fn owner(&self) -> Side {
        self.owner
    }

    /// Check whether this card is in `owner`'s pile for `zone`.
    #[must_use]
    pub fn is_in(&self, owner: Side, zone: Zone) -> bool {
        self.owner == owner && self.zone == zone
    }

    /// Relocate the card, keeping the battlefield side consistent with the zone.
    ///
    /// Entering the battlefield without an explicit side places the card on
    /// its owner's half; leaving it clears the side.
    pub fn place(&mut self, zone: Zone, position: i64, battlefield_side: Option<Side>) {
        self.zone = zone;
        self.position = position;
        self.battlefield_side = if zone == Zone::Battlefield {
            Some(battlefield_side.unwrap_or(self.owner))
        } else {
            None
        };
    }

    /// Turn the card face down and ready, as it is when returned to a deck.
    pub fn reset_for_deck(&mut self) {
        self.face_up = false;
        self.exhausted = false;
    }
}
