//! Card instance store for one match.
//!
//! The `ZoneManager` is the authoritative table of every instance in play:
//! - Lookup by `InstanceId`
//! - Pile queries per (owner, zone), ordered by position
//! - Instance id allocation (monotonic, survives `clear`)
//!
//! Backed by `im::OrdMap` so a match transaction can clone the whole store
//! in O(1), mutate the copy and commit it by swapping.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::cards::{CardInstance, CatalogueId};
use crate::core::entity::InstanceId;
use crate::core::player::Side;
use crate::zones::Zone;

/// Stores card instances and answers pile queries.
///
/// ## Usage
///
/// ```
/// use rift_table::cards::CatalogueId;
/// use rift_table::core::Side;
/// use rift_table::zones::{Zone, ZoneManager};
///
/// let mut zones = ZoneManager::new();
///
/// let bottom = zones.create(Side::Red, Zone::MainDeck, CatalogueId::new("OGN-001"));
/// let top = zones.create(Side::Red, Zone::MainDeck, CatalogueId::new("OGN-002"));
///
/// assert_eq!(zones.top(Side::Red, Zone::MainDeck).map(|c| c.id), Some(top.id));
/// assert_eq!(zones.pile_len(Side::Red, Zone::MainDeck), 2);
/// assert!(bottom.position < top.position);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneManager {
    cards: OrdMap<InstanceId, CardInstance>,

    /// Next instance id to hand out.
    next_id: u32,
}

impl ZoneManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh instance id.
    pub fn alloc_id(&mut self) -> InstanceId {
        let id = InstanceId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create a new instance on top of the (owner, zone) pile.
    pub fn create(&mut self, owner: Side, zone: Zone, catalogue_id: CatalogueId) -> CardInstance {
        let id = self.alloc_id();
        let position = self.next_position(owner, zone);
        let card = CardInstance::new(id, catalogue_id, owner, zone, position);
        self.cards.insert(id, card.clone());
        card
    }

    #[must_use]
    pub fn get(&self, id: InstanceId) -> Option<&CardInstance> {
        self.cards.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: InstanceId) -> Option<&mut CardInstance> {
        self.cards.get_mut(&id)
    }

    /// Delete an instance permanently.
    pub fn remove(&mut self, id: InstanceId) -> Option<CardInstance> {
        self.cards.remove(&id)
    }

    #[must_use]
    pub fn contains(&self, id: InstanceId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Total number of instances in play.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all instances in id order.
    pub fn iter(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards.values()
    }

    /// Instances in the (owner, zone) pile, bottom first.
    ///
    /// Ties on position (which the store never produces) fall back to id
    /// order so the result is always deterministic.
    #[must_use]
    pub fn pile(&self, owner: Side, zone: Zone) -> Vec<&CardInstance> {
        let mut pile: Vec<_> = self.cards.values().filter(|c| c.is_in(owner, zone)).collect();
        pile.sort_by_key(|c| (c.position, c.id));
        pile
    }

    /// Ids in the (owner, zone) pile, bottom first.
    #[must_use]
    pub fn pile_ids(&self, owner: Side, zone: Zone) -> Vec<InstanceId> {
        self.pile(owner, zone).into_iter().map(|c| c.id).collect()
    }

    #[must_use]
    pub fn pile_len(&self, owner: Side, zone: Zone) -> usize {
        self.cards.values().filter(|c| c.is_in(owner, zone)).count()
    }

    /// The card with the highest position in the pile.
    #[must_use]
    pub fn top(&self, owner: Side, zone: Zone) -> Option<&CardInstance> {
        self.cards
            .values()
            .filter(|c| c.is_in(owner, zone))
            .max_by_key(|c| (c.position, c.id))
    }

    /// Delete every instance owned by `owner`. Returns how many were removed.
    pub fn clear_side(&mut self, owner: Side) -> usize {
        let doomed: Vec<_> = self
            .cards
            .values()
            .filter(|c| c.owner() == owner)
            .map(|c| c.id)
            .collect();
        for id in &doomed {
            self.cards.remove(id);
        }
        doomed.len()
    }

    /// Delete every instance. The id counter keeps running.
    pub fn clear(&mut self) -> usize {
        let removed = self.cards.len();
        self.cards = OrdMap::new();
        removed
    }

    /// Find two instances sharing an (owner, zone, position) slot.
    ///
    /// The store never produces such a pair; this exists for assertions.
    #[must_use]
    pub fn position_conflict(&self) -> Option<(InstanceId, InstanceId)> {
        let mut seen = rustc_hash::FxHashMap::default();
        for card in self.cards.values() {
            let key = (card.owner(), card.zone, card.position);
            if let Some(&other) = seen.get(&key) {
                return Some((other, card.id));
            }
            seen.insert(key, card.id);
        }
        None
    }
}
