//! Position sequencing within (owner, zone) piles.
//!
//! Positions are plain integers compared only within one pile. Higher is
//! closer to the top. `next_position` appends to the top (max + 1),
//! `bottom_position` appends to the bottom (min - 1), so ordinary inserts
//! never renumber the rest of the pile. Only `shuffle_pile` and
//! `renumber_pile` rewrite a whole pile, and both assign a dense `0..n`.

use crate::core::entity::InstanceId;
use crate::core::player::Side;
use crate::core::rng::GameRng;
use crate::zones::{Zone, ZoneManager};

impl ZoneManager {
    /// A position strictly above every card in the pile; `0` when empty.
    #[must_use]
    pub fn next_position(&self, owner: Side, zone: Zone) -> i64 {
        self.iter()
            .filter(|c| c.is_in(owner, zone))
            .map(|c| c.position)
            .max()
            .map_or(0, |max| max + 1)
    }

    /// A position strictly below every card in the pile; `-1` when empty.
    #[must_use]
    pub fn bottom_position(&self, owner: Side, zone: Zone) -> i64 {
        self.iter()
            .filter(|c| c.is_in(owner, zone))
            .map(|c| c.position)
            .min()
            .map_or(-1, |min| min - 1)
    }

    /// Assign every card in the pile a position from a uniform random
    /// permutation of `0..count`. Membership and every other field stay put.
    ///
    /// Returns the pile size.
    pub fn shuffle_pile(&mut self, owner: Side, zone: Zone, rng: &mut GameRng) -> usize {
        let ids = self.pile_ids(owner, zone);
        let mut positions: Vec<i64> = (0..ids.len() as i64).collect();
        rng.shuffle(&mut positions);

        for (id, position) in ids.iter().zip(positions) {
            if let Some(card) = self.get_mut(*id) {
                card.position = position;
            }
        }
        ids.len()
    }

    /// Rewrite positions as `0..n` following the given order, bottom first.
    ///
    /// `order` must list exactly the members of one pile.
    pub(crate) fn renumber_pile(&mut self, order: &[InstanceId]) {
        for (position, id) in order.iter().enumerate() {
            if let Some(card) = self.get_mut(*id) {
                card.position = position as i64;
            }
        }
    }
}
