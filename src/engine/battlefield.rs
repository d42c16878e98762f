//! Alphabetical ordering of a side's battlefield slice.

use crate::cards::CardInstance;
use crate::core::entity::InstanceId;
use crate::core::player::Side;
use crate::matches::MatchState;
use crate::zones::Zone;

use super::transitions::Rules;

/// Renumber the owner's battlefield pile: ordinary cards by display name,
/// then battleground cards in their existing order.
///
/// Only positions change. Zone and battlefield side are untouched, so a
/// card sitting on the opponent's half stays there. Returns the new order,
/// bottom first.
pub fn reorder_battlefield(state: &mut MatchState, rules: &Rules<'_>, owner: Side) -> Vec<InstanceId> {
    let pile = state.zones.pile(owner, Zone::Battlefield);
    let (mut cards, grounds): (Vec<&CardInstance>, Vec<&CardInstance>) = pile
        .into_iter()
        .partition(|card| !rules.is_battleground(&card.catalogue_id));

    cards.sort_by_cached_key(|card| (sort_name(rules, card), card.position, card.id));

    let order: Vec<InstanceId> = cards.iter().chain(grounds.iter()).map(|card| card.id).collect();
    state.zones.renumber_pile(&order);
    order
}

fn sort_name(rules: &Rules<'_>, card: &CardInstance) -> String {
    rules
        .catalogue
        .lookup(&card.catalogue_id)
        .map_or(card.catalogue_id.as_str(), |def| def.name.as_str())
        .to_owned()
}
