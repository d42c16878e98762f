//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use rift_table::cards::{CardDefinition, CardKind, CardRegistry, CatalogueId};
use rift_table::core::{MatchId, Side, TableConfig};
use rift_table::engine::{BoardEngine, MatchSetup, PlacementOptions};
use rift_table::zones::Zone;

pub const UNIT: &str = "OGN-169/298";
pub const OTHER_UNIT: &str = "OGN-041/298";
pub const RUNE: &str = "OGN-007/298";
pub const SPELL: &str = "OGN-012/298";
pub const TOKEN: &str = "OGN-TKN/298";
pub const GROUND: &str = "OGN-296/298";

/// A small catalogue covering every kind the tests exercise.
pub fn catalogue() -> CardRegistry {
    [
        CardDefinition::new(UNIT, "Flame Chompers", CardKind::Unit).with_attr("might", 3i32),
        CardDefinition::new(OTHER_UNIT, "Annie, Fiery", CardKind::Unit).with_attr("might", 2i32),
        CardDefinition::new(RUNE, "Fury Rune", CardKind::BasicRune),
        CardDefinition::new(SPELL, "Incinerate", CardKind::Spell),
        CardDefinition::new(TOKEN, "Recruit", CardKind::TokenUnit),
        CardDefinition::new(GROUND, "Monastery of Hirana", CardKind::Battlefield),
    ]
    .into_iter()
    .collect()
}

pub fn engine() -> BoardEngine {
    engine_with(TableConfig::default().with_seed(42))
}

pub fn engine_with(config: TableConfig) -> BoardEngine {
    BoardEngine::new(Arc::new(catalogue()), config).expect("default config is valid")
}

pub fn new_match(engine: &BoardEngine) -> MatchId {
    engine
        .create_match(MatchSetup::default())
        .expect("fresh match id")
        .value
        .id
}

/// Put `count` face-down copies of `card` on top of a pile.
pub fn fill(engine: &BoardEngine, id: MatchId, side: Side, zone: Zone, card: &str, count: usize) {
    for _ in 0..count {
        engine
            .add_card(id, side, zone, CatalogueId::new(card), PlacementOptions::default())
            .expect("card accepted");
    }
}
