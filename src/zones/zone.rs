//! The fixed set of board zones and the two drawable decks.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A named compartment holding card instances for one side.
///
/// The battlefield is the one zone whose cards may sit in the opponent's
/// sub-area; every other zone belongs exclusively to its owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Zone {
    Legend,
    Champion,
    Base,
    Battlefield,
    MainDeck,
    RuneDeck,
    Runes,
    Hand,
    Trash,
}

impl Zone {
    pub const ALL: [Zone; 9] = [
        Zone::Legend,
        Zone::Champion,
        Zone::Base,
        Zone::Battlefield,
        Zone::MainDeck,
        Zone::RuneDeck,
        Zone::Runes,
        Zone::Hand,
        Zone::Trash,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Zone::Legend => "legend",
            Zone::Champion => "champion",
            Zone::Base => "base",
            Zone::Battlefield => "battlefield",
            Zone::MainDeck => "main-deck",
            Zone::RuneDeck => "rune-deck",
            Zone::Runes => "runes",
            Zone::Hand => "hand",
            Zone::Trash => "trash",
        }
    }

    /// The deck this zone is, if it is one.
    #[must_use]
    pub const fn as_deck(self) -> Option<DeckKind> {
        match self {
            Zone::MainDeck => Some(DeckKind::Main),
            Zone::RuneDeck => Some(DeckKind::Rune),
            _ => None,
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A zone name that matches none of the nine zones.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown zone: {0}")]
pub struct UnknownZone(pub String);

impl FromStr for Zone {
    type Err = UnknownZone;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept the underscore spelling older clients send.
        let normalized = s.replace('_', "-");
        Zone::ALL
            .into_iter()
            .find(|zone| zone.as_str() == normalized)
            .ok_or_else(|| UnknownZone(s.to_owned()))
    }
}

/// A drawable pile. Each deck feeds a fixed destination zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeckKind {
    Main,
    Rune,
}

impl DeckKind {
    /// Zone holding this deck's pile.
    #[must_use]
    pub const fn zone(self) -> Zone {
        match self {
            DeckKind::Main => Zone::MainDeck,
            DeckKind::Rune => Zone::RuneDeck,
        }
    }

    /// Where a drawn card lands: main deck to hand, rune deck to runes.
    #[must_use]
    pub const fn draw_destination(self) -> Zone {
        match self {
            DeckKind::Main => Zone::Hand,
            DeckKind::Rune => Zone::Runes,
        }
    }
}

impl std::fmt::Display for DeckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.zone().as_str())
    }
}
