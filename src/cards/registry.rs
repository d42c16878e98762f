//! Catalogue lookup.
//!
//! The engine consumes card metadata, it does not own it. `CardCatalogue`
//! is the seam; `CardRegistry` is the in-memory implementation used by
//! tests and by hosts that load the catalogue up front.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardKind, CatalogueId};
use crate::core::error::{TableError, TableResult};

/// Read access to immutable card metadata.
pub trait CardCatalogue: Send + Sync {
    /// Find a catalogue entry by id.
    fn lookup(&self, id: &CatalogueId) -> Option<&CardDefinition>;

    /// Find a catalogue entry, reporting unknown ids as `CardNotFound`.
    fn resolve(&self, id: &CatalogueId) -> TableResult<&CardDefinition> {
        self.lookup(id)
            .ok_or_else(|| TableError::CardNotFound(id.clone()))
    }

    /// Find an entry by set-and-number prefix, for deck lists that omit the
    /// collector suffix. Catalogues without prefix search return `None`.
    fn lookup_prefix(&self, _prefix: &str) -> Option<&CardDefinition> {
        None
    }
}

/// In-memory catalogue.
///
/// ## Example
///
/// ```
/// use rift_table::cards::{CardCatalogue, CardDefinition, CardKind, CardRegistry, CatalogueId};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::new("OGN-007/298", "Fury Rune", CardKind::BasicRune));
///
/// let found = registry.lookup(&CatalogueId::new("OGN-007/298")).unwrap();
/// assert_eq!(found.name, "Fury Rune");
/// assert!(registry.find_by_prefix("OGN-007").is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CatalogueId, CardDefinition>,
}

impl CardRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition, returning any entry it replaced.
    pub fn register(&mut self, card: CardDefinition) -> Option<CardDefinition> {
        self.cards.insert(card.id.clone(), card)
    }

    /// Find the entry whose id starts with the given set-and-number prefix.
    ///
    /// Deck lists reference printings without the collector suffix. When
    /// several printings share a prefix the lowest id wins.
    #[must_use]
    pub fn find_by_prefix(&self, prefix: &str) -> Option<&CardDefinition> {
        self.cards
            .values()
            .filter(|card| card.id.prefix() == prefix)
            .min_by(|a, b| a.id.cmp(&b.id))
    }

    pub fn find_by_kind(&self, kind: CardKind) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values().filter(move |c| c.kind == kind)
    }

    #[must_use]
    pub fn contains(&self, id: &CatalogueId) -> bool {
        self.cards.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }
}

impl CardCatalogue for CardRegistry {
    fn lookup(&self, id: &CatalogueId) -> Option<&CardDefinition> {
        self.cards.get(id)
    }

    fn lookup_prefix(&self, prefix: &str) -> Option<&CardDefinition> {
        self.find_by_prefix(prefix)
    }
}

impl FromIterator<CardDefinition> for CardRegistry {
    fn from_iter<I: IntoIterator<Item = CardDefinition>>(iter: I) -> Self {
        let mut registry = Self::new();
        for card in iter {
            registry.register(card);
        }
        registry
    }
}
