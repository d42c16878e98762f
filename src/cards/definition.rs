//! Catalogue entries - immutable card metadata.
//!
//! `CardDefinition` holds what a printed card *is*: its name, its kind and
//! its stats. Where a token currently sits on the table is stored
//! separately in `CardInstance`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::attributes::{keys, AttributeKey, AttributeValue, Attributes};

/// Catalogue identifier of a printed card, e.g. `"OGN-007/298"`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CatalogueId(pub String);

impl CatalogueId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Set-and-number prefix before the `/`, used by deck lists.
    ///
    /// ```
    /// use rift_table::cards::CatalogueId;
    ///
    /// assert_eq!(CatalogueId::new("OGN-007/298").prefix(), "OGN-007");
    /// assert_eq!(CatalogueId::new("OGN-007").prefix(), "OGN-007");
    /// ```
    #[must_use]
    pub fn prefix(&self) -> &str {
        self.0.split('/').next().unwrap_or(&self.0)
    }
}

impl From<&str> for CatalogueId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for CatalogueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Printed card kind.
///
/// Kinds drive the structural checks the engine performs: which zones a
/// card may enter, whether it can be exhausted, whether trashing it
/// deletes it, and where the battlefield sort places it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Unit,
    ChampionUnit,
    Spell,
    Gear,
    BasicRune,
    Legend,
    ChampionLegend,
    SignatureSpell,
    SignatureUnit,
    TokenUnit,
    Battlefield,
}

impl CardKind {
    pub const ALL: [CardKind; 11] = [
        CardKind::Unit,
        CardKind::ChampionUnit,
        CardKind::Spell,
        CardKind::Gear,
        CardKind::BasicRune,
        CardKind::Legend,
        CardKind::ChampionLegend,
        CardKind::SignatureSpell,
        CardKind::SignatureUnit,
        CardKind::TokenUnit,
        CardKind::Battlefield,
    ];

    /// Label as printed on the card type line.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            CardKind::Unit => "Unit",
            CardKind::ChampionUnit => "Champion Unit",
            CardKind::Spell => "Spell",
            CardKind::Gear => "Gear",
            CardKind::BasicRune => "Basic Rune",
            CardKind::Legend => "Legend",
            CardKind::ChampionLegend => "Champion Legend",
            CardKind::SignatureSpell => "Signature Spell",
            CardKind::SignatureUnit => "Signature Unit",
            CardKind::TokenUnit => "Token Unit",
            CardKind::Battlefield => "Battlefield",
        }
    }

    #[must_use]
    pub const fn is_legend(self) -> bool {
        matches!(self, CardKind::Legend | CardKind::ChampionLegend)
    }
}

impl FromStr for CardKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardKind::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown card kind: {s}"))
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Static catalogue entry.
///
/// ## Example
///
/// ```
/// use rift_table::cards::{CardDefinition, CardKind};
///
/// let unit = CardDefinition::new("OGN-169/298", "Flame Chompers", CardKind::Unit)
///     .with_attr("energy", 2i32)
///     .with_attr("might", 3i32);
///
/// assert_eq!(unit.might(), Some(3));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CatalogueId,

    /// Display name, also the battlefield sort key.
    pub name: String,

    pub kind: CardKind,

    #[serde(default)]
    pub attributes: Attributes,
}

impl CardDefinition {
    #[must_use]
    pub fn new(id: impl Into<CatalogueId>, name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            attributes: Attributes::default(),
        }
    }

    /// Add an attribute (builder pattern).
    #[must_use]
    pub fn with_attr(
        mut self,
        key: impl Into<AttributeKey>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(&AttributeKey::new(key))
    }

    #[must_use]
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get_attr(key).and_then(AttributeValue::as_int)
    }

    #[must_use]
    pub fn energy(&self) -> Option<i64> {
        self.get_int(keys::ENERGY)
    }

    #[must_use]
    pub fn might(&self) -> Option<i64> {
        self.get_int(keys::MIGHT)
    }
}

impl From<String> for CatalogueId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
