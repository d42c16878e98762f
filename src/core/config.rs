//! Table configuration.
//!
//! Hosts configure the engine at startup by providing:
//! - `ZoneConfig`: Per-zone ordering, visibility and acceptance predicate
//! - `TableConfig`: Zone configs plus score bounds, kind policies and seed
//!
//! The defaults describe the standard two-player table; a host can load an
//! override from JSON with `TableConfig::from_json`.

use serde::{Deserialize, Serialize};

use super::error::{TableError, TableResult};
use crate::cards::CardKind;
use crate::zones::Zone;

/// Who may see the catalogue identity of cards in a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneVisibility {
    /// Face-up cards visible to both sides (battlefield, base, trash).
    Public,
    /// Visible only to the owner (hand).
    OwnerOnly,
    /// Not visible to anyone (face-down decks).
    Hidden,
}

/// Configuration for a single zone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneConfig {
    pub zone: Zone,

    /// Is card order significant? (true for the decks).
    pub ordered: bool,

    pub visibility: ZoneVisibility,

    /// Card kinds allowed to enter. `None` accepts every kind.
    pub accepts: Option<Vec<CardKind>>,
}

impl ZoneConfig {
    /// Create a public, unordered zone accepting any kind.
    #[must_use]
    pub fn new(zone: Zone) -> Self {
        Self {
            zone,
            ordered: false,
            visibility: ZoneVisibility::Public,
            accepts: None,
        }
    }

    #[must_use]
    pub fn ordered(mut self) -> Self {
        self.ordered = true;
        self
    }

    #[must_use]
    pub fn owner_only(mut self) -> Self {
        self.visibility = ZoneVisibility::OwnerOnly;
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visibility = ZoneVisibility::Hidden;
        self
    }

    /// Restrict the zone to the given card kinds.
    #[must_use]
    pub fn accepting(mut self, kinds: impl IntoIterator<Item = CardKind>) -> Self {
        self.accepts = Some(kinds.into_iter().collect());
        self
    }

    #[must_use]
    pub fn accepts_kind(&self, kind: CardKind) -> bool {
        self.accepts
            .as_ref()
            .map_or(true, |kinds| kinds.contains(&kind))
    }
}

/// Complete engine configuration.
///
/// ## Example
///
/// ```
/// use rift_table::cards::CardKind;
/// use rift_table::core::TableConfig;
/// use rift_table::zones::Zone;
///
/// let config = TableConfig::default().with_seed(42);
///
/// assert!(config.zone_accepts(Zone::Runes, CardKind::BasicRune));
/// assert!(!config.zone_accepts(Zone::Runes, CardKind::Unit));
/// assert!(config.is_ordered(Zone::MainDeck));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub zones: Vec<ZoneConfig>,

    pub min_score: i32,
    pub max_score: i32,

    /// Kinds the exhaust toggle does not apply to.
    pub non_exhaustible: Vec<CardKind>,

    /// Kinds deleted outright instead of entering the trash.
    pub token_kinds: Vec<CardKind>,

    /// Kinds the battlefield sort keeps after everything else.
    pub battleground_kinds: Vec<CardKind>,

    /// Fixed shuffle seed. `None` seeds every match from OS entropy.
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            zones: vec![
                ZoneConfig::new(Zone::Legend),
                ZoneConfig::new(Zone::Champion),
                ZoneConfig::new(Zone::Base),
                ZoneConfig::new(Zone::Battlefield),
                ZoneConfig::new(Zone::MainDeck).ordered().hidden(),
                ZoneConfig::new(Zone::RuneDeck)
                    .ordered()
                    .hidden()
                    .accepting([CardKind::BasicRune]),
                ZoneConfig::new(Zone::Runes).accepting([CardKind::BasicRune]),
                ZoneConfig::new(Zone::Hand).owner_only(),
                ZoneConfig::new(Zone::Trash),
            ],
            min_score: 0,
            max_score: 9,
            non_exhaustible: vec![CardKind::Spell, CardKind::SignatureSpell],
            token_kinds: vec![CardKind::TokenUnit],
            battleground_kinds: vec![CardKind::Battlefield],
            seed: None,
        }
    }
}

impl TableConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields take defaults, and
    /// a `zones` list only overrides the zones it names.
    pub fn from_json(json: &str) -> TableResult<Self> {
        let mut config: Self =
            serde_json::from_str(json).map_err(|e| TableError::InvalidConfig(e.to_string()))?;
        for default in Self::default().zones {
            if config.zone(default.zone).is_none() {
                config.zones.push(default);
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> TableResult<()> {
        if self.min_score > self.max_score {
            return Err(TableError::InvalidConfig(format!(
                "score range {}..={} is empty",
                self.min_score, self.max_score
            )));
        }
        for (i, zone) in self.zones.iter().enumerate() {
            if self.zones[..i].iter().any(|z| z.zone == zone.zone) {
                return Err(TableError::InvalidConfig(format!(
                    "zone {} configured twice",
                    zone.zone
                )));
            }
        }
        if let Some(missing) = Zone::ALL.into_iter().find(|&z| self.zone(z).is_none()) {
            return Err(TableError::InvalidConfig(format!("zone {missing} is not configured")));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_score_range(mut self, min: i32, max: i32) -> Self {
        self.min_score = min;
        self.max_score = max;
        self
    }

    /// Replace the configuration of one zone.
    #[must_use]
    pub fn with_zone(mut self, config: ZoneConfig) -> Self {
        self.zones.retain(|z| z.zone != config.zone);
        self.zones.push(config);
        self
    }

    #[must_use]
    pub fn zone(&self, zone: Zone) -> Option<&ZoneConfig> {
        self.zones.iter().find(|z| z.zone == zone)
    }

    /// Per-zone acceptance predicate. Unconfigured zones accept anything.
    #[must_use]
    pub fn zone_accepts(&self, zone: Zone, kind: CardKind) -> bool {
        self.zone(zone).map_or(true, |z| z.accepts_kind(kind))
    }

    #[must_use]
    pub fn is_ordered(&self, zone: Zone) -> bool {
        self.zone(zone).is_some_and(|z| z.ordered)
    }

    #[must_use]
    pub fn visibility(&self, zone: Zone) -> ZoneVisibility {
        self.zone(zone)
            .map_or(ZoneVisibility::Hidden, |z| z.visibility)
    }

    #[must_use]
    pub fn score_in_range(&self, score: i32) -> bool {
        (self.min_score..=self.max_score).contains(&score)
    }

    #[must_use]
    pub fn can_exhaust(&self, kind: CardKind) -> bool {
        !self.non_exhaustible.contains(&kind)
    }

    #[must_use]
    pub fn is_token(&self, kind: CardKind) -> bool {
        self.token_kinds.contains(&kind)
    }

    #[must_use]
    pub fn is_battleground(&self, kind: CardKind) -> bool {
        self.battleground_kinds.contains(&kind)
    }
}
