//! Card attribute system for catalogue metadata.
//!
//! Catalogue entries carry numeric stats (energy cost, might) and a few
//! descriptive values (domain, tags). The engine never interprets them
//! beyond exposing them to callers.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Well-known attribute keys.
pub mod keys {
    pub const ENERGY: &str = "energy";
    pub const MIGHT: &str = "might";
    pub const DOMAIN: &str = "domain";
    pub const TAGS: &str = "tags";
    pub const RARITY: &str = "rarity";
}

/// Key for accessing card attributes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeKey(pub String);

impl AttributeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl From<&str> for AttributeKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AttributeKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Value for a card attribute.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// Integer value (energy, might).
    Int(i64),
    /// Text value (domain, rarity).
    Text(String),
    /// List of strings (tags).
    TextList(Vec<String>),
}

impl AttributeValue {
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            AttributeValue::TextList(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::Int(v)
    }
}

impl From<i32> for AttributeValue {
    fn from(v: i32) -> Self {
        AttributeValue::Int(i64::from(v))
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(v: Vec<String>) -> Self {
        AttributeValue::TextList(v)
    }
}

/// Attribute map attached to a catalogue entry.
pub type Attributes = FxHashMap<AttributeKey, AttributeValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert_eq!(AttributeValue::from(3i32).as_int(), Some(3));
        assert_eq!(AttributeValue::from("Fury").as_text(), Some("Fury"));
        assert_eq!(AttributeValue::from("Fury").as_int(), None);

        let tags = AttributeValue::from(vec!["Yordle".to_string()]);
        assert_eq!(tags.as_text_list(), Some(&["Yordle".to_string()][..]));
    }

    #[test]
    fn test_attribute_map() {
        let mut attrs = Attributes::default();
        attrs.insert(keys::MIGHT.into(), 4i64.into());

        assert_eq!(
            attrs.get(&AttributeKey::new(keys::MIGHT)).and_then(AttributeValue::as_int),
            Some(4)
        );
    }
}
