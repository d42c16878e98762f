//! The two seats at the table and per-side data storage.
//!
//! ## Side
//!
//! Exactly two sides exist, `Red` and `Blue`. A card's owner is a `Side`.
//!
//! ## SideMap
//!
//! Fixed two-slot storage indexed by `Side`, used for scores, deck
//! references and active battleground selections.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// One of the two players at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Red,
    Blue,
}

impl Side {
    /// Both sides, red first.
    pub const ALL: [Side; 2] = [Side::Red, Side::Blue];

    /// Slot index used by `SideMap`.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Red => 0,
            Side::Blue => 1,
        }
    }

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Side::Red => "red",
            Side::Blue => "blue",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(Side::Red),
            "blue" => Ok(Side::Blue),
            other => Err(format!("unknown side: {other}")),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use rift_table::core::{Side, SideMap};
///
/// let mut scores: SideMap<i32> = SideMap::with_value(0);
/// scores[Side::Blue] = 4;
///
/// assert_eq!(scores[Side::Red], 0);
/// assert_eq!(scores[Side::Blue], 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(mut factory: impl FnMut(Side) -> T) -> Self {
        Self {
            data: [factory(Side::Red), factory(Side::Blue)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs, red first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().zip(self.data.iter())
    }

    /// Transform every entry, keeping the side association.
    pub fn map<U>(&self, mut f: impl FnMut(Side, &T) -> U) -> SideMap<U> {
        SideMap::new(|side| f(side, self.get(side)))
    }
}

impl<T: Default> Default for SideMap<T> {
    fn default() -> Self {
        Self::with_default()
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Side::Red.opponent(), Side::Blue);
        assert_eq!(Side::Blue.opponent(), Side::Red);
    }

    #[test]
    fn test_side_parse_and_display() {
        assert_eq!("red".parse::<Side>(), Ok(Side::Red));
        assert_eq!("blue".parse::<Side>(), Ok(Side::Blue));
        assert!("green".parse::<Side>().is_err());
        assert_eq!(format!("{}", Side::Blue), "blue");
    }

    #[test]
    fn test_side_map_factory() {
        let map = SideMap::new(|side| side.index() * 10);
        assert_eq!(map[Side::Red], 0);
        assert_eq!(map[Side::Blue], 10);
    }

    #[test]
    fn test_side_map_mutation() {
        let mut map: SideMap<Option<u32>> = SideMap::default();
        map[Side::Blue] = Some(3);

        assert_eq!(map[Side::Red], None);
        assert_eq!(map[Side::Blue], Some(3));
    }

    #[test]
    fn test_side_map_iter_order() {
        let map = SideMap::with_value(1);
        let sides: Vec<_> = map.iter().map(|(s, _)| s).collect();
        assert_eq!(sides, vec![Side::Red, Side::Blue]);
    }

    #[test]
    fn test_side_map_map() {
        let map = SideMap::new(|side| side.index() as i32);
        let doubled = map.map(|_, v| v * 2);
        assert_eq!(doubled[Side::Blue], 2);
    }

    #[test]
    fn test_side_serialization() {
        let json = serde_json::to_string(&Side::Red).unwrap();
        assert_eq!(json, "\"red\"");
    }
}
