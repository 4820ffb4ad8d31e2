//! Landscape identifiers.

use serde::{Deserialize, Serialize};

/// Identifier of a landscape category: its registration index in a catalog.
///
/// Ids are only meaningful relative to the catalog that issued them. The
/// associated constants name the categories of the reference catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LandscapeId(u16);

impl LandscapeId {
    /// Creates a landscape ID from a raw value.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Returns the ID as a table index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Open grassland.
    pub const PLAINS: Self = Self(0);
    /// Forest.
    pub const WOODS: Self = Self(1);
    /// Cave entrance.
    pub const CAVE: Self = Self(2);
    /// Rolling hills.
    pub const HILLS: Self = Self(3);
    /// High peaks.
    pub const MOUNTAINS: Self = Self(4);
    /// Open water.
    pub const LAKE: Self = Self(5);
    /// Sand and dunes.
    pub const DESERT: Self = Self(6);
    /// Wetland.
    pub const SWAMP: Self = Self(7);
}

impl std::fmt::Display for LandscapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
