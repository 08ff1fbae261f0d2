//! Terrain properties and the stacking catalog.
//!
//! Every tile attribute is computed as the baseline value plus the sum of
//! the deltas of all properties assigned to the tile, so terrain effects
//! stack by simple addition and can drive an attribute negative.

/// An immutable bundle of terrain modifiers, identified by name.
///
/// All four values are deltas applied on top of [`TileProperty::BASELINE`].
/// Stacking several properties on one tile folds their deltas together;
/// hostile combinations can push the movement or supply cap below zero,
/// which downstream code treats as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileProperty {
    /// Terrain name used for catalog lookup and display.
    pub name: &'static str,
    /// Garrison growth granted each upkeep phase.
    pub regen: i32,
    /// Flat strength added to a nonzero defending garrison.
    pub defence: i32,
    /// Delta to the cap on troops committable toward this tile.
    pub maxmove: i32,
    /// Delta to the garrison supply cap enforced at upkeep.
    pub maxsup: i32,
}

impl TileProperty {
    /// Baseline attribute values shared by every tile before stacking.
    pub const BASELINE: Self = Self {
        name: "Default",
        regen: 0,
        defence: 0,
        maxmove: 15,
        maxsup: 20,
    };

    /// Open farmland: grows troops quickly, offers no cover.
    pub const PLAINS: Self = Self {
        name: "Plains",
        regen: 2,
        defence: 0,
        maxmove: 0,
        maxsup: 5,
    };

    /// Dense woods: some cover, slows incoming columns.
    pub const FOREST: Self = Self {
        name: "Forest",
        regen: 0,
        defence: 2,
        maxmove: -3,
        maxsup: 0,
    };

    /// High ground: strong defensive position, hard to supply.
    pub const HILLS: Self = Self {
        name: "Hills",
        regen: 0,
        defence: 4,
        maxmove: -5,
        maxsup: -5,
    };

    /// Peaks: nearly unassailable, garrisons dwindle for lack of supply.
    pub const MOUNTAINS: Self = Self {
        name: "Mountains",
        regen: -1,
        defence: 6,
        maxmove: -10,
        maxsup: -10,
    };

    /// Wetlands: miserable to hold and to assault alike.
    pub const MARSH: Self = Self {
        name: "Marsh",
        regen: -2,
        defence: -2,
        maxmove: -6,
        maxsup: -8,
    };

    /// A settlement: raises and supplies troops, modest walls.
    pub const VILLAGE: Self = Self {
        name: "Village",
        regen: 3,
        defence: 1,
        maxmove: 0,
        maxsup: 10,
    };

    /// All named catalog entries, baseline included.
    pub const CATALOG: [Self; 7] = [
        Self::BASELINE,
        Self::PLAINS,
        Self::FOREST,
        Self::HILLS,
        Self::MOUNTAINS,
        Self::MARSH,
        Self::VILLAGE,
    ];

    /// Look up a catalog entry by its terrain name.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        Self::CATALOG.iter().copied().find(|p| p.name == name)
    }
}
