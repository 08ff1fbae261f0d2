//! Board, coordinates, and the fixed 4-neighbor adjacency graph.

use crate::error::{GridError, GridResult};
use crate::sim::tile::{TeamId, Tile};

/// A coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// One of the four orthogonal neighbor slots of a tile.
///
/// The declaration order (up, down, left, right) is also the wiring and
/// iteration order, so seeded runs visit neighbors identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward smaller `y`.
    Up,
    /// Toward larger `y`.
    Down,
    /// Toward smaller `x`.
    Left,
    /// Toward larger `x`.
    Right,
}

impl Direction {
    /// All directions in slot order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Slot index of this direction in per-tile arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }

    /// The direction pointing back at the origin tile.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// The coordinate one step in this direction, if it stays on a
    /// `width` x `height` board.
    #[must_use]
    pub const fn step(self, coord: Coord, width: u16, height: u16) -> Option<Coord> {
        match self {
            Self::Up => {
                if coord.y > 0 {
                    Some(Coord::new(coord.x, coord.y - 1))
                } else {
                    None
                }
            }
            Self::Down => {
                if coord.y + 1 < height {
                    Some(Coord::new(coord.x, coord.y + 1))
                } else {
                    None
                }
            }
            Self::Left => {
                if coord.x > 0 {
                    Some(Coord::new(coord.x - 1, coord.y))
                } else {
                    None
                }
            }
            Self::Right => {
                if coord.x + 1 < width {
                    Some(Coord::new(coord.x + 1, coord.y))
                } else {
                    None
                }
            }
        }
    }
}

/// The game board: a fixed grid of tiles plus the current selection.
///
/// Tiles are created once at construction and never added or removed;
/// adjacency is wired once and never mutated. Neighbor links are stored
/// as coordinates into this container, not as owning references, so the
/// cyclic adjacency graph never owns anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Width of the board in tiles.
    width: u16,
    /// Height of the board in tiles.
    height: u16,
    /// Tiles stored in row-major order.
    tiles: Vec<Tile>,
    /// Tile highlighted for the presentation layer. Not a simulation
    /// input; rendering reads it, input collaborators move it.
    selection: Coord,
}

impl Board {
    /// Create a board of neutral, empty tiles with adjacency wired.
    ///
    /// Returns `None` if width or height is zero.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        let size = usize::from(width) * usize::from(height);
        let mut tiles = Vec::with_capacity(size);
        for y in 0..height {
            for x in 0..width {
                let coord = Coord::new(x, y);
                let mut neighbors = [None; 4];
                for dir in Direction::ALL {
                    neighbors[dir.index()] = dir.step(coord, width, height);
                }
                tiles.push(Tile::new(coord, neighbors));
            }
        }

        Some(Self {
            width,
            height,
            tiles,
            selection: Coord::new(0, 0),
        })
    }

    /// Get the width of the board.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the height of the board.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Check if a coordinate is within the board bounds.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Convert a coordinate to an index into the tiles array.
    fn coord_to_index(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(usize::from(coord.y) * usize::from(self.width) + usize::from(coord.x))
        } else {
            None
        }
    }

    /// Get a reference to the tile at the given coordinate.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<&Tile> {
        self.coord_to_index(coord).map(|idx| &self.tiles[idx])
    }

    /// Get a mutable reference to the tile at the given coordinate.
    #[must_use]
    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Tile> {
        self.coord_to_index(coord).map(|idx| &mut self.tiles[idx])
    }

    /// Resolve a coordinate to its tile.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] when the coordinate lies
    /// outside the board, which pointer-driven input is expected to
    /// produce and ignore.
    pub fn select_tile(&self, coord: Coord) -> GridResult<&Tile> {
        self.get(coord).ok_or(GridError::OutOfBounds {
            coord,
            width: self.width,
            height: self.height,
        })
    }

    /// The coordinate currently highlighted for presentation.
    #[must_use]
    pub const fn selection(&self) -> Coord {
        self.selection
    }

    /// Move the presentation highlight.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for coordinates outside the
    /// board; the selection is left unchanged.
    pub fn set_selection(&mut self, coord: Coord) -> GridResult<()> {
        self.select_tile(coord)?;
        self.selection = coord;
        Ok(())
    }

    /// Commit (or withdraw) troops from `source` toward an adjacent
    /// `target`, clamped to the legal envelope.
    ///
    /// A `target` that is not one of `source`'s neighbors is a silent
    /// no-op, matching the tolerant direct-manipulation input model.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] when `source` lies outside the
    /// board.
    pub fn submit_order(&mut self, source: Coord, target: Coord, amount: i32) -> GridResult<()> {
        let slot = self
            .select_tile(source)?
            .neighbors
            .iter()
            .position(|n| *n == Some(target));
        let Some(slot) = slot else {
            return Ok(());
        };
        self.submit_order_dir(source, Direction::ALL[slot], amount)
    }

    /// Commit (or withdraw) troops from `source` toward its neighbor in
    /// `dir`, clamped to the legal envelope.
    ///
    /// Ordering off the edge of the board (no neighbor in `dir`) is a
    /// silent no-op.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] when `source` lies outside the
    /// board.
    pub fn submit_order_dir(
        &mut self,
        source: Coord,
        dir: Direction,
        amount: i32,
    ) -> GridResult<()> {
        let target = self.select_tile(source)?.neighbor(dir);
        let Some(target) = target else {
            return Ok(());
        };

        let cap = self.get(target).map_or(0, Tile::effective_maxmove);
        if let Some(tile) = self.get_mut(source) {
            tile.submit_order(dir, amount, cap);
        }
        Ok(())
    }

    /// Troops other tiles have committed toward `coord`, by the
    /// direction slot of the contributing neighbor.
    ///
    /// Derived on demand from the neighbors' outbound orders; display
    /// and heuristics read it, nothing authoritative depends on it.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] when `coord` lies outside the
    /// board.
    pub fn pending_inbound(&self, coord: Coord) -> GridResult<[u32; 4]> {
        let tile = self.select_tile(coord)?;
        let mut inbound = [0; 4];
        for dir in Direction::ALL {
            if let Some(neighbor) = tile.neighbor(dir).and_then(|c| self.get(c)) {
                inbound[dir.index()] = neighbor.pending(dir.opposite());
            }
        }
        Ok(inbound)
    }

    /// Iterate over all tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Iterate mutably over all tiles in row-major order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut()
    }

    /// All tiles currently counting for the given faction.
    pub fn tiles_held_by(&self, team: TeamId) -> impl Iterator<Item = &Tile> {
        self.iter().filter(move |tile| tile.team == team)
    }
}
