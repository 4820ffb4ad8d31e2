//! Hexagonal grid bounded by a radius around the origin.
//!
//! The grid is the closed hex disk of `radius`: every axial coordinate whose
//! hex distance from the origin is at most `radius`, `3R² + 3R + 1` cells in
//! total. Membership never changes after construction; only cell categories do.

use ahash::AHashMap;
use hexterra_common::{AxialCoord, GridError, LandscapeId, HEX_DIRECTIONS};

/// Generation phase of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridPhase {
    /// No cell has a category yet.
    #[default]
    Unseeded,
    /// Every cell holds an unconditioned draw.
    Seeded,
    /// At least one smoothing pass has been committed.
    Smoothed {
        /// Passes committed since the last seeding
        passes: u32,
    },
}

impl GridPhase {
    /// Whether every cell holds a category.
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        !matches!(self, Self::Unseeded)
    }
}

/// A single hex cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    coord: AxialCoord,
    category: Option<LandscapeId>,
}

impl Cell {
    /// Creates an unassigned cell.
    #[must_use]
    pub const fn new(coord: AxialCoord) -> Self {
        Self {
            coord,
            category: None,
        }
    }

    /// Position of the cell.
    #[must_use]
    pub const fn coord(&self) -> AxialCoord {
        self.coord
    }

    /// Current landscape, `None` before seeding.
    #[must_use]
    pub const fn category(&self) -> Option<LandscapeId> {
        self.category
    }

    pub(crate) fn set_category(&mut self, category: LandscapeId) {
        self.category = Some(category);
    }
}

/// Neighbour relation of a graph of cells.
pub trait HexGraph {
    /// Iterator over a node's neighbours.
    type Neighbors: Iterator<Item = AxialCoord>;

    /// Neighbours of `node` that belong to the graph.
    fn neighbors(&self, node: AxialCoord) -> Self::Neighbors;
}

/// Lists every coordinate within `radius` of the origin.
///
/// Row-major: `r` ascending, then `q` ascending.
#[must_use]
pub fn enumerate_coordinates(radius: u32) -> Vec<AxialCoord> {
    let radius = radius as i32;
    let mut coords = Vec::with_capacity(cell_count(radius as u32));
    for r in -radius..=radius {
        for q in -radius..=radius {
            if (q + r).abs() <= radius {
                coords.push(AxialCoord::new(q, r));
            }
        }
    }
    coords
}

/// Number of cells in a hex disk of `radius`.
#[must_use]
pub const fn cell_count(radius: u32) -> usize {
    let r = radius as usize;
    3 * r * r + 3 * r + 1
}

/// Owned hex disk of cells.
#[derive(Debug, Clone)]
pub struct HexGrid {
    radius: u32,
    /// Cells in enumeration order
    cells: Vec<Cell>,
    /// Coordinate → index into `cells`
    index: AHashMap<AxialCoord, usize>,
    phase: GridPhase,
}

impl HexGrid {
    /// Creates an unseeded grid of the given radius.
    #[must_use]
    pub fn new(radius: u32) -> Self {
        let coords = enumerate_coordinates(radius);

        let mut cells = Vec::with_capacity(coords.len());
        let mut index = AHashMap::with_capacity(coords.len());
        for (i, coord) in coords.into_iter().enumerate() {
            cells.push(Cell::new(coord));
            index.insert(coord, i);
        }

        Self {
            radius,
            cells,
            index,
            phase: GridPhase::Unseeded,
        }
    }

    /// Grid radius.
    #[must_use]
    pub const fn radius(&self) -> u32 {
        self.radius
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: even radius 0 has the origin cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Current generation phase.
    #[must_use]
    pub const fn phase(&self) -> GridPhase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: GridPhase) {
        self.phase = phase;
    }

    /// Whether `coord` lies inside the disk.
    #[must_use]
    pub fn contains(&self, coord: AxialCoord) -> bool {
        coord.distance_from_origin() <= self.radius
    }

    /// Returns the cell at `coord`.
    pub fn cell_at(&self, coord: AxialCoord) -> Result<&Cell, GridError> {
        self.index_of(coord).map(|i| &self.cells[i])
    }

    /// Returns the landscape at `coord`, `None` while unseeded.
    pub fn category_at(&self, coord: AxialCoord) -> Result<Option<LandscapeId>, GridError> {
        self.cell_at(coord).map(Cell::category)
    }

    pub(crate) fn index_of(&self, coord: AxialCoord) -> Result<usize, GridError> {
        self.index.get(&coord).copied().ok_or(GridError::OutOfBounds {
            q: coord.q,
            r: coord.r,
            radius: self.radius,
        })
    }

    /// All cells in enumeration order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// All coordinates in enumeration order.
    pub fn coordinates(&self) -> impl Iterator<Item = AxialCoord> + '_ {
        self.cells.iter().map(Cell::coord)
    }

    /// Lazy iterator over the in-bounds neighbours of `coord`.
    ///
    /// The iterator is `Clone`, so it can be restarted.
    #[must_use]
    pub fn neighbors(&self, coord: AxialCoord) -> Neighbors {
        Neighbors {
            center: coord,
            radius: self.radius,
            next_dir: 0,
        }
    }

    /// Snapshot of every cell's category, in enumeration order.
    #[must_use]
    pub fn categories(&self) -> Vec<Option<LandscapeId>> {
        self.cells.iter().map(Cell::category).collect()
    }

    /// Cell count per landscape, indexed by id. Unassigned cells are skipped.
    #[must_use]
    pub fn category_counts(&self, categories: usize) -> Vec<usize> {
        let mut counts = vec![0; categories];
        for id in self.cells.iter().filter_map(Cell::category) {
            if let Some(slot) = counts.get_mut(id.index()) {
                *slot += 1;
            }
        }
        counts
    }
}

impl HexGraph for HexGrid {
    type Neighbors = Neighbors;

    fn neighbors(&self, node: AxialCoord) -> Neighbors {
        HexGrid::neighbors(self, node)
    }
}

/// Neighbour iterator returned by [`HexGrid::neighbors`].
#[derive(Debug, Clone)]
pub struct Neighbors {
    center: AxialCoord,
    radius: u32,
    next_dir: usize,
}

impl Iterator for Neighbors {
    type Item = AxialCoord;

    fn next(&mut self) -> Option<AxialCoord> {
        while let Some(dir) = HEX_DIRECTIONS.get(self.next_dir) {
            self.next_dir += 1;
            let candidate = self.center + *dir;
            if candidate.distance_from_origin() <= self.radius {
                return Some(candidate);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(HEX_DIRECTIONS.len() - self.next_dir.min(HEX_DIRECTIONS.len())))
    }
}
