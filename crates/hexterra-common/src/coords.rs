//! Hex coordinate types.
//!
//! Cells are addressed with axial coordinates `(q, r)`. The equivalent cube
//! form is `(x, y, z) = (q, -(q + r), r)`, which keeps `x + y + z == 0`.
//!
//! ```text
//!        (0,-1)  (1,-1)
//!    (-1,0)  (0,0)  (1,0)
//!        (-1,1)  (0,1)
//! ```

use serde::{Deserialize, Serialize};

/// The six axial neighbour offsets, in the order neighbours are visited.
pub const HEX_DIRECTIONS: [AxialCoord; 6] = [
    AxialCoord::new(-1, 1), // down left
    AxialCoord::new(-1, 0), // left
    AxialCoord::new(0, -1), // up left
    AxialCoord::new(1, -1), // up right
    AxialCoord::new(1, 0),  // right
    AxialCoord::new(0, 1),  // down right
];

/// Axial hex coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct AxialCoord {
    /// Column (cube `x`)
    pub q: i32,
    /// Row (cube `z`)
    pub r: i32,
}

impl AxialCoord {
    /// The origin cell.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Creates a new axial coordinate.
    #[must_use]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Converts to cube coordinates.
    #[must_use]
    pub const fn to_cube(self) -> CubeCoord {
        CubeCoord {
            x: self.q,
            y: -(self.q + self.r),
            z: self.r,
        }
    }

    /// Number of adjacent-cell steps from the origin.
    #[must_use]
    pub fn distance_from_origin(self) -> u32 {
        self.to_cube().length()
    }

    /// Number of adjacent-cell steps between two cells.
    #[must_use]
    pub fn distance(self, other: Self) -> u32 {
        (self - other).distance_from_origin()
    }

    /// Returns the six adjacent coordinates, without any bounds check.
    #[must_use]
    pub fn adjacent(self) -> [Self; 6] {
        HEX_DIRECTIONS.map(|dir| self + dir)
    }
}

impl std::ops::Add for AxialCoord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl std::ops::Sub for AxialCoord {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.q - rhs.q, self.r - rhs.r)
    }
}

impl std::fmt::Display for AxialCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

impl From<CubeCoord> for AxialCoord {
    fn from(cube: CubeCoord) -> Self {
        Self::new(cube.x, cube.z)
    }
}

/// Cube hex coordinate (`x + y + z == 0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CubeCoord {
    /// X axis
    pub x: i32,
    /// Y axis (always `-(x + z)`)
    pub y: i32,
    /// Z axis
    pub z: i32,
}

impl CubeCoord {
    /// Hex distance from the origin: `max(|x|, |y|, |z|)`.
    #[must_use]
    pub fn length(self) -> u32 {
        self.x
            .unsigned_abs()
            .max(self.y.unsigned_abs())
            .max(self.z.unsigned_abs())
    }
}
