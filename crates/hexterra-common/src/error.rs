//! Error types for Hexterra.

use thiserror::Error;

use crate::ids::LandscapeId;

/// Top-level error type for terrain operations.
#[derive(Debug, Error)]
pub enum TerrainError {
    /// Catalog or generator misconfiguration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Grid lookup errors
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    /// Operation called in the wrong generation phase
    #[error("Usage error: {0}")]
    Usage(#[from] UsageError),
}

/// Catalog and generator configuration errors.
///
/// These are raised at construction time, before any generation begins.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// No categories were configured
    #[error("landscape catalog has no categories")]
    EmptyCatalog,

    /// Two categories share a name
    #[error("duplicate landscape category '{0}'")]
    DuplicateCategory(String),

    /// A base weight is negative or not finite
    #[error("landscape '{name}' has invalid base weight {weight}")]
    InvalidWeight {
        /// Category name
        name: String,
        /// Offending weight
        weight: f32,
    },

    /// Base weights sum to zero
    #[error("total base weight must be positive, got {0}")]
    NonPositiveTotalWeight(f32),

    /// An influence entry names a category that is not registered
    #[error("unknown landscape category '{0}'")]
    UnknownCategory(String),

    /// A landscape id was not issued by this catalog
    #[error("landscape {0} is not registered in this catalog")]
    UnknownLandscape(LandscapeId),

    /// An influence value is not finite
    #[error("influence of '{influencer}' on '{influencee}' is not finite")]
    InvalidInfluence {
        /// Influencing category
        influencer: String,
        /// Influenced category
        influencee: String,
    },

    /// More categories than a landscape id can address
    #[error("too many landscape categories: {0}")]
    TooManyCategories(usize),

    /// Generator settings out of range
    #[error("invalid generator settings: {0}")]
    InvalidSettings(String),
}

/// Grid lookup errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// Coordinate lies outside the hex disk
    #[error("cell ({q}, {r}) is outside the grid of radius {radius}")]
    OutOfBounds {
        /// Axial q
        q: i32,
        /// Axial r
        r: i32,
        /// Grid radius
        radius: u32,
    },
}

/// Precondition violations in the generation state machine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    /// Smoothing requires every cell to hold a category
    #[error("grid must be seeded before smoothing")]
    NotSeeded,
}

/// Result type alias for terrain operations.
pub type TerrainResult<T> = Result<T, TerrainError>;
