//! # Hexterra World
//!
//! Terrain model for Hexterra.
//!
//! This crate handles:
//! - The landscape catalog (prior weights and influence matrix)
//! - The bounded hex grid and its neighbour relation
//! - Seeding and neighbour-support smoothing passes
//! - Pluggable random sources for reproducible runs

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod catalog;
pub mod config;
pub mod generator;
pub mod grid;
pub mod random;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::catalog::*;
    pub use crate::config::*;
    pub use crate::generator::*;
    pub use crate::grid::*;
    pub use crate::random::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use hexterra_common::{AxialCoord, LandscapeId};

    #[test]
    fn test_reference_generation() {
        let mut gen = TerrainGenerator::with_seed(12345);
        let mut grid = HexGrid::new(10);
        let stats = gen.generate(&mut grid, 1).expect("generate failed");

        assert_eq!(stats.len(), 1);
        assert_eq!(grid.len(), 331);
        assert_eq!(grid.phase(), GridPhase::Smoothed { passes: 1 });
        let counts = grid.category_counts(gen.catalog().len());
        assert_eq!(counts.iter().sum::<usize>(), 331);
    }

    #[test]
    fn test_custom_catalog_from_toml() {
        let source = r#"
            [[categories]]
            name = "Sea"
            base_weight = 2.0

            [[categories]]
            name = "Land"
            base_weight = 1.0

            [[influences]]
            influencer = "Sea"
            influencee = "Sea"
            value = 80.0
        "#;
        let config: CatalogConfig = toml::from_str(source).expect("parse failed");
        let catalog = LandscapeCatalog::new(&config).expect("valid catalog");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.total_weight(), 3.0);

        let sea = LandscapeId::new(0);
        let mut gen = TerrainGenerator::new(catalog, GeneratorSettings::default(), fastrand::Rng::with_seed(3))
            .expect("valid settings");
        let mut grid = HexGrid::new(3);
        gen.generate(&mut grid, 2).expect("generate failed");
        // Sea reinforces itself and nothing else is supported
        let seas = grid.cells().filter(|c| c.category() == Some(sea)).count();
        assert!(seas > grid.len() / 2);
        assert!(grid.category_at(AxialCoord::new(0, 3)).is_ok());
    }
}
