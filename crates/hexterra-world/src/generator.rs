//! Neighbour-support terrain generation.
//!
//! Generation runs in two stages over a [`HexGrid`]:
//!
//! 1. **Seeding** gives every cell an unconditioned weighted draw.
//! 2. **Smoothing** redraws every cell by rejection sampling: a candidate is
//!    accepted when the summed influence of the cell's neighbours beats a
//!    random threshold. Repeated passes grow neighbour-compatible clusters.
//!
//! A smoothing pass reads neighbour categories from a snapshot taken before
//! the pass and commits all results at once, so the outcome does not depend
//! on the order cells are visited.

use hexterra_common::{LandscapeId, TerrainResult, UsageError};
use tracing::{debug, info};

use crate::catalog::LandscapeCatalog;
use crate::config::GeneratorSettings;
use crate::grid::{GridPhase, HexGrid};
use crate::random::RandomSource;

/// Result of one rejection-sampling pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickOutcome {
    /// Chosen landscape
    pub category: LandscapeId,
    /// Candidates drawn (1..=max_attempts)
    pub attempts: u32,
    /// False when the attempt budget ran out and the last candidate was kept
    pub accepted: bool,
    /// Neighbour support of the chosen landscape
    pub support: f32,
}

/// Counters for one smoothing pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SmoothingStats {
    /// Cells processed
    pub cells: usize,
    /// Picks accepted before the attempt budget ran out
    pub accepted: usize,
    /// Picks that fell back to the last candidate
    pub exhausted: usize,
    /// Cells whose landscape differs from before the pass
    pub changed: usize,
    /// Candidates drawn over the whole pass
    pub attempts: u64,
}

/// Terrain generator over an injected random source.
#[derive(Debug)]
pub struct TerrainGenerator<R = fastrand::Rng> {
    catalog: LandscapeCatalog,
    settings: GeneratorSettings,
    rng: R,
}

impl TerrainGenerator<fastrand::Rng> {
    /// Creates a generator with the reference catalog, default settings and
    /// a seeded `fastrand` source.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            catalog: LandscapeCatalog::reference(),
            settings: GeneratorSettings::default(),
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl<R: RandomSource> TerrainGenerator<R> {
    /// Creates a generator, validating the settings up front.
    pub fn new(catalog: LandscapeCatalog, settings: GeneratorSettings, rng: R) -> TerrainResult<Self> {
        settings.validate()?;
        info!(
            "TerrainGenerator initialized: categories={}, max_attempts={}, threshold=[{}, {}]",
            catalog.len(),
            settings.max_attempts,
            settings.threshold_min,
            settings.threshold_max
        );
        Ok(Self {
            catalog,
            settings,
            rng,
        })
    }

    /// The catalog in use.
    #[must_use]
    pub const fn catalog(&self) -> &LandscapeCatalog {
        &self.catalog
    }

    /// The sampling settings.
    #[must_use]
    pub const fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Mutable access to the random source.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Consumes the generator and returns its random source.
    pub fn into_rng(self) -> R {
        self.rng
    }

    /// Assigns every cell an unconditioned draw.
    ///
    /// Re-seeding an already generated grid starts it over.
    pub fn seed(&mut self, grid: &mut HexGrid) {
        let next: Vec<LandscapeId> = (0..grid.len())
            .map(|_| self.catalog.choose_unconditioned(&mut self.rng))
            .collect();
        for (cell, category) in grid.cells_mut().iter_mut().zip(next) {
            cell.set_category(category);
        }
        grid.set_phase(GridPhase::Seeded);
        debug!("Seeded {} cells", grid.len());
    }

    /// Runs one smoothing pass over a seeded grid.
    ///
    /// Fails with [`UsageError::NotSeeded`] before [`seed`](Self::seed). On
    /// error the grid is left unchanged.
    pub fn smooth(&mut self, grid: &mut HexGrid) -> TerrainResult<SmoothingStats> {
        let passes = match grid.phase() {
            GridPhase::Unseeded => return Err(UsageError::NotSeeded.into()),
            GridPhase::Seeded => 0,
            GridPhase::Smoothed { passes } => passes,
        };

        let snapshot = grid.categories();
        let mut next = Vec::with_capacity(snapshot.len());
        let mut neighbours = Vec::with_capacity(6);
        let mut stats = SmoothingStats {
            cells: snapshot.len(),
            ..Default::default()
        };

        for (cell, &before) in grid.cells().zip(&snapshot) {
            neighbours.clear();
            for coord in grid.neighbors(cell.coord()) {
                let category = snapshot[grid.index_of(coord)?].ok_or(UsageError::NotSeeded)?;
                neighbours.push(category);
            }

            let outcome = self.pick(&neighbours)?;
            stats.attempts += u64::from(outcome.attempts);
            if outcome.accepted {
                stats.accepted += 1;
            } else {
                stats.exhausted += 1;
            }
            if before != Some(outcome.category) {
                stats.changed += 1;
            }
            next.push(outcome.category);
        }

        for (cell, category) in grid.cells_mut().iter_mut().zip(next) {
            cell.set_category(category);
        }
        grid.set_phase(GridPhase::Smoothed { passes: passes + 1 });

        debug!(
            "Smoothing pass {}: {} cells, {} accepted, {} exhausted, {} changed",
            passes + 1,
            stats.cells,
            stats.accepted,
            stats.exhausted,
            stats.changed
        );
        Ok(stats)
    }

    /// Seeds the grid and runs `passes` smoothing passes.
    ///
    /// Returns the stats of every pass, in order.
    pub fn generate(&mut self, grid: &mut HexGrid, passes: u32) -> TerrainResult<Vec<SmoothingStats>> {
        self.seed(grid);
        let stats = (0..passes)
            .map(|_| self.smooth(grid))
            .collect::<TerrainResult<Vec<_>>>()?;
        info!(
            "Generated terrain: radius={}, cells={}, passes={}",
            grid.radius(),
            grid.len(),
            passes
        );
        Ok(stats)
    }

    /// Picks a landscape given the categories of a cell's neighbours.
    ///
    /// Draws up to `max_attempts` unconditioned candidates and accepts the
    /// first whose neighbour support exceeds a uniform integer threshold. If
    /// none is accepted the last candidate is returned.
    pub fn pick(&mut self, neighbours: &[LandscapeId]) -> TerrainResult<PickOutcome> {
        let GeneratorSettings {
            max_attempts,
            threshold_min,
            threshold_max,
        } = self.settings;

        let mut outcome = PickOutcome {
            category: self.catalog.choose_unconditioned(&mut self.rng),
            attempts: 0,
            accepted: false,
            support: 0.0,
        };
        for attempt in 1..=max_attempts {
            if attempt > 1 {
                outcome.category = self.catalog.choose_unconditioned(&mut self.rng);
            }
            outcome.attempts = attempt;
            outcome.support = self.catalog.support(outcome.category, neighbours.iter().copied())?;

            let threshold = self.rng.uniform_i32(threshold_min, threshold_max);
            if outcome.support > threshold as f32 {
                outcome.accepted = true;
                break;
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CatalogConfig, CategoryEntry, InfluenceEntry};
    use crate::random::ReplayRandom;
    use hexterra_common::{AxialCoord, TerrainError};

    /// Two categories, `A` and `B`, that want to differ from their neighbours.
    fn contrarian_catalog() -> LandscapeCatalog {
        let config = CatalogConfig {
            categories: vec![CategoryEntry::new("A", 1.0), CategoryEntry::new("B", 1.0)],
            influences: vec![
                InfluenceEntry::new("A", "B", 1000.0),
                InfluenceEntry::new("B", "A", 1000.0),
                InfluenceEntry::new("A", "A", -1000.0),
                InfluenceEntry::new("B", "B", -1000.0),
            ],
        };
        LandscapeCatalog::new(&config).expect("valid catalog")
    }

    fn reference_with(rng: ReplayRandom, max_attempts: u32) -> TerrainGenerator<ReplayRandom> {
        let settings = GeneratorSettings {
            max_attempts,
            ..Default::default()
        };
        TerrainGenerator::new(LandscapeCatalog::reference(), settings, rng).expect("valid settings")
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = GeneratorSettings {
            max_attempts: 0,
            ..Default::default()
        };
        let result = TerrainGenerator::new(LandscapeCatalog::reference(), settings, fastrand::Rng::new());
        assert!(matches!(result, Err(TerrainError::Config(_))));
    }

    #[test]
    fn test_smooth_before_seed_fails() {
        let mut gen = TerrainGenerator::with_seed(1);
        let mut grid = HexGrid::new(2);
        let err = gen.smooth(&mut grid).expect_err("smoothing must require seeding");
        assert!(matches!(err, TerrainError::Usage(UsageError::NotSeeded)));
        assert_eq!(grid.phase(), GridPhase::Unseeded);
        assert!(grid.cells().all(|c| c.category().is_none()));
    }

    #[test]
    fn test_seed_assigns_every_cell() {
        let mut gen = TerrainGenerator::with_seed(5);
        let mut grid = HexGrid::new(4);
        gen.seed(&mut grid);
        assert_eq!(grid.phase(), GridPhase::Seeded);
        assert!(grid.cells().all(|c| c.category().is_some()));
    }

    #[test]
    fn test_phase_transitions() {
        let mut gen = TerrainGenerator::with_seed(5);
        let mut grid = HexGrid::new(2);
        gen.seed(&mut grid);
        gen.smooth(&mut grid).expect("smooth failed");
        gen.smooth(&mut grid).expect("smooth failed");
        assert_eq!(grid.phase(), GridPhase::Smoothed { passes: 2 });
        gen.seed(&mut grid);
        assert_eq!(grid.phase(), GridPhase::Seeded);
    }

    #[test]
    fn test_support_drives_acceptance() {
        // Candidate Plains with neighbours Woods, Woods, Desert has support 13.
        let neighbours = [LandscapeId::WOODS, LandscapeId::WOODS, LandscapeId::DESERT];

        let below = ReplayRandom::new(vec![0.0], vec![12]);
        let outcome = reference_with(below, 100).pick(&neighbours).expect("pick failed");
        assert_eq!(outcome.category, LandscapeId::PLAINS);
        assert_eq!(outcome.support, 13.0);
        assert!(outcome.accepted);
        assert_eq!(outcome.attempts, 1);

        // support must be strictly greater than the threshold
        let equal = ReplayRandom::new(vec![0.0], vec![13]);
        let outcome = reference_with(equal, 5).pick(&neighbours).expect("pick failed");
        assert!(!outcome.accepted);
        assert_eq!(outcome.attempts, 5);
        assert_eq!(outcome.category, LandscapeId::PLAINS);
    }

    #[test]
    fn test_exhaustion_returns_last_candidate() {
        // No neighbours: support is always 0 and never beats a threshold >= 0.
        // Candidates cycle Plains, Hills, Swamp; the 4th draw is Plains again.
        let rng = ReplayRandom::new(vec![0.0625, 0.4375, 0.9375], vec![0]);
        let mut gen = reference_with(rng, 4);
        let outcome = gen.pick(&[]).expect("pick failed");
        assert!(!outcome.accepted);
        assert_eq!(outcome.attempts, 4);
        assert_eq!(outcome.category, LandscapeId::PLAINS);
        assert_eq!(gen.rng_mut().real_draws(), 4);
        assert_eq!(gen.rng_mut().integer_draws(), 4);
    }

    #[test]
    fn test_pick_terminates_with_valid_category() {
        let mut gen = TerrainGenerator::with_seed(77);
        let hostile = [LandscapeId::DESERT; 6];
        for _ in 0..200 {
            let outcome = gen.pick(&hostile).expect("pick failed");
            assert!((1..=100).contains(&outcome.attempts));
            assert!(gen.catalog().name(outcome.category).is_some());
        }
    }

    #[test]
    fn test_pass_uses_pre_pass_snapshot() {
        // Every cell starts as A. Seen from the snapshot, each cell has only A
        // neighbours, so B is strongly supported and A is always rejected:
        // the whole grid flips to B. Reading already-updated neighbours would
        // cancel the support for later cells (the centre would see 3 B and
        // 3 A) and leave some of them on a coin flip.
        let catalog = contrarian_catalog();
        let a = LandscapeId::new(0);
        let b = LandscapeId::new(1);

        for seed in 0..20 {
            let mut gen = TerrainGenerator::new(
                catalog.clone(),
                GeneratorSettings::default(),
                fastrand::Rng::with_seed(seed),
            )
            .expect("valid settings");

            let mut grid = HexGrid::new(1);
            for cell in grid.cells_mut() {
                cell.set_category(a);
            }
            grid.set_phase(GridPhase::Seeded);

            let stats = gen.smooth(&mut grid).expect("smooth failed");
            assert_eq!(stats.cells, 7);
            assert_eq!(stats.accepted, 7);
            assert_eq!(stats.changed, 7);
            assert!(grid.cells().all(|c| c.category() == Some(b)), "seed {seed}");
        }
    }

    #[test]
    fn test_repeated_smoothing_keeps_grid_assigned() {
        let mut gen = TerrainGenerator::with_seed(2024);
        let mut grid = HexGrid::new(6);
        gen.seed(&mut grid);
        for _ in 0..3 {
            let stats = gen.smooth(&mut grid).expect("smooth failed");
            assert_eq!(stats.cells, grid.len());
            assert_eq!(stats.accepted + stats.exhausted, grid.len());
            assert!(grid.cells().all(|c| c.category().is_some()));
        }
    }

    #[test]
    fn test_same_seed_same_terrain() {
        let run = |seed| {
            let mut gen = TerrainGenerator::with_seed(seed);
            let mut grid = HexGrid::new(10);
            gen.generate(&mut grid, 2).expect("generate failed");
            grid.categories()
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }

    #[test]
    fn test_replayed_draws_pin_output() {
        // Radius 0: the single cell has no neighbours, so every pick exhausts
        // its budget and keeps the 100th candidate.
        // Seeding consumes fraction #0 (Plains); smoothing consumes #1..=#100,
        // the last being #100 ≡ #1 (mod 3) → 0.4375 * 8 = 3.5 → Hills.
        let rng = ReplayRandom::new(vec![0.0625, 0.4375, 0.9375], vec![0]);
        let mut gen = reference_with(rng, 100);
        let mut grid = HexGrid::new(0);

        gen.seed(&mut grid);
        assert_eq!(grid.category_at(AxialCoord::ORIGIN), Ok(Some(LandscapeId::PLAINS)));

        let stats = gen.smooth(&mut grid).expect("smooth failed");
        assert_eq!(stats.exhausted, 1);
        assert_eq!(stats.attempts, 100);
        assert_eq!(grid.category_at(AxialCoord::ORIGIN), Ok(Some(LandscapeId::HILLS)));
    }

    #[test]
    fn test_smoothing_clusters_terrain() {
        // With the reference table, self-support dominates: after a few passes
        // a cell agrees with more of its neighbours than a random seed does.
        let agreement = |grid: &HexGrid| {
            let mut same = 0usize;
            let mut total = 0usize;
            for cell in grid.cells() {
                for n in grid.neighbors(cell.coord()) {
                    total += 1;
                    if grid.category_at(n) == Ok(cell.category()) {
                        same += 1;
                    }
                }
            }
            same as f64 / total as f64
        };

        let mut gen = TerrainGenerator::with_seed(9);
        let mut grid = HexGrid::new(10);
        gen.seed(&mut grid);
        let seeded = agreement(&grid);
        for _ in 0..5 {
            gen.smooth(&mut grid).expect("smooth failed");
        }
        assert!(agreement(&grid) > seeded);
    }
}
