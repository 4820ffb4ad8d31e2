//! Landscape catalog: categories, prior weights and the influence matrix.
//!
//! The catalog is built once from a [`CatalogConfig`] and never changes
//! afterwards, so it is `Send + Sync` and can be shared freely.

use hexterra_common::{ConfigError, LandscapeId};
use tracing::debug;

use crate::config::CatalogConfig;
use crate::random::RandomSource;

/// Registry of landscape categories and their pairwise influences.
#[derive(Debug, Clone)]
pub struct LandscapeCatalog {
    /// Category names, indexed by id
    names: Vec<String>,
    /// Base weights, indexed by id
    weights: Vec<f32>,
    /// Running totals of `weights` in walk order
    cumulative: Vec<f32>,
    /// Sum of all base weights (> 0)
    total_weight: f32,
    /// Dense `len × len` matrix, row = influencer, column = influencee
    influence: Vec<f32>,
}

impl LandscapeCatalog {
    /// Builds and validates a catalog.
    pub fn new(config: &CatalogConfig) -> Result<Self, ConfigError> {
        if config.categories.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        let count = config.categories.len();
        if count > usize::from(u16::MAX) {
            return Err(ConfigError::TooManyCategories(count));
        }

        let mut names: Vec<String> = Vec::with_capacity(count);
        let mut weights = Vec::with_capacity(count);
        for entry in &config.categories {
            if names.iter().any(|n| n.eq_ignore_ascii_case(&entry.name)) {
                return Err(ConfigError::DuplicateCategory(entry.name.clone()));
            }
            if !entry.base_weight.is_finite() || entry.base_weight < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    name: entry.name.clone(),
                    weight: entry.base_weight,
                });
            }
            names.push(entry.name.clone());
            weights.push(entry.base_weight);
        }

        let cumulative: Vec<f32> = weights
            .iter()
            .scan(0.0f32, |total, &w| {
                *total += w;
                Some(*total)
            })
            .collect();
        let total_weight = cumulative.last().copied().unwrap_or(0.0);
        if !(total_weight > 0.0 && total_weight.is_finite()) {
            return Err(ConfigError::NonPositiveTotalWeight(total_weight));
        }

        let mut catalog = Self {
            names,
            weights,
            cumulative,
            total_weight,
            influence: vec![0.0; count * count],
        };

        for entry in &config.influences {
            let from = catalog.require(&entry.influencer)?;
            let to = catalog.require(&entry.influencee)?;
            if !entry.value.is_finite() {
                return Err(ConfigError::InvalidInfluence {
                    influencer: entry.influencer.clone(),
                    influencee: entry.influencee.clone(),
                });
            }
            let slot = from.index() * count + to.index();
            catalog.influence[slot] = entry.value;
        }

        debug!(
            "Landscape catalog built: {} categories, {} influence entries, total weight {}",
            count,
            config.influences.len(),
            catalog.total_weight
        );
        Ok(catalog)
    }

    /// The eight-category reference catalog.
    pub fn reference() -> Self {
        // The reference table is a compile-time constant that always validates.
        match Self::new(&CatalogConfig::reference()) {
            Ok(catalog) => catalog,
            Err(e) => unreachable!("reference catalog is invalid: {e}"),
        }
    }

    fn require(&self, name: &str) -> Result<LandscapeId, ConfigError> {
        self.id_by_name(name)
            .ok_or_else(|| ConfigError::UnknownCategory(name.to_string()))
    }

    fn check(&self, id: LandscapeId) -> Result<usize, ConfigError> {
        if id.index() < self.names.len() {
            Ok(id.index())
        } else {
            Err(ConfigError::UnknownLandscape(id))
        }
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false for a constructed catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All category ids, in walk order.
    pub fn ids(&self) -> impl Iterator<Item = LandscapeId> + '_ {
        (0..self.names.len()).map(|i| LandscapeId::new(i as u16))
    }

    /// Looks up a category by name (case-insensitive).
    #[must_use]
    pub fn id_by_name(&self, name: &str) -> Option<LandscapeId> {
        self.names
            .iter()
            .position(|n| n.eq_ignore_ascii_case(name))
            .map(|i| LandscapeId::new(i as u16))
    }

    /// Display name of a category.
    #[must_use]
    pub fn name(&self, id: LandscapeId) -> Option<&str> {
        self.names.get(id.index()).map(String::as_str)
    }

    /// Base weight of a category.
    #[must_use]
    pub fn base_weight(&self, id: LandscapeId) -> Option<f32> {
        self.weights.get(id.index()).copied()
    }

    /// Sum of all base weights.
    #[must_use]
    pub const fn total_weight(&self) -> f32 {
        self.total_weight
    }

    /// Draws a category with probability proportional to its base weight.
    ///
    /// Draws `u` in `[0, total)` and returns the first category whose running
    /// total reaches `u`. Zero-weight categories are never returned.
    pub fn choose_unconditioned<R: RandomSource + ?Sized>(&self, rng: &mut R) -> LandscapeId {
        let point = rng.uniform_f32(self.total_weight);

        let mut last_positive = 0;
        for (i, (&running, &weight)) in self.cumulative.iter().zip(&self.weights).enumerate() {
            if weight <= 0.0 {
                continue;
            }
            last_positive = i;
            if running >= point {
                return LandscapeId::new(i as u16);
            }
        }
        // Only reachable through rounding when `point` lands on the total.
        LandscapeId::new(last_positive as u16)
    }

    /// Influence `influencer` exerts on `influencee`.
    pub fn influence(
        &self,
        influencer: LandscapeId,
        influencee: LandscapeId,
    ) -> Result<f32, ConfigError> {
        let from = self.check(influencer)?;
        let to = self.check(influencee)?;
        Ok(self.influence[from * self.names.len() + to])
    }

    /// Total influence a set of neighbours exerts on `candidate`.
    pub fn support<I>(&self, candidate: LandscapeId, neighbours: I) -> Result<f32, ConfigError>
    where
        I: IntoIterator<Item = LandscapeId>,
    {
        neighbours
            .into_iter()
            .try_fold(0.0, |total, n| Ok(total + self.influence(n, candidate)?))
    }
}
