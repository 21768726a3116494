//! Category to severity index mapping

use crate::types::Category;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Lowest index any category can produce
pub const INDEX_FLOOR: u32 = 100;
/// Highest index any category can produce
pub const INDEX_CEILING: u32 = 1000;

/// Inclusive index range of one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexRange {
    pub min: u32,
    pub max: u32,
}

const INDEX_RANGES: [IndexRange; 6] = [
    IndexRange { min: 100, max: 200 },
    IndexRange { min: 200, max: 350 },
    IndexRange { min: 350, max: 500 },
    IndexRange { min: 500, max: 700 },
    IndexRange { min: 700, max: 900 },
    IndexRange { min: 900, max: 1000 },
];

impl IndexRange {
    /// Range for a raw category id; ids off the scale fall back to the category 0 range
    pub fn for_category(category: i64) -> IndexRange {
        usize::try_from(category)
            .ok()
            .and_then(|i| INDEX_RANGES.get(i).copied())
            .unwrap_or(INDEX_RANGES[0])
    }

    pub fn contains(&self, index: u32) -> bool {
        (self.min..=self.max).contains(&index)
    }
}

/// Draws a severity index for a category from an injected random source.
///
/// The category is deterministic for a given input; the exact index is not.
#[derive(Debug, Clone)]
pub struct IndexMapper<R> {
    rng: R,
}

impl<R: Rng> IndexMapper<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Uniform integer within the inclusive range of `category`
    pub fn map_to_index(&mut self, category: i64) -> u32 {
        let range = IndexRange::for_category(category);
        self.rng.gen_range(range.min..=range.max)
    }

    pub fn map_category(&mut self, category: Category) -> u32 {
        self.map_to_index(category.value() as i64)
    }
}

impl IndexMapper<StdRng> {
    /// Mapper seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Mapper with a fixed seed, reproducible across runs
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}
