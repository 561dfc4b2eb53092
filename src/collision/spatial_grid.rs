// Uniform integer grid for broad-phase collision detection.
//
// Every body is reduced to the inclusive range of grid cells its world bounds
// touch. Two bodies are candidates when their X ranges and their Y ranges both
// intersect. Quantization rounds the minimum down and the maximum up, so a
// cell range always contains the true bound: no overlapping pair is dropped.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::collision::AABB;
use crate::error::CollisionError;

/// Bodies spanning more cells than this are range-compared instead of bucketed.
const MAX_BUCKET_CELLS: i128 = 1024;

/// How candidate pairs are generated. Both strategies produce identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BroadPhaseStrategy {
    /// Compare the quantized ranges of every pair, O(n^2).
    #[default]
    PairScan,
    /// Bucket bodies by cell coordinate and pair up bucket members.
    Bucketed,
}

/// Inclusive range of grid cells covered by one body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl CellRange {
    /// Quantizes `aabb`: floor toward -inf for the minimum, ceil toward +inf for the maximum.
    pub fn from_aabb(aabb: &AABB, cell_interval: i64) -> Self {
        let cell = cell_interval as f64;
        CellRange {
            min_x: (aabb.min.x / cell).floor() as i64,
            min_y: (aabb.min.y / cell).floor() as i64,
            max_x: (aabb.max.x / cell).ceil() as i64,
            max_y: (aabb.max.y / cell).ceil() as i64,
        }
    }

    pub fn intersects(&self, other: &CellRange) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    fn cell_count(&self) -> i128 {
        let w = i128::from(self.max_x) - i128::from(self.min_x) + 1;
        let h = i128::from(self.max_y) - i128::from(self.min_y) + 1;
        w * h
    }
}

/// Broad-phase grid. Rebuilt from scratch every step via `clear` + `insert`.
#[derive(Debug)]
pub struct SpatialGrid {
    cell_interval: i64,
    strategy: BroadPhaseStrategy,
    ranges: Vec<(usize, CellRange)>,

    // Reused between queries to avoid reallocating every step
    buckets: HashMap<(i64, i64), Vec<usize>>,
}

impl SpatialGrid {
    /// Creates a pair-scan grid. `cell_interval` must be positive.
    pub fn new(cell_interval: i64) -> Result<Self, CollisionError> {
        Self::with_strategy(cell_interval, BroadPhaseStrategy::default())
    }

    pub fn with_strategy(cell_interval: i64, strategy: BroadPhaseStrategy) -> Result<Self, CollisionError> {
        if cell_interval <= 0 {
            return Err(CollisionError::InvalidCellInterval(cell_interval));
        }
        Ok(SpatialGrid {
            cell_interval,
            strategy,
            ranges: Vec::new(),
            buckets: HashMap::new(),
        })
    }

    pub fn cell_interval(&self) -> i64 {
        self.cell_interval
    }

    pub fn strategy(&self) -> BroadPhaseStrategy {
        self.strategy
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Removes every body from the grid.
    pub fn clear(&mut self) {
        self.ranges.clear();
        for bucket in self.buckets.values_mut() {
            bucket.clear();
        }
    }

    /// Inserts a body's world-space bound.
    ///
    /// # Arguments
    /// * `body_index` - Index of the body in the step's body list.
    /// * `aabb` - The body's world-space bound (swept, for moving bodies).
    pub fn insert(&mut self, body_index: usize, aabb: &AABB) {
        self.ranges.push((body_index, CellRange::from_aabb(aabb, self.cell_interval)));
    }

    /// Cell range recorded for `body_index`, if it was inserted.
    pub fn cell_range(&self, body_index: usize) -> Option<CellRange> {
        self.ranges
            .iter()
            .find(|(index, _)| *index == body_index)
            .map(|(_, range)| *range)
    }

    /// Returns candidate pairs `(i, j)` with `i < j`, sorted, each pair once.
    pub fn query_potential_pairs(&mut self) -> Vec<(usize, usize)> {
        let pairs = match self.strategy {
            BroadPhaseStrategy::PairScan => self.pair_scan(),
            BroadPhaseStrategy::Bucketed => self.bucketed(),
        };
        log::trace!(
            "broad phase ({:?}): {} bodies -> {} candidate pairs",
            self.strategy,
            self.ranges.len(),
            pairs.len()
        );
        pairs
    }

    fn pair_scan(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, (index_a, range_a)) in self.ranges.iter().enumerate() {
            for (index_b, range_b) in &self.ranges[i + 1..] {
                if index_a != index_b && range_a.intersects(range_b) {
                    pairs.push(ordered(*index_a, *index_b));
                }
            }
        }
        pairs.sort_unstable();
        pairs.dedup();
        pairs
    }

    fn bucketed(&mut self) -> Vec<(usize, usize)> {
        let mut pairs = BTreeSet::new();
        let mut oversized = Vec::new();

        self.buckets.retain(|_, bucket| !bucket.is_empty());
        for bucket in self.buckets.values_mut() {
            bucket.clear();
        }

        for (slot, (_, range)) in self.ranges.iter().enumerate() {
            if range.cell_count() > MAX_BUCKET_CELLS {
                oversized.push(slot);
                continue;
            }
            for cx in range.min_x..=range.max_x {
                for cy in range.min_y..=range.max_y {
                    self.buckets.entry((cx, cy)).or_default().push(slot);
                }
            }
        }

        for bucket in self.buckets.values() {
            for (i, &slot_a) in bucket.iter().enumerate() {
                for &slot_b in &bucket[i + 1..] {
                    let (index_a, index_b) = (self.ranges[slot_a].0, self.ranges[slot_b].0);
                    if index_a != index_b {
                        pairs.insert(ordered(index_a, index_b));
                    }
                }
            }
        }

        // Huge bodies would flood the buckets; compare them by range directly.
        for &slot_a in &oversized {
            let (index_a, range_a) = self.ranges[slot_a];
            for (slot_b, (index_b, range_b)) in self.ranges.iter().enumerate() {
                if slot_b != slot_a && index_a != *index_b && range_a.intersects(range_b) {
                    pairs.insert(ordered(index_a, *index_b));
                }
            }
        }

        pairs.into_iter().collect()
    }
}

#[inline]
fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
