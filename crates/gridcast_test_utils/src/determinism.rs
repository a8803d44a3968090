//! Determinism testing utilities.
//!
//! Provides a harness for verifying that generation and casting
//! produce identical results given identical inputs.
//!
//! # Testing Strategy
//!
//! Sources of non-determinism this harness is meant to catch:
//!
//! - **Global randomness**: maze generation must draw only from the RNG it
//!   is handed. Same seed, same maze.
//!
//! - **Floating-point drift in traversal decisions**: the crossing choice
//!   is made on fixed-point intercepts, so the same ray must always walk
//!   the same cells.
//!
//! - **Thread scheduling**: casts are pure, so casting the same fan on
//!   several threads at once must give bit-identical hits.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

use gridcast_core::maze::Maze;
use gridcast_core::raycast::{RayHit, WallOrientation};

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
    /// Number of steps performed per run.
    pub steps: u64,
}

impl DeterminismResult {
    /// Get all unique hashes (should be 1 for a deterministic pipeline).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that every run matched, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Pipeline is non-deterministic!\n\
                 Runs: {}\n\
                 Steps: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                self.steps,
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Run a pipeline multiple times and verify determinism.
///
/// # Arguments
///
/// * `runs` - Number of times to run the pipeline
/// * `steps` - Number of steps per run
/// * `setup` - Function to create initial state
/// * `step` - Function to advance state by one step
/// * `hash` - Function to compute state hash
///
/// # Example
///
/// ```
/// use gridcast_core::maze::Maze;
/// use gridcast_test_utils::determinism::{hash_maze, verify_determinism};
///
/// let result = verify_determinism(
///     3,
///     4,
///     || (Maze::new(8, 8).unwrap(), 0u64),
///     |(maze, seed)| {
///         *seed += 1;
///         maze.generate_seeded(*seed);
///     },
///     |(maze, _)| hash_maze(maze),
/// );
/// result.assert_deterministic();
/// ```
pub fn verify_determinism<S, Setup, Step, HashFn>(
    runs: usize,
    steps: u64,
    setup: Setup,
    step: Step,
    hash: HashFn,
) -> DeterminismResult
where
    Setup: Fn() -> S,
    Step: Fn(&mut S),
    HashFn: Fn(&S) -> u64,
{
    let mut hashes = Vec::with_capacity(runs);

    for _ in 0..runs {
        let mut state = setup();

        for _ in 0..steps {
            step(&mut state);
        }

        hashes.push(hash(&state));
    }

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);

    DeterminismResult {
        is_deterministic,
        hashes,
        steps,
    }
}

/// Evaluate `job` on `threads` scoped threads at once and collect the hashes.
///
/// # Panics
///
/// Panics if a worker thread panics.
pub fn run_parallel<F>(job: F, threads: usize) -> DeterminismResult
where
    F: Fn() -> u64 + Sync,
{
    let hashes: Vec<u64> = thread::scope(|s| {
        let handles: Vec<_> = (0..threads).map(|_| s.spawn(&job)).collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("worker thread panicked"))
            .collect()
    });

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);
    DeterminismResult {
        is_deterministic,
        hashes,
        steps: 1,
    }
}

/// Compute a simple hash for any hashable value.
pub fn compute_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Hash a maze's cells and dimensions.
#[must_use]
pub fn hash_maze(maze: &Maze) -> u64 {
    compute_hash(&(maze.width(), maze.height(), maze.cells()))
}

/// Bit-exact hash of a sequence of hits.
#[must_use]
pub fn hash_hits(hits: &[RayHit]) -> u64 {
    let mut hasher = DefaultHasher::new();
    for hit in hits {
        hit.distance.to_bits().hash(&mut hasher);
        hit.point_x.to_bits().hash(&mut hasher);
        hit.point_y.to_bits().hash(&mut hasher);
        hit.material.hash(&mut hasher);
        matches!(hit.orientation, WallOrientation::Horizontal).hash(&mut hasher);
        hit.out_of_bounds.hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{wall_column_map, FLOOR, OOB};
    use gridcast_core::raycast::cast_fan;

    // =========================================================================
    // Harness behaviour
    // =========================================================================

    #[test]
    fn test_verify_determinism_simple() {
        let result = verify_determinism(3, 100, || 0u64, |n| *n += 1, |n| *n);

        assert!(result.is_deterministic);
        assert_eq!(result.hashes, vec![100, 100, 100]);
    }

    #[test]
    fn test_detects_non_determinism() {
        use std::sync::atomic::{AtomicU64, Ordering};
        let counter = AtomicU64::new(0);
        let result = verify_determinism(
            2,
            1,
            || counter.fetch_add(1, Ordering::SeqCst),
            |_| {},
            |n| *n,
        );
        assert!(!result.is_deterministic);
        assert_eq!(result.unique_hashes().len(), 2);
    }

    #[test]
    #[should_panic(expected = "non-deterministic")]
    fn test_assert_panics_on_divergence() {
        DeterminismResult {
            is_deterministic: false,
            hashes: vec![1, 2],
            steps: 1,
        }
        .assert_deterministic();
    }

    // =========================================================================
    // Core pipelines
    // =========================================================================

    #[test]
    fn test_maze_generation_is_deterministic() {
        let result = verify_determinism(
            3,
            1,
            || Maze::new(24, 17).unwrap(),
            |maze| maze.generate_seeded(2024),
            hash_maze,
        );
        result.assert_deterministic();
    }

    #[test]
    fn test_parallel_casts_match() {
        let map = wall_column_map(32, 20);
        let angles: Vec<f64> = (0..64).map(|i| f64::from(i) / 64.0 - 0.5).collect();
        let result = run_parallel(
            || hash_hits(&cast_fan(&map, 3.3, 15.7, 0.1, &angles, FLOOR, OOB)),
            4,
        );
        result.assert_deterministic();
        assert_eq!(result.hashes.len(), 4);
    }
}
