//! Determinism testing utilities.
//!
//! Provides a harness for verifying that the engine produces byte-identical
//! output given identical inputs.
//!
//! # Testing Strategy
//!
//! Recommendations must be reproducible so that test fixtures and saved
//! analyses stay stable. Sources of non-determinism include:
//!
//! - **Floating-point math**: Scores use [`lineup_core::math::Fixed`].
//!
//! - **HashMap iteration order**: The catalog index is only used for
//!   lookups; every ordered view iterates the backing `Vec`.
//!
//! - **Clock and randomness**: The engine reads neither.
//!
//! Outputs are compared through their `bincode` encoding, so any change in
//! any field (including fixed-point bits) is caught.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

use serde::Serialize;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical bytes.
    pub is_deterministic: bool,
    /// Hash of the encoded output of each run.
    pub hashes: Vec<u64>,
}

impl DeterminismResult {
    fn from_encodings(encodings: &[Vec<u8>]) -> Self {
        Self {
            is_deterministic: encodings.windows(2).all(|w| w[0] == w[1]),
            hashes: encodings.iter().map(|bytes| hash_bytes(bytes)).collect(),
        }
    }

    /// Get all unique hashes (should be 1 for deterministic output).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that all runs matched, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different output.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Engine output is non-deterministic!\n\
                 Runs: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Encode a value with bincode.
///
/// # Panics
///
/// Panics if the value cannot be encoded.
#[must_use]
pub fn encode<T: Serialize>(value: &T) -> Vec<u8> {
    bincode::serialize(value).expect("value should encode with bincode")
}

fn hash_bytes(bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish()
}

/// Run `produce` several times and compare the encoded outputs.
///
/// # Example
///
/// ```ignore
/// use lineup_test_utils::determinism::verify_determinism;
/// use lineup_test_utils::fixtures::{builtin_engine, demo_outpost};
///
/// let engine = builtin_engine();
/// let data = demo_outpost();
/// verify_determinism(5, || {
///     engine.generate_recommendations(&data, Objective::MaxWinChance, &Default::default())
/// })
/// .assert_deterministic();
/// ```
pub fn verify_determinism<T, F>(runs: usize, produce: F) -> DeterminismResult
where
    T: Serialize,
    F: Fn() -> T,
{
    let encodings: Vec<Vec<u8>> = (0..runs).map(|_| encode(&produce())).collect();
    DeterminismResult::from_encodings(&encodings)
}

/// Run `produce` on several threads at once and compare the encoded outputs.
///
/// Catches shared-state leaks between concurrent requests.
///
/// # Panics
///
/// Panics if a worker thread panics.
pub fn verify_parallel_determinism<T, F>(threads: usize, produce: F) -> DeterminismResult
where
    T: Serialize,
    F: Fn() -> T + Sync,
{
    let encodings: Vec<Vec<u8>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|_| scope.spawn(|| encode(&produce())))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("worker thread panicked"))
            .collect()
    });

    tracing::debug!("Collected {} parallel encodings", encodings.len());
    DeterminismResult::from_encodings(&encodings)
}
