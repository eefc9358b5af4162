//! Fixed-point math utilities for deterministic scoring.
//!
//! Scores are computed with fixed-point arithmetic so identical inputs
//! produce bit-identical output on every platform.

use fixed::types::I32F32;

/// Fixed-point number type for all scoring math.
///
/// Uses 32 bits for integer part and 32 bits for fractional part.
pub type Fixed = I32F32;

/// Lower bound for score and risk ratings.
pub const RATING_MIN: i32 = 0;

/// Upper bound for score and risk ratings.
pub const RATING_MAX: i32 = 100;

/// Clamp a fixed-point rating into `[RATING_MIN, RATING_MAX]`.
#[must_use]
pub fn clamp_rating(value: Fixed) -> Fixed {
    value.clamp(Fixed::from_num(RATING_MIN), Fixed::from_num(RATING_MAX))
}

/// Serde support for fixed-point numbers.
///
/// Serializes fixed-point numbers as their raw bit representation (i64)
/// to preserve exact precision across serialization boundaries.
pub mod fixed_serde {
    use super::Fixed;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a fixed-point number as its raw bit representation.
    pub fn serialize<S>(value: &Fixed, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.to_bits().serialize(serializer)
    }

    /// Deserialize a fixed-point number from its raw bit representation.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Fixed, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = i64::deserialize(deserializer)?;
        Ok(Fixed::from_bits(bits))
    }
}
