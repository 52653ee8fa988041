//! Weight value object (0-100 scale) and the rollup mean.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A factor weight between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(u8);

impl Weight {
    /// Zero weight.
    pub const MIN: Self = Self(0);

    /// Maximum weight.
    pub const MAX: Self = Self(100);

    /// Creates a new Weight, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Creates a Weight, returning error if out of range.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if value > 100 {
            return Err(ValidationError::out_of_range("weight", 0, 100, value as i32));
        }
        Ok(Self(value))
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Mean of the given weights, rounded half-up on exact `.5`.
    ///
    /// Returns `None` for an empty iterator. A mean of 49.5 rounds to 50,
    /// 50.5 rounds to 51.
    pub fn mean_half_up<'a>(weights: impl IntoIterator<Item = &'a Weight>) -> Option<Weight> {
        let mut sum: u32 = 0;
        let mut count: u32 = 0;
        for w in weights {
            sum += u32::from(w.0);
            count += 1;
        }
        if count == 0 {
            return None;
        }
        // Integer round-half-up: fractions below .5 floor, .5 and above carry.
        Some(Self(((sum + count / 2) / count) as u8))
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self(50)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(values: &[u8]) -> Vec<Weight> {
        values.iter().map(|v| Weight::new(*v)).collect()
    }

    #[test]
    fn weight_new_clamps_to_100() {
        assert_eq!(Weight::new(101).value(), 100);
        assert_eq!(Weight::new(255).value(), 100);
        assert_eq!(Weight::new(42).value(), 42);
    }

    #[test]
    fn weight_try_new_rejects_over_100() {
        assert!(Weight::try_new(100).is_ok());
        let result = Weight::try_new(101);
        assert!(matches!(
            result,
            Err(ValidationError::OutOfRange { actual: 101, .. })
        ));
    }

    #[test]
    fn mean_of_empty_is_none() {
        let empty: Vec<Weight> = Vec::new();
        assert_eq!(Weight::mean_half_up(&empty), None);
    }

    #[test]
    fn mean_floors_below_half() {
        // 10, 20, 30, 45 -> mean 26.25 -> 26
        let ws = weights(&[10, 20, 30, 45]);
        assert_eq!(Weight::mean_half_up(&ws).unwrap().value(), 26);
    }

    #[test]
    fn mean_rounds_half_up() {
        // 50, 51 -> mean 50.5 -> 51
        let ws = weights(&[50, 51]);
        assert_eq!(Weight::mean_half_up(&ws).unwrap().value(), 51);

        // 49, 50 -> mean 49.5 -> 50
        let ws = weights(&[49, 50]);
        assert_eq!(Weight::mean_half_up(&ws).unwrap().value(), 50);
    }

    #[test]
    fn mean_of_single_weight_is_itself() {
        let ws = weights(&[73]);
        assert_eq!(Weight::mean_half_up(&ws).unwrap().value(), 73);
    }

    #[test]
    fn mean_handles_odd_counts() {
        // 10, 11, 12 -> 11
        let ws = weights(&[10, 11, 12]);
        assert_eq!(Weight::mean_half_up(&ws).unwrap().value(), 11);

        // 0, 0, 100 -> 33.33 -> 33
        let ws = weights(&[0, 0, 100]);
        assert_eq!(Weight::mean_half_up(&ws).unwrap().value(), 33);

        // 0, 100, 100 -> 66.67 -> 67
        let ws = weights(&[0, 100, 100]);
        assert_eq!(Weight::mean_half_up(&ws).unwrap().value(), 67);
    }

    #[test]
    fn weight_serializes_as_bare_number() {
        let w = Weight::new(42);
        assert_eq!(serde_json::to_string(&w).unwrap(), "42");
        let back: Weight = serde_json::from_str("75").unwrap();
        assert_eq!(back.value(), 75);
    }
}
