//! Reward shaping from raw task measurements.
//!
//! Rewards are computed only when an episode is converted into transitions,
//! never on the inference path.

use serde::{Deserialize, Serialize};

/// Maps a raw state vector to a scalar reward.
///
/// Implementations must be pure: same state, same reward, no side effects.
pub trait RewardModel {
    /// Reward for reaching `state`.
    fn reward(&self, state: &[f32]) -> f32;
}

impl<F> RewardModel for F
where
    F: Fn(&[f32]) -> f32,
{
    fn reward(&self, state: &[f32]) -> f32 {
        self(state)
    }
}

/// Linear plus exponential penalty on the L1 deviation from zero.
///
/// ```text
/// d = Σ|sᵢ|
/// r = −linear·d − exponential·eᵈ
/// ```
///
/// Strictly decreasing in `d`; the exponential term dominates for large
/// deviations. Evaluated in f64; the result overflows to `-inf` once it no
/// longer fits an f32 (around `d ≈ 86` with the default weights).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistancePenalty {
    pub linear: f32,
    pub exponential: f32,
}

impl Default for DistancePenalty {
    fn default() -> Self {
        Self {
            linear: 10.0,
            exponential: 10.0,
        }
    }
}

impl DistancePenalty {
    pub fn new(linear: f32, exponential: f32) -> Self {
        Self { linear, exponential }
    }
}

impl RewardModel for DistancePenalty {
    fn reward(&self, state: &[f32]) -> f32 {
        let d: f64 = state.iter().map(|s| f64::from(s.abs())).sum();
        (-f64::from(self.linear) * d - f64::from(self.exponential) * d.exp()) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reward_at_origin() {
        let r = DistancePenalty::default().reward(&[0.0, 0.0, 0.0]);
        assert!((r - (-10.0)).abs() < 1e-6);
    }

    #[test]
    fn test_reward_uses_absolute_values() {
        let model = DistancePenalty::default();
        let expected = -10.0 * 3.0 - 10.0 * 3.0f32.exp();
        assert!((model.reward(&[1.0, -2.0, 0.0]) - expected).abs() < 1e-3);
        assert_eq!(model.reward(&[1.0, -2.0]), model.reward(&[-1.0, 2.0]));
    }

    #[test]
    fn test_large_deviation_overflows_to_negative_infinity() {
        let model = DistancePenalty::default();
        assert!(model.reward(&[80.0, 0.0, 0.0]).is_finite());
        assert_eq!(model.reward(&[100.0, 0.0, 0.0]), f32::NEG_INFINITY);
    }

    #[test]
    fn test_closure_is_a_reward_model() {
        let model = |s: &[f32]| s.iter().sum::<f32>();
        assert_eq!(model.reward(&[1.0, 2.0]), 3.0);
    }

    proptest! {
        #[test]
        fn prop_reward_decreases_with_deviation(
            a in prop::collection::vec(-3.0f32..3.0, 3),
            extra in 0.01f32..2.0,
        ) {
            let model = DistancePenalty::default();
            let d1: f32 = a.iter().map(|s| s.abs()).sum();

            // Push the first component further from zero.
            let mut b = a.clone();
            b[0] = b[0].abs() + extra;
            let d2: f32 = b.iter().map(|s| s.abs()).sum();
            prop_assume!(d2 > d1);

            prop_assert!(model.reward(&a) > model.reward(&b));
        }
    }
}
