//! Ornstein-Uhlenbeck exploration noise.
//!
//! Physical actuators have inertia, so independent per-step noise produces
//! jitter the arm cannot follow. The OU process gives temporally correlated
//! perturbations that revert toward a mean:
//!
//! ```text
//! x ← x + θ(μ − x) + σ·N(0, 1)
//! ```
//!
//! The current value `x` is the only state. It persists across steps within an
//! episode and is reset to `μ` at every episode boundary.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

/// Parameters of the OU process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OuNoiseConfig {
    /// Long-run mean μ.
    pub mu: f32,
    /// Mean-reversion rate θ.
    pub theta: f32,
    /// Volatility σ.
    pub sigma: f32,
}

impl Default for OuNoiseConfig {
    fn default() -> Self {
        Self {
            mu: 0.0,
            theta: 0.15,
            sigma: 0.3,
        }
    }
}

impl OuNoiseConfig {
    /// Set the mean.
    pub fn with_mu(mut self, mu: f32) -> Self {
        self.mu = mu;
        self
    }

    /// Set the reversion rate.
    pub fn with_theta(mut self, theta: f32) -> Self {
        self.theta = theta;
        self
    }

    /// Set the volatility.
    pub fn with_sigma(mut self, sigma: f32) -> Self {
        self.sigma = sigma;
        self
    }
}

/// Stateful Ornstein-Uhlenbeck process over `dim` independent components.
#[derive(Debug, Clone)]
pub struct OrnsteinUhlenbeckNoise {
    config: OuNoiseConfig,
    state: Vec<f32>,
    rng: StdRng,
}

impl OrnsteinUhlenbeckNoise {
    /// Create a process of dimension `dim`, starting at `μ`.
    pub fn new(dim: usize, config: OuNoiseConfig, seed: u64) -> Self {
        Self {
            state: vec![config.mu; dim],
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Start the process from an explicit value instead of `μ`.
    pub fn with_initial_state(mut self, state: Vec<f32>) -> Self {
        self.state = state;
        self
    }

    /// Advance one step and return the new value.
    pub fn step(&mut self) -> &[f32] {
        let OuNoiseConfig { mu, theta, sigma } = self.config;
        for x in self.state.iter_mut() {
            let shock: f32 = StandardNormal.sample(&mut self.rng);
            *x += theta * (mu - *x) + sigma * shock;
        }
        &self.state
    }

    /// Reset the value to `μ`.
    pub fn reset(&mut self) {
        let mu = self.config.mu;
        self.state.iter_mut().for_each(|x| *x = mu);
    }

    /// Current value without advancing.
    pub fn state(&self) -> &[f32] {
        &self.state
    }

    /// Number of components.
    pub fn dim(&self) -> usize {
        self.state.len()
    }

    /// Process parameters.
    pub fn config(&self) -> &OuNoiseConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_starts_and_resets_at_mean() {
        let config = OuNoiseConfig::default().with_mu(0.5);
        let mut noise = OrnsteinUhlenbeckNoise::new(3, config, 42);
        assert_eq!(noise.state(), &[0.5, 0.5, 0.5]);

        for _ in 0..10 {
            noise.step();
        }
        assert_ne!(noise.state(), &[0.5, 0.5, 0.5]);

        noise.reset();
        assert_eq!(noise.state(), &[0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_step_is_temporally_correlated() {
        // Consecutive values of an OU process with small θ stay close to each
        // other relative to the stationary spread.
        let mut noise = OrnsteinUhlenbeckNoise::new(1, OuNoiseConfig::default(), 7);
        let mut prev = noise.step()[0];
        let mut diff_sq = 0.0;
        let mut values = Vec::new();
        for _ in 0..2000 {
            let x = noise.step()[0];
            diff_sq += (x - prev) * (x - prev);
            values.push(x);
            prev = x;
        }
        let mean = values.iter().sum::<f32>() / values.len() as f32;
        let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f32>() / values.len() as f32;
        let mean_diff_sq = diff_sq / values.len() as f32;

        // For an AR(1) with coefficient (1-θ), E[(x_t - x_{t-1})²] = 2θ·Var.
        assert!(mean_diff_sq < var, "steps should be smaller than the spread");
    }

    #[test]
    fn test_same_seed_same_path() {
        let mut a = OrnsteinUhlenbeckNoise::new(2, OuNoiseConfig::default(), 99);
        let mut b = OrnsteinUhlenbeckNoise::new(2, OuNoiseConfig::default(), 99);
        for _ in 0..5 {
            assert_eq!(a.step(), b.step());
        }
    }

    proptest! {
        #[test]
        fn prop_zero_sigma_reverts_monotonically(
            mu in -5.0f32..5.0,
            x0 in -10.0f32..10.0,
            theta in 0.01f32..1.0,
        ) {
            let config = OuNoiseConfig { mu, theta, sigma: 0.0 };
            let mut noise = OrnsteinUhlenbeckNoise::new(1, config, 0)
                .with_initial_state(vec![x0]);

            let lo = mu.min(x0);
            let hi = mu.max(x0);
            let mut prev_dist = (x0 - mu).abs();
            for _ in 0..200 {
                let x = noise.step()[0];
                prop_assert!(x >= lo - 1e-4 && x <= hi + 1e-4, "{} left [{}, {}]", x, lo, hi);
                let dist = (x - mu).abs();
                prop_assert!(dist <= prev_dist + 1e-5);
                prev_dist = dist;
            }
        }
    }
}
