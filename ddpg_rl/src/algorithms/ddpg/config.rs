//! DDPG configuration.
//!
//! Everything here is fixed for the lifetime of a controller. Values can come
//! from code (presets plus `with_*` builders) or from a JSON document; missing
//! JSON fields fall back to the reference preset.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::noise::OuNoiseConfig;
use crate::error::{DdpgError, Result};

// ============================================================================
// DDPG Configuration
// ============================================================================

/// Configuration for the DDPG policy controller.
///
/// The reference preset mirrors the grasping setup this controller was tuned
/// on: small networks, a 10k-transition buffer and large minibatches drawn
/// once per episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DdpgConfig {
    // ========================================================================
    // Problem Dimensions
    // ========================================================================
    /// Length of every state vector.
    pub state_dim: usize,

    /// Length of every action vector.
    pub action_dim: usize,

    // ========================================================================
    // Replay Buffer Settings
    // ========================================================================
    /// Maximum transitions stored; oldest evicted first.
    pub buffer_capacity: usize,

    /// Minibatch size. A training step runs only when the buffer holds
    /// strictly more transitions than this.
    pub batch_size: usize,

    // ========================================================================
    // Algorithm Hyperparameters
    // ========================================================================
    /// Discount factor γ.
    pub gamma: f32,

    /// Soft target update coefficient τ.
    pub tau: f32,

    /// Actor learning rate.
    pub actor_lr: f64,

    /// Critic learning rate.
    pub critic_lr: f64,

    /// Hidden layer width of the reference networks.
    pub hidden_size: usize,

    // ========================================================================
    // Episode Schedule
    // ========================================================================
    /// Every `eval_period` completed episodes, the next one is an evaluation
    /// episode (no noise, no buffer writes, no training).
    pub eval_period: usize,

    /// Whether the controller learns at all. When false the policy is frozen.
    pub is_training: bool,

    // ========================================================================
    // Exploration and Randomness
    // ========================================================================
    /// Ornstein-Uhlenbeck exploration noise parameters.
    pub noise: OuNoiseConfig,

    /// Seed for buffer sampling and exploration noise.
    pub seed: u64,
}

impl Default for DdpgConfig {
    fn default() -> Self {
        Self::reference(3, 3)
    }
}

impl DdpgConfig {
    /// Reference settings for the given dimensions.
    pub fn reference(state_dim: usize, action_dim: usize) -> Self {
        Self {
            state_dim,
            action_dim,

            // Buffer
            buffer_capacity: 10_000,
            batch_size: 1_000,

            // Hyperparameters
            gamma: 0.99,
            tau: 0.001,
            actor_lr: 1e-4,
            critic_lr: 1e-3,
            hidden_size: 20,

            // Schedule
            eval_period: 10,
            is_training: true,

            // Exploration
            noise: OuNoiseConfig::default(),
            seed: 1234,
        }
    }

    /// Parse a JSON document. Missing fields take reference values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check ranges and consistency.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(DdpgError::InvalidConfig(msg));

        if self.state_dim == 0 || self.action_dim == 0 {
            return fail(format!(
                "dimensions must be positive (state_dim={}, action_dim={})",
                self.state_dim, self.action_dim
            ));
        }
        if self.buffer_capacity == 0 {
            return fail("buffer_capacity must be positive".to_string());
        }
        if self.batch_size == 0 {
            return fail("batch_size must be positive".to_string());
        }
        if self.batch_size >= self.buffer_capacity {
            return fail(format!(
                "batch_size ({}) must be smaller than buffer_capacity ({}) or training never starts",
                self.batch_size, self.buffer_capacity
            ));
        }
        if !(self.tau > 0.0 && self.tau <= 1.0) {
            return fail(format!("tau must be in (0, 1], got {}", self.tau));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return fail(format!("gamma must be in [0, 1], got {}", self.gamma));
        }
        if !(self.actor_lr > 0.0 && self.critic_lr > 0.0) {
            return fail("learning rates must be positive".to_string());
        }
        if self.eval_period == 0 {
            return fail("eval_period must be positive".to_string());
        }
        if self.noise.sigma < 0.0 || self.noise.theta < 0.0 {
            return fail("noise theta and sigma must be non-negative".to_string());
        }
        Ok(())
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set buffer capacity.
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Set batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set discount factor.
    pub fn with_gamma(mut self, gamma: f32) -> Self {
        self.gamma = gamma;
        self
    }

    /// Set soft update coefficient.
    pub fn with_tau(mut self, tau: f32) -> Self {
        self.tau = tau;
        self
    }

    /// Set actor learning rate.
    pub fn with_actor_lr(mut self, lr: f64) -> Self {
        self.actor_lr = lr;
        self
    }

    /// Set critic learning rate.
    pub fn with_critic_lr(mut self, lr: f64) -> Self {
        self.critic_lr = lr;
        self
    }

    /// Set hidden layer width.
    pub fn with_hidden_size(mut self, size: usize) -> Self {
        self.hidden_size = size;
        self
    }

    /// Set evaluation period.
    pub fn with_eval_period(mut self, period: usize) -> Self {
        self.eval_period = period;
        self
    }

    /// Enable or disable learning.
    pub fn with_training(mut self, is_training: bool) -> Self {
        self.is_training = is_training;
        self
    }

    /// Set exploration noise parameters.
    pub fn with_noise(mut self, noise: OuNoiseConfig) -> Self {
        self.noise = noise;
        self
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
