//! DDPG (Deep Deterministic Policy Gradient) controller.
//!
//! DDPG learns a deterministic policy `μ(s)` together with an action-value
//! function `Q(s, a)`:
//! - the critic regresses toward bootstrapped targets computed with slowly
//!   moving target copies of both networks
//! - the actor follows the critic's action gradient `∂Q/∂a`
//! - exploration comes from temporally correlated OU noise
//!
//! # Architecture
//!
//! ```text
//! PolicyController
//! ├── DeterministicActor  (online μ, target μ', optimizer)
//! ├── ActionValueCritic   (online Q, target Q', optimizer)
//! ├── ReplayBuffer
//! ├── OrnsteinUhlenbeckNoise
//! ├── Trajectory          (current episode)
//! └── RewardModel
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use ddpg_rl::algorithms::ddpg::{DdpgConfig, PolicyController};
//! use ddpg_rl::nn::{adam_actor, adam_critic};
//!
//! let config = DdpgConfig::reference(3, 3);
//! let actor = adam_actor::<MyBackend>(&config, &device);
//! let critic = adam_critic::<MyBackend>(&config, &device);
//! let mut controller = PolicyController::new(config, actor, critic)?;
//!
//! let action = controller.query_action(&state)?;
//! let outcome = controller.notify_episode_end()?;
//! ```

mod approximator;
mod config;
mod controller;
mod outcome;


pub use approximator::{ActionValueCritic, ApproxResult, CriticUpdate, DeterministicActor};
pub use config::DdpgConfig;
pub use controller::{td_targets, PolicyController};
pub use outcome::{ControllerPhase, EpisodeKind, EpisodeOutcome};
