//! # ddpg_rl: online DDPG policy controller
//!
//! Learns a continuous control policy while serving it. An external system
//! asks for actions one state at a time and signals episode boundaries; the
//! controller explores with Ornstein-Uhlenbeck noise, stores the episode as
//! transitions and runs one actor-critic update per episode.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  transport threads ──► PolicyHandle ──► PolicyServer thread      │
//! │                                          │                       │
//! │                                          ▼                       │
//! │                                  ┌──────────────────┐            │
//! │   query_action(s) ─────────────► │ PolicyController │            │
//! │   notify_episode_end() ────────► │                  │            │
//! │                                  └──┬───┬───┬───┬───┘            │
//! │                                     │   │   │   │                │
//! │                     DeterministicActor  │   │   RewardModel      │
//! │                        ActionValueCritic│   │                    │
//! │                                ReplayBuffer OU noise             │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ddpg_rl::{adam_actor, adam_critic, DdpgConfig, PolicyController, PolicyServer};
//!
//! let config = DdpgConfig::reference(3, 3);
//! let actor = adam_actor::<MyBackend>(&config, &device);
//! let critic = adam_critic::<MyBackend>(&config, &device);
//! let controller = PolicyController::new(config, actor, critic)?;
//!
//! let server = PolicyServer::spawn(controller)?;
//! let handle = server.handle();
//! let action = handle.query_action(&state)?;
//! let outcome = handle.notify_episode_end()?;
//! ```

pub mod algorithms;
pub mod core;
pub mod error;
pub mod messages;
pub mod metrics;
pub mod nn;
pub mod server;

#[cfg(test)]
pub(crate) mod testing;

// Controller
pub use algorithms::ddpg::{
    td_targets, ActionValueCritic, ApproxResult, ControllerPhase, CriticUpdate, DdpgConfig,
    DeterministicActor, EpisodeKind, EpisodeOutcome, PolicyController,
};

// Building blocks
pub use self::core::{
    hard_copy, soft_update, DistancePenalty, OrnsteinUhlenbeckNoise, OuNoiseConfig, ReplayBuffer,
    RewardModel, Trajectory, Transition, TransitionBatch,
};

// Burn networks
pub use nn::{
    adam_actor, adam_critic, ActorNetwork, ActorNetworkConfig, BurnActor, BurnCritic,
    CriticNetwork, CriticNetworkConfig,
};

// Errors, stats and transport
pub use error::{ApproximatorError, DdpgError, Result};
pub use messages::PolicyMsg;
pub use metrics::{controller_stats, ControllerStats, SharedControllerStats};
pub use server::{PolicyHandle, PolicyServer};
