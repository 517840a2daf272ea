//! Core building blocks of the learning loop.

pub mod noise;
pub mod replay_buffer;
pub mod reward;
pub mod target_network;
pub mod trajectory;
pub mod transition;

pub use noise::{OrnsteinUhlenbeckNoise, OuNoiseConfig};
pub use replay_buffer::ReplayBuffer;
pub use reward::{DistancePenalty, RewardModel};
pub use target_network::{hard_copy, soft_update};
pub use trajectory::Trajectory;
pub use transition::{Transition, TransitionBatch};
