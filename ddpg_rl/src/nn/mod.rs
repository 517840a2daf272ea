//! Burn implementations of the actor and critic.
//!
//! # Modules
//!
//! - [`networks`]: Reference MLPs for the actor and the critic
//! - [`burn_actor`]: [`BurnActor`], a [`DeterministicActor`](crate::algorithms::ddpg::DeterministicActor)
//! - [`burn_critic`]: [`BurnCritic`], an [`ActionValueCritic`](crate::algorithms::ddpg::ActionValueCritic)
//! - [`tensor_ops`]: Host rows to tensors and back

pub mod burn_actor;
pub mod burn_critic;
pub mod networks;
pub mod tensor_ops;

pub use burn_actor::{adam_actor, BurnActor};
pub use burn_critic::{adam_critic, BurnCritic};
pub use networks::{ActorNetwork, ActorNetworkConfig, CriticNetwork, CriticNetworkConfig, OUTPUT_INIT};
