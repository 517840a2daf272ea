//! Learning algorithms.
//!
//! - `ddpg`: online DDPG policy controller

pub mod ddpg;

pub use ddpg::{
    ActionValueCritic, ControllerPhase, CriticUpdate, DdpgConfig, DeterministicActor, EpisodeKind,
    EpisodeOutcome, PolicyController,
};
