//! Requests carried to the controller thread.

use crossbeam_channel::Sender;

use crate::algorithms::ddpg::EpisodeOutcome;
use crate::error::Result;

/// Messages sent to the controller thread by [`PolicyHandle`](crate::server::PolicyHandle)s.
///
/// Each request carries its own one-shot reply channel.
#[derive(Debug)]
pub enum PolicyMsg {
    /// Compute an action for `state` and record the step.
    QueryAction {
        state: Vec<f32>,
        reply: Sender<Result<Vec<f32>>>,
    },

    /// Close the current episode.
    EpisodeEnd { reply: Sender<Result<EpisodeOutcome>> },

    /// Stop serving and hand the controller back.
    Stop,
}
