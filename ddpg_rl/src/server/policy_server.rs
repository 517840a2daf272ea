//! Dedicated controller thread and the handles that talk to it.
//!
//! The controller is single-threaded by construction. Moving it onto its own
//! thread and funnelling every request through one channel serialises
//! requests in arrival order, no matter how many transport threads hold a
//! [`PolicyHandle`].
//!
//! ```text
//! transport thread ─┐
//! transport thread ─┼─► PolicyMsg channel ─► controller thread
//! transport thread ─┘          ▲                    │
//!                              └── one-shot reply ◄─┘
//! ```

use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};

use crate::algorithms::ddpg::{ActionValueCritic, DeterministicActor, EpisodeOutcome, PolicyController};
use crate::core::reward::RewardModel;
use crate::error::{DdpgError, Result};
use crate::messages::PolicyMsg;
use crate::metrics::SharedControllerStats;

/// Capacity of the request queue.
const REQUEST_QUEUE: usize = 64;

/// Cloneable client for a running [`PolicyServer`].
#[derive(Debug, Clone)]
pub struct PolicyHandle {
    tx: Sender<PolicyMsg>,
}

impl PolicyHandle {
    /// Action for `state`. Blocks until the controller replies.
    pub fn query_action(&self, state: &[f32]) -> Result<Vec<f32>> {
        let (reply, rx) = crossbeam_channel::bounded(1);
        self.request(
            PolicyMsg::QueryAction {
                state: state.to_vec(),
                reply,
            },
            rx,
        )
    }

    /// Close the current episode. Blocks until any training step finishes.
    pub fn notify_episode_end(&self) -> Result<EpisodeOutcome> {
        let (reply, rx) = crossbeam_channel::bounded(1);
        self.request(PolicyMsg::EpisodeEnd { reply }, rx)
    }

    fn request<T>(&self, msg: PolicyMsg, rx: Receiver<Result<T>>) -> Result<T> {
        self.tx.send(msg).map_err(|_| DdpgError::ServerDisconnected)?;
        rx.recv().map_err(|_| DdpgError::ServerDisconnected)?
    }
}

/// Owns the controller thread.
pub struct PolicyServer<A, C, R> {
    thread: JoinHandle<PolicyController<A, C, R>>,
    handle: PolicyHandle,
    stats: SharedControllerStats,
}

impl<A, C, R> PolicyServer<A, C, R>
where
    A: DeterministicActor + Send + 'static,
    C: ActionValueCritic + Send + 'static,
    R: RewardModel + Send + 'static,
{
    /// Move `controller` onto a named thread and start serving.
    pub fn spawn(controller: PolicyController<A, C, R>) -> Result<Self> {
        let (tx, rx) = crossbeam_channel::bounded(REQUEST_QUEUE);
        let stats = controller.stats();

        let thread = std::thread::Builder::new()
            .name("ddpg-controller".to_string())
            .spawn(move || serve(controller, rx))
            .map_err(DdpgError::ServerSpawn)?;

        log::info!("policy server started");

        Ok(Self {
            thread,
            handle: PolicyHandle { tx },
            stats,
        })
    }

    /// A new client handle.
    pub fn handle(&self) -> PolicyHandle {
        self.handle.clone()
    }

    /// Shared controller statistics.
    pub fn stats(&self) -> SharedControllerStats {
        SharedControllerStats::clone(&self.stats)
    }

    /// Stop serving and take the controller back.
    ///
    /// Requests already queued are answered first. Handles still held
    /// elsewhere get [`DdpgError::ServerDisconnected`] afterwards.
    pub fn shutdown(self) -> Result<PolicyController<A, C, R>> {
        // A send error means the thread already exited; join reports why.
        let _ = self.handle.tx.send(PolicyMsg::Stop);
        let controller = self.thread.join().map_err(|_| DdpgError::ServerPanicked)?;
        log::info!(
            "policy server stopped after {} episodes",
            controller.episode_count()
        );
        Ok(controller)
    }
}

fn serve<A, C, R>(
    mut controller: PolicyController<A, C, R>,
    rx: Receiver<PolicyMsg>,
) -> PolicyController<A, C, R>
where
    A: DeterministicActor,
    C: ActionValueCritic,
    R: RewardModel,
{
    while let Ok(msg) = rx.recv() {
        match msg {
            PolicyMsg::QueryAction { state, reply } => {
                // The caller may have given up waiting; nothing to do then.
                let _ = reply.send(controller.query_action(&state));
            }
            PolicyMsg::EpisodeEnd { reply } => {
                let _ = reply.send(controller.notify_episode_end());
            }
            PolicyMsg::Stop => break,
        }
    }
    controller
}
