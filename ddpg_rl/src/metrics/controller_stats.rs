//! Counters and recent results published by the controller.
//!
//! The controller is the only writer. Observers on other threads take a
//! short read lock and copy what they need.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::RwLock;

/// Number of evaluation returns kept for averaging.
pub const EVAL_HISTORY: usize = 100;

/// Controller progress snapshot.
#[derive(Debug, Clone, Default)]
pub struct ControllerStats {
    /// Inference requests served.
    pub inference_calls: u64,
    /// Episode end signals processed.
    pub episodes: u64,
    /// Training steps completed.
    pub train_steps: u64,
    /// Episodes that added data but did not reach the batch threshold.
    pub insufficient_data_episodes: u64,
    /// Episodes with fewer than two recorded states.
    pub degenerate_episodes: u64,
    /// Transitions dropped for a non-finite reward.
    pub skipped_transitions: u64,
    /// Evaluation episodes completed.
    pub eval_episodes: u64,
    /// Transitions currently held by the replay buffer.
    pub buffer_len: usize,
    /// Critic loss of the most recent training step.
    pub last_critic_loss: Option<f32>,
    /// Largest Q estimate of the most recent training step.
    pub last_max_q: Option<f32>,
    /// Most recent evaluation returns, oldest first.
    eval_returns: VecDeque<f32>,
}

impl ControllerStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed training step.
    pub fn record_train_step(&mut self, critic_loss: f32, max_q: f32) {
        self.train_steps += 1;
        self.last_critic_loss = Some(critic_loss);
        self.last_max_q = Some(max_q);
    }

    /// Record the return of an evaluation episode.
    pub fn record_eval_return(&mut self, ret: f32) {
        self.eval_episodes += 1;
        if self.eval_returns.len() == EVAL_HISTORY {
            self.eval_returns.pop_front();
        }
        self.eval_returns.push_back(ret);
    }

    /// Most recent evaluation return.
    pub fn last_eval_return(&self) -> Option<f32> {
        self.eval_returns.back().copied()
    }

    /// Mean of the retained evaluation returns.
    pub fn mean_eval_return(&self) -> Option<f32> {
        if self.eval_returns.is_empty() {
            return None;
        }
        Some(self.eval_returns.iter().sum::<f32>() / self.eval_returns.len() as f32)
    }

    /// Retained evaluation returns, oldest first.
    pub fn eval_returns(&self) -> impl Iterator<Item = f32> + '_ {
        self.eval_returns.iter().copied()
    }
}

/// Stats shared between the controller and observers.
pub type SharedControllerStats = Arc<RwLock<ControllerStats>>;

/// Create new shared stats.
pub fn controller_stats() -> SharedControllerStats {
    Arc::new(RwLock::new(ControllerStats::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_step_updates_last_values() {
        let mut stats = ControllerStats::new();
        assert!(stats.last_critic_loss.is_none());

        stats.record_train_step(2.5, 7.0);
        stats.record_train_step(1.5, 6.0);

        assert_eq!(stats.train_steps, 2);
        assert_eq!(stats.last_critic_loss, Some(1.5));
        assert_eq!(stats.last_max_q, Some(6.0));
    }

    #[test]
    fn test_eval_history_is_bounded() {
        let mut stats = ControllerStats::new();
        assert!(stats.mean_eval_return().is_none());

        for i in 0..(EVAL_HISTORY + 5) {
            stats.record_eval_return(i as f32);
        }

        assert_eq!(stats.eval_episodes, (EVAL_HISTORY + 5) as u64);
        assert_eq!(stats.eval_returns().count(), EVAL_HISTORY);
        assert_eq!(stats.eval_returns().next(), Some(5.0));
        assert_eq!(stats.last_eval_return(), Some((EVAL_HISTORY + 4) as f32));
    }

    #[test]
    fn test_mean_eval_return() {
        let mut stats = ControllerStats::new();
        stats.record_eval_return(-10.0);
        stats.record_eval_return(-20.0);
        assert_eq!(stats.mean_eval_return(), Some(-15.0));
    }

    #[test]
    fn test_shared_stats_visible_across_threads() {
        let stats = controller_stats();
        let writer = Arc::clone(&stats);

        std::thread::spawn(move || {
            writer.write().record_eval_return(-3.0);
        })
        .join()
        .unwrap();

        assert_eq!(stats.read().last_eval_return(), Some(-3.0));
    }
}
