//! Function approximator interfaces used by the controller.
//!
//! The controller never touches tensors. It talks to an actor and a critic
//! through these two traits, in plain row-major batches (`&[Vec<f32>]`, one
//! row per sample). Each implementation owns its online network, its target
//! copy and its optimizer.
//!
//! # Contract
//!
//! - `predict*` calls are pure with respect to parameters.
//! - `train` performs exactly one optimizer step on the online network.
//! - `update_target` performs one soft update
//!   `θ' ← τ·θ + (1 − τ)·θ'` with the implementation's own `τ`.
//! - Failures are reported as [`ApproximatorError`] and are never retried by
//!   the caller.

use crate::error::ApproximatorError;

/// Result type for approximator calls.
pub type ApproxResult<T> = Result<T, ApproximatorError>;

/// Deterministic policy `μ(s) → a`.
pub trait DeterministicActor {
    /// Width of every state row.
    fn state_dim(&self) -> usize;

    /// Width of every action row.
    fn action_dim(&self) -> usize;

    /// Actions from the online network, one row per state.
    fn predict(&self, states: &[Vec<f32>]) -> ApproxResult<Vec<Vec<f32>>>;

    /// Actions from the target network, one row per state.
    fn predict_target(&self, states: &[Vec<f32>]) -> ApproxResult<Vec<Vec<f32>>>;

    /// One gradient step pushing `μ(s)` along `∂Q/∂a`.
    ///
    /// `action_gradients[i]` is the critic's gradient with respect to the
    /// action evaluated at `(states[i], μ(states[i]))`. The step ascends Q.
    fn train(&mut self, states: &[Vec<f32>], action_gradients: &[Vec<f32>]) -> ApproxResult<()>;

    /// Soft-update the target network toward the online network.
    fn update_target(&mut self);
}

/// What a critic reports after one regression step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CriticUpdate {
    /// Mean squared TD error before the step.
    pub loss: f32,
    /// Largest Q estimate in the batch before the step.
    pub max_q: f32,
}

/// Action-value function `Q(s, a) → ℝ`.
pub trait ActionValueCritic {
    /// Q estimates from the online network, one per row.
    fn predict(&self, states: &[Vec<f32>], actions: &[Vec<f32>]) -> ApproxResult<Vec<f32>>;

    /// Q estimates from the target network, one per row.
    fn predict_target(&self, states: &[Vec<f32>], actions: &[Vec<f32>])
        -> ApproxResult<Vec<f32>>;

    /// One regression step of the online network toward `targets`.
    fn train(
        &mut self,
        states: &[Vec<f32>],
        actions: &[Vec<f32>],
        targets: &[f32],
    ) -> ApproxResult<CriticUpdate>;

    /// `∂Q(s, a)/∂a` for each row, from the online network.
    fn action_gradients(
        &self,
        states: &[Vec<f32>],
        actions: &[Vec<f32>],
    ) -> ApproxResult<Vec<Vec<f32>>>;

    /// Soft-update the target network toward the online network.
    fn update_target(&mut self);
}
