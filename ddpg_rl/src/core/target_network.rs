//! Soft (Polyak) updates of target networks.
//!
//! The critic regresses toward `r + γ·Q'(s', μ'(s'))`. If `Q'` and `μ'` were
//! the online networks, every gradient step would move the regression
//! target. Target copies that trail the online weights keep it still enough
//! for TD learning to converge:
//!
//! ```text
//! θ_target ← τ·θ_online + (1 − τ)·θ_target
//! ```
//!
//! `τ` is small (0.001 by default), so targets follow the online networks
//! over hundreds of updates.
//!
//! # Usage
//!
//! ```ignore
//! use ddpg_rl::core::target_network::soft_update;
//!
//! // After both online networks have taken their gradient step:
//! target_actor = soft_update(&actor, target_actor, tau);
//! target_critic = soft_update(&critic, target_critic, tau);
//! ```

use burn::module::{Module, ModuleMapper, Param};
use burn::prelude::*;

// ============================================================================
// Soft Update Implementation via ModuleMapper
// ============================================================================

/// Collects every float parameter of a module, flattened to 1D.
///
/// Parameters are collected in traversal order, which is deterministic for
/// modules of the same architecture. This is how online and target
/// parameters are paired.
struct ParamExtractor<B: Backend> {
    params: Vec<Tensor<B, 1>>,
}

impl<B: Backend> ModuleMapper<B> for ParamExtractor<B> {
    fn map_float<const D: usize>(&mut self, param: Param<Tensor<B, D>>) -> Param<Tensor<B, D>> {
        let val = param.val().detach();
        let total_size: usize = val.dims().iter().product();
        self.params.push(val.reshape([total_size]));
        param
    }
}

/// Interpolates each target parameter toward its online counterpart.
struct SoftUpdateMapper<B: Backend> {
    online_params: Vec<Tensor<B, 1>>,
    tau: f32,
    index: usize,
}

impl<B: Backend> ModuleMapper<B> for SoftUpdateMapper<B> {
    fn map_float<const D: usize>(&mut self, param: Param<Tensor<B, D>>) -> Param<Tensor<B, D>> {
        // Targets are never differentiated; keep them off the autodiff graph.
        let target_val = param.val().detach();
        let shape = target_val.dims();
        let total_size: usize = shape.iter().product();

        let idx = self.index;
        self.index += 1;

        match self.online_params.get(idx) {
            Some(online) => {
                let interpolated = online.clone().mul_scalar(self.tau)
                    + target_val.reshape([total_size]).mul_scalar(1.0 - self.tau);
                Param::initialized(param.id.clone(), interpolated.reshape(shape))
            }
            // Architectures differ; leave the parameter alone.
            None => param,
        }
    }
}

/// Return `target` moved a fraction `tau` of the way toward `online`.
///
/// `tau = 1` yields an exact copy of `online`; `tau = 0` returns `target`
/// untouched. Parameters are matched by traversal order, so both modules
/// must share an architecture.
pub fn soft_update<B, M>(online: &M, target: M, tau: f32) -> M
where
    B: Backend,
    M: Module<B>,
{
    if (tau - 1.0).abs() < f32::EPSILON {
        return hard_copy(online);
    }
    if tau.abs() < f32::EPSILON {
        return target;
    }

    let mut extractor = ParamExtractor { params: Vec::new() };
    let _ = online.clone().map(&mut extractor);

    let mut updater = SoftUpdateMapper {
        online_params: extractor.params,
        tau,
        index: 0,
    };
    target.map(&mut updater)
}

/// Exact copy of the online module, used to initialise targets.
pub fn hard_copy<B, M>(online: &M) -> M
where
    B: Backend,
    M: Module<B>,
{
    online.clone()
}
