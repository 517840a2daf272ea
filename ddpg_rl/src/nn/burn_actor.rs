//! Burn-backed deterministic actor with its own target copy and optimizer.

use burn::module::AutodiffModule;
use burn::optim::{AdamConfig, GradientsParams, Optimizer};
use burn::prelude::*;
use burn::tensor::backend::AutodiffBackend;

use crate::algorithms::ddpg::{ApproxResult, DdpgConfig, DeterministicActor};
use crate::core::target_network::{hard_copy, soft_update};
use crate::error::ApproximatorError;

use super::networks::{ActorNetwork, ActorNetworkConfig};
use super::tensor_ops::{rows_to_tensor, tensor_to_rows, tensor_to_scalar};

const NETWORK: &str = "actor";

/// Online actor, target actor and optimizer.
///
/// Inference runs on the inner (non-autodiff) backend through `valid()`;
/// training runs on `B`.
pub struct BurnActor<B: AutodiffBackend, O> {
    online: ActorNetwork<B>,
    target: ActorNetwork<B>,
    optimizer: O,
    lr: f64,
    tau: f32,
    state_dim: usize,
    action_dim: usize,
    device: B::Device,
}

impl<B, O> BurnActor<B, O>
where
    B: AutodiffBackend,
    O: Optimizer<ActorNetwork<B>, B>,
{
    /// Wrap an initialised network. The target starts as an exact copy.
    pub fn new(
        network: ActorNetwork<B>,
        optimizer: O,
        state_dim: usize,
        action_dim: usize,
        lr: f64,
        tau: f32,
        device: &B::Device,
    ) -> Self {
        Self {
            target: hard_copy(&network),
            online: network,
            optimizer,
            lr,
            tau,
            state_dim,
            action_dim,
            device: device.clone(),
        }
    }

    pub fn online(&self) -> &ActorNetwork<B> {
        &self.online
    }

    pub fn target(&self) -> &ActorNetwork<B> {
        &self.target
    }

    fn forward_rows(&self, network: &ActorNetwork<B>, states: &[Vec<f32>]) -> ApproxResult<Vec<Vec<f32>>> {
        let network = network.valid();
        let states = rows_to_tensor::<B::InnerBackend>(states, self.state_dim, NETWORK, &self.device)?;
        tensor_to_rows(network.forward(states), NETWORK)
    }
}

/// Reference actor built from a controller configuration, trained with Adam.
pub fn adam_actor<B: AutodiffBackend>(
    config: &DdpgConfig,
    device: &B::Device,
) -> BurnActor<B, impl Optimizer<ActorNetwork<B>, B>> {
    let network = ActorNetworkConfig::new(config.state_dim, config.action_dim)
        .with_hidden_size(config.hidden_size)
        .init(device);

    BurnActor::new(
        network,
        AdamConfig::new().init(),
        config.state_dim,
        config.action_dim,
        config.actor_lr,
        config.tau,
        device,
    )
}

impl<B, O> DeterministicActor for BurnActor<B, O>
where
    B: AutodiffBackend,
    O: Optimizer<ActorNetwork<B>, B>,
{
    fn state_dim(&self) -> usize {
        self.state_dim
    }

    fn action_dim(&self) -> usize {
        self.action_dim
    }

    fn predict(&self, states: &[Vec<f32>]) -> ApproxResult<Vec<Vec<f32>>> {
        self.forward_rows(&self.online, states)
    }

    fn predict_target(&self, states: &[Vec<f32>]) -> ApproxResult<Vec<Vec<f32>>> {
        self.forward_rows(&self.target, states)
    }

    fn train(&mut self, states: &[Vec<f32>], action_gradients: &[Vec<f32>]) -> ApproxResult<()> {
        if action_gradients.len() != states.len() {
            return Err(ApproximatorError::Shape {
                network: NETWORK,
                expected: states.len(),
                actual: action_gradients.len(),
            });
        }

        let states = rows_to_tensor::<B>(states, self.state_dim, NETWORK, &self.device)?;
        let gradients = rows_to_tensor::<B>(action_gradients, self.action_dim, NETWORK, &self.device)?;

        // Ascend Q: descend on -Σ μ(s)·∂Q/∂a with the gradient held constant.
        let actions = self.online.forward(states);
        let loss = -(actions * gradients).sum();
        tensor_to_scalar(loss.clone(), NETWORK)?;

        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &self.online);
        self.online = self.optimizer.step(self.lr, self.online.clone(), grads);
        Ok(())
    }

    fn update_target(&mut self) {
        self.target = soft_update(&self.online, self.target.clone(), self.tau);
    }
}
