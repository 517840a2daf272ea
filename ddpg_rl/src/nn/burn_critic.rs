//! Burn-backed action-value critic with its own target copy and optimizer.

use burn::module::AutodiffModule;
use burn::optim::{AdamConfig, GradientsParams, Optimizer};
use burn::prelude::*;
use burn::tensor::backend::AutodiffBackend;

use crate::algorithms::ddpg::{ActionValueCritic, ApproxResult, CriticUpdate, DdpgConfig};
use crate::core::target_network::{hard_copy, soft_update};
use crate::error::ApproximatorError;

use super::networks::{CriticNetwork, CriticNetworkConfig};
use super::tensor_ops::{rows_to_tensor, tensor_to_rows, tensor_to_scalar, tensor_to_vec};

const NETWORK: &str = "critic";

/// Online critic, target critic and optimizer.
pub struct BurnCritic<B: AutodiffBackend, O> {
    online: CriticNetwork<B>,
    target: CriticNetwork<B>,
    optimizer: O,
    lr: f64,
    tau: f32,
    state_dim: usize,
    action_dim: usize,
    device: B::Device,
}

impl<B, O> BurnCritic<B, O>
where
    B: AutodiffBackend,
    O: Optimizer<CriticNetwork<B>, B>,
{
    /// Wrap an initialised network. The target starts as an exact copy.
    pub fn new(
        network: CriticNetwork<B>,
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

    pub fn online(&self) -> &CriticNetwork<B> {
        &self.online
    }

    pub fn target(&self) -> &CriticNetwork<B> {
        &self.target
    }

    fn inputs<BE: Backend<Device = B::Device>>(
        &self,
        states: &[Vec<f32>],
        actions: &[Vec<f32>],
    ) -> ApproxResult<(Tensor<BE, 2>, Tensor<BE, 2>)> {
        if actions.len() != states.len() {
            return Err(ApproximatorError::Shape {
                network: NETWORK,
                expected: states.len(),
                actual: actions.len(),
            });
        }
        Ok((
            rows_to_tensor::<BE>(states, self.state_dim, NETWORK, &self.device)?,
            rows_to_tensor::<BE>(actions, self.action_dim, NETWORK, &self.device)?,
        ))
    }

    fn evaluate(
        &self,
        network: &CriticNetwork<B>,
        states: &[Vec<f32>],
        actions: &[Vec<f32>],
    ) -> ApproxResult<Vec<f32>> {
        let network = network.valid();
        let (states, actions) = self.inputs::<B::InnerBackend>(states, actions)?;
        tensor_to_vec(network.forward(states, actions), NETWORK)
    }
}

/// Reference critic built from a controller configuration, trained with Adam.
pub fn adam_critic<B: AutodiffBackend>(
    config: &DdpgConfig,
    device: &B::Device,
) -> BurnCritic<B, impl Optimizer<CriticNetwork<B>, B>> {
    let network = CriticNetworkConfig::new(config.state_dim, config.action_dim)
        .with_hidden_size(config.hidden_size)
        .init(device);

    BurnCritic::new(
        network,
        AdamConfig::new().init(),
        config.state_dim,
        config.action_dim,
        config.critic_lr,
        config.tau,
        device,
    )
}

impl<B, O> ActionValueCritic for BurnCritic<B, O>
where
    B: AutodiffBackend,
    O: Optimizer<CriticNetwork<B>, B>,
{
    fn predict(&self, states: &[Vec<f32>], actions: &[Vec<f32>]) -> ApproxResult<Vec<f32>> {
        self.evaluate(&self.online, states, actions)
    }

    fn predict_target(&self, states: &[Vec<f32>], actions: &[Vec<f32>]) -> ApproxResult<Vec<f32>> {
        self.evaluate(&self.target, states, actions)
    }

    fn train(
        &mut self,
        states: &[Vec<f32>],
        actions: &[Vec<f32>],
        targets: &[f32],
    ) -> ApproxResult<CriticUpdate> {
        if targets.len() != states.len() {
            return Err(ApproximatorError::Shape {
                network: NETWORK,
                expected: states.len(),
                actual: targets.len(),
            });
        }

        let (states, actions) = self.inputs::<B>(states, actions)?;
        let targets = Tensor::<B, 1>::from_floats(targets, &self.device);

        let q = self.online.forward(states, actions).flatten::<1>(0, 1);
        let max_q = tensor_to_scalar(q.clone().max(), NETWORK)?;

        let loss = (q - targets).powf_scalar(2.0).mean();
        let loss_val = tensor_to_scalar(loss.clone(), NETWORK)?;

        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &self.online);
        self.online = self.optimizer.step(self.lr, self.online.clone(), grads);

        Ok(CriticUpdate {
            loss: loss_val,
            max_q,
        })
    }

    fn action_gradients(
        &self,
        states: &[Vec<f32>],
        actions: &[Vec<f32>],
    ) -> ApproxResult<Vec<Vec<f32>>> {
        let (states, actions) = self.inputs::<B>(states, actions)?;
        let actions = actions.require_grad();

        // Rows are independent, so the gradient of the sum is per-row ∂Q/∂a.
        let q = self.online.forward(states, actions.clone());
        let grads = q.sum().backward();

        let gradient = actions.grad(&grads).ok_or(ApproximatorError::MissingGradient {
            network: NETWORK,
            input: "action",
        })?;
        tensor_to_rows(gradient, NETWORK)
    }

    fn update_target(&mut self) {
        self.target = soft_update(&self.online, self.target.clone(), self.tau);
    }
}
