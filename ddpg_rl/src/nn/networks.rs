//! Reference actor and critic networks.
//!
//! Both are single-hidden-layer MLPs sized for low-dimensional control:
//!
//! ```text
//! Actor   s ─► Linear(S→H) ─► ReLU ─► Linear(H→A) ─► tanh ─► a ∈ [-1, 1]^A
//!
//! Critic  s ─► Linear(S→H) ─► ReLU ─► Linear(H→H, no bias) ─┐
//!                                                            + ─► ReLU ─► Linear(H→1) ─► Q
//!         a ─────────────────────────► Linear(A→H) ─────────┘
//! ```
//!
//! Output layers start from a narrow uniform range so initial actions and
//! Q estimates sit near zero.

use burn::nn::{Initializer, Linear, LinearConfig};
use burn::prelude::*;
use burn::tensor::activation::{relu, tanh};

/// Default half-width of the uniform output layer initialisation.
pub const OUTPUT_INIT: f64 = 3e-3;

// ============================================================================
// Actor
// ============================================================================

/// Configuration for [`ActorNetwork`].
#[derive(Debug, Clone)]
pub struct ActorNetworkConfig {
    pub state_dim: usize,
    pub action_dim: usize,
    pub hidden_size: usize,
    /// Output weights and bias are drawn from `U(-output_init, output_init)`.
    pub output_init: f64,
}

impl ActorNetworkConfig {
    pub fn new(state_dim: usize, action_dim: usize) -> Self {
        Self {
            state_dim,
            action_dim,
            hidden_size: 20,
            output_init: OUTPUT_INIT,
        }
    }

    pub fn with_hidden_size(mut self, hidden_size: usize) -> Self {
        self.hidden_size = hidden_size;
        self
    }

    pub fn with_output_init(mut self, output_init: f64) -> Self {
        self.output_init = output_init;
        self
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> ActorNetwork<B> {
        ActorNetwork {
            hidden: LinearConfig::new(self.state_dim, self.hidden_size).init(device),
            output: LinearConfig::new(self.hidden_size, self.action_dim)
                .with_initializer(uniform(self.output_init))
                .init(device),
        }
    }
}

/// Deterministic policy network.
#[derive(Module, Debug)]
pub struct ActorNetwork<B: Backend> {
    hidden: Linear<B>,
    output: Linear<B>,
}

impl<B: Backend> ActorNetwork<B> {
    /// `[batch, S]` states to `[batch, A]` actions in `[-1, 1]`.
    pub fn forward(&self, states: Tensor<B, 2>) -> Tensor<B, 2> {
        let h = relu(self.hidden.forward(states));
        tanh(self.output.forward(h))
    }
}

// ============================================================================
// Critic
// ============================================================================

/// Configuration for [`CriticNetwork`].
#[derive(Debug, Clone)]
pub struct CriticNetworkConfig {
    pub state_dim: usize,
    pub action_dim: usize,
    pub hidden_size: usize,
    /// Output weights and bias are drawn from `U(-output_init, output_init)`.
    pub output_init: f64,
}

impl CriticNetworkConfig {
    pub fn new(state_dim: usize, action_dim: usize) -> Self {
        Self {
            state_dim,
            action_dim,
            hidden_size: 20,
            output_init: OUTPUT_INIT,
        }
    }

    pub fn with_hidden_size(mut self, hidden_size: usize) -> Self {
        self.hidden_size = hidden_size;
        self
    }

    pub fn with_output_init(mut self, output_init: f64) -> Self {
        self.output_init = output_init;
        self
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> CriticNetwork<B> {
        CriticNetwork {
            state_layer: LinearConfig::new(self.state_dim, self.hidden_size).init(device),
            state_merge: LinearConfig::new(self.hidden_size, self.hidden_size)
                .with_bias(false)
                .init(device),
            action_merge: LinearConfig::new(self.action_dim, self.hidden_size).init(device),
            output: LinearConfig::new(self.hidden_size, 1)
                .with_initializer(uniform(self.output_init))
                .init(device),
        }
    }
}

/// Action-value network.
#[derive(Module, Debug)]
pub struct CriticNetwork<B: Backend> {
    state_layer: Linear<B>,
    state_merge: Linear<B>,
    action_merge: Linear<B>,
    output: Linear<B>,
}

impl<B: Backend> CriticNetwork<B> {
    /// `[batch, S]` states and `[batch, A]` actions to `[batch, 1]` values.
    pub fn forward(&self, states: Tensor<B, 2>, actions: Tensor<B, 2>) -> Tensor<B, 2> {
        let h = relu(self.state_layer.forward(states));
        let h = relu(self.state_merge.forward(h) + self.action_merge.forward(actions));
        self.output.forward(h)
    }
}

fn uniform(half_width: f64) -> Initializer {
    Initializer::Uniform {
        min: -half_width,
        max: half_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    fn get_device() -> <TestBackend as Backend>::Device {
        Default::default()
    }

    #[test]
    fn test_actor_output_shape_and_range() {
        let device = get_device();
        let actor: ActorNetwork<TestBackend> = ActorNetworkConfig::new(3, 2)
            .with_output_init(5.0)
            .init(&device);

        let states = Tensor::<TestBackend, 2>::random(
            [8, 3],
            burn::tensor::Distribution::Uniform(-10.0, 10.0),
            &device,
        );
        let actions = actor.forward(states);

        assert_eq!(actions.dims(), [8, 2]);
        let values = actions.into_data().to_vec::<f32>().unwrap();
        assert!(values.iter().all(|a| (-1.0..=1.0).contains(a)));
    }

    #[test]
    fn test_small_output_init_starts_near_zero() {
        let device = get_device();
        let actor: ActorNetwork<TestBackend> = ActorNetworkConfig::new(3, 3).init(&device);
        let states = Tensor::<TestBackend, 2>::zeros([1, 3], &device);

        let values = actor.forward(states).into_data().to_vec::<f32>().unwrap();
        assert!(values.iter().all(|a| a.abs() < 0.1));
    }

    #[test]
    fn test_critic_output_shape() {
        let device = get_device();
        let critic: CriticNetwork<TestBackend> = CriticNetworkConfig::new(3, 2)
            .with_hidden_size(8)
            .init(&device);

        let states = Tensor::<TestBackend, 2>::ones([5, 3], &device);
        let actions = Tensor::<TestBackend, 2>::zeros([5, 2], &device);

        assert_eq!(critic.forward(states, actions).dims(), [5, 1]);
    }
}
