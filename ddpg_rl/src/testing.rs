//! Scripted approximators for controller and server tests.
//!
//! Both mocks append every call to a shared log so tests can assert on call
//! order and arguments without any numerics.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::algorithms::ddpg::{ActionValueCritic, ApproxResult, CriticUpdate, DeterministicActor};
use crate::error::ApproximatorError;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ActorPredict { rows: usize },
    ActorPredictTarget { rows: usize },
    ActorTrain { rows: usize, gradients: Vec<Vec<f32>> },
    ActorUpdateTarget,
    CriticPredict { rows: usize },
    CriticPredictTarget { rows: usize },
    CriticTrain { states: Vec<Vec<f32>>, targets: Vec<f32> },
    CriticActionGradients { rows: usize },
    CriticUpdateTarget,
}

impl Call {
    pub fn name(&self) -> &'static str {
        match self {
            Call::ActorPredict { .. } => "actor.predict",
            Call::ActorPredictTarget { .. } => "actor.predict_target",
            Call::ActorTrain { .. } => "actor.train",
            Call::ActorUpdateTarget => "actor.update_target",
            Call::CriticPredict { .. } => "critic.predict",
            Call::CriticPredictTarget { .. } => "critic.predict_target",
            Call::CriticTrain { .. } => "critic.train",
            Call::CriticActionGradients { .. } => "critic.action_gradients",
            Call::CriticUpdateTarget => "critic.update_target",
        }
    }
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn call_names(log: &CallLog) -> Vec<&'static str> {
    log.lock().iter().map(Call::name).collect()
}

/// Actor returning the same value in every action component.
pub struct MockActor {
    pub state_dim: usize,
    pub action_dim: usize,
    /// Width of returned rows; differs from `action_dim` to simulate a bad network.
    pub output_width: usize,
    pub action: f32,
    pub target_action: f32,
    pub fail_train: bool,
    pub log: CallLog,
}

impl MockActor {
    pub fn new(state_dim: usize, action_dim: usize, log: CallLog) -> Self {
        Self {
            state_dim,
            action_dim,
            output_width: action_dim,
            action: 0.5,
            target_action: 0.25,
            fail_train: false,
            log,
        }
    }
}

impl DeterministicActor for MockActor {
    fn state_dim(&self) -> usize {
        self.state_dim
    }

    fn action_dim(&self) -> usize {
        self.action_dim
    }

    fn predict(&self, states: &[Vec<f32>]) -> ApproxResult<Vec<Vec<f32>>> {
        self.log.lock().push(Call::ActorPredict { rows: states.len() });
        Ok(vec![vec![self.action; self.output_width]; states.len()])
    }

    fn predict_target(&self, states: &[Vec<f32>]) -> ApproxResult<Vec<Vec<f32>>> {
        self.log.lock().push(Call::ActorPredictTarget { rows: states.len() });
        Ok(vec![vec![self.target_action; self.output_width]; states.len()])
    }

    fn train(&mut self, states: &[Vec<f32>], action_gradients: &[Vec<f32>]) -> ApproxResult<()> {
        self.log.lock().push(Call::ActorTrain {
            rows: states.len(),
            gradients: action_gradients.to_vec(),
        });
        if self.fail_train {
            return Err(ApproximatorError::Diverged {
                network: "actor",
                detail: "scripted failure".to_string(),
            });
        }
        Ok(())
    }

    fn update_target(&mut self) {
        self.log.lock().push(Call::ActorUpdateTarget);
    }
}

/// Critic with a constant target Q and unit action gradients.
pub struct MockCritic {
    pub target_q: f32,
    /// Rows left off every target prediction, to simulate a bad network.
    pub missing_target_rows: usize,
    pub fail_train: bool,
    pub log: CallLog,
}

impl MockCritic {
    pub fn new(log: CallLog) -> Self {
        Self {
            target_q: 2.0,
            missing_target_rows: 0,
            fail_train: false,
            log,
        }
    }
}

impl ActionValueCritic for MockCritic {
    fn predict(&self, states: &[Vec<f32>], _actions: &[Vec<f32>]) -> ApproxResult<Vec<f32>> {
        self.log.lock().push(Call::CriticPredict { rows: states.len() });
        Ok(vec![0.0; states.len()])
    }

    fn predict_target(&self, states: &[Vec<f32>], _actions: &[Vec<f32>]) -> ApproxResult<Vec<f32>> {
        self.log.lock().push(Call::CriticPredictTarget { rows: states.len() });
        Ok(vec![self.target_q; states.len().saturating_sub(self.missing_target_rows)])
    }

    fn train(
        &mut self,
        states: &[Vec<f32>],
        _actions: &[Vec<f32>],
        targets: &[f32],
    ) -> ApproxResult<CriticUpdate> {
        self.log.lock().push(Call::CriticTrain {
            states: states.to_vec(),
            targets: targets.to_vec(),
        });
        if self.fail_train {
            return Err(ApproximatorError::Diverged {
                network: "critic",
                detail: "scripted failure".to_string(),
            });
        }
        Ok(CriticUpdate {
            loss: 1.0,
            max_q: self.target_q,
        })
    }

    fn action_gradients(
        &self,
        states: &[Vec<f32>],
        actions: &[Vec<f32>],
    ) -> ApproxResult<Vec<Vec<f32>>> {
        self.log.lock().push(Call::CriticActionGradients { rows: states.len() });
        Ok(actions.iter().map(|a| vec![1.0; a.len()]).collect())
    }

    fn update_target(&mut self) {
        self.log.lock().push(Call::CriticUpdateTarget);
    }
}
