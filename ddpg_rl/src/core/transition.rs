//! Transition type stored in the replay buffer.
//!
//! A transition is created once, at episode end, from two consecutive
//! recorded states and the action taken between them. It is never mutated
//! afterwards; the replay buffer owns it until eviction.

/// One recorded `(state, action, reward, terminal, next_state)` tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// State the action was taken from.
    state: Vec<f32>,
    /// Action sent back to the caller (including exploration noise).
    action: Vec<f32>,
    /// Shaped reward of `next_state`.
    reward: f32,
    /// Whether this is the last transition of its episode.
    terminal: bool,
    /// State observed after the action.
    next_state: Vec<f32>,
}

impl Transition {
    /// Create a new transition.
    pub fn new(
        state: Vec<f32>,
        action: Vec<f32>,
        reward: f32,
        terminal: bool,
        next_state: Vec<f32>,
    ) -> Self {
        Self {
            state,
            action,
            reward,
            terminal,
            next_state,
        }
    }

    /// Get the state observation.
    pub fn state(&self) -> &[f32] {
        &self.state
    }

    /// Get the action.
    pub fn action(&self) -> &[f32] {
        &self.action
    }

    /// Get the reward.
    pub fn reward(&self) -> f32 {
        self.reward
    }

    /// Check if terminal.
    pub fn terminal(&self) -> bool {
        self.terminal
    }

    /// Get the next state observation.
    pub fn next_state(&self) -> &[f32] {
        &self.next_state
    }

    /// State dimension.
    pub fn state_dim(&self) -> usize {
        self.state.len()
    }

    /// Action dimension.
    pub fn action_dim(&self) -> usize {
        self.action.len()
    }
}

/// Column-wise view of a sampled minibatch, ready for the approximators.
#[derive(Debug, Clone, Default)]
pub struct TransitionBatch {
    pub states: Vec<Vec<f32>>,
    pub actions: Vec<Vec<f32>>,
    pub rewards: Vec<f32>,
    pub terminals: Vec<bool>,
    pub next_states: Vec<Vec<f32>>,
}

impl TransitionBatch {
    /// Split a list of transitions into per-field columns.
    pub fn from_transitions(transitions: &[Transition]) -> Self {
        let mut batch = Self {
            states: Vec::with_capacity(transitions.len()),
            actions: Vec::with_capacity(transitions.len()),
            rewards: Vec::with_capacity(transitions.len()),
            terminals: Vec::with_capacity(transitions.len()),
            next_states: Vec::with_capacity(transitions.len()),
        };

        for t in transitions {
            batch.states.push(t.state.clone());
            batch.actions.push(t.action.clone());
            batch.rewards.push(t.reward);
            batch.terminals.push(t.terminal);
            batch.next_states.push(t.next_state.clone());
        }

        batch
    }

    /// Number of transitions in the batch.
    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    /// Check if the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_accessors() {
        let t = Transition::new(vec![1.0, 2.0, 3.0], vec![0.5], -4.0, true, vec![2.0, 3.0, 4.0]);

        assert_eq!(t.state(), &[1.0, 2.0, 3.0]);
        assert_eq!(t.action(), &[0.5]);
        assert_eq!(t.reward(), -4.0);
        assert!(t.terminal());
        assert_eq!(t.next_state(), &[2.0, 3.0, 4.0]);
        assert_eq!(t.state_dim(), 3);
        assert_eq!(t.action_dim(), 1);
    }

    #[test]
    fn test_batch_columns_keep_order() {
        let transitions = vec![
            Transition::new(vec![0.0], vec![0.1], -1.0, false, vec![1.0]),
            Transition::new(vec![1.0], vec![0.2], -2.0, true, vec![2.0]),
        ];

        let batch = TransitionBatch::from_transitions(&transitions);

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.states, vec![vec![0.0], vec![1.0]]);
        assert_eq!(batch.actions, vec![vec![0.1], vec![0.2]]);
        assert_eq!(batch.rewards, vec![-1.0, -2.0]);
        assert_eq!(batch.terminals, vec![false, true]);
        assert_eq!(batch.next_states, vec![vec![1.0], vec![2.0]]);
    }
}
