//! Episode-scoped record of states and the actions taken from them.
//!
//! During collection one state and one action are appended per inference
//! call, so both sequences always have the same length. Only at episode end is
//! the record reinterpreted as `(sᵢ, aᵢ, r(sᵢ₊₁), terminal, sᵢ₊₁)` pairs; the
//! action taken from the final state has no successor and is dropped.

use super::reward::RewardModel;
use super::transition::Transition;

/// States and actions recorded since the last episode boundary.
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    states: Vec<Vec<f32>>,
    actions: Vec<Vec<f32>>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one inference step.
    pub fn record(&mut self, state: Vec<f32>, action: Vec<f32>) {
        self.states.push(state);
        self.actions.push(action);
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &[Vec<f32>] {
        &self.states
    }

    pub fn actions(&self) -> &[Vec<f32>] {
        &self.actions
    }

    /// Drop everything recorded so far.
    pub fn clear(&mut self) {
        self.states.clear();
        self.actions.clear();
    }

    /// Convert the record into replay transitions.
    ///
    /// Each consecutive pair of states yields one transition rewarded with
    /// the successor state's reward. Only the final transition is terminal,
    /// whether or not the task actually reached a terminal condition.
    ///
    /// Returns `None` for fewer than two states: there is no pair to convert.
    pub fn to_transitions<R: RewardModel + ?Sized>(&self, reward: &R) -> Option<Vec<Transition>> {
        if self.states.len() < 2 {
            return None;
        }

        let last = self.states.len() - 2;
        let transitions = self
            .states
            .windows(2)
            .zip(self.actions.iter())
            .enumerate()
            .map(|(i, (pair, action))| {
                Transition::new(
                    pair[0].clone(),
                    action.clone(),
                    reward.reward(&pair[1]),
                    i == last,
                    pair[1].clone(),
                )
            })
            .collect();

        Some(transitions)
    }

    /// Sum of rewards of every state reached after the first.
    ///
    /// Used as the score of evaluation episodes. Zero for fewer than two
    /// states.
    pub fn evaluation_return<R: RewardModel + ?Sized>(&self, reward: &R) -> f32 {
        self.states.iter().skip(1).map(|s| reward.reward(s)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reward::DistancePenalty;

    fn synthetic() -> Trajectory {
        let mut trajectory = Trajectory::new();
        for (i, s) in [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [1.0, 0.0, 0.0]]
            .iter()
            .enumerate()
        {
            trajectory.record(s.to_vec(), vec![i as f32; 3]);
        }
        trajectory
    }

    #[test]
    fn test_record_keeps_states_and_actions_aligned() {
        let trajectory = synthetic();
        assert_eq!(trajectory.len(), 4);
        assert_eq!(trajectory.states().len(), trajectory.actions().len());
    }

    #[test]
    fn test_conversion_of_synthetic_episode() {
        let model = DistancePenalty::default();
        let transitions = synthetic().to_transitions(&model).unwrap();

        assert_eq!(transitions.len(), 3);

        assert!(!transitions[0].terminal());
        assert_eq!(transitions[0].reward(), model.reward(&[1.0, 0.0, 0.0]));
        assert_eq!(transitions[0].state(), &[0.0, 0.0, 0.0]);
        assert_eq!(transitions[0].action(), &[0.0, 0.0, 0.0]);
        assert_eq!(transitions[0].next_state(), &[1.0, 0.0, 0.0]);

        assert!(!transitions[1].terminal());
        assert_eq!(transitions[1].reward(), model.reward(&[2.0, 0.0, 0.0]));

        assert!(transitions[2].terminal());
        assert_eq!(transitions[2].reward(), model.reward(&[1.0, 0.0, 0.0]));
        assert_eq!(transitions[2].state(), &[2.0, 0.0, 0.0]);
        assert_eq!(transitions[2].action(), &[2.0, 2.0, 2.0]);
        assert_eq!(transitions[2].next_state(), &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_two_states_give_single_terminal_transition() {
        let mut trajectory = Trajectory::new();
        trajectory.record(vec![0.0], vec![1.0]);
        trajectory.record(vec![1.0], vec![2.0]);

        let transitions = trajectory.to_transitions(&DistancePenalty::default()).unwrap();
        assert_eq!(transitions.len(), 1);
        assert!(transitions[0].terminal());
    }

    #[test]
    fn test_short_trajectories_are_degenerate() {
        let model = DistancePenalty::default();
        let mut trajectory = Trajectory::new();
        assert!(trajectory.to_transitions(&model).is_none());

        trajectory.record(vec![0.0], vec![0.0]);
        assert!(trajectory.to_transitions(&model).is_none());
        assert_eq!(trajectory.evaluation_return(&model), 0.0);
    }

    #[test]
    fn test_evaluation_return_skips_first_state() {
        let model = DistancePenalty::default();
        let expected = model.reward(&[1.0, 0.0, 0.0]) * 2.0 + model.reward(&[2.0, 0.0, 0.0]);
        assert!((synthetic().evaluation_return(&model) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_clear() {
        let mut trajectory = synthetic();
        trajectory.clear();
        assert!(trajectory.is_empty());
        assert!(trajectory.actions().is_empty());
    }
}
