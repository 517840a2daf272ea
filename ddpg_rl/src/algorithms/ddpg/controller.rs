//! Online DDPG policy controller.
//!
//! The controller sits between an external system that asks "what action
//! for this state?" and the learning machinery. It handles two requests:
//!
//! - [`query_action`](PolicyController::query_action): predict, perturb with
//!   OU noise when exploring, record the step, reply with the action.
//! - [`notify_episode_end`](PolicyController::notify_episode_end): turn the
//!   recorded episode into transitions, store them, run at most one training
//!   step, schedule evaluation, reset for the next episode.
//!
//! # Episode schedule
//!
//! ```text
//!            end (count % K != 0)
//!   ┌─────────────┐ ─────────────────┐
//!   │ Collecting  │ ◄────────────────┘
//!   └─────────────┘
//!        │  ▲  end (count % K == 0)       ┌──────────────┐
//!        │  └──────────────────────────── │ EvalEpisode  │
//!        └──────────────────────────────► └──────────────┘
//! ```
//!
//! Every `K` completed episodes the next one is an evaluation episode: the
//! policy acts without noise and nothing is stored or trained.
//!
//! # Training step
//!
//! ```text
//! batch   ← buffer.sample(N)
//! yᵢ      ← rᵢ                               if terminalᵢ
//!         ← rᵢ + γ·Q'(s'ᵢ, μ'(s'ᵢ))          otherwise
//! critic  ← one step on (Q(sᵢ, aᵢ) − yᵢ)²
//! actor   ← one step along ∂Q(sᵢ, μ(sᵢ))/∂a
//! targets ← soft update (actor, critic)
//! ```

use crate::core::noise::OrnsteinUhlenbeckNoise;
use crate::core::replay_buffer::ReplayBuffer;
use crate::core::reward::{DistancePenalty, RewardModel};
use crate::core::trajectory::Trajectory;
use crate::core::transition::TransitionBatch;
use crate::error::{ApproximatorError, DdpgError, Result};
use crate::metrics::{controller_stats, SharedControllerStats};

use super::approximator::{ActionValueCritic, CriticUpdate, DeterministicActor};
use super::config::DdpgConfig;
use super::outcome::{ControllerPhase, EpisodeKind, EpisodeOutcome};

/// Bootstrapped TD targets.
///
/// `yᵢ = rᵢ` for terminal transitions, `rᵢ + γ·next_qᵢ` otherwise.
pub fn td_targets(rewards: &[f32], terminals: &[bool], next_q: &[f32], gamma: f32) -> Vec<f32> {
    rewards
        .iter()
        .zip(terminals)
        .zip(next_q)
        .map(|((&r, &done), &q)| if done { r } else { r + gamma * q })
        .collect()
}

/// DDPG controller generic over its actor, critic and reward model.
pub struct PolicyController<A, C, R = DistancePenalty> {
    config: DdpgConfig,
    actor: A,
    critic: C,
    reward_model: R,
    buffer: ReplayBuffer,
    noise: OrnsteinUhlenbeckNoise,
    trajectory: Trajectory,
    phase: ControllerPhase,
    eval_episode: bool,
    episode_count: u64,
    stats: SharedControllerStats,
}

impl<A, C> PolicyController<A, C, DistancePenalty>
where
    A: DeterministicActor,
    C: ActionValueCritic,
{
    /// Controller with the default distance penalty reward.
    pub fn new(config: DdpgConfig, actor: A, critic: C) -> Result<Self> {
        Self::with_reward_model(config, actor, critic, DistancePenalty::default())
    }
}

impl<A, C, R> PolicyController<A, C, R>
where
    A: DeterministicActor,
    C: ActionValueCritic,
    R: RewardModel,
{
    /// Controller with a custom reward model.
    ///
    /// Fails if the configuration is invalid or the actor's dimensions do not
    /// match it.
    pub fn with_reward_model(config: DdpgConfig, actor: A, critic: C, reward_model: R) -> Result<Self> {
        config.validate()?;
        check_dim("actor state input", config.state_dim, actor.state_dim())?;
        check_dim("actor action output", config.action_dim, actor.action_dim())?;

        let buffer = ReplayBuffer::new(config.buffer_capacity, config.seed);
        let noise = OrnsteinUhlenbeckNoise::new(
            config.action_dim,
            config.noise.clone(),
            config.seed.wrapping_add(1),
        );

        log::info!(
            "DDPG controller ready: state_dim={} action_dim={} batch={} capacity={} training={}",
            config.state_dim,
            config.action_dim,
            config.batch_size,
            config.buffer_capacity,
            config.is_training
        );

        Ok(Self {
            config,
            actor,
            critic,
            reward_model,
            buffer,
            noise,
            trajectory: Trajectory::new(),
            phase: ControllerPhase::Collecting,
            eval_episode: false,
            episode_count: 0,
            stats: controller_stats(),
        })
    }

    // ========================================================================
    // Requests
    // ========================================================================

    /// Action for `state`.
    ///
    /// Exploration noise is added only while learning and outside evaluation
    /// episodes. The state and the returned action are recorded for the
    /// current episode.
    pub fn query_action(&mut self, state: &[f32]) -> Result<Vec<f32>> {
        check_dim("state", self.config.state_dim, state.len())?;

        let mut action = self
            .actor
            .predict(&[state.to_vec()])?
            .pop()
            .ok_or(ApproximatorError::Shape {
                network: "actor",
                expected: 1,
                actual: 0,
            })?;
        check_dim("action", self.config.action_dim, action.len())?;

        if self.explores() {
            for (a, n) in action.iter_mut().zip(self.noise.step()) {
                *a += n;
            }
        }

        self.trajectory.record(state.to_vec(), action.clone());
        self.stats.write().inference_calls += 1;

        Ok(action)
    }

    /// Close the current episode.
    ///
    /// Bookkeeping (episode counter, evaluation scheduling, trajectory clear,
    /// noise reset) completes even when training fails; the approximator
    /// error is returned afterwards.
    pub fn notify_episode_end(&mut self) -> Result<EpisodeOutcome> {
        self.episode_count += 1;
        let episode = self.episode_count;
        let was_eval = self.eval_episode;

        let result = if was_eval {
            Ok(self.finish_eval_episode())
        } else if !self.config.is_training {
            log::debug!("episode {} discarded, learning disabled", episode);
            Ok(Stored::nothing(EpisodeKind::Frozen))
        } else {
            self.learn_from_episode()
        };

        if was_eval {
            self.eval_episode = false;
        }
        if episode % self.config.eval_period as u64 == 0 {
            self.eval_episode = true;
            log::info!("episode {} will be an evaluation episode", episode + 1);
        }

        self.trajectory.clear();
        self.noise.reset();
        self.phase = if self.eval_episode {
            ControllerPhase::EvalEpisode
        } else {
            ControllerPhase::Collecting
        };

        {
            let mut stats = self.stats.write();
            stats.episodes += 1;
            stats.buffer_len = self.buffer.len();
        }

        let stored = result.map_err(|e| {
            log::warn!("training step failed at episode {}: {}", episode, e);
            e
        })?;

        Ok(EpisodeOutcome {
            episode,
            kind: stored.kind,
            transitions_added: stored.added,
            transitions_skipped: stored.skipped,
            next_is_eval: self.eval_episode,
            eval_mode_active: !self.config.is_training,
        })
    }

    // ========================================================================
    // Episode handling
    // ========================================================================

    fn explores(&self) -> bool {
        self.config.is_training && !self.eval_episode
    }

    fn finish_eval_episode(&mut self) -> Stored {
        let ret = self.trajectory.evaluation_return(&self.reward_model);
        log::info!(
            "evaluation episode {}: return {:.3} over {} states",
            self.episode_count,
            ret,
            self.trajectory.len()
        );
        self.stats.write().record_eval_return(ret);
        Stored::nothing(EpisodeKind::Evaluated { ret })
    }

    fn learn_from_episode(&mut self) -> Result<Stored> {
        let mut transitions = match self.trajectory.to_transitions(&self.reward_model) {
            Some(transitions) => transitions,
            None => {
                log::warn!(
                    "episode {} recorded {} state(s); nothing to store",
                    self.episode_count,
                    self.trajectory.len()
                );
                self.stats.write().degenerate_episodes += 1;
                return Ok(Stored::nothing(EpisodeKind::Degenerate {
                    states: self.trajectory.len(),
                }));
            }
        };

        // Non-finite rewards never enter the buffer.
        let recorded = transitions.len();
        transitions.retain(|t| t.reward().is_finite());
        let skipped = recorded - transitions.len();
        if skipped > 0 {
            log::warn!(
                "episode {}: dropped {} of {} transition(s) with a non-finite reward",
                self.episode_count,
                skipped,
                recorded
            );
            self.stats.write().skipped_transitions += skipped as u64;
        }

        let added = transitions.len();
        self.buffer.add_batch(transitions);

        let batch_size = self.config.batch_size;
        if self.buffer.len() <= batch_size {
            log::debug!(
                "episode {}: buffer {}/{} not above batch size {}",
                self.episode_count,
                self.buffer.len(),
                self.buffer.capacity(),
                batch_size
            );
            self.stats.write().insufficient_data_episodes += 1;
            return Ok(Stored {
                kind: EpisodeKind::InsufficientData {
                    buffer_len: self.buffer.len(),
                    batch_size,
                },
                added,
                skipped,
            });
        }

        self.phase = ControllerPhase::TrainingStep;
        let update = self.train_step()?;

        log::debug!(
            "episode {}: critic loss {:.5}, max Q {:.4}, buffer {}",
            self.episode_count,
            update.loss,
            update.max_q,
            self.buffer.len()
        );
        self.stats.write().record_train_step(update.loss, update.max_q);

        Ok(Stored {
            kind: EpisodeKind::Trained {
                critic_loss: update.loss,
                max_q: update.max_q,
            },
            added,
            skipped,
        })
    }

    /// One critic step, one actor step, then both soft target updates.
    fn train_step(&mut self) -> Result<CriticUpdate> {
        let sampled = self.buffer.sample(self.config.batch_size);
        let batch = TransitionBatch::from_transitions(&sampled);

        let next_actions = self.actor.predict_target(&batch.next_states)?;
        let next_q = self.critic.predict_target(&batch.next_states, &next_actions)?;
        if next_q.len() != batch.len() {
            return Err(ApproximatorError::Shape {
                network: "critic",
                expected: batch.len(),
                actual: next_q.len(),
            }
            .into());
        }
        let targets = td_targets(&batch.rewards, &batch.terminals, &next_q, self.config.gamma);

        let update = self.critic.train(&batch.states, &batch.actions, &targets)?;

        let policy_actions = self.actor.predict(&batch.states)?;
        let action_gradients = self.critic.action_gradients(&batch.states, &policy_actions)?;
        self.actor.train(&batch.states, &action_gradients)?;

        self.actor.update_target();
        self.critic.update_target();

        Ok(update)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &DdpgConfig {
        &self.config
    }

    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    /// Episodes completed so far.
    pub fn episode_count(&self) -> u64 {
        self.episode_count
    }

    /// Whether the current episode is an evaluation episode.
    pub fn is_eval_episode(&self) -> bool {
        self.eval_episode
    }

    pub fn buffer(&self) -> &ReplayBuffer {
        &self.buffer
    }

    /// Steps recorded in the current episode.
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn actor(&self) -> &A {
        &self.actor
    }

    pub fn critic(&self) -> &C {
        &self.critic
    }

    pub fn reward_model(&self) -> &R {
        &self.reward_model
    }

    /// Handle to the shared statistics.
    pub fn stats(&self) -> SharedControllerStats {
        SharedControllerStats::clone(&self.stats)
    }

    /// Give back the approximators.
    pub fn into_parts(self) -> (A, C) {
        (self.actor, self.critic)
    }
}

/// What happened to one episode's transitions.
struct Stored {
    kind: EpisodeKind,
    added: usize,
    skipped: usize,
}

impl Stored {
    fn nothing(kind: EpisodeKind) -> Self {
        Self {
            kind,
            added: 0,
            skipped: 0,
        }
    }
}

fn check_dim(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(DdpgError::DimensionMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}
