//! Results reported at episode boundaries.

/// Controller phase between requests.
///
/// `TrainingStep` is only held while an end-of-episode call runs a training
/// step; callers never observe it between requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPhase {
    /// Recording an exploration (or frozen-policy) episode.
    Collecting,
    /// Running the per-episode training step.
    TrainingStep,
    /// Recording an evaluation episode: no noise, no learning.
    EvalEpisode,
}

/// What the controller did with a finished episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EpisodeKind {
    /// Transitions were stored and one training step ran.
    Trained { critic_loss: f32, max_q: f32 },
    /// Transitions were stored; the buffer does not yet exceed the batch size.
    InsufficientData { buffer_len: usize, batch_size: usize },
    /// Fewer than two states were recorded; nothing was stored.
    Degenerate { states: usize },
    /// Evaluation episode; `ret` is the summed reward of the visited states.
    Evaluated { ret: f32 },
    /// Learning is disabled; the episode was discarded.
    Frozen,
}

impl EpisodeKind {
    /// True if a training step ran.
    pub fn trained(&self) -> bool {
        matches!(self, EpisodeKind::Trained { .. })
    }
}

/// Reply to an end-of-episode signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeOutcome {
    /// One-based index of the episode that just ended.
    pub episode: u64,
    /// What happened to it.
    pub kind: EpisodeKind,
    /// Transitions pushed into the replay buffer.
    pub transitions_added: usize,
    /// Transitions dropped because their reward was not finite.
    pub transitions_skipped: usize,
    /// Whether the upcoming episode is an evaluation episode.
    pub next_is_eval: bool,
    /// True when the controller runs without learning.
    pub eval_mode_active: bool,
}
