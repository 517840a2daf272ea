//! Error types for the policy controller and its collaborators.
//!
//! Two conditions at episode end are *not* errors: an undersized replay
//! buffer and a degenerate (fewer than two states) episode. Both are reported
//! through [`EpisodeOutcome`](crate::algorithms::ddpg::EpisodeOutcome).
//! Oversized sampling requests are contract violations and panic.

use std::io;

/// Failure surfaced by an actor or critic approximator.
///
/// The controller never retries these; they propagate unchanged to the
/// caller of the affected request.
#[derive(Debug, thiserror::Error)]
pub enum ApproximatorError {
    /// A loss or output became NaN or infinite.
    #[error("numerical divergence in {network}: {detail}")]
    Diverged {
        network: &'static str,
        detail: String,
    },

    /// Batch rows disagree with the network's input or output width.
    #[error("{network} expected rows of width {expected}, got {actual}")]
    Shape {
        network: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Gradients for an input were not produced by the backward pass.
    #[error("{network} produced no gradient for {input}")]
    MissingGradient {
        network: &'static str,
        input: &'static str,
    },

    /// Tensor data could not be read back into host memory.
    #[error("tensor readback failed in {network}: {detail}")]
    Readback {
        network: &'static str,
        detail: String,
    },
}

/// Errors returned by the controller, its configuration and the server.
#[derive(Debug, thiserror::Error)]
pub enum DdpgError {
    /// An actor or critic call failed.
    #[error(transparent)]
    Approximator(#[from] ApproximatorError),

    /// A state or action vector had the wrong length.
    #[error("{what} has {actual} components, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Configuration values are out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    ConfigIo(#[from] io::Error),

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigFormat(#[from] serde_json::Error),

    /// The controller thread could not be started.
    #[error("failed to spawn policy server thread: {0}")]
    ServerSpawn(#[source] io::Error),

    /// The controller thread is gone (stopped or panicked).
    #[error("policy server is not running")]
    ServerDisconnected,

    /// The controller thread panicked while serving a request.
    #[error("policy server thread panicked")]
    ServerPanicked,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DdpgError>;
