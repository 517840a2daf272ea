//! Controller statistics.
//!
//! - [`ControllerStats`]: counters, last losses and recent evaluation returns
//! - [`SharedControllerStats`]: lock-protected handle for observers

pub mod controller_stats;

pub use controller_stats::{controller_stats, ControllerStats, SharedControllerStats, EVAL_HISTORY};
