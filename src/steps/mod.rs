//! The plugin's two steps.
//!
//! Both take the installation layout, a process runner and the log format as
//! explicit arguments; nothing is read from global state.

mod certifier;
mod tuner;

pub use certifier::certify_all;
pub use tuner::{target_iterations, tune_iterations};
