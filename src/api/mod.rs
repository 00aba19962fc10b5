//! Public API for the CoreMark-PRO plugin.

mod engine;
mod step;

pub use engine::{CoreMarkPro, CoreMarkProBuilder, StepResponse};
pub use step::{all_steps, StepId};
