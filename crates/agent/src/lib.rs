//! The swimdeck orchestration loop.
//!
//! This crate glues the pieces together for one request: assemble the
//! working sequence, budget it against the provider's context window, run
//! decision calls, dispatch tool rounds, and either stream the final answer
//! or short-circuit on a chart directive.

pub mod context;
pub mod dispatch;
pub mod loop_runner;
pub mod relay;

pub use loop_runner::{Assistant, Reply};
pub use relay::RelayOutcome;
