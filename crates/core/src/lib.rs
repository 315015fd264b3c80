//! # Swimdeck Core
//!
//! Domain types, traits, and error definitions for the swimdeck coaching
//! assistant. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator is defined as a trait here: the language-model
//! backend (`CompletionClient`), the data lookups (`RosterStore`), and the
//! catalogue entries themselves (`Tool`). Implementations live in their
//! respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod chart;
pub mod error;
pub mod message;
pub mod provider;
pub mod roster;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use chart::{ChartDirective, ChartType, DISPLAY_CHART};
pub use error::{Error, LookupError, ProviderError, Result, ToolError};
pub use message::{Message, Role, ToolCallRequest};
pub use provider::{
    CompletionClient, CompletionRequest, CompletionResponse, StreamChunk, ToolDefinition, Usage,
};
pub use roster::{
    Coach, DailyForm, DateFilter, Group, GroupDetails, RosterStore, Swimmer, Team, TeamDetails,
    Training,
};
pub use tool::{Tool, ToolRegistry};
