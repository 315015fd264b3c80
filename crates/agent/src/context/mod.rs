//! Conversation context: preamble assembly and token budgeting.

pub mod assemble;
pub mod budget;
