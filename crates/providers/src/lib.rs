//! Completion client implementations for swimdeck.
//!
//! One backend is supported: any endpoint speaking the OpenAI
//! `/v1/chat/completions` protocol, in both non-streaming (decision) and
//! streaming SSE (answer) modes.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatClient;
