//! AI Gateway - forwards dashboard questions to a chat-completion API
//!
//! This crate is the thin "ask the AI" layer of the dashboard backend:
//! - Renders a fixed prompt from the question and a dataset context
//! - Ships the prompt upstream as a single chat-completion call
//! - Maps every failure mode to a typed [`GatewayError`]
//!
//! # Key Types
//!
//! - `AiGateway` - Front door: validate, render, forward (see `gateway`)
//! - `CompletionClient` - Pluggable transport trait (see `llm`)
//! - `ChatClient` - The real HTTP transport over reqwest
//!
//! # Operating Principle
//!
//! The gateway is strictly a proxy. Every computed number the model sees
//! comes from the dataset context; the gateway itself NEVER interprets
//! questions or post-processes answers beyond whitespace trimming. One
//! question means at most one upstream call: no retries, no fallbacks.

pub mod error;
pub mod gateway;
pub mod llm;
pub mod prompt;

pub use error::GatewayError;
pub use gateway::AiGateway;
pub use llm::{ChatClient, CompletionClient};
