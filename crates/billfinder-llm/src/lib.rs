//! billfinder-llm
//!
//! Language model invocation, the two-pass bill classification pipeline,
//! and assistant prompt assembly.

pub mod assistant;
pub mod bedrock;
pub mod classify;
pub mod client;
pub mod context;
pub mod error;
pub mod model;
pub mod openai;
pub mod provider;
pub mod scripted;
