//! # Completion Gateway
//!
//! Encapsulates calls to the remote text-completion service.
//!
//! ## Components
//! - `traits`: `CompletionBackend` abstraction over completion providers
//! - `client`: `OpenAiGateway` with the parameter-negotiation matrix
//! - `extract`: message-text extraction from heterogeneous response shapes

pub mod client;
pub mod extract;
pub mod traits;

pub use client::OpenAiGateway;
pub use extract::extract_message_text;
pub use traits::{CompletionBackend, CompletionRequest};
