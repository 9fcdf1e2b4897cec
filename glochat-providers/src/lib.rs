//! Chat-completion provider clients for glochat
//!
//! One upstream client speaking the OpenAI-compatible wire format, behind
//! the [`ChatProvider`] trait so the relay can be tested with a stub.

pub mod base;
pub mod openai;

pub use base::{ChatProvider, Message, ProviderError, ProviderResult};
pub use openai::OpenAiClient;
