//! OpenAI-compatible chat-completions adapter
//!
//! Implements LlmGateway over HTTP for any provider that speaks the
//! `/chat/completions` protocol (OpenAI, Azure OpenAI, Ollama, vLLM, ...).

pub mod error;
pub mod gateway;
pub mod protocol;
pub mod session;
