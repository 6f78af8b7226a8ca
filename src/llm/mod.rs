pub mod client;
pub mod error;

pub use client::LLMClient;
pub use error::LlmError;
