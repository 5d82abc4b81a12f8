//! OpenAI adapter.

mod provider;

pub use provider::OpenAiProvider;
