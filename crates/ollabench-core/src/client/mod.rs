//! Inference service client.
//!
//! The tools only ever talk to the service through the [`InferenceClient`]
//! trait; [`OllamaClient`] is the HTTP implementation used by the CLI.

#[cfg(test)]
pub(crate) mod mock;
pub(crate) mod ollama;
pub(crate) mod provider;

pub use ollama::{normalize_endpoint, OllamaClient};
pub use provider::{
    ChatRequest, ChatResponse, GenerateRequest, GenerateResponse, ImageInput, InferenceClient,
    InstalledModel,
};
