//! Scripted in-memory client for orchestration tests.

use super::provider::{
    ChatRequest, ChatResponse, GenerateRequest, GenerateResponse, InferenceClient, InstalledModel,
};
use crate::error::ClientError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Returns queued responses in order and records every invoked model.
#[derive(Default)]
pub(crate) struct MockClient {
    installed: Vec<String>,
    chat_results: Mutex<VecDeque<Result<ChatResponse, ClientError>>>,
    generate_results: Mutex<VecDeque<Result<GenerateResponse, ClientError>>>,
    pub(crate) chat_calls: Mutex<Vec<ChatRequest>>,
    pub(crate) generate_calls: Mutex<Vec<String>>,
}

impl MockClient {
    pub(crate) fn with_models(models: &[&str]) -> Self {
        Self {
            installed: models.iter().map(|m| m.to_string()).collect(),
            ..Self::default()
        }
    }

    pub(crate) fn push_chat(&self, result: Result<ChatResponse, ClientError>) {
        self.chat_results.lock().unwrap().push_back(result);
    }

    pub(crate) fn push_generate(&self, result: Result<GenerateResponse, ClientError>) {
        self.generate_results.lock().unwrap().push_back(result);
    }

    pub(crate) fn chat_models(&self) -> Vec<String> {
        self.chat_calls
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.model.clone())
            .collect()
    }
}

/// A finished generation with the given metrics.
pub(crate) fn generated(eval_count: u64, eval_duration_ns: u64) -> GenerateResponse {
    GenerateResponse {
        done: true,
        eval_count: Some(eval_count),
        eval_duration: Some(eval_duration_ns),
    }
}

/// A successful chat answer with timing metadata filled in.
pub(crate) fn chatted(content: &str) -> ChatResponse {
    ChatResponse {
        content: content.to_string(),
        total_duration: Some(3_000),
        load_duration: Some(1_000),
        prompt_eval_duration: Some(500),
        eval_count: Some(12),
    }
}

#[async_trait]
impl InferenceClient for MockClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn list_models(&self) -> Result<Vec<InstalledModel>, ClientError> {
        Ok(self
            .installed
            .iter()
            .map(|name| InstalledModel {
                name: name.clone(),
                size: None,
            })
            .collect())
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        self.chat_calls.lock().unwrap().push(request.clone());
        self.chat_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(chatted("# default")))
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ClientError> {
        self.generate_calls
            .lock()
            .unwrap()
            .push(request.model.clone());
        self.generate_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(generated(10, 1_000_000_000)))
    }

    async fn version(&self) -> Result<String, ClientError> {
        Ok("0.0.0-test".to_string())
    }
}
