//! Ollama client over its HTTP API.
//!
//! Talks to a local Ollama instance. No authentication required, just needs
//! Ollama running.

use super::provider::{
    ChatRequest, ChatResponse, GenerateRequest, GenerateResponse, InferenceClient, InstalledModel,
};
use crate::error::ClientError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Ollama client for the local inference service.
pub struct OllamaClient {
    endpoint: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl OllamaClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Self {
        Self {
            endpoint: normalize_endpoint(endpoint),
            timeout,
            client: reqwest::Client::new(),
        }
    }

    /// Base URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{}", self.endpoint, path);
        let resp = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;
        Self::decode(resp).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.endpoint, path);
        let resp = self
            .client
            .post(&url)
            .json(body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;
        Self::decode(resp).await
    }

    fn request_error(&self, e: reqwest::Error) -> ClientError {
        ClientError::Request {
            endpoint: self.endpoint.clone(),
            message: e.to_string(),
        }
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Http {
                status_code: status.as_u16(),
                body: extract_error_message(&body),
            });
        }

        resp.json().await.map_err(|e| ClientError::Decode {
            message: e.to_string(),
        })
    }
}

/// Turn a user-supplied host into a base URL.
///
/// Accepts the same shapes as `OLLAMA_HOST`: a full URL, or a bare
/// `host:port` which gets an `http://` scheme.
pub fn normalize_endpoint(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{host}")
    }
}

/// Ollama reports failures as `{"error": "..."}`; fall back to the raw body.
fn extract_error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// Ollama /api/tags response.
#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagsModel>,
}

#[derive(Deserialize)]
struct TagsModel {
    name: String,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    size: Option<u64>,
}

/// Ollama /api/chat request body.
#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct OllamaMessage<'a> {
    role: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    images: Vec<&'a str>,
}

/// Ollama /api/chat response.
#[derive(Deserialize)]
struct OllamaChatResponse {
    message: OllamaResponseMessage,
    total_duration: Option<u64>,
    load_duration: Option<u64>,
    prompt_eval_duration: Option<u64>,
    eval_count: Option<u64>,
}

#[derive(Deserialize)]
struct OllamaResponseMessage {
    #[serde(default)]
    content: String,
}

/// Ollama /api/generate request body.
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Ollama /api/generate response.
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    #[serde(default)]
    done: bool,
    eval_count: Option<u64>,
    eval_duration: Option<u64>,
}

/// Ollama /api/version response.
#[derive(Deserialize)]
struct VersionResponse {
    version: String,
}

#[async_trait]
impl InferenceClient for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn list_models(&self) -> Result<Vec<InstalledModel>, ClientError> {
        let tags: TagsResponse = self.get_json("/api/tags").await?;
        Ok(tags
            .models
            .into_iter()
            .map(|m| InstalledModel {
                name: m.model.unwrap_or(m.name),
                size: m.size,
            })
            .collect())
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        let start = Instant::now();
        let body = OllamaChatRequest {
            model: &request.model,
            messages: vec![OllamaMessage {
                role: "user",
                content: &request.prompt,
                images: request.images.iter().map(|i| i.data.as_str()).collect(),
            }],
            stream: false,
        };

        let resp: OllamaChatResponse = self.post_json("/api/chat", &body).await?;
        tracing::debug!(
            model = %request.model,
            latency_ms = start.elapsed().as_millis() as u64,
            "chat completed"
        );

        Ok(ChatResponse {
            content: resp.message.content,
            total_duration: resp.total_duration,
            load_duration: resp.load_duration,
            prompt_eval_duration: resp.prompt_eval_duration,
            eval_count: resp.eval_count,
        })
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ClientError> {
        let start = Instant::now();
        let body = OllamaGenerateRequest {
            model: &request.model,
            prompt: &request.prompt,
            stream: false,
        };

        let resp: OllamaGenerateResponse = self.post_json("/api/generate", &body).await?;
        tracing::debug!(
            model = %request.model,
            latency_ms = start.elapsed().as_millis() as u64,
            done = resp.done,
            "generate completed"
        );

        Ok(GenerateResponse {
            done: resp.done,
            eval_count: resp.eval_count,
            eval_duration: resp.eval_duration,
        })
    }

    async fn version(&self) -> Result<String, ClientError> {
        let resp: VersionResponse = self.get_json("/api/version").await?;
        Ok(resp.version)
    }
}
