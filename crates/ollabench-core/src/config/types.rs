//! Sub-configuration structs and their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prompt used by the image tool when neither an override nor a sidecar
/// prompt file is available.
pub const DEFAULT_IMAGE_PROMPT: &str = "
Convert the image to markdown

Formulae should be in latex format between $ like $a=\\frac{b}{c}$.
Use simple $ not $$.

Output only the markdown text.
";

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Root directory for result files
    pub data_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

/// Inference service connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    /// Ollama API endpoint
    pub endpoint: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            // Cold-loading a large vision model can take minutes
            timeout_ms: 600_000,
        }
    }
}

/// Image transcription settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// Extensions picked up when scanning folders
    pub supported_formats: Vec<String>,

    /// Fallback prompt when no override or sidecar file applies
    pub default_prompt: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            supported_formats: vec!["png".to_string(), "jpg".to_string(), "jpeg".to_string()],
            default_prompt: DEFAULT_IMAGE_PROMPT.to_string(),
        }
    }
}

/// Throughput benchmark settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    /// Prompt used when `--prompt` is not given
    pub default_prompt: String,

    /// Runs per model when `--num_runs` is not given
    pub num_runs: u32,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            default_prompt: "Why is the sky blue?".to_string(),
            num_runs: 1,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
