//! ollabench core - drive a local Ollama service from the command line.
//!
//! Two sequential tools share this library:
//!
//! ```text
//! images: discover → validate → resolve prompt → chat(model, image) → data/images/<image>/<model>.json
//! speed:  installed? → generate × N → tokens/sec → data/speed/<host>/<model>.json
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use ollabench_core::{Config, OllamaClient, ResultLayout, SilentProgress, Transcriber};
//!
//! #[tokio::main]
//! async fn main() -> ollabench_core::Result<()> {
//!     let config = Config::load()?;
//!     let client = OllamaClient::new(&config.ollama.endpoint, std::time::Duration::from_secs(600));
//!     let transcriber = Transcriber::new(
//!         &client,
//!         ResultLayout::new(config.data_dir()),
//!         &config.images.default_prompt,
//!     );
//!     let models = vec!["llava:latest".to_string()];
//!     let images = vec!["page.png".into()];
//!     let summary = transcriber.run(&models, &images, None, &mut SilentProgress).await?;
//!     println!("saved {}", summary.saved);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod client;
pub mod config;
pub mod error;
pub mod images;
pub mod output;
pub mod progress;
pub mod speed;
pub mod types;

// Re-exports for convenient access
pub use client::{InferenceClient, InstalledModel, OllamaClient};
pub use config::Config;
pub use error::{BenchError, ClientError, ConfigError, ImageError, Result};
pub use images::{FileDiscovery, TranscribeSummary, Transcriber};
pub use output::ResultLayout;
pub use progress::{ProgressSink, SilentProgress, Status, StatusLine};
pub use speed::{Benchmark, SpeedSummary};
pub use types::{BenchmarkResult, ComputerInfo, ImageKind, RunRecord, TranscriptionRecord};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
