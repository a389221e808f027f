//! Image transcription: input discovery, validation, prompt resolution, and
//! the per-(model, image) transcription loop.

pub mod discovery;
pub mod prompt;
pub mod transcribe;
pub mod validate;

pub use discovery::FileDiscovery;
pub use prompt::{resolve_prompt, sidecar_path, PromptSource};
pub use transcribe::{TranscribeSummary, Transcriber};
pub use validate::{sniff_kind, validate_image};
