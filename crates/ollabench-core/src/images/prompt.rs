//! Prompt selection for an image.

use std::path::{Path, PathBuf};

/// Where the prompt for an image came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSource {
    /// `--prompt` on the command line
    Override,
    /// `<image>_prompt.md` next to the image
    Sidecar(PathBuf),
    /// Built-in or configured default
    Default,
}

/// Sidecar prompt path: the image path without extension plus `_prompt.md`.
pub fn sidecar_path(image: &Path) -> PathBuf {
    let mut path = image.with_extension("").into_os_string();
    path.push("_prompt.md");
    PathBuf::from(path)
}

fn read_sidecar(image: &Path) -> Option<(String, PathBuf)> {
    let path = sidecar_path(image);
    if !path.exists() {
        return None;
    }
    match std::fs::read_to_string(&path) {
        Ok(content) => {
            let trimmed = content.trim();
            (!trimmed.is_empty()).then(|| (trimmed.to_string(), path))
        }
        Err(e) => {
            tracing::warn!("Failed to read prompt file {:?}: {e}", path);
            None
        }
    }
}

/// Pick the prompt for `image`: override, then sidecar file, then default.
///
/// Empty overrides and empty sidecar files are treated as absent.
pub fn resolve_prompt(
    override_prompt: Option<&str>,
    image: &Path,
    default_prompt: &str,
) -> (String, PromptSource) {
    if let Some(prompt) = override_prompt.filter(|p| !p.is_empty()) {
        return (prompt.to_string(), PromptSource::Override);
    }
    if let Some((prompt, path)) = read_sidecar(image) {
        return (prompt, PromptSource::Sidecar(path));
    }
    (default_prompt.to_string(), PromptSource::Default)
}
