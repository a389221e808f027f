//! Expands command-line image arguments into a list of files.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ImagesConfig;

/// Finds image files in folders.
pub struct FileDiscovery {
    extensions: Vec<String>,
}

impl FileDiscovery {
    /// Create a discovery instance accepting the configured extensions.
    pub fn new(config: &ImagesConfig) -> Self {
        Self {
            extensions: config
                .supported_formats
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    /// Resolve every input: folders are scanned, anything else is kept as-is
    /// so a missing file can be reported when it is reached.
    pub fn expand(&self, inputs: &[PathBuf]) -> Vec<PathBuf> {
        let mut images = Vec::new();
        for input in inputs {
            if input.is_dir() {
                images.extend(self.scan(input));
            } else {
                images.push(input.clone());
            }
        }
        images
    }

    /// Recursively find supported files under `folder`, sorted by path.
    pub fn scan(&self, folder: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for entry in WalkDir::new(folder).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Error scanning folder {:?}: {e}", folder);
                    continue;
                }
            };
            let path = entry.path();
            if path.is_file() && self.is_supported(path) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        files
    }

    /// Check if a file has a supported extension (case-insensitive).
    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext_lower = ext.to_lowercase();
                self.extensions.iter().any(|e| *e == ext_lower)
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discovery() -> FileDiscovery {
        FileDiscovery::new(&ImagesConfig::default())
    }

    #[test]
    fn test_is_supported() {
        let d = discovery();
        assert!(d.is_supported(Path::new("scan.png")));
        assert!(d.is_supported(Path::new("scan.JPG")));
        assert!(d.is_supported(Path::new("scan.jpeg")));
        assert!(!d.is_supported(Path::new("scan.webp")));
        assert!(!d.is_supported(Path::new("scan_prompt.md")));
        assert!(!d.is_supported(Path::new("png")));
    }

    #[test]
    fn test_scan_is_recursive_filtered_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("chapter2")).unwrap();
        for name in [
            "b.png",
            "a.JPG",
            "notes.txt",
            "a_prompt.md",
            "chapter2/c.jpeg",
            "chapter2/d.gif",
        ] {
            std::fs::write(root.join(name), b"x").unwrap();
        }

        let found = discovery().scan(root);
        assert_eq!(
            found,
            vec![
                root.join("a.JPG"),
                root.join("b.png"),
                root.join("chapter2/c.jpeg"),
            ]
        );
    }

    #[test]
    fn test_expand_keeps_files_and_scans_folders() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("pages");
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(folder.join("p1.png"), b"x").unwrap();

        let missing = dir.path().join("missing.png");
        let found = discovery().expand(&[missing.clone(), folder.clone()]);
        assert_eq!(found, vec![missing, folder.join("p1.png")]);
    }

    #[test]
    fn test_scan_empty_folder() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discovery().scan(dir.path()).is_empty());
    }

    #[test]
    fn test_configured_extensions_are_normalized() {
        let config = ImagesConfig {
            supported_formats: vec![".PNG".to_string()],
            ..ImagesConfig::default()
        };
        let d = FileDiscovery::new(&config);
        assert!(d.is_supported(Path::new("x.png")));
        assert!(!d.is_supported(Path::new("x.jpg")));
    }
}
