//! On-disk layout of result files and the JSON writer.
//!
//! ```text
//! <data_dir>/images/<image>/<model>.json
//! <data_dir>/speed/<hostname>/computer_info.json
//! <data_dir>/speed/<hostname>/<model>.json
//! ```

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;

const COMPUTER_INFO_FILE: &str = "computer_info.json";

/// Resolves result paths below a data directory.
#[derive(Debug, Clone)]
pub struct ResultLayout {
    root: PathBuf,
}

impl ResultLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every model's result for one image.
    pub fn image_dir(&self, image_name: &str) -> PathBuf {
        self.root.join("images").join(sanitize_component(image_name))
    }

    /// Result file for one (model, image) pair.
    pub fn image_result(&self, image_name: &str, model: &str) -> PathBuf {
        self.image_dir(image_name).join(json_file_name(model))
    }

    /// Directory holding benchmark results for one host.
    pub fn host_dir(&self, hostname: &str) -> PathBuf {
        self.root.join("speed").join(sanitize_component(hostname))
    }

    pub fn computer_info(&self, hostname: &str) -> PathBuf {
        self.host_dir(hostname).join(COMPUTER_INFO_FILE)
    }

    /// Benchmark result file for one model on one host.
    pub fn speed_result(&self, hostname: &str, model: &str) -> PathBuf {
        self.host_dir(hostname).join(json_file_name(model))
    }
}

/// `<name>.json` with path separators replaced.
///
/// Namespaced models like `library/llava:7b` would otherwise create a
/// nested directory.
fn json_file_name(name: &str) -> String {
    format!("{}.json", sanitize_component(name))
}

fn sanitize_component(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}

/// Write `item` as pretty-printed JSON, creating parent directories.
///
/// Overwrites an existing file.
pub fn write_json<T: Serialize>(path: &Path, item: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, item)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
