//! Magic-byte check for image inputs.

use std::io::Read;
use std::path::Path;

use crate::error::ImageError;
use crate::types::ImageKind;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Identify PNG or JPEG from the leading bytes of a file.
pub fn sniff_kind(header: &[u8]) -> Option<ImageKind> {
    if header.starts_with(PNG_MAGIC) {
        Some(ImageKind::Png)
    } else if header.starts_with(JPEG_MAGIC) {
        Some(ImageKind::Jpeg)
    } else {
        None
    }
}

/// Check that `path` exists and starts with PNG or JPEG magic bytes.
pub fn validate_image(path: &Path) -> Result<ImageKind, ImageError> {
    if !path.exists() {
        return Err(ImageError::NotFound(path.to_path_buf()));
    }

    let unreadable = |e: std::io::Error| ImageError::Unreadable {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let file = std::fs::File::open(path).map_err(unreadable)?;
    let mut header = Vec::with_capacity(PNG_MAGIC.len());
    file.take(PNG_MAGIC.len() as u64)
        .read_to_end(&mut header)
        .map_err(unreadable)?;

    sniff_kind(&header).ok_or_else(|| ImageError::InvalidType(path.to_path_buf()))
}
