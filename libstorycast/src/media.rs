//! Media file probing and screening
//!
//! Candidates are screened one at a time: a bad file is rejected with a
//! message naming the violation, and never drags valid files down with it.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::MediaError;
use crate::types::MediaMimeType;

/// Maximum size of a single media attachment (10 MiB)
pub const MAX_MEDIA_BYTES: u64 = 10 * 1024 * 1024;

/// A media file that passed screening and may enter a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    /// Where the file lives on disk
    pub path: PathBuf,
    /// File name sent to the Posts API as the part's file name
    pub file_name: String,
    /// Declared MIME type, derived from the extension
    pub mime: MediaMimeType,
    /// Size in bytes
    pub size: u64,
    /// SHA-256 of the content (hex encoded), for integrity checks
    pub sha256: String,
}

impl MediaFile {
    /// Probe and validate a single candidate.
    ///
    /// Checks run cheapest-first: name, declared type, size, then the
    /// content hash (which reads the file).
    ///
    /// # Errors
    ///
    /// Returns the specific [`MediaError`] for the first violated rule.
    pub fn open(path: &Path) -> Result<Self, MediaError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mime = MediaMimeType::from_extension(&ext).ok_or_else(|| {
            MediaError::UnsupportedType {
                mime: declared_mime(&ext),
            }
        })?;

        let metadata = std::fs::metadata(path).map_err(|e| MediaError::Unreadable {
            name: file_name.clone(),
            reason: e.to_string(),
        })?;

        let size = metadata.len();
        if size > MAX_MEDIA_BYTES {
            return Err(MediaError::TooLarge {
                name: file_name,
                size,
            });
        }

        let content = std::fs::read(path).map_err(|e| MediaError::Unreadable {
            name: file_name.clone(),
            reason: e.to_string(),
        })?;
        let sha256 = hex_digest(&content);

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            mime,
            size,
            sha256,
        })
    }
}

/// A candidate that failed screening, with the message shown to the user
#[derive(Debug, Clone)]
pub struct MediaRejection {
    pub name: String,
    pub reason: MediaError,
}

/// Outcome of screening a batch of candidates
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub accepted: Vec<MediaFile>,
    pub rejected: Vec<MediaRejection>,
}

impl Selection {
    /// One combined message covering every rejected candidate, if any
    pub fn rejection_summary(&self) -> Option<String> {
        if self.rejected.is_empty() {
            return None;
        }
        let messages: Vec<String> = self
            .rejected
            .iter()
            .map(|r| r.reason.to_string())
            .collect();
        Some(messages.join("; "))
    }
}

/// Screen a batch of candidate paths, file by file.
///
/// Valid candidates land in `accepted` in their original order; each invalid
/// candidate lands in `rejected` with its own reason. Rejecting one file
/// never drops the rest of the batch.
pub fn screen_paths(paths: &[PathBuf]) -> Selection {
    let mut selection = Selection::default();

    for path in paths {
        match MediaFile::open(path) {
            Ok(file) => selection.accepted.push(file),
            Err(reason) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                tracing::debug!("Rejected media candidate {}: {}", name, reason);
                selection.rejected.push(MediaRejection { name, reason });
            }
        }
    }

    selection
}

/// Best-effort declared MIME type for an extension outside the allowed set,
/// used only in rejection messages.
fn declared_mime(ext: &str) -> String {
    match ext.to_lowercase().as_str() {
        "webp" => "image/webp".to_string(),
        "bmp" => "image/bmp".to_string(),
        "svg" => "image/svg+xml".to_string(),
        "mov" => "video/quicktime".to_string(),
        "avi" => "video/x-msvideo".to_string(),
        "mkv" => "video/x-matroska".to_string(),
        "txt" => "text/plain".to_string(),
        "pdf" => "application/pdf".to_string(),
        "" => "application/octet-stream".to_string(),
        other => format!("application/octet-stream (.{})", other),
    }
}

fn hex_digest(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}
