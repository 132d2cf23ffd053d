#[cfg(test)]
#[path = "images_test.rs"]
mod images_test;

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Error produced while building the image set or encoding an image.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// No image files were found for the set.
    #[error("image set is empty")]
    EmptySet,
    /// The image bytes could not be read.
    #[error("failed to fetch image {path}: {source}")]
    FetchFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The bytes do not carry a supported image signature.
    #[error("failed to encode image {path}: not a supported image")]
    EncodeFailed { path: PathBuf },
}

/// File extensions accepted when scanning a directory for the image set.
const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// The fixed ordered set of slideshow images. Non-empty by construction.
#[derive(Clone, Debug)]
pub struct ImageSet {
    paths: Vec<PathBuf>,
}

impl ImageSet {
    /// Build a set from an explicit ordered path list.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::EmptySet`] when `paths` is empty.
    pub fn new(paths: Vec<PathBuf>) -> Result<Self, ImageError> {
        if paths.is_empty() {
            return Err(ImageError::EmptySet);
        }
        Ok(Self { paths })
    }

    /// Scan `dir` for image files, ordered by file name.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::FetchFailed`] when the directory cannot be read
    /// and [`ImageError::EmptySet`] when it holds no image files.
    pub async fn from_dir(dir: &Path) -> Result<Self, ImageError> {
        let mut entries = tokio::fs::read_dir(dir).await.map_err(|source| {
            ImageError::FetchFailed {
                path: dir.to_owned(),
                source,
            }
        })?;

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|source| {
            ImageError::FetchFailed {
                path: dir.to_owned(),
                source,
            }
        })? {
            let path = entry.path();
            let known = path
                .extension()
                .and_then(|extension| extension.to_str())
                .is_some_and(|extension| {
                    IMAGE_EXTENSIONS
                        .iter()
                        .any(|candidate| extension.eq_ignore_ascii_case(candidate))
                });
            if known {
                paths.push(path);
            }
        }
        paths.sort();
        Self::new(paths)
    }

    /// Number of images in the set.
    #[must_use]
    pub fn size(&self) -> NonZeroUsize {
        // Non-empty by construction.
        NonZeroUsize::new(self.paths.len()).unwrap_or(NonZeroUsize::MIN)
    }

    /// Image path at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Path> {
        self.paths.get(index).map(PathBuf::as_path)
    }
}

/// Read an image and base64-encode its bytes for embedding in a frame.
///
/// The payload is the standard-alphabet encoding of the raw bytes, with no
/// data-URL prefix.
///
/// # Errors
///
/// Returns [`ImageError::FetchFailed`] when the file cannot be read and
/// [`ImageError::EncodeFailed`] when the bytes do not look like a supported
/// image format.
pub async fn encode(path: &Path) -> Result<String, ImageError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ImageError::FetchFailed {
            path: path.to_owned(),
            source,
        })?;
    if !has_image_signature(&bytes) {
        return Err(ImageError::EncodeFailed {
            path: path.to_owned(),
        });
    }
    Ok(STANDARD.encode(&bytes))
}

/// Magic-byte sniff for the supported formats (JPEG, PNG, GIF, WebP).
fn has_image_signature(bytes: &[u8]) -> bool {
    bytes.starts_with(&[0xff, 0xd8, 0xff])
        || bytes.starts_with(&[0x89, b'P', b'N', b'G'])
        || bytes.starts_with(b"GIF8")
        || (bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP")
}
