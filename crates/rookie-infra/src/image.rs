//! Image attachments as self-contained `data:` URIs.
//!
//! The stores treat the result as an opaque string; nothing here checks the
//! size or whether the bytes really are an image.

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Attachment errors.
#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Encode `bytes` as a data URI, guessing the MIME type from `file_name`.
pub fn data_uri_from_bytes(bytes: &[u8], file_name: &str) -> String {
    let mime = mime_guess::from_path(file_name).first_or_octet_stream();
    format!("data:{};base64,{}", mime.essence_str(), STANDARD.encode(bytes))
}

/// Read a file and encode it as a data URI.
pub fn data_uri_from_path(path: &Path) -> Result<String, AttachmentError> {
    let bytes = fs::read(path).map_err(|source| AttachmentError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Image attachment encoded");
    Ok(data_uri_from_bytes(&bytes, &name))
}

/// MIME type and decoded payload of a base64 data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl DataUri {
    /// Parse `data:<mime>;base64,<payload>`. Anything else yields `None`.
    pub fn parse(uri: &str) -> Option<Self> {
        let rest = uri.strip_prefix("data:")?;
        let (meta, payload) = rest.split_once(',')?;
        let mime = meta.strip_suffix(";base64")?;
        let bytes = STANDARD.decode(payload).ok()?;
        Some(Self {
            mime: mime.to_string(),
            bytes,
        })
    }
}
