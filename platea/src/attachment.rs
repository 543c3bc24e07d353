//! Payment-proof attachment storage.
//!
//! Attachments are opaque blobs kept on the filesystem next to the database.
//! Bookings reference them by an [`AttachmentRef`], a validated token that
//! doubles as the blob's file name. The token charset is restricted so a
//! stored reference can never name a path outside the blob directory.

use std::fmt;
use std::fs::{self, File};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Content types accepted for payment proofs, with their file extensions.
const ALLOWED_TYPES: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("application/pdf", "pdf"),
];

/// Default size cap for a single attachment, in bytes.
pub const DEFAULT_MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

static REF_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A validated reference to a stored attachment.
///
/// References contain only lowercase hex digits, decimal digits, and
/// hyphens, and end with the blob's extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttachmentRef(String);

impl AttachmentRef {
    /// Returns the reference text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn generate(extension: &str) -> Self {
        let nanos = chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_default();
        let pid = std::process::id();
        let seq = REF_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self(format!("{nanos:x}-{pid}-{seq}-{extension}"))
    }
}

impl fmt::Display for AttachmentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AttachmentRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || s.len() > 128 {
            return Err(Error::Validation {
                field: "attachment".to_string(),
                message: "reference must be 1 to 128 characters".to_string(),
            });
        }
        let valid = s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid || s.starts_with('-') {
            return Err(Error::Validation {
                field: "attachment".to_string(),
                message: format!("malformed reference '{s}'"),
            });
        }
        Ok(Self(s.to_string()))
    }
}

impl Serialize for AttachmentRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AttachmentRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Filesystem store for payment-proof blobs.
#[derive(Debug)]
pub struct AttachmentStore {
    root: PathBuf,
    max_bytes: u64,
}

impl AttachmentStore {
    /// Opens (creating if needed) a store rooted at the given directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>, max_bytes: u64) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root, max_bytes })
    }

    /// Returns the store's root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stores a blob and returns its reference.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the content type is not accepted or the blob
    /// exceeds the size cap, or `Io` if the write fails.
    pub fn store(&self, bytes: &[u8], content_type: &str) -> Result<AttachmentRef> {
        let extension = ALLOWED_TYPES
            .iter()
            .find(|(ty, _)| *ty == content_type)
            .map(|(_, ext)| *ext)
            .ok_or_else(|| Error::Validation {
                field: "attachment".to_string(),
                message: format!("unsupported content type '{content_type}'"),
            })?;

        if bytes.is_empty() {
            return Err(Error::Validation {
                field: "attachment".to_string(),
                message: "attachment is empty".to_string(),
            });
        }
        if bytes.len() as u64 > self.max_bytes {
            return Err(Error::Validation {
                field: "attachment".to_string(),
                message: format!(
                    "attachment is {} bytes, limit is {}",
                    bytes.len(),
                    self.max_bytes
                ),
            });
        }

        let reference = AttachmentRef::generate(extension);
        let mut file = File::create(self.root.join(reference.as_str()))?;
        file.write_all(bytes)?;
        file.sync_all()?;
        Ok(reference)
    }

    /// Opens a stored blob for reading.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no blob exists under the reference.
    pub fn open_blob(&self, reference: &AttachmentRef) -> Result<File> {
        let path = self.root.join(reference.as_str());
        File::open(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound {
                    resource: format!("attachment {reference}"),
                }
            } else {
                Error::Io(e)
            }
        })
    }

    /// Whether a blob exists under the reference.
    #[must_use]
    pub fn exists(&self, reference: &AttachmentRef) -> bool {
        self.root.join(reference.as_str()).is_file()
    }
}
