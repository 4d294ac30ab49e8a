//! Preference store errors.

use std::path::PathBuf;

/// Error returned by a [`PreferenceStore`](super::PreferenceStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("preference store i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// The backing file exists but is not a JSON object.
    #[error("preference file '{}' is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Storage is disabled or otherwise inaccessible.
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),
}
