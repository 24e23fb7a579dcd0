use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading dictionary files from disk.
///
/// Runtime lookup, binding, and persistence paths are deliberately
/// infallible: they degrade to fallbacks and log instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid dictionary file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("dictionary directory not found: {0}")]
    MissingDirectory(PathBuf),
}
