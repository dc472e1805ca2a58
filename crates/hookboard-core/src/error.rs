use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for key '{key}'")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("storage quota of {limit} bytes exceeded while writing '{key}'")]
    QuotaExceeded { key: String, limit: usize },
    #[error("storage is unavailable")]
    Unavailable,
    #[error("could not encode value for key '{key}'")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not decode value stored under '{key}'")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("no provider for context `{name}` in scope")]
    Missing { name: &'static str },
}
