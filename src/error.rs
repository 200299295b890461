use serde::Serialize;

/// All errors that can surface from the console's commands.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Share code is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("{0}")]
    Custom(String),
}

// `--json` output carries errors as plain strings.
impl Serialize for ConsoleError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
