use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid descriptor JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid diagram config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown file `{name}` (not present in the descriptor)")]
    UnknownFile { name: String },
}
