use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GlueError>;

#[derive(Error, Debug)]
pub enum GlueError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid file pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("{0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error("Script error: {0}")]
    Script(String),

    #[error("Logging error: {0}")]
    Logging(String),
}

impl GlueError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_session(msg: impl Into<String>) -> Self {
        Self::InvalidSession(msg.into())
    }

    pub fn script(msg: impl Into<String>) -> Self {
        Self::Script(msg.into())
    }
}
