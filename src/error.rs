use std::path::PathBuf;

use thiserror::Error;

/// Main error type for godrink configuration operations
#[derive(Debug, Error)]
pub enum GodrinkError {
    #[error("cannot read file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {format} content in {origin}: {message}")]
    Decode {
        format: &'static str,
        origin: String,
        message: String,
    },

    #[error("cannot build certificate pool: {0}")]
    CertPool(String),

    #[error("cannot load client key pair: {0}")]
    KeyPair(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl GodrinkError {
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    pub fn decode<S: Into<String>>(format: &'static str, origin: S, message: S) -> Self {
        Self::Decode {
            format,
            origin: origin.into(),
            message: message.into(),
        }
    }

    pub fn cert_pool<S: Into<String>>(msg: S) -> Self {
        Self::CertPool(msg.into())
    }

    pub fn key_pair<S: Into<String>>(msg: S) -> Self {
        Self::KeyPair(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type alias for godrink configuration operations
pub type Result<T> = std::result::Result<T, GodrinkError>;
