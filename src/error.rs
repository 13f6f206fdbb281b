use thiserror::Error;

#[derive(Debug, Error)]
pub enum OtsError {
    #[error("failed to load osm dataset: {0}")]
    DatasetLoad(String),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    #[error("tile build deadline expired")]
    DeadlineExpired,

    #[error("failed to encode png: {0}")]
    Encode(String),

    #[error("invalid tile coordinate: {0}")]
    InvalidTileCoord(String),
}

pub type Result<T> = std::result::Result<T, OtsError>;
