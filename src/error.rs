use thiserror::Error;

/// Rejected `chunk_size` argument.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkError {
    #[error("chunk size must be a positive integer or a predicate, got 0")]
    ZeroSize,
    #[error("chunk size must be a positive integer or a predicate, got {0}")]
    NegativeSize(i64),
    #[error("chunk size {0} does not fit in usize")]
    TooLarge(u64),
}

pub type Result<T> = std::result::Result<T, ChunkError>;
