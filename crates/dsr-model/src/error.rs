use thiserror::Error;

/// Shared error taxonomy for the assembler core.
///
/// An unresolved citation is never an error: the resolver recovers it
/// locally into a placeholder record. Likewise a missing or corrupt index
/// snapshot is treated as absence by the loader, not a failure.
#[derive(Debug, Error)]
pub enum DsrError {
    /// Caller bug, e.g. mismatched texts/metadata lengths.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// An external embedding or reasoning provider failed.
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),
}

pub type Result<T> = std::result::Result<T, DsrError>;
