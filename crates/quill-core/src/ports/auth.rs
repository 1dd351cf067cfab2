//! Editor authorization port.

/// Gate consulted before every mutating post operation.
///
/// Reads are never gated.
pub trait AccessGate: Send + Sync {
    /// Succeed iff `presented` is exactly the configured secret.
    fn authorize(&self, presented: Option<&str>) -> Result<(), AccessError>;
}

/// Authorization failures. Both render as `Forbidden`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("Missing editor token")]
    MissingToken,

    #[error("Invalid editor token")]
    InvalidToken,
}
