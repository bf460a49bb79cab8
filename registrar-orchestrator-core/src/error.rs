//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use registrar_orchestrator_provider::{CredentialValidationError, ProviderError};

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// No local record for the domain
    #[error("Domain not found: {0}")]
    DomainNotFound(String),

    /// The domain's purchase (billing) record is missing
    #[error("Purchase not found: {0}")]
    PurchaseNotFound(u64),

    /// Billing client not found
    #[error("Client not found: {0}")]
    ClientNotFound(u64),

    /// Reconciliation stopped before touching local state
    #[error("Sync aborted for {domain}: {reason}")]
    SyncAborted { domain: String, reason: String },

    /// Credential validation errors (structured, supports field level errors)
    #[error("{0}")]
    CredentialValidation(CredentialValidationError),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::DomainNotFound(_)
            | Self::PurchaseNotFound(_)
            | Self::ClientNotFound(_)
            | Self::ValidationError(_)
            | Self::CredentialValidation(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::SyncAborted { .. } | Self::StorageError(_) => false,
        }
    }
}

impl From<CredentialValidationError> for CoreError {
    fn from(err: CredentialValidationError) -> Self {
        Self::CredentialValidation(err)
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
