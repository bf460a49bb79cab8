//! Provider factory functions.

use std::sync::Arc;

use crate::error::Result;
use crate::providers::EnomProvider;
use crate::traits::RegistrarProvider;
use crate::types::RegistrarCredentials;

/// Creates a [`RegistrarProvider`] instance from the given credentials.
///
/// The concrete provider type is determined by the [`RegistrarCredentials`] variant.
/// The returned provider is wrapped in `Arc<dyn RegistrarProvider>` for easy sharing
/// across async tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use registrar_orchestrator_provider::{EnomConfig, RegistrarCredentials, create_provider};
///
/// let provider = create_provider(RegistrarCredentials::Enom(EnomConfig::new(
///     "reseller-login",
///     "reseller-password",
/// )))
/// .unwrap();
/// ```
///
/// # Errors
///
/// Fails with [`ProviderError::NetworkError`](crate::ProviderError::NetworkError) when the
/// HTTP client cannot be built.
pub fn create_provider(credentials: RegistrarCredentials) -> Result<Arc<dyn RegistrarProvider>> {
    match credentials {
        RegistrarCredentials::Enom(config) => Ok(Arc::new(EnomProvider::new(config)?)),
    }
}

/// Creates the concrete eNom provider, for callers that also need its customer
/// provisioning and extra commands.
pub fn create_enom_provider(credentials: RegistrarCredentials) -> Result<Arc<EnomProvider>> {
    match credentials {
        RegistrarCredentials::Enom(config) => Ok(Arc::new(EnomProvider::new(config)?)),
    }
}
