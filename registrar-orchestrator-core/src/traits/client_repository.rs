//! Billing client lookup

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::ClientProfile;

/// Read access to the host's client profiles.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn find_by_id(&self, client_id: u64) -> CoreResult<Option<ClientProfile>>;
}
