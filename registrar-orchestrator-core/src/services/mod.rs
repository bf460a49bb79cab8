//! 业务逻辑服务层

mod contact_provisioning_service;
mod domain_lifecycle_service;
mod sync_service;

pub use contact_provisioning_service::ContactProvisioningService;
pub use domain_lifecycle_service::DomainLifecycleService;
pub use sync_service::SyncService;
