//! 类型定义模块

mod client;
mod domain_record;
mod sync;

pub use client::{ContactRequest, ProvisionedContact};
pub use domain_record::{LocalDomainRecord, PurchaseRecord};
pub use sync::{SyncOutcome, SyncSettings, SyncSummary};

// Re-export provider 库的公共类型
pub use registrar_orchestrator_provider::{
    Availability, ClientProfile, ContactRecord, ContactSet, DomainInfo, DomainRequest,
    LockUpdate, NameserverUpdate, OperationPayload, OperationResult, OperationStatus,
    RemoteDomainSnapshot, RoleContactIds,
};
