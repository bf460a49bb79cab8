//! Registrar Orchestrator Core Library
//!
//! Host-facing services on top of the registrar provider library:
//! - Reconciliation of local domain/purchase records (`SyncService`)
//! - Registrar sub-account and contact provisioning (`ContactProvisioningService`)
//! - Lifecycle operations with automatic post-change sync (`DomainLifecycleService`)
//!
//! Storage and client lookups are abstracted through traits, so the host's billing
//! database can be plugged in without this crate knowing about it.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{ContactProvisioningService, DomainLifecycleService, SyncService};
pub use traits::{ClientRepository, DomainRecordRepository};
