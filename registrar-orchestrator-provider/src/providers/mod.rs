//! Registrar provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

mod enom;

pub use enom::{
    EnomProvider, EnomProviderBuilder, ExtensionHandler, HandlerCapabilities,
    TRANSFER_CODE_EMAILED, TldPolicy, contact_type,
};
