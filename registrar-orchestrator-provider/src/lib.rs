//! # registrar-orchestrator-provider
//!
//! A domain registrar integration library. It exposes one lifecycle contract
//! ([`RegistrarProvider`]) and implements it against the eNom reseller API.
//!
//! ## Supported Registrars
//!
//! | Registrar | Protocol | Auth Method |
//! |-----------|----------|-------------|
//! | [eNom](https://www.enom.com/) | `interface.asp` commands, XML responses | Reseller login + password |
//!
//! ## Feature Flags
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation and Android targets.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use registrar_orchestrator_provider::{
//!     EnomConfig, OperationPayload, RegistrarCredentials, create_provider,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Create a provider from credentials
//!     let mut config = EnomConfig::new("reseller-login", "reseller-password");
//!     config.sandbox = true;
//!     let provider = create_provider(RegistrarCredentials::Enom(config))?;
//!
//!     // 2. Check availability
//!     let result = provider.check_availability("example.com").await;
//!     if let OperationPayload::Availability(availability) = result.payload {
//!         println!("example.com: {availability:?}");
//!     }
//!
//!     // 3. Look up a domain held by the account
//!     let info = provider.get_domain_info("example.net").await;
//!     if !info.is_success() {
//!         println!("lookup failed: {:?}", info.message);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Lifecycle operations never return `Err`: every outcome is an [`OperationResult`].
//! Failures carry a [`ProviderError`] whose [`kind`](ProviderError::kind) is one of:
//!
//! - [`ErrorKind::Transport`] — the registrar could not be reached or timed out
//! - [`ErrorKind::Protocol`] — the response did not have the shape the operation needs
//! - [`ErrorKind::Business`] — the registrar refused the request; the messages are
//!   rendered as an HTML list in [`OperationResult::message`]
//! - [`ErrorKind::Validation`] — the request was rejected before it was sent
//!
//! Nothing is retried automatically.

mod document;
mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ErrorKind, ProviderError, Result};

// Re-export the response document model
pub use document::{Document, DocumentError, Node};

// Re-export factory functions
pub use factory::{create_enom_provider, create_provider};

// Re-export the transport seam
pub use http_client::{HttpMethod, ReqwestTransport, Transport};

// Re-export public traits (internal traits are not exported)
pub use traits::{
    ContactLookups, CountryDirectory, CustomerProvisioning, PhoneNumberParser, RegistrarProvider,
};

// Re-export types
pub use types::{
    Availability, ClientProfile, ContactRecord, ContactRole, ContactSet, CredentialValidationError,
    CustomField, DomainContacts, DomainInfo, DomainName, DomainRequest, EnomConfig, FieldKind,
    FieldOption, LockUpdate, NameserverUpdate, NewCustomer, OperationPayload, OperationResult,
    OperationStatus, PhoneNumber, RegistrarCredentials, RegistrarType, RemoteContact,
    RemoteDomainSnapshot, RoleContactIds, render_message_list,
};

// Re-export utils module
pub use utils::datetime;

// Re-export domain name helpers
pub use providers::common::{normalize_domain_name, split_domain};

// Re-export the concrete provider and its extension policy
pub use providers::{
    EnomProvider, EnomProviderBuilder, ExtensionHandler, HandlerCapabilities,
    TRANSFER_CODE_EMAILED, TldPolicy, contact_type,
};
