//! eNom reseller API provider

mod commands;
mod contacts;
mod customer;
mod error;
mod http;
mod provider;
mod tld;
mod types;

use std::sync::Arc;
use std::time::Duration;

use chrono::FixedOffset;

use crate::error::Result;
use crate::http_client::{ReqwestTransport, Transport};
use crate::types::EnomConfig;

pub use tld::{ExtensionHandler, HandlerCapabilities, TldPolicy, contact_type};

pub(crate) const ENOM_LIVE_URL: &str = "https://reseller.enom.com/interface.asp";
pub(crate) const ENOM_SANDBOX_URL: &str = "https://resellertest.enom.com/interface.asp";
/// eNom 注册时最多接受的 DNS 服务器数量
pub(crate) const MAX_REGISTRATION_NAMESERVERS: usize = 12;
/// Message key returned when the auth code has been e-mailed to the registrant.
pub const TRANSFER_CODE_EMAILED: &str = "enom_transfer_code_emailed";

/// eNom registrar provider.
///
/// Talks to the reseller `interface.asp` endpoint with `responsetype=xml`. Every call
/// carries the reseller login and password; nothing else is shared between calls.
///
/// # Construction
///
/// ```rust,no_run
/// use registrar_orchestrator_provider::{EnomConfig, EnomProvider};
///
/// # fn main() -> registrar_orchestrator_provider::Result<()> {
/// let mut config = EnomConfig::new("reseller-login", "reseller-password");
/// config.sandbox = true;
/// let provider = EnomProvider::new(config)?;
/// # Ok(())
/// # }
/// ```
pub struct EnomProvider {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) uid: String,
    pub(crate) password: String,
    pub(crate) endpoint: &'static str,
    pub(crate) offset: FixedOffset,
}

/// Builder for [`EnomProvider`] with a replaceable transport.
pub struct EnomProviderBuilder {
    config: EnomConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl EnomProviderBuilder {
    fn new(config: EnomConfig) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    /// Send requests through `transport` instead of the default HTTP client.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the [`EnomProvider`] instance.
    pub fn build(self) -> Result<EnomProvider> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(
                "enom",
                Duration::from_secs(self.config.timeout_secs),
                Duration::from_secs(self.config.connect_timeout_secs),
            )?),
        };

        Ok(EnomProvider {
            transport,
            endpoint: if self.config.sandbox {
                ENOM_SANDBOX_URL
            } else {
                ENOM_LIVE_URL
            },
            offset: self.config.offset(),
            uid: self.config.uid,
            password: self.config.password,
        })
    }
}

impl EnomProvider {
    /// Creates a provider using the default HTTP transport.
    pub fn new(config: EnomConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Returns a builder for customizing the provider.
    pub fn builder(config: EnomConfig) -> EnomProviderBuilder {
        EnomProviderBuilder::new(config)
    }

    /// Endpoint chosen at construction.
    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }
}
