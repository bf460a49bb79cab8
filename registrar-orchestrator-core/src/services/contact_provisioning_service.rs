//! 客户子账户与联系人开通服务

use std::collections::BTreeMap;
use std::sync::Arc;

use registrar_orchestrator_provider::{ExtensionHandler, normalize_domain_name};

use crate::error::{CoreError, CoreResult};
use crate::traits::{
    ClientRepository, ContactLookups, CountryDirectory, CustomerProvisioning, PhoneNumberParser,
};
use crate::types::{ContactRequest, ProvisionedContact};

/// Looks up or opens the registrar sub-account of a client and creates a
/// contact for a domain under it.
pub struct ContactProvisioningService {
    customers: Arc<dyn CustomerProvisioning>,
    clients: Arc<dyn ClientRepository>,
    countries: Arc<dyn CountryDirectory>,
    phones: Arc<dyn PhoneNumberParser>,
}

impl ContactProvisioningService {
    #[must_use]
    pub fn new(
        customers: Arc<dyn CustomerProvisioning>,
        clients: Arc<dyn ClientRepository>,
        countries: Arc<dyn CountryDirectory>,
        phones: Arc<dyn PhoneNumberParser>,
    ) -> Self {
        Self {
            customers,
            clients,
            countries,
            phones,
        }
    }

    fn lookups(&self) -> ContactLookups<'_> {
        ContactLookups {
            countries: self.countries.as_ref(),
            phones: self.phones.as_ref(),
        }
    }

    /// 确保客户在注册商处拥有可用于该域名的联系人
    ///
    /// A client without a sub-account gets one (with its default contact). When
    /// the domain's extension needs extra contact attributes, a dedicated contact
    /// carrying them is created as well.
    pub async fn ensure_contact(&self, request: &ContactRequest) -> CoreResult<ProvisionedContact> {
        let client = self
            .clients
            .find_by_id(request.client_id)
            .await?
            .ok_or(CoreError::ClientNotFound(request.client_id))?;
        let domain = normalize_domain_name(&request.domain);
        let extra = extension_contact_params(&domain, &request.extension_values);
        let lookups = self.lookups();

        let Some(customer_id) = self.customers.get_customer_by_email(&client.email).await? else {
            let created = self
                .customers
                .create_customer(&client, &domain, &lookups)
                .await?;
            log::info!(
                "Opened registrar sub-account {} for client {}",
                created.customer_id,
                client.id
            );
            let contact_id = if extra.is_empty() {
                created.contact_id
            } else {
                self.customers
                    .create_contact(&client, Some(&created.customer_id), &domain, &extra, &lookups)
                    .await?
            };
            return Ok(ProvisionedContact {
                customer_id: created.customer_id,
                contact_id,
                created_customer: true,
            });
        };

        let contact_id = self
            .customers
            .create_contact(&client, Some(&customer_id), &domain, &extra, &lookups)
            .await?;
        log::debug!("Created contact {contact_id} under sub-account {customer_id}");

        Ok(ProvisionedContact {
            customer_id,
            contact_id,
            created_customer: false,
        })
    }
}

/// Wire attributes the domain's extension handler derives from the form values.
fn extension_contact_params(
    domain: &str,
    values: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    ExtensionHandler::for_domain(domain)
        .map(|handler| handler.contact_params(values).into_iter().collect())
        .unwrap_or_default()
}
