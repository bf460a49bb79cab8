//! eNom 子账户与联系人
//!
//! Customers are reseller sub-accounts. Opening one always creates its default
//! contact as well.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rand::Rng;
use rand::distr::Alphanumeric;

use crate::error::{ProviderError, Result};
use crate::traits::{ContactLookups, CustomerProvisioning, ProviderErrorMapper};
use crate::types::{ClientProfile, NewCustomer, PhoneNumber, RemoteContact};

use super::commands::{
    AddContact, CreateSubAccount, GetDefaultContact, GetSubAccounts, ModifyContact, Params,
};
use super::error::ResponseShape;
use super::{EnomProvider, contact_type, types};

/// 登录名前缀最大长度
const UID_PREFIX_MAX_LEN: usize = 16;
const PASSWORD_LEN: usize = 15;
const DEFAULT_ORGANIZATION: &str = "None";
const DEFAULT_COMPANY: &str = "Not Applicable";

/// Login handle: first initial and surname, letters only, plus a 4-digit suffix.
///
/// `generate_uid("Ada", "Lovelace")` yields something like `ALovelace4821`.
pub(crate) fn generate_uid(first_name: &str, last_name: &str) -> String {
    let prefix: String = first_name
        .chars()
        .take(1)
        .chain(last_name.chars())
        .filter(char::is_ascii_alphabetic)
        .take(UID_PREFIX_MAX_LEN)
        .collect();
    let suffix: u16 = rand::rng().random_range(1000..=9999);
    format!("{prefix}{suffix}")
}

fn generate_password() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(PASSWORD_LEN)
        .map(char::from)
        .collect()
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl EnomProvider {
    /// Country ISO code and parsed phone number of a client.
    fn resolve_client(
        &self,
        client: &ClientProfile,
        lookups: &ContactLookups<'_>,
    ) -> Result<(String, PhoneNumber)> {
        let country = lookups.countries.iso_code(&client.country).ok_or_else(|| {
            self.invalid_parameter("country", format!("unknown country '{}'", client.country))
        })?;
        let phone = lookups
            .phones
            .parse(&client.phone, &country)
            .ok_or_else(|| {
                self.invalid_parameter("phone", format!("cannot parse '{}'", client.phone))
            })?;
        Ok((country, phone))
    }

    fn sub_account_fields(
        client: &ClientProfile,
        uid: String,
        password: &str,
        country: String,
        phone: &PhoneNumber,
    ) -> Params {
        vec![
            ("newuid".to_string(), uid),
            ("newpw".to_string(), password.to_string()),
            ("confirmpw".to_string(), password.to_string()),
            (
                "RegistrantOrganizationName".to_string(),
                non_empty(client.company.as_ref())
                    .unwrap_or(DEFAULT_ORGANIZATION)
                    .to_string(),
            ),
            ("RegistrantFirstName".to_string(), client.first_name.clone()),
            ("RegistrantLastName".to_string(), client.last_name.clone()),
            ("RegistrantAddress1".to_string(), client.address1.clone()),
            ("RegistrantCity".to_string(), client.city.clone()),
            ("RegistrantPostalCode".to_string(), client.postcode.clone()),
            ("RegistrantCountry".to_string(), country),
            ("RegistrantEmailAddress".to_string(), client.email.clone()),
            ("RegistrantPhone".to_string(), phone.to_wire()),
        ]
    }

    fn contact_fields(
        client: &ClientProfile,
        customer_id: &str,
        domain: &str,
        country: String,
        phone: PhoneNumber,
        extra: &BTreeMap<String, String>,
    ) -> Params {
        let mut fields = vec![
            (
                "name".to_string(),
                format!("{} {}", client.first_name, client.last_name),
            ),
            (
                "company".to_string(),
                non_empty(client.company.as_ref())
                    .unwrap_or(DEFAULT_COMPANY)
                    .to_string(),
            ),
            ("email".to_string(), client.email.clone()),
            ("address-line-1".to_string(), client.address1.clone()),
        ];
        if let Some(line) = non_empty(client.address2.as_ref()) {
            fields.push(("address-line-2".to_string(), line.to_string()));
        }
        if let Some(line) = non_empty(client.address3.as_ref()) {
            fields.push(("address-line-3".to_string(), line.to_string()));
        }
        fields.extend([
            ("city".to_string(), client.city.clone()),
            ("country".to_string(), country),
            ("zipcode".to_string(), client.postcode.clone()),
            ("phone-cc".to_string(), phone.country_code),
            ("phone".to_string(), phone.national_number),
            ("customer-id".to_string(), customer_id.to_string()),
            ("type".to_string(), contact_type(domain)),
        ]);
        fields.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        fields
    }
}

#[async_trait]
impl CustomerProvisioning for EnomProvider {
    async fn get_customer_by_email(&self, email: &str) -> Result<Option<String>> {
        let doc = self
            .call(&GetSubAccounts { email }, ResponseShape::STANDARD)
            .await?;
        Ok(types::sub_account_id(&doc))
    }

    async fn create_customer(
        &self,
        client: &ClientProfile,
        domain: &str,
        lookups: &ContactLookups<'_>,
    ) -> Result<NewCustomer> {
        let (country, phone) = self.resolve_client(client, lookups)?;
        let password = generate_password();
        let fields = Self::sub_account_fields(
            client,
            generate_uid(&client.first_name, &client.last_name),
            &password,
            country,
            &phone,
        );

        let doc = self
            .call(&CreateSubAccount { fields: &fields }, ResponseShape::STANDARD)
            .await?;
        let customer_id = types::new_account_id(&doc)
            .ok_or_else(|| self.protocol_error("missing field 'NewAccount/Account'"))?;
        log::info!(
            "[{}] Created sub-account {customer_id} for client {}",
            self.provider_name(),
            client.id
        );

        let contact_id = self
            .create_contact(client, Some(&customer_id), domain, &BTreeMap::new(), lookups)
            .await?;

        Ok(NewCustomer {
            customer_id,
            contact_id,
        })
    }

    async fn create_contact(
        &self,
        client: &ClientProfile,
        customer_id: Option<&str>,
        domain: &str,
        extra: &BTreeMap<String, String>,
        lookups: &ContactLookups<'_>,
    ) -> Result<String> {
        let customer_id = match customer_id {
            Some(id) => id.to_string(),
            None => self
                .get_customer_by_email(&client.email)
                .await?
                .ok_or_else(|| ProviderError::CustomerNotFound {
                    provider: self.provider_name().to_string(),
                    email: client.email.clone(),
                })?,
        };

        let (country, phone) = self.resolve_client(client, lookups)?;
        let fields = Self::contact_fields(client, &customer_id, domain, country, phone, extra);

        let doc = self
            .call(&AddContact { fields: &fields }, ResponseShape::STANDARD)
            .await?;
        types::contact_id(&doc).ok_or_else(|| self.protocol_error("missing field 'ContactID'"))
    }

    async fn get_default_contact(&self, customer_id: &str, domain: &str) -> Result<RemoteContact> {
        let contact_type = contact_type(domain);
        let command = GetDefaultContact {
            customer_id,
            contact_type: &contact_type,
        };
        let doc = self.call(&command, ResponseShape::STANDARD).await?;
        doc.at("Contact")
            .map(types::remote_contact)
            .ok_or_else(|| self.protocol_error("missing field 'Contact'"))
    }

    async fn modify_contact(&self, fields: &BTreeMap<String, String>) -> Result<()> {
        self.call(&ModifyContact { fields }, ResponseShape::STANDARD)
            .await?;
        Ok(())
    }
}
