//! eNom RegistrarProvider trait 实现

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::document::Document;
use crate::error::{ProviderError, Result};
use crate::providers::common::split_domain;
use crate::traits::{ProviderErrorMapper, RegistrarProvider};
use crate::types::{
    Availability, CustomField, DomainContacts, DomainName, DomainRequest, LockUpdate,
    NameserverUpdate, OperationPayload, OperationResult, RemoteDomainSnapshot,
};

use super::commands::{
    Check, DeleteRegistration, Extend, GetContacts, GetDns, GetDomainInfo, GetDomainStatus,
    GetExtAttributes, GetRegLock, ModifyNs, Params, Purchase, ResendVerificationEmail,
    SetContacts, SetRegLock, SynchAuthInfo, TheftProtection, TransferOrder,
};
use super::contacts::project_contacts;
use super::error::{ResponseShape, response_strings};
use super::tld::TldPolicy;
use super::{EnomProvider, TRANSFER_CODE_EMAILED, types};

impl EnomProvider {
    fn domain_name(&self, domain: &str) -> Result<DomainName> {
        split_domain(domain, self.provider_name())
    }

    /// Folds an operation's outcome into its result, logging failures.
    fn finish(
        &self,
        operation: &str,
        domain: &str,
        result: Result<OperationPayload>,
    ) -> OperationResult {
        if let Err(e) = &result {
            if e.is_expected() {
                log::warn!("[{}] {operation} {domain}: {e}", self.provider_name());
            } else {
                log::error!("[{}] {operation} {domain}: {e}", self.provider_name());
            }
        }
        result.into()
    }

    fn require_contacts(&self, request: &DomainRequest) -> Result<Params> {
        request
            .contacts
            .as_ref()
            .map(project_contacts)
            .ok_or_else(|| self.invalid_parameter("contacts", "all four contacts are required"))
    }

    fn require_years(&self, request: &DomainRequest) -> Result<u32> {
        if request.years == 0 {
            return Err(self.invalid_parameter("years", "term must be at least one year"));
        }
        Ok(request.years)
    }

    fn not_in_account(&self, domain: &DomainName, status: &Document) -> ProviderError {
        ProviderError::NotInAccount {
            provider: self.provider_name().to_string(),
            domain: domain.to_string(),
            raw_message: response_strings(status).pop(),
        }
    }

    /// Fails unless the status check reports the domain as held by this account.
    async fn ensure_in_account(&self, domain: &DomainName) -> Result<()> {
        let status = self
            .call(&GetDomainStatus { domain }, ResponseShape::DOMAIN_STATUS)
            .await?;
        if types::in_account(&status) == Some("1") {
            Ok(())
        } else {
            Err(self.not_in_account(domain, &status))
        }
    }

    // ============ Generic submissions ============

    pub(crate) async fn purchase(
        &self,
        domain: &DomainName,
        request: &DomainRequest,
        contacts: &Params,
        extra: &BTreeMap<String, String>,
    ) -> Result<OperationPayload> {
        let command = Purchase {
            domain,
            years: self.require_years(request)?,
            nameservers: &request.nameservers,
            contacts,
            extra,
        };
        self.call(&command, ResponseShape::STANDARD).await?;
        Ok(OperationPayload::None)
    }

    pub(crate) async fn extend(
        &self,
        domain: &DomainName,
        request: &DomainRequest,
        extra: &BTreeMap<String, String>,
    ) -> Result<OperationPayload> {
        let command = Extend {
            domain,
            years: self.require_years(request)?,
            extra,
        };
        self.call(&command, ResponseShape::STANDARD).await?;
        Ok(OperationPayload::None)
    }

    pub(crate) async fn transfer_order(
        &self,
        domain: &DomainName,
        auth_code: &str,
        contacts: &Params,
        extra: &BTreeMap<String, String>,
    ) -> Result<OperationPayload> {
        let command = TransferOrder {
            domain,
            auth_code,
            contacts,
            extra,
        };
        self.call(&command, ResponseShape::STANDARD).await?;
        Ok(OperationPayload::None)
    }

    // ============ Operations ============

    async fn domain_info(&self, domain: &str) -> Result<OperationPayload> {
        let name = self.domain_name(domain)?;
        self.ensure_in_account(&name).await?;

        let doc = self
            .call(&GetDomainInfo { domain: &name }, ResponseShape::DOMAIN_INFO)
            .await?;
        let mut info = types::domain_info(&doc, &name.to_string(), self.offset);

        // 锁定状态查询失败不影响整体结果
        info.locked = match self.reg_lock(&name).await {
            Ok(locked) => locked,
            Err(e) => {
                log::debug!("[{}] lock status of {name} unavailable: {e}", self.provider_name());
                None
            }
        };

        Ok(OperationPayload::DomainInfo(info))
    }

    async fn register(&self, request: &DomainRequest) -> Result<OperationPayload> {
        let domain = self.domain_name(&request.domain)?;
        let policy = TldPolicy::resolve(&request.domain);
        let contacts = self.require_contacts(request)?;
        let extra = policy.registration_params(&request.custom_fields);

        match policy.handler.filter(|h| h.capabilities().custom_registration) {
            Some(handler) => {
                handler
                    .register(self, &domain, request, &contacts, &extra)
                    .await
            }
            None => self.purchase(&domain, request, &contacts, &extra).await,
        }
    }

    async fn renew(&self, request: &DomainRequest) -> Result<OperationPayload> {
        let domain = self.domain_name(&request.domain)?;
        let policy = TldPolicy::resolve(&request.domain);
        let extra = policy.registration_params(&request.custom_fields);

        match policy.handler.filter(|h| h.capabilities().custom_renewal) {
            Some(handler) => handler.renew(self, &domain, request, &extra).await,
            None => self.extend(&domain, request, &extra).await,
        }
    }

    async fn transfer(&self, request: &DomainRequest) -> Result<OperationPayload> {
        let domain = self.domain_name(&request.domain)?;
        let auth_code = request
            .auth_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .ok_or_else(|| self.invalid_parameter("auth_code", "transfer requires an auth code"))?;
        let policy = TldPolicy::resolve(&request.domain);
        let contacts = self.require_contacts(request)?;
        let extra = policy.registration_params(&request.custom_fields);

        match policy.handler.filter(|h| h.capabilities().custom_transfer) {
            Some(handler) => {
                handler
                    .transfer(self, &domain, auth_code, &contacts, &extra)
                    .await
            }
            None => {
                self.transfer_order(&domain, auth_code, &contacts, &extra)
                    .await
            }
        }
    }

    async fn set_lock(&self, update: &LockUpdate) -> Result<OperationPayload> {
        let domain = self.domain_name(&update.domain)?;
        let command = SetRegLock {
            domain: &domain,
            locked: update.locked,
        };
        self.call(&command, ResponseShape::STANDARD).await?;
        Ok(OperationPayload::None)
    }

    async fn send_auth_code(&self, domain: &str) -> Result<OperationPayload> {
        let domain = self.domain_name(domain)?;
        self.call(&SynchAuthInfo { domain: &domain }, ResponseShape::STANDARD)
            .await?;
        Ok(OperationPayload::None)
    }

    async fn nameservers(&self, domain: &str) -> Result<OperationPayload> {
        let domain = self.domain_name(domain)?;
        let doc = self
            .call(&GetDns { domain: &domain }, ResponseShape::STANDARD)
            .await?;
        Ok(OperationPayload::Nameservers(types::nameservers(&doc)))
    }

    async fn set_nameservers(&self, update: &NameserverUpdate) -> Result<OperationPayload> {
        let domain = self.domain_name(&update.domain)?;
        if update.nameservers.is_empty() {
            return Err(
                self.invalid_parameter("nameservers", "at least one nameserver is required")
            );
        }
        let command = ModifyNs {
            domain: &domain,
            nameservers: &update.nameservers,
        };
        self.call(&command, ResponseShape::STANDARD).await?;
        Ok(OperationPayload::Nameservers(update.nameservers.clone()))
    }

    async fn set_contacts(&self, request: &DomainRequest) -> Result<OperationPayload> {
        let domain = self.domain_name(&request.domain)?;
        let contacts = self.require_contacts(request)?;
        let command = SetContacts {
            domain: &domain,
            contacts: &contacts,
            extra: &request.custom_fields,
        };
        self.call(&command, ResponseShape::STANDARD).await?;
        Ok(OperationPayload::None)
    }

    async fn availability(&self, domain: &str) -> Result<OperationPayload> {
        let domain = self.domain_name(domain)?;
        let doc = self
            .call(&Check { domain: &domain }, ResponseShape::AVAILABILITY)
            .await?;
        let text = doc.value("RRPText").unwrap_or_default();
        Ok(OperationPayload::Availability(
            Availability::from_registrar_text(text),
        ))
    }

    async fn reg_lock(&self, domain: &DomainName) -> Result<Option<bool>> {
        let doc = self
            .call(&GetRegLock { domain }, ResponseShape::STANDARD)
            .await?;
        Ok(types::reg_lock(&doc))
    }

    // ============ Additional commands ============

    /// Registrar lock state; `None` when the registrar does not report one.
    pub async fn lock_status(&self, domain: &str) -> Result<Option<bool>> {
        let domain = self.domain_name(domain)?;
        self.reg_lock(&domain).await
    }

    /// Contacts currently attached to `domain`, per role.
    pub async fn domain_contacts(&self, domain: &str) -> Result<DomainContacts> {
        let domain = self.domain_name(domain)?;
        let doc = self
            .call(&GetContacts { domain: &domain }, ResponseShape::STANDARD)
            .await?;
        Ok(types::domain_contacts(&doc))
    }

    /// Extra registration attributes the registry requires for `tld`.
    pub async fn extension_attributes(&self, tld: &str) -> Result<Vec<CustomField>> {
        let tld = tld.trim().trim_start_matches('.').to_ascii_lowercase();
        let doc = self
            .call(&GetExtAttributes { tld: &tld }, ResponseShape::STANDARD)
            .await?;
        Ok(types::ext_attributes(&doc))
    }

    pub async fn enable_theft_protection(&self, domain: &str) -> OperationResult {
        let result = self.theft_protection(domain, true).await;
        self.finish("enable_theft_protection", domain, result)
    }

    pub async fn disable_theft_protection(&self, domain: &str) -> OperationResult {
        let result = self.theft_protection(domain, false).await;
        self.finish("disable_theft_protection", domain, result)
    }

    async fn theft_protection(&self, domain: &str, enabled: bool) -> Result<OperationPayload> {
        let domain = self.domain_name(domain)?;
        let command = TheftProtection {
            domain: &domain,
            enabled,
        };
        self.call(&command, ResponseShape::STANDARD).await?;
        Ok(OperationPayload::None)
    }

    /// Deletes a registration that is still inside the registry's grace period.
    pub async fn delete_domain(&self, domain: &str) -> OperationResult {
        let result = self.delete_registration(domain).await;
        self.finish("delete_domain", domain, result)
    }

    async fn delete_registration(&self, domain: &str) -> Result<OperationPayload> {
        let domain = self.domain_name(domain)?;
        self.call(&DeleteRegistration { domain: &domain }, ResponseShape::STANDARD)
            .await?;
        Ok(OperationPayload::None)
    }

    pub async fn resend_verification_email(&self, domain: &str) -> OperationResult {
        let result = self.resend_verification(domain).await;
        self.finish("resend_verification_email", domain, result)
    }

    async fn resend_verification(&self, domain: &str) -> Result<OperationPayload> {
        let domain = self.domain_name(domain)?;
        self.call(
            &ResendVerificationEmail { domain: &domain },
            ResponseShape::STANDARD,
        )
        .await?;
        Ok(OperationPayload::None)
    }
}

#[async_trait]
impl RegistrarProvider for EnomProvider {
    fn id(&self) -> &'static str {
        "enom"
    }

    async fn get_domain_info(&self, domain: &str) -> OperationResult {
        let result = self.domain_info(domain).await;
        self.finish("get_domain_info", domain, result)
    }

    async fn register_domain(&self, request: &DomainRequest) -> OperationResult {
        let result = self.register(request).await;
        self.finish("register_domain", &request.domain, result)
    }

    async fn renew_domain(&self, request: &DomainRequest) -> OperationResult {
        let result = self.renew(request).await;
        self.finish("renew_domain", &request.domain, result)
    }

    async fn transfer_domain(&self, request: &DomainRequest) -> OperationResult {
        let result = self.transfer(request).await;
        self.finish("transfer_domain", &request.domain, result)
    }

    async fn set_domain_lock(&self, update: &LockUpdate) -> OperationResult {
        let result = self.set_lock(update).await;
        self.finish("set_domain_lock", &update.domain, result)
    }

    async fn get_domain_auth_code(&self, domain: &str) -> OperationResult {
        match self.send_auth_code(domain).await {
            Ok(_) => OperationResult::success_with_message(TRANSFER_CODE_EMAILED),
            Err(e) => self.finish("get_domain_auth_code", domain, Err(e)),
        }
    }

    async fn get_domain_nameservers(&self, domain: &str) -> OperationResult {
        let result = self.nameservers(domain).await;
        self.finish("get_domain_nameservers", domain, result)
    }

    async fn set_domain_nameservers(&self, update: &NameserverUpdate) -> OperationResult {
        let result = self.set_nameservers(update).await;
        self.finish("set_domain_nameservers", &update.domain, result)
    }

    async fn set_domain_contacts(&self, request: &DomainRequest) -> OperationResult {
        let result = self.set_contacts(request).await;
        self.finish("set_domain_contacts", &request.domain, result)
    }

    async fn check_availability(&self, domain: &str) -> OperationResult {
        let result = self.availability(domain).await;
        self.finish("check_availability", domain, result)
    }

    async fn fetch_domain_snapshot(&self, domain: &str) -> Result<RemoteDomainSnapshot> {
        let name = self.domain_name(domain)?;
        self.ensure_in_account(&name).await?;

        let doc = self
            .call(&GetDomainInfo { domain: &name }, ResponseShape::STANDARD)
            .await?;
        types::snapshot(&doc, &name.to_string())
            .ok_or_else(|| self.protocol_error("missing field 'noOfNameServers'"))
    }
}
