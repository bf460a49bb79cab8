//! eNom 命令定义
//!
//! One struct per registrar command. Each encodes itself into the flat parameter list
//! sent to `interface.asp`; the wire client adds the credentials and `command` key.

use std::collections::BTreeMap;

use crate::http_client::HttpMethod;
use crate::types::DomainName;

use super::MAX_REGISTRATION_NAMESERVERS;

/// Ordered request parameters.
pub(crate) type Params = Vec<(String, String)>;

/// A registrar command and its parameter encoder.
pub(crate) trait Command: Send + Sync {
    /// Value of the `command` parameter.
    fn name(&self) -> &'static str;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    /// Appends this command's parameters.
    fn encode(&self, params: &mut Params);
}

fn put(params: &mut Params, key: &str, value: impl Into<String>) {
    params.push((key.to_string(), value.into()));
}

/// Query commands address the domain with lowercase keys.
fn put_domain_query(params: &mut Params, domain: &DomainName) {
    put(params, "sld", &domain.sld);
    put(params, "tld", &domain.tld);
}

fn put_domain(params: &mut Params, domain: &DomainName) {
    put(params, "SLD", &domain.sld);
    put(params, "TLD", &domain.tld);
}

/// `NS1..NSn`, 1-based, input order preserved.
fn put_nameservers<'a>(params: &mut Params, nameservers: impl IntoIterator<Item = &'a String>) {
    for (i, ns) in nameservers.into_iter().enumerate() {
        put(params, &format!("NS{}", i + 1), ns);
    }
}

fn put_all(params: &mut Params, fields: &[(String, String)]) {
    params.extend(fields.iter().cloned());
}

/// Custom fields replace an earlier parameter with the same key in place; new keys go last.
fn put_map(params: &mut Params, fields: &BTreeMap<String, String>) {
    for (key, value) in fields {
        match params.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1.clone_from(value),
            None => params.push((key.clone(), value.clone())),
        }
    }
}

// ============ Domain queries ============

/// `GetDomainStatus`: whether the domain is registered and held by this account.
pub(crate) struct GetDomainStatus<'a> {
    pub domain: &'a DomainName,
}

impl Command for GetDomainStatus<'_> {
    fn name(&self) -> &'static str {
        "GetDomainStatus"
    }

    fn encode(&self, params: &mut Params) {
        put_domain_query(params, self.domain);
    }
}

pub(crate) struct GetDomainInfo<'a> {
    pub domain: &'a DomainName,
}

impl Command for GetDomainInfo<'_> {
    fn name(&self) -> &'static str {
        "GetDomainInfo"
    }

    fn encode(&self, params: &mut Params) {
        put_domain_query(params, self.domain);
    }
}

pub(crate) struct GetRegLock<'a> {
    pub domain: &'a DomainName,
}

impl Command for GetRegLock<'_> {
    fn name(&self) -> &'static str {
        "GetRegLock"
    }

    fn encode(&self, params: &mut Params) {
        put_domain_query(params, self.domain);
    }
}

pub(crate) struct GetContacts<'a> {
    pub domain: &'a DomainName,
}

impl Command for GetContacts<'_> {
    fn name(&self) -> &'static str {
        "GetContacts"
    }

    fn encode(&self, params: &mut Params) {
        put_domain_query(params, self.domain);
    }
}

/// `Check`: availability lookup.
pub(crate) struct Check<'a> {
    pub domain: &'a DomainName,
}

impl Command for Check<'_> {
    fn name(&self) -> &'static str {
        "Check"
    }

    fn encode(&self, params: &mut Params) {
        put_domain(params, self.domain);
    }
}

/// `GetExtAttributes`: extra registration attributes required by a TLD.
pub(crate) struct GetExtAttributes<'a> {
    pub tld: &'a str,
}

impl Command for GetExtAttributes<'_> {
    fn name(&self) -> &'static str {
        "GetExtAttributes"
    }

    fn encode(&self, params: &mut Params) {
        put(params, "tld", self.tld);
    }
}

pub(crate) struct GetDns<'a> {
    pub domain: &'a DomainName,
}

impl Command for GetDns<'_> {
    fn name(&self) -> &'static str {
        "GetDNS"
    }

    fn encode(&self, params: &mut Params) {
        put_domain(params, self.domain);
    }
}

// ============ Domain lifecycle ============

/// `Purchase`: register a domain.
pub(crate) struct Purchase<'a> {
    pub domain: &'a DomainName,
    pub years: u32,
    pub nameservers: &'a [String],
    pub contacts: &'a [(String, String)],
    pub extra: &'a BTreeMap<String, String>,
}

impl Command for Purchase<'_> {
    fn name(&self) -> &'static str {
        "Purchase"
    }

    fn encode(&self, params: &mut Params) {
        put_domain(params, self.domain);
        put(params, "NumYears", self.years.to_string());
        put(params, "IgnoreNSFail", "Yes");
        // Anything past the registrar's limit is dropped, not rejected
        put_nameservers(
            params,
            self.nameservers.iter().take(MAX_REGISTRATION_NAMESERVERS),
        );
        put_all(params, self.contacts);
        put_map(params, self.extra);
    }
}

/// `Extend`: renew a domain.
pub(crate) struct Extend<'a> {
    pub domain: &'a DomainName,
    pub years: u32,
    pub extra: &'a BTreeMap<String, String>,
}

impl Command for Extend<'_> {
    fn name(&self) -> &'static str {
        "Extend"
    }

    fn encode(&self, params: &mut Params) {
        put_domain(params, self.domain);
        put(params, "NumYears", self.years.to_string());
        put(params, "IgnoreNSFail", "Yes");
        put_map(params, self.extra);
    }
}

/// `TP_CreateOrder`: single-domain transfer in auto-verification mode.
pub(crate) struct TransferOrder<'a> {
    pub domain: &'a DomainName,
    pub auth_code: &'a str,
    pub contacts: &'a [(String, String)],
    pub extra: &'a BTreeMap<String, String>,
}

impl Command for TransferOrder<'_> {
    fn name(&self) -> &'static str {
        "TP_CreateOrder"
    }

    fn encode(&self, params: &mut Params) {
        put(params, "SLD1", &self.domain.sld);
        put(params, "TLD1", &self.domain.tld);
        put(params, "AuthInfo1", self.auth_code);
        put(params, "UseContacts", "0");
        put(params, "OrderType", "Autoverification");
        put(params, "DomainCount", "1");
        put_all(params, self.contacts);
        put_map(params, self.extra);
    }
}

/// `Contacts`: replace the contacts of a domain.
pub(crate) struct SetContacts<'a> {
    pub domain: &'a DomainName,
    pub contacts: &'a [(String, String)],
    pub extra: &'a BTreeMap<String, String>,
}

impl Command for SetContacts<'_> {
    fn name(&self) -> &'static str {
        "Contacts"
    }

    fn encode(&self, params: &mut Params) {
        put_domain(params, self.domain);
        put_all(params, self.contacts);
        put_map(params, self.extra);
    }
}

/// `ModifyNS`: every provided nameserver is passed through.
pub(crate) struct ModifyNs<'a> {
    pub domain: &'a DomainName,
    pub nameservers: &'a [String],
}

impl Command for ModifyNs<'_> {
    fn name(&self) -> &'static str {
        "ModifyNS"
    }

    fn encode(&self, params: &mut Params) {
        put_domain(params, self.domain);
        put_nameservers(params, self.nameservers);
    }
}

/// `SetRegLock`: `UnlockRegistrar=0` locks, `1` unlocks.
pub(crate) struct SetRegLock<'a> {
    pub domain: &'a DomainName,
    pub locked: bool,
}

impl Command for SetRegLock<'_> {
    fn name(&self) -> &'static str {
        "SetRegLock"
    }

    fn encode(&self, params: &mut Params) {
        put_domain(params, self.domain);
        put(params, "UnlockRegistrar", if self.locked { "0" } else { "1" });
    }
}

/// `SynchAuthInfo`: e-mail the auth code to the registrant after a forced resync.
pub(crate) struct SynchAuthInfo<'a> {
    pub domain: &'a DomainName,
}

impl Command for SynchAuthInfo<'_> {
    fn name(&self) -> &'static str {
        "SynchAuthInfo"
    }

    fn encode(&self, params: &mut Params) {
        put_domain(params, self.domain);
        put(params, "EmailEPP", "True");
        put(params, "RunSynchAutoInfo", "True");
    }
}

/// `EnableServices` / `DisableServices` for registry theft protection.
pub(crate) struct TheftProtection<'a> {
    pub domain: &'a DomainName,
    pub enabled: bool,
}

impl Command for TheftProtection<'_> {
    fn name(&self) -> &'static str {
        if self.enabled {
            "EnableServices"
        } else {
            "DisableServices"
        }
    }

    fn encode(&self, params: &mut Params) {
        put_domain(params, self.domain);
        put(params, "Service", "TheftProtection");
    }
}

pub(crate) struct DeleteRegistration<'a> {
    pub domain: &'a DomainName,
}

impl Command for DeleteRegistration<'_> {
    fn name(&self) -> &'static str {
        "DeleteRegistration"
    }

    fn encode(&self, params: &mut Params) {
        put_domain(params, self.domain);
    }
}

/// Resend the ICANN registrant verification e-mail.
pub(crate) struct ResendVerificationEmail<'a> {
    pub domain: &'a DomainName,
}

impl Command for ResendVerificationEmail<'_> {
    fn name(&self) -> &'static str {
        "ResendVerificationEmail"
    }

    fn encode(&self, params: &mut Params) {
        put_domain(params, self.domain);
    }
}

// ============ Customers and contacts ============

/// `CreateSubAccount`. Fields are built by the customer module.
pub(crate) struct CreateSubAccount<'a> {
    pub fields: &'a [(String, String)],
}

impl Command for CreateSubAccount<'_> {
    fn name(&self) -> &'static str {
        "CreateSubAccount"
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn encode(&self, params: &mut Params) {
        put_all(params, self.fields);
    }
}

pub(crate) struct GetSubAccounts<'a> {
    pub email: &'a str,
}

impl Command for GetSubAccounts<'_> {
    fn name(&self) -> &'static str {
        "GetSubAccounts"
    }

    fn encode(&self, params: &mut Params) {
        put(params, "EmailAddress", self.email);
    }
}

pub(crate) struct AddContact<'a> {
    pub fields: &'a [(String, String)],
}

impl Command for AddContact<'_> {
    fn name(&self) -> &'static str {
        "AddContact"
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn encode(&self, params: &mut Params) {
        put_all(params, self.fields);
    }
}

pub(crate) struct GetDefaultContact<'a> {
    pub customer_id: &'a str,
    pub contact_type: &'a str,
}

impl Command for GetDefaultContact<'_> {
    fn name(&self) -> &'static str {
        "GetDefaultContact"
    }

    fn encode(&self, params: &mut Params) {
        put(params, "type", self.contact_type);
        put(params, "customer-id", self.customer_id);
    }
}

pub(crate) struct ModifyContact<'a> {
    pub fields: &'a BTreeMap<String, String>,
}

impl Command for ModifyContact<'_> {
    fn name(&self) -> &'static str {
        "ModifyContact"
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn encode(&self, params: &mut Params) {
        put_map(params, self.fields);
    }
}
