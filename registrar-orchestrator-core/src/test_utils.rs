//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use registrar_orchestrator_provider::{
    NewCustomer, OperationPayload, PhoneNumber, ProviderError, RemoteContact,
    Result as ProviderResult,
};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::traits::{
    ClientRepository, ContactLookups, CountryDirectory, CustomerProvisioning,
    DomainRecordRepository, PhoneNumberParser, RegistrarProvider,
};
use crate::types::{
    ClientProfile, DomainRequest, LocalDomainRecord, LockUpdate, NameserverUpdate,
    OperationResult, PurchaseRecord, RemoteDomainSnapshot, RoleContactIds,
};

// ===== MockDomainRecordRepository =====

pub struct MockDomainRecordRepository {
    domains: RwLock<HashMap<String, LocalDomainRecord>>,
    purchases: RwLock<HashMap<u64, PurchaseRecord>>,
    saves: RwLock<usize>,
    /// 如果 Some，save 时返回此错误
    save_error: RwLock<Option<String>>,
}

impl MockDomainRecordRepository {
    pub fn new() -> Self {
        Self {
            domains: RwLock::new(HashMap::new()),
            purchases: RwLock::new(HashMap::new()),
            saves: RwLock::new(0),
            save_error: RwLock::new(None),
        }
    }

    pub async fn insert(&self, domain: LocalDomainRecord, purchase: PurchaseRecord) {
        self.purchases.write().await.insert(purchase.id, purchase);
        self.insert_domain_only(domain).await;
    }

    pub async fn insert_domain_only(&self, domain: LocalDomainRecord) {
        self.domains
            .write()
            .await
            .insert(domain.domain.clone(), domain);
    }

    pub async fn get(&self, domain: &str) -> Option<(LocalDomainRecord, PurchaseRecord)> {
        let record = self.domains.read().await.get(domain).cloned()?;
        let purchase = self
            .purchases
            .read()
            .await
            .get(&record.purchase_id)
            .cloned()?;
        Some((record, purchase))
    }

    pub async fn save_count(&self) -> usize {
        *self.saves.read().await
    }

    pub async fn set_save_error(&self, err: Option<String>) {
        *self.save_error.write().await = err;
    }
}

#[async_trait]
impl DomainRecordRepository for MockDomainRecordRepository {
    async fn find_domain(&self, domain: &str) -> CoreResult<Option<LocalDomainRecord>> {
        Ok(self.domains.read().await.get(domain).cloned())
    }

    async fn find_purchase(&self, purchase_id: u64) -> CoreResult<Option<PurchaseRecord>> {
        Ok(self.purchases.read().await.get(&purchase_id).cloned())
    }

    async fn save_synced(
        &self,
        domain: &LocalDomainRecord,
        purchase: &PurchaseRecord,
    ) -> CoreResult<()> {
        if let Some(ref msg) = *self.save_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        self.insert(domain.clone(), purchase.clone()).await;
        *self.saves.write().await += 1;
        Ok(())
    }
}

// ===== MockRegistrarProvider =====

/// Returns one canned result for every lifecycle operation.
pub struct MockRegistrarProvider {
    result: RwLock<OperationResult>,
    snapshot: RwLock<ProviderResult<RemoteDomainSnapshot>>,
    calls: RwLock<Vec<String>>,
    snapshot_calls: RwLock<usize>,
}

impl MockRegistrarProvider {
    pub fn new() -> Self {
        Self {
            result: RwLock::new(OperationResult::success(OperationPayload::None)),
            snapshot: RwLock::new(Err(ProviderError::NetworkError {
                provider: "enom".to_string(),
                detail: "no snapshot configured".to_string(),
            })),
            calls: RwLock::new(Vec::new()),
            snapshot_calls: RwLock::new(0),
        }
    }

    pub async fn set_result(&self, result: OperationResult) {
        *self.result.write().await = result;
    }

    pub async fn set_snapshot(&self, snapshot: ProviderResult<RemoteDomainSnapshot>) {
        *self.snapshot.write().await = snapshot;
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    pub async fn snapshot_calls(&self) -> usize {
        *self.snapshot_calls.read().await
    }

    async fn record(&self, operation: &str) -> OperationResult {
        self.calls.write().await.push(operation.to_string());
        self.result.read().await.clone()
    }
}

#[async_trait]
impl RegistrarProvider for MockRegistrarProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn get_domain_info(&self, _domain: &str) -> OperationResult {
        self.record("get_domain_info").await
    }

    async fn register_domain(&self, _request: &DomainRequest) -> OperationResult {
        self.record("register_domain").await
    }

    async fn renew_domain(&self, _request: &DomainRequest) -> OperationResult {
        self.record("renew_domain").await
    }

    async fn transfer_domain(&self, _request: &DomainRequest) -> OperationResult {
        self.record("transfer_domain").await
    }

    async fn set_domain_lock(&self, _update: &LockUpdate) -> OperationResult {
        self.record("set_domain_lock").await
    }

    async fn get_domain_auth_code(&self, _domain: &str) -> OperationResult {
        self.record("get_domain_auth_code").await
    }

    async fn get_domain_nameservers(&self, _domain: &str) -> OperationResult {
        self.record("get_domain_nameservers").await
    }

    async fn set_domain_nameservers(&self, _update: &NameserverUpdate) -> OperationResult {
        self.record("set_domain_nameservers").await
    }

    async fn set_domain_contacts(&self, _request: &DomainRequest) -> OperationResult {
        self.record("set_domain_contacts").await
    }

    async fn check_availability(&self, _domain: &str) -> OperationResult {
        self.record("check_availability").await
    }

    async fn fetch_domain_snapshot(&self, _domain: &str) -> ProviderResult<RemoteDomainSnapshot> {
        *self.snapshot_calls.write().await += 1;
        self.snapshot.read().await.clone()
    }
}

// ===== MockCustomerProvisioning =====

/// Arguments of one `create_contact` call.
#[derive(Debug, Clone)]
pub struct ContactCall {
    pub customer_id: Option<String>,
    pub domain: String,
    pub country: Option<String>,
    pub extra: BTreeMap<String, String>,
}

pub struct MockCustomerProvisioning {
    /// email -> customer id
    customers: RwLock<HashMap<String, String>>,
    contact_calls: RwLock<Vec<ContactCall>>,
    created: RwLock<usize>,
    lookups: RwLock<usize>,
    fail_lookups: RwLock<bool>,
}

impl MockCustomerProvisioning {
    pub fn new() -> Self {
        Self {
            customers: RwLock::new(HashMap::new()),
            contact_calls: RwLock::new(Vec::new()),
            created: RwLock::new(0),
            lookups: RwLock::new(0),
            fail_lookups: RwLock::new(false),
        }
    }

    pub async fn add_customer(&self, email: &str, customer_id: &str) {
        self.customers
            .write()
            .await
            .insert(email.to_string(), customer_id.to_string());
    }

    pub async fn fail_lookups(&self) {
        *self.fail_lookups.write().await = true;
    }

    pub async fn contact_calls(&self) -> Vec<ContactCall> {
        self.contact_calls.read().await.clone()
    }

    pub async fn created_customers(&self) -> usize {
        *self.created.read().await
    }

    pub async fn lookups(&self) -> usize {
        *self.lookups.read().await
    }
}

#[async_trait]
impl CustomerProvisioning for MockCustomerProvisioning {
    async fn get_customer_by_email(&self, email: &str) -> ProviderResult<Option<String>> {
        *self.lookups.write().await += 1;
        if *self.fail_lookups.read().await {
            return Err(ProviderError::NetworkError {
                provider: "enom".to_string(),
                detail: "connection reset".to_string(),
            });
        }
        Ok(self.customers.read().await.get(email).cloned())
    }

    async fn create_customer(
        &self,
        client: &ClientProfile,
        _domain: &str,
        _lookups: &ContactLookups<'_>,
    ) -> ProviderResult<NewCustomer> {
        let n = {
            let mut created = self.created.write().await;
            *created += 1;
            *created
        };
        let customer_id = format!("new-{n}");
        self.add_customer(&client.email, &customer_id).await;
        Ok(NewCustomer {
            customer_id,
            contact_id: format!("default-{n}"),
        })
    }

    async fn create_contact(
        &self,
        client: &ClientProfile,
        customer_id: Option<&str>,
        domain: &str,
        extra: &BTreeMap<String, String>,
        lookups: &ContactLookups<'_>,
    ) -> ProviderResult<String> {
        let mut calls = self.contact_calls.write().await;
        calls.push(ContactCall {
            customer_id: customer_id.map(str::to_string),
            domain: domain.to_string(),
            country: lookups.countries.iso_code(&client.country),
            extra: extra.clone(),
        });
        Ok(format!("c-{}", calls.len()))
    }

    async fn get_default_contact(
        &self,
        _customer_id: &str,
        _domain: &str,
    ) -> ProviderResult<RemoteContact> {
        Ok(RemoteContact::default())
    }

    async fn modify_contact(&self, _fields: &BTreeMap<String, String>) -> ProviderResult<()> {
        Ok(())
    }
}

// ===== MockClientRepository =====

pub struct MockClientRepository {
    clients: RwLock<HashMap<u64, ClientProfile>>,
}

impl MockClientRepository {
    pub fn new() -> Self {
        Self {
            clients: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, client: ClientProfile) {
        self.clients.write().await.insert(client.id, client);
    }
}

#[async_trait]
impl ClientRepository for MockClientRepository {
    async fn find_by_id(&self, client_id: u64) -> CoreResult<Option<ClientProfile>> {
        Ok(self.clients.read().await.get(&client_id).cloned())
    }
}

// ===== Lookups =====

pub struct StaticCountries;

impl CountryDirectory for StaticCountries {
    fn iso_code(&self, country_name: &str) -> Option<String> {
        match country_name {
            "United Kingdom" => Some("GB".to_string()),
            "Singapore" => Some("SG".to_string()),
            _ => None,
        }
    }
}

pub struct DigitsPhoneParser;

impl PhoneNumberParser for DigitsPhoneParser {
    fn parse(&self, raw: &str, _country_iso: &str) -> Option<PhoneNumber> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        (!digits.is_empty()).then(|| PhoneNumber::new("44", digits))
    }
}

// ===== 工厂方法 =====

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Sync-enabled record linked to purchase 7.
pub fn local_record(domain: &str) -> LocalDomainRecord {
    LocalDomainRecord {
        domain: domain.to_string(),
        purchase_id: 7,
        client_id: 42,
        sync_enabled: true,
        date_registered: Some(date(2024, 5, 20)),
        date_expires: Some(date(2026, 5, 20)),
        nameservers: "ns1.old-host.net, ns2.old-host.net".to_string(),
        registrar_lock: false,
        registrar_data: String::new(),
    }
}

pub fn purchase(id: u64) -> PurchaseRecord {
    PurchaseRecord {
        id,
        next_renewal: Some(date(2026, 5, 20)),
        next_invoice: Some(date(2026, 5, 6)),
    }
}

/// Registered 2024-05-20, expiring 2027-05-20 (09:00 UTC), transfer-locked.
pub fn snapshot(domain: &str) -> RemoteDomainSnapshot {
    RemoteDomainSnapshot {
        domain: domain.to_string(),
        order_id: "157896342".to_string(),
        nameservers: vec![
            "dns1.name-services.com".to_string(),
            "dns2.name-services.com".to_string(),
        ],
        order_statuses: vec!["transferlock".to_string()],
        contact_ids: RoleContactIds {
            registrant: "11".to_string(),
            admin: "22".to_string(),
            billing: "0".to_string(),
            tech: "33".to_string(),
        },
        created_at: DateTime::from_timestamp(1_716_195_600, 0),
        expires_at: DateTime::from_timestamp(1_810_803_600, 0),
    }
}

pub fn client_profile(id: u64) -> ClientProfile {
    ClientProfile {
        id,
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        address1: "12 St James's Square".to_string(),
        city: "London".to_string(),
        state: "London".to_string(),
        postcode: "SW1Y 4JH".to_string(),
        country: "United Kingdom".to_string(),
        phone: "+44 20 7123 4567".to_string(),
        ..ClientProfile::default()
    }
}
