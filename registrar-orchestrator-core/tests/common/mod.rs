//! 共享测试工具：脚本化传输层与内存仓库

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::NaiveDate;
use registrar_orchestrator_core::types::{LocalDomainRecord, PurchaseRecord};
use registrar_orchestrator_core::{CoreResult, DomainRecordRepository};
use registrar_orchestrator_provider::{
    EnomConfig, EnomProvider, HttpMethod, ProviderError, Result, Transport,
};
use tokio::sync::RwLock;

/// Replays queued XML bodies and remembers the `command` of every request.
#[derive(Default)]
pub struct ScriptedTransport {
    bodies: Mutex<VecDeque<String>>,
    commands: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new(bodies: &[String]) -> Arc<Self> {
        let transport = Self::default();
        transport
            .bodies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(bodies.iter().cloned());
        Arc::new(transport)
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(
        &self,
        _method: HttpMethod,
        _url: &str,
        params: &[(String, String)],
    ) -> Result<(u16, String)> {
        if let Some((_, command)) = params.iter().find(|(k, _)| k == "command") {
            self.commands
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(command.clone());
        }
        self.bodies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .map(|body| (200, body))
            .ok_or_else(|| ProviderError::NetworkError {
                provider: "enom".to_string(),
                detail: "connection refused".to_string(),
            })
    }
}

pub fn enom(transport: &Arc<ScriptedTransport>) -> Arc<EnomProvider> {
    let built = EnomProvider::builder(EnomConfig::new("reseller", "s3cret"))
        .transport(transport.clone())
        .build();
    let Ok(provider) = built else {
        panic!("provider with injected transport always builds");
    };
    Arc::new(provider)
}

pub fn ok_body(inner: &str) -> String {
    format!("<interface-response>{inner}<ErrCount>0</ErrCount><Done>true</Done></interface-response>")
}

pub fn in_account_body() -> String {
    "<interface-response><DomainStatus><InAccount>1</InAccount></DomainStatus><Done>true</Done></interface-response>".to_string()
}

/// `GetDomainInfo` for a domain registered 2021-01-01 and expiring 2027-01-01 (UTC midnight).
pub fn domain_info_body() -> String {
    ok_body(
        "<GetDomainInfo>\
           <noOfNameServers>2</noOfNameServers><ns1>dns1.registrar-servers.com</ns1><ns2>dns2.registrar-servers.com</ns2>\
           <orderstatus>registrarlock</orderstatus><orderstatus>customerlock</orderstatus>\
           <orderid>9981</orderid>\
           <registrantcontact><contactid>501</contactid></registrantcontact>\
           <techcontact><contactid>502</contactid></techcontact>\
           <creationtime>1609459200</creationtime><endtime>1798761600</endtime>\
         </GetDomainInfo>",
    )
}

// ============ In-memory records ============

#[derive(Default)]
pub struct MemoryRecords {
    domains: RwLock<HashMap<String, LocalDomainRecord>>,
    purchases: RwLock<HashMap<u64, PurchaseRecord>>,
}

impl MemoryRecords {
    pub async fn with_domain(domain: &str) -> Arc<Self> {
        let records = Self::default();
        records.purchases.write().await.insert(
            3,
            PurchaseRecord {
                id: 3,
                next_renewal: NaiveDate::from_ymd_opt(2026, 1, 1),
                next_invoice: NaiveDate::from_ymd_opt(2025, 12, 18),
            },
        );
        records.domains.write().await.insert(
            domain.to_string(),
            LocalDomainRecord {
                domain: domain.to_string(),
                purchase_id: 3,
                client_id: 42,
                sync_enabled: true,
                nameservers: "ns1.parked.example".to_string(),
                ..LocalDomainRecord::default()
            },
        );
        Arc::new(records)
    }

    pub async fn snapshot(
        &self,
        domain: &str,
    ) -> (Option<LocalDomainRecord>, Option<PurchaseRecord>) {
        let record = self.domains.read().await.get(domain).cloned();
        let purchase = match &record {
            Some(r) => self.purchases.read().await.get(&r.purchase_id).cloned(),
            None => None,
        };
        (record, purchase)
    }
}

#[async_trait]
impl DomainRecordRepository for MemoryRecords {
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
        self.domains
            .write()
            .await
            .insert(domain.domain.clone(), domain.clone());
        self.purchases
            .write()
            .await
            .insert(purchase.id, purchase.clone());
        Ok(())
    }
}
