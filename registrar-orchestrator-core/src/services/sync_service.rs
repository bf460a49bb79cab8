//! 注册商 → 本地记录同步服务
//!
//! Pulls the registrar's view of a domain and rewrites the local domain and
//! purchase records from it. Nothing is written unless a complete snapshot was
//! obtained.

use std::sync::Arc;

use chrono::{DateTime, Days, FixedOffset, NaiveDate, Utc};

use registrar_orchestrator_provider::normalize_domain_name;

use crate::error::{CoreError, CoreResult};
use crate::traits::{DomainRecordRepository, RegistrarProvider};
use crate::types::{
    LocalDomainRecord, PurchaseRecord, RemoteDomainSnapshot, SyncOutcome, SyncSettings,
    SyncSummary,
};

/// 视为注册商锁定的订单状态
const LOCK_STATUSES: &[&str] = &["transferlock", "customerlock"];

/// 同步服务
pub struct SyncService {
    provider: Arc<dyn RegistrarProvider>,
    repository: Arc<dyn DomainRecordRepository>,
    settings: SyncSettings,
}

impl SyncService {
    /// 创建同步服务实例
    #[must_use]
    pub fn new(
        provider: Arc<dyn RegistrarProvider>,
        repository: Arc<dyn DomainRecordRepository>,
        settings: SyncSettings,
    ) -> Self {
        Self {
            provider,
            repository,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// 同步单个域名
    ///
    /// A `snapshot` already fetched by the caller is reused; otherwise one is
    /// requested from the registrar. If that request fails the local records are
    /// left untouched and [`CoreError::SyncAborted`] is returned.
    pub async fn sync_domain(
        &self,
        domain: &str,
        snapshot: Option<RemoteDomainSnapshot>,
    ) -> CoreResult<SyncOutcome> {
        let domain = normalize_domain_name(domain);
        let record = self
            .repository
            .find_domain(&domain)
            .await?
            .ok_or_else(|| CoreError::DomainNotFound(domain.clone()))?;

        if !record.sync_enabled {
            log::debug!("Sync disabled for {domain}, skipping");
            return Ok(SyncOutcome::Skipped);
        }

        let purchase = self
            .repository
            .find_purchase(record.purchase_id)
            .await?
            .ok_or(CoreError::PurchaseNotFound(record.purchase_id))?;

        let snapshot = match snapshot {
            Some(snapshot) => snapshot,
            None => self.fetch_snapshot(&domain).await?,
        };

        let (record, purchase) = reconcile(record, purchase, &snapshot, &self.settings);
        self.repository.save_synced(&record, &purchase).await?;
        log::info!(
            "Synced {domain}: expires {:?}, lock {}",
            record.date_expires,
            record.registrar_lock
        );

        Ok(SyncOutcome::Updated(SyncSummary {
            nameservers: record.nameservers,
            registrar_lock: record.registrar_lock,
            date_expires: record.date_expires,
            next_invoice: purchase.next_invoice,
        }))
    }

    async fn fetch_snapshot(&self, domain: &str) -> CoreResult<RemoteDomainSnapshot> {
        self.provider
            .fetch_domain_snapshot(domain)
            .await
            .map_err(|e| {
                if e.is_expected() {
                    log::warn!("Sync of {domain} aborted: {e}");
                } else {
                    log::error!("Sync of {domain} aborted: {e}");
                }
                CoreError::SyncAborted {
                    domain: domain.to_string(),
                    reason: e.to_string(),
                }
            })
    }
}

/// Applies `snapshot` to the local records.
///
/// Dates the registrar did not report keep their stored values.
fn reconcile(
    mut record: LocalDomainRecord,
    mut purchase: PurchaseRecord,
    snapshot: &RemoteDomainSnapshot,
    settings: &SyncSettings,
) -> (LocalDomainRecord, PurchaseRecord) {
    let offset = settings.offset();

    record.nameservers = snapshot.nameservers.join(", ");
    record.registrar_lock = is_locked(&snapshot.order_statuses);
    record.registrar_data = audit_line(snapshot);
    if let Some(registered) = local_date(snapshot.created_at, offset) {
        record.date_registered = Some(registered);
    }

    if let Some(expires) = local_date(snapshot.expires_at, offset) {
        record.date_expires = Some(expires);
        purchase.next_renewal = Some(expires);
        purchase.next_invoice =
            expires.checked_sub_days(Days::new(u64::from(settings.invoice_lead_days)));
    }

    (record, purchase)
}

fn local_date(at: Option<DateTime<Utc>>, offset: FixedOffset) -> Option<NaiveDate> {
    at.map(|t| t.with_timezone(&offset).date_naive())
}

fn is_locked(order_statuses: &[String]) -> bool {
    order_statuses
        .iter()
        .any(|s| LOCK_STATUSES.contains(&s.as_str()))
}

/// 审计信息：订单号与各角色联系人 ID
fn audit_line(snapshot: &RemoteDomainSnapshot) -> String {
    let ids = &snapshot.contact_ids;
    format!(
        "orderid: {}. admincontactid: {}. billingcontactid: {}. techcontactid: {}. registrantcontact: {}",
        snapshot.order_id, ids.admin, ids.billing, ids.tech, ids.registrant
    )
}
