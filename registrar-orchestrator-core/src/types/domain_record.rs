//! 本地域名与购买记录类型定义

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The host's stored view of a registered domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalDomainRecord {
    /// 域名（小写）
    pub domain: String,
    /// 关联的购买记录 ID
    pub purchase_id: u64,
    /// 所属客户 ID
    pub client_id: u64,
    /// 是否允许从注册商同步
    #[serde(default)]
    pub sync_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_registered: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_expires: Option<NaiveDate>,
    /// Nameservers joined with `", "`.
    #[serde(default)]
    pub nameservers: String,
    #[serde(default)]
    pub registrar_lock: bool,
    /// Free-text audit line with the registrar order and contact ids.
    #[serde(default)]
    pub registrar_data: String,
}

/// Billing record the domain is renewed through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_renewal: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_invoice: Option<NaiveDate>,
}
