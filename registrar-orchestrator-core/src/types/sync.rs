//! 同步相关类型定义

use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

/// 默认提前开票天数
const DEFAULT_INVOICE_LEAD_DAYS: u32 = 14;

/// Host settings that shape reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSettings {
    /// Days before expiry at which the renewal invoice is raised.
    pub invoice_lead_days: u32,
    /// Local timezone as a fixed offset east of UTC.
    pub utc_offset_seconds: i32,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            invoice_lead_days: DEFAULT_INVOICE_LEAD_DAYS,
            utc_offset_seconds: 0,
        }
    }
}

impl SyncSettings {
    /// Configured offset; out-of-range values fall back to UTC.
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_seconds).unwrap_or_else(|| Utc.fix())
    }
}

/// What a reconciliation run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum SyncOutcome {
    /// Sync is switched off for the domain; nothing was read or written.
    Skipped,
    /// Both records were rewritten from the registrar's view.
    Updated(SyncSummary),
}

/// The reconciled fields, echoed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    pub nameservers: String,
    pub registrar_lock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_expires: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_invoice: Option<NaiveDate>,
}
