//! 本地域名记录持久化抽象 Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{LocalDomainRecord, PurchaseRecord};

/// 域名记录仓库 Trait
///
/// Backed by the host's billing database. Writes are last-writer-wins.
#[async_trait]
pub trait DomainRecordRepository: Send + Sync {
    /// 按域名查找本地记录
    ///
    /// # Returns
    /// * `Some(record)` - 找到记录
    /// * `None` - 域名不在本地库中
    async fn find_domain(&self, domain: &str) -> CoreResult<Option<LocalDomainRecord>>;

    /// 按 ID 查找购买记录
    async fn find_purchase(&self, purchase_id: u64) -> CoreResult<Option<PurchaseRecord>>;

    /// 同时写入域名记录与购买记录
    ///
    /// Implementations must persist both or neither.
    ///
    /// # Arguments
    /// * `domain` - 同步后的域名记录
    /// * `purchase` - 重新计算续费/开票日期后的购买记录
    async fn save_synced(
        &self,
        domain: &LocalDomainRecord,
        purchase: &PurchaseRecord,
    ) -> CoreResult<()>;
}
