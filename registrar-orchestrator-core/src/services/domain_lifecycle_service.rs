//! 域名生命周期服务
//!
//! Thin layer over [`RegistrarProvider`]: every operation is forwarded as is, and
//! operations that change registrar-side state are followed by a sync of the
//! local records.

use std::sync::Arc;

use crate::error::CoreError;
use crate::services::SyncService;
use crate::traits::{DomainRecordRepository, RegistrarProvider};
use crate::types::{
    DomainRequest, LockUpdate, NameserverUpdate, OperationResult, SyncOutcome, SyncSettings,
};

/// 域名生命周期服务
pub struct DomainLifecycleService {
    provider: Arc<dyn RegistrarProvider>,
    sync: SyncService,
}

impl DomainLifecycleService {
    /// 创建生命周期服务实例
    #[must_use]
    pub fn new(
        provider: Arc<dyn RegistrarProvider>,
        repository: Arc<dyn DomainRecordRepository>,
        settings: SyncSettings,
    ) -> Self {
        let sync = SyncService::new(provider.clone(), repository, settings);
        Self { provider, sync }
    }

    #[must_use]
    pub fn sync_service(&self) -> &SyncService {
        &self.sync
    }

    pub async fn get_domain_info(&self, domain: &str) -> OperationResult {
        self.provider.get_domain_info(domain).await
    }

    pub async fn register_domain(&self, request: &DomainRequest) -> OperationResult {
        let result = self.provider.register_domain(request).await;
        self.sync_after(&request.domain, &result).await;
        result
    }

    pub async fn renew_domain(&self, request: &DomainRequest) -> OperationResult {
        let result = self.provider.renew_domain(request).await;
        self.sync_after(&request.domain, &result).await;
        result
    }

    pub async fn transfer_domain(&self, request: &DomainRequest) -> OperationResult {
        let result = self.provider.transfer_domain(request).await;
        self.sync_after(&request.domain, &result).await;
        result
    }

    pub async fn set_domain_lock(&self, update: &LockUpdate) -> OperationResult {
        let result = self.provider.set_domain_lock(update).await;
        self.sync_after(&update.domain, &result).await;
        result
    }

    pub async fn get_domain_auth_code(&self, domain: &str) -> OperationResult {
        self.provider.get_domain_auth_code(domain).await
    }

    pub async fn get_domain_nameservers(&self, domain: &str) -> OperationResult {
        self.provider.get_domain_nameservers(domain).await
    }

    pub async fn set_domain_nameservers(&self, update: &NameserverUpdate) -> OperationResult {
        let result = self.provider.set_domain_nameservers(update).await;
        self.sync_after(&update.domain, &result).await;
        result
    }

    pub async fn set_domain_contacts(&self, request: &DomainRequest) -> OperationResult {
        let result = self.provider.set_domain_contacts(request).await;
        self.sync_after(&request.domain, &result).await;
        result
    }

    pub async fn check_availability(&self, domain: &str) -> OperationResult {
        self.provider.check_availability(domain).await
    }

    /// 成功后同步本地记录；同步失败只记录日志，不影响操作结果
    async fn sync_after(&self, domain: &str, result: &OperationResult) {
        if !result.is_success() {
            return;
        }
        match self.sync.sync_domain(domain, None).await {
            Ok(SyncOutcome::Updated(_) | SyncOutcome::Skipped) => {}
            Err(CoreError::DomainNotFound(_)) => {
                log::debug!("No local record for {domain}, nothing to sync");
            }
            Err(e) if e.is_expected() => log::warn!("Post-operation sync of {domain} failed: {e}"),
            Err(e) => log::error!("Post-operation sync of {domain} failed: {e}"),
        }
    }
}
