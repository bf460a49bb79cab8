use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{
    ClientProfile, DomainRequest, LockUpdate, NameserverUpdate, NewCustomer, OperationResult,
    PhoneNumber, RemoteContact, RemoteDomainSnapshot,
};

/// Provider 错误构造 Trait（内部使用）
/// 各 Provider 实现此 trait 以生成带 provider 标识的统一错误
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 快捷方法：响应体无法解析
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：响应缺少必需字段
    fn protocol_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ProtocolError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：注册商拒绝请求
    fn business_error(&self, messages: Vec<String>) -> ProviderError {
        ProviderError::BusinessError {
            provider: self.provider_name().to_string(),
            messages,
        }
    }

    /// 快捷方法：参数不合法
    fn invalid_parameter(&self, param: &str, detail: impl ToString) -> ProviderError {
        ProviderError::InvalidParameter {
            provider: self.provider_name().to_string(),
            param: param.to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：网络错误
    fn network_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::NetworkError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }
}

/// 域名注册商 Trait
///
/// Lifecycle operations return an [`OperationResult`] and never fail outright;
/// transport, protocol and business failures are folded into the result.
#[async_trait]
pub trait RegistrarProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 查询域名详情（到期日、锁定状态、DNS）
    async fn get_domain_info(&self, domain: &str) -> OperationResult;

    /// 注册域名
    async fn register_domain(&self, request: &DomainRequest) -> OperationResult;

    /// 续费域名
    async fn renew_domain(&self, request: &DomainRequest) -> OperationResult;

    /// 转入域名
    async fn transfer_domain(&self, request: &DomainRequest) -> OperationResult;

    /// 设置注册商锁
    async fn set_domain_lock(&self, update: &LockUpdate) -> OperationResult;

    /// 将转移授权码发送到注册人邮箱
    async fn get_domain_auth_code(&self, domain: &str) -> OperationResult;

    /// 查询 DNS 服务器
    async fn get_domain_nameservers(&self, domain: &str) -> OperationResult;

    /// 修改 DNS 服务器
    async fn set_domain_nameservers(&self, update: &NameserverUpdate) -> OperationResult;

    /// 修改域名联系人
    async fn set_domain_contacts(&self, request: &DomainRequest) -> OperationResult;

    /// 查询域名是否可注册
    async fn check_availability(&self, domain: &str) -> OperationResult;

    /// 拉取用于本地对账的远端快照
    ///
    /// Fails with a protocol error when the registrar does not report a nameserver count.
    async fn fetch_domain_snapshot(&self, domain: &str) -> Result<RemoteDomainSnapshot>;
}

/// Registrar-side customer accounts and their contacts.
#[async_trait]
pub trait CustomerProvisioning: Send + Sync {
    /// Sub-account id registered under `email`, if any.
    async fn get_customer_by_email(&self, email: &str) -> Result<Option<String>>;

    /// Opens a sub-account for `client` and creates its default contact.
    async fn create_customer(
        &self,
        client: &ClientProfile,
        domain: &str,
        lookups: &ContactLookups<'_>,
    ) -> Result<NewCustomer>;

    /// Creates a contact for `client` under an existing sub-account.
    ///
    /// Without `customer_id` the sub-account is looked up by e-mail, failing with
    /// [`ProviderError::CustomerNotFound`] if there is none.
    async fn create_contact(
        &self,
        client: &ClientProfile,
        customer_id: Option<&str>,
        domain: &str,
        extra: &BTreeMap<String, String>,
        lookups: &ContactLookups<'_>,
    ) -> Result<String>;

    /// The sub-account's default contact for the contact type implied by `domain`.
    async fn get_default_contact(&self, customer_id: &str, domain: &str) -> Result<RemoteContact>;

    /// Overwrites a stored contact with `fields`.
    async fn modify_contact(&self, fields: &BTreeMap<String, String>) -> Result<()>;
}

/// Resolves country display names to ISO 3166-1 alpha-2 codes.
pub trait CountryDirectory: Send + Sync {
    fn iso_code(&self, country_name: &str) -> Option<String>;
}

/// Splits a free-form phone number into calling code and national number.
pub trait PhoneNumberParser: Send + Sync {
    /// `country_iso` is the alpha-2 code used as the default region.
    fn parse(&self, raw: &str, country_iso: &str) -> Option<PhoneNumber>;
}

/// Host lookups needed to build customer and contact records.
#[derive(Clone, Copy)]
pub struct ContactLookups<'a> {
    pub countries: &'a dyn CountryDirectory,
    pub phones: &'a dyn PhoneNumberParser,
}
