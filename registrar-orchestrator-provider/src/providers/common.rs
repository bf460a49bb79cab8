//! Provider 公共工具函数

use std::time::Duration;

use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::types::DomainName;

// ============ HTTP Client ============

/// 创建带超时配置的 HTTP Client
pub fn create_http_client(
    provider_name: &str,
    timeout: Duration,
    connect_timeout: Duration,
) -> Result<Client> {
    Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: provider_name.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

// ============ 域名名称处理 ============

/// 去掉首尾空白和末尾的点，并转为小写
pub fn normalize_domain_name(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// 在第一个点处拆分域名（仅转小写，不做其他规范化）
/// 如: "Example.COM" -> ("example", "com")
/// 如: "sub.example.co.uk" -> ("sub", "example.co.uk")
pub fn split_domain(domain: &str, provider_name: &str) -> Result<DomainName> {
    let lowered = domain.to_ascii_lowercase();
    match lowered.split_once('.') {
        Some((sld, tld)) if !sld.is_empty() && !tld.is_empty() => Ok(DomainName {
            sld: sld.to_string(),
            tld: tld.to_string(),
        }),
        _ => Err(ProviderError::InvalidParameter {
            provider: provider_name.to_string(),
            param: "domain".to_string(),
            detail: format!("'{domain}' is not a fully-qualified domain name"),
        }),
    }
}

/// 域名最后一级标签，如 "example.com.au" -> "au"
pub fn final_label(domain: &str) -> String {
    let normalized = normalize_domain_name(domain);
    normalized
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_string()
}
