//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use registrar_orchestrator_provider::{
    ContactRecord, ContactSet, CountryDirectory, EnomConfig, EnomProvider, HttpMethod,
    PhoneNumber, PhoneNumberParser, ProviderError, Result, Transport,
};

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

// ============ Mock transport ============

/// One request as seen by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub params: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn command(&self) -> Option<&str> {
        self.param("command")
    }
}

/// Records every request and replays queued responses in order.
///
/// When the queue is empty the request fails with a network error, which is how
/// tests simulate an unreachable registrar.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<(u16, String)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues a `200 OK` response.
    pub fn reply(&self, body: impl Into<String>) -> &Self {
        self.reply_status(200, body)
    }

    pub fn reply_status(&self, status: u16, body: impl Into<String>) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back((status, body.into()));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|r| r.command().map(str::to_string))
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        params: &[(String, String)],
    ) -> Result<(u16, String)> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                method,
                url: url.to_string(),
                params: params.to_vec(),
            });
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .ok_or_else(|| ProviderError::NetworkError {
                provider: "enom".to_string(),
                detail: "connection refused".to_string(),
            })
    }
}

// ============ Providers ============

pub fn config() -> EnomConfig {
    EnomConfig::new("reseller", "s3cret")
}

/// Provider wired to `transport`.
pub fn provider_with(transport: &Arc<MockTransport>, config: EnomConfig) -> EnomProvider {
    let built = EnomProvider::builder(config)
        .transport(transport.clone())
        .build();
    let Ok(provider) = built else {
        panic!("provider with injected transport always builds");
    };
    provider
}

pub fn provider(transport: &Arc<MockTransport>) -> EnomProvider {
    provider_with(transport, config())
}

// ============ Response bodies ============

/// A clean response carrying `inner`.
pub fn ok_body(inner: &str) -> String {
    format!("<?xml version=\"1.0\" encoding=\"utf-8\"?><interface-response>{inner}<ErrCount>0</ErrCount><Done>true</Done></interface-response>")
}

/// A response reporting `messages` as `Err1..ErrN`.
pub fn error_body(messages: &[&str]) -> String {
    let errors: String = messages
        .iter()
        .enumerate()
        .map(|(i, m)| format!("<Err{n}>{m}</Err{n}>", n = i + 1))
        .collect();
    format!(
        "<interface-response><errors>{errors}</errors><ErrCount>{}</ErrCount><Done>true</Done></interface-response>",
        messages.len()
    )
}

/// `GetDomainStatus` response.
pub fn status_body(in_account: &str, response_string: Option<&str>) -> String {
    let responses = response_string
        .map(|s| format!("<responses><response><ResponseString>{s}</ResponseString></response></responses>"))
        .unwrap_or_default();
    format!(
        "<interface-response><DomainStatus><RegistrationStatus>Registered</RegistrationStatus><InAccount>{in_account}</InAccount></DomainStatus>{responses}<Done>true</Done></interface-response>"
    )
}

// ============ Contacts ============

pub fn contact() -> ContactRecord {
    ContactRecord {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        address1: "12 St James's Square".to_string(),
        city: "London".to_string(),
        state: "London".to_string(),
        postal_code: "SW1Y 4JH".to_string(),
        country: "GB".to_string(),
        email: "ada@example.com".to_string(),
        phone: PhoneNumber::new("44", "2071234567"),
        ..ContactRecord::default()
    }
}

pub fn contacts() -> ContactSet {
    ContactSet::uniform(contact())
}

/// Knows a handful of country names.
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

/// Treats the number as national digits; `+cc` prefixes are honored.
pub struct DigitsPhoneParser;

impl PhoneNumberParser for DigitsPhoneParser {
    fn parse(&self, raw: &str, country_iso: &str) -> Option<PhoneNumber> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return None;
        }
        let country_code = match country_iso {
            "GB" => "44",
            "SG" => "65",
            _ => return None,
        };
        let national = digits.strip_prefix(country_code).unwrap_or(&digits);
        Some(PhoneNumber::new(country_code, national.trim_start_matches('0')))
    }
}
