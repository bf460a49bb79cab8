use serde::{Deserialize, Serialize};

/// Unified error type for registrar operations.
///
/// Each variant includes a `provider` field identifying which registrar produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// Errors fall into four groups, exposed through [`kind`](Self::kind):
/// - **Transport** ([`NetworkError`](Self::NetworkError), [`Timeout`](Self::Timeout)):
///   the registrar could not be reached or did not answer in time.
/// - **Protocol** ([`ParseError`](Self::ParseError), [`ProtocolError`](Self::ProtocolError)):
///   the registrar answered, but not with a document of the expected shape.
/// - **Business** ([`BusinessError`](Self::BusinessError), [`NotInAccount`](Self::NotInAccount),
///   [`CustomerNotFound`](Self::CustomerNotFound)): the registrar understood the request and refused it.
/// - **Validation** ([`InvalidParameter`](Self::InvalidParameter)): the request was rejected
///   before it was sent.
///
/// Nothing is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The response body could not be parsed as a document at all.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// The document parsed, but a field the operation depends on was missing or malformed.
    ProtocolError {
        /// Provider that produced the error.
        provider: String,
        /// Which field was missing or unusable.
        detail: String,
    },

    /// The registrar reported one or more errors for the command.
    BusinessError {
        /// Provider that produced the error.
        provider: String,
        /// Human-readable messages, in the order the registrar reported them.
        messages: Vec<String>,
    },

    /// The domain is not held by the reseller account.
    NotInAccount {
        /// Provider that produced the error.
        provider: String,
        /// Domain name that was looked up.
        domain: String,
        /// Last status message reported by the registrar, if any.
        raw_message: Option<String>,
    },

    /// No sub-account is registered under the given e-mail address.
    CustomerNotFound {
        /// Provider that produced the error.
        provider: String,
        /// E-mail address that was searched.
        email: String,
    },

    /// A request parameter is invalid (e.g., a domain name without a dot).
    InvalidParameter {
        /// Provider that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },
}

/// Coarse classification of a [`ProviderError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// Network failure or timeout.
    Transport,
    /// Unparseable body or missing envelope/payload field.
    Protocol,
    /// The registrar refused the request.
    Business,
    /// Rejected locally before sending.
    Validation,
}

impl ProviderError {
    /// Classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NetworkError { .. } | Self::Timeout { .. } => ErrorKind::Transport,
            Self::ParseError { .. } | Self::ProtocolError { .. } => ErrorKind::Protocol,
            Self::BusinessError { .. }
            | Self::NotInAccount { .. }
            | Self::CustomerNotFound { .. } => ErrorKind::Business,
            Self::InvalidParameter { .. } => ErrorKind::Validation,
        }
    }

    /// 是否为预期行为（用户输入、注册商拒绝等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::BusinessError { .. }
                | Self::NotInAccount { .. }
                | Self::CustomerNotFound { .. }
                | Self::InvalidParameter { .. }
        )
    }

    /// Messages suitable for showing to an operator.
    ///
    /// Only business errors carry registrar-supplied text; every other kind yields an empty list.
    pub fn user_messages(&self) -> Vec<String> {
        match self {
            Self::BusinessError { messages, .. } => messages.clone(),
            Self::NotInAccount {
                domain,
                raw_message,
                ..
            } => vec![
                raw_message
                    .clone()
                    .unwrap_or_else(|| format!("Domain '{domain}' is not in this account")),
            ],
            Self::CustomerNotFound { email, .. } => {
                vec![format!("No customer account found for {email}")]
            }
            _ => Vec::new(),
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::ProtocolError { provider, detail } => {
                write!(f, "[{provider}] Unexpected response: {detail}")
            }
            Self::BusinessError { provider, messages } => {
                if messages.is_empty() {
                    write!(f, "[{provider}] Registrar reported an error")
                } else {
                    write!(f, "[{provider}] {}", messages.join("; "))
                }
            }
            Self::NotInAccount {
                provider,
                domain,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Domain '{domain}' is not in this account: {msg}")
                } else {
                    write!(f, "[{provider}] Domain '{domain}' is not in this account")
                }
            }
            Self::CustomerNotFound { provider, email } => {
                write!(f, "[{provider}] No customer found for '{email}'")
            }
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => {
                write!(f, "[{provider}] Invalid parameter '{param}': {detail}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = ProviderError::NetworkError {
            provider: "enom".to_string(),
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "[enom] Network error: connection refused");
    }

    #[test]
    fn display_timeout() {
        let e = ProviderError::Timeout {
            provider: "enom".to_string(),
            detail: "30s elapsed".to_string(),
        };
        assert_eq!(e.to_string(), "[enom] Request timeout: 30s elapsed");
    }

    #[test]
    fn display_protocol_error() {
        let e = ProviderError::ProtocolError {
            provider: "enom".to_string(),
            detail: "missing field 'ErrCount'".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "[enom] Unexpected response: missing field 'ErrCount'"
        );
    }

    #[test]
    fn display_business_error_joins_messages() {
        let e = ProviderError::BusinessError {
            provider: "enom".to_string(),
            messages: vec!["Domain name not available".to_string(), "Try again".to_string()],
        };
        assert_eq!(e.to_string(), "[enom] Domain name not available; Try again");
    }

    #[test]
    fn display_business_error_without_messages() {
        let e = ProviderError::BusinessError {
            provider: "enom".to_string(),
            messages: vec![],
        };
        assert_eq!(e.to_string(), "[enom] Registrar reported an error");
    }

    #[test]
    fn display_not_in_account_with_message() {
        let e = ProviderError::NotInAccount {
            provider: "enom".to_string(),
            domain: "example.com".to_string(),
            raw_message: Some("Domain not in account".to_string()),
        };
        assert_eq!(
            e.to_string(),
            "[enom] Domain 'example.com' is not in this account: Domain not in account"
        );
    }

    #[test]
    fn display_invalid_parameter() {
        let e = ProviderError::InvalidParameter {
            provider: "enom".to_string(),
            param: "domain".to_string(),
            detail: "must contain a dot".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "[enom] Invalid parameter 'domain': must contain a dot"
        );
    }

    #[test]
    fn kind_classification() {
        let p = || "enom".to_string();
        assert_eq!(
            ProviderError::Timeout { provider: p(), detail: String::new() }.kind(),
            ErrorKind::Transport
        );
        assert_eq!(
            ProviderError::ParseError { provider: p(), detail: String::new() }.kind(),
            ErrorKind::Protocol
        );
        assert_eq!(
            ProviderError::NotInAccount { provider: p(), domain: String::new(), raw_message: None }
                .kind(),
            ErrorKind::Business
        );
        assert_eq!(
            ProviderError::InvalidParameter {
                provider: p(),
                param: String::new(),
                detail: String::new()
            }
            .kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn is_expected_for_business_and_validation() {
        let business = ProviderError::BusinessError {
            provider: "enom".to_string(),
            messages: vec!["x".to_string()],
        };
        let network = ProviderError::NetworkError {
            provider: "enom".to_string(),
            detail: "x".to_string(),
        };
        assert!(business.is_expected());
        assert!(!network.is_expected());
    }

    #[test]
    fn user_messages_only_for_business() {
        let business = ProviderError::BusinessError {
            provider: "enom".to_string(),
            messages: vec!["Invalid auth code".to_string()],
        };
        let protocol = ProviderError::ProtocolError {
            provider: "enom".to_string(),
            detail: "missing GetDomainInfo".to_string(),
        };
        assert_eq!(business.user_messages(), vec!["Invalid auth code".to_string()]);
        assert!(protocol.user_messages().is_empty());
    }

    #[test]
    fn serializes_with_code_tag() {
        let e = ProviderError::BusinessError {
            provider: "enom".to_string(),
            messages: vec!["nope".to_string()],
        };
        let Ok(json) = serde_json::to_value(&e) else {
            return;
        };
        assert_eq!(json["code"], "BusinessError");
        assert_eq!(json["messages"][0], "nope");
    }

    #[test]
    fn validation_codes_are_closed() {
        let ok = serde_json::from_str::<ProviderError>(
            r#"{"code":"InvalidParameter","provider":"enom","param":"domain","detail":"x"}"#,
        );
        assert!(matches!(ok, Ok(ProviderError::InvalidParameter { .. })));
        let unknown = serde_json::from_str::<ProviderError>(
            r#"{"code":"SerializationError","provider":"enom","detail":"x"}"#,
        );
        assert!(unknown.is_err());
    }
}
