//! eNom 响应分类
//!
//! Every response goes through [`EnomProvider::classify`]:
//! 1. envelope fields missing ⇒ protocol error
//! 2. `ErrCount` > 0 or a non-empty `errors` element ⇒ business error
//! 3. payload fields missing ⇒ protocol error
//! 4. otherwise success
//!
//! Transport failures never reach this point.

use crate::document::Document;
use crate::error::{ProviderError, Result};
use crate::traits::ProviderErrorMapper;

use super::EnomProvider;

impl ProviderErrorMapper for EnomProvider {
    fn provider_name(&self) -> &'static str {
        "enom"
    }
}

/// Fields a response must carry, split by when their absence is checked.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResponseShape {
    /// Present on every well-formed response, success or not.
    pub envelope: &'static [&'static str],
    /// Present only once the command succeeded.
    pub payload: &'static [&'static str],
}

impl ResponseShape {
    /// Plain commands: only the error count is required.
    pub const STANDARD: Self = Self {
        envelope: &["ErrCount"],
        payload: &[],
    };

    /// `GetDomainStatus`: the status block is the envelope.
    pub const DOMAIN_STATUS: Self = Self {
        envelope: &["DomainStatus"],
        payload: &[],
    };

    pub const DOMAIN_INFO: Self = Self {
        envelope: &["ErrCount"],
        payload: &["GetDomainInfo"],
    };

    pub const AVAILABILITY: Self = Self {
        envelope: &["ErrCount"],
        payload: &["RRPText"],
    };

    pub const fn with_payload(payload: &'static [&'static str]) -> Self {
        Self {
            envelope: &["ErrCount"],
            payload,
        }
    }
}

impl EnomProvider {
    /// Classifies a parsed response against the fields its command requires.
    pub(crate) fn classify(&self, doc: &Document, shape: ResponseShape) -> Result<()> {
        if let Some(missing) = shape.envelope.iter().find(|f| !doc.has(f)) {
            return Err(self.protocol_error(format!("missing field '{missing}'")));
        }

        let err_count = match doc.value("ErrCount") {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| self.protocol_error(format!("non-numeric ErrCount '{raw}'")))?,
            None => 0,
        };

        let mut messages = error_messages(doc);
        if err_count > 0 || !messages.is_empty() {
            if messages.is_empty() {
                messages = response_strings(doc);
            }
            if messages.is_empty() {
                messages.push(format!("The registrar reported {err_count} error(s)"));
            }
            return Err(self.business_error(messages));
        }

        if let Some(missing) = shape.payload.iter().find(|f| !doc.has(f)) {
            return Err(self.protocol_error(format!("missing field '{missing}'")));
        }

        Ok(())
    }
}

/// Texts of the children of `<errors>`, e.g. `<Err1>`, `<Err2>`.
pub(crate) fn error_messages(doc: &Document) -> Vec<String> {
    doc.at("errors")
        .map(|errors| {
            errors
                .children()
                .iter()
                .map(|e| e.text().to_string())
                .filter(|t| !t.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Texts of `responses/response/ResponseString`, in order.
pub(crate) fn response_strings(doc: &Document) -> Vec<String> {
    doc.at("responses")
        .map(|responses| {
            responses
                .children_named("response")
                .filter_map(|r| r.value("ResponseString"))
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
