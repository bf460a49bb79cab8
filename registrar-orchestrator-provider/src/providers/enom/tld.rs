//! 按顶级域名区分的策略
//!
//! Some registries use their own contact schema, and some extensions need extra
//! attributes or a dedicated submission path. The variants here are the closed set
//! of extensions with such behavior.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::providers::common::final_label;
use crate::types::{CustomField, DomainName, DomainRequest, FieldOption, OperationPayload};

use super::EnomProvider;
use super::commands::Params;

/// Extensions whose registries use a dedicated contact type.
const CONTACT_TYPE_TLDS: [&str; 11] = [
    "at", "ca", "cn", "co", "coop", "de", "es", "eu", "ni", "ru", "uk",
];

/// Contact type token for `domain`: `UkContact` for `example.uk`, `Contact` otherwise.
pub fn contact_type(domain: &str) -> String {
    let label = final_label(domain);
    if !CONTACT_TYPE_TLDS.contains(&label.as_str()) {
        return "Contact".to_string();
    }
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => format!("{}{}Contact", first.to_ascii_uppercase(), chars.as_str()),
        None => "Contact".to_string(),
    }
}

/// Which lifecycle operations an [`ExtensionHandler`] takes over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandlerCapabilities {
    pub custom_registration: bool,
    pub custom_renewal: bool,
    pub custom_transfer: bool,
}

/// Extension-specific behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionHandler {
    /// `.asia`: `CED` eligibility contact attributes.
    Asia,
}

impl ExtensionHandler {
    /// Handler for the final label of `domain`, if it has one.
    pub fn for_domain(domain: &str) -> Option<Self> {
        match final_label(domain).as_str() {
            "asia" => Some(Self::Asia),
            _ => None,
        }
    }

    /// Registry extension used when querying attributes.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Asia => "asia",
        }
    }

    pub fn capabilities(self) -> HandlerCapabilities {
        match self {
            Self::Asia => HandlerCapabilities::default(),
        }
    }

    /// Extra fields the host collects for each contact.
    pub fn contact_fields(self) -> Vec<CustomField> {
        match self {
            Self::Asia => vec![
                CustomField::select("ced_country", "enom_ced_country", options(ASIA_LOCALITIES)),
                CustomField::select(
                    "ced_entity_type",
                    "enom_ced_entity_type",
                    options(ASIA_ENTITY_TYPES),
                ),
                CustomField::select("ced_id_type", "enom_ced_id_type", options(ASIA_ID_TYPES)),
                CustomField::text("ced_id", "enom_ced_id"),
            ],
        }
    }

    /// Projects collected contact fields onto the registrar's attribute pairs.
    ///
    /// Missing values are sent empty; the registry reports what it rejects.
    pub fn contact_params(self, values: &BTreeMap<String, String>) -> Vec<(String, String)> {
        match self {
            Self::Asia => {
                let mut params = Params::new();
                for (i, (attribute, field)) in ASIA_CONTACT_ATTRIBUTES.iter().enumerate() {
                    let n = i + 1;
                    params.push((format!("attr-name{n}"), (*attribute).to_string()));
                    params.push((
                        format!("attr-value{n}"),
                        values.get(*field).cloned().unwrap_or_default(),
                    ));
                }
                params
            }
        }
    }

    /// Domain-level fields, fetched from the registrar's attribute listing.
    pub async fn registration_fields(self, provider: &EnomProvider) -> Result<Vec<CustomField>> {
        provider.extension_attributes(self.extension()).await
    }

    /// Domain-level field values as registration parameters.
    pub fn registration_params(
        self,
        values: &BTreeMap<String, String>,
    ) -> BTreeMap<String, String> {
        match self {
            Self::Asia => values.clone(),
        }
    }

    pub(crate) async fn register(
        self,
        provider: &EnomProvider,
        domain: &DomainName,
        request: &DomainRequest,
        contacts: &Params,
        extra: &BTreeMap<String, String>,
    ) -> Result<OperationPayload> {
        match self {
            Self::Asia => provider.purchase(domain, request, contacts, extra).await,
        }
    }

    pub(crate) async fn renew(
        self,
        provider: &EnomProvider,
        domain: &DomainName,
        request: &DomainRequest,
        extra: &BTreeMap<String, String>,
    ) -> Result<OperationPayload> {
        match self {
            Self::Asia => provider.extend(domain, request, extra).await,
        }
    }

    pub(crate) async fn transfer(
        self,
        provider: &EnomProvider,
        domain: &DomainName,
        auth_code: &str,
        contacts: &Params,
        extra: &BTreeMap<String, String>,
    ) -> Result<OperationPayload> {
        match self {
            Self::Asia => {
                provider
                    .transfer_order(domain, auth_code, contacts, extra)
                    .await
            }
        }
    }
}

/// Per-domain policy, resolved on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TldPolicy {
    pub contact_type: String,
    pub handler: Option<ExtensionHandler>,
}

impl TldPolicy {
    pub fn resolve(domain: &str) -> Self {
        Self {
            contact_type: contact_type(domain),
            handler: ExtensionHandler::for_domain(domain),
        }
    }

    pub fn capabilities(&self) -> HandlerCapabilities {
        self.handler
            .map(ExtensionHandler::capabilities)
            .unwrap_or_default()
    }

    /// Custom field values as sent with the registration, renewal or transfer.
    pub fn registration_params(
        &self,
        values: &BTreeMap<String, String>,
    ) -> BTreeMap<String, String> {
        match self.handler {
            Some(handler) => handler.registration_params(values),
            None => values.clone(),
        }
    }
}

fn options(pairs: &[(&str, &str)]) -> Vec<FieldOption> {
    pairs
        .iter()
        .map(|(value, label)| FieldOption {
            value: (*value).to_string(),
            label: (*label).to_string(),
        })
        .collect()
}

/// (registry attribute, contact field)
const ASIA_CONTACT_ATTRIBUTES: [(&str, &str); 4] = [
    ("locality", "ced_country"),
    ("legalentitytype", "ced_entity_type"),
    ("identform", "ced_id_type"),
    ("identnumber", "ced_id"),
];

const ASIA_ENTITY_TYPES: &[(&str, &str)] = &[
    ("naturalPerson", "Natural Person"),
    ("corporation", "Corporation"),
    ("cooperative", "Cooperative"),
    ("partnership", "Partnership"),
    ("government", "Government"),
    ("politicalParty", "Political Party"),
    ("society", "Society"),
    ("institute", "Institute"),
];

const ASIA_ID_TYPES: &[(&str, &str)] = &[
    ("passport", "Passport"),
    ("certificate", "Certificate"),
    ("legislation", "Legislation"),
    ("societyRegistration", "Society Registration"),
    ("politicalPartyRegistration", "Political Party Registration"),
];

/// Localities eligible for `.asia` registration.
const ASIA_LOCALITIES: &[(&str, &str)] = &[
    ("AF", "Afghanistan"),
    ("AQ", "Antarctica"),
    ("AM", "Armenia"),
    ("AU", "Australia"),
    ("AZ", "Azerbaijan"),
    ("BH", "Bahrain"),
    ("BD", "Bangladesh"),
    ("BT", "Bhutan"),
    ("BN", "Brunei Darussalam"),
    ("KH", "Cambodia"),
    ("CN", "China"),
    ("CX", "Christmas Island"),
    ("CC", "Cocos (Keeling) Islands"),
    ("CK", "Cook Islands"),
    ("CY", "Cyprus"),
    ("FJ", "Fiji"),
    ("GE", "Georgia"),
    ("HM", "Heard and McDonald Islands"),
    ("HK", "Hong Kong"),
    ("IN", "India"),
    ("ID", "Indonesia"),
    ("IR", "Iran"),
    ("IQ", "Iraq"),
    ("IL", "Israel"),
    ("JP", "Japan"),
    ("JO", "Jordan"),
    ("KZ", "Kazakhstan"),
    ("KI", "Kiribati"),
    ("KR", "Korea, Republic of"),
    ("KP", "Korea, Democratic People's Republic of"),
    ("KW", "Kuwait"),
    ("KG", "Kyrgyzstan"),
    ("LA", "Lao People's Democratic Republic"),
    ("LB", "Lebanon"),
    ("MO", "Macau"),
    ("MY", "Malaysia"),
    ("MV", "Maldives"),
    ("MH", "Marshall Islands"),
    ("FM", "Micronesia"),
    ("MN", "Mongolia"),
    ("MM", "Myanmar"),
    ("NR", "Nauru"),
    ("NP", "Nepal"),
    ("NZ", "New Zealand"),
    ("NU", "Niue"),
    ("NF", "Norfolk Island"),
    ("OM", "Oman"),
    ("PK", "Pakistan"),
    ("PW", "Palau"),
    ("PS", "Palestinian Territory"),
    ("PG", "Papua New Guinea"),
    ("PH", "Philippines"),
    ("QA", "Qatar"),
    ("WS", "Samoa"),
    ("SA", "Saudi Arabia"),
    ("SG", "Singapore"),
    ("SB", "Solomon Islands"),
    ("LK", "Sri Lanka"),
    ("SY", "Syrian Arab Republic"),
    ("TW", "Taiwan"),
    ("TJ", "Tajikistan"),
    ("TH", "Thailand"),
    ("TL", "Timor-Leste"),
    ("TK", "Tokelau"),
    ("TO", "Tonga"),
    ("TR", "Turkey"),
    ("TM", "Turkmenistan"),
    ("TV", "Tuvalu"),
    ("AE", "United Arab Emirates"),
    ("UZ", "Uzbekistan"),
    ("VU", "Vanuatu"),
    ("VN", "Vietnam"),
    ("YE", "Yemen"),
];
