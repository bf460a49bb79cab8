use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, ProviderError};

// ============ Registrar Types ============

/// Identifies which registrar implementation to use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RegistrarType {
    /// eNom reseller API.
    Enom,
}

impl std::fmt::Display for RegistrarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Enom => write!(f, "enom"),
        }
    }
}

// ============ Domain Types ============

/// A domain name split at its first dot.
///
/// `sub.example.co.uk` becomes `sub` + `example.co.uk`; the registrar API addresses
/// domains as second-level label plus everything after it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DomainName {
    /// Label before the first dot, lowercased.
    pub sld: String,
    /// Everything after the first dot, lowercased.
    pub tld: String,
}

impl std::fmt::Display for DomainName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.sld, self.tld)
    }
}

// ============ Contact Types ============

/// A phone number already split into country calling code and national number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    /// Country calling code without `+`, e.g. `44`.
    pub country_code: String,
    /// National significant number, digits only.
    pub national_number: String,
}

impl PhoneNumber {
    pub fn new(country_code: impl Into<String>, national_number: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            national_number: national_number.into(),
        }
    }

    /// Registrar wire format: `+<country code>.<national number>`.
    pub fn to_wire(&self) -> String {
        format!("+{}.{}", self.country_code, self.national_number)
    }
}

/// One person or organization attached to a domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub first_name: String,
    pub last_name: String,
    /// Company name. When present, organization fields are sent as well.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// Job title, only meaningful alongside an organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    pub address1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    /// Not sent to the registrar, whose contact schema has two address lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address3: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
    pub email: String,
    pub phone: PhoneNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax: Option<PhoneNumber>,
}

/// The four roles a contact can play on a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactRole {
    Registrant,
    Administrative,
    Technical,
    Billing,
}

impl ContactRole {
    /// All roles, in the order the registrar expects them.
    pub const ALL: [Self; 4] = [
        Self::Registrant,
        Self::Administrative,
        Self::Technical,
        Self::Billing,
    ];
}

/// Registrant, administrative, technical and billing contacts of a domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSet {
    pub registrant: ContactRecord,
    pub administrative: ContactRecord,
    pub technical: ContactRecord,
    pub billing: ContactRecord,
}

impl ContactSet {
    /// Uses the same record for every role.
    pub fn uniform(contact: ContactRecord) -> Self {
        Self {
            registrant: contact.clone(),
            administrative: contact.clone(),
            technical: contact.clone(),
            billing: contact,
        }
    }

    /// The record for a role.
    pub fn get(&self, role: ContactRole) -> &ContactRecord {
        match role {
            ContactRole::Registrant => &self.registrant,
            ContactRole::Administrative => &self.administrative,
            ContactRole::Technical => &self.technical,
            ContactRole::Billing => &self.billing,
        }
    }
}

// ============ Request Types ============

/// Input for register, renew, transfer and contact-update operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRequest {
    /// Fully-qualified domain name.
    pub domain: String,
    /// Registration or renewal period in years.
    #[serde(default = "default_years")]
    pub years: u32,
    /// Nameservers to delegate to, in order.
    #[serde(default)]
    pub nameservers: Vec<String>,
    /// Contacts. Required by register, transfer and contact updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contacts: Option<ContactSet>,
    /// Extension-specific fields collected by the host form layer.
    #[serde(default)]
    pub custom_fields: BTreeMap<String, String>,
    /// Transfer authorization code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_code: Option<String>,
}

fn default_years() -> u32 {
    1
}

impl DomainRequest {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            years: default_years(),
            ..Self::default()
        }
    }
}

/// Replace a domain's delegation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameserverUpdate {
    pub domain: String,
    pub nameservers: Vec<String>,
}

/// Lock or unlock a domain at the registrar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockUpdate {
    pub domain: String,
    pub locked: bool,
}

// ============ Result Types ============

/// Outcome of a lifecycle operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationStatus {
    Success,
    Failure,
}

/// Whether a domain can be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Registered,
    Unknown,
}

impl Availability {
    /// Maps the registrar's availability text. Anything unrecognized is `Unknown`.
    pub fn from_registrar_text(text: &str) -> Self {
        match text {
            "Domain available" => Self::Available,
            "Domain not available" => Self::Registered,
            _ => Self::Unknown,
        }
    }
}

/// Domain details as reported by the registrar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainInfo {
    pub domain_name: String,
    /// Expiry date in the configured timezone.
    pub expires_on: Option<NaiveDate>,
    /// Registrar lock, when the lock query succeeded.
    pub locked: Option<bool>,
    pub nameservers: Vec<String>,
}

/// Operation-specific data carried by a successful [`OperationResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum OperationPayload {
    None,
    DomainInfo(DomainInfo),
    Nameservers(Vec<String>),
    Availability(Availability),
}

/// Uniform result returned by every lifecycle operation.
///
/// Failures never escape as panics or `Err`; they are folded into this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult {
    pub status: OperationStatus,
    /// Message for the operator: a message key on success, an HTML list of
    /// registrar messages on business failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Structured failure, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ProviderError>,
    pub payload: OperationPayload,
}

impl OperationResult {
    pub fn success(payload: OperationPayload) -> Self {
        Self {
            status: OperationStatus::Success,
            message: None,
            error: None,
            payload,
        }
    }

    pub fn success_with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::success(OperationPayload::None)
        }
    }

    pub fn failure(error: ProviderError) -> Self {
        let messages = error.user_messages();
        Self {
            status: OperationStatus::Failure,
            message: (!messages.is_empty()).then(|| render_message_list(&messages)),
            error: Some(error),
            payload: OperationPayload::None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OperationStatus::Success
    }

    /// Failure classification, `None` on success.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(ProviderError::kind)
    }
}

impl From<crate::error::Result<OperationPayload>> for OperationResult {
    fn from(result: crate::error::Result<OperationPayload>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(e) => Self::failure(e),
        }
    }
}

/// Renders messages as an HTML unordered list.
pub fn render_message_list(messages: &[String]) -> String {
    let items: String = messages
        .iter()
        .map(|m| format!("<li>{}</li>", escape_html(m)))
        .collect();
    format!("<ul>{items}</ul>")
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// ============ Sync Snapshot ============

/// Registrar-side contact ids per role. Missing ids are `"0"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleContactIds {
    pub registrant: String,
    pub admin: String,
    pub billing: String,
    pub tech: String,
}

impl Default for RoleContactIds {
    fn default() -> Self {
        Self {
            registrant: "0".to_string(),
            admin: "0".to_string(),
            billing: "0".to_string(),
            tech: "0".to_string(),
        }
    }
}

/// The registrar's view of a domain, as used for reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDomainSnapshot {
    pub domain: String,
    pub order_id: String,
    /// Nameservers in delegation order.
    pub nameservers: Vec<String>,
    /// Raw order status flags, e.g. `transferlock`.
    pub order_statuses: Vec<String>,
    pub contact_ids: RoleContactIds,
    pub created_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

// ============ Customer Types ============

/// A billing-system client, as needed to open a registrar sub-account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfile {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub email: String,
    pub address1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address3: Option<String>,
    pub city: String,
    pub state: String,
    pub postcode: String,
    /// Country display name, resolved through a [`CountryDirectory`](crate::CountryDirectory).
    pub country: String,
    /// Free-form phone number, parsed through a [`PhoneNumberParser`](crate::PhoneNumberParser).
    pub phone: String,
}

/// Identifiers returned when a sub-account is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub customer_id: String,
    pub contact_id: String,
}

/// A contact as stored at the registrar: its id plus raw fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteContact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
    pub fields: BTreeMap<String, String>,
}

/// Contacts currently attached to a domain, per role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainContacts {
    pub registrant: Option<RemoteContact>,
    pub administrative: Option<RemoteContact>,
    pub technical: Option<RemoteContact>,
    pub billing: Option<RemoteContact>,
}

// ============ Form Field Types ============

/// One selectable value of a [`FieldKind::Select`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

/// Input widget of a [`CustomField`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldKind {
    Text,
    Select { options: Vec<FieldOption> },
}

/// An extension-specific form field the host must collect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    /// Key under which the host returns the value.
    pub name: String,
    /// Translation key for the label.
    pub label_key: String,
    pub kind: FieldKind,
}

impl CustomField {
    pub fn select(
        name: impl Into<String>,
        label_key: impl Into<String>,
        options: Vec<FieldOption>,
    ) -> Self {
        Self {
            name: name.into(),
            label_key: label_key.into(),
            kind: FieldKind::Select { options },
        }
    }

    pub fn text(name: impl Into<String>, label_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label_key: label_key.into(),
            kind: FieldKind::Text,
        }
    }
}

// ============ Credential Types ============

/// Validation error for registrar settings.
///
/// Returned when setting fields are missing, empty, or have an invalid format.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required setting is missing entirely.
    MissingField {
        /// Which registrar the error relates to.
        registrar: RegistrarType,
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A setting is present but empty/whitespace-only.
    EmptyField {
        /// Which registrar the error relates to.
        registrar: RegistrarType,
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A setting has an invalid format.
    InvalidFormat {
        /// Which registrar the error relates to.
        registrar: RegistrarType,
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
        /// Description of what's wrong with the format.
        reason: String,
    },
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { label, .. } => write!(f, "Missing required field: {label}"),
            Self::EmptyField { label, .. } => write!(f, "Field must not be empty: {label}"),
            Self::InvalidFormat { label, reason, .. } => write!(f, "{label}: {reason}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// 默认请求超时（秒）
const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the eNom reseller API.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnomConfig {
    /// Reseller login.
    pub uid: String,
    /// Reseller password.
    pub password: String,
    /// Use the test environment instead of live.
    #[serde(default)]
    pub sandbox: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Offset from UTC used when rendering registrar dates.
    #[serde(default)]
    pub utc_offset_seconds: i32,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

impl std::fmt::Debug for EnomConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnomConfig")
            .field("uid", &"***")
            .field("password", &"***")
            .field("sandbox", &self.sandbox)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("utc_offset_seconds", &self.utc_offset_seconds)
            .finish()
    }
}

impl EnomConfig {
    pub const UID_KEY: &'static str = "enom_uid";
    pub const PASSWORD_KEY: &'static str = "enom_password";
    pub const SANDBOX_KEY: &'static str = "enom_enable_sandbox";
    pub const TIMEOUT_KEY: &'static str = "enom_timeout";
    pub const UTC_OFFSET_KEY: &'static str = "enom_utc_offset";

    /// Live-environment config with default timeouts.
    pub fn new(uid: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            password: password.into(),
            sandbox: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            utc_offset_seconds: 0,
        }
    }

    /// Construct settings from the host's flat key-value store.
    ///
    /// `enom_enable_sandbox` is on when set to `1` or `true`. `enom_timeout` and
    /// `enom_utc_offset` are optional.
    pub fn from_settings(map: &HashMap<String, String>) -> Result<Self, CredentialValidationError> {
        let mut config = Self::new(
            get_required_field(map, Self::UID_KEY, "Reseller Login")?,
            get_required_field(map, Self::PASSWORD_KEY, "Reseller Password")?,
        );

        config.sandbox = map
            .get(Self::SANDBOX_KEY)
            .is_some_and(|v| matches!(v.trim(), "1" | "true" | "on" | "yes"));

        if let Some(raw) = map.get(Self::TIMEOUT_KEY).filter(|v| !v.trim().is_empty()) {
            config.timeout_secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| CredentialValidationError::InvalidFormat {
                    registrar: RegistrarType::Enom,
                    field: Self::TIMEOUT_KEY.to_string(),
                    label: "Timeout".to_string(),
                    reason: format!("'{raw}' is not a positive number of seconds"),
                })?;
        }

        if let Some(raw) = map.get(Self::UTC_OFFSET_KEY).filter(|v| !v.trim().is_empty()) {
            config.utc_offset_seconds = raw
                .trim()
                .parse::<i32>()
                .ok()
                .filter(|secs| FixedOffset::east_opt(*secs).is_some())
                .ok_or_else(|| CredentialValidationError::InvalidFormat {
                    registrar: RegistrarType::Enom,
                    field: Self::UTC_OFFSET_KEY.to_string(),
                    label: "UTC Offset".to_string(),
                    reason: format!("'{raw}' is not a valid offset in seconds"),
                })?;
        }

        Ok(config)
    }

    /// Convert settings back to the flat key-value format.
    pub fn to_settings(&self) -> HashMap<String, String> {
        [
            (Self::UID_KEY.to_string(), self.uid.clone()),
            (Self::PASSWORD_KEY.to_string(), self.password.clone()),
            (
                Self::SANDBOX_KEY.to_string(),
                if self.sandbox { "1" } else { "0" }.to_string(),
            ),
            (Self::TIMEOUT_KEY.to_string(), self.timeout_secs.to_string()),
            (
                Self::UTC_OFFSET_KEY.to_string(),
                self.utc_offset_seconds.to_string(),
            ),
        ]
        .into()
    }

    /// The configured timezone, UTC if the offset is out of range.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_seconds).unwrap_or_else(|| Utc.fix())
    }
}

/// Obtain a required field from the settings map and verify that it is not empty
fn get_required_field(
    map: &HashMap<String, String>,
    key: &str,
    label: &str,
) -> Result<String, CredentialValidationError> {
    match map.get(key) {
        None => Err(CredentialValidationError::MissingField {
            registrar: RegistrarType::Enom,
            field: key.to_string(),
            label: label.to_string(),
        }),
        Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
            registrar: RegistrarType::Enom,
            field: key.to_string(),
            label: label.to_string(),
        }),
        Some(v) => Ok(v.clone()),
    }
}

/// Type-safe settings container for all supported registrars.
///
/// Pass this to [`create_provider()`](crate::create_provider) to instantiate a provider.
///
/// # Serialization
///
/// Serialized as a tagged enum with `"provider"` as the tag and `"credentials"` as the content:
///
/// ```json
/// { "provider": "enom", "credentials": { "uid": "...", "password": "..." } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
pub enum RegistrarCredentials {
    /// eNom reseller settings.
    #[serde(rename = "enom")]
    Enom(EnomConfig),
}

impl RegistrarCredentials {
    /// Construct credentials from a flat key-value map, validating required fields.
    pub fn from_map(
        registrar: RegistrarType,
        map: &HashMap<String, String>,
    ) -> Result<Self, CredentialValidationError> {
        match registrar {
            RegistrarType::Enom => EnomConfig::from_settings(map).map(Self::Enom),
        }
    }

    /// Convert credentials to a flat key-value map.
    pub fn to_map(&self) -> HashMap<String, String> {
        match self {
            Self::Enom(config) => config.to_settings(),
        }
    }

    /// Returns the [`RegistrarType`] corresponding to this credential variant.
    pub fn registrar_type(&self) -> RegistrarType {
        match self {
            Self::Enom(_) => RegistrarType::Enom,
        }
    }
}
