//! 客户与联系人开通类型

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A request to make sure a client has a registrar contact usable for `domain`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub client_id: u64,
    /// Domain the contact is for; its extension decides the contact type.
    pub domain: String,
    /// Values of the extension's contact fields, keyed by field name (e.g. `ced_country`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extension_values: BTreeMap<String, String>,
}

/// Registrar-side identifiers after provisioning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionedContact {
    pub customer_id: String,
    pub contact_id: String,
    /// Whether a new sub-account was opened for the client.
    pub created_customer: bool,
}
