//! eNom 响应解码
//!
//! Decoders run after classification succeeded, so required top-level blocks are
//! present. Anything below them is optional and defaults instead of failing.

use std::collections::BTreeMap;

use chrono::FixedOffset;

use crate::document::{Document, Node};
use crate::types::{
    CustomField, DomainContacts, DomainInfo, FieldOption, RemoteContact, RemoteDomainSnapshot,
    RoleContactIds,
};
use crate::utils::datetime::{parse_registrar_date, parse_timestamp_text};

/// `InAccount` flag of a `GetDomainStatus` response. `1` means held by this account.
pub(crate) fn in_account(doc: &Document) -> Option<&str> {
    doc.value("DomainStatus/InAccount")
}

/// Domain details from a `GetDomainInfo` response.
pub(crate) fn domain_info(doc: &Document, fallback_name: &str, offset: FixedOffset) -> DomainInfo {
    let info = doc.at("GetDomainInfo");
    let domain_name = info
        .and_then(|n| n.value("domainname"))
        .filter(|n| !n.is_empty())
        .unwrap_or(fallback_name)
        .to_string();
    let expires_on = info
        .and_then(|n| n.value("status/expiration"))
        .and_then(|raw| parse_registrar_date(raw, offset));

    DomainInfo {
        domain_name,
        expires_on,
        locked: None,
        nameservers: info.map(info_nameservers).unwrap_or_default(),
    }
}

/// `dns` entries under any `services/entry/configuration`.
fn info_nameservers(info: &Node) -> Vec<String> {
    let Some(services) = info.child("services") else {
        return Vec::new();
    };
    services
        .children_named("entry")
        .filter_map(|entry| entry.child("configuration"))
        .flat_map(|config| config.values("dns"))
        .map(str::to_string)
        .collect()
}

/// `reg-lock` of a `GetRegLock` response.
pub(crate) fn reg_lock(doc: &Document) -> Option<bool> {
    match doc.value("reg-lock")? {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}

/// Repeated `dns` elements of a `GetDNS` response.
pub(crate) fn nameservers(doc: &Document) -> Vec<String> {
    doc.values("dns").into_iter().map(str::to_string).collect()
}

/// Reconciliation snapshot.
///
/// Fields are read from the `GetDomainInfo` block when there is one, otherwise from the
/// root. Returns `None` when no nameserver count is reported.
pub(crate) fn snapshot(doc: &Document, domain: &str) -> Option<RemoteDomainSnapshot> {
    let scope = doc.at("GetDomainInfo").unwrap_or_else(|| doc.root());
    let count: usize = scope.value("noOfNameServers")?.parse().ok()?;

    let nameservers = (1..=count.min(scope.children().len()))
        .filter_map(|i| scope.value(&format!("ns{i}")))
        .filter(|ns| !ns.is_empty())
        .map(str::to_string)
        .collect();

    let contact_id = |role: &str| {
        scope
            .value(&format!("{role}/contactid"))
            .filter(|id| !id.is_empty())
            .unwrap_or("0")
            .to_string()
    };

    Some(RemoteDomainSnapshot {
        domain: domain.to_string(),
        order_id: scope.value("orderid").unwrap_or_default().to_string(),
        nameservers,
        order_statuses: scope
            .values("orderstatus")
            .into_iter()
            .map(str::to_string)
            .collect(),
        contact_ids: RoleContactIds {
            registrant: contact_id("registrantcontact"),
            admin: contact_id("admincontact"),
            billing: contact_id("billingcontact"),
            tech: contact_id("techcontact"),
        },
        created_at: scope.value("creationtime").and_then(parse_timestamp_text),
        expires_at: scope.value("endtime").and_then(parse_timestamp_text),
    })
}

/// Registration attributes from `GetExtAttributes`.
///
/// Attributes with options become selects, the rest free text. Labels are
/// translation keys of the form `enom_<Name>`.
pub(crate) fn ext_attributes(doc: &Document) -> Vec<CustomField> {
    doc.all_at("Attributes/Attribute")
        .into_iter()
        .filter_map(|attr| {
            let name = attr.value("Name").filter(|n| !n.is_empty())?;
            let label_key = format!("enom_{name}");
            let options: Vec<FieldOption> = attr
                .all_at("Options/Option")
                .into_iter()
                .filter_map(|opt| {
                    Some(FieldOption {
                        value: opt.value("Value")?.to_string(),
                        label: opt.value("Title").unwrap_or_default().to_string(),
                    })
                })
                .collect();
            Some(if options.is_empty() {
                CustomField::text(name, label_key)
            } else {
                CustomField::select(name, label_key, options)
            })
        })
        .collect()
}

/// A contact block as raw fields; the id is taken from `ContactID` when present.
pub(crate) fn remote_contact(node: &Node) -> RemoteContact {
    let fields: BTreeMap<String, String> = node
        .children()
        .iter()
        .filter(|c| c.children().is_empty())
        .map(|c| (c.name().to_string(), c.text().to_string()))
        .collect();
    RemoteContact {
        contact_id: node
            .value("ContactID")
            .filter(|id| !id.is_empty())
            .map(str::to_string),
        fields,
    }
}

/// Per-role contacts of a `GetContacts` response. Missing roles are `None`.
pub(crate) fn domain_contacts(doc: &Document) -> DomainContacts {
    let scope = doc.at("GetContacts").unwrap_or_else(|| doc.root());
    DomainContacts {
        registrant: scope.child("Registrant").map(remote_contact),
        administrative: scope.child("Admin").map(remote_contact),
        technical: scope.child("Tech").map(remote_contact),
        billing: scope.child("AuxBilling").map(remote_contact),
    }
}

/// New sub-account id: `NewAccount/Account`, falling back to a top-level `Account`.
pub(crate) fn new_account_id(doc: &Document) -> Option<String> {
    doc.value("NewAccount/Account")
        .or_else(|| doc.value("Account"))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// First sub-account listed by `GetSubAccounts`.
pub(crate) fn sub_account_id(doc: &Document) -> Option<String> {
    doc.value("SubAccounts/SubAccount/Account")
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

pub(crate) fn contact_id(doc: &Document) -> Option<String> {
    doc.value("ContactID")
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Offset, Utc};

    fn doc(xml: &str) -> Document {
        let Ok(doc) = Document::parse(xml) else {
            panic!("fixture must parse: {xml}");
        };
        doc
    }

    #[test]
    fn domain_info_reads_expiry_and_nameservers() {
        let d = doc(r"<interface-response>
            <GetDomainInfo>
              <domainname>example.com</domainname>
              <status><expiration>3/15/2026 1:02:03 PM</expiration></status>
              <services>
                <entry name='wpps'><service>1120</service></entry>
                <entry name='dnsserver'><configuration>
                  <dns>ns1.example.net</dns><dns>ns2.example.net</dns>
                </configuration></entry>
              </services>
            </GetDomainInfo>
            <ErrCount>0</ErrCount>
          </interface-response>");
        let info = domain_info(&d, "fallback.com", Utc.fix());
        assert_eq!(info.domain_name, "example.com");
        assert_eq!(info.expires_on, NaiveDate::from_ymd_opt(2026, 3, 15));
        assert_eq!(info.nameservers, vec!["ns1.example.net", "ns2.example.net"]);
    }

    #[test]
    fn domain_info_tolerates_missing_details() {
        let d = doc("<interface-response><GetDomainInfo/><ErrCount>0</ErrCount></interface-response>");
        let info = domain_info(&d, "example.org", Utc.fix());
        assert_eq!(info.domain_name, "example.org");
        assert_eq!(info.expires_on, None);
        assert!(info.nameservers.is_empty());
    }

    #[test]
    fn reg_lock_values() {
        assert_eq!(reg_lock(&doc("<r><reg-lock>1</reg-lock></r>")), Some(true));
        assert_eq!(reg_lock(&doc("<r><reg-lock>0</reg-lock></r>")), Some(false));
        assert_eq!(reg_lock(&doc("<r><ErrCount>0</ErrCount></r>")), None);
    }

    #[test]
    fn snapshot_defaults_missing_contacts_to_zero() {
        let d = doc(r"<interface-response>
            <noOfNameServers>2</noOfNameServers>
            <ns1>ns1.host.net</ns1><ns2>ns2.host.net</ns2>
            <orderstatus>transferlock</orderstatus>
            <orderid>5551</orderid>
            <registrantcontact><contactid>77</contactid></registrantcontact>
            <creationtime>1609459200</creationtime>
            <endtime>1704067200</endtime>
            <ErrCount>0</ErrCount>
          </interface-response>");
        let Some(snap) = snapshot(&d, "example.com") else {
            panic!("nameserver count is present");
        };
        assert_eq!(snap.nameservers, vec!["ns1.host.net", "ns2.host.net"]);
        assert_eq!(snap.order_statuses, vec!["transferlock"]);
        assert_eq!(snap.contact_ids.registrant, "77");
        assert_eq!(snap.contact_ids.admin, "0");
        assert_eq!(snap.contact_ids.tech, "0");
        assert_eq!(snap.order_id, "5551");
        assert!(snap.expires_at.is_some());
    }

    #[test]
    fn snapshot_requires_nameserver_count() {
        let d = doc("<interface-response><ns1>a</ns1><ErrCount>0</ErrCount></interface-response>");
        assert!(snapshot(&d, "example.com").is_none());
    }

    #[test]
    fn snapshot_bounds_nameserver_count_by_document() {
        let d = doc(r"<interface-response>
            <noOfNameServers>18446744073709551615</noOfNameServers>
            <ns1>a.net</ns1>
            <ErrCount>0</ErrCount>
          </interface-response>");
        let Some(snap) = snapshot(&d, "example.com") else {
            panic!("nameserver count is present");
        };
        assert_eq!(snap.nameservers, vec!["a.net"]);
    }

    #[test]
    fn ext_attributes_build_selects_and_text_fields() {
        let d = doc(r"<interface-response>
            <Attributes>
              <Attribute>
                <Name>asia_cclocality</Name>
                <Options>
                  <Option><Value>SG</Value><Title>Singapore</Title></Option>
                  <Option><Value>JP</Value><Title>Japan</Title></Option>
                </Options>
              </Attribute>
              <Attribute><Name>asia_ident_number</Name></Attribute>
            </Attributes>
            <ErrCount>0</ErrCount>
          </interface-response>");
        let fields = ext_attributes(&d);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].label_key, "enom_asia_cclocality");
        let crate::types::FieldKind::Select { options } = &fields[0].kind else {
            panic!("first attribute has options");
        };
        assert_eq!(options[1].value, "JP");
        assert_eq!(options[1].label, "Japan");
        assert_eq!(fields[1].kind, crate::types::FieldKind::Text);
    }

    #[test]
    fn new_account_id_falls_back_to_top_level() {
        let nested = doc("<r><NewAccount><Account>A-1</Account></NewAccount></r>");
        let flat = doc("<r><Account>A-2</Account></r>");
        let none = doc("<r><ErrCount>0</ErrCount></r>");
        assert_eq!(new_account_id(&nested).as_deref(), Some("A-1"));
        assert_eq!(new_account_id(&flat).as_deref(), Some("A-2"));
        assert_eq!(new_account_id(&none), None);
    }

    #[test]
    fn contacts_per_role() {
        let d = doc(r"<interface-response>
            <GetContacts>
              <Registrant><RegistrantFirstName>Ada</RegistrantFirstName></Registrant>
              <AuxBilling><AuxBillingFirstName>Charles</AuxBillingFirstName></AuxBilling>
            </GetContacts>
            <ErrCount>0</ErrCount>
          </interface-response>");
        let contacts = domain_contacts(&d);
        let Some(registrant) = contacts.registrant else {
            panic!("registrant block is present");
        };
        assert_eq!(
            registrant.fields.get("RegistrantFirstName").map(String::as_str),
            Some("Ada")
        );
        assert!(contacts.administrative.is_none());
        assert!(contacts.billing.is_some());
    }
}
