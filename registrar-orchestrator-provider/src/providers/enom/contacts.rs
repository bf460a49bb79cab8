//! Contact projection into eNom's role-prefixed parameters.

use crate::types::{ContactRecord, ContactRole, ContactSet};

use super::commands::Params;

const DEFAULT_JOB_TITLE: &str = "N/A";

fn role_prefix(role: ContactRole) -> &'static str {
    match role {
        ContactRole::Registrant => "Registrant",
        ContactRole::Administrative => "Admin",
        ContactRole::Technical => "Tech",
        ContactRole::Billing => "AuxBilling",
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Projects all four roles, registrant first.
pub(crate) fn project_contacts(contacts: &ContactSet) -> Params {
    let mut params = Params::new();
    for role in ContactRole::ALL {
        project_contact(&mut params, role, contacts.get(role));
    }
    params
}

/// `<Prefix>FirstName`, `<Prefix>LastName`, ... for one role.
///
/// Organization and job title are only sent for company contacts; the registrant's
/// fax falls back to the phone number.
pub(crate) fn project_contact(params: &mut Params, role: ContactRole, contact: &ContactRecord) {
    let prefix = role_prefix(role);
    let mut put = |field: &str, value: &str| {
        params.push((format!("{prefix}{field}"), value.to_string()));
    };

    put("FirstName", &contact.first_name);
    put("LastName", &contact.last_name);
    put("Address1", &contact.address1);
    put("Address2", contact.address2.as_deref().unwrap_or_default());
    put("City", &contact.city);
    put("StateProvince", &contact.state);
    put("PostalCode", &contact.postal_code);
    put("Country", &contact.country);
    put("EmailAddress", &contact.email);
    let phone = contact.phone.to_wire();
    put("Phone", &phone);

    if let Some(organization) = non_empty(contact.organization.as_ref()) {
        put("Organization", organization);
        put(
            "JobTitle",
            non_empty(contact.job_title.as_ref()).unwrap_or(DEFAULT_JOB_TITLE),
        );

        if role == ContactRole::Registrant {
            let fax = contact
                .fax
                .as_ref()
                .filter(|f| !f.country_code.is_empty() && !f.national_number.is_empty())
                .map_or_else(|| phone.clone(), |f| f.to_wire());
            put("Fax", &fax);
        }
    }
}
