//! Splitting of raw page text into typed record fields.

use crate::model::FacilityRecord;
use crate::regions::RegionTable;
use regex::Regex;
use std::sync::LazyLock;

static POSTAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{3}\s?\d{2})\s*(.*)").expect("postal code pattern"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressParts {
    pub street: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
}

/// Splits `"Ostrovní 15, 110 00 Praha 1"` style addresses.
///
/// Only the last comma-separated segment is scanned for a postal code. When
/// it has one, the rest of that segment is the city, or the previous segment
/// if nothing follows the code. Without a postal code the last segment is the
/// city. A lone segment without a postal code is treated as a street.
pub fn split_address(address: &str) -> AddressParts {
    let segments: Vec<&str> = address
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect();

    let Some((last, head)) = segments.split_last() else {
        return AddressParts::default();
    };

    let mut parts = AddressParts::default();
    if let Some(caps) = POSTAL_CODE.captures(last) {
        parts.postal_code = caps
            .get(1)
            .map(|m| normalize_whitespace(m.as_str()))
            .unwrap_or_default();
        let rest = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
        if rest.is_empty() {
            if let Some((city, street)) = head.split_last() {
                parts.city = (*city).to_string();
                parts.street = street.join(", ");
            }
        } else {
            parts.city = rest.to_string();
            parts.street = head.join(", ");
        }
    } else if head.is_empty() {
        parts.street = (*last).to_string();
    } else {
        parts.city = (*last).to_string();
        parts.street = head.join(", ");
    }

    parts
}

/// [`split_address`] plus region inference from the address text.
pub fn split_address_in(address: &str, regions: &RegionTable) -> AddressParts {
    let mut parts = split_address(address);
    parts.region = regions
        .infer(address, &parts.city)
        .unwrap_or_default()
        .to_string();
    parts
}

/// Copies address parts onto the record, keeping the raw address text and
/// any region already set from a locator.
pub fn apply_address(record: &mut FacilityRecord, address: &str, parts: AddressParts) {
    FacilityRecord::fill(&mut record.address, address);
    FacilityRecord::fill(&mut record.city, &parts.city);
    FacilityRecord::fill(&mut record.postal_code, &parts.postal_code);
    if record.region.is_empty() {
        record.region = parts.region;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Phone,
    Email,
    Website,
}

/// `Telefon: …` / `E-mail: …` / `Web: …` label-value pairs.
pub fn contact_from_label(label: &str, value: &str) -> Option<(ContactField, String)> {
    let label = label.to_lowercase();
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let field = if label.contains("telefon") {
        ContactField::Phone
    } else if label.contains("email") || label.contains("e-mail") {
        ContactField::Email
    } else if label.contains("web") {
        ContactField::Website
    } else {
        return None;
    };
    Some((field, value.to_string()))
}

/// `tel:` / `mailto:` links and plain web links.
pub fn contact_from_href(href: &str) -> Option<(ContactField, String)> {
    let href = href.trim();
    if let Some(phone) = href.strip_prefix("tel:") {
        return non_empty(phone).map(|v| (ContactField::Phone, v));
    }
    if let Some(email) = href.strip_prefix("mailto:") {
        return non_empty(email).map(|v| (ContactField::Email, v));
    }
    if href.contains("www") || href.contains("http") {
        return Some((ContactField::Website, href.to_string()));
    }
    None
}

/// Unlabelled contact lines such as `Tel: 777 123 456`.
pub fn contact_from_text(text: &str) -> Option<(ContactField, String)> {
    let text = text.trim();
    if text.contains("Tel:") {
        return non_empty(&text.replace("Tel:", "")).map(|v| (ContactField::Phone, v));
    }
    if text.contains('@') {
        return Some((ContactField::Email, text.to_string()));
    }
    if text.contains("www.") || text.contains("http") {
        return Some((ContactField::Website, text.to_string()));
    }
    None
}

pub fn apply_contact(record: &mut FacilityRecord, contact: Option<(ContactField, String)>) {
    let Some((field, value)) = contact else {
        return;
    };
    let slot = match field {
        ContactField::Phone => &mut record.phone,
        ContactField::Email => &mut record.email,
        ContactField::Website => &mut record.website,
    };
    FacilityRecord::fill(slot, &value);
}

pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
