//! Opt-in cross-source merging.
//!
//! The default pipeline keeps one entry per source listing. With merging
//! enabled, records sharing a normalized (name, city) key are folded into the
//! first one seen. Records without a name or a city are never merged.

use crate::identity::slugify;
use crate::model::FacilityRecord;
use std::collections::HashMap;
use tracing::debug;

pub fn merge_key(record: &FacilityRecord) -> (String, String) {
    (slugify(&record.name), slugify(&record.city))
}

pub fn merge_duplicates(records: Vec<FacilityRecord>) -> Vec<FacilityRecord> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut merged: Vec<FacilityRecord> = Vec::with_capacity(records.len());

    for record in records {
        let key = merge_key(&record);
        if key.0.is_empty() || key.1.is_empty() {
            merged.push(record);
            continue;
        }
        match index.get(&key) {
            Some(&pos) => {
                debug!(
                    id = %merged[pos].id,
                    duplicate = %record.id,
                    source = %record.source,
                    "merging duplicate facility"
                );
                absorb(&mut merged[pos], record);
            }
            None => {
                index.insert(key, merged.len());
                merged.push(record);
            }
        }
    }

    merged
}

fn absorb(target: &mut FacilityRecord, other: FacilityRecord) {
    target.sports.extend(other.sports);
    target.amenities.extend(other.amenities);
    target.properties.extend(other.properties);
    target.sync_flags();
    target.accepts_fitness_tokens |= other.accepts_fitness_tokens;

    if other.description.chars().count() > target.description.chars().count() {
        target.description = other.description;
    }

    for (slot, value) in [
        (&mut target.address, other.address),
        (&mut target.city, other.city),
        (&mut target.region, other.region),
        (&mut target.postal_code, other.postal_code),
        (&mut target.phone, other.phone),
        (&mut target.email, other.email),
        (&mut target.website, other.website),
        (&mut target.opening_hours, other.opening_hours),
    ] {
        if slot.is_empty() {
            *slot = value;
        }
    }

    for image in other.images {
        target.push_image(image);
    }
}
