use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Classifier categories. Each maps to one tag in either `properties` or
/// `amenities` and to one boolean flag on [`FacilityRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Indoor,
    Outdoor,
    Parking,
    Showers,
    EquipmentRental,
    Restaurant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagBucket {
    Property,
    Amenity,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Attribute::Indoor,
        Attribute::Outdoor,
        Attribute::Parking,
        Attribute::Showers,
        Attribute::EquipmentRental,
        Attribute::Restaurant,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Attribute::Indoor => "indoor",
            Attribute::Outdoor => "outdoor",
            Attribute::Parking => "parking",
            Attribute::Showers => "showers",
            Attribute::EquipmentRental => "equipment_rental",
            Attribute::Restaurant => "restaurant",
        }
    }

    pub fn bucket(self) -> TagBucket {
        match self {
            Attribute::Indoor | Attribute::Outdoor | Attribute::Parking => TagBucket::Property,
            Attribute::Showers | Attribute::EquipmentRental | Attribute::Restaurant => {
                TagBucket::Amenity
            }
        }
    }

    pub fn from_tag(tag: &str) -> Option<Attribute> {
        Attribute::ALL.into_iter().find(|attr| attr.tag() == tag)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub opening_hours: String,
    pub sports: BTreeSet<String>,
    pub amenities: BTreeSet<String>,
    pub properties: BTreeSet<String>,
    pub is_indoor: bool,
    pub is_outdoor: bool,
    pub has_parking: bool,
    pub has_showers: bool,
    pub has_equipment_rental: bool,
    pub has_restaurant: bool,
    pub accepts_fitness_tokens: bool,
    pub images: Vec<String>,
    pub source: String,
    pub source_url: String,
}

impl FacilityRecord {
    pub fn stub(source: &str, name: &str, source_url: &str, country: &str) -> Self {
        Self {
            name: name.to_string(),
            source: source.to_string(),
            source_url: source_url.to_string(),
            country: country.to_string(),
            ..Self::default()
        }
    }

    /// Adds the attribute's tag and raises the matching flag.
    pub fn mark(&mut self, attr: Attribute) {
        match attr.bucket() {
            TagBucket::Property => self.properties.insert(attr.tag().to_string()),
            TagBucket::Amenity => self.amenities.insert(attr.tag().to_string()),
        };
        *self.flag_mut(attr) = true;
    }

    pub fn has(&self, attr: Attribute) -> bool {
        match attr {
            Attribute::Indoor => self.is_indoor,
            Attribute::Outdoor => self.is_outdoor,
            Attribute::Parking => self.has_parking,
            Attribute::Showers => self.has_showers,
            Attribute::EquipmentRental => self.has_equipment_rental,
            Attribute::Restaurant => self.has_restaurant,
        }
    }

    pub fn has_tag(&self, attr: Attribute) -> bool {
        match attr.bucket() {
            TagBucket::Property => self.properties.contains(attr.tag()),
            TagBucket::Amenity => self.amenities.contains(attr.tag()),
        }
    }

    pub fn flags_consistent(&self) -> bool {
        Attribute::ALL
            .into_iter()
            .all(|attr| self.has(attr) == self.has_tag(attr))
    }

    /// Re-derives every flag from the tag sets.
    pub fn sync_flags(&mut self) {
        for attr in Attribute::ALL {
            let tagged = self.has_tag(attr);
            *self.flag_mut(attr) = tagged;
        }
    }

    pub fn push_image(&mut self, url: String) {
        if !url.is_empty() && !self.images.contains(&url) {
            self.images.push(url);
        }
    }

    /// Sets `field` only when `value` is non-empty.
    pub fn fill(field: &mut String, value: &str) {
        let value = value.trim();
        if !value.is_empty() {
            *field = value.to_string();
        }
    }

    fn flag_mut(&mut self, attr: Attribute) -> &mut bool {
        match attr {
            Attribute::Indoor => &mut self.is_indoor,
            Attribute::Outdoor => &mut self.is_outdoor,
            Attribute::Parking => &mut self.has_parking,
            Attribute::Showers => &mut self.has_showers,
            Attribute::EquipmentRental => &mut self.has_equipment_rental,
            Attribute::Restaurant => &mut self.has_restaurant,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogMetadata {
    pub count: usize,
    pub timestamp: f64,
    pub date: String,
}

/// Built only by [`crate::catalog::CatalogBuilder`] or read back from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    facilities: Vec<FacilityRecord>,
    metadata: CatalogMetadata,
}

impl Catalog {
    pub(crate) fn from_records(
        facilities: Vec<FacilityRecord>,
        timestamp: f64,
        date: String,
    ) -> Self {
        let metadata = CatalogMetadata {
            count: facilities.len(),
            timestamp,
            date,
        };
        Self {
            facilities,
            metadata,
        }
    }

    pub fn facilities(&self) -> &[FacilityRecord] {
        &self.facilities
    }

    pub fn metadata(&self) -> &CatalogMetadata {
        &self.metadata
    }

    pub fn into_facilities(self) -> Vec<FacilityRecord> {
        self.facilities
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdapterReport {
    pub source_key: String,
    pub listing_pages: usize,
    pub listing_failures: usize,
    pub detail_pages: usize,
    pub detail_failures: usize,
    pub records: usize,
}
