//! Keyword heuristics for facility attributes and sport codes.

use crate::model::{Attribute, FacilityRecord};
use crate::sports::SportTable;
use std::collections::{BTreeMap, BTreeSet};

/// Ordered `(attribute, keywords)` pairs. Keywords are stored lower-cased.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    categories: Vec<(Attribute, Vec<String>)>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        let raw: [(Attribute, &[&str]); 6] = [
            (Attribute::Indoor, &["vnitřní", "kryt", "hala", "indoor"]),
            (
                Attribute::Outdoor,
                &["venkovní", "nekryt", "outdoor", "outside"],
            ),
            (Attribute::Parking, &["parkoviště", "parkování", "parking"]),
            (Attribute::Showers, &["sprch", "šatn", "shower"]),
            (
                Attribute::EquipmentRental,
                &[
                    "půjčovna",
                    "výpůjčka",
                    "zapůjčení",
                    "vybavení",
                    "výbava",
                    "rental",
                ],
            ),
            (
                Attribute::Restaurant,
                &["občerstven", "bar", "restaurace", "bufet", "café"],
            ),
        ];

        Self {
            categories: raw
                .into_iter()
                .map(|(attr, words)| (attr, words.iter().map(|w| w.to_string()).collect()))
                .collect(),
        }
    }
}

impl KeywordTable {
    /// Default table with extra keywords appended per attribute.
    pub fn with_extra(extra: &BTreeMap<Attribute, Vec<String>>) -> Self {
        let mut table = Self::default();
        for (attr, words) in &mut table.categories {
            if let Some(more) = extra.get(attr) {
                words.extend(
                    more.iter()
                        .map(|w| w.trim().to_lowercase())
                        .filter(|w| !w.is_empty()),
                );
            }
        }
        table
    }

    pub fn keywords(&self, attr: Attribute) -> &[String] {
        self.categories
            .iter()
            .find(|(a, _)| *a == attr)
            .map(|(_, words)| words.as_slice())
            .unwrap_or_default()
    }

    /// Every attribute with at least one keyword present in any of `texts`.
    pub fn classify<S: AsRef<str>>(&self, texts: &[S]) -> BTreeSet<Attribute> {
        let lowered: Vec<String> = texts.iter().map(|t| t.as_ref().to_lowercase()).collect();
        self.categories
            .iter()
            .filter(|(_, words)| {
                lowered
                    .iter()
                    .any(|text| words.iter().any(|word| text.contains(word.as_str())))
            })
            .map(|(attr, _)| *attr)
            .collect()
    }

    /// Marks every matched attribute on the record. Existing tags are kept.
    pub fn apply<S: AsRef<str>>(&self, record: &mut FacilityRecord, texts: &[S]) {
        for attr in self.classify(texts) {
            record.mark(attr);
        }
    }
}

/// Sport code for a source category key, falling back to the first table
/// keyword found in `text`.
pub fn infer_sport<'a>(
    sports: &'a SportTable,
    category: Option<&str>,
    text: &str,
) -> Option<&'a str> {
    category
        .and_then(|key| sports.lookup_key(key))
        .or_else(|| sports.find_in_text(text))
        .map(|entry| entry.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covered_courts_with_parking_and_showers() {
        let table = KeywordTable::default();
        let mut record = FacilityRecord::default();
        table.apply(&mut record, &["Kryté kurty s parkovištěm a sprchami"]);

        assert!(record.properties.contains("indoor"));
        assert!(record.properties.contains("parking"));
        assert!(record.amenities.contains("showers"));
        assert!(record.is_indoor && record.has_parking && record.has_showers);
        assert!(!record.is_outdoor);
        assert!(record.flags_consistent());
    }

    #[test]
    fn classify_is_repeatable() {
        let table = KeywordTable::default();
        let text = ["Venkovní hřiště, bufet a půjčovna raket"];
        let first = table.classify(&text);
        let second = table.classify(&text);
        assert_eq!(first, second);
        assert_eq!(
            first,
            BTreeSet::from([
                Attribute::Outdoor,
                Attribute::EquipmentRental,
                Attribute::Restaurant
            ])
        );
    }

    #[test]
    fn categories_match_independently_across_texts() {
        let table = KeywordTable::default();
        let found = table.classify(&["Sportovní hala", "venkovní kurty", "PARKING zdarma"]);
        assert!(found.contains(&Attribute::Indoor));
        assert!(found.contains(&Attribute::Outdoor));
        assert!(found.contains(&Attribute::Parking));
        assert!(table.classify::<&str>(&[]).is_empty());
    }

    #[test]
    fn extra_keywords_extend_defaults() {
        let extra = BTreeMap::from([(Attribute::Parking, vec!["  Garáž ".to_string()])]);
        let table = KeywordTable::with_extra(&extra);
        assert!(table.keywords(Attribute::Parking).contains(&"garáž".to_string()));
        assert!(table.classify(&["podzemní garáže"]).contains(&Attribute::Parking));
    }

    #[test]
    fn sport_key_lookup_precedes_text_scan() {
        let sports = SportTable::default();
        assert_eq!(infer_sport(&sports, Some("squash"), "tenisové kurty"), Some("SQU"));
        assert_eq!(infer_sport(&sports, Some("sauna"), "tenisové kurty"), Some("TEN"));
        assert_eq!(infer_sport(&sports, None, "wellness"), None);
    }
}
