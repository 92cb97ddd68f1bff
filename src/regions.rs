//! Region inference for addresses that carry no explicit region.

#[derive(Debug, Clone)]
pub struct RegionRule {
    pub region: &'static str,
    /// URL slug the directory sites use for this region.
    pub slug: &'static str,
    /// Substrings matched against the whole address.
    pub address_markers: &'static [&'static str],
    /// Substrings matched against the extracted city.
    pub city_markers: &'static [&'static str],
}

#[derive(Debug, Clone)]
pub struct RegionTable {
    rules: Vec<RegionRule>,
}

const DEFAULT_REGIONS: &[RegionRule] = &[
    RegionRule {
        region: "Praha",
        slug: "praha",
        address_markers: &[],
        city_markers: &["Praha"],
    },
    RegionRule {
        region: "Středočeský kraj",
        slug: "stredocesky-kraj",
        address_markers: &["Středočeský", "Stredocesky"],
        city_markers: &["Kladno", "Mladá Boleslav", "Příbram", "Kolín"],
    },
    RegionRule {
        region: "Jihočeský kraj",
        slug: "jihocesky-kraj",
        address_markers: &["Jihočeský", "Jihocesky"],
        city_markers: &["České Budějovice", "Ceske Budejovice", "Tábor"],
    },
    RegionRule {
        region: "Plzeňský kraj",
        slug: "plzensky-kraj",
        address_markers: &["Plzeňský", "Plzensky"],
        city_markers: &["Plzeň", "Plzen"],
    },
    RegionRule {
        region: "Karlovarský kraj",
        slug: "karlovarsky-kraj",
        address_markers: &["Karlovarský", "Karlovarsky"],
        city_markers: &["Karlovy Vary", "Cheb"],
    },
    RegionRule {
        region: "Ústecký kraj",
        slug: "ustecky-kraj",
        address_markers: &["Ústecký", "Ustecky"],
        city_markers: &["Ústí", "Usti"],
    },
    RegionRule {
        region: "Liberecký kraj",
        slug: "liberecky-kraj",
        address_markers: &["Liberecký", "Liberecky"],
        city_markers: &["Liberec"],
    },
    RegionRule {
        region: "Královéhradecký kraj",
        slug: "kralovehradecky-kraj",
        address_markers: &["Královéhradecký", "Kralovehradecky"],
        city_markers: &["Hradec"],
    },
    RegionRule {
        region: "Pardubický kraj",
        slug: "pardubicky-kraj",
        address_markers: &["Pardubický", "Pardubicky"],
        city_markers: &["Pardubice"],
    },
    RegionRule {
        region: "Kraj Vysočina",
        slug: "vysocina",
        address_markers: &["Vysočina", "Vysocina"],
        city_markers: &["Jihlava"],
    },
    RegionRule {
        region: "Jihomoravský kraj",
        slug: "jihomoravsky-kraj",
        address_markers: &["Jihomoravský", "Jihomoravsky"],
        city_markers: &["Brno"],
    },
    RegionRule {
        region: "Olomoucký kraj",
        slug: "olomoucky-kraj",
        address_markers: &["Olomoucký", "Olomoucky"],
        city_markers: &["Olomouc"],
    },
    RegionRule {
        region: "Zlínský kraj",
        slug: "zlinsky-kraj",
        address_markers: &["Zlínský", "Zlinsky"],
        city_markers: &["Zlín", "Zlin"],
    },
    RegionRule {
        region: "Moravskoslezský kraj",
        slug: "moravskoslezsky-kraj",
        address_markers: &["Moravskoslezský", "Moravskoslezsky"],
        city_markers: &["Ostrava"],
    },
];

impl Default for RegionTable {
    fn default() -> Self {
        Self {
            rules: DEFAULT_REGIONS.to_vec(),
        }
    }
}

impl RegionTable {
    pub fn rules(&self) -> &[RegionRule] {
        &self.rules
    }

    pub fn slugs(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.slug)
    }

    pub fn from_slug(&self, slug: &str) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|rule| rule.slug == slug)
            .map(|rule| rule.region)
    }

    /// Prague is decided by the city alone, then region names in the address,
    /// then the largest cities of each region. City markers only ever match
    /// the extracted city, never street names.
    pub fn infer(&self, address: &str, city: &str) -> Option<&'static str> {
        if city.contains("Praha") {
            return Some("Praha");
        }

        if let Some(rule) = self.rules.iter().find(|rule| {
            rule.address_markers
                .iter()
                .any(|marker| address.contains(marker))
        }) {
            return Some(rule.region);
        }

        if city.is_empty() {
            return None;
        }
        self.rules
            .iter()
            .find(|rule| rule.city_markers.iter().any(|marker| city.contains(marker)))
            .map(|rule| rule.region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_name_in_address_beats_city_lookup() {
        let table = RegionTable::default();
        let region = table.infer("Sportovní 3, Kladno, Středočeský kraj", "Brno");
        assert_eq!(region, Some("Středočeský kraj"));
    }

    #[test]
    fn city_fallback_and_unknown() {
        let table = RegionTable::default();
        assert_eq!(table.infer("Lidická 5, 602 00 Brno", "Brno"), Some("Jihomoravský kraj"));
        assert_eq!(table.infer("Ostrovní 15, 110 00 Praha 1", "Praha 1"), Some("Praha"));
        assert_eq!(table.infer("Náves 1, Horní Dolní", "Horní Dolní"), None);
    }

    #[test]
    fn streets_named_after_cities_do_not_pick_a_region() {
        let table = RegionTable::default();
        assert_eq!(table.infer("Plzeňská 10", ""), None);
        assert_eq!(table.infer("Liberecká 3", ""), None);
        assert_eq!(table.infer("Plzeňská 10, Brno", "Brno"), Some("Jihomoravský kraj"));
    }

    #[test]
    fn slugs_map_to_canonical_names() {
        let table = RegionTable::default();
        assert_eq!(table.slugs().count(), 14);
        assert_eq!(table.from_slug("vysocina"), Some("Kraj Vysočina"));
        assert_eq!(table.from_slug("atlantis"), None);
    }
}
