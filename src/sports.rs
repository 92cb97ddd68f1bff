//! Sport keyword table.
//!
//! Entries are ordered; free-text resolution takes the first keyword that
//! occurs in the text, so `tenis` shadows `stolní tenis` and `volejbal`
//! shadows `plážový volejbal`.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SportMapping {
    pub keyword: &'static str,
    pub name: &'static str,
    pub code: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    /// URL keys the directory sites use for this sport.
    pub aliases: &'static [&'static str],
}

#[derive(Debug, Clone)]
pub struct SportTable {
    entries: Vec<SportMapping>,
}

const DEFAULT_SPORTS: &[SportMapping] = &[
    SportMapping {
        keyword: "tenis",
        name: "Tenis",
        code: "TEN",
        icon: "tennis",
        color: "#4caf50",
        aliases: &[],
    },
    SportMapping {
        keyword: "badminton",
        name: "Badminton",
        code: "BAD",
        icon: "badminton",
        color: "#8bc34a",
        aliases: &[],
    },
    SportMapping {
        keyword: "squash",
        name: "Squash",
        code: "SQU",
        icon: "squash",
        color: "#cddc39",
        aliases: &[],
    },
    SportMapping {
        keyword: "padel",
        name: "Padel",
        code: "PAD",
        icon: "padel",
        color: "#ffeb3b",
        aliases: &[],
    },
    SportMapping {
        keyword: "stolní tenis",
        name: "Stolní tenis",
        code: "TTP",
        icon: "table-tennis",
        color: "#ffc107",
        aliases: &["stolni-tenis"],
    },
    SportMapping {
        keyword: "volejbal",
        name: "Volejbal",
        code: "VOL",
        icon: "volleyball",
        color: "#ff9800",
        aliases: &[],
    },
    SportMapping {
        keyword: "fotbal",
        name: "Fotbal",
        code: "FOO",
        icon: "football",
        color: "#ff5722",
        aliases: &[],
    },
    SportMapping {
        keyword: "basketbal",
        name: "Basketbal",
        code: "BAS",
        icon: "basketball",
        color: "#795548",
        aliases: &[],
    },
    SportMapping {
        keyword: "plavání",
        name: "Plavání",
        code: "SWI",
        icon: "swimming",
        color: "#2196f3",
        aliases: &["plavani", "bazen"],
    },
    SportMapping {
        keyword: "hokej",
        name: "Hokej",
        code: "ICE",
        icon: "ice-hockey",
        color: "#9c27b0",
        aliases: &[],
    },
    SportMapping {
        keyword: "golf",
        name: "Golf",
        code: "GOL",
        icon: "golf",
        color: "#3f51b5",
        aliases: &[],
    },
    SportMapping {
        keyword: "fitness",
        name: "Fitness",
        code: "FIT",
        icon: "fitness",
        color: "#673ab7",
        aliases: &[],
    },
    SportMapping {
        keyword: "atletika",
        name: "Atletika",
        code: "ATH",
        icon: "athletics",
        color: "#e91e63",
        aliases: &[],
    },
    SportMapping {
        keyword: "plážový volejbal",
        name: "Plážový volejbal",
        code: "BVO",
        icon: "beach-volleyball",
        color: "#ff6d00",
        aliases: &["plazovy-volejbal"],
    },
    SportMapping {
        keyword: "bowling",
        name: "Bowling",
        code: "BOW",
        icon: "bowling",
        color: "#607d8b",
        aliases: &[],
    },
];

impl Default for SportTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_SPORTS.to_vec(),
        }
    }
}

impl SportTable {
    pub fn entries(&self) -> &[SportMapping] {
        &self.entries
    }

    /// Exact lookup of a source category key against keywords and aliases.
    pub fn lookup_key(&self, key: &str) -> Option<&SportMapping> {
        let key = key.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|entry| entry.keyword == key || entry.aliases.iter().any(|alias| *alias == key))
    }

    /// First entry, in table order, whose keyword occurs in `text`.
    pub fn find_in_text(&self, text: &str) -> Option<&SportMapping> {
        let text = text.to_lowercase();
        self.entries
            .iter()
            .find(|entry| text.contains(entry.keyword))
    }

    pub fn by_code(&self, code: &str) -> Option<&SportMapping> {
        self.entries.iter().find(|entry| entry.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_key_accepts_url_aliases() {
        let table = SportTable::default();
        assert_eq!(table.lookup_key("bazen").map(|s| s.code), Some("SWI"));
        assert_eq!(table.lookup_key("stolni-tenis").map(|s| s.code), Some("TTP"));
        assert_eq!(table.lookup_key("Tenis").map(|s| s.code), Some("TEN"));
        assert!(table.lookup_key("sauna").is_none());
    }

    #[test]
    fn text_scan_takes_first_entry_in_table_order() {
        let table = SportTable::default();
        let hit = table.find_in_text("Herna pro stolní tenis a šipky");
        assert_eq!(hit.map(|s| s.code), Some("TEN"));
        assert!(table.find_in_text("lezecká stěna").is_none());
    }

    #[test]
    fn codes_are_three_uppercase_letters() {
        let table = SportTable::default();
        for entry in table.entries() {
            assert_eq!(entry.code.len(), 3);
            assert!(entry.code.chars().all(|c| c.is_ascii_uppercase()));
            assert_eq!(table.by_code(entry.code), Some(entry));
        }
    }
}
