use sha2::{Digest, Sha256};
use std::collections::HashMap;

const FALLBACK_SLUG: &str = "facility";

/// Lower-case ASCII slug with Czech diacritics folded and single `-`
/// separators.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_separator = false;

    for c in value.chars().flat_map(char::to_lowercase) {
        let c = fold_diacritic(c);
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Slug of `name`, salted with a short digest of `salt_url` when given.
pub fn facility_id(name: &str, salt_url: Option<&str>) -> String {
    let mut slug = slugify(name);
    if slug.is_empty() {
        slug = FALLBACK_SLUG.to_string();
    }

    match salt_url.map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => {
            let digest = hex::encode(Sha256::digest(url.as_bytes()));
            format!("{slug}-{}", &digest[..8])
        }
        None => slug,
    }
}

/// Hands out ids unique within one adapter run. Repeats get `-2`, `-3`, …
/// in encounter order.
#[derive(Debug, Default)]
pub struct IdentityAssigner {
    seen: HashMap<String, usize>,
}

impl IdentityAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, name: &str, salt_url: Option<&str>) -> String {
        let base = facility_id(name, salt_url);
        let mut candidate = base.clone();
        loop {
            let count = self.seen.entry(candidate.clone()).or_insert(0);
            *count += 1;
            if *count == 1 {
                return candidate;
            }
            candidate = format!("{base}-{count}");
        }
    }
}

fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ą' => 'a',
        'č' | 'ć' | 'ç' => 'c',
        'ď' => 'd',
        'é' | 'ě' | 'è' | 'ê' | 'ë' | 'ę' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ľ' | 'ĺ' | 'ł' => 'l',
        'ň' | 'ń' => 'n',
        'ó' | 'ò' | 'ô' | 'ö' | 'ő' => 'o',
        'ř' | 'ŕ' => 'r',
        'š' | 'ś' => 's',
        'ť' => 't',
        'ú' | 'ů' | 'ù' | 'û' | 'ü' | 'ű' => 'u',
        'ý' | 'ÿ' => 'y',
        'ž' | 'ź' | 'ż' => 'z',
        other => other,
    }
}
