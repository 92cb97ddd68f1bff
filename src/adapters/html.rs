//! Selector helpers shared by the adapters. A selector that matches nothing
//! yields an empty value rather than an error.

use crate::extract::normalize_whitespace;
use scraper::{ElementRef, Selector};
use url::Url;

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

pub fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

pub fn select_first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let parsed = selector(css)?;
    scope.select(&parsed).next()
}

pub fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match selector(css) {
        Some(parsed) => scope.select(&parsed).collect(),
        None => Vec::new(),
    }
}

/// Text of the first match, empty when nothing matches.
pub fn first_text(scope: ElementRef<'_>, css: &str) -> String {
    select_first(scope, css)
        .map(element_text)
        .unwrap_or_default()
}

pub fn all_texts(scope: ElementRef<'_>, css: &str) -> Vec<String> {
    select_all(scope, css)
        .into_iter()
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect()
}

pub fn first_attr(scope: ElementRef<'_>, css: &str, attr: &str) -> Option<String> {
    select_first(scope, css)
        .and_then(|el| el.value().attr(attr))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

pub fn all_attrs(scope: ElementRef<'_>, css: &str, attr: &str) -> Vec<String> {
    select_all(scope, css)
        .into_iter()
        .filter_map(|el| el.value().attr(attr))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
        .collect()
}

pub fn absolutize_url(base_url: &str, value: &str) -> String {
    if value.starts_with("http://") || value.starts_with("https://") {
        return value.to_string();
    }

    if let Ok(base) = Url::parse(base_url)
        && let Ok(joined) = base.join(value)
    {
        return joined.to_string();
    }

    value.to_string()
}
