//! Small helpers over `scraper` used by the site adapters.

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Compile a selector written as a literal. Invalid selectors match
/// nothing, the same way lookups behave on absent markup.
fn compile(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Inner text of the first element matching `css`, whitespace
/// collapsed. `None` when nothing matches or the text is empty.
pub fn first_text(doc: &Html, css: &str) -> Option<String> {
    let selector = compile(css)?;
    doc.select(&selector)
        .map(|element| element_text(&element))
        .find(|text| !text.is_empty())
}

/// Inner texts of every element matching `css`, empty ones dropped.
pub fn all_text(doc: &Html, css: &str) -> Vec<String> {
    let Some(selector) = compile(css) else {
        return Vec::new();
    };
    doc.select(&selector)
        .map(|element| element_text(&element))
        .filter(|text| !text.is_empty())
        .collect()
}

/// Every element matching `css`, in document order.
pub fn select_all<'a>(doc: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match compile(css) {
        Some(selector) => doc.select(&selector).collect(),
        None => Vec::new(),
    }
}

/// Attribute value of the first element matching `css`.
pub fn first_attr(doc: &Html, css: &str, attr: &str) -> Option<String> {
    let selector = compile(css)?;
    doc.select(&selector)
        .find_map(|element| element.value().attr(attr))
        .map(|value| value.trim().to_string())
}

/// First matching descendant's text within `scope`.
pub fn child_text(scope: ElementRef<'_>, css: &str) -> Option<String> {
    let selector = compile(css)?;
    scope
        .select(&selector)
        .map(|element| element_text(&element))
        .find(|text| !text.is_empty())
}

/// First matching descendant's attribute within `scope`.
pub fn child_attr(scope: ElementRef<'_>, css: &str, attr: &str) -> Option<String> {
    let selector = compile(css)?;
    scope
        .select(&selector)
        .find_map(|element| element.value().attr(attr))
        .map(|value| value.trim().to_string())
}

pub fn element_text(element: &ElementRef<'_>) -> String {
    let joined: String = element.text().collect();
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolve `href` against the page it came from. Absolute hrefs pass
/// through; anything unresolvable is dropped by the caller.
pub fn absolutize(base: &str, href: &str) -> Option<String> {
    match Url::parse(href) {
        Ok(url) => Some(url.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(base).ok()?;
            base.join(href).ok().map(|url| url.to_string())
        }
        Err(_) => None,
    }
}
