// src/core/html.rs
// DOM helpers over `scraper`. Page-specific knowledge lives in `specs`.

use scraper::{ElementRef, Html, Selector};

pub const LD_JSON_SELECTOR: &str = r#"script[type="application/ld+json"]"#;

fn selector(css: &str) -> Selector {
    // Only called with the crate's own constant selectors.
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e}"))
}

/// Text of one `<script>`: its text content, or the inner HTML when the
/// text content is blank. Trimmed either way.
pub fn script_text(el: ElementRef<'_>) -> String {
    let text = el.text().collect::<String>();
    let text = text.trim();
    if !text.is_empty() {
        return s!(text);
    }
    el.inner_html().trim().to_string()
}

/// Every linked-data script body in document order.
pub fn ld_json_scripts(doc: &Html) -> Vec<String> {
    let sel = selector(LD_JSON_SELECTOR);
    doc.select(&sel).map(script_text).collect()
}

/// `href` of every anchor, document order, duplicates kept.
pub fn anchor_hrefs(doc: &Html) -> Vec<String> {
    let sel = selector("a[href]");
    doc.select(&sel)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_owned)
        .collect()
}
