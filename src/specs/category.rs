// src/specs/category.rs
// Category listing pages: discover product slugs from `/products/<slug>` links.

use std::collections::HashSet;

use scraper::Html;
use url::Url;

use crate::config::consts::BASE_URL;
use crate::core::html;

pub fn page_url(slug: &str, page: u32) -> String {
    if page <= 1 {
        format!("{BASE_URL}/categories/{slug}")
    } else {
        format!("{BASE_URL}/categories/{slug}?page={page}")
    }
}

/// Product slug of `href` if it points at a product on the site host.
/// Relative hrefs resolve against `BASE_URL`.
pub fn product_slug(href: &str) -> Option<String> {
    let base = Url::parse(BASE_URL).ok()?;
    let url = base.join(href.trim()).ok()?;
    if url.host_str() != base.host_str() {
        return None;
    }
    let mut segs = url.path_segments()?;
    if segs.next()? != "products" {
        return None;
    }
    segs.next()
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Product slugs linked from a category page, first-seen order, no repeats.
pub fn parse_product_slugs(html_doc: &str) -> Vec<String> {
    let doc = Html::parse_document(html_doc);
    let mut seen = HashSet::new();
    html::anchor_hrefs(&doc)
        .iter()
        .filter_map(|h| product_slug(h))
        .filter(|slug| seen.insert(slug.clone()))
        .collect()
}
