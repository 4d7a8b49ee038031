// src/specs/reviews.rs
// Product review pages: linked-data scripts → review records.

use scraper::Html;

use crate::config::consts::BASE_URL;
use crate::config::options::ScriptPick;
use crate::core::html;
use crate::core::json::{JsonBlocks, ScanMode};
use crate::core::review::{extract_reviews, ReviewRecord};
use crate::core::sanitize::normalize;

/// Where a blob of text came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlobOrigin {
    pub url: String,
    /// Zero-based index among the page's linked-data scripts.
    pub script_index: usize,
}

/// Raw script body as pulled off the page, before normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawBlob {
    pub origin: BlobOrigin,
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageReviews {
    pub scripts_found: usize,
    pub blocks_parsed: usize,
    pub records: Vec<ReviewRecord>,
}

/// Review listing URL for `slug`; page 1 has no query.
pub fn page_url(slug: &str, page: u32) -> String {
    if page <= 1 {
        format!("{BASE_URL}/products/{slug}/reviews")
    } else {
        format!("{BASE_URL}/products/{slug}/reviews?page={page}")
    }
}

pub fn script_blobs(url: &str, html_doc: &str) -> Vec<RawBlob> {
    let doc = Html::parse_document(html_doc);
    html::ld_json_scripts(&doc)
        .into_iter()
        .enumerate()
        .map(|(i, text)| RawBlob {
            origin: BlobOrigin { url: s!(url), script_index: i },
            text,
        })
        .collect()
}

/// Normalize, split and extract one blob.
/// Returns (parsed block count, records).
pub fn read_blob(blob: &RawBlob, mode: ScanMode) -> (usize, Vec<ReviewRecord>) {
    let clean = normalize(&blob.text);
    let mut blocks = 0usize;
    let mut records = Vec::new();
    for tree in JsonBlocks::new(&clean, mode) {
        blocks += 1;
        records.extend(extract_reviews(&tree));
    }
    logd!(
        "{} script {}: {} block(s), {} review(s)",
        blob.origin.url, blob.origin.script_index, blocks, records.len()
    );
    (blocks, records)
}

pub fn parse_page(url: &str, html_doc: &str, pick: ScriptPick, mode: ScanMode) -> PageReviews {
    let blobs = script_blobs(url, html_doc);
    let scripts_found = blobs.len();

    let picked: Vec<&RawBlob> = match pick {
        ScriptPick::All => blobs.iter().collect(),
        ScriptPick::Nth(i) => match blobs.get(i) {
            Some(b) => vec![b],
            None => {
                logw!("{url}: script {} not found ({scripts_found} ld+json script(s))", i + 1);
                Vec::new()
            }
        },
    };

    let mut out = PageReviews { scripts_found, ..Default::default() };
    for blob in picked {
        let (blocks, records) = read_blob(blob, mode);
        out.blocks_parsed += blocks;
        out.records.extend(records);
    }
    out
}
