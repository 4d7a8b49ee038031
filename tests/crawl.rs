// tests/crawl.rs
//
// Crawl control against canned pages; no network.
//
use std::collections::HashMap;
use std::sync::Mutex;

use review_scrape::config::options::{ScrapeOptions, ScriptPick, Target};
use review_scrape::core::PageSource;
use review_scrape::progress::Progress;
use review_scrape::scrape::{self, ScrapedReview};
use review_scrape::specs::{category, reviews};
use review_scrape::{Error, Result};

/// URL → body; unknown URLs are 404s. Records every request.
#[derive(Default)]
struct MapSource {
    pages: HashMap<String, String>,
    hits: Mutex<Vec<String>>,
}

impl MapSource {
    fn with(mut self, url: String, body: String) -> Self {
        self.pages.insert(url, body);
        self
    }

    fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

impl PageSource for MapSource {
    fn fetch(&self, url: &str) -> Result<String> {
        self.hits.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Status { url: url.to_string(), code: 404 })
    }
}

#[derive(Default)]
struct Recorder {
    begun: Option<usize>,
    done: Vec<String>,
    failed: Vec<String>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) { self.begun = Some(total); }
    fn item_done(&mut self, _index: usize, label: &str) { self.done.push(label.to_string()); }
    fn item_failed(&mut self, _index: usize, label: &str, _err: &str) { self.failed.push(label.to_string()); }
    fn finish(&mut self) { self.finished = true; }
}

fn review_page(items: &[(&str, f64)]) -> String {
    let reviews: Vec<String> = items
        .iter()
        .map(|(d, r)| format!(
            r#"{{"@type":"Review","description":"{d}","reviewRating":{{"@type":"Rating","ratingValue":{r}}}}}"#
        ))
        .collect();
    format!(
        r#"<html><head>
        <script type="application/ld+json">{{"@type":"BreadcrumbList","itemListElement":[]}}</script>
        <script type="application/ld+json">{{"@type":"Product","name":"X","review":[{}]}}</script>
        </head><body></body></html>"#,
        reviews.join(",")
    )
}

fn category_page(slugs: &[&str]) -> String {
    let links: String = slugs
        .iter()
        .map(|s| format!(r#"<li><a href="/products/{s}">{s}</a></li>"#))
        .collect();
    format!("<html><body><ul>{links}</ul></body></html>")
}

fn opts(target: Target) -> ScrapeOptions {
    ScrapeOptions { target, pause_ms: 0, ..ScrapeOptions::default() }
}

fn descriptions(rows: &[ScrapedReview]) -> Vec<String> {
    rows.iter().filter_map(|r| r.description.clone()).collect()
}

#[test]
fn single_page_reads_every_script() {
    let url = "https://www.itreview.jp/products/p/reviews";
    let src = MapSource::default().with(url.into(), review_page(&[("a", 4.0), ("b", 3.5)]));
    let rows = scrape::collect(&src, &opts(Target::Url(url.into())), None).unwrap();
    assert_eq!(descriptions(&rows), ["a", "b"]);
    assert!(rows.iter().all(|r| r.product == url && r.page == 1));
}

#[test]
fn single_page_second_script_only() {
    let url = "https://www.itreview.jp/products/p/reviews";
    let src = MapSource::default().with(url.into(), review_page(&[("a", 4.0)]));

    let mut o = opts(Target::Url(url.into()));
    o.pick = ScriptPick::Nth(0);
    assert!(scrape::collect(&src, &o, None).unwrap().is_empty());

    o.pick = ScriptPick::Nth(1);
    assert_eq!(scrape::collect(&src, &o, None).unwrap().len(), 1);
}

#[test]
fn product_stops_at_empty_page() {
    let src = MapSource::default()
        .with(reviews::page_url("p", 1), review_page(&[("a", 5.0), ("b", 4.0)]))
        .with(reviews::page_url("p", 2), review_page(&[("c", 3.0)]))
        .with(reviews::page_url("p", 3), review_page(&[]));

    let rows = scrape::collect(&src, &opts(Target::Product("p".into())), None).unwrap();
    assert_eq!(descriptions(&rows), ["a", "b", "c"]);
    assert_eq!(rows[2].page, 2);
    assert_eq!(src.hits().len(), 3);
}

#[test]
fn product_stops_when_last_page_repeats() {
    let last = review_page(&[("z", 1.0)]);
    let src = MapSource::default()
        .with(reviews::page_url("p", 1), review_page(&[("a", 5.0)]))
        .with(reviews::page_url("p", 2), last.clone())
        .with(reviews::page_url("p", 3), last);

    let rows = scrape::collect(&src, &opts(Target::Product("p".into())), None).unwrap();
    assert_eq!(descriptions(&rows), ["a", "z"]);
}

#[test]
fn product_404_after_first_page_ends_listing() {
    let src = MapSource::default()
        .with(reviews::page_url("p", 1), review_page(&[("a", 5.0)]));
    let rows = scrape::collect(&src, &opts(Target::Product("p".into())), None).unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn product_404_on_first_page_is_error() {
    let src = MapSource::default();
    let err = scrape::collect(&src, &opts(Target::Product("nope".into())), None).unwrap_err();
    assert!(matches!(err, Error::Status { code: 404, .. }));
}

#[test]
fn product_respects_max_pages() {
    let mut src = MapSource::default();
    for n in 1..=5 {
        src = src.with(reviews::page_url("p", n), review_page(&[("r", n as f64)]));
    }
    let mut o = opts(Target::Product("p".into()));
    o.max_pages = 2;
    let rows = scrape::collect(&src, &o, None).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(src.hits().len(), 2);
}

#[test]
fn category_crawl_keeps_discovery_order_and_skips_failures() {
    let mut src = MapSource::default()
        .with(category::page_url("ocr", 1), category_page(&["p1", "p2", "broken"]))
        .with(category::page_url("ocr", 2), category_page(&["p3", "p1"]))
        .with(category::page_url("ocr", 3), category_page(&["p2"]));
    for (slug, d) in [("p1", "one"), ("p2", "two"), ("p3", "three")] {
        src = src.with(reviews::page_url(slug, 1), review_page(&[(d, 4.0)]));
    }

    let mut rec = Recorder::default();
    let rows = scrape::collect(&src, &opts(Target::Category("ocr".into())), Some(&mut rec as &mut dyn Progress)).unwrap();

    assert_eq!(descriptions(&rows), ["one", "two", "three"]);
    assert_eq!(rows[0].product, "p1");
    assert_eq!(rec.begun, Some(4));
    assert_eq!(rec.done.len(), 3);
    assert_eq!(rec.failed, ["broken"]);
    assert!(rec.finished);
    // page 3 added nothing new, so page 4 was never requested
    assert!(!src.hits().contains(&category::page_url("ocr", 4)));
}

#[test]
fn empty_category_yields_nothing() {
    let src = MapSource::default()
        .with(category::page_url("none", 1), category_page(&[]));
    let rows = scrape::collect(&src, &opts(Target::Category("none".into())), None).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn dedup_drops_repeats_across_pages() {
    let src = MapSource::default()
        .with(reviews::page_url("p", 1), review_page(&[("a", 5.0), ("b", 4.0)]))
        .with(reviews::page_url("p", 2), review_page(&[("a", 5.0), ("c", 4.0)]));

    let mut o = opts(Target::Product("p".into()));
    assert_eq!(scrape::collect(&src, &o, None).unwrap().len(), 4);

    o.dedup = true;
    let rows = scrape::collect(&src, &o, None).unwrap();
    assert_eq!(descriptions(&rows), ["a", "b", "c"]);
}

#[test]
fn empty_targets_are_rejected() {
    let src = MapSource::default();
    for t in [Target::Url(" ".into()), Target::Product("".into()), Target::Category("".into())] {
        let err = scrape::collect(&src, &opts(t), None).unwrap_err();
        assert!(matches!(err, Error::InvalidTarget(_)));
    }
    assert!(src.hits().is_empty());
}
