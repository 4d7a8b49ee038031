// src/scrape/scrape.rs
use std::{
    collections::HashSet, thread, time::Duration,
    sync::{ mpsc, atomic::{ AtomicUsize, Ordering }}
};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    config::consts::{ WORKERS, JITTER_MS },
    config::options::{ ScrapeOptions, Target },
    core::{ net::PageSource, review::ReviewRecord },
    error::{ Error, Result },
    progress::Progress,
    specs::{ category, reviews },
};

/// One review row as exported: the linked-data record plus where it was found.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrapedReview {
    pub product: String,
    pub page: u32,
    #[serde(rename = "ratingValue")]
    pub rating_value: Option<Value>,
    pub description: Option<String>,
}

impl ScrapedReview {
    pub fn new(product: &str, page: u32, record: ReviewRecord) -> Self {
        Self {
            product: s!(product),
            page,
            rating_value: record.rating_value,
            description: record.description,
        }
    }

    pub fn record(&self) -> ReviewRecord {
        ReviewRecord {
            rating_value: self.rating_value.clone(),
            description: self.description.clone(),
        }
    }
}

/// Sleep before a request: base pause plus a deterministic jitter below `JITTER_MS`.
fn polite_pause(opts: &ScrapeOptions, seed: u64) {
    if opts.pause_ms == 0 {
        return;
    }
    let jitter = seed % JITTER_MS.max(1);
    thread::sleep(Duration::from_millis(opts.pause_ms + jitter));
}

/// A 404 past the first page means the listing ran out.
fn is_past_end(err: &Error, page: u32) -> bool {
    page > 1 && matches!(err, Error::Status { code: 404, .. })
}

/// Drop exact repeats of (product, rating, description), keeping the first.
/// Ratings compare by JSON value, so `"4"` and `4` differ.
pub fn dedup_reviews(rows: &mut Vec<ScrapedReview>) {
    let mut seen = HashSet::new();
    rows.retain(|r| {
        let rating = r.rating_value.as_ref().map(Value::to_string);
        let key = (r.product.clone(), rating, r.description.clone());
        seen.insert(key)
    });
}

/// Dispatch on `opts.target`.
pub fn collect<S: PageSource>(
    source: &S,
    opts: &ScrapeOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<Vec<ScrapedReview>> {
    let mut rows = match &opts.target {
        Target::Url(url) => collect_page(source, url, opts)?,
        Target::Product(slug) => collect_product(source, slug, opts, progress)?,
        Target::Category(slug) => collect_category(source, slug, opts, progress)?,
    };
    if opts.dedup {
        let before = rows.len();
        dedup_reviews(&mut rows);
        logf!("dedup: {} -> {} review(s)", before, rows.len());
    }
    Ok(rows)
}

/// Single page, single pass.
pub fn collect_page<S: PageSource>(
    source: &S,
    url: &str,
    opts: &ScrapeOptions,
) -> Result<Vec<ScrapedReview>> {
    if url.trim().is_empty() {
        return Err(Error::InvalidTarget(s!("empty URL")));
    }
    let html_doc = source.fetch(url)?;
    let page = reviews::parse_page(url, &html_doc, opts.pick, opts.scan);
    logf!(
        "{url}: {} ld+json script(s), {} block(s), {} review(s)",
        page.scripts_found, page.blocks_parsed, page.records.len()
    );
    Ok(page.records
        .into_iter()
        .map(|r| ScrapedReview::new(url, 1, r))
        .collect())
}

/// Walk review pages 1, 2, … of one product.
///
/// Stops at the first page with no reviews, at a page repeating the previous
/// page's reviews (the site re-serves its last page), at a 404 past page 1,
/// or after `opts.max_pages`.
pub fn collect_product<S: PageSource>(
    source: &S,
    slug: &str,
    opts: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<ScrapedReview>> {
    if slug.trim().is_empty() {
        return Err(Error::InvalidTarget(s!("empty product slug")));
    }

    let mut out = Vec::new();
    let mut prev: Option<Vec<ReviewRecord>> = None;

    for page in 1..=opts.max_pages.max(1) {
        if page > 1 {
            polite_pause(opts, u64::from(page));
        }
        let url = reviews::page_url(slug, page);
        let html_doc = match source.fetch(&url) {
            Ok(body) => body,
            Err(e) if is_past_end(&e, page) => {
                logd!("{slug}: page {page} -> {e}; end of listing");
                break;
            }
            Err(e) => return Err(e),
        };

        let found = reviews::parse_page(&url, &html_doc, opts.pick, opts.scan);
        if found.records.is_empty() {
            logd!("{slug}: page {page} has no reviews; stopping");
            break;
        }
        if prev.as_ref() == Some(&found.records) {
            logd!("{slug}: page {page} repeats page {}; stopping", page - 1);
            break;
        }

        if let Some(p) = progress.as_deref_mut() {
            p.page_done(slug, page, found.records.len());
        }
        out.extend(found.records.iter().cloned().map(|r| ScrapedReview::new(slug, page, r)));
        prev = Some(found.records);
    }

    logf!("{slug}: {} review(s)", out.len());
    Ok(out)
}

/// Product slugs over category pages 1, 2, … until a page adds nothing new.
pub fn discover_products<S: PageSource>(
    source: &S,
    slug: &str,
    opts: &ScrapeOptions,
) -> Result<Vec<String>> {
    if slug.trim().is_empty() {
        return Err(Error::InvalidTarget(s!("empty category slug")));
    }

    let mut seen = HashSet::new();
    let mut slugs = Vec::new();

    for page in 1..=opts.max_pages.max(1) {
        if page > 1 {
            polite_pause(opts, u64::from(page));
        }
        let url = category::page_url(slug, page);
        let html_doc = match source.fetch(&url) {
            Ok(body) => body,
            Err(e) if is_past_end(&e, page) => break,
            Err(e) => return Err(e),
        };
        let before = slugs.len();
        for s in category::parse_product_slugs(&html_doc) {
            if seen.insert(s.clone()) {
                slugs.push(s);
            }
        }
        if slugs.len() == before {
            break;
        }
    }

    logf!("category {slug}: {} product(s)", slugs.len());
    Ok(slugs)
}

/// Every product of a category, scraped on a small worker pool.
/// Output keeps discovery order; a failing product is reported and skipped.
pub fn collect_category<S: PageSource>(
    source: &S,
    slug: &str,
    opts: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<ScrapedReview>> {
    report!(progress, "Listing products in {slug}…");
    let products = discover_products(source, slug, opts)?;
    if products.is_empty() {
        report!(progress, "No products found in {slug}.");
        return Ok(Vec::new());
    }

    if let Some(p) = progress.as_deref_mut() {
        p.begin(products.len());
    }

    // Concurrency
    type Done = (usize, std::result::Result<Vec<ScrapedReview>, String>);

    let counter = AtomicUsize::new(0);
    let (res_tx, res_rx) = mpsc::channel::<Done>();
    let workers = WORKERS.min(products.len()).max(1);
    let mut per_product: Vec<(usize, Vec<ScrapedReview>)> = Vec::with_capacity(products.len());

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = res_tx.clone();
            let counter = &counter;
            let products = &products;
            scope.spawn(move || {
                loop {
                    let i = counter.fetch_add(1, Ordering::Relaxed);
                    if i >= products.len() {
                        break;
                    }
                    if i >= workers {
                        polite_pause(opts, i as u64);
                    }
                    let result = collect_product(source, &products[i], opts, None)
                        .map_err(|e| e.to_string());
                    if tx.send((i, result)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(res_tx); // this thread is sole receiver now

        // Aggregate results
        for (i, result) in res_rx.iter() {
            let label = products[i].as_str();
            match result {
                Ok(rows) => {
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(i, label);
                    }
                    per_product.push((i, rows));
                }
                Err(msg) => {
                    loge!("product {label}: {msg}");
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(i, label, &msg);
                    }
                }
            }
        }
    });

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    per_product.sort_by_key(|(i, _)| *i);
    Ok(per_product.into_iter().flat_map(|(_, rows)| rows).collect())
}
