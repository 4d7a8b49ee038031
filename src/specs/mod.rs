// src/specs/mod.rs
//! # Page readers
//!
//! Each spec knows *where the ground truth lives* on one kind of page of the
//! review site and how to pull it out. Specs are pure: they take page text
//! that someone else fetched and return plain data.
//!
//! ## What lives here
//! - URL shapes for each page kind (`page_url`).
//! - Linked-data extraction from review pages: `<script type="application/ld+json">`
//!   bodies → `core::sanitize::normalize` → `core::json` splitter →
//!   `core::review::extract_reviews`.
//! - Product discovery on category pages (anchor hrefs only).
//!
//! ## What does **not** live here
//! - Fetching, caching, pacing, pagination stop rules (`scrape`, `store`).
//! - Export formatting (`file`).
//! - Layout scraping of rendered review cards. Ratings and texts come from
//!   linked data only.
//!
//! ## Typical call chain
//! ```text
//! cli → scrape::collect_* → PageSource::fetch(url)
//!                        ↘  specs::<page>::parse_*(html) → records / slugs
//! ```
//!
//! ## Testing notes
//! Specs are tested offline against small inline HTML fixtures.
pub mod category;
pub mod reviews;
