// src/core/mod.rs
//! Text and tree algorithms shared by every page reader, plus the fetch seam.
//!
//! ```text
//! raw text → sanitize::normalize → json::split_and_parse → review::extract_reviews
//! ```
//!
//! `sanitize`, `json` and `review` are pure and never fail; they can run on any
//! thread against independent inputs.

pub mod html;
pub mod json;
pub mod net;
pub mod review;
pub mod sanitize;

pub use json::{split_and_parse, split_and_parse_with, JsonBlocks, ScanMode};
pub use net::{HttpSource, PageSource};
pub use review::{extract_reviews, ReviewRecord};
pub use sanitize::normalize;
