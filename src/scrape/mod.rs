// src/scrape/mod.rs
mod scrape;

pub use scrape::ScrapedReview;
pub use scrape::collect;
pub use scrape::collect_page;
pub use scrape::collect_product;
pub use scrape::collect_category;
pub use scrape::discover_products;
pub use scrape::dedup_reviews;
