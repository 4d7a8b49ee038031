// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://www.itreview.jp";
pub const USER_AGENT: &str = concat!("review_scrape/", env!("CARGO_PKG_VERSION"));
pub const HTTP_TIMEOUT_SECS: u64 = 20;

// Local cache
pub const STORE_DIR: &str = ".store";
pub const PAGE_CACHE_SUBDIR: &str = "pages";
pub const LOG_FILE: &str = "debug.log";

// Crawl
pub const DEFAULT_MAX_PAGES: u32 = 50;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "reviews";

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 750; // be polite
pub const JITTER_MS: u64 = 250; // extra 0..250 ms
