// src/store.rs
// On-disk page cache: one HTML file per URL under `.store/pages`.

use std::{fmt::Write as _, fs, path::{Path, PathBuf}};

use sha2::{Digest, Sha256};

use crate::config::consts::{PAGE_CACHE_SUBDIR, STORE_DIR};
use crate::config::options::CacheMode;
use crate::core::net::PageSource;
use crate::core::sanitize::sanitize_file_stem;
use crate::error::{Error, Result};

pub fn default_cache_dir() -> PathBuf {
    PathBuf::from(STORE_DIR).join(PAGE_CACHE_SUBDIR)
}

const STEM_MAX: usize = 96;

/// File holding the cached copy of `url`: a readable stem plus a digest of
/// the full URL, so URLs that sanitize alike still get their own file.
pub fn page_path(dir: &Path, url: &str) -> PathBuf {
    let mut stem = sanitize_file_stem(url, "page");
    // sanitized stems are ASCII
    stem.truncate(STEM_MAX);
    dir.join(format!("{stem}-{}.html", url_digest(url)))
}

/// First 64 bits of SHA-256 over the URL, as hex.
fn url_digest(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    let mut hex = String::with_capacity(16);
    for byte in &digest[..8] {
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}

pub fn load_page(dir: &Path, url: &str) -> Option<String> {
    fs::read_to_string(page_path(dir, url)).ok()
}

pub fn save_page(dir: &Path, url: &str, body: &str) -> Result<()> {
    fs::create_dir_all(dir)?;
    fs::write(page_path(dir, url), body)?;
    Ok(())
}

/// `PageSource` decorator that consults the page cache first.
pub struct CachedSource<S> {
    inner: S,
    dir: PathBuf,
    mode: CacheMode,
}

impl<S: PageSource> CachedSource<S> {
    pub fn new(inner: S, mode: CacheMode) -> Self {
        Self::with_dir(inner, mode, default_cache_dir())
    }

    pub fn with_dir(inner: S, mode: CacheMode, dir: PathBuf) -> Self {
        Self { inner, dir, mode }
    }
}

impl<S: PageSource> PageSource for CachedSource<S> {
    fn fetch(&self, url: &str) -> Result<String> {
        if self.mode == CacheMode::Off {
            return self.inner.fetch(url);
        }
        if let Some(body) = load_page(&self.dir, url) {
            logd!("cache hit: {url}");
            return Ok(body);
        }
        if self.mode == CacheMode::Offline {
            return Err(Error::CacheMiss(s!(url)));
        }

        let body = self.inner.fetch(url)?;
        // best-effort; a read-only cache dir must not fail the crawl
        if let Err(e) = save_page(&self.dir, url, &body) {
            logw!("cache write failed for {url}: {e}");
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        calls: AtomicUsize,
    }

    impl PageSource for Counting {
        fn fetch(&self, url: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(format!("<p>{url}</p>"))
        }
    }

    fn tmp_dir(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("review_scrape_store_{}", name));
        let _ = fs::remove_dir_all(&p);
        p
    }

    #[test]
    fn miss_then_hit() {
        let dir = tmp_dir("hit");
        let src = CachedSource::with_dir(Counting { calls: AtomicUsize::new(0) }, CacheMode::ReadWrite, dir.clone());

        let a = src.fetch("https://x.test/p?page=1").unwrap();
        let b = src.fetch("https://x.test/p?page=1").unwrap();
        assert_eq!(a, b);
        assert_eq!(src.inner.calls.load(Ordering::Relaxed), 1);
        assert!(page_path(&dir, "https://x.test/p?page=1").exists());
    }

    #[test]
    fn lookalike_urls_get_their_own_file() {
        let dir = tmp_dir("lookalike");
        let pairs = [
            ("https://www.itreview.jp/search?q=請求書", "https://www.itreview.jp/search?q=経費精算"),
            ("https://www.itreview.jp/products/x/reviews?page=2", "https://www.itreview.jp/products/x/reviews/page/2"),
        ];
        for (a, b) in pairs {
            assert_ne!(page_path(&dir, a), page_path(&dir, b));
            assert_eq!(page_path(&dir, a), page_path(&dir, a));
        }

        let src = CachedSource::with_dir(Counting { calls: AtomicUsize::new(0) }, CacheMode::ReadWrite, dir.clone());
        let (a, b) = pairs[1];
        assert_eq!(src.fetch(a).unwrap(), format!("<p>{a}</p>"));
        assert_eq!(src.fetch(b).unwrap(), format!("<p>{b}</p>"));
        assert_eq!(src.inner.calls.load(Ordering::Relaxed), 2);

        let offline = CachedSource::with_dir(Counting { calls: AtomicUsize::new(0) }, CacheMode::Offline, dir);
        assert_eq!(offline.fetch(b).unwrap(), format!("<p>{b}</p>"));
        assert_eq!(offline.fetch(a).unwrap(), format!("<p>{a}</p>"));
    }

    #[test]
    fn long_urls_keep_a_bounded_name() {
        let url = format!("https://x.test/{}", "a".repeat(500));
        let name = page_path(Path::new("d"), &url).file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.len() <= STEM_MAX + 1 + 16 + ".html".len());
        assert!(name.ends_with(".html"));
    }

    #[test]
    fn offline_miss_is_error() {
        let dir = tmp_dir("offline");
        let src = CachedSource::with_dir(Counting { calls: AtomicUsize::new(0) }, CacheMode::Offline, dir);
        let err = src.fetch("https://x.test/none").unwrap_err();
        assert!(matches!(err, Error::CacheMiss(_)));
        assert_eq!(src.inner.calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn off_never_touches_disk() {
        let dir = tmp_dir("off");
        let src = CachedSource::with_dir(Counting { calls: AtomicUsize::new(0) }, CacheMode::Off, dir.clone());
        src.fetch("https://x.test/a").unwrap();
        src.fetch("https://x.test/a").unwrap();
        assert_eq!(src.inner.calls.load(Ordering::Relaxed), 2);
        assert!(!dir.exists());
    }
}
