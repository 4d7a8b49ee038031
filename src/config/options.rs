// src/config/options.rs
use std::ffi::OsString;
use std::path::{ Path, PathBuf };

use super::consts::*;
use crate::core::json::ScanMode;
use crate::core::sanitize::sanitize_file_stem;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

/// What to crawl.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// One page, one pass.
    Url(String),
    /// All review pages of one product (slug as in `/products/<slug>`).
    Product(String),
    /// Every product listed under a category (slug as in `/categories/<slug>`).
    Category(String),
}

impl Target {
    /// Short name used for default output file stems.
    pub fn label(&self) -> String {
        match self {
            Target::Url(u) => sanitize_file_stem(u, DEFAULT_FILE),
            Target::Product(s) => sanitize_file_stem(s, DEFAULT_FILE),
            Target::Category(s) => join!("category_", &sanitize_file_stem(s, DEFAULT_FILE)),
        }
    }
}

/// Which linked-data scripts of a page to read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScriptPick {
    #[default]
    All,
    /// Zero-based script index.
    Nth(usize),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CacheMode {
    /// Read the page cache, fetch and store on a miss.
    #[default]
    ReadWrite,
    /// Cache only; never touch the network.
    Offline,
    /// Network only.
    Off,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub target: Target,
    pub pick: ScriptPick,
    pub scan: ScanMode,
    pub max_pages: u32,
    pub dedup: bool,
    pub cache: CacheMode,
    /// Base pause between requests of one worker; 0 disables pacing.
    pub pause_ms: u64,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            target: Target::Url(s!(BASE_URL)),
            pick: ScriptPick::All,
            scan: ScanMode::Naive,
            max_pages: DEFAULT_MAX_PAGES,
            dedup: false,
            cache: CacheMode::ReadWrite,
            pause_ms: REQUEST_PAUSE_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    /// Field separator for the delimited formats.
    pub fn delimiter(&self) -> Option<u8> {
        match self {
            ExportFormat::Csv => Some(b','),
            ExportFormat::Tsv => Some(b'\t'),
            ExportFormat::Json => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub include_headers: bool,
    out_path: OutputPath,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            include_headers: true,
            out_path: OutputPath::default(),
        }
    }
}

impl ExportOptions {
    /// `<dir>/<stem>.<ext>`; the extension always follows `format`.
    pub fn out_path(&self) -> PathBuf {
        let stem = self.out_path.file_stem.to_string_lossy();
        self.out_path.dir.join(join!(&*stem, ".", self.format.ext()))
    }

    /// Parse user text into dir + stem. A pasted extension is ignored.
    pub fn set_path(&mut self, text: &str) {
        let p = Path::new(text.trim());
        if let Some(parent) = p.parent() {
            self.out_path.dir = parent.to_path_buf();
        }
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
    }

    pub fn set_stem(&mut self, stem: &str) {
        self.out_path.file_stem = OsString::from(stem);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_FILE),
        }
    }
}
