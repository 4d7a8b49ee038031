// src/cli.rs
use std::{io::{self, Write}, path::PathBuf};

use clap::{ArgGroup, Parser, ValueEnum};

use crate::config::options::{AppOptions, CacheMode, ExportFormat, ScriptPick, Target};
use crate::core::json::ScanMode;
use crate::core::net::HttpSource;
use crate::file;
use crate::progress::{Progress, StderrProgress};
use crate::scrape::{self, ScrapedReview};
use crate::store::CachedSource;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    Csv,
    Tsv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Tsv => ExportFormat::Tsv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

/// Scrape product reviews published as linked data (ld+json).
#[derive(Debug, Parser)]
#[command(name = "review_scrape", version, about)]
#[command(group(ArgGroup::new("target").required(true).args(["url", "product", "category"])))]
pub struct Args {
    /// Scrape one page
    #[arg(long)]
    pub url: Option<String>,

    /// Scrape every review page of a product (slug from /products/<slug>)
    #[arg(long)]
    pub product: Option<String>,

    /// Scrape every product of a category (slug from /categories/<slug>)
    #[arg(long)]
    pub category: Option<String>,

    /// Read only the N-th ld+json script of each page (1-based)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub script: Option<u32>,

    /// Ignore braces inside JSON string literals while splitting
    #[arg(long)]
    pub string_aware: bool,

    /// Page limit per product / category listing
    #[arg(long, value_name = "N")]
    pub max_pages: Option<u32>,

    /// Drop exact duplicate reviews
    #[arg(long)]
    pub dedup: bool,

    /// Use cached pages only
    #[arg(long, conflicts_with = "no_cache")]
    pub offline: bool,

    /// Bypass the page cache
    #[arg(long)]
    pub no_cache: bool,

    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,

    /// Output file (extension follows --format)
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Write a header row (CSV/TSV)
    #[arg(long)]
    pub include_headers: bool,

    /// Also print each review to stdout
    #[arg(long)]
    pub print: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn target(&self) -> Target {
        if let Some(u) = &self.url {
            Target::Url(u.clone())
        } else if let Some(p) = &self.product {
            Target::Product(p.clone())
        } else {
            // clap enforces exactly one of the three
            Target::Category(self.category.clone().unwrap_or_default())
        }
    }

    pub fn to_options(&self) -> AppOptions {
        let mut opts = AppOptions::default();

        let scrape = &mut opts.scrape;
        scrape.target = self.target();
        scrape.pick = match self.script {
            Some(n) => ScriptPick::Nth(n as usize - 1),
            None => ScriptPick::All,
        };
        scrape.scan = if self.string_aware { ScanMode::StringAware } else { ScanMode::Naive };
        if let Some(n) = self.max_pages {
            scrape.max_pages = n;
        }
        scrape.dedup = self.dedup;
        scrape.cache = if self.offline {
            CacheMode::Offline
        } else if self.no_cache {
            CacheMode::Off
        } else {
            CacheMode::ReadWrite
        };

        let export = &mut opts.export;
        export.format = self.format.into();
        export.include_headers = self.include_headers;
        match &self.out {
            Some(p) => export.set_path(&p.to_string_lossy()),
            None => export.set_stem(&scrape.target.label()),
        }
        opts
    }
}

pub fn print_reviews<W: Write>(mut w: W, rows: &[ScrapedReview]) -> io::Result<()> {
    if rows.is_empty() {
        writeln!(w, "No reviews found.")?;
        return Ok(());
    }
    for (i, r) in rows.iter().enumerate() {
        let rec = r.record();
        writeln!(
            w,
            "[Review {}] rating={} desc={}",
            i + 1,
            rec.rating_text().as_deref().unwrap_or("-"),
            rec.description.as_deref().unwrap_or("-"),
        )?;
    }
    Ok(())
}

pub fn run(args: Args) -> crate::Result<()> {
    crate::log::init(args.verbose);
    let opts = args.to_options();
    logf!("run: {:?}", opts.scrape);

    let source = CachedSource::new(HttpSource::new(), opts.scrape.cache);
    let mut progress = StderrProgress::default();
    let rows = scrape::collect(&source, &opts.scrape, Some(&mut progress as &mut dyn Progress))?;

    if args.print {
        print_reviews(io::stdout().lock(), &rows)?;
    }
    let path = file::export_reviews(&opts.export, &rows)?;
    eprintln!("Wrote {} review(s) to {}", rows.len(), path.display());
    Ok(())
}
