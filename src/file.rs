// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::config::options::ExportOptions;
use crate::error::{Error, Result};
use crate::scrape::ScrapedReview;

pub const HEADERS: [&str; 4] = ["product", "page", "rating", "description"];

/// Write `rows` to `export.out_path()` in `export.format`.
/// Returns the final path written to.
pub fn export_reviews(export: &ExportOptions, rows: &[ScrapedReview]) -> Result<PathBuf> {
    let path = export.out_path();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let out = BufWriter::new(File::create(&path)?); // truncate/overwrite
    match export.format.delimiter() {
        Some(sep) => write_delimited(out, rows, sep, export.include_headers)?,
        None => write_json(out, rows)?,
    }
    logf!("wrote {} review(s) to {}", rows.len(), path.display());
    Ok(path)
}

/// Delimited export; the rating keeps its JSON spelling, absent is empty.
pub fn write_delimited<W: Write>(
    w: W,
    rows: &[ScrapedReview],
    sep: u8,
    include_headers: bool,
) -> Result<()> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(sep)
        .has_headers(false)
        .from_writer(w);

    if include_headers {
        out.write_record(HEADERS)?;
    }
    for r in rows {
        let page = r.page.to_string();
        let rating = r.record().rating_text().unwrap_or_default();
        out.write_record([
            r.product.as_str(),
            page.as_str(),
            rating.as_str(),
            r.description.as_deref().unwrap_or(""),
        ])?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(mut w: W, rows: &[ScrapedReview]) -> Result<()> {
    serde_json::to_writer_pretty(&mut w, rows)?;
    writeln!(w)?;
    w.flush()?;
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
