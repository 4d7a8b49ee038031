// src/core/sanitize.rs

const BOM: char = '\u{feff}';

/// Strip every ASCII control character (0x00..=0x1F, 0x7F) and any leading
/// BOM. Order of the remaining characters is preserved.
///
/// Controls go first so a BOM hidden behind them is still leading, and all
/// leading BOMs go so that `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let cleaned: String = text.chars().filter(|c| !is_stripped_control(*c)).collect();
    match cleaned.strip_prefix(BOM) {
        Some(_) => cleaned.trim_start_matches(BOM).to_string(),
        None => cleaned,
    }
}

#[inline]
fn is_stripped_control(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{1f}' | '\u{7f}')
}

/// Turn an arbitrary string (slug, URL) into a safe file stem.
/// Runs of anything outside `[A-Za-z0-9-_.]` become a single `_`.
pub fn sanitize_file_stem(name: &str, fallback: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '.' {
            out.push(ch);
            last_us = false;
        } else if !last_us {
            out.push('_');
            last_us = true;
        }
    }
    let out = out.trim_matches(|c| c == '_' || c == '.').to_string();
    if out.is_empty() { s!(fallback) } else { out }
}
