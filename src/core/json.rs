// src/core/json.rs
// Brace-balanced splitter for text holding one or more JSON object literals,
// possibly concatenated or wrapped in other text.
//
// Scan: find '{', count depth until it returns to 0, parse that slice, resume
// right after its closing '}'. Blocks that fail to parse are dropped. An
// unbalanced tail ends the scan.

use serde_json::Value;

/// How braces are counted while looking for the end of a block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanMode {
    /// Every `{` / `}` moves the depth, including ones inside string
    /// literals. A brace in a quoted value can therefore end a block early
    /// or leave it unbalanced.
    #[default]
    Naive,
    /// Braces between unescaped double quotes are ignored.
    StringAware,
}

/// Outcome of one candidate block.
enum Block {
    Parsed(Value),
    Skipped(serde_json::Error),
}

/// Iterator over the successfully parsed blocks of `text`, left to right.
///
/// Single pass; once it returns `None` it stays exhausted.
pub struct JsonBlocks<'a> {
    s: &'a str,
    b: &'a [u8],
    i: usize,
    mode: ScanMode,
    done: bool,
}

impl<'a> JsonBlocks<'a> {
    pub fn new(s: &'a str, mode: ScanMode) -> Self {
        Self { s, b: s.as_bytes(), i: 0, mode, done: false }
    }

    /// End offset (exclusive) of the block opening at `open`, or `None` when
    /// the braces never balance.
    fn block_end(&self, open: usize) -> Option<usize> {
        let mut depth = 1usize;
        let mut in_str = false;
        let mut escaped = false;
        let aware = self.mode == ScanMode::StringAware;

        // '{', '}', '"' and '\\' are ASCII and never occur inside a multi-byte
        // UTF-8 sequence, so a byte scan is char-exact.
        for (j, &c) in self.b.iter().enumerate().skip(open + 1) {
            if aware && in_str {
                match c {
                    _ if escaped => escaped = false,
                    b'\\' => escaped = true,
                    b'"' => in_str = false,
                    _ => {}
                }
                continue;
            }
            match c {
                b'"' if aware => in_str = true,
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(j + 1);
                    }
                }
                _ => {}
            }
        }
        None
    }

    fn next_block(&mut self) -> Option<Block> {
        if self.done {
            return None;
        }
        let Some(rel) = self.s[self.i..].find('{') else {
            self.done = true;
            return None;
        };
        let open = self.i + rel;
        let Some(end) = self.block_end(open) else {
            logd!("json: unbalanced braces from offset {open}; dropping tail");
            self.done = true;
            return None;
        };
        self.i = end;

        match serde_json::from_str::<Value>(&self.s[open..end]) {
            Ok(v) => Some(Block::Parsed(v)),
            Err(e) => Some(Block::Skipped(e)),
        }
    }
}

impl Iterator for JsonBlocks<'_> {
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.next_block()? {
                Block::Parsed(v) => return Some(v),
                Block::Skipped(e) => logd!("json: skipped malformed block: {e}"),
            }
        }
    }
}

impl std::iter::FusedIterator for JsonBlocks<'_> {}

/// Parse every balanced `{…}` block of `text` that is valid JSON, in order.
/// Never fails; malformed blocks are skipped and an unbalanced tail is ignored.
pub fn split_and_parse(text: &str) -> Vec<Value> {
    JsonBlocks::new(text, ScanMode::Naive).collect()
}

pub fn split_and_parse_with(text: &str, mode: ScanMode) -> Vec<Value> {
    JsonBlocks::new(text, mode).collect()
}
