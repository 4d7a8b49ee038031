// src/progress.rs
/// Lightweight progress reporting used by long-running operations (crawls).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One page of a product was read.
    fn page_done(&mut self, _label: &str, _page: u32, _reviews: usize) {}

    /// One logical unit completed (a product of a category crawl).
    fn item_done(&mut self, _index: usize, _label: &str) {}

    /// One logical unit failed; the crawl carries on.
    fn item_failed(&mut self, _index: usize, _label: &str, _err: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// Plain stderr lines, one per event.
#[derive(Default)]
pub struct StderrProgress {
    total: usize,
    done: usize,
}

impl Progress for StderrProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn page_done(&mut self, label: &str, page: u32, reviews: usize) {
        eprintln!("  {label} page {page}: {reviews} review(s)");
    }

    fn item_done(&mut self, _index: usize, label: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {label}", self.done, self.total);
    }

    fn item_failed(&mut self, _index: usize, label: &str, err: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {label} FAILED: {err}", self.done, self.total);
    }
}
