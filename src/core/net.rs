// src/core/net.rs
// Page fetch seam. Everything above this layer works on already-decoded text.

use std::time::Duration;

use crate::config::consts::{HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::error::{Error, Result};

/// Anything that can turn a URL into page text.
/// `Sync` so crawl workers can share one source.
pub trait PageSource: Sync {
    fn fetch(&self, url: &str) -> Result<String>;
}

impl<S: PageSource + ?Sized> PageSource for &S {
    fn fetch(&self, url: &str) -> Result<String> {
        (**self).fetch(url)
    }
}

/// Blocking HTTP GET via a shared `ureq` agent.
pub struct HttpSource {
    agent: ureq::Agent,
}

impl HttpSource {
    pub fn new() -> Self {
        let timeout = Duration::from_secs(HTTP_TIMEOUT_SECS);
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .user_agent(USER_AGENT)
            .build();
        Self { agent }
    }
}

impl Default for HttpSource {
    fn default() -> Self { Self::new() }
}

impl PageSource for HttpSource {
    fn fetch(&self, url: &str) -> Result<String> {
        logd!("GET {url}");
        let resp = match self.agent.get(url).call() {
            Ok(resp) => resp,
            Err(ureq::Error::Status(code, _)) => {
                return Err(Error::Status { url: s!(url), code });
            }
            Err(e) => {
                return Err(Error::Http { url: s!(url), reason: e.to_string() });
            }
        };
        Ok(resp.into_string()?)
    }
}
