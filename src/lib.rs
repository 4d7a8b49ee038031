// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod specs;

pub mod file;
pub mod progress;
pub mod scrape;
pub mod store;

pub use crate::core::{extract_reviews, normalize, split_and_parse, ReviewRecord};
pub use crate::error::{Error, Result};
