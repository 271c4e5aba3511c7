pub mod config;
pub mod crawler;
pub mod error;
pub mod logger;
pub mod pdf;
pub mod prompt;
pub mod utils;

pub use config::Settings;
pub use crawler::{ManualCrawler, RunReport};
pub use error::{Error, Result};
