//! Resume screener library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{Result, ScreenerError};
pub use processing::contacts::ContactInfo;
pub use processing::highlighter::{highlight, HighlightedText, Marker};
pub use processing::scorer::{score, ScoreResult};
pub use processing::skills::SkillSet;
