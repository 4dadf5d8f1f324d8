//! Text processing and screening module

pub mod contacts;
pub mod highlighter;
pub mod language_model;
pub mod matcher;
pub mod scorer;
pub mod screener;
pub mod skill_extractor;
pub mod skills;
pub mod tagger;
