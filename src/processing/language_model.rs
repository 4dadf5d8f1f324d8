//! Language model interface used by the skill extractor
//!
//! Any tagger that can produce noun-phrase chunks and part-of-speech tagged
//! tokens can back skill extraction: a statistical model, a remote tagging
//! service, or the bundled [`RuleBasedTagger`](crate::processing::tagger::RuleBasedTagger).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Universal part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    #[serde(rename = "NOUN")]
    Noun,
    #[serde(rename = "PROPN")]
    ProperNoun,
    #[serde(rename = "VERB")]
    Verb,
    #[serde(rename = "AUX")]
    Auxiliary,
    #[serde(rename = "ADJ")]
    Adjective,
    #[serde(rename = "ADV")]
    Adverb,
    #[serde(rename = "DET")]
    Determiner,
    #[serde(rename = "PRON")]
    Pronoun,
    #[serde(rename = "ADP")]
    Adposition,
    #[serde(rename = "CCONJ")]
    Conjunction,
    #[serde(rename = "PART")]
    Particle,
    #[serde(rename = "NUM")]
    Numeral,
    #[serde(rename = "PUNCT")]
    Punctuation,
    #[serde(rename = "SYM")]
    Symbol,
    #[serde(rename = "X")]
    Other,
}

impl PartOfSpeech {
    pub fn is_noun(&self) -> bool {
        matches!(self, PartOfSpeech::Noun | PartOfSpeech::ProperNoun)
    }

    pub fn tag(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "NOUN",
            PartOfSpeech::ProperNoun => "PROPN",
            PartOfSpeech::Verb => "VERB",
            PartOfSpeech::Auxiliary => "AUX",
            PartOfSpeech::Adjective => "ADJ",
            PartOfSpeech::Adverb => "ADV",
            PartOfSpeech::Determiner => "DET",
            PartOfSpeech::Pronoun => "PRON",
            PartOfSpeech::Adposition => "ADP",
            PartOfSpeech::Conjunction => "CCONJ",
            PartOfSpeech::Particle => "PART",
            PartOfSpeech::Numeral => "NUM",
            PartOfSpeech::Punctuation => "PUNCT",
            PartOfSpeech::Symbol => "SYM",
            PartOfSpeech::Other => "X",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub text: String,
    pub pos: PartOfSpeech,
    /// Byte offset of the token in the analysed text.
    pub start: usize,
}

/// Result of a single parse over a text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedText {
    pub noun_phrases: Vec<String>,
    pub tokens: Vec<TaggedToken>,
}

pub trait LanguageModel: Send + Sync {
    fn noun_phrases(&self, text: &str) -> Vec<String>;

    fn tagged_tokens(&self, text: &str) -> Vec<TaggedToken>;

    /// Both views of `text`. Implementations that tag and chunk in one pass
    /// should override this.
    fn parse(&self, text: &str) -> ParsedText {
        ParsedText {
            noun_phrases: self.noun_phrases(text),
            tokens: self.tagged_tokens(text),
        }
    }
}
