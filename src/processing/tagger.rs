//! Rule-based part-of-speech tagger and noun-phrase chunker
//!
//! Tags come from a closed-class lexicon, word shape (capitalisation, digits,
//! `+`/`#` suffixes) and suffix rules, with the previous tag as the only
//! context. Chunks are `[determiner] [adjective | number | noun]* noun` runs
//! that never cross punctuation, sentence or line boundaries.

use crate::config::LanguageModelConfig;
use crate::error::{Result, ScreenerError};
use crate::processing::language_model::{LanguageModel, ParsedText, PartOfSpeech, TaggedToken};
use log::{debug, info};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "all", "both", "either", "neither", "another", "such", "what", "which", "whose", "my",
    "your", "his", "its", "our", "their",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "you", "he", "him", "she", "her", "it", "we", "us", "they", "them", "myself",
    "yourself", "himself", "herself", "itself", "ourselves", "themselves", "who", "whom",
    "mine", "yours", "hers", "ours", "theirs", "something", "anything", "nothing",
    "everything", "someone", "anyone", "everyone", "nobody",
];

/// Pronouns that stand as a noun phrase on their own.
const PERSONAL_PRONOUNS: &[&str] = &[
    "i", "me", "you", "he", "him", "she", "her", "it", "we", "us", "they", "them",
];

const ADPOSITIONS: &[&str] = &[
    "in", "on", "at", "by", "for", "with", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "to", "from", "up", "down", "of", "off",
    "over", "under", "within", "without", "across", "along", "among", "around", "behind",
    "beyond", "via", "per", "than", "like", "upon", "toward", "towards", "throughout",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "yet", "so", "plus", "because", "although", "though", "while",
    "whereas", "if", "unless", "since", "whether", "as", "&",
];

const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might",
    "must",
];

const PARTICLES: &[&str] = &["not", "n't", "'s", "’s"];

const ADVERBS: &[&str] = &[
    "very", "also", "just", "only", "well", "too", "quite", "always", "often", "never", "then",
    "there", "here", "now", "already", "still", "even", "again", "ever", "more", "most", "less",
    "least", "currently", "recently", "etc",
];

const VERBS: &[&str] = &[
    "build", "built", "use", "develop", "create", "implement", "deliver", "collaborate", "write",
    "wrote", "seek", "join", "love", "enjoy", "know", "want", "need", "manage", "maintain",
    "improve", "ensure", "provide", "include", "require", "deploy", "led", "ran", "made",
    "make", "took", "gave", "became", "get", "got", "drive", "drove", "grew", "bring", "brought",
];

const ADJECTIVES: &[&str] = &[
    "strong", "excellent", "good", "great", "new", "senior", "junior", "proficient", "familiar",
    "solid", "deep", "hands-on", "various", "multiple", "several", "other", "same", "key",
    "large", "small", "high", "low", "best", "better", "fast", "remote", "able", "responsible",
    "first", "last", "next", "own", "many", "much", "few",
];

const NUMBER_WORDS: &[&str] = &[
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "hundred",
    "thousand",
];

const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ship", "ance", "ence", "ism", "ist", "ogy", "er",
    "or",
];

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "ical", "less", "al"];

const SYMBOL_CHARS: &str = "$%&*+<=>@^|~#€£¥";

/// User lexicon file: `[words]` table of `word = "POS"` entries.
#[derive(Debug, Deserialize)]
struct LexiconFile {
    #[serde(default)]
    words: HashMap<String, PartOfSpeech>,
}

struct Token<'t> {
    text: &'t str,
    start: usize,
    end: usize,
    pos: PartOfSpeech,
    /// First token of a sentence or of a line.
    boundary: bool,
}

pub struct RuleBasedTagger {
    lexicon: HashMap<String, PartOfSpeech>,
    token_regex: Regex,
}

impl Default for RuleBasedTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleBasedTagger {
    pub fn new() -> Self {
        let token_regex = Regex::new(r"[\p{L}\p{N}_]+(?:[.'’\-][\p{L}\p{N}_]+)*[+#]*|\S")
            .expect("Invalid token regex");

        Self {
            lexicon: Self::default_lexicon(),
            token_regex,
        }
    }

    /// Build the tagger described by `config`, loading its lexicon file once.
    pub fn from_config(config: &LanguageModelConfig) -> Result<Self> {
        let mut tagger = Self::new();
        if let Some(path) = &config.lexicon_path {
            let overrides = Self::load_lexicon(path)?;
            info!("Loaded {} lexicon overrides from {}", overrides.len(), path.display());
            tagger = tagger.with_overrides(overrides);
        }
        Ok(tagger)
    }

    /// Entries here take precedence over the built-in lexicon.
    pub fn with_overrides(mut self, overrides: HashMap<String, PartOfSpeech>) -> Self {
        for (word, pos) in overrides {
            self.lexicon.insert(word.to_lowercase(), pos);
        }
        self
    }

    pub fn lexicon_size(&self) -> usize {
        self.lexicon.len()
    }

    fn load_lexicon(path: &Path) -> Result<HashMap<String, PartOfSpeech>> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScreenerError::Lexicon(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let file: LexiconFile = toml::from_str(&content).map_err(|e| {
            ScreenerError::Lexicon(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        Ok(file.words)
    }

    fn default_lexicon() -> HashMap<String, PartOfSpeech> {
        let classes: [(&[&str], PartOfSpeech); 11] = [
            (DETERMINERS, PartOfSpeech::Determiner),
            (PRONOUNS, PartOfSpeech::Pronoun),
            (ADPOSITIONS, PartOfSpeech::Adposition),
            (CONJUNCTIONS, PartOfSpeech::Conjunction),
            (AUXILIARIES, PartOfSpeech::Auxiliary),
            (PARTICLES, PartOfSpeech::Particle),
            (ADVERBS, PartOfSpeech::Adverb),
            (VERBS, PartOfSpeech::Verb),
            (ADJECTIVES, PartOfSpeech::Adjective),
            (NUMBER_WORDS, PartOfSpeech::Numeral),
            (&["to"], PartOfSpeech::Particle),
        ];

        let mut lexicon = HashMap::new();
        for (words, pos) in classes {
            for word in words {
                // earlier classes win for words listed twice ("that", "to")
                lexicon.entry(word.to_string()).or_insert(pos);
            }
        }
        lexicon
    }

    fn analyze<'t>(&self, text: &'t str) -> Vec<Token<'t>> {
        let mut tokens = Vec::new();

        for (offset, sentence) in text.split_sentence_bound_indices() {
            let mut sentence_initial = true;
            let mut prev_pos: Option<PartOfSpeech> = None;
            let mut prev_end = offset;

            for m in self.token_regex.find_iter(sentence) {
                let start = offset + m.start();
                let end = offset + m.end();
                let new_line = text[prev_end..start].contains('\n');
                if new_line {
                    sentence_initial = true;
                    prev_pos = None;
                }

                let pos = self.tag_word(m.as_str(), sentence_initial, prev_pos);
                tokens.push(Token {
                    text: m.as_str(),
                    start,
                    end,
                    pos,
                    boundary: prev_end == offset || new_line,
                });

                if !matches!(pos, PartOfSpeech::Punctuation | PartOfSpeech::Symbol) {
                    sentence_initial = false;
                }
                prev_pos = Some(pos);
                prev_end = end;
            }
        }

        debug!("Tagged {} tokens", tokens.len());
        tokens
    }

    fn tag_word(&self, word: &str, sentence_initial: bool, prev: Option<PartOfSpeech>) -> PartOfSpeech {
        if !word.chars().any(char::is_alphanumeric) {
            return if word.chars().all(|c| SYMBOL_CHARS.contains(c)) {
                PartOfSpeech::Symbol
            } else {
                PartOfSpeech::Punctuation
            };
        }

        if word.chars().all(|c| c.is_numeric() || c == '.') {
            return PartOfSpeech::Numeral;
        }

        let lower = word.to_lowercase();
        if let Some(pos) = self.lexicon.get(&lower) {
            return *pos;
        }

        if looks_like_proper_noun(word) {
            return PartOfSpeech::ProperNoun;
        }

        let capitalized = word.chars().next().is_some_and(char::is_uppercase);
        if capitalized && !sentence_initial {
            return PartOfSpeech::ProperNoun;
        }

        suffix_tag(&lower, prev)
    }

    fn chunk(&self, text: &str, tokens: &[Token<'_>]) -> Vec<String> {
        let mut phrases = Vec::new();
        let mut start: Option<usize> = None;
        let mut head: Option<usize> = None;

        for (i, token) in tokens.iter().enumerate() {
            if token.boundary {
                emit_chunk(text, tokens, start.take(), head.take(), &mut phrases);
            }

            match token.pos {
                PartOfSpeech::Determiner => {
                    emit_chunk(text, tokens, start.take(), head.take(), &mut phrases);
                    start = Some(i);
                }
                PartOfSpeech::Adjective | PartOfSpeech::Numeral => {
                    if head.is_some() {
                        emit_chunk(text, tokens, start.take(), head.take(), &mut phrases);
                    }
                    start.get_or_insert(i);
                }
                PartOfSpeech::Noun | PartOfSpeech::ProperNoun => {
                    start.get_or_insert(i);
                    head = Some(i);
                }
                PartOfSpeech::Pronoun => {
                    emit_chunk(text, tokens, start.take(), head.take(), &mut phrases);
                    if PERSONAL_PRONOUNS.contains(&token.text.to_lowercase().as_str()) {
                        phrases.push(token.text.to_string());
                    }
                }
                _ => emit_chunk(text, tokens, start.take(), head.take(), &mut phrases),
            }
        }
        emit_chunk(text, tokens, start, head, &mut phrases);

        phrases
    }
}

fn emit_chunk(
    text: &str,
    tokens: &[Token<'_>],
    start: Option<usize>,
    head: Option<usize>,
    phrases: &mut Vec<String>,
) {
    if let (Some(start), Some(head)) = (start, head) {
        phrases.push(text[tokens[start].start..tokens[head].end].to_string());
    }
}

/// `C++`, `C#`, `JavaScript`, `iOS`, `AWS`, `EC2`, `HTML5`.
fn looks_like_proper_noun(word: &str) -> bool {
    if word.ends_with('+') || word.ends_with('#') {
        return true;
    }
    let inner_upper = word.chars().skip(1).any(char::is_uppercase);
    let has_digit = word.chars().any(|c| c.is_ascii_digit());
    let has_letter = word.chars().any(char::is_alphabetic);
    inner_upper || (has_digit && has_letter)
}

fn suffix_tag(lower: &str, prev: Option<PartOfSpeech>) -> PartOfSpeech {
    let length = lower.chars().count();
    let has_suffix = |suffix: &str| lower.ends_with(suffix) && length > suffix.len() + 1;

    if length > 3 && lower.ends_with("ly") {
        return PartOfSpeech::Adverb;
    }
    if prev == Some(PartOfSpeech::Pronoun) {
        return PartOfSpeech::Verb;
    }
    if NOUN_SUFFIXES.iter().any(|s| has_suffix(s)) {
        return PartOfSpeech::Noun;
    }
    if length > 4 && lower.ends_with("ing") {
        return match prev {
            Some(PartOfSpeech::Noun)
            | Some(PartOfSpeech::ProperNoun)
            | Some(PartOfSpeech::Adjective)
            | Some(PartOfSpeech::Determiner)
            | Some(PartOfSpeech::Numeral) => PartOfSpeech::Noun,
            _ => PartOfSpeech::Verb,
        };
    }
    if length > 4 && lower.ends_with("ed") {
        return match prev {
            Some(PartOfSpeech::Determiner) | Some(PartOfSpeech::Adjective) => PartOfSpeech::Adjective,
            _ => PartOfSpeech::Verb,
        };
    }
    if ADJECTIVE_SUFFIXES.iter().any(|s| has_suffix(s)) {
        return PartOfSpeech::Adjective;
    }
    if has_suffix("ize") {
        return PartOfSpeech::Verb;
    }
    PartOfSpeech::Noun
}

impl LanguageModel for RuleBasedTagger {
    fn noun_phrases(&self, text: &str) -> Vec<String> {
        let tokens = self.analyze(text);
        self.chunk(text, &tokens)
    }

    fn tagged_tokens(&self, text: &str) -> Vec<TaggedToken> {
        self.analyze(text).iter().map(to_tagged).collect()
    }

    fn parse(&self, text: &str) -> ParsedText {
        let tokens = self.analyze(text);
        ParsedText {
            noun_phrases: self.chunk(text, &tokens),
            tokens: tokens.iter().map(to_tagged).collect(),
        }
    }
}

fn to_tagged(token: &Token<'_>) -> TaggedToken {
    TaggedToken {
        text: token.text.to_string(),
        pos: token.pos,
        start: token.start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tag_of(tokens: &[TaggedToken], word: &str) -> PartOfSpeech {
        tokens
            .iter()
            .find(|t| t.text == word)
            .map(|t| t.pos)
            .unwrap_or_else(|| panic!("token {} not found", word))
    }

    #[test]
    fn test_tags_resume_sentence() {
        let tagger = RuleBasedTagger::new();
        let tokens = tagger.tagged_tokens("Senior Rust developer with experience in machine learning and AWS.");

        assert_eq!(tag_of(&tokens, "Senior"), PartOfSpeech::Adjective);
        assert_eq!(tag_of(&tokens, "Rust"), PartOfSpeech::ProperNoun);
        assert_eq!(tag_of(&tokens, "developer"), PartOfSpeech::Noun);
        assert_eq!(tag_of(&tokens, "with"), PartOfSpeech::Adposition);
        assert_eq!(tag_of(&tokens, "learning"), PartOfSpeech::Noun);
        assert_eq!(tag_of(&tokens, "and"), PartOfSpeech::Conjunction);
        assert_eq!(tag_of(&tokens, "AWS"), PartOfSpeech::ProperNoun);
        assert_eq!(tag_of(&tokens, "."), PartOfSpeech::Punctuation);
    }

    #[test]
    fn test_token_shapes() {
        let tagger = RuleBasedTagger::new();
        let tokens = tagger.tagged_tokens("Used C++, C# and Node.js since 2019");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();

        assert_eq!(texts, vec!["Used", "C++", ",", "C#", "and", "Node.js", "since", "2019"]);
        assert_eq!(tag_of(&tokens, "C++"), PartOfSpeech::ProperNoun);
        assert_eq!(tag_of(&tokens, "C#"), PartOfSpeech::ProperNoun);
        assert_eq!(tag_of(&tokens, "Node.js"), PartOfSpeech::ProperNoun);
        assert_eq!(tag_of(&tokens, "2019"), PartOfSpeech::Numeral);
    }

    #[test]
    fn test_token_offsets_point_into_text() {
        let tagger = RuleBasedTagger::new();
        let text = "Kafka pipelines.\nDocker images";
        for token in tagger.tagged_tokens(text) {
            assert_eq!(&text[token.start..token.start + token.text.len()], token.text);
        }
    }

    #[test]
    fn test_noun_phrases() {
        let tagger = RuleBasedTagger::new();
        let phrases = tagger.noun_phrases("Senior Rust developer with experience in machine learning and AWS.");

        assert_eq!(
            phrases,
            vec!["Senior Rust developer", "experience", "machine learning", "AWS"]
        );
    }

    #[test]
    fn test_pronouns_and_determiners() {
        let tagger = RuleBasedTagger::new();
        let phrases = tagger.noun_phrases("We design scalable systems for the team.");

        assert_eq!(phrases, vec!["We", "scalable systems", "the team"]);
    }

    #[test]
    fn test_chunks_do_not_cross_lines() {
        let tagger = RuleBasedTagger::new();
        let phrases = tagger.noun_phrases("Skills\nPython");

        assert_eq!(phrases, vec!["Skills", "Python"]);
    }

    #[test]
    fn test_empty_text() {
        let tagger = RuleBasedTagger::new();
        assert!(tagger.parse("").tokens.is_empty());
        assert!(tagger.noun_phrases("   ").is_empty());
    }

    #[test]
    fn test_lexicon_overrides_from_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lexicon.toml");
        std::fs::write(&path, "[words]\nkubernetes = \"PROPN\"\nsynergy = \"X\"\n").unwrap();

        let config = LanguageModelConfig {
            lexicon_path: Some(path),
            min_term_length: 2,
        };
        let tagger = RuleBasedTagger::from_config(&config).unwrap();
        let tokens = tagger.tagged_tokens("kubernetes synergy");

        assert_eq!(tag_of(&tokens, "kubernetes"), PartOfSpeech::ProperNoun);
        assert_eq!(tag_of(&tokens, "synergy"), PartOfSpeech::Other);
        assert_eq!(tagger.lexicon_size(), RuleBasedTagger::new().lexicon_size() + 2);
    }

    #[test]
    fn test_bad_lexicon_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lexicon.toml");
        std::fs::write(&path, "[words]\nrust = \"LANGUAGE\"\n").unwrap();

        let config = LanguageModelConfig {
            lexicon_path: Some(path),
            min_term_length: 2,
        };
        assert!(matches!(
            RuleBasedTagger::from_config(&config),
            Err(ScreenerError::Lexicon(_))
        ));
    }
}
