//! Whole-word, case-insensitive skill matching

use crate::error::Result;
use regex::{Regex, RegexBuilder};
use std::ops::Range;

/// A compiled skill. The skill text is escaped, so punctuation such as
/// `c++` or `node.js` is matched literally.
#[derive(Debug, Clone)]
pub struct SkillPattern {
    skill: String,
    regex: Regex,
}

impl SkillPattern {
    pub fn new(skill: &str) -> Result<Self> {
        let regex = RegexBuilder::new(&regex::escape(skill))
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            skill: skill.to_string(),
            regex,
        })
    }

    pub fn skill(&self) -> &str {
        &self.skill
    }

    /// True if the skill occurs at least once as a whole word.
    pub fn is_match(&self, text: &str) -> bool {
        self.find_all(text).next().is_some()
    }

    /// Byte ranges of every whole-word occurrence, left to right.
    pub fn find_all<'p, 't>(&'p self, text: &'t str) -> WholeWordMatches<'p, 't> {
        WholeWordMatches {
            regex: &self.regex,
            text,
            position: 0,
        }
    }
}

pub struct WholeWordMatches<'p, 't> {
    regex: &'p Regex,
    text: &'t str,
    position: usize,
}

impl Iterator for WholeWordMatches<'_, '_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.position <= self.text.len() {
            let found = self.regex.find_at(self.text, self.position)?;
            if found.is_empty() {
                return None;
            }

            if is_whole_word(self.text, found.start(), found.end()) {
                self.position = found.end();
                return Some(found.range());
            }

            // retry one character further so overlapping candidates are not skipped
            self.position = found.start()
                + self.text[found.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
        }
        None
    }
}

pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// The characters on both sides of `start..end` are non-word characters or
/// the ends of the text.
pub fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start].chars().next_back().map_or(true, |c| !is_word_char(c));
    let after_ok = text[end..].chars().next().map_or(true, |c| !is_word_char(c));
    before_ok && after_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_whole_word() {
        let pattern = SkillPattern::new("python").unwrap();

        assert!(pattern.is_match("I know Python."));
        assert!(pattern.is_match("PYTHON"));
        assert!(!pattern.is_match("pythonic"));
        assert!(!pattern.is_match("cpython"));
    }

    #[test]
    fn test_metacharacters_are_literal() {
        assert!(SkillPattern::new("c++").unwrap().is_match("C++ expert"));
        assert!(SkillPattern::new("node.js").unwrap().is_match("Built with Node.js, React"));
        assert!(!SkillPattern::new("node.js").unwrap().is_match("nodexjs"));
        assert!(SkillPattern::new("(ml)").unwrap().is_match("machine learning (ML)"));
        assert!(!SkillPattern::new("c++").unwrap().is_match("c++x"));
    }

    #[test]
    fn test_finds_later_whole_word_after_rejected_candidate() {
        let pattern = SkillPattern::new("java").unwrap();
        let ranges: Vec<Range<usize>> = pattern.find_all("javascript and java").collect();

        assert_eq!(ranges, vec![15..19]);
    }

    #[test]
    fn test_all_occurrences() {
        let pattern = SkillPattern::new("sql").unwrap();
        let ranges: Vec<Range<usize>> = pattern.find_all("SQL, NoSQL and sql").collect();

        assert_eq!(ranges, vec![0..3, 15..18]);
    }

    #[test]
    fn test_unicode_word_characters() {
        let pattern = SkillPattern::new("café").unwrap();
        assert!(pattern.is_match("Ran a CAFÉ"));
        assert!(!pattern.is_match("cafés"));
    }
}
