//! Skill vocabulary extraction from free text

use crate::processing::language_model::LanguageModel;
use crate::processing::skills::SkillSet;
use log::debug;

/// Derives candidate skills from text: every noun-phrase chunk plus every
/// noun and proper-noun token, lower-cased. No stop-word filtering, so the
/// result is deliberately permissive.
pub struct SkillExtractor<M: LanguageModel> {
    model: M,
    min_term_length: usize,
}

impl<M: LanguageModel> SkillExtractor<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            min_term_length: 2,
        }
    }

    pub fn with_min_term_length(mut self, min_term_length: usize) -> Self {
        self.min_term_length = min_term_length.max(1);
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn extract_skills(&self, text: &str) -> SkillSet {
        let mut skills = SkillSet::new();
        if text.trim().is_empty() {
            return skills;
        }

        let parsed = self.model.parse(text);

        for phrase in &parsed.noun_phrases {
            if self.long_enough(phrase) {
                skills.insert(phrase);
            }
        }

        for token in parsed.tokens.iter().filter(|t| t.pos.is_noun()) {
            if self.long_enough(&token.text) {
                skills.insert(&token.text);
            }
        }

        debug!(
            "Extracted {} skills from {} phrases and {} tokens",
            skills.len(),
            parsed.noun_phrases.len(),
            parsed.tokens.len()
        );
        skills
    }

    fn long_enough(&self, term: &str) -> bool {
        term.trim().chars().count() >= self.min_term_length
    }
}
