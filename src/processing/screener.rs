//! Screening pipeline: text -> contacts, skills, score and highlights

use crate::error::Result;
use crate::input::text_extractor::is_extraction_error;
use crate::processing::contacts::{ContactExtractor, ContactInfo};
use crate::processing::highlighter::{highlight, HighlightedText};
use crate::processing::language_model::LanguageModel;
use crate::processing::scorer::{score, ScoreResult};
use crate::processing::skill_extractor::SkillExtractor;
use crate::processing::skills::SkillSet;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub name: String,
    pub contacts: ContactInfo,
    pub score: ScoreResult,
    pub resume_skills: SkillSet,
    pub highlighted: HighlightedText,
    /// Set when the text is the sentinel of a failed PDF extraction.
    pub extraction_error: Option<String>,
}

/// Outcome for one resume of a batch. A hard failure is recorded against
/// the resume instead of aborting the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScreeningOutcome {
    Screened(ScreeningResult),
    Failed { name: String, error: String },
}

impl ScreeningOutcome {
    pub fn name(&self) -> &str {
        match self {
            ScreeningOutcome::Screened(result) => &result.name,
            ScreeningOutcome::Failed { name, .. } => name,
        }
    }

    pub fn percentage(&self) -> Option<f64> {
        match self {
            ScreeningOutcome::Screened(result) => Some(result.score.percentage),
            ScreeningOutcome::Failed { .. } => None,
        }
    }
}

pub struct Screener<M: LanguageModel> {
    skill_extractor: SkillExtractor<M>,
    contact_extractor: ContactExtractor,
}

impl<M: LanguageModel> Screener<M> {
    pub fn new(skill_extractor: SkillExtractor<M>) -> Self {
        Self {
            skill_extractor,
            contact_extractor: ContactExtractor::new(),
        }
    }

    pub fn skill_extractor(&self) -> &SkillExtractor<M> {
        &self.skill_extractor
    }

    /// Required skills taken from a job description.
    pub fn required_skills_from(&self, job_description: &str) -> SkillSet {
        self.skill_extractor.extract_skills(job_description)
    }

    /// Screen one resume. Sentinel text from an unreadable PDF scores 0
    /// with every required skill missing, whatever the error message says.
    pub fn screen(&self, name: &str, text: &str, required: &SkillSet) -> Result<ScreeningResult> {
        if is_extraction_error(text) {
            warn!("{}: text extraction failed, scoring 0", name);
            return Ok(ScreeningResult {
                name: name.to_string(),
                contacts: ContactInfo::default(),
                score: ScoreResult::unreadable(required),
                resume_skills: SkillSet::new(),
                highlighted: HighlightedText::unmarked(text),
                extraction_error: Some(text.to_string()),
            });
        }

        let score = score(text, required)?;
        let highlighted = highlight(text, required)?;
        let contacts = self.contact_extractor.extract(text);
        let resume_skills = self.skill_extractor.extract_skills(text);

        info!(
            "{}: {:.1}% ({}/{} skills)",
            name,
            score.percentage,
            score.matched_count(),
            score.total()
        );

        Ok(ScreeningResult {
            name: name.to_string(),
            contacts,
            score,
            resume_skills,
            highlighted,
            extraction_error: None,
        })
    }

    /// Screen text that may have failed to extract. Any error is recorded
    /// against the resume.
    pub fn outcome(&self, name: &str, text: Result<String>, required: &SkillSet) -> ScreeningOutcome {
        match text.and_then(|text| self.screen(name, &text, required)) {
            Ok(result) => ScreeningOutcome::Screened(result),
            Err(e) => {
                warn!("{}: screening failed: {}", name, e);
                ScreeningOutcome::Failed {
                    name: name.to_string(),
                    error: e.to_string(),
                }
            }
        }
    }

    /// Screen `(name, extracted text)` pairs, keep going past failures,
    /// best score first.
    pub fn screen_batch<I>(&self, extracted: I, required: &SkillSet) -> Vec<ScreeningOutcome>
    where
        I: IntoIterator<Item = (String, Result<String>)>,
    {
        let mut outcomes: Vec<ScreeningOutcome> = extracted
            .into_iter()
            .map(|(name, text)| self.outcome(&name, text, required))
            .collect();
        rank(&mut outcomes);
        outcomes
    }
}

/// Highest score first, failures last; ties keep their input order.
pub fn rank(outcomes: &mut [ScreeningOutcome]) {
    outcomes.sort_by(|a, b| match (a.percentage(), b.percentage()) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScreenerError;
    use crate::input::document::ResumeDocument;
    use crate::processing::tagger::RuleBasedTagger;

    fn screener() -> Screener<RuleBasedTagger> {
        Screener::new(SkillExtractor::new(RuleBasedTagger::new()))
    }

    #[test]
    fn test_screen_resume_text() {
        let required = SkillSet::parse_list("python, sql, machine learning, kubernetes");
        let text = "Jane Roe\njane@roe.dev | +1 415 555 0100\nPython and SQL developer focused on machine learning.";

        let result = screener().screen("jane.pdf", text, &required).unwrap();

        assert_eq!(result.score.percentage, 75.0);
        assert_eq!(result.score.missing, vec!["kubernetes"]);
        assert_eq!(result.contacts.email(), "jane@roe.dev");
        assert_eq!(result.highlighted.highlight_count(), 3);
        assert!(result.resume_skills.contains("python"));
        assert!(result.extraction_error.is_none());
    }

    #[test]
    fn test_sentinel_text_is_annotated() {
        let required = SkillSet::parse_list("python");
        let text = "[Error reading PDF: unexpected end of file]";

        let result = screener().screen("broken.pdf", text, &required).unwrap();

        assert_eq!(result.score.percentage, 0.0);
        assert_eq!(result.extraction_error.as_deref(), Some(text));
    }

    #[test]
    fn test_sentinel_words_never_count_as_skills() {
        let required = SkillSet::parse_list("pdf, error");
        let text = "[Error reading PDF: invalid file header]";

        let result = screener().screen("x.pdf", text, &required).unwrap();

        assert_eq!(result.score.percentage, 0.0);
        assert!(result.score.matched.is_empty());
        assert_eq!(result.score.missing, vec!["error", "pdf"]);
        assert_eq!(result.highlighted.highlight_count(), 0);
        assert_eq!(result.highlighted.plain_text(), text);
        assert!(result.resume_skills.is_empty());
        assert!(result.extraction_error.is_some());
    }

    #[test]
    fn test_batch_survives_hard_failures() {
        let required = SkillSet::parse_list("python");
        let documents = vec![
            ResumeDocument::new("broken.docx", b"not a zip archive".to_vec()).unwrap(),
            ResumeDocument::new("scan.pdf", b"not a pdf".to_vec()).unwrap(),
        ];
        let extracted = documents
            .iter()
            .map(|d| (d.stored_name().to_string(), d.extract_text()));

        let outcomes = screener().screen_batch(extracted, &required);

        assert_eq!(outcomes.len(), 2);
        assert!(matches!(outcomes[0], ScreeningOutcome::Screened(_)));
        assert!(matches!(outcomes[1], ScreeningOutcome::Failed { .. }));
        assert!(outcomes[1].name().starts_with("broken_"));
    }

    #[test]
    fn test_batch_ranks_best_first() {
        let required = SkillSet::parse_list("rust, sql");
        let extracted = vec![
            ("weak.txt".to_string(), Ok("SQL only".to_string())),
            (
                "missing.txt".to_string(),
                Err(ScreenerError::InvalidInput("Cannot read missing.txt".to_string())),
            ),
            ("strong.txt".to_string(), Ok("Rust and SQL".to_string())),
        ];

        let outcomes = screener().screen_batch(extracted, &required);

        assert_eq!(outcomes[0].name(), "strong.txt");
        assert_eq!(outcomes[1].percentage(), Some(50.0));
        assert_eq!(outcomes[2].name(), "missing.txt");
        assert_eq!(outcomes[2].percentage(), None);
    }

    #[test]
    fn test_job_description_skills() {
        let required = screener().required_skills_from("We need a Rust engineer who knows Docker.");

        assert!(required.contains("rust"));
        assert!(required.contains("docker"));
    }
}
