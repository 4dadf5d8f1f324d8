//! Screening report structures

use crate::processing::highlighter::HighlightedText;
use crate::processing::screener::ScreeningOutcome;
use crate::processing::skills::SkillSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Batch screening results, best score first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub metadata: ReportMetadata,

    /// Skills every resume was scored against
    pub required_skills: Vec<String>,

    /// Score at or above which a resume is shortlisted
    pub pass_threshold: f64,

    pub entries: Vec<ResumeEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    pub resumes_screened: usize,
    pub failures: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryStatus {
    Shortlisted,
    Rejected,
    Failed,
}

impl EntryStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EntryStatus::Shortlisted => "SHORTLISTED",
            EntryStatus::Rejected => "REJECTED",
            EntryStatus::Failed => "FAILED",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeEntry {
    pub name: String,
    pub status: EntryStatus,
    pub score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub email: String,
    pub phone: String,
    pub resume_skill_count: usize,

    /// Annotation for a PDF that could not be read
    pub extraction_error: Option<String>,

    /// Hard failure that stopped screening of this resume
    pub error: Option<String>,

    pub highlighted: Option<HighlightedText>,
}

impl ScreeningReport {
    /// Build a report from outcomes already in display order.
    pub fn build(required: &SkillSet, outcomes: Vec<ScreeningOutcome>, pass_threshold: f64) -> Self {
        let entries: Vec<ResumeEntry> = outcomes
            .into_iter()
            .map(|outcome| ResumeEntry::from_outcome(outcome, pass_threshold))
            .collect();
        let failures = entries
            .iter()
            .filter(|e| e.status == EntryStatus::Failed)
            .count();

        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                resumes_screened: entries.len(),
                failures,
            },
            required_skills: required.iter().cloned().collect(),
            pass_threshold,
            entries,
        }
    }

    pub fn shortlisted(&self) -> impl Iterator<Item = &ResumeEntry> {
        self.entries
            .iter()
            .filter(|e| e.status == EntryStatus::Shortlisted)
    }
}

impl ResumeEntry {
    fn from_outcome(outcome: ScreeningOutcome, pass_threshold: f64) -> Self {
        match outcome {
            ScreeningOutcome::Screened(result) => {
                let status = if result.extraction_error.is_none()
                    && result.score.percentage >= pass_threshold
                {
                    EntryStatus::Shortlisted
                } else {
                    EntryStatus::Rejected
                };

                Self {
                    name: result.name,
                    status,
                    score: result.score.percentage,
                    email: result.contacts.email().to_string(),
                    phone: result.contacts.phone().to_string(),
                    matched_skills: result.score.matched,
                    missing_skills: result.score.missing,
                    resume_skill_count: result.resume_skills.len(),
                    extraction_error: result.extraction_error,
                    error: None,
                    highlighted: Some(result.highlighted),
                }
            }
            ScreeningOutcome::Failed { name, error } => Self {
                name,
                status: EntryStatus::Failed,
                score: 0.0,
                matched_skills: Vec::new(),
                missing_skills: Vec::new(),
                email: crate::processing::contacts::NOT_FOUND.to_string(),
                phone: crate::processing::contacts::NOT_FOUND.to_string(),
                resume_skill_count: 0,
                extraction_error: None,
                error: Some(error),
                highlighted: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::screener::Screener;
    use crate::processing::skill_extractor::SkillExtractor;
    use crate::processing::tagger::RuleBasedTagger;

    #[test]
    fn test_build_report() {
        let screener = Screener::new(SkillExtractor::new(RuleBasedTagger::new()));
        let required = SkillSet::parse_list("rust, go");

        let strong = screener.screen("strong.pdf", "Rust and Go services", &required).unwrap();
        let weak = screener.screen("weak.pdf", "Rust only", &required).unwrap();
        let outcomes = vec![
            ScreeningOutcome::Screened(strong),
            ScreeningOutcome::Screened(weak),
            ScreeningOutcome::Failed {
                name: "broken.docx".to_string(),
                error: "DOCX extraction error".to_string(),
            },
        ];

        let report = ScreeningReport::build(&required, outcomes, 60.0);

        assert_eq!(report.metadata.resumes_screened, 3);
        assert_eq!(report.metadata.failures, 1);
        assert_eq!(report.required_skills, vec!["go", "rust"]);
        assert_eq!(report.entries[0].status, EntryStatus::Shortlisted);
        assert_eq!(report.entries[1].status, EntryStatus::Rejected);
        assert_eq!(report.entries[1].score, 50.0);
        assert_eq!(report.entries[2].status, EntryStatus::Failed);
        assert_eq!(report.entries[2].email, "Not found");
        assert_eq!(report.shortlisted().count(), 1);
    }

    #[test]
    fn test_unreadable_pdf_is_never_shortlisted() {
        let screener = Screener::new(SkillExtractor::new(RuleBasedTagger::new()));
        let required = SkillSet::new();
        let result = screener
            .screen("scan.pdf", "[Error reading PDF: bad xref]", &required)
            .unwrap();

        let report = ScreeningReport::build(&required, vec![ScreeningOutcome::Screened(result)], 0.0);

        assert_eq!(report.entries[0].status, EntryStatus::Rejected);
        assert!(report.entries[0].extraction_error.is_some());
    }
}
