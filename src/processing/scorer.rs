//! Resume scoring against a required skill set

use crate::error::Result;
use crate::processing::matcher::SkillPattern;
use crate::processing::skills::SkillSet;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Share of required skills found in the text, 0..=100.
    pub percentage: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

impl ScoreResult {
    pub fn total(&self) -> usize {
        self.matched.len() + self.missing.len()
    }

    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    /// Score for a resume whose text could not be read: 0, all missing.
    pub fn unreadable(skills: &SkillSet) -> Self {
        Self {
            percentage: 0.0,
            matched: Vec::new(),
            missing: skills.iter().cloned().collect(),
        }
    }
}

/// Percentage of `skills` that occur in `text` as whole words, ignoring
/// case. A skill counts once however often it appears; an empty skill set
/// scores 0.
pub fn score(text: &str, skills: &SkillSet) -> Result<ScoreResult> {
    let mut matched = Vec::new();
    let mut missing = Vec::new();

    for skill in skills {
        if SkillPattern::new(skill)?.is_match(text) {
            matched.push(skill.clone());
        } else {
            missing.push(skill.clone());
        }
    }

    let percentage = if skills.is_empty() {
        0.0
    } else {
        100.0 * matched.len() as f64 / skills.len() as f64
    };

    debug!("Matched {}/{} skills ({:.1}%)", matched.len(), skills.len(), percentage);

    Ok(ScoreResult {
        percentage,
        matched,
        missing,
    })
}
