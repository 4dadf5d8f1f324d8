//! Skill sets: deduplicated, lowercase vocabularies to match against resumes

use serde::{Deserialize, Serialize};
use std::collections::btree_set;
use std::collections::BTreeSet;

/// A set of lowercase skill strings. Iteration is lexicographic, which keeps
/// every downstream step deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SkillSet {
    skills: BTreeSet<String>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a user supplied list separated by commas, semicolons or newlines.
    pub fn parse_list(list: &str) -> Self {
        list.split(|c: char| c == ',' || c == ';' || c == '\n').collect()
    }

    /// Trims and lower-cases `skill`. Returns false for blanks and duplicates.
    pub fn insert(&mut self, skill: &str) -> bool {
        let normalized = skill.trim().to_lowercase();
        if normalized.is_empty() {
            return false;
        }
        self.skills.insert(normalized)
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.contains(&skill.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.skills.iter()
    }

    /// Skills ordered longest first (in characters); equal lengths keep
    /// lexicographic order.
    pub fn by_descending_length(&self) -> Vec<&str> {
        let mut ordered: Vec<&str> = self.skills.iter().map(String::as_str).collect();
        ordered.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
        ordered
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for skill in iter {
            set.insert(skill.as_ref());
        }
        set
    }
}

impl<'a> IntoIterator for &'a SkillSet {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.skills.iter()
    }
}

impl From<Vec<String>> for SkillSet {
    fn from(skills: Vec<String>) -> Self {
        skills.into_iter().collect()
    }
}

impl From<SkillSet> for Vec<String> {
    fn from(set: SkillSet) -> Self {
        set.skills.into_iter().collect()
    }
}
