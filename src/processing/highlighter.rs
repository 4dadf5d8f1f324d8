//! Skill highlighting in resume text
//!
//! Matches are collected against the original text first and rendered once,
//! so inserted markup is never matched again and markers never nest.
//! Longer skills claim their spans before shorter ones.

use crate::config::{HighlightConfig, MarkerStyle};
use crate::error::Result;
use crate::processing::matcher::SkillPattern;
use crate::processing::skills::SkillSet;
use colored::Colorize;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Segment {
    Plain { text: String },
    Highlighted { text: String, skill: String },
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain { text } | Segment::Highlighted { text, .. } => text,
        }
    }

    pub fn is_highlighted(&self) -> bool {
        matches!(self, Segment::Highlighted { .. })
    }
}

/// Resume text split into plain and highlighted segments, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightedText {
    segments: Vec<Segment>,
}

impl HighlightedText {
    /// `text` as a single plain segment.
    pub fn unmarked(text: &str) -> Self {
        let segments = if text.is_empty() {
            Vec::new()
        } else {
            vec![Segment::Plain {
                text: text.to_string(),
            }]
        };
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn highlight_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_highlighted()).count()
    }

    /// The text without any markers; always equal to the input text.
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(Segment::text).collect()
    }

    pub fn render(&self, marker: &Marker) -> String {
        let mut output = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Plain { text } => output.push_str(text),
                Segment::Highlighted { text, .. } => output.push_str(&marker.wrap(text)),
            }
        }
        output
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// `<mark style='…'>text</mark>`
    Html { style: String },
    /// `**text**`
    Markdown,
    /// Terminal colours.
    Ansi,
}

impl Marker {
    pub fn from_config(config: &HighlightConfig) -> Self {
        match config.marker {
            MarkerStyle::Html => Marker::Html {
                style: config.html_style.clone(),
            },
            MarkerStyle::Markdown => Marker::Markdown,
            MarkerStyle::Ansi => Marker::Ansi,
        }
    }

    pub fn wrap(&self, text: &str) -> String {
        match self {
            Marker::Html { style } => format!("<mark style='{}'>{}</mark>", style, text),
            Marker::Markdown => format!("**{}**", text),
            Marker::Ansi => text.black().on_bright_red().bold().to_string(),
        }
    }
}

/// Locate every whole-word, case-insensitive occurrence of `skills` in
/// `text`. Where candidates overlap, the longer skill wins.
pub fn highlight(text: &str, skills: &SkillSet) -> Result<HighlightedText> {
    // accepted spans keyed by start offset: start -> (end, skill)
    let mut spans: BTreeMap<usize, (usize, &str)> = BTreeMap::new();

    for skill in skills.by_descending_length() {
        let pattern = SkillPattern::new(skill)?;
        for range in pattern.find_all(text) {
            if !overlaps_accepted(&spans, &range) {
                spans.insert(range.start, (range.end, skill));
            }
        }
    }

    let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0;
    for (start, (end, skill)) in spans {
        if start > cursor {
            segments.push(Segment::Plain {
                text: text[cursor..start].to_string(),
            });
        }
        segments.push(Segment::Highlighted {
            text: text[start..end].to_string(),
            skill: skill.to_string(),
        });
        cursor = end;
    }
    if cursor < text.len() {
        segments.push(Segment::Plain {
            text: text[cursor..].to_string(),
        });
    }

    let highlighted = HighlightedText { segments };
    debug!("Highlighted {} skill occurrences", highlighted.highlight_count());
    Ok(highlighted)
}

fn overlaps_accepted(spans: &BTreeMap<usize, (usize, &str)>, range: &Range<usize>) -> bool {
    // accepted spans are disjoint, so only the last one starting before
    // `range.end` can reach into it
    spans
        .range(..range.end)
        .next_back()
        .is_some_and(|(_, (end, _))| *end > range.start)
}

/// Applies a fixed marker to every highlight.
pub struct Highlighter {
    marker: Marker,
}

impl Highlighter {
    pub fn new(marker: Marker) -> Self {
        Self { marker }
    }

    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    pub fn highlight(&self, text: &str, skills: &SkillSet) -> Result<String> {
        Ok(highlight(text, skills)?.render(&self.marker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn skills(list: &[&str]) -> SkillSet {
        list.iter().collect()
    }

    #[test]
    fn test_longest_match_first() {
        let result = highlight(
            "machine learning engineer",
            &skills(&["machine learning", "learning"]),
        )
        .unwrap();

        assert_eq!(result.highlight_count(), 1);
        assert_eq!(
            result.render(&Marker::Markdown),
            "**machine learning** engineer"
        );
    }

    #[test]
    fn test_preserves_original_casing() {
        let result = highlight("Expert in PYTHON and Rust", &skills(&["python", "rust"])).unwrap();
        assert_eq!(result.render(&Marker::Markdown), "Expert in **PYTHON** and **Rust**");
    }

    #[test]
    fn test_stripping_markup_restores_text() {
        let text = "Senior Data Engineer: SQL, Spark, data pipelines & Spark-SQL.\nSQL again.";
        let set = skills(&["sql", "spark", "data", "data pipelines", "engineer", "&"]);
        let result = highlight(text, &set).unwrap();

        assert_eq!(result.plain_text(), text);

        let html = result.render(&Marker::Html {
            style: "color:red".to_string(),
        });
        let tags = Regex::new(r"<mark style='color:red'>|</mark>").unwrap();
        assert_eq!(tags.replace_all(&html, ""), text);
    }

    #[test]
    fn test_marker_text_is_not_rematched() {
        let marker = Marker::Html {
            style: "background:#fee2e2".to_string(),
        };
        let result = highlight("mark my words about style", &skills(&["mark", "style"])).unwrap();

        assert_eq!(
            result.render(&marker),
            "<mark style='background:#fee2e2'>mark</mark> my words about <mark style='background:#fee2e2'>style</mark>"
        );
    }

    #[test]
    fn test_no_skills_leaves_text_alone() {
        let result = highlight("nothing to see", &SkillSet::new()).unwrap();
        assert_eq!(result.highlight_count(), 0);
        assert_eq!(result.render(&Marker::Markdown), "nothing to see");
    }

    #[test]
    fn test_unmarked_text() {
        let text = HighlightedText::unmarked("Rust <b>");
        assert_eq!(text.highlight_count(), 0);
        assert_eq!(text.render(&Marker::Markdown), "Rust <b>");
        assert!(HighlightedText::unmarked("").segments().is_empty());
    }

    #[test]
    fn test_empty_text() {
        let result = highlight("", &skills(&["rust"])).unwrap();
        assert!(result.segments().is_empty());
    }

    #[test]
    fn test_highlighter_uses_configured_marker() {
        let config = HighlightConfig {
            marker: MarkerStyle::Markdown,
            html_style: String::new(),
        };
        let highlighter = Highlighter::new(Marker::from_config(&config));

        assert_eq!(
            highlighter.highlight("C++ and C#", &skills(&["c++", "c#"])).unwrap(),
            "**C++** and **C#**"
        );
    }
}
