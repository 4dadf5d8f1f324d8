//! Output formatters for screening reports

use crate::config::OutputFormat;
use crate::error::{Result, ScreenerError};
use crate::output::report::*;
use crate::processing::highlighter::{HighlightedText, Marker};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting screening reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colours and optional highlighted resume text
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for integration with other tools
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter; highlights become bold text
pub struct MarkdownFormatter {
    include_text: bool,
}

/// Standalone HTML page with `<mark>` highlights
pub struct HtmlFormatter {
    include_styles: bool,
    mark_style: String,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Screening Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 960px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .entry {
            background: white;
            padding: 20px 30px;
            margin: 20px 0;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .status {
            display: inline-block;
            padding: 4px 12px;
            border-radius: 20px;
            font-weight: bold;
            color: white;
            margin-left: 10px;
        }
        .status-shortlisted { background: #28a745; }
        .status-rejected { background: #6c757d; }
        .status-failed { background: #dc3545; }
        .error { color: #dc3545; font-style: italic; }
        .resume-text {
            white-space: pre-wrap;
            background: #f8f9fa;
            padding: 15px;
            border-radius: 6px;
            font-size: 0.9em;
        }
        .metadata { color: #6c757d; font-size: 0.85em; }
    </style>
    {% endif %}
</head>
<body>
    <h1>Resume Screening Report</h1>
    <p class="metadata">Generated {{ generated_at }} by Resume Screener v{{ version }}</p>
    <p><strong>Required skills ({{ required_count }}):</strong> {{ required_skills }}</p>
    <p><strong>Pass threshold:</strong> {{ pass_threshold }}% | <strong>Screened:</strong> {{ screened }} | <strong>Shortlisted:</strong> {{ shortlisted }} | <strong>Failed:</strong> {{ failures }}</p>

    {% for entry in entries %}
    <div class="entry">
        <h2>{{ entry.name }} <span class="status {{ entry.status_class }}">{{ entry.status }}</span></h2>
        <p><strong>Score:</strong> {{ entry.score }}%</p>
        <p><strong>Email:</strong> {{ entry.email }} | <strong>Phone:</strong> {{ entry.phone }}</p>
        {% if entry.has_error %}
        <p class="error">{{ entry.error }}</p>
        {% endif %}
        <p><strong>Matched:</strong> {{ entry.matched }}</p>
        <p><strong>Missing:</strong> {{ entry.missing }}</p>
        {% if entry.has_text %}
        <div class="resume-text">{% for segment in entry.segments %}{% if segment.highlighted %}<mark style="{{ mark_style }}">{{ segment.text }}</mark>{% else %}{{ segment.text }}{% endif %}{% endfor %}</div>
        {% endif %}
    </div>
    {% endfor %}
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    version: String,
    required_count: usize,
    required_skills: String,
    pass_threshold: String,
    screened: usize,
    shortlisted: usize,
    failures: usize,
    mark_style: String,
    entries: Vec<HtmlEntry>,
}

struct HtmlEntry {
    name: String,
    status: String,
    status_class: String,
    score: String,
    email: String,
    phone: String,
    has_error: bool,
    error: String,
    matched: String,
    missing: String,
    has_text: bool,
    segments: Vec<HtmlSegment>,
}

struct HtmlSegment {
    text: String,
    highlighted: bool,
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

fn entry_error(entry: &ResumeEntry) -> Option<&str> {
    entry.error.as_deref().or(entry.extraction_error.as_deref())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_status_badge(&self, status: EntryStatus) -> String {
        let color = match status {
            EntryStatus::Shortlisted => Color::Green,
            EntryStatus::Rejected => Color::Yellow,
            EntryStatus::Failed => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", status.label().color(color).bold())
        } else {
            format!("[{}]", status.label())
        }
    }

    fn format_highlighted(&self, text: &HighlightedText) -> String {
        let marker = if self.use_colors {
            Marker::Ansi
        } else {
            Marker::Markdown
        };
        text.render(&marker)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📊 RESUME SCREENING REPORT", 1));
        output.push_str(&format!(
            "Generated: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str(&format!(
            "Required skills ({}): {}\n",
            report.required_skills.len(),
            join_or_dash(&report.required_skills)
        ));
        output.push_str(&format!(
            "Pass threshold: {:.1}% | Screened: {} | Shortlisted: {} | Failed: {}\n",
            report.pass_threshold,
            report.metadata.resumes_screened,
            report.shortlisted().count(),
            report.metadata.failures
        ));

        for (i, entry) in report.entries.iter().enumerate() {
            output.push_str(&self.format_header(&format!("{}. {}", i + 1, entry.name), 2));
            output.push_str(&format!(
                "Score: {:.1}% {}\n",
                entry.score,
                self.format_status_badge(entry.status)
            ));

            if let Some(error) = entry_error(entry) {
                output.push_str(&format!("⚠️  {}\n", self.colorize(error, Color::Red)));
            }

            if entry.status == EntryStatus::Failed {
                continue;
            }

            output.push_str(&format!("📧 {}  📞 {}\n", entry.email, entry.phone));
            output.push_str(&format!(
                "✅ Matched: {}\n",
                self.colorize(&join_or_dash(&entry.matched_skills), Color::Green)
            ));
            output.push_str(&format!(
                "❌ Missing: {}\n",
                self.colorize(&join_or_dash(&entry.missing_skills), Color::Yellow)
            ));

            if self.detailed {
                output.push_str(&format!("🔤 Skills found in resume: {}\n", entry.resume_skill_count));
                if let Some(text) = &entry.highlighted {
                    output.push_str(&self.format_header("Highlighted resume", 3));
                    output.push_str(&self.format_highlighted(text));
                    output.push('\n');
                }
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_text: bool) -> Self {
        Self { include_text }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Resume Screening Report\n\n");
        output.push_str(&format!(
            "*Generated {} by Resume Screener v{}*\n\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.tool_version
        ));
        output.push_str(&format!(
            "**Required skills:** {}\n\n",
            join_or_dash(&report.required_skills)
        ));

        output.push_str("| # | Resume | Score | Status | Email | Phone |\n");
        output.push_str("|---|--------|-------|--------|-------|-------|\n");
        for (i, entry) in report.entries.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | {:.1}% | {} | {} | {} |\n",
                i + 1,
                entry.name,
                entry.score,
                entry.status.label(),
                entry.email,
                entry.phone
            ));
        }

        for entry in &report.entries {
            output.push_str(&format!("\n## {}\n\n", entry.name));
            if let Some(error) = entry_error(entry) {
                output.push_str(&format!("> ⚠️ {}\n\n", error));
            }
            output.push_str(&format!("- **Matched:** {}\n", join_or_dash(&entry.matched_skills)));
            output.push_str(&format!("- **Missing:** {}\n", join_or_dash(&entry.missing_skills)));

            if self.include_text {
                if let Some(text) = &entry.highlighted {
                    output.push_str("\n```text\n");
                    output.push_str(&text.plain_text());
                    output.push_str("\n```\n\n");
                    output.push_str(&text.render(&Marker::Markdown));
                    output.push('\n');
                }
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool, mark_style: &str) -> Self {
        Self {
            include_styles,
            mark_style: mark_style.to_string(),
        }
    }

    fn entry_view(entry: &ResumeEntry) -> HtmlEntry {
        let status_class = match entry.status {
            EntryStatus::Shortlisted => "status-shortlisted",
            EntryStatus::Rejected => "status-rejected",
            EntryStatus::Failed => "status-failed",
        };

        let segments = entry
            .highlighted
            .as_ref()
            .map(|text| {
                text.segments()
                    .iter()
                    .map(|segment| HtmlSegment {
                        text: segment.text().to_string(),
                        highlighted: segment.is_highlighted(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        HtmlEntry {
            name: entry.name.clone(),
            status: entry.status.label().to_string(),
            status_class: status_class.to_string(),
            score: format!("{:.1}", entry.score),
            email: entry.email.clone(),
            phone: entry.phone.clone(),
            has_error: entry_error(entry).is_some(),
            error: entry_error(entry).unwrap_or_default().to_string(),
            matched: join_or_dash(&entry.matched_skills),
            missing: join_or_dash(&entry.missing_skills),
            has_text: entry.highlighted.is_some(),
            segments,
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let template = HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: report
                .metadata
                .generated_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            version: report.metadata.tool_version.clone(),
            required_count: report.required_skills.len(),
            required_skills: join_or_dash(&report.required_skills),
            pass_threshold: format!("{:.1}", report.pass_threshold),
            screened: report.metadata.resumes_screened,
            shortlisted: report.shortlisted().count(),
            failures: report.metadata.failures,
            mark_style: self.mark_style.clone(),
            entries: report.entries.iter().map(Self::entry_view).collect(),
        };

        template
            .render()
            .map_err(|e| ScreenerError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new(mark_style: &str) -> Self {
        Self::with_options(true, false, true, true, mark_style)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_html_styles: bool,
        mark_style: &str,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(detailed),
            html_formatter: HtmlFormatter::new(include_html_styles, mark_style),
        }
    }

    pub fn generate_report(&self, report: &ScreeningReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, timestamp: bool) -> String {
    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("screening{}.txt", timestamp_suffix),
        OutputFormat::Json => format!("screening{}.json", timestamp_suffix),
        OutputFormat::Markdown => format!("screening{}.md", timestamp_suffix),
        OutputFormat::Html => format!("screening{}.html", timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::screener::{Screener, ScreeningOutcome};
    use crate::processing::skill_extractor::SkillExtractor;
    use crate::processing::skills::SkillSet;
    use crate::processing::tagger::RuleBasedTagger;

    fn sample_report() -> ScreeningReport {
        let screener = Screener::new(SkillExtractor::new(RuleBasedTagger::new()));
        let required = SkillSet::parse_list("rust, sql");
        let result = screener
            .screen("jane.pdf", "Rust <dev> & SQL, jane@roe.dev", &required)
            .unwrap();
        let outcomes = vec![
            ScreeningOutcome::Screened(result),
            ScreeningOutcome::Failed {
                name: "broken.docx".to_string(),
                error: "DOCX extraction error: bad zip".to_string(),
            },
        ];
        ScreeningReport::build(&required, outcomes, 50.0)
    }

    #[test]
    fn test_console_without_colors() {
        let report = sample_report();
        let output = ConsoleFormatter::new(false, true).format_report(&report).unwrap();

        assert!(output.contains("RESUME SCREENING REPORT"));
        assert!(output.contains("1. jane.pdf"));
        assert!(output.contains("Score: 100.0% [SHORTLISTED]"));
        assert!(output.contains("[FAILED]"));
        assert!(output.contains("DOCX extraction error: bad zip"));
        assert!(output.contains("**Rust** <dev> & **SQL**"));
    }

    #[test]
    fn test_json_round_trip() {
        let report = sample_report();
        let json = JsonFormatter::new(false).format_report(&report).unwrap();
        let parsed: ScreeningReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.entries.len(), 2);
        assert_eq!(parsed.entries[0].email, "jane@roe.dev");
        assert_eq!(parsed.entries[1].status, EntryStatus::Failed);
    }

    #[test]
    fn test_markdown_table() {
        let report = sample_report();
        let output = MarkdownFormatter::new(true).format_report(&report).unwrap();

        assert!(output.contains("| 1 | jane.pdf | 100.0% | SHORTLISTED | jane@roe.dev | Not found |"));
        assert!(output.contains("**Rust** <dev> & **SQL**"));
    }

    #[test]
    fn test_html_escapes_resume_text() {
        let report = sample_report();
        let output = HtmlFormatter::new(false, "background:#fee2e2")
            .format_report(&report)
            .unwrap();

        assert!(output.contains("<mark style=\"background:#fee2e2\">Rust</mark>"));
        assert!(output.contains("&lt;dev&gt;"));
        assert!(!output.contains("<dev>"));
        assert!(output.contains("status-failed"));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(&OutputFormat::Html, false), "screening.html");
        assert!(suggest_filename(&OutputFormat::Json, true).starts_with("screening_"));
    }
}
