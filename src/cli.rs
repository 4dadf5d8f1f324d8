//! CLI interface for the resume screener

use crate::config::{MarkerStyle, OutputFormat};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Extensions accepted as resumes
pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt", "md"];

/// Extensions accepted as job descriptions
pub const JOB_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt", "md"];

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Resume screening against a list of required skills")]
#[command(long_about = "Extract text, contacts and skills from resumes, score them against required skills and highlight every match")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Where the required skills come from
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SkillSource {
    /// Comma separated list of required skills
    #[arg(short, long)]
    pub skills: Option<String>,

    /// Job description file to extract required skills from
    #[arg(short, long)]
    pub job: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the plain text of a document
    Extract {
        /// Path to the document (PDF, DOCX, TXT, MD)
        file: PathBuf,
    },

    /// Print the skills found in a document
    Skills {
        /// Path to the document
        file: PathBuf,
    },

    /// Print the email and phone number found in a resume
    Contacts {
        /// Path to the resume
        file: PathBuf,
    },

    /// Score a resume against required skills
    Score {
        /// Path to the resume
        #[arg(short, long)]
        resume: PathBuf,

        #[command(flatten)]
        source: SkillSource,
    },

    /// Print a resume with every required skill highlighted
    Highlight {
        /// Path to the resume
        #[arg(short, long)]
        resume: PathBuf,

        #[command(flatten)]
        source: SkillSource,

        /// Marker: html, markdown, ansi (defaults to the configured marker)
        #[arg(short, long)]
        marker: Option<String>,
    },

    /// Screen a batch of resumes and rank them by score
    Screen {
        /// Resume files or directories containing resumes
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        source: SkillSource,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Include highlighted resume text in the report
        #[arg(short, long)]
        detailed: bool,
    },

    /// Store resumes under unique names
    Upload {
        /// Resume files to store
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Target directory (defaults to the configured upload directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

/// Parse and validate highlight marker
pub fn parse_marker(marker: &str) -> Result<MarkerStyle, String> {
    match marker.to_lowercase().as_str() {
        "html" => Ok(MarkerStyle::Html),
        "markdown" | "md" => Ok(MarkerStyle::Markdown),
        "ansi" | "terminal" => Ok(MarkerStyle::Ansi),
        _ => Err(format!(
            "Invalid marker: {}. Supported: html, markdown, ansi",
            marker
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
