//! Resume screener: skill extraction, scoring and highlighting for resumes

use anyhow::{anyhow, Context};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};
use resume_screener::cli::{self, Cli, Commands, ConfigAction, SkillSource};
use resume_screener::config::{Config, OutputFormat};
use resume_screener::input::document::ResumeDocument;
use resume_screener::input::manager::InputManager;
use resume_screener::input::text_extractor::is_extraction_error;
use resume_screener::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use resume_screener::output::report::ScreeningReport;
use resume_screener::processing::contacts::ContactExtractor;
use resume_screener::processing::highlighter::{Highlighter, Marker};
use resume_screener::processing::screener::Screener;
use resume_screener::processing::skill_extractor::SkillExtractor;
use resume_screener::processing::tagger::RuleBasedTagger;
use resume_screener::SkillSet;
use std::path::{Path, PathBuf};
use std::process;

type AppResult<T> = anyhow::Result<T>;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> AppResult<()> {
    match command {
        Commands::Extract { file } => {
            let mut input_manager = InputManager::new();
            let text = input_manager.extract_text(&file).await?;
            println!("{}", text);
        }

        Commands::Skills { file } => {
            let screener = build_screener(&config)?;
            let mut input_manager = InputManager::new();
            let text = input_manager.extract_text(&file).await?;
            let skills = screener.skill_extractor().extract_skills(&text);

            println!("🔤 {} skills found in {}\n", skills.len(), file.display());
            for skill in &skills {
                println!("  • {}", skill);
            }
        }

        Commands::Contacts { file } => {
            let mut input_manager = InputManager::new();
            let text = input_manager.extract_text(&file).await?;
            let contacts = ContactExtractor::new().extract(&text);

            println!("📧 Email: {}", contacts.email());
            println!("📞 Phone: {}", contacts.phone());
        }

        Commands::Score { resume, source } => {
            cli::validate_file_extension(&resume, cli::RESUME_EXTENSIONS)
                .map_err(|e| anyhow!("Resume file: {}", e))?;

            let screener = build_screener(&config)?;
            let mut input_manager = InputManager::new();
            let required = required_skills(&source, &screener, &mut input_manager).await?;
            let text = input_manager.extract_text(&resume).await?;
            let screened = screener.screen(&display_name(&resume), &text, &required)?;
            let result = screened.score;

            println!("📄 Resume: {}", resume.display());
            if let Some(error) = &screened.extraction_error {
                println!("⚠️  {}", error);
            }
            println!("📊 Score: {:.1}% ({}/{} skills)", result.percentage, result.matched_count(), result.total());
            println!("✅ Matched: {}", result.matched.join(", "));
            println!("❌ Missing: {}", result.missing.join(", "));
        }

        Commands::Highlight { resume, source, marker } => {
            cli::validate_file_extension(&resume, cli::RESUME_EXTENSIONS)
                .map_err(|e| anyhow!("Resume file: {}", e))?;

            let mut highlight_config = config.highlight.clone();
            if let Some(marker) = marker {
                highlight_config.marker = cli::parse_marker(&marker).map_err(|e| anyhow!(e))?;
            }

            let screener = build_screener(&config)?;
            let mut input_manager = InputManager::new();
            let required = required_skills(&source, &screener, &mut input_manager).await?;
            let text = input_manager.extract_text(&resume).await?;

            let highlighter = Highlighter::new(Marker::from_config(&highlight_config));
            println!("{}", highlighter.highlight(&text, &required)?);
        }

        Commands::Screen {
            paths,
            source,
            output,
            save,
            detailed,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(|e| anyhow!(e))?,
                None => config.output.format.clone(),
            };

            let screener = build_screener(&config)?;
            let mut input_manager = InputManager::new();
            let required = required_skills(&source, &screener, &mut input_manager).await?;
            if required.is_empty() {
                info!("No required skills given, every resume will score 0");
            }

            let files = collect_resume_files(&paths).await?;
            if files.is_empty() {
                return Err(anyhow!("No resumes found in the given paths"));
            }
            info!("Screening {} resumes against {} skills", files.len(), required.len());

            let progress = ProgressBar::new(files.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")?
                    .progress_chars("=> "),
            );

            let mut extracted = Vec::with_capacity(files.len());
            for file in &files {
                let name = display_name(file);
                progress.set_message(name.clone());
                extracted.push((name, input_manager.extract_text(file).await));
                progress.inc(1);
            }
            progress.finish_and_clear();

            let outcomes = screener.screen_batch(extracted, &required);
            let report = ScreeningReport::build(&required, outcomes, config.screening.pass_threshold);

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed,
                config.output.pretty_json,
                true,
                &config.highlight.html_style,
            );
            let rendered = generator.generate_report(&report, &output_format)?;

            match &save {
                Some(target) => {
                    // a directory gets a timestamped file named after the format
                    let path = if target.is_dir() {
                        target.join(suggest_filename(&output_format, true))
                    } else {
                        target.clone()
                    };
                    save_report_to_file(&rendered, &path)
                        .with_context(|| format!("Failed to save report to {}", path.display()))?;
                    println!("💾 Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }

            if output_format == OutputFormat::Console || save.is_some() {
                println!(
                    "🎯 {} of {} resumes shortlisted",
                    report.shortlisted().count(),
                    report.metadata.resumes_screened
                );
            }
        }

        Commands::Upload { files, dir } => {
            let target = dir.unwrap_or_else(|| config.storage.upload_dir.clone());

            for file in &files {
                let document = ResumeDocument::from_path(file)
                    .await
                    .with_context(|| format!("Failed to read {}", file.display()))?;
                let text = document
                    .extract_text()
                    .with_context(|| format!("{} is not a readable resume", file.display()))?;
                if is_extraction_error(&text) {
                    println!("⚠️  {}: {}", file.display(), text);
                }

                let stored = document.save_to(&target).await?;
                println!("📁 {} -> {}", file.display(), stored.display());
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("{}", toml::to_string_pretty(&config)?);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

fn build_screener(config: &Config) -> AppResult<Screener<RuleBasedTagger>> {
    let tagger = RuleBasedTagger::from_config(&config.language_model)
        .context("Failed to initialise the language model")?;
    debug!("Language model ready with {} lexicon entries", tagger.lexicon_size());
    let extractor =
        SkillExtractor::new(tagger).with_min_term_length(config.language_model.min_term_length);
    Ok(Screener::new(extractor))
}

async fn required_skills(
    source: &SkillSource,
    screener: &Screener<RuleBasedTagger>,
    input_manager: &mut InputManager,
) -> AppResult<SkillSet> {
    if let Some(list) = &source.skills {
        return Ok(SkillSet::parse_list(list));
    }

    let job = source
        .job
        .as_ref()
        .ok_or_else(|| anyhow!("Either --skills or --job is required"))?;
    cli::validate_file_extension(job, cli::JOB_EXTENSIONS)
        .map_err(|e| anyhow!("Job description file: {}", e))?;

    let text = input_manager
        .extract_text(job)
        .await
        .with_context(|| format!("Failed to read job description {}", job.display()))?;
    let skills = screener.required_skills_from(&text);
    info!("Extracted {} required skills from {}", skills.len(), job.display());
    Ok(skills)
}

/// Expand directories one level deep into the resume files they contain.
async fn collect_resume_files(paths: &[PathBuf]) -> AppResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut entries = tokio::fs::read_dir(path)
                .await
                .with_context(|| format!("Failed to read directory {}", path.display()))?;
            let mut found = Vec::new();
            while let Some(entry) = entries.next_entry().await? {
                let entry_path = entry.path();
                if entry_path.is_file()
                    && cli::validate_file_extension(&entry_path, cli::RESUME_EXTENSIONS).is_ok()
                {
                    found.push(entry_path);
                }
            }
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }

    Ok(files)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
