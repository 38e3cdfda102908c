//! Resume scanner: section-by-section resume scoring against a reference resume

use clap::Parser;
use log::{error, info};
use resume_scanner::cli::{self, Cli, Commands, ConfigAction};
use resume_scanner::config::Config;
use resume_scanner::error::{Result, ResumeScannerError};
use resume_scanner::input::InputManager;
use resume_scanner::output::{ReportGenerator, ScanReport};
use resume_scanner::processing::{Evaluator, ScanProfile};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Scan {
            resume,
            sample,
            output,
            detailed,
            save,
            strategy,
            exclude_absent,
            no_color,
        } => {
            let allowed = ["pdf", "txt", "md", "markdown"];
            cli::validate_file_extension(&resume, &allowed)
                .map_err(|e| ResumeScannerError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&sample, &allowed)
                .map_err(|e| ResumeScannerError::InvalidInput(format!("Sample file: {}", e)))?;

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeScannerError::InvalidInput)?,
                None => config.output.format,
            };
            if let Some(strategy) = strategy {
                config.scoring.strategy =
                    cli::parse_strategy(&strategy).map_err(ResumeScannerError::InvalidInput)?;
            }
            config.scoring.absent_categories =
                cli::absent_policy(exclude_absent, config.scoring.absent_categories);
            let detailed = detailed || config.output.detailed;
            let use_colors = config.output.color_output && !no_color && save.is_none();

            let profile = ScanProfile::from_config(&config)?;
            info!(
                "Scanning {} against {} ({:?}, {:?})",
                resume.display(),
                sample.display(),
                profile.strategy(),
                profile.absent_policy()
            );

            let started = Instant::now();

            let mut input_manager = InputManager::new();
            let resume_text = input_manager.extract_text(&resume).await?;
            let sample_text = input_manager.extract_text(&sample).await?;

            let evaluator = Evaluator::new(&profile);
            let evaluation = evaluator.analyze(&resume_text, &sample_text)?;

            let elapsed_ms = started.elapsed().as_millis() as u64;
            info!(
                "Overall score {:.1} computed in {}ms",
                evaluation.result.overall_score, elapsed_ms
            );

            let report = ScanReport::new(&evaluation, &resume, &sample, elapsed_ms);
            let generator = ReportGenerator::new(use_colors, detailed);
            let rendered = generator.generate(&report, output_format)?;

            match save {
                Some(path) => {
                    generator.save(&rendered, &path)?;
                    info!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    ResumeScannerError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("{}", content);
            }

            Some(ConfigAction::Path) => {
                let path = config_path.unwrap_or_else(Config::config_path);
                println!("{}", path.display());
            }

            Some(ConfigAction::Reset) => {
                let default_config = Config::default();
                match config_path {
                    Some(path) => default_config.save_to(&path)?,
                    None => default_config.save()?,
                }
                println!("Configuration reset to defaults");
            }
        },
    }

    Ok(())
}
