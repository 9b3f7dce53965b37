//! Glot - Instant Text Translation
//!
//! This is the main entry point for the glot command-line tool, which
//! translates text between a remote translation endpoint and a local
//! on-device engine, with language detection and persistent preferences.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Level, info};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use glot::cli::{Args, Commands, SettingsAction};
use glot::config::Config;
use glot::detect::{self, LanguageDetector};
use glot::error::GlotError;
use glot::live;
use glot::orchestrator::Orchestrator;
use glot::settings::{SettingsStore, TranslationMethod};
use glot::translate::local::TranslationEngine;
use glot::translate::ollama::OllamaEngine;
use glot::translate::remote;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.verbose)?;

    let config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            if std::path::Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };

    let store = match &args.settings {
        Some(path) => SettingsStore::new(path),
        None => SettingsStore::new(SettingsStore::default_location()),
    };

    match args.command {
        Commands::Translate {
            text,
            source,
            target,
            method,
        } => {
            let mut settings = store.get();
            if let Some(method) = method {
                settings.translation_method = method.parse::<TranslationMethod>()?;
            }

            let orchestrator = Orchestrator::new(&config, settings);

            let outcome = match (source, target) {
                (Some(source), Some(target)) => {
                    orchestrator.translate_pair(&text, &source, &target).await
                }
                (None, None) => orchestrator.translate(&text).await,
                _ => {
                    return Err(GlotError::Config(
                        "--source and --target must be given together".to_string(),
                    )
                    .into());
                }
            };

            if let Some(outcome) = outcome {
                println!("{}", outcome.render());
            }
        }
        Commands::Detect { text } => {
            let detector = detect::create_default();
            let mut results = detector.detect(&text)?;

            // Same ladder as translation: trust the statistical detector only
            // above the confidence threshold, then consult the script table
            let confident = results
                .first()
                .is_some_and(|top| top.confidence > detect::CONFIDENCE_THRESHOLD);
            if !confident {
                if let Ok(fallback) = detect::PatternDetector::new().detect(&text) {
                    if !fallback.is_empty() {
                        results = fallback;
                    }
                }
            }

            if results.is_empty() {
                println!("No language detected");
            }
            for detection in results {
                println!("{} ({:.2})", detection.language, detection.confidence);
            }
        }
        Commands::Live { debounce_ms } => {
            let settings = store.get();
            let orchestrator = Arc::new(Orchestrator::new(&config, settings));
            let quiet = Duration::from_millis(debounce_ms.unwrap_or(config.live.debounce_ms));

            live::run(orchestrator, quiet).await?;
        }
        Commands::Link {
            text,
            source,
            target,
        } => {
            println!(
                "{}",
                remote::fallback_url(&config.remote.fallback_host, &text, &source, &target)
            );
        }
        Commands::Languages => {
            let engine = OllamaEngine::new(config.local.clone());
            for code in engine.supported_languages() {
                println!("{}", code);
            }
        }
        Commands::Settings { action } => match action {
            SettingsAction::Show => {
                let settings = store.get();
                println!("translation_method: {}", method_name(settings.translation_method));
                println!("main_language: {}", settings.main_language);
                println!("secondary_language: {}", settings.secondary_language);
            }
            SettingsAction::Set {
                method,
                main,
                secondary,
            } => {
                let mut settings = store.get();
                if let Some(method) = method {
                    settings.translation_method = method.parse::<TranslationMethod>()?;
                }
                if let Some(main) = main {
                    settings.main_language = main;
                }
                if let Some(secondary) = secondary {
                    settings.secondary_language = secondary;
                }

                if store.set(&settings) {
                    println!("Settings saved successfully");
                } else {
                    println!("Failed to save settings");
                }
            }
            SettingsAction::Reset => {
                if store.reset() {
                    println!("Settings reset to defaults");
                } else {
                    println!("Failed to reset settings");
                }
            }
        },
    }

    Ok(())
}

fn method_name(method: TranslationMethod) -> &'static str {
    match method {
        TranslationMethod::Remote => "remote",
        TranslationMethod::Local => "local",
    }
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    let glot_dir = std::env::current_dir()?.join(".glot");
    let log_dir = glot_dir.join("log");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = rolling::daily(&log_dir, "glot.log");
    let (non_blocking_file, _guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(_guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer().with_target(false);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_ansi(false);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer);

    subscriber
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
