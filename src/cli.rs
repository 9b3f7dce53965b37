use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Settings file path (defaults to .glot/settings.toml)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate text once, direction inferred from the configured languages
    Translate {
        /// Text to translate
        text: String,

        /// Source language code (requires --target, skips direction inference)
        #[arg(short, long)]
        source: Option<String>,

        /// Target language code (requires --source, skips direction inference)
        #[arg(short, long)]
        target: Option<String>,

        /// Translation method override (remote or local)
        #[arg(short, long)]
        method: Option<String>,
    },

    /// Detect the language of the given text
    Detect {
        /// Text to analyze
        text: String,
    },

    /// Translate standard input line by line with debouncing
    Live {
        /// Quiet period in milliseconds (overrides the config file)
        #[arg(long)]
        debounce_ms: Option<u64>,
    },

    /// Print the web translator link for the given text
    Link {
        /// Text to link to
        text: String,

        /// Source language code
        source: String,

        /// Target language code
        target: String,
    },

    /// List language codes the local engine supports
    Languages,

    /// Manage user settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show current settings
    Show,

    /// Update one or more settings fields
    Set {
        /// Translation method (remote or local)
        #[arg(long)]
        method: Option<String>,

        /// Main language code
        #[arg(long)]
        main: Option<String>,

        /// Secondary language code
        #[arg(long)]
        secondary: Option<String>,
    },

    /// Restore default settings
    Reset,
}
