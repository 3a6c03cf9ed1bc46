#![forbid(unsafe_code)]
//! prdraft Command Line Interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use prdraft::commands::{
    execute_detect, execute_generate, execute_presets, execute_preview, execute_resolve,
    DetectOptions, GenerateOptions, PresetsOptions, PreviewOptions, ResolveCmdOptions,
};
use prdraft::config::CONFIG_FILE;
use prdraft::Config;

#[derive(Parser)]
#[command(name = "prdraft")]
#[command(about = "Pull request description templates from repo templates and domain presets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the template a repository resolves to
    Resolve {
        /// Repository root
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Preset to use when the repository has no template
        #[arg(short, long, env = "PRDRAFT_PRESET")]
        preset: Option<String>,

        /// Ignore committed pull request templates
        #[arg(long)]
        no_repo_template: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Detect the development domain of a repository
    Detect {
        /// Repository root
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Show per-domain scores
        #[arg(long)]
        scores: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List built-in presets, or show one
    Presets {
        /// Preset name
        name: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which sections would appear for a change-set
    Preview {
        /// Repository root
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Change-set JSON file
        #[arg(long)]
        changes: PathBuf,

        /// Preset to use when the repository has no template
        #[arg(short, long, env = "PRDRAFT_PRESET")]
        preset: Option<String>,

        /// Ignore committed pull request templates
        #[arg(long)]
        no_repo_template: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate the pull request description for a change-set
    Generate {
        /// Repository root
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Change-set JSON file
        #[arg(long)]
        changes: PathBuf,

        /// Preset to use when the repository has no template
        #[arg(short, long, env = "PRDRAFT_PRESET")]
        preset: Option<String>,

        /// Ignore committed pull request templates
        #[arg(long)]
        no_repo_template: bool,

        /// Section content override, NAME=TEXT (can specify multiple)
        #[arg(long = "set", value_name = "NAME=TEXT")]
        set: Vec<String>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", style("✗").red(), err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load_or_default(&cli.config)?;

    match cli.command {
        Commands::Resolve { root, preset, no_repo_template, json } => {
            let options = ResolveCmdOptions { root, preset, no_repo_template, json };
            execute_resolve(options, config)?;
        }

        Commands::Detect { root, scores, json } => {
            let options = DetectOptions { root, scores, json };
            execute_detect(options, config)?;
        }

        Commands::Presets { name, json } => {
            execute_presets(PresetsOptions { name, json })?;
        }

        Commands::Preview { root, changes, preset, no_repo_template, json } => {
            let options = PreviewOptions { root, changes, preset, no_repo_template, json };
            execute_preview(options, config)?;
        }

        Commands::Generate { root, changes, preset, no_repo_template, set } => {
            let options = GenerateOptions { root, changes, preset, no_repo_template, set };
            execute_generate(options, config)?;
        }
    }

    Ok(())
}
