use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use wizard::app::App;
use wizard::config::{Config, StepKind};
use wizard::logging;
use wizard::ui::keybindings::all_shortcuts_grouped;

#[derive(Parser)]
#[command(name = "wizard")]
#[command(about = "Multi-step wizard with an elapsed-time counter")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the configured steps
    Steps {
        /// Print the [wizard] table as TOML instead of a list
        #[arg(long)]
        toml: bool,
    },

    /// List keyboard shortcuts
    Keys,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    // Determine if we're running in TUI mode (no subcommand)
    let is_tui_mode = cli.command.is_none();

    // Initialize logging (file-based for TUI, stderr for CLI)
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Steps { toml }) => {
            cmd_steps(&config, toml)?;
        }
        Some(Commands::Keys) => {
            cmd_keys();
        }
        None => {
            run_tui(&config, logging_handle.log_file_path)?;
        }
    }

    Ok(())
}

fn run_tui(config: &Config, log_file_path: Option<PathBuf>) -> Result<()> {
    let mut app = App::new(config)?;
    let result = app.run();

    // Print log file path on exit if logs were written
    if let Some(log_path) = logging::written_log(log_file_path.as_deref()) {
        eprintln!("Session log: {}", log_path.display());
    }

    result
}

fn cmd_steps(config: &Config, as_toml: bool) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    if as_toml {
        print!("{}", config.wizard_toml()?);
        return Ok(());
    }

    println!("{} ({} steps)", config.wizard.heading, config.wizard.steps.len());
    println!("{}", "─".repeat(60));
    for (index, step) in config.wizard.steps.iter().enumerate() {
        let kind = match step.kind {
            StepKind::Text => "",
            StepKind::Summary => " [summary]",
        };
        println!("{:>3}. {}{}", index + 1, step.title, kind);
    }
    Ok(())
}

fn cmd_keys() {
    for (context, shortcuts) in all_shortcuts_grouped() {
        println!("{}:", context.display_name());
        for shortcut in shortcuts {
            println!("  {}  {}", shortcut.key_display_padded(), shortcut.description);
        }
        println!();
    }
}
