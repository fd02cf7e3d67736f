use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::WizardError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub wizard: WizardConfig,
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Step definitions shown by the stepper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Heading rendered above the stepper
    #[serde(default = "default_heading")]
    pub heading: String,
    /// Ordered steps; fixed for the lifetime of the page
    pub steps: Vec<StepConfig>,
}

/// A single step definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepConfig {
    pub title: String,
    /// Body text (defaults to "Content for {title}")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default)]
    pub kind: StepKind,
}

impl StepConfig {
    pub fn text(title: &str) -> Self {
        Self {
            title: title.to_string(),
            body: None,
            kind: StepKind::Text,
        }
    }

    pub fn summary(title: &str) -> Self {
        Self {
            title: title.to_string(),
            body: None,
            kind: StepKind::Summary,
        }
    }
}

/// How a step's body is rendered
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Free text
    #[default]
    Text,
    /// Review of every step title before submission
    Summary,
}

/// Serializes a `WizardConfig` under its `[wizard]` section name
#[derive(Serialize)]
struct WizardTable<'a> {
    wizard: &'a WizardConfig,
}

fn default_heading() -> String {
    "Multi-Step Wizard".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Milliseconds between ticks; each tick counts as one elapsed second
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
}

fn default_tick_interval() -> u64 {
    1000
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long the event loop waits for input before draining timer ticks
    #[serde(default = "default_refresh_rate")]
    pub refresh_rate_ms: u64,
    /// Capture mouse clicks on controls
    #[serde(default = "default_mouse")]
    pub mouse: bool,
}

fn default_refresh_rate() -> u64 {
    100
}

fn default_mouse() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: default_refresh_rate(),
            mouse: default_mouse(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for session logs (defaults to the user's state or cache dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<String>,
}

impl Config {
    /// Path to the per-user config file
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wizard").join("config.toml"))
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so the wizard works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with WIZARD_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("WIZARD")
                .separator("__")
                .try_parsing(true),
        );

        let config: Config = builder
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), WizardError> {
        if self.wizard.steps.is_empty() {
            return Err(WizardError::NoSteps);
        }
        if let Some(index) = self
            .wizard
            .steps
            .iter()
            .position(|s| s.title.trim().is_empty())
        {
            return Err(WizardError::EmptyTitle { index });
        }
        if self.timer.tick_interval_ms == 0 {
            return Err(WizardError::ZeroTickInterval);
        }
        if self.ui.refresh_rate_ms == 0 {
            return Err(WizardError::ZeroRefreshRate);
        }
        Ok(())
    }

    /// Render the `[wizard]` section as TOML that `load` accepts back
    pub fn wizard_toml(&self) -> Result<String> {
        toml::to_string_pretty(&WizardTable {
            wizard: &self.wizard,
        })
        .context("Failed to serialize steps")
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.timer.tick_interval_ms)
    }

    pub fn refresh_rate(&self) -> Duration {
        Duration::from_millis(self.ui.refresh_rate_ms)
    }

    /// Get absolute path to logs directory
    pub fn logs_path(&self) -> PathBuf {
        if let Some(ref logs) = self.paths.logs {
            let path = PathBuf::from(logs);
            return if path.is_absolute() {
                path
            } else {
                std::env::current_dir().unwrap_or_default().join(path)
            };
        }

        dirs::state_dir()
            .or_else(dirs::cache_dir)
            .unwrap_or_else(std::env::temp_dir)
            .join("wizard")
            .join("logs")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wizard: WizardConfig {
                heading: default_heading(),
                steps: vec![
                    StepConfig::text("Step 1: Info"),
                    StepConfig::text("Step 2: Details"),
                    StepConfig::summary("Step 3: Confirmation"),
                ],
            },
            timer: TimerConfig::default(),
            ui: UiConfig::default(),
            logging: LoggingConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}
