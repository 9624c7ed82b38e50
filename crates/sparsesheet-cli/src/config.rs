use std::env;

use anyhow::Context;

/// Interpreter configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// tracing filter directive (logs go to stderr)
    pub log_filter: String,
    /// Text written before each instruction is read
    pub prompt: String,
    /// Print the instruction menu after the welcome line
    pub show_menu: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            prompt: "Type instruction: ".to_string(),
            show_menu: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let log_filter = env::var("SPARSESHEET_LOG").unwrap_or(defaults.log_filter);
        let prompt = env::var("SPARSESHEET_PROMPT").unwrap_or(defaults.prompt);
        let show_menu = match env::var("SPARSESHEET_SHOW_MENU") {
            Ok(raw) => raw
                .trim()
                .parse::<bool>()
                .with_context(|| format!("SPARSESHEET_SHOW_MENU must be true or false, got {raw:?}"))?,
            Err(_) => defaults.show_menu,
        };

        Ok(Self {
            log_filter,
            prompt,
            show_menu,
        })
    }
}
