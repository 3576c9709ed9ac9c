use anyhow::{Context, Result};
use tracing::Level;

use crate::AppInput;

pub const LOG_VAR: &str = "RXTEXT_LOG";
pub const INPUT_VAR: &str = "RXTEXT_INPUT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    /// Maximum level passed to the tracing subscriber
    pub log_level: Level,
    /// The input pushed once the view has loaded
    pub input: AppInput,
}

impl Default for DemoConfig {
    fn default() -> Self { Self { log_level: Level::INFO, input: AppInput::Key1 } }
}

impl DemoConfig {
    pub fn from_env() -> Result<Self> { Self::from_vars(|name| std::env::var(name).ok()) }

    /// Reads the configuration through `lookup`; unset variables keep their defaults
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where F: Fn(&str) -> Option<String> {
        let mut config = Self::default();
        if let Some(level) = lookup(LOG_VAR) {
            config.log_level = level.trim().parse().with_context(|| format!("invalid {LOG_VAR}: {level:?}"))?;
        }
        if let Some(input) = lookup(INPUT_VAR) {
            config.input = input.parse().with_context(|| format!("invalid {INPUT_VAR}"))?;
        }
        Ok(config)
    }
}
