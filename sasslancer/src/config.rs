use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};
use tracing_subscriber::filter::LevelFilter;

/// Limits and switches for a single parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserConfig {
    /// How deep expressions and parenthesized lists may nest.
    pub max_nesting_depth: usize,
    /// Whether `&` outside of any rule set is accepted with no parent.
    pub allow_orphan_parent_selector: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: 128,
            allow_orphan_parent_selector: true,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// One step more verbose per count, saturating at `Trace`.
    pub fn raised(self, steps: u8) -> Self {
        const ORDER: [LogLevel; 5] = [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ];
        let idx = ORDER.iter().position(|l| *l == self).unwrap_or(1);
        ORDER[(idx + steps as usize).min(ORDER.len() - 1)]
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub parser: ParserConfig,
    pub log_level: LogLevel,
}

impl Config {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        let value: Value = serde_json::from_str(&text)
            .with_context(|| format!("config file {} is not valid JSON", path.display()))?;
        let mut config = Self::default();
        config.update(&value)?;
        Ok(config)
    }

    pub fn update(&mut self, update: &Value) -> anyhow::Result<()> {
        if let Value::Object(update) = update {
            self.update_by_map(update)
        } else {
            bail!("got invalid configuration object {update}")
        }
    }

    /// Applies the keys present in `update`, leaving the others untouched.
    pub fn update_by_map(&mut self, update: &Map<String, Value>) -> anyhow::Result<()> {
        if let Some(parser) = update.get("parser") {
            let Value::Object(parser) = parser else {
                bail!("got invalid parser configuration {parser}");
            };
            if let Some(depth) = parser.get("maxNestingDepth") {
                self.parser.max_nesting_depth = usize::deserialize(depth)
                    .with_context(|| format!("invalid maxNestingDepth {depth}"))?;
            }
            if let Some(allow) = parser.get("allowOrphanParentSelector") {
                self.parser.allow_orphan_parent_selector = bool::deserialize(allow)
                    .with_context(|| format!("invalid allowOrphanParentSelector {allow}"))?;
            }
        }

        if let Some(level) = update.get("logLevel") {
            self.log_level = LogLevel::deserialize(level)
                .with_context(|| format!("invalid logLevel {level}"))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test_config {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.parser.max_nesting_depth, 128);
        assert!(config.parser.allow_orphan_parent_selector);
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn partial_update() {
        let mut config = Config::default();
        config
            .update(&json!({ "parser": { "maxNestingDepth": 16 }, "logLevel": "debug" }))
            .unwrap();
        assert_eq!(config.parser.max_nesting_depth, 16);
        assert!(config.parser.allow_orphan_parent_selector);
        assert_eq!(config.log_level, LogLevel::Debug);

        config
            .update(&json!({ "parser": { "allowOrphanParentSelector": false } }))
            .unwrap();
        assert_eq!(config.parser.max_nesting_depth, 16);
        assert!(!config.parser.allow_orphan_parent_selector);
    }

    #[test]
    fn rejects_invalid_updates() {
        let mut config = Config::default();
        assert!(config.update(&json!([1, 2])).is_err());
        assert!(config.update(&json!({ "parser": 3 })).is_err());
        assert!(config.update(&json!({ "logLevel": "loud" })).is_err());
        assert!(config
            .update(&json!({ "parser": { "maxNestingDepth": -1 } }))
            .is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn deserialize_camel_case() {
        let config: ParserConfig =
            serde_json::from_value(json!({ "allowOrphanParentSelector": false })).unwrap();
        assert_eq!(config.max_nesting_depth, 128);
        assert!(!config.allow_orphan_parent_selector);
    }

    #[test]
    fn raise_log_level() {
        assert_eq!(LogLevel::Warn.raised(0), LogLevel::Warn);
        assert_eq!(LogLevel::Warn.raised(2), LogLevel::Debug);
        assert_eq!(LogLevel::Warn.raised(9), LogLevel::Trace);
        assert_eq!(LogLevel::Info.to_string(), "info");
        assert_eq!(LevelFilter::from(LogLevel::Error), LevelFilter::ERROR);
    }
}
