use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Alternate definitions.json; the bundled registry when unset.
    pub definitions: Option<PathBuf>,
    pub uppercase_hex: bool,
    pub pretty: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            definitions: None,
            uppercase_hex: true,
            pretty: true,
        }
    }
}

impl CliConfig {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// File settings (if any) with command-line flags applied on top.
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(path) = &cli.definitions {
            config.definitions = Some(path.clone());
        }
        if cli.lowercase {
            config.uppercase_hex = false;
        }
        if cli.compact {
            config.pretty = false;
        }
        tracing::debug!(?config, "resolved configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = CliConfig::default();
        assert!(c.definitions.is_none());
        assert!(c.uppercase_hex);
        assert!(c.pretty);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = CliConfig::from_toml("pretty = false").unwrap();
        assert!(!c.pretty);
        assert!(c.uppercase_hex);
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(CliConfig::from_toml("colour = true").is_err());
    }

    #[test]
    fn flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "definitions = \"net.json\"\nuppercase_hex = true").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = Cli::try_parse_from(["xbc", "--config", &path, "--lowercase", "field", "Fee"]).unwrap();
        let c = CliConfig::resolve(&cli).unwrap();
        assert_eq!(c.definitions, Some(PathBuf::from("net.json")));
        assert!(!c.uppercase_hex);

        let cli = Cli::try_parse_from([
            "xbc", "--config", &path, "--definitions", "other.json", "field", "Fee",
        ])
        .unwrap();
        let c = CliConfig::resolve(&cli).unwrap();
        assert_eq!(c.definitions, Some(PathBuf::from("other.json")));
    }
}
