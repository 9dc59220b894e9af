use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::Serialize;
use std::path::Path;

use super::{OutputFormat, Settings, smart_load};

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

const ENV_PREFIX: &str = "WORDTALLY_";

/// Values given on the command line; `None` leaves lower layers alone
#[derive(Debug, Clone, Default, Serialize)]
pub struct CliOverrides {
    pub chunking: ChunkingOverrides,
    pub workers: WorkerOverrides,
    pub output: OutputOverrides,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ChunkingOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_chunk_size: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkerOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OutputOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
}

pub struct TallyConfig {
    figment: Figment,
}

impl TallyConfig {
    pub fn load(custom_config: Option<&Path>, cli_overrides: Option<CliOverrides>) -> Result<Self> {
        tracing::trace!("CONFIG LOAD: Starting");

        let user_base = Self::user_config_base_path();

        let mut figment = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG))                  // 1. Defaults (lowest)
            .merge(Toml::file(format!("{user_base}.toml")))       // 2. User config
            .merge(Json::file(format!("{user_base}.json")))
            .merge(Yaml::file(format!("{user_base}.yaml")))
            .merge(Toml::file("wordtally.toml"))                  // 3. Repo config
            .merge(Json::file("wordtally.json"))
            .merge(Yaml::file("wordtally.yaml"))
            .merge(Yaml::file("wordtally.yml"));

        if let Some(path) = custom_config {                       // 4. Custom config
            if !path.exists() {
                tracing::warn!("Config file {} not found, ignoring", path.display());
            }
            figment = figment.merge(smart_load::auto(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__")); // 5. Environment

        if let Some(cli) = cli_overrides {                        // 6. CLI (highest)
            tracing::trace!("CONFIG LOAD: Applying CLI overrides {:?}", cli);
            figment = figment.merge(Serialized::defaults(cli));
        }

        Ok(TallyConfig { figment })
    }

    /// Typed view of the merged configuration
    pub fn settings(&self) -> Result<Settings> {
        self.figment
            .extract()
            .context("Invalid wordtally configuration")
    }

    /// Export configuration in specified format
    pub fn export_config(&self, format: ConfigFormat) -> Result<String> {
        let settings = self.settings()?;

        let output = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(&settings)?,
            ConfigFormat::Toml => toml::to_string_pretty(&settings)?,
        };

        Ok(output)
    }

    fn user_config_base_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{home}/.config/wordtally/config"),
            Err(_) => "~/.config/wordtally/config".to_string(),
        }
    }
}
