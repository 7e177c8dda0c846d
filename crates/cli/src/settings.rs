//! Layered CLI settings.
//!
//! Precedence, lowest first: built-in defaults, the JSON settings file,
//! `SAFEWATCH_*` environment variables, then command-line flags (applied by
//! the caller). The settings file is also where `config set-base-address`
//! persists the backend address between runs.

use std::path::{Path, PathBuf};

use anyhow::Context;
use figment::providers::{Env, Format, Json, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use api_client::BaseAddress;

/// Prefix for environment overrides, e.g. `SAFEWATCH_BASE_ADDRESS`.
pub const ENV_PREFIX: &str = "SAFEWATCH_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_address: BaseAddress,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_address: BaseAddress::default(),
            log_level: "warn".to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl Settings {
    /// Loads settings, reading `path` if it exists.
    pub fn load(path: &Path) -> Result<Self, Box<figment::Error>> {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Json::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(Box::new)
    }
}

/// `<config dir>/safewatch/config.json`, when the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("safewatch").join("config.json"))
}

/// Writes `address` into the settings file, keeping every other key.
pub fn persist_base_address(path: &Path, address: &BaseAddress) -> anyhow::Result<()> {
    let mut document = match std::fs::read_to_string(path) {
        Ok(text) => serde_json::from_str::<Map<String, Value>>(&text)
            .with_context(|| format!("{} is not a JSON object", path.display()))?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
        Err(e) => return Err(e).with_context(|| format!("failed to read {}", path.display())),
    };
    document.insert(
        "base_address".to_string(),
        Value::String(address.to_string()),
    );

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let text = serde_json::to_string_pretty(&document)?;
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), base_address = %address, "base address saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_apply_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let settings = Settings::load(Path::new("missing.json")).map_err(|e| *e)?;
            assert_eq!(settings, Settings::default());
            assert_eq!(settings.base_address.to_string(), "http://localhost:8000");
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.json",
                r#"{"base_address": "files.example:8001", "log_format": "json"}"#,
            )?;
            let from_file = Settings::load(Path::new("config.json")).map_err(|e| *e)?;
            assert_eq!(from_file.base_address.to_string(), "http://files.example:8001");
            assert_eq!(from_file.log_format, LogFormat::Json);

            jail.set_env("SAFEWATCH_BASE_ADDRESS", "https://env.example");
            let from_env = Settings::load(Path::new("config.json")).map_err(|e| *e)?;
            assert_eq!(from_env.base_address.to_string(), "https://env.example");
            assert_eq!(from_env.log_format, LogFormat::Json);
            Ok(())
        });
    }

    #[test]
    fn invalid_address_in_file_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("config.json", r#"{"base_address": "ftp://nope"}"#)?;
            assert!(Settings::load(Path::new("config.json")).is_err());
            Ok(())
        });
    }

    #[test]
    fn persisting_keeps_other_keys_and_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let first = BaseAddress::parse("10.1.1.1:8000").unwrap();
        persist_base_address(&path, &first).unwrap();

        let mut doc: Map<String, Value> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        doc.insert("log_level".into(), Value::String("debug".into()));
        std::fs::write(&path, serde_json::to_string(&doc).unwrap()).unwrap();

        let second = BaseAddress::parse("https://prod.example").unwrap();
        persist_base_address(&path, &second).unwrap();

        let doc: Map<String, Value> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["base_address"], "https://prod.example");
        assert_eq!(doc["log_level"], "debug");
    }
}
