use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use mhr_core::ValidationPolicy;
use mhr_model::{ArtifactPaths, DEFAULT_ENCODER_FILE, DEFAULT_MODEL_FILE, DEFAULT_SCALER_FILE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE: &str = "mhr.toml";
pub const DEFAULT_EXPORT_FILE: &str = "riwayat_prediksi.csv";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArtifactsConfig {
    /// Base directory; relative artifact paths resolve against it
    pub dir: PathBuf,
    pub model: PathBuf,
    pub scaler: PathBuf,
    pub encoder: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            model: PathBuf::from(DEFAULT_MODEL_FILE),
            scaler: PathBuf::from(DEFAULT_SCALER_FILE),
            encoder: PathBuf::from(DEFAULT_ENCODER_FILE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub file_name: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: PathBuf::from(DEFAULT_EXPORT_FILE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    pub zero_means_unfilled: bool,
}

impl Config {
    pub fn artifact_paths(&self) -> ArtifactPaths {
        let a = &self.artifacts;
        ArtifactPaths {
            model: a.dir.join(&a.model),
            scaler: a.dir.join(&a.scaler),
            encoder: a.dir.join(&a.encoder),
        }
    }

    pub fn policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            zero_means_unfilled: self.validation.zero_means_unfilled,
        }
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "artifacts in '{}', export to '{}'",
            self.artifacts.dir.display(),
            self.export.file_name.display()
        )
    }
}

pub fn parse_config(text: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(text)
}

/// Read `explicit` if given, else `mhr.toml` in `cwd` when present, else defaults
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let p = cwd.join(CONFIG_FILE);
            if !p.exists() {
                log::debug!("no {CONFIG_FILE} in '{}', using defaults", cwd.display());
                return Ok(Config::default());
            }
            p
        }
    };
    let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let config = parse_config(&text).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    log::info!("loaded config '{}': {config}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(
            config.artifact_paths(),
            ArtifactPaths::in_dir(".")
        );
        assert_eq!(config.export.file_name, PathBuf::from("riwayat_prediksi.csv"));
        assert!(!config.policy().zero_means_unfilled);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = parse_config(
            r#"
            [artifacts]
            dir = "models"
            model = "forest.json"

            [validation]
            zero_means_unfilled = true
            "#,
        )
        .unwrap();
        let paths = config.artifact_paths();
        assert_eq!(paths.model, Path::new("models").join("forest.json"));
        assert_eq!(paths.scaler, Path::new("models").join("scaler.json"));
        assert!(config.policy().zero_means_unfilled);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_config("[artifacts]\nmodle = \"x.json\"\n").is_err());
        assert!(parse_config("[server]\nport = 1\n").is_err());
    }

    #[test]
    fn serialized_config_parses_back() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        assert_eq!(parse_config(&text).unwrap(), config);
    }

    #[test]
    fn load_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(None, dir.path()).unwrap();
        assert_eq!(config, Config::default());

        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[export]\nfile_name = \"out.csv\"\n",
        )
        .unwrap();
        let config = load_config(None, dir.path()).unwrap();
        assert_eq!(config.export.file_name, PathBuf::from("out.csv"));

        let err = load_config(Some(&dir.path().join("missing.toml")), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
