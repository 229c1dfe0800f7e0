use crate::config::Environment;
use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

pub const DEFAULT_VERSION_CONFIG_FILE: &str = "server_version.json";

/// A single layer of the configuration pipeline, parsed from the layer lists of the
/// root configuration file.
#[derive(Debug)]
enum ConfigLayer {
    Environment,
    File { path: PathBuf, optional: bool },
}

impl FromStr for ConfigLayer {
    type Err = ConfigError;

    fn from_str(layer: &str) -> Result<Self, Self::Err> {
        if layer == "environment" {
            return Ok(ConfigLayer::Environment);
        }

        let (path, optional) = if let Some(path) = layer.strip_prefix("file://") {
            (path, false)
        } else if let Some(path) = layer.strip_prefix("file?://") {
            (path, true)
        } else {
            return Err(ConfigError::FileParse {
                uri: Some(layer.to_owned()),
                cause: "Unsupported config layer".into(),
            });
        };

        if path.is_empty() {
            return Err(ConfigError::FileParse {
                uri: Some(layer.to_owned()),
                cause: "Missing file path".into(),
            });
        }
        Ok(ConfigLayer::File {
            path: PathBuf::from(path),
            optional,
        })
    }
}

/// Partial configuration required for early setup.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CoreConfig {
    pub stage: String,
    pub version: String,
    pub before_layers: Vec<String>,
    pub after_layers: Vec<String>,
    pub root_file: String,
}

impl CoreConfig {
    pub fn new(stage: &str, config_file: Option<PathBuf>) -> Result<Self, ConfigError> {
        log::info!("Loading configuration for {}", stage);

        let root_file = config_file.unwrap_or_else(|| PathBuf::from(format!("server_config.{}.json", stage)));
        let mut builder = Config::builder().add_source(File::from(root_file.as_path()));

        let version_path = Path::new(DEFAULT_VERSION_CONFIG_FILE);
        if version_path.exists() {
            builder = builder.add_source(File::from(version_path));
        } else {
            log::warn!("No version file found at {}", version_path.display());
            builder = builder.set_override("version", "custom")?;
        }

        builder = builder
            .set_override("stage", stage)?
            .set_override("rootFile", root_file.to_string_lossy().as_ref())?;

        let cfg: CoreConfig = builder.build()?.try_deserialize()?;
        log::debug!("pre-init configuration: {:#?}", cfg);
        Ok(cfg)
    }

    /// Assemble the layered configuration builder: `beforeLayers`, the root file, then
    /// `afterLayers`. Later layers win.
    pub fn create_config_builder(&self) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        log::debug!("Setting up configuration builder...");
        let mut builder = Config::builder();

        let mut layers = Vec::with_capacity(self.before_layers.len() + self.after_layers.len() + 1);
        for layer in &self.before_layers {
            layers.push(layer.parse::<ConfigLayer>()?);
        }
        layers.push(ConfigLayer::File {
            path: PathBuf::from(&self.root_file),
            optional: false,
        });
        for layer in &self.after_layers {
            layers.push(layer.parse::<ConfigLayer>()?);
        }

        for layer in layers {
            log::debug!("Adding layer: {:?}", layer);
            match layer {
                ConfigLayer::Environment => {
                    builder = builder.add_source(Environment::new());
                }
                ConfigLayer::File { path, optional } => {
                    if optional && !path.exists() {
                        log::info!("Skipping missing optional config file {}...", path.display());
                    } else {
                        builder = builder.add_source(File::from(path.as_path()));
                    }
                }
            }
        }

        // these properties cannot be altered by the layers
        builder = builder
            .set_override("stage", self.stage.clone())?
            .set_override("version", self.version.clone())?
            .set_override("rootFile", self.root_file.clone())?;

        Ok(builder)
    }
}
