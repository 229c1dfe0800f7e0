use crate::config::CoreConfig;
use anyhow::{anyhow, Error as AnyError};
use serde::de::DeserializeOwned;
use std::{fmt::Debug, path::PathBuf};

/// A named section of the application configuration owned by one feature.
pub trait FeatureConfig: Debug {
    const NAME: &'static str;
}

#[derive(Debug, Clone)]
pub struct AppConfig<F>
where
    F: FeatureConfig,
{
    pub core: CoreConfig,
    pub feature: F,
}

impl<F> AppConfig<F>
where
    F: FeatureConfig + DeserializeOwned,
{
    pub fn load(stage: &str, config_file: Option<PathBuf>) -> Result<Self, AnyError> {
        let pre_init = CoreConfig::new(stage, config_file)?;
        let config = pre_init.create_config_builder()?.build()?;

        let core: CoreConfig = config.clone().try_deserialize()?;
        let feature: F = config.get(F::NAME)?;
        let cfg = Self { core, feature };
        log::info!("Config loaded [{}]: {:#?}", cfg.core.root_file, cfg);

        if pre_init != cfg.core {
            Err(anyhow!("Core config mismatch"))
        } else {
            Ok(cfg)
        }
    }
}
