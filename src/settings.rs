use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

pub const DEFAULT_SOURCE_URL: &str =
    "https://defesacivil.rs.gov.br/defesa-civil-atualiza-balanco-das-enchentes-no-rs-22-5-18h-664f353266e07";
pub const DEFAULT_OBJECT_KEY: &str = "defesa_civil_data.csv";
const DEFAULT_STORE_DIR: &str = "data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    S3,
    Dir,
}

/// Runtime settings, read from the process environment (after `.env`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub source_url: String,
    pub bucket_name: Option<String>,
    pub object_key: String,
    pub scratch_path: PathBuf,
    pub log_store: StoreKind,
    pub log_store_dir: PathBuf,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_env(Environment::default())
    }

    fn from_env(env: Environment) -> Result<Self> {
        let scratch = std::env::temp_dir().join(DEFAULT_OBJECT_KEY);
        let settings = Config::builder()
            .set_default("source_url", DEFAULT_SOURCE_URL)?
            .set_default("object_key", DEFAULT_OBJECT_KEY)?
            .set_default("scratch_path", scratch.to_string_lossy().into_owned())?
            .set_default("log_store", "s3")?
            .set_default("log_store_dir", DEFAULT_STORE_DIR)?
            .add_source(env)
            .build()
            .context("Failed to read configuration")?;

        let settings: Settings = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.log_store == StoreKind::S3 && self.bucket().is_none() {
            bail!("bucket_name must be set when log_store = s3");
        }
        Ok(())
    }

    pub fn bucket(&self) -> Option<&str> {
        self.bucket_name.as_deref().filter(|b| !b.trim().is_empty())
    }
}

// ── Tests ──
