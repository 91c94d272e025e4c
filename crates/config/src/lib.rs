//! Layered configuration.
//!
//! Values are merged from, in increasing priority: built-in defaults, an
//! optional TOML/YAML/JSON file, and environment variables prefixed with
//! `QUILL_` (nested keys separated by `__`, e.g. `QUILL_ARCHIVE__VIEW_ADULT`).

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use quill_query::{Address, DEFAULT_BASE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use url::Url;

pub const ENV_PREFIX: &str = "QUILL_";
const FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub archive: ArchiveConfig,
    pub comments: CommentsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Root address every archive page is resolved against.
    pub base_url: Url,
    /// Skip the adult-content interstitial on work pages.
    pub view_adult: bool,
}
impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE.clone(),
            view_adult: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    /// Splice replies deeper than the first level in beside the comments
    /// they answer, instead of nesting every level.
    pub flatten_replies: bool,
}

/// `config.toml` in the platform's configuration directory.
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "quill", "quill").map(|dirs| dirs.config_dir().join(FILE_NAME))
}

impl Config {
    /// Loads from the default file (when present) and the environment.
    #[instrument]
    pub fn load() -> Result<Self> {
        let file = default_path().filter(|path| path.is_file());
        Self::from_figment(Self::figment(file.as_deref())?)
    }

    /// Loads from an explicit file and the environment.
    #[instrument(skip(path), fields(file = %path.as_ref().display()))]
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
        }
        Self::from_figment(Self::figment(Some(path))?)
    }

    fn figment(file: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = file {
            debug!(path = %path.display(), "merging configuration file");
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => figment.merge(Toml::file(path)),
                Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
            };
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Extracts and validates a configuration from any figment.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment
            .extract()
            .or_raise(|| ErrorKind::Invalid("configuration could not be read".to_string()))?;
        config.address()?;
        Ok(config)
    }

    /// The page addressing this configuration describes.
    pub fn address(&self) -> Result<Address> {
        Address::new(self.archive.base_url.clone(), self.archive.view_adult)
            .map_err(|err| err.raise(ErrorKind::Invalid(format!("archive.base_url {}", self.archive.base_url))))
    }
}
