//! Utilities and definitions for config handling

use crate::input_processing::InputProcessor;
use crate::render::RenderConfig;
use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized},
};
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[cfg(target_os = "windows")]
use directories_next::ProjectDirs;

/// The expected filename for the config file
const CFG_FILE_NAME: &str = "config.json5";

/// The prefix for environment variables that override config values.
///
/// Nested keys are separated with a double underscore, so `SNAKEDIFF_INPUT_PROCESSING__GRANULARITY`
/// sets `input-processing.granularity`.
pub const ENV_PREFIX: &str = "SNAKEDIFF_";

/// The config struct for the application
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Options for splitting documents into tokens before they are diffed
    pub input_processing: InputProcessor,

    /// Formatting options for display
    pub formatting: RenderConfig,
}

/// The possible errors that can arise when attempting to read a config
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("The file failed to deserialize")]
    DeserializationFailure(#[from] anyhow::Error),
    #[error("Failed to read the config file")]
    ReadFileFailure(#[from] io::Error),
    #[error("Unable to compute the default config file path")]
    NoDefault,
}

/// A figment provider that can parse JSON5.
struct Json5;

impl Format for Json5 {
    type Error = json5::Error;

    const NAME: &'static str = "JSON5";

    fn from_str<'de, T: serde::de::DeserializeOwned>(string: &'de str) -> Result<T, Self::Error> {
        json5::from_str(string)
    }
}

impl Config {
    /// Read a config from a given filepath, or fall back to the default file path.
    ///
    /// Values that the file leaves out take their defaults, and environment variables prefixed
    /// with [`ENV_PREFIX`] take precedence over the file.
    pub fn try_from_file<P: AsRef<Path>>(path: Option<&P>) -> Result<Self, ReadError> {
        let config_fp: PathBuf = match path {
            Some(path) => path.as_ref().into(),
            None => default_config_file_path().map_err(|_| ReadError::NoDefault)?,
        };
        info!("Reading config at {}", config_fp.to_string_lossy());
        let config_contents = fs::read_to_string(&config_fp)?;
        Self::figment(Some(&config_contents))
            .extract()
            .with_context(|| format!("Failed to parse config at {}", config_fp.to_string_lossy()))
            .map_err(ReadError::DeserializationFailure)
    }

    /// Build a config from the defaults and the environment alone.
    ///
    /// This is what applies when there is no config file to read.
    pub fn from_env() -> Result<Self, ReadError> {
        Self::figment(None)
            .extract()
            .context("Failed to read config overrides from the environment")
            .map_err(ReadError::DeserializationFailure)
    }

    /// The layered config sources: defaults, then the file contents if any, then the environment.
    fn figment(file_contents: Option<&str>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(contents) = file_contents {
            figment = figment.merge(Json5::string(contents));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).map(|key| {
            key.as_str()
                .replace("__", ".")
                .replace('_', "-")
                .into()
        }))
    }
}

/// Return the default location for the config file (for *nix, Linux and MacOS), this will use
/// $XDG_CONFIG/.config, where `$XDG_CONFIG` is `$HOME/.config` by default.
#[cfg(not(target_os = "windows"))]
fn default_config_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("snakediff");
    let file_path = xdg_dirs.place_config_file(CFG_FILE_NAME)?;
    Ok(file_path)
}

/// Return the default location for the config file (for windows), this will use the roaming
/// application data directory.
#[cfg(target_os = "windows")]
fn default_config_file_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("io", "snakediff", "snakediff")
        .context("Was not able to retrieve config path")?;
    let mut config_file: PathBuf = proj_dirs.config_dir().into();
    config_file.push(CFG_FILE_NAME);
    Ok(config_file)
}
