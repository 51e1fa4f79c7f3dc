//! This module controls configuration parsing from the end user, providing a
//! convenience mechanism for the rest of the program. Crashes are most
//! likely to originate from this code, intentionally.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::generator;

/// Errors produced by [`Config`]
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Error for a serde [`serde_yaml`].
    #[error("Failed to deserialize yaml: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),
    /// Error for IO operations when reading the config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Main configuration struct for this program
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// The generator to run.
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub generator: generator::Config,
}

impl Config {
    /// Load configuration from a YAML file on disk.
    ///
    /// An empty document yields the default configuration, which reproduces
    /// the stock demo stream: ten lines a second, a throughput report every
    /// ten seconds.
    ///
    /// # Errors
    ///
    /// Function will error if the file is unreadable or contains fields this
    /// program does not recognize.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    fn from_yaml(contents: &str) -> Result<Self, Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }
}
