//! Flotsam generators
//!
//! The flotsam generator is responsible for pushing synthetic log lines at a
//! consumer, the variants of [`Server`]. Only one variant exists today, the
//! stdout emitter, but the dispatch shape leaves room for other sinks
//! without disturbing the configuration surface.

use serde::{Deserialize, Serialize};

use crate::signals::Shutdown;

pub mod stdout;

#[derive(thiserror::Error, Debug)]
/// Errors produced by [`Server`].
pub enum Error {
    /// See [`crate::generator::stdout::Error`] for details.
    #[error(transparent)]
    Stdout(#[from] stdout::Error),
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
#[serde(deny_unknown_fields)]
/// Configuration for [`Server`]
pub enum Config {
    /// See [`crate::generator::stdout::Config`] for details.
    Stdout(stdout::Config),
}

impl Default for Config {
    fn default() -> Self {
        Self::Stdout(stdout::Config::default())
    }
}

#[derive(Debug)]
/// The generator server.
///
/// All generator variants are a variant of this enum.
pub enum Server {
    /// See [`crate::generator::stdout::Stdout`] for details.
    Stdout(stdout::Stdout),
}

impl Server {
    /// Create a new [`Server`]
    ///
    /// # Errors
    ///
    /// Function will error if the underlying variant could not be created
    /// from its configuration.
    pub fn new(config: Config, shutdown: Shutdown) -> Result<Self, Error> {
        let server = match config {
            Config::Stdout(conf) => Self::Stdout(stdout::Stdout::new(&conf, shutdown)?),
        };
        Ok(server)
    }

    /// Run this [`Server`] to completion
    ///
    /// # Errors
    ///
    /// Function will error if the underlying variant errors at runtime.
    pub async fn spin(self) -> Result<(), Error> {
        match self {
            Self::Stdout(inner) => inner.spin().await?,
        }
        Ok(())
    }
}
