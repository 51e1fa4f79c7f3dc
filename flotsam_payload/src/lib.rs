//! The flotsam payloads
//!
//! This library supports log line generation for the flotsam project. The
//! lines imitate the output of a small web application: mostly structured,
//! pipe-delimited records with a fixed field shape, interleaved with bare
//! message bodies.

#![deny(clippy::cargo)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::multiple_crate_versions)]

pub use app_log::{AppLog, Body, Config, Line, Severity};

pub mod app_log;
pub(crate) mod common;

/// Errors related to payload construction
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Generate instances of `Self::Output` from a source of randomness.
///
/// Generation itself is total; the fallible signature exists so that
/// implementations holding external resources may participate.
pub trait Generator<'a> {
    /// The generated type.
    type Output: 'a;
    /// The error variants of this generator.
    type Error: 'a;

    /// Generate a new instance of `Self::Output`.
    ///
    /// # Errors
    ///
    /// See documentation on the implementing type.
    fn generate<R>(&'a self, rng: &mut R) -> Result<Self::Output, Self::Error>
    where
        R: rand::Rng + ?Sized;
}
