//! The flotsam demo log source.
//!
//! This library supports the flotsam binary found elsewhere in this project:
//! a generator that writes synthetic application log lines to standard
//! output at a fixed cadence, for feeding a log-collection pipeline in a
//! documentation example. The bits and pieces here are not intended to be
//! used outside of supporting flotsam, although if they are helpful in other
//! domains that's a nice surprise.

#![deny(clippy::all)]
#![deny(clippy::cargo)]
#![deny(clippy::pedantic)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
#![deny(clippy::dbg_macro)]
#![deny(unused_extern_crates)]
#![deny(unused_allocation)]
#![deny(unused_assignments)]
#![deny(unused_comparisons)]
#![deny(unreachable_pub)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod generator;
pub mod signals;
