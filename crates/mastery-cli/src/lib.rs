//! # mastery-cli
//!
//! Glue between files and the posterior engine: a CSV record source, CSV and
//! JSON sinks, the `clap` command surface, and the command runners that
//! `main` dispatches to.

pub mod cli;
pub mod commands;
pub mod io;
