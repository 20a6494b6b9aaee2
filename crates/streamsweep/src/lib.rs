//! Command-line front end for the stream-mining sweep driver
//!
//! The sweep logic lives in `streamsweep_core`; this crate adds YAML
//! configuration files, CLI overrides, logging setup and the subcommand
//! handlers used by the `streamsweep` binary.

pub mod commands;
pub mod io;
pub mod logging;
pub mod settings;

pub use commands::PlanFormat;
pub use logging::init_logging;
pub use settings::{ConfigSource, Overrides, SettingsError};
