//! Resumable parameter-sweep driver for stream-mining experiments
//!
//! This crate enumerates (dataset x ensemble x imbalance ratio) combinations,
//! renders one external evaluation command per combination and runs them one
//! after another, skipping combinations whose result file already holds output.
//! It supports:
//! - Deterministic, contiguous partitioning of the dataset catalog across nodes
//! - ARFF instance counting to derive per-dataset report frequency and window
//! - Single-pass `{placeholder}` command templates
//! - Readable, collision-checked result file names
//! - Resume by result-file presence, with a pluggable `CommandRunner`
//!
//! # Example
//!
//! ```ignore
//! use streamsweep_core::{Preset, ShellRunner, SweepDriver};
//!
//! let config = Preset::Imbalanced.config().with_nodes(4, 2);
//! let mut driver = SweepDriver::new(config, ShellRunner::new(), std::io::stdout())?;
//! let summary = driver.run()?;
//! println!("{} runs, {} already done", summary.executed, summary.already_done);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod arff;
pub mod driver;
pub mod error;
pub mod partition;
pub mod plan;
pub mod runner;
pub mod template;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod dataset;
pub mod naming;
pub mod presets;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use arff::{InstanceCount, count_instances};
pub use config::SweepConfig;
pub use dataset::{DatasetSpec, RunParameters};
pub use driver::{SweepDriver, SweepSummary, is_completed};
pub use error::{ConfigError, PlanError, RunError, SweepError, TemplateError};
pub use partition::{NodeAssignment, divide};
pub use plan::{Combination, SkippedDataset, SweepPlan};
pub use presets::Preset;
pub use runner::{CommandRunner, RunOutcome, ShellRunner};
pub use template::{CommandTemplate, Placeholder, TemplateValues};
