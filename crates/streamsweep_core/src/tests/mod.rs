//! Scenario tests for the sweep driver
//!
//! Tests are organized by topic:
//! - `partitioning` - Partition size and coverage properties
//! - `resume` - Skipping finished combinations and rerunning empty ones
//! - `end_to_end` - Enumeration order and progress output over real ARFF files


use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RunError;
use crate::runner::{CommandRunner, RunOutcome};

/// Runner that records every command and writes a fake result into the
/// redirect target, standing in for the external tool.
#[derive(Debug, Default)]
pub(crate) struct RecordingRunner {
    pub commands: Vec<String>,
    pub exit_code: i32,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(exit_code: i32) -> Self {
        Self {
            commands: Vec::new(),
            exit_code,
        }
    }
}

/// Target of the trailing `> "..."` redirect. Test paths contain no escapes.
pub(crate) fn redirect_target(command: &str) -> Option<PathBuf> {
    let (_, target) = command.rsplit_once(" > ")?;
    Some(PathBuf::from(target.trim_matches('"')))
}

impl CommandRunner for RecordingRunner {
    fn execute(&mut self, command: &str) -> Result<RunOutcome, RunError> {
        self.commands.push(command.to_string());
        if let Some(target) = redirect_target(command) {
            fs::write(&target, format!("result of {}\n", self.commands.len()))
                .map_err(RunError::Spawn)?;
        }
        Ok(RunOutcome {
            exit_code: Some(self.exit_code),
        })
    }
}

/// Write a small ARFF file with `rows` data lines under `dir`.
pub(crate) fn write_arff(dir: &Path, name: &str, rows: usize) -> PathBuf {
    let mut content =
        String::from("@relation test\n@attribute x numeric\n@attribute class {a,b}\n\n@data\n");
    for i in 0..rows {
        content.push_str(&format!("{i},a\n"));
    }
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}
