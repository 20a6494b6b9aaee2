//! Resume-aware sweep execution.
//!
//! The driver walks a `SweepPlan` in order. A combination whose result file
//! already exists with content is skipped; anything else is run through the
//! `CommandRunner` with stdout redirected into its result file. The results
//! directory is the only state: rerunning the same node picks up where the
//! previous run stopped.
//!
//! Progress lines go to the driver's output writer and are flushed after every
//! iteration banner so they show up promptly when stdout is redirected.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::config::SweepConfig;
use crate::error::{RunError, SweepError};
use crate::plan::{Combination, SweepPlan};
use crate::runner::CommandRunner;

/// Whether a result file marks its combination as finished.
///
/// An empty file means a run started but produced nothing, so it does not count.
pub fn is_completed(result_path: &Path) -> bool {
    fs::metadata(result_path)
        .map(|meta| meta.is_file() && meta.len() > 0)
        .unwrap_or(false)
}

/// Quote `path` for use inside a POSIX shell command line.
fn shell_quote(path: &Path) -> String {
    let raw = path.display().to_string();
    let mut quoted = String::with_capacity(raw.len() + 2);
    quoted.push('"');
    for c in raw.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// `command` with stdout redirected into `result_path`.
pub fn with_redirect(command: &str, result_path: &Path) -> String {
    format!("{command} > {}", shell_quote(result_path))
}

/// Counts from one pass over a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    /// Nominal combination count for this node
    pub total: usize,
    /// Commands handed to the runner
    pub executed: usize,
    /// Combinations skipped because their result already existed
    pub already_done: usize,
    /// Executed commands that exited non-zero or by signal
    pub nonzero_exit: usize,
    /// Commands the runner could not start
    pub launch_failures: usize,
    /// Datasets skipped before enumeration
    pub skipped_datasets: usize,
}

/// Runs one node's share of a sweep.
pub struct SweepDriver<R, W> {
    config: SweepConfig,
    runner: R,
    out: W,
}

impl<R: CommandRunner, W: Write> SweepDriver<R, W> {
    /// Validates `config`; an out-of-range node index fails here.
    pub fn new(config: SweepConfig, runner: R, out: W) -> Result<Self, SweepError> {
        config.validate()?;
        Ok(Self {
            config,
            runner,
            out,
        })
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Consume the driver, returning the runner and output writer.
    pub fn into_parts(self) -> (R, W) {
        (self.runner, self.out)
    }

    /// Build this node's plan and execute it.
    pub fn run(&mut self) -> Result<SweepSummary, SweepError> {
        let plan = SweepPlan::build(&self.config)?;
        tracing::info!(
            node = self.config.nodes.index,
            nodes = self.config.nodes.total,
            combinations = plan.len(),
            total = plan.total,
            "Starting sweep"
        );

        let mut summary = self.execute_plan(&plan)?;
        summary.skipped_datasets = plan.skipped.len();

        tracing::info!(
            executed = summary.executed,
            already_done = summary.already_done,
            nonzero_exit = summary.nonzero_exit,
            launch_failures = summary.launch_failures,
            skipped_datasets = summary.skipped_datasets,
            "Sweep finished"
        );
        Ok(summary)
    }

    /// Execute an already built plan.
    pub fn execute_plan(&mut self, plan: &SweepPlan) -> Result<SweepSummary, RunError> {
        let results_dir = &self.config.results_dir;
        fs::create_dir_all(results_dir).map_err(|source| RunError::ResultsDir {
            path: results_dir.clone(),
            source,
        })?;

        let mut summary = SweepSummary {
            total: plan.total,
            ..Default::default()
        };
        for combination in &plan.combinations {
            self.execute_one(combination, plan.total, &mut summary)?;
        }
        Ok(summary)
    }

    fn execute_one(
        &mut self,
        combination: &Combination,
        total: usize,
        summary: &mut SweepSummary,
    ) -> Result<(), RunError> {
        write!(
            self.out,
            "\n\n##### ITERATION {} OF {}\n\n\n",
            combination.iteration, total
        )
        .map_err(RunError::Output)?;
        self.out.flush().map_err(RunError::Output)?;
        writeln!(self.out, "{}", combination.command).map_err(RunError::Output)?;

        let result_path = &combination.result_path;
        if is_completed(result_path) {
            writeln!(self.out, "Experiment already done. Moving to next one.")
                .map_err(RunError::Output)?;
            tracing::debug!(result = %result_path.display(), "Result exists, skipping");
            summary.already_done += 1;
            return Ok(());
        }

        let command = with_redirect(&combination.command, result_path);
        let started = jiff::Timestamp::now();
        match self.runner.execute(&command) {
            Ok(outcome) => {
                let elapsed = jiff::Timestamp::now().duration_since(started);
                summary.executed += 1;
                if outcome.is_success() {
                    tracing::info!(
                        iteration = combination.iteration,
                        elapsed = ?elapsed,
                        "Run finished"
                    );
                } else {
                    summary.nonzero_exit += 1;
                    tracing::warn!(
                        iteration = combination.iteration,
                        exit_code = ?outcome.exit_code,
                        elapsed = ?elapsed,
                        result = %result_path.display(),
                        "Run exited unsuccessfully; result file left as is"
                    );
                }
            }
            Err(e) => {
                summary.launch_failures += 1;
                tracing::error!(
                    iteration = combination.iteration,
                    error = %e,
                    "Run could not start"
                );
            }
        }

        writeln!(self.out, "Output file: \"{}\"", result_path.display())
            .map_err(RunError::Output)?;
        self.out.flush().map_err(RunError::Output)
    }
}
