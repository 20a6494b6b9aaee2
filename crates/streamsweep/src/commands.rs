//! Subcommand implementations.
//!
//! Each handler writes its user-facing output to the supplied writer; `main`
//! passes stdout.

use std::io::Write;
use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use serde::Serialize;
use streamsweep_core::dataset::sample_frequency;
use streamsweep_core::{
    Combination, InstanceCount, Preset, ShellRunner, SweepConfig, SweepDriver, SweepPlan,
    SweepSummary, count_instances, is_completed,
};

use crate::io::atomic_write;
use crate::settings;

/// Output format for `plan`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum PlanFormat {
    #[default]
    Text,
    Json,
}

/// Run this node's share of the sweep through the shell.
pub fn run<W: Write>(config: SweepConfig, out: W) -> color_eyre::Result<SweepSummary> {
    let mut driver = SweepDriver::new(config, ShellRunner::new(), out)?;
    let summary = driver.run()?;
    let (_, mut out) = driver.into_parts();
    writeln!(
        out,
        "\nSweep finished: {} run, {} already done, {} exited non-zero, {} failed to start, {} datasets skipped",
        summary.executed,
        summary.already_done,
        summary.nonzero_exit,
        summary.launch_failures,
        summary.skipped_datasets
    )?;
    Ok(summary)
}

#[derive(Serialize)]
struct PlanEntry<'a> {
    #[serde(flatten)]
    combination: &'a Combination,
    done: bool,
}

#[derive(Serialize)]
struct SkippedEntry {
    dataset: String,
    reason: String,
}

#[derive(Serialize)]
struct PlanReport<'a> {
    node: usize,
    nodes: usize,
    total: usize,
    combinations: Vec<PlanEntry<'a>>,
    skipped: Vec<SkippedEntry>,
}

/// Print every combination this node would run, without running anything.
pub fn plan<W: Write>(
    config: &SweepConfig,
    format: PlanFormat,
    mut out: W,
) -> color_eyre::Result<SweepPlan> {
    let plan = SweepPlan::build(config)?;

    let report = PlanReport {
        node: config.nodes.index,
        nodes: config.nodes.total,
        total: plan.total,
        combinations: plan
            .combinations
            .iter()
            .map(|combination| PlanEntry {
                combination,
                done: is_completed(&combination.result_path),
            })
            .collect(),
        skipped: plan
            .skipped
            .iter()
            .map(|s| SkippedEntry {
                dataset: s.dataset.label(),
                reason: s.reason.to_string(),
            })
            .collect(),
    };

    match format {
        PlanFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
        PlanFormat::Text => {
            writeln!(
                out,
                "Node {} of {}: {} combinations planned ({} nominal)",
                report.node,
                report.nodes,
                report.combinations.len(),
                report.total
            )?;
            for entry in &report.combinations {
                let status = if entry.done { "done   " } else { "pending" };
                writeln!(
                    out,
                    "[{}/{}] {status} {}",
                    entry.combination.iteration,
                    report.total,
                    entry.combination.result_path.display()
                )?;
                writeln!(out, "        {}", entry.combination.command)?;
            }
            for skipped in &report.skipped {
                writeln!(out, "skipped dataset {}: {}", skipped.dataset, skipped.reason)?;
            }
        }
    }
    Ok(plan)
}

/// Print instance counts and derived run parameters for ARFF files.
///
/// Returns how many files could not be counted.
pub fn count<W: Write>(
    paths: &[PathBuf],
    reporting_points: u64,
    mut out: W,
) -> color_eyre::Result<usize> {
    let mut failures = 0;
    for path in paths {
        match count_instances(path) {
            InstanceCount::Counted(instances) => {
                let frequency = sample_frequency(instances, reporting_points);
                writeln!(
                    out,
                    "{}: {instances} instances, sample frequency {frequency}, window width {frequency}",
                    path.display()
                )?;
            }
            failure => {
                failures += 1;
                writeln!(out, "{}: {failure}", path.display())?;
            }
        }
    }
    Ok(failures)
}

/// Write a preset's YAML to `output`, or to `out` when no path is given.
pub fn preset<W: Write>(
    preset: Preset,
    output: Option<&Path>,
    mut out: W,
) -> color_eyre::Result<()> {
    let yaml = settings::to_yaml(&preset.config())?;
    match output {
        Some(path) => {
            atomic_write(path, &yaml)
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(preset = %preset, path = %path.display(), "Preset written");
        }
        None => out.write_all(yaml.as_bytes())?,
    }
    Ok(())
}
