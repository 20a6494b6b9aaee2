//! Combination enumeration.
//!
//! A plan is the ordered list of (dataset, ensemble, ratio) combinations this
//! node is responsible for, each with its rendered command and result path.
//! Order is dataset outer, ensemble middle, ratio inner; iteration numbers
//! printed while running follow it exactly.

use std::path::PathBuf;

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::arff::InstanceCount;
use crate::config::SweepConfig;
use crate::dataset::{DatasetSpec, RunParameters, derive_parameters};
use crate::error::PlanError;
use crate::naming::result_file_name;
use crate::template::{Placeholder, TemplateValues};

/// One external invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Combination {
    /// 1-based position in the sweep
    pub iteration: usize,
    pub dataset: DatasetSpec,
    pub ensemble: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imb_ratio: Option<String>,
    pub params: RunParameters,
    /// Rendered command, without output redirection
    pub command: String,
    pub result_path: PathBuf,
}

/// A dataset that produced no combinations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDataset {
    pub dataset: DatasetSpec,
    pub reason: InstanceCount,
}

/// All work for one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepPlan {
    /// Nominal combination count for this node, including skipped datasets
    pub total: usize,
    pub combinations: Vec<Combination>,
    pub skipped: Vec<SkippedDataset>,
}

impl SweepPlan {
    /// Validate `config` and enumerate this node's combinations.
    ///
    /// ARFF datasets are scanned here; any that cannot be counted are
    /// recorded in `skipped` and contribute no combinations.
    pub fn build(config: &SweepConfig) -> Result<Self, PlanError> {
        config.validate()?;
        check_unique_names(config)?;

        let datasets = config.assigned_datasets()?;
        let ratios = config.ratio_axis();
        let total = datasets.len() * config.ensembles.len() * ratios.len();

        let mut combinations = Vec::with_capacity(total);
        let mut skipped = Vec::new();
        let mut iteration = 1;

        for dataset in datasets {
            let params = match derive_parameters(
                dataset,
                &config.base_dir,
                config.generator_instances,
                config.reporting_points,
            ) {
                Ok(params) => params,
                Err(reason) => {
                    tracing::info!(dataset = %dataset.label(), %reason, "Skipping dataset");
                    skipped.push(SkippedDataset {
                        dataset: dataset.clone(),
                        reason,
                    });
                    continue;
                }
            };

            for ensemble in &config.ensembles {
                for &ratio in &ratios {
                    let values = template_values(config, dataset, ensemble, ratio, &params);
                    let command = config.template.render(&values)?;
                    let file_name =
                        result_file_name(ensemble, dataset, ratio, &config.strip_prefixes);

                    combinations.push(Combination {
                        iteration,
                        dataset: dataset.clone(),
                        ensemble: ensemble.clone(),
                        imb_ratio: ratio.map(String::from),
                        params,
                        command,
                        result_path: config.results_dir.join(file_name),
                    });
                    iteration += 1;
                }
            }
        }

        tracing::debug!(
            total,
            planned = combinations.len(),
            skipped_datasets = skipped.len(),
            "Sweep plan built"
        );

        Ok(Self {
            total,
            combinations,
            skipped,
        })
    }

    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }
}

fn template_values(
    config: &SweepConfig,
    dataset: &DatasetSpec,
    ensemble: &str,
    ratio: Option<&str>,
    params: &RunParameters,
) -> TemplateValues {
    let mut values = TemplateValues::new();
    values
        .set(Placeholder::Ensemble, ensemble)
        .set(Placeholder::Stream, dataset.stream_arg())
        .set(Placeholder::Instances, params.instances)
        .set(Placeholder::Width, params.window_width)
        .set(Placeholder::SampleFreq, params.sample_frequency)
        .set(Placeholder::Heap, config.heap_gb);
    if let Some(class_index) = params.class_index {
        values.set(Placeholder::ClassIndex, class_index);
    }
    if let Some(ratio) = ratio {
        values.set(Placeholder::ImbRatio, ratio);
    }
    values
}

/// Result names must be unique across the whole catalog, not just this node,
/// since every node writes into the same directory.
fn check_unique_names(config: &SweepConfig) -> Result<(), PlanError> {
    let ratios = config.ratio_axis();
    let mut seen = FxHashSet::default();
    for dataset in &config.datasets {
        for ensemble in &config.ensembles {
            for &ratio in &ratios {
                let name = result_file_name(ensemble, dataset, ratio, &config.strip_prefixes);
                if !seen.insert(name.clone()) {
                    return Err(PlanError::DuplicateResultName(name));
                }
            }
        }
    }
    Ok(())
}
