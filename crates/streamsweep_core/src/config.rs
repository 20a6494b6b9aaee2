//! Sweep configuration
//!
//! `SweepConfig` holds everything one driver instance needs: which node it is,
//! the catalogs to cross, the command template and where results go. It is
//! validated once, in `SweepConfig::validate`, before any work starts.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::dataset::DatasetSpec;
use crate::error::{ConfigError, TemplateError};
use crate::naming::DEFAULT_STRIP_PREFIXES;
use crate::partition::NodeAssignment;
use crate::template::{CommandTemplate, Placeholder};

fn default_heap_gb() -> u32 {
    8
}

fn default_strip_prefixes() -> Vec<String> {
    DEFAULT_STRIP_PREFIXES.iter().map(|s| s.to_string()).collect()
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_generator_instances() -> u64 {
    1_000_000
}

fn default_reporting_points() -> u64 {
    10
}

/// Complete configuration for one driver instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    #[serde(default)]
    pub nodes: NodeAssignment,

    /// JVM initial and max heap in GB, substituted for `{heap}`
    #[serde(default = "default_heap_gb")]
    pub heap_gb: u32,

    pub template: CommandTemplate,

    pub datasets: Vec<DatasetSpec>,

    pub ensembles: Vec<String>,

    /// Optional secondary axis; empty means no ratio loop
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imbalance_ratios: Vec<String>,

    /// Substrings removed from result file names
    #[serde(default = "default_strip_prefixes")]
    pub strip_prefixes: Vec<String>,

    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,

    /// Directory ARFF dataset paths are resolved against
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Instance count used for generator datasets
    #[serde(default = "default_generator_instances")]
    pub generator_instances: u64,

    /// Number of evaluation reports per stream; sample frequency is instances / this
    #[serde(default = "default_reporting_points")]
    pub reporting_points: u64,
}

impl SweepConfig {
    /// A configuration with defaults for everything except the catalogs.
    pub fn new(
        template: CommandTemplate,
        datasets: Vec<DatasetSpec>,
        ensembles: Vec<String>,
    ) -> Self {
        Self {
            nodes: NodeAssignment::default(),
            heap_gb: default_heap_gb(),
            template,
            datasets,
            ensembles,
            imbalance_ratios: Vec::new(),
            strip_prefixes: default_strip_prefixes(),
            results_dir: default_results_dir(),
            base_dir: default_base_dir(),
            generator_instances: default_generator_instances(),
            reporting_points: default_reporting_points(),
        }
    }

    pub fn with_nodes(mut self, total: usize, index: usize) -> Self {
        self.nodes = NodeAssignment::new(total, index);
        self
    }

    pub fn with_imbalance_ratios(mut self, ratios: Vec<String>) -> Self {
        self.imbalance_ratios = ratios;
        self
    }

    pub fn with_results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = dir.into();
        self
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.nodes.validate()?;
        if self.ensembles.is_empty() {
            return Err(ConfigError::EmptyEnsembleCatalog);
        }
        if self.reporting_points == 0 {
            return Err(ConfigError::ZeroReportingPoints);
        }
        if self.template.uses(Placeholder::ImbRatio) && self.imbalance_ratios.is_empty() {
            return Err(TemplateError::MissingValue(Placeholder::ImbRatio.name()).into());
        }
        Ok(())
    }

    /// The slice of the dataset catalog assigned to this node.
    pub fn assigned_datasets(&self) -> Result<&[DatasetSpec], ConfigError> {
        self.nodes.select(&self.datasets)
    }

    /// Values of the secondary axis, or a single `None` when there is none.
    pub fn ratio_axis(&self) -> Vec<Option<&str>> {
        if self.imbalance_ratios.is_empty() {
            vec![None]
        } else {
            self.imbalance_ratios.iter().map(|r| Some(r.as_str())).collect()
        }
    }
}
