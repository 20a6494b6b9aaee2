//! Dataset catalog entries and the run parameters derived from them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::arff::{InstanceCount, count_instances};

/// One entry of the dataset catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatasetSpec {
    /// An ARFF file read with `ArffFileStream`
    Arff {
        path: PathBuf,
        /// 1-based class attribute index passed through to the tool
        class_index: u32,
    },
    /// A synthetic stream generator descriptor, e.g. `generators.SEAGenerator`
    Generator { descriptor: String },
}

impl DatasetSpec {
    pub fn arff(path: impl Into<PathBuf>, class_index: u32) -> Self {
        DatasetSpec::Arff {
            path: path.into(),
            class_index,
        }
    }

    pub fn generator(descriptor: impl Into<String>) -> Self {
        DatasetSpec::Generator {
            descriptor: descriptor.into(),
        }
    }

    /// The string substituted for `{stream}` in the command template.
    pub fn stream_arg(&self) -> String {
        match self {
            DatasetSpec::Arff { path, .. } => path.display().to_string(),
            DatasetSpec::Generator { descriptor } => descriptor.clone(),
        }
    }

    pub fn class_index(&self) -> Option<u32> {
        match self {
            DatasetSpec::Arff { class_index, .. } => Some(*class_index),
            DatasetSpec::Generator { .. } => None,
        }
    }

    /// Short human label used in logs
    pub fn label(&self) -> String {
        match self {
            DatasetSpec::Arff { path, .. } => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            DatasetSpec::Generator { descriptor } => descriptor.clone(),
        }
    }
}

/// Per-dataset values fed into the command template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunParameters {
    pub instances: u64,
    pub sample_frequency: u64,
    pub window_width: u64,
    pub class_index: Option<u32>,
}

impl RunParameters {
    pub fn new(instances: u64, reporting_points: u64, class_index: Option<u32>) -> Self {
        let sample_frequency = sample_frequency(instances, reporting_points);
        Self {
            instances,
            sample_frequency,
            window_width: sample_frequency,
            class_index,
        }
    }
}

/// `instances / reporting_points`, truncating. Zero points yields zero.
pub fn sample_frequency(instances: u64, reporting_points: u64) -> u64 {
    instances.checked_div(reporting_points).unwrap_or(0)
}

/// Resolve the run parameters for `dataset`.
///
/// ARFF paths are resolved against `base_dir`. Returns the scan failure when
/// the dataset has to be skipped.
pub fn derive_parameters(
    dataset: &DatasetSpec,
    base_dir: &Path,
    generator_instances: u64,
    reporting_points: u64,
) -> Result<RunParameters, InstanceCount> {
    match dataset {
        DatasetSpec::Arff { path, class_index } => {
            match count_instances(&base_dir.join(path)) {
                InstanceCount::Counted(instances) => Ok(RunParameters::new(
                    instances,
                    reporting_points,
                    Some(*class_index),
                )),
                failure => Err(failure),
            }
        }
        DatasetSpec::Generator { .. } => Ok(RunParameters::new(
            generator_instances,
            reporting_points,
            None,
        )),
    }
}
