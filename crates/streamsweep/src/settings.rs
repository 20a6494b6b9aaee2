//! Sweep configuration sources.
//!
//! A configuration comes from a YAML file or a built-in preset, then CLI
//! overrides are laid on top:
//!
//! ```yaml
//! nodes: { total: 4, index: 0 }
//! heap_gb: 32
//! template: 'java -Xms{heap}g -Xmx{heap}g ... -l {ensemble} -s {stream} ...'
//! datasets:
//!   - kind: arff
//!     path: streams/covtypeNorm.arff
//!     class_index: 55
//!   - kind: generator
//!     descriptor: generators.SEAGenerator
//! ensembles:
//!   - bayes.NaiveBayes
//! imbalance_ratios: ['0.5;0.5', '0.9;0.1']
//! results_dir: results
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use streamsweep_core::{NodeAssignment, Preset, SweepConfig};

/// Error types for loading and saving configurations
#[derive(Debug)]
pub enum SettingsError {
    Io(String),
    Parse(String),
    Serialize(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(msg) => write!(f, "IO error: {}", msg),
            SettingsError::Parse(msg) => write!(f, "Parse error: {}", msg),
            SettingsError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Where the base configuration comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Preset(Preset),
}

/// Command-line values that take precedence over the configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub nodes: Option<usize>,
    pub node: Option<usize>,
    pub results_dir: Option<PathBuf>,
    pub base_dir: Option<PathBuf>,
}

impl Overrides {
    pub fn apply(&self, mut config: SweepConfig) -> SweepConfig {
        if self.nodes.is_some() || self.node.is_some() {
            config.nodes = NodeAssignment::new(
                self.nodes.unwrap_or(config.nodes.total),
                self.node.unwrap_or(config.nodes.index),
            );
        }
        if let Some(dir) = &self.results_dir {
            config.results_dir = dir.clone();
        }
        if let Some(dir) = &self.base_dir {
            config.base_dir = dir.clone();
        }
        config
    }
}

pub fn from_yaml(yaml: &str) -> Result<SweepConfig, SettingsError> {
    serde_saphyr::from_str(yaml)
        .map_err(|e| SettingsError::Parse(format!("Failed to parse sweep config: {}", e)))
}

pub fn to_yaml(config: &SweepConfig) -> Result<String, SettingsError> {
    serde_saphyr::to_string(config)
        .map_err(|e| SettingsError::Serialize(format!("Failed to serialize sweep config: {}", e)))
}

pub fn load_file(path: &Path) -> Result<SweepConfig, SettingsError> {
    let content = fs::read_to_string(path).map_err(|e| {
        SettingsError::Io(format!("Failed to read {}: {}", path.display(), e))
    })?;
    from_yaml(&content)
}

/// Load the base configuration and apply overrides. Does not validate.
pub fn resolve(source: &ConfigSource, overrides: &Overrides) -> Result<SweepConfig, SettingsError> {
    let base = match source {
        ConfigSource::File(path) => load_file(path)?,
        ConfigSource::Preset(preset) => preset.config(),
    };
    tracing::debug!(?source, ?overrides, "Resolved sweep configuration");
    Ok(overrides.apply(base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamsweep_core::{DatasetSpec, Placeholder};
    use tempfile::tempdir;

    const SAMPLE: &str = r#"
nodes:
  total: 2
  index: 1
template: 'tool -l {ensemble} -s {stream} -c {class_index}'
datasets:
  - kind: arff
    path: streams/a.arff
    class_index: 3
  - kind: generator
    descriptor: generators.SEAGenerator
ensembles:
  - bayes.NaiveBayes
  - (meta.OzaBag -s 100)
"#;

    #[test]
    fn test_parse_hand_written_yaml() {
        let config = from_yaml(SAMPLE).unwrap();
        assert_eq!(config.nodes, NodeAssignment::new(2, 1));
        assert_eq!(config.datasets[0], DatasetSpec::arff("streams/a.arff", 3));
        assert_eq!(
            config.datasets[1],
            DatasetSpec::generator("generators.SEAGenerator")
        );
        assert_eq!(config.ensembles[1], "(meta.OzaBag -s 100)");
        assert!(config.template.uses(Placeholder::ClassIndex));
        // Defaults fill the rest
        assert_eq!(config.heap_gb, 8);
        assert_eq!(config.results_dir, PathBuf::from("results"));
        assert_eq!(config.reporting_points, 10);
        assert!(config.strip_prefixes.contains(&"meta.".to_string()));
    }

    #[test]
    fn test_unknown_placeholder_is_a_parse_error() {
        let yaml = "template: 'tool {nope}'\ndatasets: []\nensembles: [x]\n";
        assert!(matches!(from_yaml(yaml), Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_preset_survives_yaml() {
        let config = Preset::Imbalanced.config();
        let yaml = to_yaml(&config).unwrap();
        assert_eq!(from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let overrides = Overrides {
            node: Some(3),
            results_dir: Some(PathBuf::from("/tmp/out")),
            ..Default::default()
        };
        let config = overrides.apply(Preset::Drift.config());
        assert_eq!(config.nodes, NodeAssignment::new(4, 3));
        assert_eq!(config.results_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_resolve_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sweep.yaml");
        fs::write(&path, SAMPLE).unwrap();

        let overrides = Overrides {
            nodes: Some(1),
            node: Some(0),
            ..Default::default()
        };
        let config = resolve(&ConfigSource::File(path), &overrides).unwrap();
        assert_eq!(config.nodes, NodeAssignment::new(1, 0));
        assert_eq!(config.datasets.len(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let source = ConfigSource::File(dir.path().join("absent.yaml"));
        assert!(matches!(
            resolve(&source, &Overrides::default()),
            Err(SettingsError::Io(_))
        ));
    }
}
