use std::fmt;
use std::path::PathBuf;

/// Errors raised while validating a sweep configuration.
///
/// All of these are fatal and surface before any external process runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `nodes.total` was zero
    NoNodes,
    /// `nodes.index` is outside `[0, total - 1]`
    NodeIndexOutOfRange { index: usize, total: usize },
    /// The ensemble catalog is empty, so nothing would ever run
    EmptyEnsembleCatalog,
    /// `reporting_points` was zero
    ZeroReportingPoints,
    Template(TemplateError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoNodes => write!(f, "node count must be at least 1"),
            ConfigError::NodeIndexOutOfRange { index, total } => write!(
                f,
                "node number must be between 0 and {} (got {index})",
                total.saturating_sub(1)
            ),
            ConfigError::EmptyEnsembleCatalog => write!(f, "ensemble catalog is empty"),
            ConfigError::ZeroReportingPoints => write!(f, "reporting_points must be at least 1"),
            ConfigError::Template(e) => write!(f, "invalid command template: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Template(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TemplateError> for ConfigError {
    fn from(err: TemplateError) -> Self {
        ConfigError::Template(err)
    }
}

/// Errors from parsing or rendering a command template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// `{name}` where `name` is not a known placeholder
    UnknownPlaceholder(String),
    /// A `{` with no matching `}`
    Unterminated { offset: usize },
    /// A stray `}` that is not part of `}}`
    UnmatchedClose { offset: usize },
    /// The placeholder is known but no value was supplied for this combination
    MissingValue(&'static str),
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UnknownPlaceholder(name) => write!(f, "unknown placeholder {{{name}}}"),
            TemplateError::Unterminated { offset } => {
                write!(f, "unterminated placeholder starting at byte {offset}")
            }
            TemplateError::UnmatchedClose { offset } => {
                write!(f, "unmatched '}}' at byte {offset}")
            }
            TemplateError::MissingValue(name) => {
                write!(f, "no value available for placeholder {{{name}}}")
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// Errors raised while enumerating combinations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    Config(ConfigError),
    Template(TemplateError),
    /// Two distinct combinations collapsed onto the same result file name
    DuplicateResultName(String),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::Config(e) => write!(f, "{e}"),
            PlanError::Template(e) => write!(f, "{e}"),
            PlanError::DuplicateResultName(name) => {
                write!(f, "result file name {name:?} is produced by more than one combination")
            }
        }
    }
}

impl std::error::Error for PlanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlanError::Config(e) => Some(e),
            PlanError::Template(e) => Some(e),
            PlanError::DuplicateResultName(_) => None,
        }
    }
}

impl From<ConfigError> for PlanError {
    fn from(err: ConfigError) -> Self {
        PlanError::Config(err)
    }
}

impl From<TemplateError> for PlanError {
    fn from(err: TemplateError) -> Self {
        PlanError::Template(err)
    }
}

/// Errors from the command runner or the filesystem around it
#[derive(Debug)]
pub enum RunError {
    /// The shell could not be started at all
    Spawn(std::io::Error),
    /// The results directory could not be created or inspected
    ResultsDir { path: PathBuf, source: std::io::Error },
    /// Writing progress output failed
    Output(std::io::Error),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Spawn(e) => write!(f, "failed to launch command: {e}"),
            RunError::ResultsDir { path, source } => {
                write!(f, "results directory {} unusable: {source}", path.display())
            }
            RunError::Output(e) => write!(f, "failed to write progress output: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Spawn(e) => Some(e),
            RunError::ResultsDir { source, .. } => Some(source),
            RunError::Output(e) => Some(e),
        }
    }
}

/// Top-level error for a whole sweep
#[derive(Debug)]
pub enum SweepError {
    Plan(PlanError),
    Run(RunError),
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepError::Plan(e) => write!(f, "{e}"),
            SweepError::Run(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SweepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SweepError::Plan(e) => Some(e),
            SweepError::Run(e) => Some(e),
        }
    }
}

impl From<PlanError> for SweepError {
    fn from(err: PlanError) -> Self {
        SweepError::Plan(err)
    }
}

impl From<ConfigError> for SweepError {
    fn from(err: ConfigError) -> Self {
        SweepError::Plan(PlanError::Config(err))
    }
}

impl From<RunError> for SweepError {
    fn from(err: RunError) -> Self {
        SweepError::Run(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_range_message() {
        let err = ConfigError::NodeIndexOutOfRange { index: 4, total: 4 };
        assert_eq!(err.to_string(), "node number must be between 0 and 3 (got 4)");
    }

    #[test]
    fn test_template_error_is_source_of_config_error() {
        use std::error::Error;

        let err = ConfigError::from(TemplateError::UnknownPlaceholder("foo".into()));
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "invalid command template: unknown placeholder {foo}"
        );
    }
}
