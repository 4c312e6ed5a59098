//! Error types shared by the loaders, the transformer and the writer.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::tables::TaskType;

/// Violations of the agreement between the DAG model and the solution.
///
/// These are bugs in the upstream data, not conditions to recover from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InconsistentInputError {
    #[error("no mapping found for task {task_id} of dag {dag_id}")]
    MissingMapping { dag_id: usize, task_id: usize },
    #[error("solved tasks of dag {dag_id} are out of order: expected task {expected}, found {found}")]
    TaskOutOfOrder {
        dag_id: usize,
        expected: usize,
        found: usize,
    },
    #[error("dag {dag_id} declares {expected} tasks but the solution places {found}")]
    TaskCountMismatch {
        dag_id: usize,
        expected: usize,
        found: usize,
    },
    #[error("edge ({src}, {dst}) of dag {dag_id} references a task outside 0..{n_tasks}")]
    InvalidEdge {
        dag_id: usize,
        src: usize,
        dst: usize,
        n_tasks: usize,
    },
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to load YAML file {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse YAML file {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("failed to write {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize runtime descriptor: {0}")]
    Serialize(#[from] serde_yaml::Error),
    #[error("unknown platform name: {0}")]
    UnknownPlatform(String),
    #[error("activation period of dag {dag_id} is zero")]
    ZeroPeriod { dag_id: usize },
    #[error("hyperperiod does not fit in 63 bits once dag {dag_id} is included")]
    HyperPeriodOverflow { dag_id: usize },
    #[error("--min-seconds {0} does not fit in ns")]
    MinSecondsOverflow(u64),
    #[error("task type {0} is not supported")]
    UnsupportedTaskType(TaskType),
    #[error("inconsistent input: {0}")]
    Inconsistent(#[from] InconsistentInputError),
}

impl ConvertError {
    /// True when the error comes from reading or parsing an input document.
    pub fn is_input_document_error(&self) -> bool {
        matches!(self, ConvertError::Read { .. } | ConvertError::Parse { .. })
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
