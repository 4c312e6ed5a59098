//! Placement solution document produced by the power optimization tool
use crate::error::{InconsistentInputError, Result};
use crate::util::load_yaml;

use serde_derive::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub platform_name: String,
    pub islands: Vec<Island>,
    pub tasks: Vec<SolvedTask>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Island {
    /// Performance relative to the reference core.
    pub capacity: f64,
    /// in MHz
    pub frequency: u64,
    /// Task list of each processing unit.
    pub pus: Vec<Vec<PuEntry>>,
}

/// `[_, dag_id, task_id]`; the first element is not used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuEntry(pub serde_yaml::Value, pub usize, pub usize);

impl PuEntry {
    pub fn new(dag_id: usize, task_id: usize) -> Self {
        PuEntry(serde_yaml::Value::Null, dag_id, task_id)
    }

    pub fn dag_id(&self) -> usize {
        self.1
    }

    pub fn task_id(&self) -> usize {
        self.2
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvedTask {
    /// (dag_id, task_id)
    pub id: (usize, usize),
    /// Scaled wcet on the selected pu, in ns. Integer only; a float fails to parse.
    pub wcet: i64,
    /// in ns, integer only
    pub deadline: i64,
}

impl SolvedTask {
    pub fn dag_id(&self) -> usize {
        self.id.0
    }

    pub fn task_id(&self) -> usize {
        self.id.1
    }
}

pub fn load_solution(file_path: &Path) -> Result<Solution> {
    load_yaml(file_path)
}

impl Solution {
    /// Solved tasks of one dag, in document order.
    pub fn tasks_of_dag(&self, dag_id: usize) -> impl Iterator<Item = &SolvedTask> {
        self.tasks.iter().filter(move |task| task.dag_id() == dag_id)
    }
}

/// Find the processing unit a task was placed on.
///
/// # Returns
///
/// *  `(island_id, pu_id)` - of the first pu listing the task
pub fn find_mapping(islands: &[Island], dag_id: usize, task_id: usize) -> Result<(usize, usize)> {
    for (island_id, island) in islands.iter().enumerate() {
        for (pu_id, tasks_list) in island.pus.iter().enumerate() {
            if tasks_list
                .iter()
                .any(|entry| entry.dag_id() == dag_id && entry.task_id() == task_id)
            {
                return Ok((island_id, pu_id));
            }
        }
    }
    Err(InconsistentInputError::MissingMapping { dag_id, task_id }.into())
}
