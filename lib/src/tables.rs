//! Lookup tables injected into the transformer.
//!
//! The defaults match the kernels deployed on the current boards. A YAML
//! file with the same keys can replace any of them at startup.
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde_derive::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};
use crate::util::load_yaml;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Cpu,
    Fred,
    Omp,
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskType::Cpu => "cpu",
            TaskType::Fred => "fred",
            TaskType::Omp => "omp",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tables {
    pub supported_task_types: Vec<TaskType>,
    /// Scaled wcet in ns of each known accelerated kernel -> FRED function id.
    pub fred_ids: BTreeMap<i64, i32>,
    /// Id used when the wcet matches no known kernel (the slowest one).
    pub default_fred_id: i32,
    /// Id written for tasks that are not accelerated.
    pub non_fred_id: i32,
    pub expected_wcet_ratio: f64,
}

impl Default for Tables {
    fn default() -> Self {
        let fred_ids = BTreeMap::from([
            (897615, 100),  // sum_vec
            (899473, 101),  // xor_vec
            (4381910, 102), // mul128
            (1276500, 103), // mul64
        ]);
        Self {
            supported_task_types: vec![TaskType::Cpu, TaskType::Fred, TaskType::Omp],
            fred_ids,
            default_fred_id: 102,
            non_fred_id: -1,
            expected_wcet_ratio: 0.95,
        }
    }
}

impl Tables {
    pub fn from_yaml(file_path: &Path) -> Result<Self> {
        load_yaml(file_path)
    }

    pub fn ensure_supported(&self, task_type: TaskType) -> Result<()> {
        if self.supported_task_types.contains(&task_type) {
            Ok(())
        } else {
            Err(ConvertError::UnsupportedTaskType(task_type))
        }
    }

    /// Map the wcet of an accelerated task to its kernel id.
    ///
    /// Unknown signatures fall back to `default_fred_id`.
    pub fn fred_id(&self, wcet_ns: i64) -> i32 {
        match self.fred_ids.get(&wcet_ns) {
            Some(&id) => id,
            None => {
                log::debug!(
                    "No kernel matches wcet {} ns, using fred id {}",
                    wcet_ns,
                    self.default_fred_id
                );
                self.default_fred_id
            }
        }
    }
}
