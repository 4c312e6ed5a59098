//! Runtime descriptor consumed by rt-dag, and its derivation from the
//! dag model plus the placement solution.
use getset::Getters;
use log::{debug, info, warn};
use serde_derive::{Deserialize, Serialize};

use crate::dag_model::{DagModel, DagSetModel};
use crate::error::{ConvertError, InconsistentInputError, Result};
use crate::graph_extension::GraphExtension;
use crate::platform::Platform;
use crate::solution::{find_mapping, Solution};
use crate::tables::{TaskType, Tables};
use crate::util::{get_hyper_period, get_repetitions, to_us, Rounding};

/// Edge labels are not propagated yet, so every message has this size.
const LABEL_SIZE: u64 = 0;

/// One dag, fully resolved. All durations are in us.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct RtDag {
    dag_name: String,
    n_tasks: usize,
    n_edges: usize,
    n_cpus: usize,
    max_out_edges: usize,
    max_in_edges: usize,
    max_msg_len: u64,
    repetitions: u64,
    hyperperiod: i64,
    dag_period: i64,
    dag_deadline: i64,
    tasks_name: Vec<String>,
    tasks_type: Vec<TaskType>,
    tasks_wcet: Vec<i64>,
    tasks_runtime: Vec<i64>,
    tasks_rel_deadline: Vec<i64>,
    tasks_affinity: Vec<usize>,
    fred_id: Vec<i32>,
    /// in MHz, indexed by cpu
    cpus_freq: Vec<u64>,
    expected_wcet_ratio: f64,
    adjacency_matrix: Vec<Vec<i32>>,
}

pub fn get_dag_name(dag_id: usize) -> String {
    format!("dag{}", dag_id)
}

pub struct RtDagGenerator<'a> {
    solution: &'a Solution,
    platform: Platform,
    tables: &'a Tables,
}

impl<'a> RtDagGenerator<'a> {
    pub fn new(solution: &'a Solution, tables: &'a Tables) -> Result<Self> {
        Ok(Self {
            solution,
            platform: Platform::from_name(&solution.platform_name)?,
            tables,
        })
    }

    /// Build the descriptor of dag `dag_id`.
    ///
    /// Solved tasks of the dag must appear in ascending task id order.
    ///
    /// # Arguments
    ///
    /// *  `dag` - model of the dag
    /// *  `dag_id` - position of the dag in the model document
    /// *  `repetitions` - number of times rt-dag runs the dag
    /// *  `hyper_period` - of the whole dag set, in ns
    pub fn generate(
        &self,
        dag: &DagModel,
        dag_id: usize,
        repetitions: u64,
        hyper_period: u64,
    ) -> Result<RtDag> {
        let graph = dag.to_graph(dag_id)?;
        let n_tasks = dag.task_count();

        let tasks_name = (0..n_tasks).map(|t| format!("n{:03}", t)).collect();
        let mut tasks_wcet: Vec<i64> = dag
            .tasks
            .iter()
            .map(|task| to_us(task.wcet_ref, Rounding::Floor))
            .collect();

        let mut tasks_type = Vec::with_capacity(n_tasks);
        let mut tasks_runtime = Vec::with_capacity(n_tasks);
        let mut tasks_rel_deadline = Vec::with_capacity(n_tasks);
        let mut tasks_affinity = Vec::with_capacity(n_tasks);
        let mut fred_id = Vec::with_capacity(n_tasks);

        for task in self.solution.tasks_of_dag(dag_id) {
            let task_id = task.task_id();
            if task_id != tasks_runtime.len() {
                return Err(InconsistentInputError::TaskOutOfOrder {
                    dag_id,
                    expected: tasks_runtime.len(),
                    found: task_id,
                }
                .into());
            }
            if task_id >= n_tasks {
                return Err(InconsistentInputError::TaskCountMismatch {
                    dag_id,
                    expected: n_tasks,
                    found: self.solution.tasks_of_dag(dag_id).count(),
                }
                .into());
            }

            let runtime = to_us(task.wcet, Rounding::Floor);
            let rel_deadline = to_us(task.deadline, Rounding::Floor);

            // Some producers leave wcet_ref at zero; fall back to the solved runtime.
            if tasks_wcet[task_id] < 1 {
                tasks_wcet[task_id] = runtime;
            }

            let (island_id, pu_id) = find_mapping(&self.solution.islands, dag_id, task_id)?;
            let island = &self.solution.islands[island_id];
            let cpu = self.platform.get_cpu(island, pu_id);

            let task_type = if self.platform.is_accelerator(island) {
                TaskType::Fred
            } else {
                TaskType::Cpu
            };
            self.tables.ensure_supported(task_type)?;
            let task_fred_id = match task_type {
                TaskType::Fred => self.tables.fred_id(task.wcet),
                _ => self.tables.non_fred_id,
            };
            debug!(
                "dag {} task {}: island {} pu {} -> cpu {} ({})",
                dag_id, task_id, island_id, pu_id, cpu, task_type
            );

            tasks_type.push(task_type);
            tasks_runtime.push(runtime);
            tasks_rel_deadline.push(rel_deadline);
            tasks_affinity.push(cpu);
            fred_id.push(task_fred_id);
        }

        if tasks_runtime.len() != n_tasks {
            return Err(InconsistentInputError::TaskCountMismatch {
                dag_id,
                expected: n_tasks,
                found: tasks_runtime.len(),
            }
            .into());
        }

        let cpus_freq = self.get_cpus_freq();
        let hyper_period = i64::try_from(hyper_period)
            .map_err(|_| ConvertError::HyperPeriodOverflow { dag_id })?;
        let dag_period = i64::try_from(dag.activation_period)
            .map_err(|_| ConvertError::HyperPeriodOverflow { dag_id })?;

        Ok(RtDag {
            dag_name: get_dag_name(dag_id),
            n_tasks,
            n_edges: dag.edge_list.len(),
            n_cpus: cpus_freq.len(),
            // out counts edges leaving a task, in counts edges entering it.
            max_out_edges: graph.get_max_out_degree(),
            max_in_edges: graph.get_max_in_degree(),
            max_msg_len: LABEL_SIZE + 1,
            repetitions,
            hyperperiod: to_us(hyper_period, Rounding::Floor),
            dag_period: to_us(dag_period, Rounding::Floor),
            dag_deadline: to_us(dag.deadline, Rounding::Floor),
            tasks_name,
            tasks_type,
            tasks_wcet,
            tasks_runtime,
            tasks_rel_deadline,
            tasks_affinity,
            fred_id,
            cpus_freq,
            expected_wcet_ratio: self.tables.expected_wcet_ratio,
            adjacency_matrix: graph.get_adjacency_matrix(),
        })
    }

    /// Frequency of every general purpose cpu, ordered by cpu index.
    fn get_cpus_freq(&self) -> Vec<u64> {
        let mut cpus_freq: Vec<(usize, u64)> = Vec::new();
        for island in &self.solution.islands {
            if self.platform.is_accelerator(island) {
                continue;
            }
            for pu_id in 0..island.pus.len() {
                cpus_freq.push((self.platform.get_cpu(island, pu_id), island.frequency));
            }
        }
        cpus_freq.sort_by_key(|&(cpu, _)| cpu);

        // The table is positional, so a gap shifts every following frequency.
        if cpus_freq
            .iter()
            .enumerate()
            .any(|(position, &(cpu, _))| position != cpu)
        {
            warn!(
                "CPU indices {:?} are not contiguous from 0; cpus_freq does not line up with tasks_affinity.",
                cpus_freq.iter().map(|&(cpu, _)| cpu).collect::<Vec<_>>()
            );
        }
        cpus_freq.into_iter().map(|(_, freq)| freq).collect()
    }
}

/// Hyperperiod and repetitions shared by every dag of the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLength {
    /// in ns
    pub hyper_period: u64,
    pub repetitions: u64,
}

impl RunLength {
    pub fn new(dag_set: &DagSetModel, num_iters: u64, min_seconds: u64) -> Result<Self> {
        let hyper_period = get_hyper_period(&dag_set.periods())?;
        let repetitions = get_repetitions(num_iters, min_seconds, hyper_period)?;
        if repetitions != num_iters {
            info!(
                "Running {} repetitions to cover at least {} s.",
                repetitions, min_seconds
            );
        }
        Ok(Self {
            hyper_period,
            repetitions,
        })
    }
}

/// Build one descriptor per dag of the set, in dag order.
pub fn generate_rtdag_set(
    dag_set: &DagSetModel,
    solution: &Solution,
    tables: &Tables,
    run_length: RunLength,
) -> Result<Vec<RtDag>> {
    let generator = RtDagGenerator::new(solution, tables)?;
    dag_set
        .dags
        .iter()
        .enumerate()
        .map(|(dag_id, dag)| {
            generator.generate(dag, dag_id, run_length.repetitions, run_length.hyper_period)
        })
        .collect()
}
