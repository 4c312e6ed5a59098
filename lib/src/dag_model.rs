//! DAG model document produced by the power optimization tool
use crate::error::{InconsistentInputError, Result};
use crate::graph_extension::NodeData;
use crate::util::load_yaml;

use log::warn;
use petgraph::{algo::is_cyclic_directed, graph::Graph, prelude::*};
use serde_derive::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DagSetModel {
    pub dags: Vec<DagModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DagModel {
    pub tasks: Vec<TaskModel>,
    pub edge_list: Vec<Edge>,
    /// in ns
    pub activation_period: u64,
    /// in ns
    pub deadline: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskModel {
    /// Reference wcet in ns. Some producers leave it at zero.
    pub wcet_ref: i64,
}

/// `[src, dst]` or `[src, dst, label_size]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u64>", into = "Vec<u64>")]
pub struct Edge {
    pub src: usize,
    pub dst: usize,
    pub label_size: Option<u64>,
}

impl Edge {
    pub fn new(src: usize, dst: usize) -> Self {
        Self {
            src,
            dst,
            label_size: None,
        }
    }
}

impl TryFrom<Vec<u64>> for Edge {
    type Error = String;

    fn try_from(values: Vec<u64>) -> std::result::Result<Self, Self::Error> {
        match values.as_slice() {
            &[src, dst] => Ok(Edge::new(src as usize, dst as usize)),
            &[src, dst, label_size] => Ok(Edge {
                src: src as usize,
                dst: dst as usize,
                label_size: Some(label_size),
            }),
            _ => Err(format!(
                "an edge must be [src, dst] or [src, dst, label_size], got {} values",
                values.len()
            )),
        }
    }
}

impl From<Edge> for Vec<u64> {
    fn from(edge: Edge) -> Self {
        let mut values = vec![edge.src as u64, edge.dst as u64];
        values.extend(edge.label_size);
        values
    }
}

/// load the dag model document
///
/// # Arguments
///
/// *  `file_path` - yaml file path
///
/// # Example
///
/// ```
/// use lib::dag_model::load_dag_set_model;
/// use std::path::Path;
///
/// let dag_set = load_dag_set_model(Path::new("tests/sample_inputs/two_dags.yaml")).unwrap();
/// let first_dag_tasks = dag_set.dags[0].tasks.len();
/// ```
pub fn load_dag_set_model(file_path: &Path) -> Result<DagSetModel> {
    load_yaml(file_path)
}

impl DagSetModel {
    pub fn periods(&self) -> Vec<u64> {
        self.dags.iter().map(|dag| dag.activation_period).collect()
    }
}

impl DagModel {
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn validate_edges(&self, dag_id: usize) -> Result<()> {
        let n_tasks = self.task_count();
        if let Some(edge) = self
            .edge_list
            .iter()
            .find(|edge| edge.src >= n_tasks || edge.dst >= n_tasks)
        {
            return Err(InconsistentInputError::InvalidEdge {
                dag_id,
                src: edge.src,
                dst: edge.dst,
                n_tasks,
            }
            .into());
        }
        Ok(())
    }

    /// Build a petgraph view of the dag. Node index == task id.
    ///
    /// The edge weight is the label size (0 when absent).
    pub fn to_graph(&self, dag_id: usize) -> Result<Graph<NodeData, u64>> {
        self.validate_edges(dag_id)?;
        let mut dag = Graph::<NodeData, u64>::with_capacity(self.tasks.len(), self.edge_list.len());
        for (id, task) in self.tasks.iter().enumerate() {
            dag.add_node(NodeData::new(id, task.wcet_ref));
        }
        for edge in &self.edge_list {
            dag.add_edge(
                NodeIndex::new(edge.src),
                NodeIndex::new(edge.dst),
                edge.label_size.unwrap_or(0),
            );
        }
        if is_cyclic_directed(&dag) {
            warn!("The edge list of dag {} contains a cycle.", dag_id);
        }
        Ok(dag)
    }
}
