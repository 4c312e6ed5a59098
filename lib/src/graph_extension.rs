use petgraph::graph::{Graph, NodeIndex};
use petgraph::Direction::{Incoming, Outgoing};

/// custom node data structure for dag nodes (petgraph)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NodeData {
    pub id: usize,
    /// in ns
    pub wcet_ref: i64,
}

impl NodeData {
    pub fn new(id: usize, wcet_ref: i64) -> NodeData {
        NodeData { id, wcet_ref }
    }
}

pub trait GraphExtension {
    fn get_in_degree(&self, node_i: NodeIndex) -> usize;
    fn get_out_degree(&self, node_i: NodeIndex) -> usize;
    fn get_max_in_degree(&self) -> usize;
    fn get_max_out_degree(&self) -> usize;
    fn get_adjacency_matrix(&self) -> Vec<Vec<i32>>;
}

impl<E> GraphExtension for Graph<NodeData, E> {
    // Parallel edges are counted once each, like the raw edge list.
    fn get_in_degree(&self, node_i: NodeIndex) -> usize {
        self.edges_directed(node_i, Incoming).count()
    }

    fn get_out_degree(&self, node_i: NodeIndex) -> usize {
        self.edges_directed(node_i, Outgoing).count()
    }

    fn get_max_in_degree(&self) -> usize {
        self.node_indices()
            .map(|node_i| self.get_in_degree(node_i))
            .max()
            .unwrap_or(0)
    }

    fn get_max_out_degree(&self) -> usize {
        self.node_indices()
            .map(|node_i| self.get_out_degree(node_i))
            .max()
            .unwrap_or(0)
    }

    /// Square matrix indexed by node id: `matrix[src][dst] == 1` iff an edge exists.
    fn get_adjacency_matrix(&self) -> Vec<Vec<i32>> {
        let node_count = self.node_count();
        let mut matrix = vec![vec![0; node_count]; node_count];
        for edge_i in self.edge_indices() {
            if let Some((src, dst)) = self.edge_endpoints(edge_i) {
                matrix[self[src].id][self[dst].id] = 1;
            }
        }
        matrix
    }
}
