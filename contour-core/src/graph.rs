//! Dependency graph built from snapshot imports, powered by petgraph.
//!
//! One node per analyzed file. An edge is added whenever an import's
//! declared module string matches a candidate file path by substring, or
//! matches with dots replaced by path separators. This is a heuristic
//! resolver that tolerates false positives; fan-out to multiple matching
//! targets produces one edge each, and repeated matches from distinct
//! import statements are kept as parallel edges.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::algo::kosaraju_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::Snapshot;

/// Directed file-dependency graph.
pub struct DependencyGraph {
    graph: DiGraph<String, String>,
    node_map: HashMap<String, NodeIndex>,
}

/// Serializable graph form: `{nodes, edges}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl DependencyGraph {
    /// Build the graph from a snapshot's import lists.
    pub fn resolve(snapshot: &Snapshot) -> Self {
        let mut graph = DiGraph::new();
        let mut node_map = HashMap::with_capacity(snapshot.len());

        for record in &snapshot.files {
            let idx = graph.add_node(record.path.clone());
            node_map.insert(record.path.clone(), idx);
        }

        let mut edge_count = 0usize;
        for record in &snapshot.files {
            let source = node_map[&record.path];
            for import in &record.imports {
                let as_path = import.module.replace('.', "/");
                for candidate in &snapshot.files {
                    if candidate.path.contains(import.module.as_str())
                        || candidate.path.contains(as_path.as_str())
                    {
                        let target = node_map[&candidate.path];
                        graph.add_edge(source, target, import.kind.as_str().to_string());
                        edge_count += 1;
                    }
                }
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = edge_count,
            "dependency graph resolved"
        );
        Self { graph, node_map }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether any edge connects `source` to `target`.
    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        match (self.node_map.get(source), self.node_map.get(target)) {
            (Some(&s), Some(&t)) => self.graph.find_edge(s, t).is_some(),
            _ => false,
        }
    }

    /// Strongly connected components with more than one node. Kosaraju,
    /// O(V + E).
    pub fn cycles(&self) -> Vec<Vec<String>> {
        kosaraju_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| scc.into_iter().map(|idx| self.graph[idx].clone()).collect())
            .collect()
    }

    /// Files that (transitively) import `path`. BFS over incoming edges.
    pub fn dependents(&self, path: &str) -> Vec<String> {
        self.traverse(path, Direction::Incoming)
    }

    /// Files that `path` (transitively) imports. BFS over outgoing edges.
    pub fn dependencies(&self, path: &str) -> Vec<String> {
        self.traverse(path, Direction::Outgoing)
    }

    fn traverse(&self, path: &str, direction: Direction) -> Vec<String> {
        let Some(&start) = self.node_map.get(path) else {
            return Vec::new();
        };

        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut queue = VecDeque::new();
        let mut result = Vec::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(node) = queue.pop_front() {
            for neighbor in self.graph.neighbors_directed(node, direction) {
                if visited.insert(neighbor) {
                    result.push(self.graph[neighbor].clone());
                    queue.push_back(neighbor);
                }
            }
        }

        result
    }

    /// Serializable `{nodes, edges}` form. Labels are file basenames.
    pub fn export(&self) -> GraphExport {
        let nodes = self
            .graph
            .node_indices()
            .map(|idx| {
                let id = self.graph[idx].clone();
                let label = id.rsplit('/').next().unwrap_or(&id).to_string();
                GraphNode { id, label }
            })
            .collect();

        let edges = self
            .graph
            .edge_references()
            .map(|edge| GraphEdge {
                source: self.graph[edge.source()].clone(),
                target: self.graph[edge.target()].clone(),
                kind: edge.weight().clone(),
            })
            .collect();

        GraphExport { nodes, edges }
    }
}
