//! DOT (Graphviz) rendering of the dependency graph.
//!
//! Node identifiers have `/`, `.`, and `-` substituted with underscores
//! so every path becomes a valid DOT identifier; the display label stays
//! the readable basename.

use crate::graph::GraphExport;

fn sanitize(id: &str) -> String {
    id.replace(['/', '.', '-'], "_")
}

/// Render a graph export as a `digraph`.
pub fn export(graph: &GraphExport) -> String {
    let mut out = String::from("digraph DependencyGraph {\n");
    out.push_str("  node [shape=box];\n");

    for node in &graph.nodes {
        out.push_str(&format!(
            "  {} [label=\"{}\"];\n",
            sanitize(&node.id),
            node.label
        ));
    }

    for edge in &graph.edges {
        out.push_str(&format!(
            "  {} -> {} [label=\"{}\"];\n",
            sanitize(&edge.source),
            sanitize(&edge.target),
            edge.kind
        ));
    }

    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphEdge, GraphNode};

    #[test]
    fn test_identifiers_sanitized() {
        let graph = GraphExport {
            nodes: vec![GraphNode {
                id: "src/utils/date-utils.py".to_string(),
                label: "date-utils.py".to_string(),
            }],
            edges: vec![],
        };
        let out = export(&graph);
        assert!(out.contains("src_utils_date_utils_py [label=\"date-utils.py\"];"));
    }

    #[test]
    fn test_edges_rendered_with_kind() {
        let graph = GraphExport {
            nodes: vec![
                GraphNode {
                    id: "main.py".to_string(),
                    label: "main.py".to_string(),
                },
                GraphNode {
                    id: "util.py".to_string(),
                    label: "util.py".to_string(),
                },
            ],
            edges: vec![GraphEdge {
                source: "main.py".to_string(),
                target: "util.py".to_string(),
                kind: "import".to_string(),
            }],
        };
        let out = export(&graph);
        assert!(out.starts_with("digraph DependencyGraph {"));
        assert!(out.contains("main_py -> util_py [label=\"import\"];"));
    }
}
