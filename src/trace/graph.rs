//! Graph snapshot for a single trace request
//!
//! Builds a two-node directed graph between the source and destination
//! endpoints of a request and renders it as Graphviz DOT text. This does not
//! discover the real network path; it is a placeholder view.

use crate::models::TraceRequest;

/// A node in the snapshot graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    /// Unique identifier for the node
    pub id: String,
    /// Text shown inside the node
    pub label: String,
}

/// A labeled directed edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub label: String,
}

/// Rendered graph for one trace request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSnapshot {
    /// Name of the trace request this graph was built for
    pub trace_name: String,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphSnapshot {
    /// Build the source -> destination graph for a request
    pub fn for_request(request: &TraceRequest) -> Self {
        let source = GraphNode {
            id: "source".to_string(),
            label: format!("{}/{}", request.source_namespace, request.source_pod),
        };
        let destination = GraphNode {
            id: "destination".to_string(),
            label: format!(
                "{}/{}",
                request.destination_namespace, request.destination_pod
            ),
        };

        let label = match request.phase() {
            Some(phase) => format!("{} ({})", request.name, phase),
            None => request.name.clone(),
        };

        let edge = GraphEdge {
            from: source.id.clone(),
            to: destination.id.clone(),
            label,
        };

        Self {
            trace_name: request.name.clone(),
            nodes: vec![source, destination],
            edges: vec![edge],
        }
    }

    /// Render as Graphviz DOT
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph traceflow {\n");
        for node in &self.nodes {
            dot.push_str(&format!(
                "  {} [label=\"{}\"];\n",
                node.id,
                escape_label(&node.label)
            ));
        }
        for edge in &self.edges {
            dot.push_str(&format!(
                "  {} -> {} [label=\"{}\"];\n",
                edge.from,
                edge.to,
                escape_label(&edge.label)
            ));
        }
        dot.push_str("}\n");
        dot
    }
}

fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
