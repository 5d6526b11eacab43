//! Trace request handling
//!
//! The manager validates and persists trace requests; the graph module turns
//! a single request into a renderable snapshot.

mod graph;
mod manager;

pub use graph::{GraphEdge, GraphNode, GraphSnapshot};
pub use manager::TraceRequestManager;
