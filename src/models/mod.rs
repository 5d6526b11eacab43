//! Traceflow model layer
//!
//! Structure:
//! - `traceflow.rs` - The Antrea Traceflow custom resource as seen on the wire
//! - `request.rs` - Domain types the manager and the views work with

pub mod request;
pub mod traceflow;

pub use request::{DetailLink, NewTraceRequest, TraceRequest, TraceRow};
pub use traceflow::{Packet, Traceflow, TraceflowStatus};
