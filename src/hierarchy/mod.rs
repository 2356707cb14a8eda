//! Hierarchy layer: reporting graph, cycle detection and policy rules.
//!
//! Everything here is built fresh for one validation run and borrows the
//! records it was built from. Nothing is cached between runs.

pub mod cycle;
pub mod graph;
pub mod policy;

pub use cycle::find_cycle_members;
pub use graph::HierarchyGraph;
pub use policy::{DatasetError, RecordError, check_record, check_roots};
