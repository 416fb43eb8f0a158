//! Node tree: slotmap-backed arena with ordered children and queries.

pub mod node;
pub mod tree;
pub mod query;

pub use node::{NodeData, NodeId, NodeState};
pub use tree::Dom;
