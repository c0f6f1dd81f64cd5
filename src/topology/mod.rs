//! Topology derivation and querying.
//!
//! This module turns a validated network specification into an immutable
//! [`Topology`] and answers selection queries against it:
//! - [`TopologyBuilder`]: deterministic spec-to-topology derivation
//! - [`Topology::select`]: role/group queries with default reification
//! - [`SelectionResult`]: per-query view with a fan-in readiness handle

mod builder;
mod model;
mod selection;

pub use builder::TopologyBuilder;
pub use model::{RouteTableId, Subnet, SubnetId, Topology};
pub use selection::{SelectionCriteria, SelectionResult};
