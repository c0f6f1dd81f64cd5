//! Emission planning and the resource emitter boundary.
//!
//! The resolver never talks to a provider. This module derives an ordered
//! [`EmissionPlan`] from a resolved topology and defines the
//! [`ResourceEmitter`] capability an external collaborator implements to
//! materialize it.

mod executor;
mod instructions;
mod planner;

pub use executor::{EmissionExecutor, EmissionReport, RecordingEmitter, ResourceEmitter};
pub use instructions::{EmissionPlan, EndpointService, ResourceInstruction};
pub use planner::EmissionPlanner;
