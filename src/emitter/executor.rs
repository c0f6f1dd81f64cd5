//! Emission plan execution.
//!
//! Walks an [`EmissionPlan`] through an injected [`ResourceEmitter`] and
//! fires each subnet's readiness signal once its route-table association
//! has been applied. The emitter is a capability handed in by the caller;
//! this module never talks to a provider itself.

use async_trait::async_trait;
use std::sync::Mutex;
use tracing::{error, info};

use crate::error::Result;
use crate::topology::Topology;

use super::instructions::{EmissionPlan, ResourceInstruction};

/// Capability that materializes resource instructions.
#[async_trait]
pub trait ResourceEmitter: Send + Sync {
    /// Applies a single instruction.
    async fn apply(&self, instruction: &ResourceInstruction) -> Result<()>;

    /// Gets the emitter type name.
    fn emitter_type(&self) -> &'static str;
}

/// In-memory emitter that records every applied instruction.
///
/// Used for rehearsals and tests; applying never fails.
#[derive(Debug, Default)]
pub struct RecordingEmitter {
    /// Descriptions of applied instructions, in order.
    applied: Mutex<Vec<String>>,
}

impl RecordingEmitter {
    /// Creates a new recording emitter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the applied instruction descriptions, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn applied(&self) -> Vec<String> {
        self.applied.lock().expect("recorder lock poisoned").clone()
    }
}

#[async_trait]
impl ResourceEmitter for RecordingEmitter {
    async fn apply(&self, instruction: &ResourceInstruction) -> Result<()> {
        self.applied
            .lock()
            .expect("recorder lock poisoned")
            .push(instruction.to_string());
        Ok(())
    }

    fn emitter_type(&self) -> &'static str {
        "recording"
    }
}

/// Executor walking emission plans through a resource emitter.
pub struct EmissionExecutor<'a> {
    /// Injected emitter capability.
    emitter: &'a dyn ResourceEmitter,
    /// Whether to continue past failing instructions.
    continue_on_error: bool,
}

/// Result of executing an emission plan.
#[derive(Debug)]
pub struct EmissionReport {
    /// Number of applied instructions.
    pub applied: usize,
    /// Failed instructions with their errors.
    pub failed: Vec<String>,
    /// Number of subnets whose readiness fired during execution.
    pub ready_subnets: usize,
}

impl<'a> EmissionExecutor<'a> {
    /// Creates a new executor over the given emitter.
    #[must_use]
    pub const fn new(emitter: &'a dyn ResourceEmitter) -> Self {
        Self {
            emitter,
            continue_on_error: false,
        }
    }

    /// Sets whether to continue past failing instructions.
    #[must_use]
    pub const fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    /// Executes an emission plan against the topology it was planned for.
    ///
    /// # Errors
    ///
    /// Returns the first emitter error when `continue_on_error` is false.
    pub async fn execute(
        &self,
        plan: &EmissionPlan,
        topology: &Topology,
    ) -> Result<EmissionReport> {
        info!(
            "Executing emission plan with {} instructions via {} emitter",
            plan.instruction_count(),
            self.emitter.emitter_type()
        );

        let mut applied = 0;
        let mut failed = Vec::new();

        for instruction in &plan.instructions {
            match self.emitter.apply(instruction).await {
                Ok(()) => {
                    applied += 1;
                    // A subnet is reachable once its route association
                    // exists; that is the readiness boundary.
                    if let ResourceInstruction::AssociateRouteTable { subnet_id, .. } =
                        instruction
                    {
                        if let Some(subnet) = topology.subnet(subnet_id) {
                            subnet.readiness.mark_ready();
                        }
                    }
                }
                Err(e) => {
                    error!("Failed to apply {instruction}: {e}");
                    if !self.continue_on_error {
                        return Err(e);
                    }
                    failed.push(format!("{instruction}: {e}"));
                }
            }
        }

        let ready_subnets = topology.iter().filter(|s| s.readiness.is_ready()).count();

        Ok(EmissionReport {
            applied,
            failed,
            ready_subnets,
        })
    }
}

impl EmissionReport {
    /// Returns true if every instruction was applied.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

impl std::fmt::Display for EmissionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Applied {} instructions: {} failed, {} subnets ready",
            self.applied,
            self.failed.len(),
            self.ready_subnets
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::planner::EmissionPlanner;
    use crate::error::{EmitError, NettopoError};
    use crate::spec::NetworkSpec;
    use crate::topology::{SelectionCriteria, TopologyBuilder};

    /// Emitter that rejects every subnet instruction.
    struct SubnetRejectingEmitter;

    #[async_trait]
    impl ResourceEmitter for SubnetRejectingEmitter {
        async fn apply(&self, instruction: &ResourceInstruction) -> Result<()> {
            if let ResourceInstruction::CreateSubnet { id, .. } = instruction {
                return Err(NettopoError::Emit(EmitError::rejected(
                    instruction.kind(),
                    id.to_string(),
                    "rejected by test emitter",
                )));
            }
            Ok(())
        }

        fn emitter_type(&self) -> &'static str {
            "rejecting"
        }
    }

    fn default_plan() -> (NetworkSpec, Topology, EmissionPlan) {
        let spec = NetworkSpec::default_isolated();
        let topology = TopologyBuilder::new().build(&spec).unwrap();
        let plan = EmissionPlanner::new().plan(&spec, &topology);
        (spec, topology, plan)
    }

    #[tokio::test]
    async fn test_execute_applies_everything_in_order() {
        let (_, topology, plan) = default_plan();
        let emitter = RecordingEmitter::new();

        let report = EmissionExecutor::new(&emitter)
            .execute(&plan, &topology)
            .await
            .unwrap();

        assert!(report.is_clean());
        assert_eq!(report.applied, plan.instruction_count());
        assert_eq!(report.ready_subnets, 3);

        let applied = emitter.applied();
        assert_eq!(applied.len(), plan.instruction_count());
        assert!(applied[0].starts_with("create-network"));
    }

    #[tokio::test]
    async fn test_execute_fires_selection_readiness() {
        let (_, topology, plan) = default_plan();
        let selection = topology.select(&SelectionCriteria::default()).unwrap();
        assert!(!selection.readiness.is_ready());

        let emitter = RecordingEmitter::new();
        EmissionExecutor::new(&emitter)
            .execute(&plan, &topology)
            .await
            .unwrap();

        assert!(selection.readiness.is_ready());
        selection.readiness.wait().await;
    }

    #[tokio::test]
    async fn test_execute_stops_on_first_error_by_default() {
        let (_, topology, plan) = default_plan();

        let result = EmissionExecutor::new(&SubnetRejectingEmitter)
            .execute(&plan, &topology)
            .await;

        assert!(result.is_err());
        assert_eq!(
            topology.iter().filter(|s| s.readiness.is_ready()).count(),
            0
        );
    }

    #[tokio::test]
    async fn test_execute_continues_on_error_when_asked() {
        let (_, topology, plan) = default_plan();

        let report = EmissionExecutor::new(&SubnetRejectingEmitter)
            .with_continue_on_error(true)
            .execute(&plan, &topology)
            .await
            .unwrap();

        assert_eq!(report.failed.len(), 3);
        assert!(!report.is_clean());
        // Associations still applied, so subnets still become ready.
        assert_eq!(report.ready_subnets, 3);
    }
}
