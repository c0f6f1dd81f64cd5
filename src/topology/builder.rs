//! Topology derivation.
//!
//! Expands a validated [`NetworkSpec`] into a concrete [`Topology`]. The
//! builder is a pure function of its input: groups and members are visited
//! in declaration order, identifiers are derived from names, and no state
//! is shared between builds, so distinct specs can be built concurrently
//! without locking.

use tracing::debug;

use crate::error::Result;
use crate::readiness::ReadinessSignal;
use crate::spec::{NetworkSpec, SpecHasher, SpecValidator, SubnetRole};

use super::model::{RouteTableId, Subnet, SubnetId, Topology};

/// Builder deriving topologies from network specifications.
#[derive(Debug, Default)]
pub struct TopologyBuilder {
    /// Validator run before derivation.
    validator: SpecValidator,
    /// Hasher used to fingerprint the originating spec.
    hasher: SpecHasher,
}

impl TopologyBuilder {
    /// Creates a new topology builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            validator: SpecValidator::new(),
            hasher: SpecHasher::new(),
        }
    }

    /// Derives a topology from the given specification.
    ///
    /// The spec is re-validated first, so an invalid spec fails here with
    /// the same error kind as [`SpecValidator::validate`].
    ///
    /// # Errors
    ///
    /// Returns a validation error if the spec is inconsistent.
    pub fn build(&self, spec: &NetworkSpec) -> Result<Topology> {
        self.validator.validate(spec)?;

        let spec_hash = self.hasher.hash_spec(spec);
        let route_table_id = RouteTableId::shared();

        let mut public_subnets = Vec::new();
        let mut private_subnets = Vec::new();
        let mut isolated_subnets = Vec::new();

        for group in &spec.subnet_groups {
            for member in &group.members {
                let subnet = Subnet {
                    id: SubnetId::for_member(&group.name, member.az_letter),
                    group_name: group.name.clone(),
                    role: group.role,
                    availability_zone: member.az_letter.to_ascii_lowercase().to_string(),
                    cidr_block: member.cidr_block.clone(),
                    route_table_id: route_table_id.clone(),
                    readiness: ReadinessSignal::new(),
                };

                match group.role {
                    SubnetRole::Public => public_subnets.push(subnet),
                    SubnetRole::Private => private_subnets.push(subnet),
                    SubnetRole::Isolated => isolated_subnets.push(subnet),
                }
            }
        }

        let topology = Topology::new(
            spec.cidr_block.clone(),
            spec_hash,
            public_subnets,
            private_subnets,
            isolated_subnets,
        );

        debug!(
            "Derived {} subnets across {} groups for network {}",
            topology.subnet_count(),
            topology.group_count(),
            topology.cidr_block()
        );
        Ok(topology)
    }
}
