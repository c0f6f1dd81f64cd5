//! Resolved topology types.
//!
//! A [`Topology`] is the fully resolved, immutable set of subnets derived
//! from a [`NetworkSpec`](crate::spec::NetworkSpec). Subnets are partitioned
//! by role and additionally indexed by group name. Once built, a topology
//! never changes, so concurrent queries need no locking.

use std::collections::HashMap;

use crate::readiness::ReadinessSignal;
use crate::spec::SubnetRole;

/// Opaque identifier for a derived subnet.
///
/// Deterministic: always `<group name>-<zone letter>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubnetId(String);

impl SubnetId {
    /// Derives the identifier for a group member placement.
    pub(crate) fn for_member(group_name: &str, az_letter: char) -> Self {
        Self(format!("{group_name}-{}", az_letter.to_ascii_lowercase()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubnetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier for a route table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteTableId(String);

impl RouteTableId {
    /// The single route table shared by every subnet in a network.
    pub(crate) fn shared() -> Self {
        Self(String::from("main"))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RouteTableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single resolved subnet. Immutable once built; owned by its topology.
#[derive(Debug, Clone)]
pub struct Subnet {
    /// Deterministic subnet identifier.
    pub id: SubnetId,
    /// Name of the group this subnet belongs to.
    pub group_name: String,
    /// Network-visibility role inherited from the group.
    pub role: SubnetRole,
    /// Availability zone this subnet is placed in (lowercase letter;
    /// the emitter prefixes the region).
    pub availability_zone: String,
    /// CIDR block carved out for this subnet.
    pub cidr_block: String,
    /// Route table this subnet is associated with.
    pub route_table_id: RouteTableId,
    /// Fires once the subnet's backing resources exist.
    pub readiness: ReadinessSignal,
}

/// The fully resolved, immutable set of subnets for one network spec.
#[derive(Debug)]
pub struct Topology {
    /// Network CIDR block the topology was derived from.
    cidr_block: String,
    /// Fingerprint of the originating spec.
    spec_hash: String,
    /// Public subnets, in derivation order.
    public_subnets: Vec<Subnet>,
    /// Private subnets, in derivation order.
    private_subnets: Vec<Subnet>,
    /// Isolated subnets, in derivation order.
    isolated_subnets: Vec<Subnet>,
    /// Group name to subnet ids, in topology iteration order.
    group_index: HashMap<String, Vec<SubnetId>>,
}

impl Topology {
    /// Assembles a topology from role-partitioned subnets.
    pub(crate) fn new(
        cidr_block: String,
        spec_hash: String,
        public_subnets: Vec<Subnet>,
        private_subnets: Vec<Subnet>,
        isolated_subnets: Vec<Subnet>,
    ) -> Self {
        let mut group_index: HashMap<String, Vec<SubnetId>> = HashMap::new();
        for subnet in public_subnets
            .iter()
            .chain(&private_subnets)
            .chain(&isolated_subnets)
        {
            group_index
                .entry(subnet.group_name.clone())
                .or_default()
                .push(subnet.id.clone());
        }

        Self {
            cidr_block,
            spec_hash,
            public_subnets,
            private_subnets,
            isolated_subnets,
            group_index,
        }
    }

    /// Returns the network CIDR block.
    #[must_use]
    pub fn cidr_block(&self) -> &str {
        &self.cidr_block
    }

    /// Returns the fingerprint of the originating spec.
    #[must_use]
    pub fn spec_hash(&self) -> &str {
        &self.spec_hash
    }

    /// Returns the public subnets, in derivation order.
    #[must_use]
    pub fn public_subnets(&self) -> &[Subnet] {
        &self.public_subnets
    }

    /// Returns the private subnets, in derivation order.
    #[must_use]
    pub fn private_subnets(&self) -> &[Subnet] {
        &self.private_subnets
    }

    /// Returns the isolated subnets, in derivation order.
    #[must_use]
    pub fn isolated_subnets(&self) -> &[Subnet] {
        &self.isolated_subnets
    }

    /// Returns the partition for the given role.
    #[must_use]
    pub fn partition(&self, role: SubnetRole) -> &[Subnet] {
        match role {
            SubnetRole::Public => &self.public_subnets,
            SubnetRole::Private => &self.private_subnets,
            SubnetRole::Isolated => &self.isolated_subnets,
        }
    }

    /// Iterates every subnet in topology order: public, then private,
    /// then isolated; insertion order within each partition.
    pub fn iter(&self) -> impl Iterator<Item = &Subnet> {
        self.public_subnets
            .iter()
            .chain(&self.private_subnets)
            .chain(&self.isolated_subnets)
    }

    /// Returns the subnets belonging to the named group, in topology
    /// iteration order.
    #[must_use]
    pub fn subnets_in_group(&self, group_name: &str) -> Vec<&Subnet> {
        self.iter().filter(|s| s.group_name == group_name).collect()
    }

    /// Returns true if the named group derived at least one subnet.
    #[must_use]
    pub fn contains_group(&self, group_name: &str) -> bool {
        self.group_index.contains_key(group_name)
    }

    /// Looks up a subnet by its identifier.
    #[must_use]
    pub fn subnet(&self, id: &SubnetId) -> Option<&Subnet> {
        self.iter().find(|s| s.id == *id)
    }

    /// Returns the total number of subnets.
    #[must_use]
    pub fn subnet_count(&self) -> usize {
        self.public_subnets.len() + self.private_subnets.len() + self.isolated_subnets.len()
    }

    /// Returns true if the topology holds no subnets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subnet_count() == 0
    }

    /// Returns the number of groups that derived subnets.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.group_index.len()
    }

    /// Returns the distinct availability zones, deduplicated, in
    /// topology iteration order.
    #[must_use]
    pub fn availability_zones(&self) -> Vec<String> {
        let mut zones = Vec::new();
        for subnet in self.iter() {
            if !zones.contains(&subnet.availability_zone) {
                zones.push(subnet.availability_zone.clone());
            }
        }
        zones
    }
}
