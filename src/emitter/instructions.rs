//! Emission plan types.
//!
//! A resolved topology is turned into an ordered list of
//! [`ResourceInstruction`] records for the external resource emitter. The
//! instructions carry no provider wire formats; they describe *what* to
//! materialize, in a deterministic order the emitter can rely on.

use chrono::{DateTime, Utc};

use crate::topology::{RouteTableId, SubnetId};

/// A service endpoint attachable to the network route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointService {
    /// Object-storage gateway endpoint.
    ObjectStorage,
    /// Key-value-store gateway endpoint.
    KeyValueStore,
    /// Any other endpoint, referenced by service name.
    Named(String),
}

/// A single instruction for the external resource emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceInstruction {
    /// Materialize the network itself.
    CreateNetwork {
        /// CIDR block of the network.
        cidr_block: String,
        /// Whether DNS hostnames are enabled.
        dns_hostnames_enabled: bool,
        /// Whether DNS support is enabled.
        dns_support_enabled: bool,
    },

    /// Export a named value for downstream stacks.
    ExportValue {
        /// Export name.
        name: String,
        /// Exported value, or a `${...}` reference the emitter resolves.
        value: String,
    },

    /// Materialize a flow log capturing all network traffic.
    CreateFlowLog {
        /// Log destination.
        destination: String,
    },

    /// Materialize the shared route table.
    CreateRouteTable {
        /// Route table identifier.
        id: RouteTableId,
    },

    /// Attach a service endpoint to the route table.
    CreateServiceEndpoint {
        /// Service to expose.
        service: EndpointService,
        /// Route table the endpoint binds to.
        route_table_id: RouteTableId,
    },

    /// Materialize a private hosted zone.
    CreateHostedZone {
        /// Zone name.
        name: String,
    },

    /// Materialize DHCP options carrying the zone domain.
    CreateDhcpOptions {
        /// Domain name handed to instances.
        domain_name: String,
    },

    /// Associate the DHCP options with the network.
    AssociateDhcpOptions {
        /// Domain name of the associated options.
        domain_name: String,
    },

    /// Materialize one subnet.
    CreateSubnet {
        /// Deterministic subnet identifier.
        id: SubnetId,
        /// Subnet CIDR block.
        cidr_block: String,
        /// Availability zone, as a `${region}`-prefixed reference.
        availability_zone: String,
        /// Whether instances get public addresses on launch.
        map_public_ip: bool,
    },

    /// Associate a subnet with the shared route table.
    AssociateRouteTable {
        /// Subnet to associate.
        subnet_id: SubnetId,
        /// Route table to associate with.
        route_table_id: RouteTableId,
    },

    /// Store a single string value in the parameter store.
    PutParameter {
        /// Parameter name.
        name: String,
        /// Parameter value.
        value: String,
    },

    /// Store a string list in the parameter store.
    PutParameterList {
        /// Parameter name.
        name: String,
        /// Parameter values.
        values: Vec<String>,
    },
}

impl ResourceInstruction {
    /// Returns the instruction kind as a stable label.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CreateNetwork { .. } => "create-network",
            Self::ExportValue { .. } => "export-value",
            Self::CreateFlowLog { .. } => "create-flow-log",
            Self::CreateRouteTable { .. } => "create-route-table",
            Self::CreateServiceEndpoint { .. } => "create-service-endpoint",
            Self::CreateHostedZone { .. } => "create-hosted-zone",
            Self::CreateDhcpOptions { .. } => "create-dhcp-options",
            Self::AssociateDhcpOptions { .. } => "associate-dhcp-options",
            Self::CreateSubnet { .. } => "create-subnet",
            Self::AssociateRouteTable { .. } => "associate-route-table",
            Self::PutParameter { .. } => "put-parameter",
            Self::PutParameterList { .. } => "put-parameter-list",
        }
    }

    /// Returns the name of the resource this instruction touches.
    #[must_use]
    pub fn resource_name(&self) -> String {
        match self {
            Self::CreateNetwork { cidr_block, .. } => cidr_block.clone(),
            Self::ExportValue { name, .. }
            | Self::CreateHostedZone { name }
            | Self::PutParameter { name, .. }
            | Self::PutParameterList { name, .. } => name.clone(),
            Self::CreateFlowLog { destination } => destination.clone(),
            Self::CreateRouteTable { id } => id.to_string(),
            Self::CreateServiceEndpoint { service, .. } => service.to_string(),
            Self::CreateDhcpOptions { domain_name }
            | Self::AssociateDhcpOptions { domain_name } => domain_name.clone(),
            Self::CreateSubnet { id, .. } => id.to_string(),
            Self::AssociateRouteTable { subnet_id, .. } => subnet_id.to_string(),
        }
    }
}

impl std::fmt::Display for EndpointService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ObjectStorage => write!(f, "object-storage"),
            Self::KeyValueStore => write!(f, "key-value-store"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

impl std::fmt::Display for ResourceInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind(), self.resource_name())
    }
}

/// A complete emission plan: every instruction needed to materialize one
/// resolved topology, in emission order.
#[derive(Debug)]
pub struct EmissionPlan {
    /// When the plan was created.
    pub created_at: DateTime<Utc>,
    /// Fingerprint of the spec this plan was derived from.
    pub spec_hash: String,
    /// Instructions in emission order.
    pub instructions: Vec<ResourceInstruction>,
}

impl EmissionPlan {
    /// Creates a plan from an ordered instruction list.
    #[must_use]
    pub fn new(spec_hash: impl Into<String>, instructions: Vec<ResourceInstruction>) -> Self {
        Self {
            created_at: Utc::now(),
            spec_hash: spec_hash.into(),
            instructions,
        }
    }

    /// Returns true if the plan has no instructions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Returns the number of instructions.
    #[must_use]
    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }

    /// Returns the number of subnets the plan creates.
    #[must_use]
    pub fn subnet_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| matches!(i, ResourceInstruction::CreateSubnet { .. }))
            .count()
    }

    /// Returns the number of exported values.
    #[must_use]
    pub fn export_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| matches!(i, ResourceInstruction::ExportValue { .. }))
            .count()
    }

    /// Returns the number of parameter-store entries.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| {
                matches!(
                    i,
                    ResourceInstruction::PutParameter { .. }
                        | ResourceInstruction::PutParameterList { .. }
                )
            })
            .count()
    }
}

impl std::fmt::Display for EmissionPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.instructions.is_empty() {
            return write!(f, "Nothing to emit");
        }

        writeln!(f, "Emission Plan ({} instructions):", self.instructions.len())?;
        for (i, instruction) in self.instructions.iter().enumerate() {
            writeln!(f, "  {i}. {instruction}")?;
        }
        write!(
            f,
            "Plan: {} subnets, {} exports, {} parameters",
            self.subnet_count(),
            self.export_count(),
            self.parameter_count()
        )
    }
}
