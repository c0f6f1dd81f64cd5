//! Network specification types for the topology resolver.
//!
//! This module defines the structs that map to the `nettopo.network.yaml`
//! file. These types are declarative and fully describe the desired network
//! topology before any resolution happens.

use serde::{Deserialize, Serialize};

/// The root declarative specification for a network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkSpec {
    /// CIDR block for the whole network (e.g. "172.16.0.0/24").
    pub cidr_block: String,
    /// Availability zones the network spans.
    pub availability_zones: Vec<AvailabilityZone>,
    /// Subnet groups to derive subnets from.
    #[serde(default)]
    pub subnet_groups: Vec<SubnetGroupSpec>,
    /// Whether DNS hostnames are enabled. Requires DNS support.
    #[serde(default = "default_true")]
    pub dns_hostnames_enabled: bool,
    /// Whether DNS support is enabled.
    #[serde(default = "default_true")]
    pub dns_support_enabled: bool,
    /// Optional service endpoints to attach to the network.
    #[serde(default)]
    pub endpoints: EndpointSpec,
    /// Destination for network flow logs, if flow logging is wanted.
    #[serde(default)]
    pub flow_log_destination: Option<String>,
    /// Private hosted zone name, if internal DNS is wanted.
    #[serde(default)]
    pub hosted_zone_name: Option<String>,
    /// Whether public subnets map public addresses on launch.
    #[serde(default)]
    pub public_ips: bool,
    /// Address range allowed to reach the network from outside.
    #[serde(default)]
    pub inbound_external_ip_range: Option<String>,
}

/// A single availability zone declaration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AvailabilityZone {
    /// Zone letter, one uppercase character A through F.
    pub letter: char,
    /// Zone index, a non-negative ordinal.
    pub index: u32,
}

/// The network-visibility classification of a subnet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubnetRole {
    /// Routable from outside the network.
    Public,
    /// Outbound connectivity only.
    #[default]
    Private,
    /// No connectivity beyond the network.
    Isolated,
}

/// A named group of subnets sharing a role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubnetGroupSpec {
    /// Unique name for the group within this network.
    pub name: String,
    /// Role shared by every subnet in the group.
    #[serde(default)]
    pub role: SubnetRole,
    /// Member subnets, one per availability zone placement.
    #[serde(default)]
    pub members: Vec<SubnetMemberSpec>,
}

/// A single subnet placement within a group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubnetMemberSpec {
    /// CIDR block carved out for this subnet.
    pub cidr_block: String,
    /// Availability zone letter this subnet is placed in.
    pub az_letter: char,
}

/// Optional service endpoints attached to the network route table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct EndpointSpec {
    /// Attach an object-storage gateway endpoint.
    #[serde(default)]
    pub object_storage: bool,
    /// Attach a key-value-store gateway endpoint.
    #[serde(default)]
    pub key_value_store: bool,
    /// Additional named endpoints to attach.
    #[serde(default)]
    pub extra: Vec<String>,
}

const fn default_true() -> bool {
    true
}

impl NetworkSpec {
    /// Returns the named default specification for an isolated network:
    /// a small class-B range spanning three zones with a single private
    /// group. Callers pass this explicitly when no spec is supplied.
    #[must_use]
    pub fn default_isolated() -> Self {
        Self {
            cidr_block: String::from("172.16.0.0/24"),
            availability_zones: vec![
                AvailabilityZone { letter: 'A', index: 0 },
                AvailabilityZone { letter: 'B', index: 1 },
                AvailabilityZone { letter: 'C', index: 2 },
            ],
            subnet_groups: vec![SubnetGroupSpec {
                name: String::from("Private"),
                role: SubnetRole::Private,
                members: vec![
                    SubnetMemberSpec {
                        cidr_block: String::from("172.16.0.0/26"),
                        az_letter: 'a',
                    },
                    SubnetMemberSpec {
                        cidr_block: String::from("172.16.0.65/26"),
                        az_letter: 'b',
                    },
                    SubnetMemberSpec {
                        cidr_block: String::from("172.16.0.129/26"),
                        az_letter: 'c',
                    },
                ],
            }],
            dns_hostnames_enabled: true,
            dns_support_enabled: true,
            endpoints: EndpointSpec {
                object_storage: true,
                key_value_store: false,
                extra: vec![],
            },
            flow_log_destination: Some(String::from("network-flow-logs/default")),
            hosted_zone_name: Some(String::from("internal.example.com")),
            public_ips: false,
            inbound_external_ip_range: Some(String::from("10.0.0.0/8")),
        }
    }

    /// Returns the total number of subnet members across all groups.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.subnet_groups.iter().map(|g| g.members.len()).sum()
    }

    /// Returns group names in declaration order.
    #[must_use]
    pub fn group_names(&self) -> Vec<&str> {
        self.subnet_groups.iter().map(|g| g.name.as_str()).collect()
    }

    /// Returns true if the given letter matches a declared zone,
    /// ignoring case.
    #[must_use]
    pub fn declares_zone(&self, letter: char) -> bool {
        let wanted = letter.to_ascii_uppercase();
        self.availability_zones.iter().any(|az| az.letter == wanted)
    }
}

impl SubnetGroupSpec {
    /// Returns the zone letters this group places subnets into,
    /// in member order.
    #[must_use]
    pub fn zone_letters(&self) -> Vec<char> {
        self.members.iter().map(|m| m.az_letter).collect()
    }
}

impl std::fmt::Display for SubnetRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Isolated => "isolated",
        };
        write!(f, "{s}")
    }
}
