//! Emission planning.
//!
//! Walks a spec and its resolved topology and produces the ordered
//! instruction list the external resource emitter consumes: network first,
//! then network-wide fixtures (flow log, route table, endpoints, zone),
//! then every subnet with its association and exports, then per-group
//! exports and parameter-store entries.

use tracing::debug;

use crate::spec::NetworkSpec;
use crate::topology::Topology;

use super::instructions::{EmissionPlan, EndpointService, ResourceInstruction};

/// Planner deriving emission plans from resolved topologies.
#[derive(Debug, Default)]
pub struct EmissionPlanner;

impl EmissionPlanner {
    /// Creates a new emission planner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Derives the emission plan for a spec and its topology.
    #[must_use]
    pub fn plan(&self, spec: &NetworkSpec, topology: &Topology) -> EmissionPlan {
        let mut instructions = Vec::new();

        instructions.push(ResourceInstruction::CreateNetwork {
            cidr_block: spec.cidr_block.clone(),
            dns_hostnames_enabled: spec.dns_hostnames_enabled,
            dns_support_enabled: spec.dns_support_enabled,
        });
        instructions.push(ResourceInstruction::ExportValue {
            name: String::from("network-id"),
            value: String::from("${network.id}"),
        });
        instructions.push(ResourceInstruction::ExportValue {
            name: String::from("network-cidr"),
            value: spec.cidr_block.clone(),
        });

        if let Some(destination) = &spec.flow_log_destination {
            instructions.push(ResourceInstruction::CreateFlowLog {
                destination: destination.clone(),
            });
        }

        // Every derived subnet carries the same shared route table id.
        let route_table_id = topology.iter().next().map_or_else(
            crate::topology::RouteTableId::shared,
            |s| s.route_table_id.clone(),
        );
        instructions.push(ResourceInstruction::CreateRouteTable {
            id: route_table_id.clone(),
        });

        if spec.endpoints.object_storage {
            instructions.push(ResourceInstruction::CreateServiceEndpoint {
                service: EndpointService::ObjectStorage,
                route_table_id: route_table_id.clone(),
            });
        }
        if spec.endpoints.key_value_store {
            instructions.push(ResourceInstruction::CreateServiceEndpoint {
                service: EndpointService::KeyValueStore,
                route_table_id: route_table_id.clone(),
            });
        }
        for name in &spec.endpoints.extra {
            instructions.push(ResourceInstruction::CreateServiceEndpoint {
                service: EndpointService::Named(name.clone()),
                route_table_id: route_table_id.clone(),
            });
        }

        if let Some(zone) = &spec.hosted_zone_name {
            instructions.push(ResourceInstruction::CreateHostedZone { name: zone.clone() });
            instructions.push(ResourceInstruction::CreateDhcpOptions {
                domain_name: zone.clone(),
            });
            instructions.push(ResourceInstruction::AssociateDhcpOptions {
                domain_name: zone.clone(),
            });
        }

        for group in &spec.subnet_groups {
            let subnets = topology.subnets_in_group(&group.name);
            let mut subnet_ids = Vec::with_capacity(subnets.len());

            for subnet in subnets {
                instructions.push(ResourceInstruction::CreateSubnet {
                    id: subnet.id.clone(),
                    cidr_block: subnet.cidr_block.clone(),
                    availability_zone: format!("${{region}}{}", subnet.availability_zone),
                    map_public_ip: spec.public_ips
                        && subnet.role == crate::spec::SubnetRole::Public,
                });
                instructions.push(ResourceInstruction::AssociateRouteTable {
                    subnet_id: subnet.id.clone(),
                    route_table_id: subnet.route_table_id.clone(),
                });
                instructions.push(ResourceInstruction::ExportValue {
                    name: format!("subnet-{}", subnet.id),
                    value: subnet.id.to_string(),
                });
                subnet_ids.push(subnet.id.to_string());
            }

            let joined = subnet_ids.join(",");
            instructions.push(ResourceInstruction::ExportValue {
                name: format!("{}-subnet-list", group.name),
                value: joined.clone(),
            });
            instructions.push(ResourceInstruction::PutParameterList {
                name: format!("/output/network/{}/subnet-list", group.name),
                values: subnet_ids,
            });
            instructions.push(ResourceInstruction::PutParameter {
                name: format!("/output/network/{}/subnets", group.name),
                value: joined,
            });
        }

        debug!(
            "Planned {} instructions for spec {}",
            instructions.len(),
            topology.spec_hash()
        );
        EmissionPlan::new(topology.spec_hash(), instructions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::TopologyBuilder;

    fn plan_default() -> EmissionPlan {
        let spec = NetworkSpec::default_isolated();
        let topology = TopologyBuilder::new().build(&spec).unwrap();
        EmissionPlanner::new().plan(&spec, &topology)
    }

    #[test]
    fn test_network_comes_first() {
        let plan = plan_default();
        assert!(matches!(
            plan.instructions[0],
            ResourceInstruction::CreateNetwork { .. }
        ));
    }

    #[test]
    fn test_route_table_precedes_subnets() {
        let plan = plan_default();
        let route_table_pos = plan
            .instructions
            .iter()
            .position(|i| matches!(i, ResourceInstruction::CreateRouteTable { .. }))
            .unwrap();
        let first_subnet_pos = plan
            .instructions
            .iter()
            .position(|i| matches!(i, ResourceInstruction::CreateSubnet { .. }))
            .unwrap();
        assert!(route_table_pos < first_subnet_pos);
    }

    #[test]
    fn test_default_plan_counts() {
        let plan = plan_default();
        assert_eq!(plan.subnet_count(), 3);
        // network-id, network-cidr, 3 per-subnet, 1 group list
        assert_eq!(plan.export_count(), 6);
        assert_eq!(plan.parameter_count(), 2);
    }

    #[test]
    fn test_object_storage_endpoint_present() {
        let plan = plan_default();
        assert!(plan.instructions.iter().any(|i| matches!(
            i,
            ResourceInstruction::CreateServiceEndpoint {
                service: EndpointService::ObjectStorage,
                ..
            }
        )));
        assert!(!plan.instructions.iter().any(|i| matches!(
            i,
            ResourceInstruction::CreateServiceEndpoint {
                service: EndpointService::KeyValueStore,
                ..
            }
        )));
    }

    #[test]
    fn test_no_flow_log_when_unset() {
        let mut spec = NetworkSpec::default_isolated();
        spec.flow_log_destination = None;
        let topology = TopologyBuilder::new().build(&spec).unwrap();
        let plan = EmissionPlanner::new().plan(&spec, &topology);

        assert!(!plan
            .instructions
            .iter()
            .any(|i| matches!(i, ResourceInstruction::CreateFlowLog { .. })));
    }

    #[test]
    fn test_no_zone_fixtures_when_unset() {
        let mut spec = NetworkSpec::default_isolated();
        spec.hosted_zone_name = None;
        let topology = TopologyBuilder::new().build(&spec).unwrap();
        let plan = EmissionPlanner::new().plan(&spec, &topology);

        assert!(!plan.instructions.iter().any(|i| matches!(
            i,
            ResourceInstruction::CreateHostedZone { .. }
                | ResourceInstruction::CreateDhcpOptions { .. }
                | ResourceInstruction::AssociateDhcpOptions { .. }
        )));
    }

    #[test]
    fn test_group_list_export_joins_ids_in_order() {
        let plan = plan_default();
        let export = plan
            .instructions
            .iter()
            .find_map(|i| match i {
                ResourceInstruction::ExportValue { name, value }
                    if name == "Private-subnet-list" =>
                {
                    Some(value.clone())
                }
                _ => None,
            })
            .unwrap();
        assert_eq!(export, "Private-a,Private-b,Private-c");
    }

    #[test]
    fn test_zone_references_carry_region_placeholder() {
        let plan = plan_default();
        let zones: Vec<&str> = plan
            .instructions
            .iter()
            .filter_map(|i| match i {
                ResourceInstruction::CreateSubnet {
                    availability_zone, ..
                } => Some(availability_zone.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(zones, vec!["${region}a", "${region}b", "${region}c"]);
    }

    #[test]
    fn test_plan_is_deterministic() {
        let first = plan_default();
        let second = plan_default();
        assert_eq!(first.instructions, second.instructions);
    }
}
