//! Subnet selection queries.
//!
//! Answers "which subnets match these criteria" against a built
//! [`Topology`]. Queries are read-only and independent, so any number of
//! them can run concurrently against a shared topology.

use tracing::debug;

use crate::error::{NettopoError, Result, SelectionError};
use crate::readiness::CompositeReadiness;
use crate::spec::SubnetRole;

use super::model::{Subnet, SubnetId, Topology};

/// Criteria describing which subnets to select.
///
/// `role` and `group_name` are mutually exclusive; supplying neither
/// selects private subnets.
#[derive(Debug, Clone, Default)]
pub struct SelectionCriteria {
    /// Select by role. Exclusive with `group_name`.
    pub role: Option<SubnetRole>,
    /// Select by group name. Exclusive with `role`.
    pub group_name: Option<String>,
    /// Restrict the result to the subnet group of the first match.
    ///
    /// Despite the name, this does not pick one subnet per availability
    /// zone: it narrows the result to at most one subnet *group*.
    pub one_per_az: bool,
}

impl SelectionCriteria {
    /// Criteria selecting subnets with the given role.
    #[must_use]
    pub const fn by_role(role: SubnetRole) -> Self {
        Self {
            role: Some(role),
            group_name: None,
            one_per_az: false,
        }
    }

    /// Criteria selecting subnets in the named group.
    #[must_use]
    pub fn by_group(name: impl Into<String>) -> Self {
        Self {
            role: None,
            group_name: Some(name.into()),
            one_per_az: false,
        }
    }

    /// Enables the one-group restriction.
    #[must_use]
    pub fn with_one_per_az(mut self) -> Self {
        self.one_per_az = true;
        self
    }

    /// Returns a human-readable description of the criteria, used in
    /// no-match diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        if let Some(role) = self.role {
            return format!("'{role}' subnets");
        }
        if let Some(name) = &self.group_name {
            return format!("subnets named '{name}'");
        }
        String::from("default subnets")
    }

    /// If the criteria are completely default, reifies the defaults so
    /// downstream code does not repeat the same analysis.
    ///
    /// Selects private subnets by default.
    fn reify_defaults(&self) -> Result<Self> {
        if self.role.is_some() && self.group_name.is_some() {
            return Err(NettopoError::Selection(SelectionError::AmbiguousCriteria));
        }

        if self.role.is_none() && self.group_name.is_none() {
            return Ok(Self {
                role: Some(SubnetRole::Private),
                group_name: None,
                one_per_az: self.one_per_az,
            });
        }

        Ok(self.clone())
    }
}

/// The outcome of a selection query. Constructed fresh per query;
/// borrows the queried topology.
#[derive(Debug)]
pub struct SelectionResult<'a> {
    /// Matching subnets, in topology iteration order.
    pub subnets: Vec<&'a Subnet>,
    /// Distinct availability zones of the matches, deduplicated,
    /// in match order.
    pub availability_zones: Vec<String>,
    /// True if any match is a public subnet.
    pub has_public: bool,
    /// Fan-in readiness over every matching subnet.
    pub readiness: CompositeReadiness,
}

impl SelectionResult<'_> {
    /// Returns the identifiers of the matching subnets, in order.
    #[must_use]
    pub fn subnet_ids(&self) -> Vec<&SubnetId> {
        self.subnets.iter().map(|s| &s.id).collect()
    }

    /// Returns the number of matching subnets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subnets.len()
    }

    /// Returns true if no subnets matched. Unreachable through
    /// [`Topology::select`], which fails on empty matches instead.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subnets.is_empty()
    }
}

impl Topology {
    /// Selects the subnets matching the given criteria.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::AmbiguousCriteria`] when both role and
    /// group name are supplied, and [`SelectionError::NoMatchingSubnets`]
    /// when the criteria match nothing.
    pub fn select(&self, criteria: &SelectionCriteria) -> Result<SelectionResult<'_>> {
        let reified = criteria.reify_defaults()?;

        let mut candidates: Vec<&Subnet> = if let Some(name) = &reified.group_name {
            self.iter().filter(|s| s.group_name == *name).collect()
        } else {
            let role = reified.role.unwrap_or_default();
            self.partition(role).iter().collect()
        };

        if reified.one_per_az && !candidates.is_empty() {
            let anchor = candidates[0].group_name.clone();
            candidates.retain(|s| s.group_name == anchor);
        }

        if candidates.is_empty() {
            return Err(NettopoError::Selection(SelectionError::NoMatchingSubnets {
                description: reified.describe(),
            }));
        }

        let mut availability_zones = Vec::new();
        for subnet in &candidates {
            if !availability_zones.contains(&subnet.availability_zone) {
                availability_zones.push(subnet.availability_zone.clone());
            }
        }

        let has_public = candidates.iter().any(|s| s.role == SubnetRole::Public);
        let readiness =
            CompositeReadiness::aggregate(candidates.iter().map(|s| s.readiness.clone()));

        debug!(
            "Selected {} subnets for {}",
            candidates.len(),
            reified.describe()
        );

        Ok(SelectionResult {
            subnets: candidates,
            availability_zones,
            has_public,
            readiness,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{NetworkSpec, SubnetGroupSpec, SubnetMemberSpec};
    use crate::topology::TopologyBuilder;

    fn build(spec: &NetworkSpec) -> Topology {
        TopologyBuilder::new().build(spec).unwrap()
    }

    fn mixed_spec() -> NetworkSpec {
        NetworkSpec {
            subnet_groups: vec![
                SubnetGroupSpec {
                    name: String::from("Edge"),
                    role: crate::spec::SubnetRole::Public,
                    members: vec![SubnetMemberSpec {
                        cidr_block: String::from("172.16.0.0/26"),
                        az_letter: 'a',
                    }],
                },
                SubnetGroupSpec {
                    name: String::from("App"),
                    role: crate::spec::SubnetRole::Private,
                    members: vec![
                        SubnetMemberSpec {
                            cidr_block: String::from("172.16.0.64/27"),
                            az_letter: 'a',
                        },
                        SubnetMemberSpec {
                            cidr_block: String::from("172.16.0.96/27"),
                            az_letter: 'b',
                        },
                    ],
                },
                SubnetGroupSpec {
                    name: String::from("Batch"),
                    role: crate::spec::SubnetRole::Private,
                    members: vec![SubnetMemberSpec {
                        cidr_block: String::from("172.16.0.128/27"),
                        az_letter: 'c',
                    }],
                },
                SubnetGroupSpec {
                    name: String::from("Data"),
                    role: crate::spec::SubnetRole::Isolated,
                    members: vec![SubnetMemberSpec {
                        cidr_block: String::from("172.16.0.160/27"),
                        az_letter: 'b',
                    }],
                },
            ],
            ..NetworkSpec::default_isolated()
        }
    }

    #[test]
    fn test_default_criteria_select_private() {
        let topology = build(&mixed_spec());

        let default = topology.select(&SelectionCriteria::default()).unwrap();
        let private = topology
            .select(&SelectionCriteria::by_role(crate::spec::SubnetRole::Private))
            .unwrap();

        let default_ids: Vec<String> =
            default.subnets.iter().map(|s| s.id.to_string()).collect();
        let private_ids: Vec<String> =
            private.subnets.iter().map(|s| s.id.to_string()).collect();
        assert_eq!(default_ids, private_ids);
        assert_eq!(default_ids, vec!["App-a", "App-b", "Batch-c"]);
        assert!(!default.has_public);
    }

    #[test]
    fn test_both_filters_fail_regardless_of_other_fields() {
        let topology = build(&mixed_spec());

        let criteria = SelectionCriteria {
            role: Some(crate::spec::SubnetRole::Private),
            group_name: Some(String::from("App")),
            one_per_az: true,
        };

        let err = topology.select(&criteria).unwrap_err();
        assert!(matches!(
            err,
            NettopoError::Selection(SelectionError::AmbiguousCriteria)
        ));
    }

    #[test]
    fn test_empty_partition_fails_with_no_matching_subnets() {
        let topology = build(&NetworkSpec::default_isolated());

        let err = topology
            .select(&SelectionCriteria::by_role(crate::spec::SubnetRole::Isolated))
            .unwrap_err();
        assert!(matches!(
            err,
            NettopoError::Selection(SelectionError::NoMatchingSubnets { .. })
        ));
        assert!(err.to_string().contains("'isolated' subnets"));
    }

    #[test]
    fn test_empty_topology_always_fails_selection() {
        let mut spec = mixed_spec();
        spec.subnet_groups.clear();
        let topology = build(&spec);

        assert!(topology.select(&SelectionCriteria::default()).is_err());
    }

    #[test]
    fn test_unknown_group_fails_with_description() {
        let topology = build(&mixed_spec());

        let err = topology
            .select(&SelectionCriteria::by_group("Nope"))
            .unwrap_err();
        assert!(err.to_string().contains("subnets named 'Nope'"));
    }

    #[test]
    fn test_one_per_az_restricts_to_first_group() {
        let topology = build(&mixed_spec());

        // Candidate order is [App-a, App-b, Batch-c]; the restriction
        // keeps group "App" even though it spans two zones.
        let result = topology
            .select(
                &SelectionCriteria::by_role(crate::spec::SubnetRole::Private).with_one_per_az(),
            )
            .unwrap();

        let ids: Vec<String> = result.subnets.iter().map(|s| s.id.to_string()).collect();
        assert_eq!(ids, vec!["App-a", "App-b"]);
        assert_eq!(result.availability_zones, vec!["a", "b"]);
    }

    #[test]
    fn test_group_query_scans_partitions_in_order() {
        let topology = build(&mixed_spec());

        let result = topology
            .select(&SelectionCriteria::by_group("Edge"))
            .unwrap();
        assert_eq!(result.len(), 1);
        assert!(result.has_public);
        assert_eq!(result.subnets[0].id.to_string(), "Edge-a");
    }

    #[test]
    fn test_zones_are_deduplicated() {
        let topology = build(&mixed_spec());

        let result = topology
            .select(&SelectionCriteria::by_role(crate::spec::SubnetRole::Private))
            .unwrap();
        assert_eq!(result.availability_zones, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_readiness_tracks_every_match() {
        let topology = build(&mixed_spec());

        let result = topology.select(&SelectionCriteria::default()).unwrap();
        assert_eq!(result.readiness.len(), result.len());
        assert!(!result.readiness.is_ready());

        for subnet in &result.subnets {
            subnet.readiness.mark_ready();
        }
        assert!(result.readiness.is_ready());
    }

    #[test]
    fn test_end_to_end_default_network_example() {
        let topology = build(&NetworkSpec::default_isolated());

        let result = topology.select(&SelectionCriteria::default()).unwrap();
        let ids: Vec<String> = result.subnets.iter().map(|s| s.id.to_string()).collect();
        assert_eq!(ids, vec!["Private-a", "Private-b", "Private-c"]);
        assert!(!result.has_public);
        assert!(!result.is_empty());
        assert_eq!(result.subnet_ids().len(), 3);
    }
}
