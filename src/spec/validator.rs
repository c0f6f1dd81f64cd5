//! Network specification validation.
//!
//! Checks a [`NetworkSpec`] for internal consistency before topology
//! derivation. Unlike a fail-fast validator, every rule is checked and the
//! resulting failure enumerates all violations at once.

use ipnet::Ipv4Net;
use std::collections::HashSet;
use tracing::debug;

use crate::error::{NettopoError, Result, SpecError};

use super::model::NetworkSpec;

/// Validator for network specifications.
#[derive(Debug, Default)]
pub struct SpecValidator;

/// Validation outcome containing all issues found.
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// List of rule violations. Any entry makes the spec invalid.
    pub issues: Vec<ValidationIssue>,
    /// List of warnings (non-fatal findings).
    pub warnings: Vec<String>,
}

/// A single violated validation rule.
#[derive(Debug)]
pub struct ValidationIssue {
    /// The field path that failed validation.
    pub field: String,
    /// The error message, including the offending value.
    pub message: String,
}

impl SpecValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a network specification.
    ///
    /// # Errors
    ///
    /// Returns a single [`SpecError::ValidationFailed`] listing every
    /// violated rule when the spec is invalid.
    pub fn validate(&self, spec: &NetworkSpec) -> Result<ValidationReport> {
        let report = self.check(spec);

        if report.is_valid() {
            debug!("Network spec validation passed");
            Ok(report)
        } else {
            Err(NettopoError::Spec(SpecError::validation(
                report.issues.iter().map(ToString::to_string).collect(),
            )))
        }
    }

    /// Runs every check and returns the full report without failing.
    #[must_use]
    pub fn check(&self, spec: &NetworkSpec) -> ValidationReport {
        let mut report = ValidationReport::default();

        let network = Self::check_cidr_block(spec, &mut report);
        Self::check_zones(spec, &mut report);
        Self::check_groups(spec, network, &mut report);
        Self::check_dns(spec, &mut report);

        report
    }

    /// Validates the network CIDR block. Returns the parsed block so
    /// member checks can verify containment.
    fn check_cidr_block(spec: &NetworkSpec, report: &mut ValidationReport) -> Option<Ipv4Net> {
        if spec.cidr_block.is_empty() {
            report.issues.push(ValidationIssue {
                field: String::from("cidr_block"),
                message: String::from("CIDR block cannot be empty"),
            });
            return None;
        }

        match spec.cidr_block.parse::<Ipv4Net>() {
            Ok(net) => Some(net),
            Err(_) => {
                report.issues.push(ValidationIssue {
                    field: String::from("cidr_block"),
                    message: format!("'{}' is not a valid IPv4 CIDR block", spec.cidr_block),
                });
                None
            }
        }
    }

    /// Validates availability zone declarations.
    fn check_zones(spec: &NetworkSpec, report: &mut ValidationReport) {
        let mut seen_letters = HashSet::new();

        for (i, zone) in spec.availability_zones.iter().enumerate() {
            let prefix = format!("availability_zones[{i}]");

            if !zone.letter.is_ascii_uppercase() || !('A'..='F').contains(&zone.letter) {
                report.issues.push(ValidationIssue {
                    field: format!("{prefix}.letter"),
                    message: format!(
                        "Zone letter '{}' must be one uppercase character A through F",
                        zone.letter
                    ),
                });
            }

            if !seen_letters.insert(zone.letter) {
                report.issues.push(ValidationIssue {
                    field: format!("{prefix}.letter"),
                    message: format!("Duplicate zone letter: {}", zone.letter),
                });
            }
        }
    }

    /// Validates subnet groups and their members.
    fn check_groups(
        spec: &NetworkSpec,
        network: Option<Ipv4Net>,
        report: &mut ValidationReport,
    ) {
        if spec.subnet_groups.is_empty() {
            report
                .warnings
                .push(String::from("No subnet groups defined in specification"));
            return;
        }

        let mut seen_names = HashSet::new();

        for (i, group) in spec.subnet_groups.iter().enumerate() {
            let prefix = format!("subnet_groups[{i}]");

            if !seen_names.insert(&group.name) {
                report.issues.push(ValidationIssue {
                    field: format!("{prefix}.name"),
                    message: format!("Duplicate subnet group name: {}", group.name),
                });
            }

            if group.members.is_empty() {
                report.warnings.push(format!(
                    "{prefix}: Group '{}' has no members and derives no subnets",
                    group.name
                ));
            }

            for (j, member) in group.members.iter().enumerate() {
                let member_prefix = format!("{prefix}.members[{j}]");

                match member.cidr_block.parse::<Ipv4Net>() {
                    Ok(member_net) => {
                        if let Some(net) = network {
                            if !net.contains(&member_net) {
                                report.warnings.push(format!(
                                    "{member_prefix}: Subnet {} is outside the network block {net}",
                                    member.cidr_block
                                ));
                            }
                        }
                    }
                    Err(_) => {
                        report.issues.push(ValidationIssue {
                            field: format!("{member_prefix}.cidr_block"),
                            message: format!(
                                "'{}' is not a valid IPv4 CIDR block",
                                member.cidr_block
                            ),
                        });
                    }
                }

                if !spec.declares_zone(member.az_letter) {
                    report.issues.push(ValidationIssue {
                        field: format!("{member_prefix}.az_letter"),
                        message: format!(
                            "Zone letter '{}' does not match any declared availability zone",
                            member.az_letter
                        ),
                    });
                }
            }
        }
    }

    /// Validates the DNS flag combination.
    fn check_dns(spec: &NetworkSpec, report: &mut ValidationReport) {
        if spec.dns_hostnames_enabled && !spec.dns_support_enabled {
            report.issues.push(ValidationIssue {
                field: String::from("dns_hostnames_enabled"),
                message: String::from(
                    "To use DNS hostnames, DNS support must be enabled, \
                     however, it was explicitly disabled",
                ),
            });
        }
    }
}

impl ValidationReport {
    /// Returns true if validation passed (no issues).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns the number of issues.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    /// Returns the number of warnings.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::model::{AvailabilityZone, SubnetGroupSpec, SubnetMemberSpec, SubnetRole};

    fn valid_spec() -> NetworkSpec {
        NetworkSpec::default_isolated()
    }

    #[test]
    fn test_default_isolated_is_valid() {
        let validator = SpecValidator::new();
        let report = validator.check(&valid_spec());
        assert!(report.is_valid(), "issues: {:?}", report.issues);
    }

    #[test]
    fn test_empty_cidr_block_fails() {
        let mut spec = valid_spec();
        spec.cidr_block = String::new();

        let report = SpecValidator::new().check(&spec);
        assert_eq!(report.issue_count(), 1);
        assert_eq!(report.issues[0].field, "cidr_block");
    }

    #[test]
    fn test_malformed_cidr_block_fails() {
        let mut spec = valid_spec();
        spec.cidr_block = String::from("not-a-cidr");

        let report = SpecValidator::new().check(&spec);
        assert!(!report.is_valid());
    }

    #[test]
    fn test_dns_hostnames_require_dns_support() {
        let mut spec = valid_spec();
        spec.dns_hostnames_enabled = true;
        spec.dns_support_enabled = false;

        let report = SpecValidator::new().check(&spec);
        assert_eq!(report.issue_count(), 1);
        assert_eq!(report.issues[0].field, "dns_hostnames_enabled");
    }

    #[test]
    fn test_duplicate_group_names_fail() {
        let mut spec = valid_spec();
        let duplicate = spec.subnet_groups[0].clone();
        spec.subnet_groups.push(duplicate);

        let report = SpecValidator::new().check(&spec);
        assert!(
            report
                .issues
                .iter()
                .any(|i| i.message.contains("Duplicate subnet group name"))
        );
    }

    #[test]
    fn test_unknown_zone_letter_fails() {
        let mut spec = valid_spec();
        spec.subnet_groups[0].members.push(SubnetMemberSpec {
            cidr_block: String::from("172.16.0.192/26"),
            az_letter: 'z',
        });

        let report = SpecValidator::new().check(&spec);
        assert!(
            report
                .issues
                .iter()
                .any(|i| i.message.contains("does not match any declared"))
        );
    }

    #[test]
    fn test_issues_accumulate() {
        let spec = NetworkSpec {
            cidr_block: String::new(),
            availability_zones: vec![
                AvailabilityZone { letter: 'A', index: 0 },
                AvailabilityZone { letter: 'A', index: 1 },
            ],
            subnet_groups: vec![SubnetGroupSpec {
                name: String::from("app"),
                role: SubnetRole::Private,
                members: vec![SubnetMemberSpec {
                    cidr_block: String::from("bogus"),
                    az_letter: 'q',
                }],
            }],
            dns_hostnames_enabled: true,
            dns_support_enabled: false,
            ..NetworkSpec::default_isolated()
        };

        let report = SpecValidator::new().check(&spec);
        // empty cidr, duplicate zone, bad member cidr, unknown zone, dns
        assert_eq!(report.issue_count(), 5);

        let err = SpecValidator::new().validate(&spec).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("cidr_block"));
        assert!(message.contains("dns_hostnames_enabled"));
    }

    #[test]
    fn test_empty_group_warns_but_passes() {
        let mut spec = valid_spec();
        spec.subnet_groups.push(SubnetGroupSpec {
            name: String::from("Spare"),
            role: SubnetRole::Isolated,
            members: vec![],
        });

        let report = SpecValidator::new().check(&spec);
        assert!(report.is_valid());
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn test_member_outside_network_warns() {
        let mut spec = valid_spec();
        spec.subnet_groups[0].members[0].cidr_block = String::from("10.1.0.0/26");

        let report = SpecValidator::new().check(&spec);
        assert!(report.is_valid());
        assert!(
            report
                .warnings
                .iter()
                .any(|w| w.contains("outside the network block"))
        );
    }

    #[test]
    fn test_zero_groups_is_valid_with_warning() {
        let mut spec = valid_spec();
        spec.subnet_groups.clear();

        let report = SpecValidator::new().check(&spec);
        assert!(report.is_valid());
        assert_eq!(report.warning_count(), 1);
    }
}
