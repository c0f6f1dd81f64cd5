//! Network specification hashing.
//!
//! Provides a deterministic fingerprint of a [`NetworkSpec`] so emission
//! plans can be tied to the exact spec they were derived from. Field order
//! is significant: topology derivation is order-sensitive, so reordering
//! groups or members produces a different fingerprint on purpose.

use sha2::{Digest, Sha256};

use super::model::{NetworkSpec, SubnetGroupSpec, SubnetRole};

/// Hasher for computing network spec fingerprints.
#[derive(Debug, Default)]
pub struct SpecHasher;

impl SpecHasher {
    /// Creates a new spec hasher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Computes a fingerprint of the entire network specification.
    #[must_use]
    pub fn hash_spec(&self, spec: &NetworkSpec) -> String {
        let mut hasher = Sha256::new();

        hasher.update(spec.cidr_block.as_bytes());

        for zone in &spec.availability_zones {
            hasher.update([zone.letter as u8]);
            hasher.update(zone.index.to_be_bytes());
        }

        for group in &spec.subnet_groups {
            hasher.update(self.hash_group(group).as_bytes());
        }

        hasher.update([u8::from(spec.dns_hostnames_enabled)]);
        hasher.update([u8::from(spec.dns_support_enabled)]);
        hasher.update([u8::from(spec.endpoints.object_storage)]);
        hasher.update([u8::from(spec.endpoints.key_value_store)]);
        for endpoint in &spec.endpoints.extra {
            hasher.update(endpoint.as_bytes());
        }

        if let Some(destination) = &spec.flow_log_destination {
            hasher.update(destination.as_bytes());
        }
        if let Some(zone) = &spec.hosted_zone_name {
            hasher.update(zone.as_bytes());
        }
        hasher.update([u8::from(spec.public_ips)]);
        if let Some(range) = &spec.inbound_external_ip_range {
            hasher.update(range.as_bytes());
        }

        hex::encode(hasher.finalize())
    }

    /// Computes a fingerprint for a single subnet group.
    #[must_use]
    pub fn hash_group(&self, group: &SubnetGroupSpec) -> String {
        let mut hasher = Sha256::new();

        hasher.update(group.name.as_bytes());
        hasher.update([role_tag(group.role)]);

        for member in &group.members {
            hasher.update(member.cidr_block.as_bytes());
            hasher.update([member.az_letter as u8]);
        }

        hex::encode(hasher.finalize())
    }

    /// Computes a short hash (first 8 characters) for display purposes.
    #[must_use]
    pub fn short_hash(&self, hash: &str) -> String {
        hash.chars().take(8).collect()
    }
}

/// Stable byte tag for a subnet role.
const fn role_tag(role: SubnetRole) -> u8 {
    match role {
        SubnetRole::Public => 0,
        SubnetRole::Private => 1,
        SubnetRole::Isolated => 2,
    }
}
