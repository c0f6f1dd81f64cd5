//! Network specification module.
//!
//! This module handles everything up to topology derivation:
//! - Parsing and deserializing `nettopo.network.yaml` (single file or
//!   merged fragment directory)
//! - Validation of specification values, accumulating every violation
//! - Computing deterministic spec fingerprints

mod hash;
mod model;
mod parser;
mod validator;

pub use hash::SpecHasher;
pub use model::{
    AvailabilityZone, EndpointSpec, NetworkSpec, SubnetGroupSpec, SubnetMemberSpec, SubnetRole,
};
pub use parser::{DEFAULT_SPEC_FILES, SpecParser, find_spec_file};
pub use validator::{SpecValidator, ValidationIssue, ValidationReport};
