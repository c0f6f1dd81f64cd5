// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # Nettopo
//!
//! A declarative network topology resolver for isolated cloud networks.
//!
//! ## Overview
//!
//! Nettopo takes a declarative network specification (CIDR blocks,
//! availability zones, subnet groups, endpoint flags) and deterministically
//! derives a concrete topology it can answer queries against:
//!
//! - Validate a spec, accumulating every violated rule at once
//! - Derive role-partitioned subnets with deterministic identifiers
//! - Answer "give me the private subnets" selection queries
//! - Produce an ordered emission plan for an external resource emitter
//!
//! The resolver itself never talks to a cloud provider. Materialization is
//! an injected [`ResourceEmitter`] capability, and per-subnet readiness is
//! tracked through fan-in [`CompositeReadiness`] handles.
//!
//! ## Modules
//!
//! - [`spec`]: Specification types, parsing, validation, fingerprints
//! - [`topology`]: Topology derivation and selection queries
//! - [`emitter`]: Emission planning and the resource emitter boundary
//! - [`readiness`]: Readiness signalling primitives
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```yaml
//! cidr_block: 172.16.0.0/24
//! availability_zones:
//!   - letter: A
//!     index: 0
//!   - letter: B
//!     index: 1
//! subnet_groups:
//!   - name: Private
//!     role: private
//!     members:
//!       - cidr_block: 172.16.0.0/26
//!         az_letter: a
//!       - cidr_block: 172.16.0.64/26
//!         az_letter: b
//! endpoints:
//!   object_storage: true
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod emitter;
pub mod error;
pub mod readiness;
pub mod spec;
pub mod topology;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, Commands, OutputFormatter};
pub use emitter::{
    EmissionExecutor, EmissionPlan, EmissionPlanner, EmissionReport, RecordingEmitter,
    ResourceEmitter, ResourceInstruction,
};
pub use error::{NettopoError, Result};
pub use readiness::{CompositeReadiness, ReadinessSignal};
pub use spec::{
    NetworkSpec, SpecHasher, SpecParser, SpecValidator, SubnetGroupSpec, SubnetRole,
    find_spec_file,
};
pub use topology::{SelectionCriteria, SelectionResult, Subnet, SubnetId, Topology, TopologyBuilder};
