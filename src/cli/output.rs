//! Output formatting for CLI commands.
//!
//! This module provides formatting utilities for displaying resolution
//! results to the user in text or JSON form.

use colored::Colorize;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::emitter::{EmissionPlan, EmissionReport};
use crate::spec::ValidationReport;
use crate::topology::SelectionResult;

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Instruction row for table display.
#[derive(Tabled)]
struct InstructionRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Resource")]
    resource: String,
}

/// Subnet row for table display.
#[derive(Tabled)]
struct SubnetRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Zone")]
    zone: String,
    #[tabled(rename = "CIDR")]
    cidr: String,
    #[tabled(rename = "Ready")]
    ready: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a validation report for display.
    #[must_use]
    pub fn format_report(&self, report: &ValidationReport, show_warnings: bool) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&ReportJson::from(report)).unwrap_or_default()
            }
            OutputFormat::Text => Self::format_report_text(report, show_warnings),
        }
    }

    /// Formats a validation report as text.
    fn format_report_text(report: &ValidationReport, show_warnings: bool) -> String {
        let mut output = String::new();

        if report.is_valid() {
            let _ = writeln!(output, "{} Network spec is valid.", "✓".green());
        } else {
            let _ = writeln!(
                output,
                "{} Network spec has {} issues:",
                "✗".red(),
                report.issue_count()
            );
            for issue in &report.issues {
                let _ = writeln!(output, "   - {issue}");
            }
        }

        if show_warnings && !report.warnings.is_empty() {
            let _ = writeln!(output, "\n{} Warnings:", "⚠".yellow());
            for warning in &report.warnings {
                let _ = writeln!(output, "   - {warning}");
            }
        }

        output
    }

    /// Formats an emission plan for display.
    #[must_use]
    pub fn format_plan(&self, plan: &EmissionPlan) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&PlanJson::from(plan)).unwrap_or_default()
            }
            OutputFormat::Text => Self::format_plan_text(plan),
        }
    }

    /// Formats a plan as text.
    fn format_plan_text(plan: &EmissionPlan) -> String {
        if plan.is_empty() {
            return format!("{} Nothing to emit.\n", "✓".green());
        }

        let mut output = String::new();

        let _ = write!(output, "\nEmission Plan\n");
        let _ = write!(output, "   Spec hash: {}\n\n", &plan.spec_hash[..8]);

        let rows: Vec<InstructionRow> = plan
            .instructions
            .iter()
            .enumerate()
            .map(|(i, instruction)| InstructionRow {
                index: i + 1,
                kind: instruction.kind().to_string(),
                resource: Self::truncate(&instruction.resource_name(), 48),
            })
            .collect();

        let table = Table::new(rows).to_string();
        output.push_str(&table);
        output.push('\n');

        let _ = write!(
            output,
            "\nPlan: {} subnets, {} exports, {} parameters ({} instructions)\n",
            plan.subnet_count().to_string().green(),
            plan.export_count(),
            plan.parameter_count(),
            plan.instruction_count()
        );

        output
    }

    /// Formats a selection result for display.
    #[must_use]
    pub fn format_selection(&self, result: &SelectionResult<'_>) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&SelectionJson::from(result)).unwrap_or_default()
            }
            OutputFormat::Text => Self::format_selection_text(result),
        }
    }

    /// Formats a selection result as text.
    fn format_selection_text(result: &SelectionResult<'_>) -> String {
        let mut output = String::new();

        let rows: Vec<SubnetRow> = result
            .subnets
            .iter()
            .map(|s| SubnetRow {
                id: s.id.to_string(),
                group: s.group_name.clone(),
                role: s.role.to_string(),
                zone: s.availability_zone.clone(),
                cidr: s.cidr_block.clone(),
                ready: if s.readiness.is_ready() {
                    "✓".green().to_string()
                } else {
                    "pending".dimmed().to_string()
                },
            })
            .collect();

        let table = Table::new(rows).to_string();
        output.push_str(&table);
        output.push('\n');

        let _ = write!(
            output,
            "\nSelected {} subnets across zones [{}], public: {}\n",
            result.len(),
            result.availability_zones.join(", "),
            if result.has_public { "yes" } else { "no" }
        );

        output
    }

    /// Formats an emission rehearsal report.
    #[must_use]
    pub fn format_rehearsal(&self, report: &EmissionReport) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&RehearsalJson::from(report)).unwrap_or_default()
            }
            OutputFormat::Text => {
                let status = if report.is_clean() {
                    format!("{} Rehearsal clean", "✓".green())
                } else {
                    format!("{} Rehearsal had failures", "✗".red())
                };

                let mut output = format!("{status}\n\n");
                let _ = writeln!(output, "   Applied: {}", report.applied);
                let _ = writeln!(output, "   Ready subnets: {}", report.ready_subnets);

                if !report.failed.is_empty() {
                    let _ = write!(output, "\n{} Failures:\n", "⚠".yellow());
                    for failure in &report.failed {
                        let _ = writeln!(output, "   - {failure}");
                    }
                }

                output
            }
        }
    }

    /// Truncates a string to a maximum length.
    fn truncate(s: &str, max_len: usize) -> String {
        if s.len() <= max_len {
            s.to_string()
        } else {
            format!("{}...", &s[..max_len - 3])
        }
    }
}

// JSON serialization helpers

#[derive(serde::Serialize)]
struct ReportJson {
    valid: bool,
    issues: Vec<String>,
    warnings: Vec<String>,
}

impl From<&ValidationReport> for ReportJson {
    fn from(report: &ValidationReport) -> Self {
        Self {
            valid: report.is_valid(),
            issues: report.issues.iter().map(ToString::to_string).collect(),
            warnings: report.warnings.clone(),
        }
    }
}

#[derive(serde::Serialize)]
struct PlanJson {
    spec_hash: String,
    instruction_count: usize,
    subnet_count: usize,
    export_count: usize,
    parameter_count: usize,
    instructions: Vec<InstructionJson>,
}

#[derive(serde::Serialize)]
struct InstructionJson {
    kind: String,
    resource: String,
}

impl From<&EmissionPlan> for PlanJson {
    fn from(plan: &EmissionPlan) -> Self {
        Self {
            spec_hash: plan.spec_hash.clone(),
            instruction_count: plan.instruction_count(),
            subnet_count: plan.subnet_count(),
            export_count: plan.export_count(),
            parameter_count: plan.parameter_count(),
            instructions: plan
                .instructions
                .iter()
                .map(|i| InstructionJson {
                    kind: i.kind().to_string(),
                    resource: i.resource_name(),
                })
                .collect(),
        }
    }
}

#[derive(serde::Serialize)]
struct SelectionJson {
    subnets: Vec<SubnetJson>,
    availability_zones: Vec<String>,
    has_public: bool,
    ready: bool,
}

#[derive(serde::Serialize)]
struct SubnetJson {
    id: String,
    group: String,
    role: String,
    availability_zone: String,
    cidr_block: String,
    ready: bool,
}

impl From<&SelectionResult<'_>> for SelectionJson {
    fn from(result: &SelectionResult<'_>) -> Self {
        Self {
            subnets: result
                .subnets
                .iter()
                .map(|s| SubnetJson {
                    id: s.id.to_string(),
                    group: s.group_name.clone(),
                    role: s.role.to_string(),
                    availability_zone: s.availability_zone.clone(),
                    cidr_block: s.cidr_block.clone(),
                    ready: s.readiness.is_ready(),
                })
                .collect(),
            availability_zones: result.availability_zones.clone(),
            has_public: result.has_public,
            ready: result.readiness.is_ready(),
        }
    }
}

#[derive(serde::Serialize)]
struct RehearsalJson {
    applied: usize,
    failed: Vec<String>,
    ready_subnets: usize,
}

impl From<&EmissionReport> for RehearsalJson {
    fn from(report: &EmissionReport) -> Self {
        Self {
            applied: report.applied,
            failed: report.failed.clone(),
            ready_subnets: report.ready_subnets,
        }
    }
}
