//! Console report rendering

use console::Style;
use std::path::Path;

use crate::config::{PatchPolicy, PatchSeverity};
use crate::patch::{PatchOutcome, PatchReport};
use crate::pipeline::{BuildPlan, RunSummary};

fn label(text: &str) -> String {
    Style::new().bold().apply_to(text).to_string()
}

/// Print the resolved and derived values of a build plan
pub fn print_plan(plan: &BuildPlan) {
    println!("{} {}", label("Payload:"), plan.payload.display());
    println!("{} {}", label("Destination:"), plan.destination.display());
    println!("{} {}", label("Version:"), plan.params.version);
    println!("{} {}", label("Artifact name:"), plan.params.artifact_name);
    println!("{} {}", label("Product code:"), plan.product_code);
}

/// Print the preflight banner
pub fn print_preflight_notice() {
    println!();
    println!(
        "{} validation passed, no changes made",
        Style::new().bold().yellow().apply_to("[PREFLIGHT]")
    );
}

/// Print the configuration file in use (verbose runs only)
pub fn print_config_source(path: &Path) {
    println!(
        "{} {}",
        Style::new().dim().apply_to("Using configuration:"),
        path.display()
    );
}

/// Print the mutation-phase summary with per-pattern patch status
pub fn print_summary(summary: &RunSummary, policy: &PatchPolicy) {
    println!();
    println!(
        "{} {} template files copied",
        label("Provisioned:"),
        summary.files_copied
    );
    println!("{} {}", label("Script:"), summary.script_path.display());
    print_patch_report(&summary.patch_report, policy);
}

fn print_patch_report(report: &PatchReport, policy: &PatchPolicy) {
    println!("{}", label("Patches:"));
    for (field, outcome) in &report.results {
        let status = match outcome {
            PatchOutcome::Applied => Style::new().green().apply_to("patched").to_string(),
            PatchOutcome::Unchanged => Style::new().dim().apply_to("already current").to_string(),
            PatchOutcome::NoMatch => {
                let tag = match policy.severity(*field) {
                    PatchSeverity::Warn => Style::new().yellow().apply_to("no match"),
                    PatchSeverity::Error => Style::new().red().apply_to("no match"),
                };
                format!("{tag} (template drift?)")
            }
        };
        println!("  {} {}", Style::new().bold().apply_to(field.label()), status);
    }
    if !report.wrote {
        println!("  {}", Style::new().dim().apply_to("script left untouched"));
    }
}
