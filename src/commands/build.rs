//! Build command implementation
//!
//! The build process:
//! 1. Load configuration (template tree, script source, destination root)
//! 2. Prepare: resolve product code, derive parameters, validate environment
//! 3. Report every resolved and derived value
//! 4. Preflight gate: stop here when `--preflight` is set
//! 5. Execute: provision template, install payload, stage and patch script
//! 6. Report per-pattern patch status and enforce the severity policy

use crate::cli::BuildArgs;
use crate::config::{PackagingConfig, PatchSeverity};
use crate::error::{MsipackError, Result};
use crate::pipeline;
use crate::progress::CopyProgress;
use crate::ui;

/// Run the build command
pub fn run(args: BuildArgs, verbose: bool) -> Result<()> {
    let (config, config_path) = PackagingConfig::load(args.config.as_deref())?;
    if verbose {
        ui::print_config_source(&config_path);
    }

    let plan = pipeline::prepare(&config, &args.payload)?;
    ui::print_plan(&plan);

    if args.preflight {
        ui::print_preflight_notice();
        return Ok(());
    }

    let progress = if verbose {
        CopyProgress::new(pipeline::count_template_files(&config.template_dir))
    } else {
        CopyProgress::hidden()
    };
    let summary = pipeline::execute(&config, &plan, &progress)?;
    ui::print_summary(&summary, &config.patch_policy);

    // Anchor misses are warnings by default; the policy can make them fatal.
    // The summary above is printed either way so the operator sees every
    // outcome before the run fails.
    for field in summary.patch_report.unmatched() {
        if config.patch_policy.severity(field) == PatchSeverity::Error {
            return Err(MsipackError::PatchAnchorMissing {
                field: field.label().to_string(),
            });
        }
    }

    Ok(())
}
