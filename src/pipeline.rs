//! Build pipeline orchestration
//!
//! Two phases split at the preflight gate. `prepare` is read-only: it
//! resolves the product code, derives the deployment parameters, computes the
//! destination and validates every precondition, producing a [`BuildPlan`].
//! `execute` mutates: template copy, payload install, script staging and
//! patching, in that fixed order, each step unconditional once the gate is
//! passed. Steps are single-threaded and sequential; a failure partway leaves
//! a partially built destination and the documented recovery is to re-run
//! after fixing the cause.

use std::path::{Path, PathBuf};

use crate::config::PackagingConfig;
use crate::error::Result;
use crate::params::{self, DeployParams};
use crate::patch::{PatchReport, ScriptPatcher};
use crate::product;
use crate::progress::CopyProgress;
use crate::provision;
use crate::validate;

/// Everything resolved and validated before any mutation
#[derive(Debug, Clone)]
pub struct BuildPlan {
    /// Normalized payload path
    pub payload: PathBuf,
    /// Destination package directory
    pub destination: PathBuf,
    /// Derived version and artifact name
    pub params: DeployParams,
    /// Resolved product identifier, immutable for the rest of the run
    pub product_code: String,
}

/// Results of the mutation phase
#[derive(Debug)]
pub struct RunSummary {
    /// Files copied out of the template tree
    pub files_copied: usize,
    /// Destination path of the patched script
    pub script_path: PathBuf,
    /// Per-pattern patch results
    pub patch_report: PatchReport,
}

/// Run the read-only phase: resolve, derive, validate
pub fn prepare(config: &PackagingConfig, payload: &Path) -> Result<BuildPlan> {
    // UNC and relative inputs normalize to a plain absolute path; a payload
    // that cannot be canonicalized yet is reported by the resolver instead
    let payload = dunce::canonicalize(payload).unwrap_or_else(|_| payload.to_path_buf());

    let product_code = product::resolve_product_code(&payload)?;
    let params = params::derive(&payload)?;
    let destination = destination_for(config, &params);
    validate::validate_environment(&payload, config, &destination)?;

    Ok(BuildPlan {
        payload,
        destination,
        params,
        product_code,
    })
}

/// Compute the destination package directory for derived parameters
pub fn destination_for(config: &PackagingConfig, params: &DeployParams) -> PathBuf {
    config
        .destination_root
        .join(params.artifact_stem())
        .join(&params.version)
}

/// Run the mutation phase: provision, install payload, stage and patch script
pub fn execute(config: &PackagingConfig, plan: &BuildPlan, progress: &CopyProgress) -> Result<RunSummary> {
    let files_copied =
        provision::provision_template(&config.template_dir, &plan.destination, progress)?;
    progress.finish();

    provision::install_payload(
        &plan.destination,
        &config.payload_subdir,
        &plan.payload,
        &plan.params.artifact_name,
    )?;

    let script_path = provision::stage_script(&config.script_source, &plan.destination)?;

    let patcher = ScriptPatcher::new(
        plan.params.version.clone(),
        plan.params.artifact_name.clone(),
        plan.product_code.clone(),
    );
    let patch_report = patcher.patch_file(&script_path)?;

    Ok(RunSummary {
        files_copied,
        script_path,
        patch_report,
    })
}

/// Count the files a template copy will touch, for progress display
pub fn count_template_files(template_dir: &Path) -> u64 {
    walkdir::WalkDir::new(template_dir)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .count() as u64
}
