//! Template provisioning and payload staging
//!
//! All three operations here are idempotent at the entry level: the same
//! source always overwrites to the same result, so re-running after a partial
//! failure is the recovery path. None of them is transactional and nothing
//! rolls back.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;
use crate::progress::CopyProgress;

/// Recursively copy the template tree into the destination
///
/// Every entry is copied — files, subdirectories and hidden entries —
/// overwriting any existing entry with the same relative path. Returns the
/// number of files copied.
pub fn provision_template(
    template_dir: &Path,
    destination: &Path,
    progress: &CopyProgress,
) -> Result<usize> {
    std::fs::create_dir_all(destination)
        .map_err(|e| crate::error::write_failed(destination, &e))?;

    let mut copied = 0;
    for entry in WalkDir::new(template_dir) {
        let entry = entry.map_err(|e| walk_error(template_dir, &e))?;
        let rel = entry
            .path()
            .strip_prefix(template_dir)
            .unwrap_or_else(|_| entry.path());
        if rel.as_os_str().is_empty() {
            continue;
        }

        let target = destination.join(rel);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)
                .map_err(|e| crate::error::write_failed(&target, &e))?;
        } else {
            copy_entry(entry.path(), &target)?;
            progress.tick(&rel.display().to_string());
            copied += 1;
        }
    }
    Ok(copied)
}

/// Copy the payload into the destination's payload subfolder
///
/// Creates the subfolder if absent; overwrites an existing copy.
pub fn install_payload(
    destination: &Path,
    payload_subdir: &str,
    payload: &Path,
    artifact_name: &str,
) -> Result<PathBuf> {
    let subdir = destination.join(payload_subdir);
    std::fs::create_dir_all(&subdir).map_err(|e| crate::error::write_failed(&subdir, &e))?;

    let target = subdir.join(artifact_name);
    copy_entry(payload, &target)?;
    Ok(target)
}

/// Copy the deployment script source to the destination root
///
/// The script keeps its source file name and overwrites whatever the template
/// tree put there, so the patcher always starts from a fresh copy.
pub fn stage_script(script_source: &Path, destination: &Path) -> Result<PathBuf> {
    let name = script_source
        .file_name()
        .ok_or_else(|| crate::error::not_found(script_source))?;
    let target = destination.join(name);
    copy_entry(script_source, &target)?;
    Ok(target)
}

fn copy_entry(source: &Path, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(|e| crate::error::write_failed(parent, &e))?;
    }
    std::fs::copy(source, target)
        .map_err(|e| crate::error::copy_failed(source, target, &e))
        .map(|_| ())
}

fn walk_error(root: &Path, e: &walkdir::Error) -> crate::error::MsipackError {
    crate::error::MsipackError::ReadFailed {
        path: e
            .path()
            .unwrap_or(root)
            .display()
            .to_string(),
        reason: e.to_string(),
    }
}
