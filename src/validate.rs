//! Environment validation
//!
//! Ordered fail-fast precondition checks, run before the preflight gate.
//! The pipeline stops at the first failure; nothing is aggregated.
//!
//! Destination write access is proven by creating and removing a uniquely
//! named probe file, never by inspecting permission bits — permission bits
//! misrepresent effective access on network shares. Validation itself never
//! creates the destination directory; when it does not exist yet, the probe
//! runs against its nearest existing ancestor and the provisioner creates the
//! directory later. This keeps preflight strictly non-mutating.

use std::path::{Path, PathBuf};

use crate::config::PackagingConfig;
use crate::error::{MsipackError, Result};

/// Expected payload extension, compared case-insensitively
pub const PAYLOAD_EXTENSION: &str = "msi";

/// Validate every precondition for a build
pub fn validate_environment(
    payload: &Path,
    config: &PackagingConfig,
    destination: &Path,
) -> Result<()> {
    require_file(payload)?;
    require_extension(payload, PAYLOAD_EXTENSION)?;
    require_dir(&config.template_dir)?;
    require_file(&config.script_source)?;
    probe_destination(destination)?;
    Ok(())
}

/// Check that a path exists and is a regular file
pub fn require_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::error::not_found(path));
    }
    if !path.is_file() {
        return Err(MsipackError::NotAFile {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

/// Check that a path exists and is a directory
pub fn require_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::error::not_found(path));
    }
    if !path.is_dir() {
        return Err(MsipackError::NotADirectory {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

/// Check the payload extension, case-insensitively
fn require_extension(path: &Path, expected: &str) -> Result<()> {
    let matches = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(expected));
    if matches {
        Ok(())
    } else {
        Err(MsipackError::BadExtension {
            path: path.display().to_string(),
        })
    }
}

/// Verify write access to the destination with a scoped probe file
///
/// The probe is created under the destination itself when it exists, or under
/// its nearest existing ancestor when the provisioner will create it. The
/// probe file is removed when the handle drops.
fn probe_destination(destination: &Path) -> Result<()> {
    let not_writable = |reason: String| MsipackError::DestinationNotWritable {
        path: destination.display().to_string(),
        reason,
    };

    let probe_dir = if destination.exists() {
        if !destination.is_dir() {
            return Err(MsipackError::NotADirectory {
                path: destination.display().to_string(),
            });
        }
        destination.to_path_buf()
    } else {
        nearest_existing_ancestor(destination)
            .ok_or_else(|| not_writable("no existing ancestor directory".to_string()))?
    };

    let probe = tempfile::Builder::new()
        .prefix(".msipack-probe-")
        .tempfile_in(&probe_dir)
        .map_err(|e| not_writable(e.to_string()))?;
    drop(probe);
    Ok(())
}

fn nearest_existing_ancestor(path: &Path) -> Option<PathBuf> {
    path.ancestors()
        .skip(1)
        .find(|p| !p.as_os_str().is_empty() && p.is_dir())
        .map(Path::to_path_buf)
}
