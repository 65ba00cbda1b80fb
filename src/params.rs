//! Deployment parameter derivation
//!
//! The payload's filesystem location encodes two deployment parameters:
//! the immediate parent directory name is the version, the file name is the
//! artifact name. Pure path manipulation; identical input always yields
//! identical output.

use std::path::Path;

use crate::error::{MsipackError, Result};

/// Parameters derived from the payload path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployParams {
    /// Version string, the name of the payload's parent directory
    pub version: String,
    /// Artifact name, the payload's file name
    pub artifact_name: String,
}

impl DeployParams {
    /// Artifact name without its extension, used for destination layout
    pub fn artifact_stem(&self) -> &str {
        Path::new(&self.artifact_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.artifact_name)
    }
}

/// Derive version and artifact name from a payload path
///
/// Fails only when the path carries no file name or no named parent
/// directory (e.g. a bare file name or a filesystem root).
pub fn derive(payload: &Path) -> Result<DeployParams> {
    let underivable = || MsipackError::UnderivableParameters {
        path: payload.display().to_string(),
    };

    let artifact_name = payload
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(underivable)?
        .to_string();

    let version = payload
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .ok_or_else(underivable)?
        .to_string();

    Ok(DeployParams {
        version,
        artifact_name,
    })
}
