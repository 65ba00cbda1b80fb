//! Packaging configuration
//!
//! The template tree, deployment script source and destination root are static
//! external configuration, not runtime-discovered. They load from a
//! `msipack.yaml` file, looked up in order:
//!
//! 1. `--config` flag (or the `MSIPACK_CONFIG` environment variable)
//! 2. `msipack.yaml` in the current directory
//! 3. `msipack/msipack.yaml` under the user configuration directory

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{MsipackError, Result};
use crate::patch::PatchField;

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "msipack.yaml";

/// Default name of the destination subfolder receiving the payload copy
const DEFAULT_PAYLOAD_SUBDIR: &str = "Files";

/// Packaging configuration loaded from `msipack.yaml`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackagingConfig {
    /// Template tree cloned into every destination package
    pub template_dir: PathBuf,

    /// Deployment script copied to the destination root and patched
    pub script_source: PathBuf,

    /// Root under which `<artifact stem>/<version>/` destinations are created
    pub destination_root: PathBuf,

    /// Destination subfolder receiving the payload copy
    #[serde(default = "default_payload_subdir")]
    pub payload_subdir: String,

    /// Per-pattern severity for patch anchors that do not match
    #[serde(default)]
    pub patch_policy: PatchPolicy,
}

fn default_payload_subdir() -> String {
    DEFAULT_PAYLOAD_SUBDIR.to_string()
}

/// Severity of a patch anchor that does not match the script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchSeverity {
    /// Report the miss in the summary and continue (original behavior)
    #[default]
    Warn,
    /// Fail the run after the summary is printed
    Error,
}

/// Per-pattern severity policy
///
/// A stale version stamp is arguably worse than a stale registry identifier,
/// so the policy is per field rather than one fixed rule. Everything defaults
/// to `warn`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatchPolicy {
    pub app_version: PatchSeverity,
    pub install_file: PatchSeverity,
    pub active_setup_x86: PatchSeverity,
    pub active_setup_native: PatchSeverity,
}

impl PatchPolicy {
    /// Severity configured for a patch field
    pub fn severity(&self, field: PatchField) -> PatchSeverity {
        match field {
            PatchField::AppVersion => self.app_version,
            PatchField::InstallFile => self.install_file,
            PatchField::ActiveSetupX86 => self.active_setup_x86,
            PatchField::ActiveSetupNative => self.active_setup_native,
        }
    }
}

impl PackagingConfig {
    /// Load configuration, returning it with the path it was read from
    pub fn load(explicit: Option<&Path>) -> Result<(Self, PathBuf)> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => Self::discover().ok_or(MsipackError::ConfigNotFound)?,
        };
        let config = Self::load_from(&path)?;
        Ok((config, path))
    }

    /// Find a configuration file in the default lookup locations
    fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.is_file() {
            return Some(local);
        }
        let user = dirs::config_dir()?.join("msipack").join(CONFIG_FILE_NAME);
        user.is_file().then_some(user)
    }

    /// Parse a configuration file
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MsipackError::ConfigNotFound
            } else {
                crate::error::read_failed(path, &e)
            }
        })?;
        serde_yaml::from_str(&text).map_err(|e| MsipackError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
