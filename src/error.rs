//! Error types for msipack
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! The taxonomy mirrors the pipeline phases: path/type failures surface while
//! validating the environment, query failures while resolving the product
//! identifier, and fs failures while provisioning. A patch pattern that does
//! not match is *not* an error — it is reported as an outcome (see
//! [`crate::patch::PatchOutcome`]) and only escalates to
//! [`MsipackError::PatchAnchorMissing`] when the configured severity says so.

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias using [`MsipackError`]
pub type Result<T> = std::result::Result<T, MsipackError>;

/// Main error type for msipack operations
#[derive(Error, Diagnostic, Debug)]
pub enum MsipackError {
    // Validation errors
    #[error("Path not found: {path}")]
    #[diagnostic(
        code(msipack::validate::not_found),
        help("Check the path and that any network share it lives on is reachable")
    )]
    NotFound { path: String },

    #[error("Not a file: {path}")]
    #[diagnostic(code(msipack::validate::not_a_file))]
    NotAFile { path: String },

    #[error("Not a directory: {path}")]
    #[diagnostic(code(msipack::validate::not_a_directory))]
    NotADirectory { path: String },

    #[error("Unexpected payload extension: {path}")]
    #[diagnostic(
        code(msipack::validate::bad_extension),
        help("The installer payload must be a Windows Installer package (.msi)")
    )]
    BadExtension { path: String },

    #[error("Destination is not writable: {path}: {reason}")]
    #[diagnostic(
        code(msipack::validate::not_writable),
        help(
            "Write access is verified with a probe file, not permission bits; \
             check effective share permissions"
        )
    )]
    DestinationNotWritable { path: String, reason: String },

    // Parameter derivation errors
    #[error("Cannot derive version and artifact name from payload path: {path}")]
    #[diagnostic(
        code(msipack::params::underivable),
        help("The payload must live inside a version-named directory, e.g. .../1.2.3/app.msi")
    )]
    UnderivableParameters { path: String },

    // Installer database errors
    #[error("Failed to query installer database: {path}: {reason}")]
    #[diagnostic(code(msipack::product::query_failed))]
    QueryFailed { path: String, reason: String },

    #[error("Property '{property}' not present in installer database: {path}")]
    #[diagnostic(
        code(msipack::product::property_missing),
        help("The payload's Property table carries no usable value for this key")
    )]
    PropertyMissing { property: String, path: String },

    // Script patching (fatal form only; non-fatal misses are reported outcomes)
    #[error("Patch anchor for {field} did not match the deployment script")]
    #[diagnostic(
        code(msipack::patch::anchor_missing),
        help(
            "The script template wording has drifted from the anchor pattern; \
             fix the template or relax patch_policy for this field"
        )
    )]
    PatchAnchorMissing { field: String },

    // Configuration errors
    #[error("Configuration file not found")]
    #[diagnostic(
        code(msipack::config::not_found),
        help("Create msipack.yaml in the working directory or pass --config")
    )]
    ConfigNotFound,

    #[error("Failed to parse configuration: {path}: {reason}")]
    #[diagnostic(code(msipack::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    // File system errors
    #[error("Failed to read {path}: {reason}")]
    #[diagnostic(code(msipack::fs::read_failed))]
    ReadFailed { path: String, reason: String },

    #[error("Failed to write {path}: {reason}")]
    #[diagnostic(code(msipack::fs::write_failed))]
    WriteFailed { path: String, reason: String },

    #[error("Failed to copy {from} to {to}: {reason}")]
    #[diagnostic(code(msipack::fs::copy_failed))]
    CopyFailed {
        from: String,
        to: String,
        reason: String,
    },
}

/// Creates a NotFound error from a path
pub fn not_found(path: &std::path::Path) -> MsipackError {
    MsipackError::NotFound {
        path: path.display().to_string(),
    }
}

/// Creates a ReadFailed error from a path and io error
pub fn read_failed(path: &std::path::Path, e: &std::io::Error) -> MsipackError {
    MsipackError::ReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

/// Creates a WriteFailed error from a path and io error
pub fn write_failed(path: &std::path::Path, e: &std::io::Error) -> MsipackError {
    MsipackError::WriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

/// Creates a CopyFailed error from source/target paths and an io error
pub fn copy_failed(
    from: &std::path::Path,
    to: &std::path::Path,
    e: &std::io::Error,
) -> MsipackError {
    MsipackError::CopyFailed {
        from: from.display().to_string(),
        to: to.display().to_string(),
        reason: e.to_string(),
    }
}
