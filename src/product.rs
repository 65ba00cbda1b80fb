//! Product identifier resolution
//!
//! Reads the `ProductCode` property out of the payload's embedded Property
//! table. The database handle is a scoped value: it is released on drop on
//! every exit path, including when the query itself fails. Access is
//! read-only; querying never mutates the payload.

use std::path::Path;

use crate::error::{MsipackError, Result};

/// Well-known property key holding the product identifier
pub const PRODUCT_CODE_PROPERTY: &str = "ProductCode";

/// Resolve the product code of an installer payload
pub fn resolve_product_code(payload: &Path) -> Result<String> {
    read_property(payload, PRODUCT_CODE_PROPERTY)
}

/// Read a single scalar property from the payload's Property table
fn read_property(payload: &Path, property: &str) -> Result<String> {
    if !payload.is_file() {
        return Err(crate::error::not_found(payload));
    }

    let query_failed = |reason: String| MsipackError::QueryFailed {
        path: payload.display().to_string(),
        reason,
    };

    let mut package = msi::open(payload).map_err(|e| query_failed(e.to_string()))?;
    let query = msi::Select::table("Property").columns(&["Property", "Value"]);
    let rows = package
        .select_rows(query)
        .map_err(|e| query_failed(e.to_string()))?;

    for row in rows {
        if row[0].as_str() == Some(property) {
            if let Some(value) = row[1].as_str() {
                if !value.is_empty() {
                    return Ok(value.to_string());
                }
            }
        }
    }

    Err(MsipackError::PropertyMissing {
        property: property.to_string(),
        path: payload.display().to_string(),
    })
}
