//! Request Validator
//!
//! Syntactic check of the proxied path: an allow-listed resource and an
//! optional numeric id. Whether the id exists is left to the upstream.

use crate::error::{ProxyError, Result};

/// Resource collections the upstream exposes.
pub const ALLOWED_RESOURCES: [&str; 6] =
    ["people", "films", "planets", "species", "starships", "vehicles"];

// == Validated Path ==
/// A path that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPath {
    /// Allow-listed resource, empty for the upstream root
    pub resource: String,
    /// Numeric id within the resource
    pub id: Option<String>,
}

impl ValidatedPath {
    /// Upstream-relative path: `""`, `resource` or `resource/id`.
    pub fn as_upstream_path(&self) -> String {
        match &self.id {
            Some(id) => format!("{}/{}", self.resource, id),
            None => self.resource.clone(),
        }
    }
}

/// Returns true if `resource` is empty (upstream root) or allow-listed.
pub fn is_allowed_resource(resource: &str) -> bool {
    resource.is_empty() || ALLOWED_RESOURCES.contains(&resource)
}

/// Returns true if `id` consists solely of ASCII decimal digits.
pub fn is_numeric_id(id: &str) -> bool {
    id.bytes().all(|b| b.is_ascii_digit())
}

// == Validate ==
/// Validates the path remainder after the route prefix was stripped.
///
/// Surrounding slashes are ignored, so `people/1/` and `/people/1` are the
/// same path.
pub fn validate_path(path: &str) -> Result<ValidatedPath> {
    let trimmed = path.trim_matches('/');
    let mut segments = trimmed.split('/');

    let resource = segments.next().unwrap_or_default();
    if !is_allowed_resource(resource) {
        return Err(ProxyError::InvalidResource(resource.to_string()));
    }

    let id = match segments.next() {
        Some("") => return Err(ProxyError::InvalidPath(trimmed.to_string())),
        Some(id) if !is_numeric_id(id) => return Err(ProxyError::InvalidId(id.to_string())),
        Some(id) => Some(id.to_string()),
        None => None,
    };

    if segments.next().is_some() {
        return Err(ProxyError::InvalidPath(trimmed.to_string()));
    }

    Ok(ValidatedPath {
        resource: resource.to_string(),
        id,
    })
}
