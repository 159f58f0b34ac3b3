//! Execution request types.

use std::path::{Path, PathBuf};

/// Placeholder interpreter value meaning "unset - use the configuration default".
pub const DEFAULT_INTERPRETER: &str = "python";

/// Scope key for configuration lookups.
///
/// A resource identifies the workspace folder a request belongs to, so that
/// per-folder interpreter settings can be consulted. Requests without a
/// resource fall back to global settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Resource(PathBuf);

impl Resource {
    /// Create a resource key from a workspace folder path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// The folder path this resource refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// A request to bind an execution environment.
///
/// Immutable once created. A missing or placeholder `python_path` means the
/// path resolver decides; a concrete path is honored unchanged.
#[derive(Debug, Clone, Default)]
pub struct ExecutionRequest {
    /// Workspace folder scoping configuration lookups, if any.
    pub resource: Option<Resource>,
    /// Requested interpreter path, if the caller already knows one.
    pub python_path: Option<String>,
}

impl ExecutionRequest {
    /// Create an empty request (global scope, no interpreter preference).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope the request to a workspace folder.
    #[must_use]
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resource = Some(resource);
        self
    }

    /// Request a specific interpreter path.
    #[must_use]
    pub fn with_python_path(mut self, path: impl Into<String>) -> Self {
        self.python_path = Some(path.into());
        self
    }

    /// Whether the request names an interpreter other than the placeholder.
    #[must_use]
    pub fn has_concrete_path(&self) -> bool {
        self.python_path
            .as_deref()
            .is_some_and(|p| !p.is_empty() && p != DEFAULT_INTERPRETER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concrete_path_detection() {
        let request = ExecutionRequest::new().with_python_path("/usr/bin/python3");
        assert!(request.has_concrete_path());

        let placeholder = ExecutionRequest::new().with_python_path(DEFAULT_INTERPRETER);
        assert!(!placeholder.has_concrete_path());

        assert!(!ExecutionRequest::new().has_concrete_path());
        assert!(!ExecutionRequest::new().with_python_path("").has_concrete_path());
    }

    #[test]
    fn test_resource_scoping() {
        let request = ExecutionRequest::new().with_resource(Resource::new("/work/project"));
        assert_eq!(
            request.resource.unwrap().path(),
            Path::new("/work/project")
        );
    }
}
