//! Embedded resource lookup, reported before orchestration begins.

use std::collections::HashMap;
use std::fmt;
use tracing::{info, warn};

/// Identifies a resource by numeric id and type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    /// Numeric resource id.
    pub id: u32,
    /// Resource type name (e.g. "DATA").
    pub kind: String,
}

impl ResourceKey {
    /// Creates a resource key.
    #[must_use]
    pub fn new(id: u32, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

/// Looks up resource blobs bundled with the executable.
pub trait ResourceAccessor {
    /// Returns the blob for `id` and `kind`, if present.
    fn lookup(&self, id: u32, kind: &str) -> Option<&[u8]>;
}

/// Resources held in memory, keyed by id and type.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedResources {
    blobs: HashMap<ResourceKey, Vec<u8>>,
}

impl EmbeddedResources {
    /// Creates an empty resource table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a blob.
    #[must_use]
    pub fn with(mut self, id: u32, kind: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.blobs.insert(ResourceKey::new(id, kind), bytes.into());
        self
    }

    /// Number of blobs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Returns true if there are no blobs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl ResourceAccessor for EmbeddedResources {
    fn lookup(&self, id: u32, kind: &str) -> Option<&[u8]> {
        self.blobs
            .get(&ResourceKey::new(id, kind))
            .map(Vec::as_slice)
    }
}

/// Logs whether a resource is available and returns its size.
///
/// Purely informational: a missing resource never stops the launch.
pub fn report_resource(accessor: &dyn ResourceAccessor, id: u32, kind: &str) -> Option<usize> {
    if let Some(bytes) = accessor.lookup(id, kind) {
        info!(resource = %ResourceKey::new(id, kind), "Resources: {} bytes", bytes.len());
        Some(bytes.len())
    } else {
        warn!(resource = %ResourceKey::new(id, kind), "No resources available.");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let resources = EmbeddedResources::new().with(101, "DATA", b"hello".to_vec());
        assert_eq!(resources.len(), 1);
        assert_eq!(resources.lookup(101, "DATA"), Some(&b"hello"[..]));
        assert_eq!(resources.lookup(101, "ICON"), None);
        assert_eq!(resources.lookup(102, "DATA"), None);
    }

    #[test]
    fn test_report_resource() {
        let resources = EmbeddedResources::new().with(101, "DATA", vec![0u8; 16]);
        assert_eq!(report_resource(&resources, 101, "DATA"), Some(16));
        assert_eq!(report_resource(&EmbeddedResources::new(), 101, "DATA"), None);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(ResourceKey::new(101, "DATA").to_string(), "DATA/101");
    }
}
