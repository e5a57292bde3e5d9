//! Platform error types

use thiserror::Error;

use crate::host::ResourceId;

/// Kind of host resource being resolved
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Color,
    Dimension,
    Drawable,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceKind::Color => "color",
            ResourceKind::Dimension => "dimension",
            ResourceKind::Drawable => "drawable",
        };
        f.write_str(name)
    }
}

/// Platform-related errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// A referenced resource does not exist on the host
    #[error("{kind} resource {id} not found")]
    ResourceNotFound {
        /// What kind of resource was requested
        kind: ResourceKind,
        /// The missing resource id
        id: ResourceId,
    },
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
