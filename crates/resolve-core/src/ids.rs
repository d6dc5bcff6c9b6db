//! Identifier generation collaborator

use crate::models::ResolutionId;

/// Source of fresh record identifiers
///
/// Implementations must produce globally unique ids with cryptographically
/// negligible collision probability. Called once per create.
pub trait IdSource {
    fn new_id(&self) -> ResolutionId;
}

/// Random UUID v4 identifier source
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn new_id(&self) -> ResolutionId {
        ResolutionId::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_source_unique() {
        let ids = UuidSource;
        assert_ne!(ids.new_id(), ids.new_id());
    }
}
