//! Preset identity generation

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of fresh preset ids.
///
/// Parsers take this as a collaborator so tests can supply deterministic ids.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// `{prefix}-{n}` ids counting up from 1
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIds::new("brush");
        assert_eq!(ids.next_id(), "brush-1");
        assert_eq!(ids.next_id(), "brush-2");
    }

    #[test]
    fn test_uuid_ids_are_unique() {
        let a = UuidGenerator.next_id();
        let b = UuidGenerator.next_id();
        assert_eq!(a.len(), 36);
        assert_ne!(a, b);
    }
}
