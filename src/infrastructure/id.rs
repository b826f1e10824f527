//! Contact id generators.

use crate::domain::{ContactId, IdGenerator};
use uuid::Uuid;

/// Random v4 UUIDs, used by the binary.
#[derive(Debug, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> ContactId {
        ContactId::new(Uuid::new_v4().to_string())
    }
}

/// Counts upwards from a starting number. Predictable ids for tests and demos.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    next: u64,
}

impl SequentialIdGenerator {
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> ContactId {
        let id = ContactId::from(self.next);
        self.next += 1;
        id
    }
}
