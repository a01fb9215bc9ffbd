//! Identifier allocation for newly created entities

use uuid::Uuid;

/// Produces identifiers for entities that do not have one yet.
///
/// Allocators are only consulted for elements without an identifier;
/// existing identifiers are never regenerated.
pub trait IdAllocator {
    fn allocate(&self) -> String;
}

/// Random version 4 UUIDs in canonical hyphenated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidAllocator;

impl IdAllocator for UuidAllocator {
    fn allocate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

impl<A: IdAllocator + ?Sized> IdAllocator for &A {
    fn allocate(&self) -> String {
        (**self).allocate()
    }
}
