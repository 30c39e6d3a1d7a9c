//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Next collection-local integer id: one greater than the current maximum,
/// or 1 for an empty collection.
pub fn next_local_id<E>(records: &[E]) -> i64
where
    E: Entity<Id = i64>,
{
    records.iter().map(|r| *r.id()).max().unwrap_or(0) + 1
}

/// Linear lookup by id over a loaded collection.
pub fn find_by_id<'a, E>(records: &'a [E], id: &E::Id) -> Option<&'a E>
where
    E: Entity,
{
    records.iter().find(|r| r.id() == id)
}
