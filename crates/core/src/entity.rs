//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Products are entities: their stock changes over time but they stay the
/// same product as long as the key is the same.
pub trait Entity {
    /// Identifier the entity is keyed by.
    type Id: Clone + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
