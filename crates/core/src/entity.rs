//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Products and cart lines are entities: two of them with the same id are the
/// same thing, whatever their other fields say.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
