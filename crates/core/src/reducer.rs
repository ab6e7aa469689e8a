//! Reducer trait for state containers driven by discrete actions.

/// Reducer execution semantics (pure, deterministic).
///
/// - **State mutation**: `reduce(&mut self, action)` evolves state.
/// - **Change tracking**: `revision()` increases by one per reduced action, so
///   a view can cheaply tell whether it must re-render.
///
/// Reducers must not perform IO. Degenerate inputs are absorbed into
/// degenerate state (empty lists, defaults); `reduce` has no error channel.
pub trait Reducer {
    type Action: Clone + core::fmt::Debug;

    /// Evolve in-memory state from a single action.
    fn reduce(&mut self, action: Self::Action);

    /// Number of actions reduced so far.
    fn revision(&self) -> u64;

    /// Reduce a sequence of actions in order.
    fn reduce_all<I>(&mut self, actions: I)
    where
        I: IntoIterator<Item = Self::Action>,
    {
        for action in actions {
            self.reduce(action);
        }
    }
}
