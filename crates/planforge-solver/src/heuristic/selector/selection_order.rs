//! Selection order for composite selectors.

/// Defines the order in which a composite selector walks its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionOrder {
    /// Yield every move of the first child, then every move of the next.
    ///
    /// Deterministic and reproducible.
    #[default]
    Original,

    /// Interleave children at random, proportionally to their weights.
    ///
    /// Each child's moves keep their relative order; every move is still
    /// yielded exactly once.
    Random,
}

impl SelectionOrder {
    /// Returns true if this order consumes random numbers.
    pub fn is_random(&self) -> bool {
        matches!(self, SelectionOrder::Random)
    }
}
