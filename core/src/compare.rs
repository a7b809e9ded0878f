use crate::{card::MAX_VALUE, card::MIN_VALUE, Card, Direction};

/// The rule deciding whether a placed card beats an adjacent one. The engine
/// holds exactly one of these and consults it for every adjacency check, so
/// swapping the variant changes battle semantics globally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonRule {
    /// Higher value wins.
    Normal,
    /// Lower value wins; the strict inversion of `Normal`.
    Reverse,
    /// Wraps any base rule: 1 beats 10, 10 never beats 1, everything else
    /// falls through to the base.
    FallenAce(Box<ComparisonRule>),
}

impl Default for ComparisonRule {
    fn default() -> Self {
        ComparisonRule::Normal
    }
}

impl ComparisonRule {
    /// True when the placed card captures the adjacent one along the
    /// touching edge.
    pub fn beats(
        &self,
        placed: &Card,
        adjacent: &Card,
        placed_dir: Direction,
        adjacent_dir: Direction,
    ) -> bool {
        self.beats_values(placed.value(placed_dir), adjacent.value(adjacent_dir))
    }

    fn beats_values(&self, placed: u8, adjacent: u8) -> bool {
        match self {
            ComparisonRule::Normal => placed > adjacent,
            ComparisonRule::Reverse => placed < adjacent,
            ComparisonRule::FallenAce(base) => {
                if placed == MIN_VALUE && adjacent == MAX_VALUE {
                    true
                } else if placed == MAX_VALUE && adjacent == MIN_VALUE {
                    false
                } else {
                    base.beats_values(placed, adjacent)
                }
            }
        }
    }
}
