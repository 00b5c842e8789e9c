//! Move result invariants: disjoint id sets, one removal per merge.

use super::Invariant;
use crate::action::MoveResult;
use std::collections::HashSet;

/// Invariant: a tile appears in at most one of `moved`, `merged`, `removed`,
/// and at most once within each.
pub struct DisjointOutcomeInvariant;

impl Invariant<MoveResult> for DisjointOutcomeInvariant {
    fn holds(result: &MoveResult) -> bool {
        let mut seen = HashSet::new();
        result
            .moved()
            .iter()
            .chain(result.merged())
            .chain(result.removed())
            .all(|id| seen.insert(*id))
    }

    fn description() -> &'static str {
        "Moved, merged and removed tiles are disjoint"
    }
}

/// Invariant: every merge removes exactly one tile.
pub struct BalancedMergesInvariant;

impl Invariant<MoveResult> for BalancedMergesInvariant {
    fn holds(result: &MoveResult) -> bool {
        result.merged().len() == result.removed().len()
    }

    fn description() -> &'static str {
        "Merged and removed counts are equal"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileId;

    #[test]
    fn test_empty_result_holds() {
        let result = MoveResult::invalid();
        assert!(DisjointOutcomeInvariant::holds(&result));
        assert!(BalancedMergesInvariant::holds(&result));
    }

    #[test]
    fn test_tile_in_two_sets_violates() {
        let result = MoveResult {
            moved: vec![TileId(1)],
            merged: vec![TileId(1)],
            removed: vec![TileId(2)],
            valid: true,
        };
        assert!(!DisjointOutcomeInvariant::holds(&result));
        assert!(BalancedMergesInvariant::holds(&result));
    }

    #[test]
    fn test_unbalanced_merge_violates() {
        let result = MoveResult {
            moved: vec![],
            merged: vec![TileId(1), TileId(3)],
            removed: vec![TileId(2)],
            valid: true,
        };
        assert!(!BalancedMergesInvariant::holds(&result));
    }
}
