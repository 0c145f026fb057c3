//! Move resolution over matched pairs.
//!
//! Matched elements get dense ranks: their index among matched elements in
//! old order and in new order. Inserted and deleted neighbours shift raw
//! indices without moving anything, so every decision here is made on
//! dense ranks; raw indices are only used to address the emitted moves.
//!
//! For the two preference strategies the elements left unmoved always keep
//! their relative order. Proof sketch: if `x` precedes `y` in old order and
//! follows it in new order, their dense ranks cannot both be unchanged, so
//! at least one of them is scanned as a pivot, and the pivot marks the
//! other as a crosser.

use crate::config::MoveStrategy;
use crate::diff::matcher::MatchedPair;
use crate::diff::plan::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    LastToFirst,
    FirstToLast,
}

/// Resolve the moved subset of `pairs`
///
/// `pairs` must be in old order (strictly increasing `from`), which is how
/// [`partition`](crate::diff::matcher::partition) produces them. Returns
/// raw `(from, to)` index pairs ordered by destination.
pub fn resolve_moves<T>(pairs: &[MatchedPair<'_, T>], strategy: &MoveStrategy<T>) -> Vec<Move<usize>> {
    let count = pairs.len();
    if count < 2 && !matches!(strategy, MoveStrategy::Recognizer(_)) {
        return Vec::new();
    }

    // Arena: element k is pairs[k]; its old dense rank is k.
    let mut by_new: Vec<usize> = (0..count).collect();
    by_new.sort_by_key(|&k| pairs[k].to);
    let mut new_rank = vec![0usize; count];
    for (rank, &k) in by_new.iter().enumerate() {
        new_rank[k] = rank;
    }

    let moved = match strategy {
        MoveStrategy::TopPreference => crossing_movers(&by_new, &new_rank, Scan::LastToFirst),
        MoveStrategy::BottomPreference => crossing_movers(&by_new, &new_rank, Scan::FirstToLast),
        MoveStrategy::Recognizer(recognizer) => (0..count)
            .map(|k| k != new_rank[k] && recognizer.recognize_move(pairs[k].old, pairs[k].new))
            .collect(),
    };

    let moves: Vec<Move<usize>> = by_new
        .iter()
        .filter(|&&k| moved[k])
        .map(|&k| Move::new(pairs[k].from, pairs[k].to))
        .collect();

    tracing::trace!(
        strategy = strategy.label(),
        matched = count,
        moved = moves.len(),
        "resolved moves"
    );
    moves
}

/// Mark the elements that cross each displaced pivot
///
/// A pivot at old rank `f` and new rank `t` is crossed by every element
/// that was after it and is now before it, and by every element that was
/// before it and is now after it. Crossers are marked as movers; marked
/// elements are not used as pivots themselves, which is what makes the
/// scan direction decide who gets blamed.
fn crossing_movers(by_new: &[usize], new_rank: &[usize], scan: Scan) -> Vec<bool> {
    let count = by_new.len();
    let mut moved = vec![false; count];

    let ranks: Vec<usize> = match scan {
        Scan::LastToFirst => (0..count).rev().collect(),
        Scan::FirstToLast => (0..count).collect(),
    };

    for t in ranks {
        let pivot = by_new[t];
        let f = pivot;
        if f == t || moved[pivot] {
            continue;
        }

        for other in 0..count {
            if other == pivot {
                continue;
            }
            let other_new = new_rank[other];
            let now_before_was_after = other_new < t && other > f;
            let now_after_was_before = other_new > t && other < f;
            if now_before_was_after || now_after_was_before {
                moved[other] = true;
            }
        }
    }

    moved
}
