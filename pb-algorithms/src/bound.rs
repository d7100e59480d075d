//! Bounding helpers shared by the branch-and-bound solvers.
//!
//! All bounds are computed exactly in integer arithmetic over the
//! efficiency-sorted item order, so pruning never depends on float rounding.

use pb_knapsack::Item;

/// `result[i]` is the smallest weight among `items[i..]`.
pub(crate) fn suffix_min_weights(items: &[Item]) -> Vec<u64> {
    let mut result = vec![0; items.len()];
    let mut min = u64::MAX;
    for (i, item) in items.iter().enumerate().rev() {
        min = min.min(item.weight());
        result[i] = min;
    }
    result
}

/// Upper bound on the profit that items at or after `next` can still add
/// with `remaining` capacity: `floor(remaining * efficiency(next))`.
///
/// Free items make the bound unbounded.
pub(crate) fn fractional_gain(remaining: u64, next: &Item) -> u64 {
    if next.weight() == 0 {
        return u64::MAX;
    }
    let gain = remaining as u128 * next.profit() as u128 / next.weight() as u128;
    u64::try_from(gain).unwrap_or(u64::MAX)
}

/// Lower bound on the profit lost when removing `excess` weight from items at
/// or before `last`: `ceil(excess * efficiency(last))`.
///
/// Returns `None` when `last` is free, since removing free items never
/// restores feasibility.
pub(crate) fn fractional_loss(excess: u64, last: &Item) -> Option<u64> {
    if last.weight() == 0 {
        return None;
    }
    let numerator = excess as u128 * last.profit() as u128;
    let weight = last.weight() as u128;
    let loss = (numerator + weight - 1) / weight;
    Some(u64::try_from(loss).unwrap_or(u64::MAX))
}

/// Index of the first item that no longer fits when items are taken greedily
/// in order, together with the weight and profit of the greedy prefix.
/// The index equals `items.len()` when everything fits.
pub(crate) fn split_point(items: &[Item], capacity: u64) -> (usize, u64, u64) {
    let mut weight = 0u64;
    let mut profit = 0u64;
    for (i, item) in items.iter().enumerate() {
        match weight.checked_add(item.weight()) {
            Some(w) if w <= capacity => {
                weight = w;
                profit += item.profit();
            }
            _ => return (i, weight, profit),
        }
    }
    (items.len(), weight, profit)
}
