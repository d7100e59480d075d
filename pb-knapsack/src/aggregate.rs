use crate::Item;
use std::borrow::Borrow;

/// Sum of the weights of `items`. Zero for an empty subset.
pub fn total_weight<T: Borrow<Item>>(items: &[T]) -> u64 {
    items.iter().map(|item| item.borrow().weight()).sum()
}

/// Sum of the profits of `items`. Zero for an empty subset.
pub fn total_profit<T: Borrow<Item>>(items: &[T]) -> u64 {
    items.iter().map(|item| item.borrow().profit()).sum()
}

/// Returns the subset with the strictly greatest total weight.
///
/// The first subset reaching the maximum wins. An empty input, or one where
/// every subset weighs zero, yields an empty subset.
pub fn best_by_weight<T: Borrow<Item> + Clone>(subsets: &[Vec<T>]) -> Vec<T> {
    best_by(subsets, |subset| total_weight(subset))
}

/// Returns the subset with the strictly greatest total profit, with the same
/// tie and empty-input rules as [`best_by_weight`].
pub fn best_by_profit<T: Borrow<Item> + Clone>(subsets: &[Vec<T>]) -> Vec<T> {
    best_by(subsets, |subset| total_profit(subset))
}

fn best_by<T, F>(subsets: &[Vec<T>], aggregate: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&[T]) -> u64,
{
    let mut best_value = 0;
    let mut best_subset = None;
    for subset in subsets {
        let value = aggregate(subset);
        if value > best_value {
            best_value = value;
            best_subset = Some(subset);
        }
    }
    best_subset.cloned().unwrap_or_default()
}
