//! Single-direction depth-first branch and bound ("primal branch").
//!
//! Items are sorted by descending efficiency and decided one position at a
//! time, include before exclude. A branch is closed when it runs past the
//! last item, when the remaining capacity is below the lightest remaining
//! item, or when `profit + floor(remaining * efficiency(next))` cannot beat
//! the incumbent.

use crate::{
    bound::{fractional_gain, suffix_min_weights},
    Cancellation, SolveError, SolveResult,
};
use log::debug;
use pb_knapsack::{sort_by_efficiency, Item};

#[derive(Clone, Copy, Debug)]
struct Node {
    position: usize,
    profit: u64,
    weight: u64,
    /// Decision taken for `position - 1` on the way to this node.
    taken: bool,
}

struct SearchState {
    /// Decisions along the path to the node being expanded.
    path: Vec<bool>,
    best_profit: u64,
    /// Number of decided positions behind the incumbent.
    b_star: usize,
    best_path: Vec<bool>,
    nodes: u64,
}

/// Solves the instance exactly.
///
/// `items` is sorted in place by descending efficiency; the returned subset
/// is listed in that order.
pub fn solve<C>(items: &mut [Item], capacity: u64, cancel: &C) -> SolveResult<Vec<Item>>
where
    C: Cancellation + ?Sized,
{
    sort_by_efficiency(items);
    let items = &*items;
    let num_items = items.len();
    let min_weights = suffix_min_weights(items);

    let mut state = SearchState {
        path: vec![false; num_items],
        best_profit: 0,
        b_star: 0,
        best_path: Vec::new(),
        nodes: 0,
    };
    let mut stack = vec![Node {
        position: 0,
        profit: 0,
        weight: 0,
        taken: false,
    }];

    while let Some(node) = stack.pop() {
        if cancel.is_cancelled() {
            return Err(SolveError::Cancelled);
        }
        state.nodes += 1;
        let b = node.position;
        if b > 0 {
            state.path[b - 1] = node.taken;
        }

        if node.profit > state.best_profit {
            state.best_profit = node.profit;
            state.b_star = b;
            state.best_path.clear();
            state.best_path.extend_from_slice(&state.path[..b]);
        }

        let remaining = capacity - node.weight;
        if b >= num_items || remaining < min_weights[b] {
            continue;
        }
        let upper_bound = node
            .profit
            .saturating_add(fractional_gain(remaining, &items[b]));
        if upper_bound <= state.best_profit {
            continue;
        }

        // Pushed in reverse: the include branch is expanded first.
        stack.push(Node {
            position: b + 1,
            profit: node.profit,
            weight: node.weight,
            taken: false,
        });
        if items[b].weight() <= remaining {
            stack.push(Node {
                position: b + 1,
                profit: node.profit + items[b].profit(),
                weight: node.weight + items[b].weight(),
                taken: true,
            });
        }
    }

    debug!(
        "branch_and_bound: {} nodes, best profit {} at depth {}",
        state.nodes, state.best_profit, state.b_star
    );
    Ok(state
        .best_path
        .iter()
        .zip(items)
        .filter(|(taken, _)| **taken)
        .map(|(_, item)| item.clone())
        .collect())
}
