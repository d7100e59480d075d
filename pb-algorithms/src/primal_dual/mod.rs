//! Bidirectional branch and bound ("primal-dual branch").
//!
//! After sorting by descending efficiency, the greedy prefix that fits the
//! capacity forms the core and the first item that does not fit starts the
//! tail. A search state covers `items[..core]` (still forced in) and
//! `items[..b]` (decided). While the state is feasible the search moves
//! forward over the tail, deciding `items[b]`, include first. When it is
//! over capacity it moves backward over the core, deciding `items[core - 1]`,
//! remove first. Each direction prunes with the fractional bound of the item
//! it is about to decide:
//!
//! * feasible: `profit + floor((capacity - weight) * efficiency(b))`
//! * over capacity: `profit - ceil((weight - capacity) * efficiency(core - 1))`
//!
//! Starting next to the fractional optimum usually closes the search much
//! faster than the forward-only variant.

use crate::{
    bound::{fractional_gain, fractional_loss, split_point},
    Cancellation, SolveError, SolveResult,
};
use log::debug;
use pb_knapsack::{sort_by_efficiency, Item};

#[derive(Clone, Copy, Debug)]
struct Node {
    core: usize,
    b: usize,
    profit: u64,
    weight: u64,
    /// Position decided on the way to this node and whether it is packed.
    decided: Option<(usize, bool)>,
}

struct SearchState {
    path: Vec<bool>,
    lower_bound: u64,
    a_star: usize,
    b_star: usize,
    best_path: Vec<bool>,
    nodes: u64,
}

impl SearchState {
    fn record(&mut self, node: &Node) {
        self.lower_bound = node.profit;
        self.a_star = node.core;
        self.b_star = node.b;
        self.best_path.clear();
        self.best_path.extend_from_slice(&self.path[..node.b]);
    }

    /// Everything before `a_star` is packed, the rest up to `b_star` follows
    /// the recorded decisions.
    fn selection(&self, items: &[Item]) -> Vec<Item> {
        (0..self.b_star)
            .filter(|&i| i < self.a_star || self.best_path[i])
            .map(|i| items[i].clone())
            .collect()
    }
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
    let (split, split_weight, split_profit) = split_point(items, capacity);
    debug!(
        "primal_dual: split at {} of {} (weight {}, profit {})",
        split, num_items, split_weight, split_profit
    );

    let mut state = SearchState {
        path: vec![true; num_items],
        lower_bound: 0,
        a_star: 0,
        b_star: 0,
        best_path: Vec::new(),
        nodes: 0,
    };
    let mut stack = vec![Node {
        core: split,
        b: split,
        profit: split_profit,
        weight: split_weight,
        decided: None,
    }];

    while let Some(node) = stack.pop() {
        if cancel.is_cancelled() {
            return Err(SolveError::Cancelled);
        }
        state.nodes += 1;
        if let Some((position, packed)) = node.decided {
            state.path[position] = packed;
        }

        if node.weight <= capacity {
            if node.profit > state.lower_bound {
                state.record(&node);
            }
            if node.b >= num_items {
                continue;
            }
            let next = &items[node.b];
            let upper_bound = node
                .profit
                .saturating_add(fractional_gain(capacity - node.weight, next));
            if upper_bound <= state.lower_bound {
                continue;
            }

            stack.push(Node {
                b: node.b + 1,
                decided: Some((node.b, false)),
                ..node
            });
            // An item heavier than the whole capacity is never part of a
            // feasible subset.
            if next.weight() > capacity {
                continue;
            }
            let (Some(profit), Some(weight)) = (
                node.profit.checked_add(next.profit()),
                node.weight.checked_add(next.weight()),
            ) else {
                continue;
            };
            stack.push(Node {
                b: node.b + 1,
                profit,
                weight,
                decided: Some((node.b, true)),
                ..node
            });
        } else {
            if node.core == 0 {
                continue;
            }
            let last = &items[node.core - 1];
            let Some(loss) = fractional_loss(node.weight - capacity, last) else {
                continue;
            };
            if node.profit.saturating_sub(loss) <= state.lower_bound {
                continue;
            }

            stack.push(Node {
                core: node.core - 1,
                decided: Some((node.core - 1, true)),
                ..node
            });
            stack.push(Node {
                core: node.core - 1,
                profit: node.profit - last.profit(),
                weight: node.weight - last.weight(),
                decided: Some((node.core - 1, false)),
                ..node
            });
        }
    }

    debug!(
        "primal_dual: {} nodes, best profit {} (a* = {}, b* = {})",
        state.nodes, state.lower_bound, state.a_star, state.b_star
    );
    Ok(state.selection(items))
}
