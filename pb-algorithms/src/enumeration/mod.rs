//! Exhaustive enumeration of every feasible subset.
//!
//! This is a correctness oracle for the other solvers: time and memory grow
//! as `O(2^n)`, so it is only usable for a couple of dozen items at most.

use crate::{Cancellation, SolveError, SolveResult};
use log::debug;
use pb_knapsack::{best_by_profit, Item};

enum Task {
    /// Explore the decision for `items[position]` on top of `subsets[subset]`.
    Visit {
        position: usize,
        subset: usize,
        remaining: u64,
    },
    /// Extend `subsets[subset]` with `items[position]` if it fits.
    Include {
        position: usize,
        subset: usize,
        remaining: u64,
    },
}

/// Collects every feasible subset of `items`, starting with the empty one.
///
/// Subsets are produced in pre-order of the decision tree, the exclude branch
/// before the include branch, and every subset extends its parent. A branch
/// is only extended with an item while that item fits the remaining capacity;
/// free items are still considered once the capacity is used up.
pub fn feasible_subsets<'a, C>(
    items: &'a [Item],
    capacity: u64,
    cancel: &C,
) -> SolveResult<Vec<Vec<&'a Item>>>
where
    C: Cancellation + ?Sized,
{
    let mut subsets: Vec<Vec<&Item>> = vec![Vec::new()];
    let mut stack = vec![Task::Visit {
        position: 0,
        subset: 0,
        remaining: capacity,
    }];

    while let Some(task) = stack.pop() {
        if cancel.is_cancelled() {
            return Err(SolveError::Cancelled);
        }
        match task {
            Task::Visit {
                position,
                subset,
                remaining,
            } => {
                if position == items.len() {
                    continue;
                }
                stack.push(Task::Include {
                    position,
                    subset,
                    remaining,
                });
                stack.push(Task::Visit {
                    position: position + 1,
                    subset,
                    remaining,
                });
            }
            Task::Include {
                position,
                subset,
                remaining,
            } => {
                let item = &items[position];
                if item.weight() > remaining {
                    continue;
                }
                let mut extended = subsets[subset].clone();
                extended.push(item);
                subsets.push(extended);
                stack.push(Task::Visit {
                    position: position + 1,
                    subset: subsets.len() - 1,
                    remaining: remaining - item.weight(),
                });
            }
        }
    }
    Ok(subsets)
}

/// Solves the instance by picking the most profitable feasible subset, the
/// first one found among equals. `items` is left in its original order.
pub fn solve<C>(items: &[Item], capacity: u64, cancel: &C) -> SolveResult<Vec<Item>>
where
    C: Cancellation + ?Sized,
{
    let subsets = feasible_subsets(items, capacity, cancel)?;
    debug!("enumeration: {} feasible subsets", subsets.len());
    Ok(best_by_profit(&subsets).into_iter().cloned().collect())
}
