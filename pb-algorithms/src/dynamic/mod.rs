//! Bellman's dynamic program over weight budgets.
//!
//! Two dense `(n + 1) x (capacity + 1)` tables are filled row by row:
//! the best profit reachable with the first `j` items inside budget `d`, and
//! whether item `j - 1` is part of that optimum. The second table is what
//! makes the backtracking possible, so both are kept in full.

use crate::{Cancellation, SolveError, SolveResult};
use log::debug;
use pb_knapsack::Item;

struct Table {
    columns: usize,
    best_profit: Vec<u64>,
    chose: Vec<bool>,
}

impl Table {
    fn allocate(rows: usize, capacity: u64) -> SolveResult<Self> {
        let too_large = || SolveError::TableTooLarge {
            rows,
            columns: capacity.saturating_add(1),
        };
        let columns = usize::try_from(capacity)
            .ok()
            .and_then(|c| c.checked_add(1))
            .ok_or_else(too_large)?;
        let cells = rows.checked_mul(columns).ok_or_else(too_large)?;

        let mut best_profit = Vec::new();
        best_profit
            .try_reserve_exact(cells)
            .map_err(|_| too_large())?;
        best_profit.resize(cells, 0);
        let mut chose = Vec::new();
        chose.try_reserve_exact(cells).map_err(|_| too_large())?;
        chose.resize(cells, false);

        Ok(Self {
            columns,
            best_profit,
            chose,
        })
    }

    fn index(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }
}

pub fn solve<C>(items: &[Item], capacity: u64, cancel: &C) -> SolveResult<Vec<Item>>
where
    C: Cancellation + ?Sized,
{
    if cancel.is_cancelled() {
        return Err(SolveError::Cancelled);
    }
    let rows = items.len() + 1;
    let mut table = Table::allocate(rows, capacity)?;
    debug!("dynamic: filling {} x {} table", rows, table.columns);

    // Row 0 (no items) is all zeros from the allocation.
    for j in 1..rows {
        let item = &items[j - 1];
        let weight = usize::try_from(item.weight()).unwrap_or(usize::MAX);
        let profit = item.profit();

        for d in 0..table.columns {
            if cancel.is_cancelled() {
                return Err(SolveError::Cancelled);
            }
            let skip = table.best_profit[table.index(j - 1, d)];
            let cell = table.index(j, d);
            if d < weight {
                table.best_profit[cell] = skip;
                continue;
            }
            let take = table.best_profit[table.index(j - 1, d - weight)] + profit;
            if take > skip {
                table.best_profit[cell] = take;
                table.chose[cell] = true;
            } else {
                table.best_profit[cell] = skip;
            }
        }
    }

    Ok(backtrack(&table, items))
}

fn backtrack(table: &Table, items: &[Item]) -> Vec<Item> {
    let mut result = Vec::new();
    let mut column = table.columns - 1;
    for row in (1..=items.len()).rev() {
        if table.chose[table.index(row, column)] {
            let item = &items[row - 1];
            // a chosen cell always has column >= weight
            column -= item.weight() as usize;
            result.push(item.clone());
        }
    }
    result.reverse();
    result
}
