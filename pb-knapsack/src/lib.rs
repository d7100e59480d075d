mod aggregate;
pub use aggregate::*;
pub mod generator;
mod item;
pub use item::*;

use anyhow::{anyhow, Result};
use std::collections::HashMap;

/// Checks that `selected` is a feasible answer for `items` under `capacity`
/// and returns its total profit.
///
/// Every selected item must occur in `items`, and no item may be selected more
/// often than it occurs there.
pub fn verify_selection(items: &[Item], selected: &[Item], capacity: u64) -> Result<u64> {
    let mut available: HashMap<&Item, usize> = HashMap::new();
    for item in items {
        *available.entry(item).or_default() += 1;
    }
    for item in selected {
        match available.get_mut(item) {
            Some(count) if *count > 0 => *count -= 1,
            Some(_) => return Err(anyhow!("Item ({}) selected more than once", item.id())),
            None => return Err(anyhow!("Item ({}) is not part of the instance", item.id())),
        }
    }

    let weight = checked_total(selected, Item::weight)
        .ok_or_else(|| anyhow!("Total weight of the selection overflows"))?;
    if weight > capacity {
        return Err(anyhow!(
            "Total weight ({}) exceeded capacity ({})",
            weight,
            capacity
        ));
    }
    checked_total(selected, Item::profit)
        .ok_or_else(|| anyhow!("Total profit of the selection overflows"))
}

fn checked_total(items: &[Item], value: fn(&Item) -> u64) -> Option<u64> {
    items
        .iter()
        .try_fold(0u64, |total, item| total.checked_add(value(item)))
}
