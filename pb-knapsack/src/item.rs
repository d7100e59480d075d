use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

/// A weight/profit pair, the unit of selection of a knapsack instance.
///
/// The weight is fixed at construction. The profit can still be accumulated
/// while an instance is being built (see the reduction in `pb-structs`), but
/// solvers only ever read it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item {
    id: String,
    weight: u64,
    profit: u64,
}

impl Item {
    pub fn new(id: impl Into<String>, weight: u64, profit: u64) -> Self {
        Self {
            id: id.into(),
            weight,
            profit,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    pub fn profit(&self) -> u64 {
        self.profit
    }

    pub fn accumulate_profit(&mut self, amount: u64) {
        self.profit += amount;
    }

    /// Profit per unit of weight. Zero-weight items are free and report
    /// `f64::INFINITY`, whatever their profit.
    pub fn efficiency(&self) -> f64 {
        if self.weight == 0 {
            f64::INFINITY
        } else {
            self.profit as f64 / self.weight as f64
        }
    }

    /// Exact comparison of efficiencies without going through floats.
    ///
    /// Zero-weight items compare equal to each other and greater than every
    /// item with a positive weight, which keeps this a total order.
    pub fn cmp_efficiency(&self, other: &Item) -> Ordering {
        match (self.weight, other.weight) {
            (0, 0) => Ordering::Equal,
            (0, _) => Ordering::Greater,
            (_, 0) => Ordering::Less,
            (w_a, w_b) => {
                let lhs = self.profit as u128 * w_b as u128;
                let rhs = other.profit as u128 * w_a as u128;
                lhs.cmp(&rhs)
            }
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Id: {}, Profit: {}, Weight: {}, Efficiency: {}",
            self.id,
            self.profit,
            self.weight,
            self.efficiency()
        )
    }
}

/// Sorts `items` in place by descending efficiency.
///
/// The sort is stable: items of equal efficiency keep their relative input
/// order. Both branch-and-bound solvers rely on this order for their bounds
/// and for tie-breaking.
pub fn sort_by_efficiency(items: &mut [Item]) {
    items.sort_by(|a, b| b.cmp_efficiency(a));
}

pub fn is_sorted_by_efficiency(items: &[Item]) -> bool {
    items
        .windows(2)
        .all(|pair| pair[0].cmp_efficiency(&pair[1]) != Ordering::Less)
}
