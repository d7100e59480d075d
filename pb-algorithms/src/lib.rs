//! Exact solvers for the 0/1 knapsack problem.
//!
//! Every solver shares the same contract: given items and a capacity it
//! returns a subset of the items, weighing at most the capacity, with maximal
//! total profit, or [`SolveError::Cancelled`] if the cancellation source fired
//! first. The branch-and-bound solvers reorder the caller's slice by
//! descending efficiency; the dynamic program and the enumeration leave it
//! untouched.

mod bound;
mod cancel;
pub use cancel::*;
mod error;
pub use error::*;

pub mod branch_and_bound;
pub mod dynamic;
pub mod enumeration;
pub mod primal_dual;

use anyhow::{anyhow, Result};
use pb_knapsack::Item;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Bellman's dynamic program, `O(n * capacity)` time and memory.
    Dynamic,
    /// Forward depth-first branch and bound.
    BranchAndBound,
    /// Bidirectional branch and bound starting from the greedy split.
    PrimalDual,
    /// Exhaustive enumeration, only meant as an oracle on small inputs.
    Enumeration,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Dynamic,
        Algorithm::BranchAndBound,
        Algorithm::PrimalDual,
        Algorithm::Enumeration,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Dynamic => "dynamic",
            Algorithm::BranchAndBound => "branch_and_bound",
            Algorithm::PrimalDual => "primal_dual",
            Algorithm::Enumeration => "enumeration",
        }
    }

    /// Whether [`Algorithm::solve`] sorts the caller's items in place.
    pub fn reorders_items(&self) -> bool {
        matches!(self, Algorithm::BranchAndBound | Algorithm::PrimalDual)
    }

    pub fn solve<C>(&self, items: &mut [Item], capacity: u64, cancel: &C) -> SolveResult<Vec<Item>>
    where
        C: Cancellation + ?Sized,
    {
        match self {
            Algorithm::Dynamic => dynamic::solve(items, capacity, cancel),
            Algorithm::BranchAndBound => branch_and_bound::solve(items, capacity, cancel),
            Algorithm::PrimalDual => primal_dual::solve(items, capacity, cancel),
            Algorithm::Enumeration => enumeration::solve(items, capacity, cancel),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| {
                anyhow!(
                    "Unknown algorithm '{}', expected one of: {}",
                    s,
                    Algorithm::ALL.map(|a| a.name()).join(", ")
                )
            })
    }
}
