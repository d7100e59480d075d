use crate::serializable_struct;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Approval,
    Ordinal,
    Cumulative,
    Scoring,
}

impl VoteType {
    pub fn name(&self) -> &'static str {
        match self {
            VoteType::Approval => "approval",
            VoteType::Ordinal => "ordinal",
            VoteType::Cumulative => "cumulative",
            VoteType::Scoring => "scoring",
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VoteType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "approval" => Ok(VoteType::Approval),
            "ordinal" => Ok(VoteType::Ordinal),
            "cumulative" => Ok(VoteType::Cumulative),
            "scoring" => Ok(VoteType::Scoring),
            _ => Err(anyhow!("Unknown vote type '{}'", s)),
        }
    }
}

serializable_struct! {
    PbMeta {
        file_name: String,
        budget: f64,
        vote_type: Option<VoteType>,
    }
}
serializable_struct! {
    PbProject {
        id: String,
        cost: u64,
        name: Option<String>,
    }
}
serializable_struct! {
    PbVoter {
        id: String,
        vote: Vec<String>,
    }
}
serializable_struct! {
    PbInstance {
        meta: PbMeta,
        projects: Vec<PbProject>,
        voters: Vec<PbVoter>,
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InstanceError {
    #[error("budget {0} of '{1}' is not a non-negative finite number")]
    InvalidBudget(f64, String),
}

impl PbInstance {
    /// Knapsack capacity of the instance: the budget rounded down.
    ///
    /// Negative, NaN and infinite budgets are rejected rather than clamped.
    pub fn capacity(&self) -> Result<u64, InstanceError> {
        let budget = self.meta.budget;
        if !budget.is_finite() || budget < 0.0 || budget >= u64::MAX as f64 {
            return Err(InstanceError::InvalidBudget(
                budget,
                self.meta.file_name.clone(),
            ));
        }
        Ok(budget.floor() as u64)
    }
}
