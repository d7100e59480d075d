use crate::reduction::ProfitRule;
use anyhow::{anyhow, Result};
use pb_algorithms::Algorithm;
use pb_knapsack::{generator, Item};
use serde::{Deserialize, Serialize};

fn default_algorithm() -> Algorithm {
    Algorithm::PrimalDual
}

fn default_algorithms() -> Vec<Algorithm> {
    vec![
        Algorithm::Dynamic,
        Algorithm::BranchAndBound,
        Algorithm::PrimalDual,
    ]
}

fn default_runs() -> usize {
    1
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SolveSettings {
    #[serde(default = "default_algorithm")]
    pub algorithm: Algorithm,
    #[serde(default)]
    pub profit_rule: ProfitRule,
    pub timeout_secs: Option<u64>,
}

impl Default for SolveSettings {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            profit_rule: ProfitRule::default(),
            timeout_secs: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Distribution {
    Uniform,
    Correlated { correlation: f64 },
    VoteWeighted { max_votes: u64 },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BenchmarkSettings {
    pub num_items: usize,
    pub lower: u64,
    pub upper: u64,
    pub distribution: Distribution,
    #[serde(default = "default_runs")]
    pub runs: usize,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_algorithms")]
    pub algorithms: Vec<Algorithm>,
    pub timeout_secs: Option<u64>,
}

impl BenchmarkSettings {
    pub fn validate(&self) -> Result<()> {
        if self.algorithms.is_empty() {
            return Err(anyhow!("At least one algorithm is required"));
        }
        if self.lower > self.upper {
            return Err(anyhow!(
                "Lower bound ({}) is greater than upper bound ({})",
                self.lower,
                self.upper
            ));
        }
        Ok(())
    }

    pub fn generate_items(&self, seed: &[u8; 32]) -> Result<Vec<Item>> {
        match self.distribution {
            Distribution::Uniform => {
                generator::uniform(seed, self.num_items, self.lower, self.upper)
            }
            Distribution::Correlated { correlation } => {
                generator::correlated(seed, self.num_items, self.lower, self.upper, correlation)
            }
            Distribution::VoteWeighted { max_votes } => {
                generator::vote_weighted(seed, self.num_items, self.lower, self.upper, max_votes)
            }
        }
    }
}
