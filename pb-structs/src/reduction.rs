use crate::core::PbInstance;
use anyhow::{anyhow, Result};
use log::debug;
use pb_knapsack::Item;
use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, HashSet},
    str::FromStr,
};

/// How approvals turn into item profit.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProfitRule {
    /// One unit of profit per approving voter.
    #[default]
    Approvals,
    /// Each approval is worth the project's cost.
    CostWeighted,
}

impl FromStr for ProfitRule {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "approvals" => Ok(ProfitRule::Approvals),
            "cost_weighted" => Ok(ProfitRule::CostWeighted),
            _ => Err(anyhow!(
                "Unknown profit rule '{}', expected approvals or cost_weighted",
                s
            )),
        }
    }
}

/// Turns a participatory budgeting instance into knapsack items: one item per
/// project, in project order, weighing the project's cost.
///
/// Approvals of unknown project ids are ignored, and a voter approving the
/// same project several times is counted once.
pub fn reduce(instance: &PbInstance, rule: ProfitRule) -> Vec<Item> {
    let mut items: Vec<Item> = instance
        .projects
        .iter()
        .map(|project| Item::new(project.id.clone(), project.cost, 0))
        .collect();
    let index: HashMap<&str, usize> = instance
        .projects
        .iter()
        .enumerate()
        .map(|(i, project)| (project.id.as_str(), i))
        .collect();

    let mut unknown = 0usize;
    for voter in &instance.voters {
        let mut seen = HashSet::new();
        for vote in &voter.vote {
            let Some(&i) = index.get(vote.as_str()) else {
                unknown += 1;
                continue;
            };
            if !seen.insert(i) {
                continue;
            }
            let amount = match rule {
                ProfitRule::Approvals => 1,
                ProfitRule::CostWeighted => items[i].weight(),
            };
            items[i].accumulate_profit(amount);
        }
    }
    if unknown > 0 {
        debug!(
            "{}: ignored {} approvals of unknown projects",
            instance.meta.file_name, unknown
        );
    }
    items
}
