use crate::Item;
use anyhow::{anyhow, Result};
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn check_range(lower: u64, upper: u64) -> Result<()> {
    if lower > upper {
        return Err(anyhow!(
            "Lower bound ({}) is greater than upper bound ({})",
            lower,
            upper
        ));
    }
    Ok(())
}

/// Items whose weight and profit are drawn independently and uniformly from
/// `[lower, upper]`.
pub fn uniform(seed: &[u8; 32], count: usize, lower: u64, upper: u64) -> Result<Vec<Item>> {
    check_range(lower, upper)?;
    let mut rng = SmallRng::from_seed(*seed);

    Ok((0..count)
        .map(|i| {
            let weight = rng.gen_range(lower..=upper);
            let profit = rng.gen_range(lower..=upper);
            Item::new(i.to_string(), weight, profit)
        })
        .collect())
}

/// Items with uniform weights whose profits follow the weights with the given
/// Pearson `correlation`:
///
/// `profit = floor(correlation * weight + sqrt(1 - correlation^2) * t)`,
/// with `t` uniform in `[lower, upper]`.
pub fn correlated(
    seed: &[u8; 32],
    count: usize,
    lower: u64,
    upper: u64,
    correlation: f64,
) -> Result<Vec<Item>> {
    check_range(lower, upper)?;
    if !(0.0..=1.0).contains(&correlation) {
        return Err(anyhow!(
            "Correlation ({}) must lie within [0, 1]",
            correlation
        ));
    }
    let mut rng = SmallRng::from_seed(*seed);
    let noise = (1.0 - correlation * correlation).sqrt();

    Ok((0..count)
        .map(|i| {
            let weight = rng.gen_range(lower..=upper);
            let t = rng.gen_range(lower..=upper);
            let profit = (correlation * weight as f64 + noise * t as f64).floor() as u64;
            Item::new(i.to_string(), weight, profit)
        })
        .collect())
}

/// Items with uniform weights whose profit is the weight multiplied by a
/// number of votes drawn from `[0, max_votes]`. This mirrors instances reduced
/// with the cost-weighted profit rule.
pub fn vote_weighted(
    seed: &[u8; 32],
    count: usize,
    lower: u64,
    upper: u64,
    max_votes: u64,
) -> Result<Vec<Item>> {
    check_range(lower, upper)?;
    let mut rng = SmallRng::from_seed(*seed);

    Ok((0..count)
        .map(|i| {
            let weight = rng.gen_range(lower..=upper);
            let votes = rng.gen_range(0..=max_votes);
            Item::new(i.to_string(), weight, weight.saturating_mul(votes))
        })
        .collect())
}
