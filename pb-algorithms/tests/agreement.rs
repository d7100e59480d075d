use pb_algorithms::*;
use pb_knapsack::{generator, total_profit, total_weight, verify_selection, Item};
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn solve_all(instance: &[Item], capacity: u64) -> Vec<(Algorithm, Vec<Item>)> {
    Algorithm::ALL
        .into_iter()
        .map(|algorithm| {
            let mut items = instance.to_vec();
            let solution = algorithm.solve(&mut items, capacity, &Never).unwrap();
            (algorithm, solution)
        })
        .collect()
}

fn arb_items(max_len: usize, max_weight: u64, max_profit: u64) -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec((0..=max_weight, 0..=max_profit), 0..=max_len).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (w, p))| Item::new(i.to_string(), w, p))
            .collect()
    })
}

proptest! {
    #[test]
    fn solutions_are_feasible_and_agree_with_enumeration(
        items in arb_items(12, 30, 40),
        capacity in 0u64..120,
    ) {
        let solutions = solve_all(&items, capacity);
        let oracle = total_profit(&solutions[3].1);
        for (algorithm, solution) in &solutions {
            prop_assert!(total_weight(solution) <= capacity, "{}", algorithm);
            prop_assert!(verify_selection(&items, solution, capacity).is_ok(), "{}", algorithm);
            prop_assert_eq!(total_profit(solution), oracle, "{}", algorithm);
        }
    }

    #[test]
    fn correlated_instances_agree(
        seed in any::<[u8; 32]>(),
        n in 0usize..14,
        correlation in 0.0f64..=1.0,
    ) {
        let items = generator::correlated(&seed, n, 1, 50, correlation).unwrap();
        let capacity = total_weight(&items) / 2;
        let solutions = solve_all(&items, capacity);
        let oracle = total_profit(&solutions[3].1);
        for (algorithm, solution) in &solutions {
            prop_assert!(total_weight(solution) <= capacity, "{}", algorithm);
            prop_assert_eq!(total_profit(solution), oracle, "{}", algorithm);
        }
    }
}

#[test]
fn test_primal_dual_agrees_with_dynamic_on_larger_instances() {
    let mut rng = StdRng::seed_from_u64(1337);
    for n in [10, 100, 500] {
        for _ in 0..5 {
            let items = generator::uniform(&rng.gen(), n, 0, 100).unwrap();
            let capacity = total_weight(&items) / 2;

            let dynamic = dynamic::solve(&items, capacity, &Never).unwrap();
            let mut sorted = items.clone();
            let primal_dual = primal_dual::solve(&mut sorted, capacity, &Never).unwrap();

            assert!(total_weight(&dynamic) <= capacity);
            assert!(total_weight(&primal_dual) <= capacity);
            assert_eq!(total_profit(&dynamic), total_profit(&primal_dual));
        }
    }
}

#[test]
fn test_branch_and_bound_agrees_with_dynamic() {
    let mut rng = StdRng::seed_from_u64(42);
    for n in [10, 25, 40] {
        for _ in 0..5 {
            let items = generator::uniform(&rng.gen(), n, 1, 100).unwrap();
            let capacity = total_weight(&items) / 2;

            let dynamic = dynamic::solve(&items, capacity, &Never).unwrap();
            let mut sorted = items.clone();
            let primal = branch_and_bound::solve(&mut sorted, capacity, &Never).unwrap();

            assert!(total_weight(&primal) <= capacity);
            assert_eq!(total_profit(&dynamic), total_profit(&primal));
        }
    }
}

#[test]
fn test_vote_weighted_instances_agree() {
    // many items share an efficiency, which makes ties common
    for seed in 0u8..4 {
        let items = generator::vote_weighted(&[seed; 32], 16, 1, 60, 4).unwrap();
        let capacity = total_weight(&items) / 3;
        let solutions = solve_all(&items, capacity);
        let oracle = total_profit(&solutions[3].1);
        for (algorithm, solution) in &solutions {
            assert!(total_weight(solution) <= capacity, "{}", algorithm);
            assert_eq!(total_profit(solution), oracle, "{}", algorithm);
        }
    }
}
