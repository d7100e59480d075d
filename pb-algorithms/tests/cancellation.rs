use pb_algorithms::*;
use pb_knapsack::{generator, Item};
use std::{
    thread,
    time::{Duration, Instant},
};

#[test]
fn test_cancelled_before_start() {
    let token = CancellationToken::new();
    token.cancel();
    for algorithm in Algorithm::ALL {
        let mut items = vec![Item::new("a", 1, 1), Item::new("b", 2, 3)];
        assert_eq!(
            algorithm.solve(&mut items, 2, &token),
            Err(SolveError::Cancelled),
            "{}",
            algorithm
        );
    }
}

#[test]
fn test_dynamic_aborts_large_table() {
    let items = generator::uniform(&[3u8; 32], 1000, 1, 100).unwrap();
    let token = CancellationToken::new();
    token.cancel();

    let started = Instant::now();
    let result = dynamic::solve(&items, 10_000, &token);
    assert_eq!(result, Err(SolveError::Cancelled));
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
fn test_dynamic_aborts_mid_fill() {
    let items = generator::uniform(&[4u8; 32], 1000, 1, 100).unwrap();
    let token = CancellationToken::new();
    let remote = token.clone();
    let handle = thread::spawn(move || {
        thread::sleep(Duration::from_millis(2));
        remote.cancel();
    });

    // big enough that the fill cannot finish within a few milliseconds
    let result = dynamic::solve(&items, 15_000, &token);
    handle.join().unwrap();
    assert_eq!(result, Err(SolveError::Cancelled));
}

#[test]
fn test_enumeration_respects_time_budget() {
    // 2^40 feasible subsets: the enumeration can only end by cancellation
    let items: Vec<Item> = (0..40).map(|i| Item::new(i.to_string(), 1, 1)).collect();
    let budget = TimeBudget::starting_now(Duration::from_millis(20));

    let started = Instant::now();
    let result = enumeration::solve(&items, 40, &budget);
    assert_eq!(result, Err(SolveError::Cancelled));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn test_combined_sources() {
    let token = CancellationToken::new();
    let either = Either(Never, token.clone());
    assert!(!either.is_cancelled());
    token.cancel();
    assert!(either.is_cancelled());

    let none: Option<CancellationToken> = None;
    assert!(!none.is_cancelled());
    assert!(Some(token).is_cancelled());
}

#[test]
fn test_uncancelled_token_solves() {
    let token = CancellationToken::new();
    let mut items = vec![Item::new("a", 1, 1), Item::new("b", 2, 3)];
    let solution = Algorithm::PrimalDual.solve(&mut items, 2, &token).unwrap();
    assert_eq!(solution, vec![Item::new("b", 2, 3)]);
}

#[test]
fn test_table_too_large() {
    let items = vec![Item::new("a", 1, 1); 4];
    assert!(matches!(
        dynamic::solve(&items, u64::MAX, &Never),
        Err(SolveError::TableTooLarge { .. })
    ));
}
