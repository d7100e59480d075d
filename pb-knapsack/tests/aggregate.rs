use pb_knapsack::*;

fn items() -> Vec<Item> {
    vec![
        Item::new("a", 2, 3),
        Item::new("b", 3, 4),
        Item::new("c", 4, 5),
        Item::new("d", 5, 6),
    ]
}

#[test]
fn test_totals() {
    let items = items();
    assert_eq!(total_weight(&items), 14);
    assert_eq!(total_profit(&items), 18);
    assert_eq!(total_weight(&items[..2]), 5);
    assert_eq!(total_profit(&items[..2]), 7);

    // Repeated calls on the same subset agree
    assert_eq!(total_profit(&items), total_profit(&items));
}

#[test]
fn test_totals_of_empty_subset() {
    let empty: Vec<Item> = Vec::new();
    assert_eq!(total_weight(&empty), 0);
    assert_eq!(total_profit(&empty), 0);
}

#[test]
fn test_totals_over_references() {
    let items = items();
    let refs: Vec<&Item> = items.iter().filter(|i| i.weight() > 3).collect();
    assert_eq!(total_weight(&refs), 9);
    assert_eq!(total_profit(&refs), 11);
}

#[test]
fn test_best_by_profit_keeps_first_of_ties() {
    let items = items();
    let subsets = vec![
        vec![items[0].clone()],
        vec![items[2].clone(), items[0].clone()],
        vec![items[1].clone(), items[1].clone()],
        vec![items[3].clone()],
    ];
    // subsets 1 and 2 both have profit 8
    assert_eq!(
        best_by_profit(&subsets),
        vec![items[2].clone(), items[0].clone()]
    );
}

#[test]
fn test_best_by_weight() {
    let items = items();
    let subsets = vec![
        vec![items[3].clone()],
        vec![items[0].clone(), items[1].clone()],
        vec![items[2].clone()],
    ];
    assert_eq!(best_by_weight(&subsets), vec![items[3].clone()]);
}

#[test]
fn test_best_of_nothing_is_empty() {
    let none: Vec<Vec<Item>> = Vec::new();
    assert!(best_by_profit(&none).is_empty());
    assert!(best_by_weight(&none).is_empty());

    let zeros = vec![vec![Item::new("z", 0, 0)], vec![]];
    assert!(best_by_profit(&zeros).is_empty());
    assert!(best_by_weight(&zeros).is_empty());
}

#[test]
fn test_verify_selection() {
    let items = items();
    assert_eq!(
        verify_selection(&items, &[items[0].clone(), items[1].clone()], 5).unwrap(),
        7
    );
    assert!(verify_selection(&items, &[items[2].clone(), items[1].clone()], 5).is_err());
    assert!(verify_selection(&items, &[items[0].clone(), items[0].clone()], 5).is_err());
    assert!(verify_selection(&items, &[Item::new("x", 1, 1)], 5).is_err());
    assert_eq!(verify_selection(&items, &[], 0).unwrap(), 0);
}

#[test]
fn test_verify_selection_rejects_overflowing_totals() {
    let items = vec![Item::new("a", 2, 3), Item::new("huge", u64::MAX, 1)];
    assert!(verify_selection(&items, &items, 5).is_err());

    let items = vec![Item::new("a", 1, u64::MAX), Item::new("b", 1, 1)];
    assert!(verify_selection(&items, &items, 5).is_err());
    assert_eq!(verify_selection(&items, &items[..1], 5).unwrap(), u64::MAX);
}
