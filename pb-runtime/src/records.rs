use pb_algorithms::Algorithm;
use serde::Serialize;

/// Outcome of solving one PABULIB instance.
#[derive(Serialize, Debug, Clone)]
pub struct SolveRecord {
    pub file: String,
    pub algorithm: Algorithm,
    pub num_items: usize,
    pub capacity: u64,
    pub weight: u64,
    pub profit: u64,
    pub elapsed_ms: f64,
    pub selected: Vec<String>,
}

/// One algorithm on one generated item set. `weight` and `profit` are empty
/// when the run was cancelled, and `error` says why.
#[derive(Serialize, Debug, Clone)]
pub struct BenchmarkRecord {
    pub run: usize,
    pub algorithm: Algorithm,
    pub num_items: usize,
    pub capacity: u64,
    pub weight: Option<u64>,
    pub profit: Option<u64>,
    pub elapsed_ms: f64,
    pub error: Option<String>,
}
