use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The cancellation source fired before the search finished. No partial
    /// result is kept.
    #[error("solve was cancelled")]
    Cancelled,
    /// The dynamic programming table cannot be allocated.
    #[error("dynamic programming table of {rows} x {columns} cells cannot be allocated")]
    TableTooLarge { rows: usize, columns: u64 },
}

pub type SolveResult<T> = Result<T, SolveError>;
