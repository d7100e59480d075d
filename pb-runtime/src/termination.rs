use anyhow::{anyhow, Result};
use pb_algorithms::{Cancellation, CancellationToken, Either, TimeBudget};
use std::{
    sync::{atomic::AtomicBool, Arc},
    time::Duration,
};

/// Cancellation handed to each solve call: raised by SIGINT/SIGTERM, or by the
/// per-solve timeout when one is configured.
pub type SolveCancellation = Either<CancellationToken, Option<TimeBudget>>;

/// Listens for termination signals for the lifetime of the process.
#[derive(Clone, Debug)]
pub struct OsSignal {
    token: CancellationToken,
    timeout: Option<Duration>,
}

impl OsSignal {
    pub fn install(timeout: Option<Duration>) -> Result<Self> {
        const TERMINATION_SIGNALS: &[std::ffi::c_int] =
            &[signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM];

        let flag = Arc::new(AtomicBool::new(false));
        for &signal in TERMINATION_SIGNALS {
            signal_hook::flag::register(signal, Arc::clone(&flag))
                .map_err(|e| anyhow!("Failed to register signal listener: {}", e))?;
        }
        Ok(Self {
            token: CancellationToken::from_flag(flag),
            timeout,
        })
    }

    /// Starts a fresh timeout, so each instance gets the full budget.
    pub fn for_solve(&self) -> SolveCancellation {
        Either(
            self.token.clone(),
            self.timeout.map(TimeBudget::starting_now),
        )
    }

    pub fn received(&self) -> bool {
        self.token.is_cancelled()
    }
}
