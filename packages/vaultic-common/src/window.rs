use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Timestamp, Uint128};

/// Errors from window construction/extension.
#[derive(Debug, PartialEq, Eq)]
pub enum WindowError {
    /// finish must be strictly after start
    EmptyWindow { start: u64, finish: u64 },
    /// finish may only move later, never earlier
    FinishMovedEarlier { current: u64, requested: u64 },
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::EmptyWindow { start, finish } => {
                write!(f, "empty window: finish ({finish}) must be after start ({start})")
            }
            WindowError::FinishMovedEarlier { current, requested } => {
                write!(
                    f,
                    "window finish may only be extended (current {current}, requested {requested})"
                )
            }
        }
    }
}

impl std::error::Error for WindowError {}

/// A `(start, finish)` interval over which a fixed total transitions from
/// fully locked to fully unlocked, linearly in block time.
///
/// `locked_amount` must be recomputed against the current block time on every
/// query; the fraction is never cached across blocks.
#[cw_serde]
#[derive(Copy)]
pub struct TimeWindow {
    pub start: Timestamp,
    pub finish: Timestamp,
}

impl TimeWindow {
    pub fn new(start: Timestamp, finish: Timestamp) -> Result<Self, WindowError> {
        if finish <= start {
            return Err(WindowError::EmptyWindow {
                start: start.seconds(),
                finish: finish.seconds(),
            });
        }
        Ok(TimeWindow { start, finish })
    }

    /// Move `finish` later. Shrinking the window is rejected.
    pub fn extend(&mut self, new_finish: Timestamp) -> Result<(), WindowError> {
        if new_finish <= self.finish {
            return Err(WindowError::FinishMovedEarlier {
                current: self.finish.seconds(),
                requested: new_finish.seconds(),
            });
        }
        self.finish = new_finish;
        Ok(())
    }

    pub fn contains(&self, now: Timestamp) -> bool {
        now >= self.start && now < self.finish
    }

    pub fn started(&self, now: Timestamp) -> bool {
        now >= self.start
    }

    pub fn finished(&self, now: Timestamp) -> bool {
        now >= self.finish
    }

    /// Portion of `total` still locked at `now`.
    ///
    /// Fully locked before `start`, zero at/after `finish`, otherwise
    /// `total * (finish - now) / (finish - start)` with multiply-before-divide
    /// floor arithmetic.
    pub fn locked_amount(&self, total: Uint128, now: Timestamp) -> Uint128 {
        if now <= self.start {
            return total;
        }
        if now >= self.finish {
            return Uint128::zero();
        }
        let remaining = self.finish.seconds() - now.seconds();
        let span = self.finish.seconds() - self.start.seconds();
        total.multiply_ratio(remaining, span)
    }

    /// Portion of `total` already unlocked at `now`. Defined as the exact
    /// complement of `locked_amount` so the two always sum to `total`.
    pub fn unlocked_amount(&self, total: Uint128, now: Timestamp) -> Uint128 {
        total - self.locked_amount(total, now)
    }
}
