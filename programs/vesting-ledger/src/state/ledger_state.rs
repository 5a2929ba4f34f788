use anchor_lang::prelude::*;

use crate::error::LedgerError;

/// Singleton ledger state PDA: the immutable schedule plus aggregate fund
/// counters. The vault token balance must always equal
/// `total_donated - total_released`.
#[account]
pub struct LedgerState {
    /// Administrative identity; the only caller allowed to register
    /// beneficiary batches.
    pub admin: Pubkey,
    /// Token mint of the single asset this ledger instance handles.
    pub mint: Pubkey,
    /// Vesting start timestamp (Unix seconds, UTC).
    pub start_ts: i64,
    /// Vesting duration in seconds (> 0).
    pub duration_secs: i64,
    /// Sum of all beneficiary allocations.
    pub total_allocated: u64,
    /// Net donated funds: sum of contributions minus sum of refunds.
    pub total_donated: u64,
    /// Sum of per-beneficiary released amounts.
    pub total_released: u64,
}

impl LedgerState {
    pub const SIZE: usize =
        32 + // admin
        32 + // mint
        8 +  // start_ts
        8 +  // duration_secs
        8 +  // total_allocated
        8 +  // total_donated
        8;   // total_released

    /// Funds still held by the ledger and not yet owed out; the cap on
    /// both releases and refunds.
    pub fn available_funds(&self) -> std::result::Result<u64, LedgerError> {
        self.total_donated
            .checked_sub(self.total_released)
            .ok_or(LedgerError::MathOverflow)
    }
}
