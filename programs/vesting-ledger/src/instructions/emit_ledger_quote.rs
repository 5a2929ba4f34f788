use anchor_lang::prelude::*;

use crate::error::LedgerError;
use crate::identity::{CrossAddress, DualIdentity};
use crate::state::{Beneficiaries, LedgerState};
use crate::utils::vesting;

/// Read-only diagnostic query. `NothingToRelease` is deliberately one
/// undifferentiated error; this quote exposes the underlying quantities
/// (vested, released, available funds) so callers can tell a not-started
/// schedule from an underfunded ledger without parsing error text.
pub fn emit_ledger_quote(ctx: Context<EmitLedgerQuote>, identity: CrossAddress) -> Result<()> {
    let st = &ctx.accounts.ledger_state;
    let identity = DualIdentity::try_from(identity)?;
    let key = identity.canonical_key();

    let entry = ctx
        .accounts
        .beneficiaries
        .find(&key)
        .ok_or(LedgerError::BeneficiaryNotFound)?;

    let now = Clock::get()?.unix_timestamp;
    let available = st.available_funds()?;
    let vested = vesting::vested_amount(entry.allocated, now, st.start_ts, st.duration_secs)?;
    let releasable = vesting::releasable_amount(
        entry.allocated,
        entry.released,
        available,
        now,
        st.start_ts,
        st.duration_secs,
    )?;

    emit!(LedgerQuote {
        evm_key: key,
        allocated: entry.allocated,
        vested,
        released: entry.released,
        releasable,
        available_funds: available,
        start_ts: st.start_ts,
        duration_secs: st.duration_secs,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct EmitLedgerQuote<'info> {
    #[account(seeds = [b"ledger_state"], bump)]
    pub ledger_state: Account<'info, LedgerState>,

    #[account(
        seeds = [b"beneficiaries", ledger_state.key().as_ref()],
        bump
    )]
    pub beneficiaries: Box<Account<'info, Beneficiaries>>,
}

#[event]
pub struct LedgerQuote {
    pub evm_key: [u8; 20],
    pub allocated: u64,
    pub vested: u64,
    pub released: u64,
    pub releasable: u64,
    pub available_funds: u64,
    pub start_ts: i64,
    pub duration_secs: i64,
}
