#![allow(unexpected_cfgs)]

pub mod constants;
pub mod error;
pub mod identity;
pub mod instructions;
pub mod state;
pub mod utils;

use anchor_lang::prelude::*;

pub use instructions::*;

use crate::identity::CrossAddress;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod vesting_ledger {
    use super::*;

    /// Creates the ledger singleton: schedule, allocation table, donor
    /// table and the token vault holding donated funds.
    pub fn initialize_ledger(
        ctx: Context<InitializeLedger>,
        start_ts: i64,
        duration_secs: i64,
    ) -> Result<()> {
        instructions::initialize_ledger::initialize_ledger(ctx, start_ts, duration_secs)
    }

    /// Admin-only batch registration of beneficiaries. All-or-nothing:
    /// any malformed identity, length mismatch or duplicate rejects the
    /// whole batch with no entries created.
    pub fn register_batch(
        ctx: Context<RegisterBatch>,
        identities: Vec<CrossAddress>,
        amounts: Vec<u64>,
    ) -> Result<()> {
        instructions::register_batch::register_batch(ctx, identities, amounts)
    }

    /// Funds the ledger. Open to any caller, unbounded; over-funding
    /// stays reclaimable via `refund_donation`.
    pub fn donate(ctx: Context<Donate>, amount: u64) -> Result<()> {
        instructions::donate::donate(ctx, amount)
    }

    /// Pays out the caller's vested-but-unreleased amount, capped by the
    /// funds the ledger actually holds.
    pub fn release(ctx: Context<Release>, identity: CrossAddress) -> Result<()> {
        instructions::release::release(ctx, identity)
    }

    /// Returns part of the caller's unreleased contribution, bounded by
    /// both the donor's entitlement and the ledger's spare funds.
    pub fn refund_donation(ctx: Context<RefundDonation>, amount: u64) -> Result<()> {
        instructions::refund_donation::refund_donation(ctx, amount)
    }

    /// Read-only quote of a beneficiary's vesting position.
    pub fn emit_ledger_quote(ctx: Context<EmitLedgerQuote>, identity: CrossAddress) -> Result<()> {
        instructions::emit_ledger_quote::emit_ledger_quote(ctx, identity)
    }
}
