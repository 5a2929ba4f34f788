use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::error::LedgerError;
use crate::identity::{self, CrossAddress, DualIdentity};
use crate::state::{Beneficiaries, LedgerState};
use crate::utils::vesting;

pub fn release(ctx: Context<Release>, identity: CrossAddress) -> Result<()> {
    // Capture AccountInfo before taking mutable borrows.
    let ledger_state_ai = ctx.accounts.ledger_state.to_account_info();
    let ledger_state_bump = ctx.bumps.ledger_state;

    let st = &mut ctx.accounts.ledger_state;
    let identity = DualIdentity::try_from(identity)?;
    let key = identity.canonical_key();

    // Only the beneficiary itself may release; the signer's key must
    // resolve to the same ledger key under either representation.
    require!(
        identity::to_canonical_evm(&ctx.accounts.beneficiary.key()) == key,
        LedgerError::Unauthorized
    );

    require_keys_eq!(
        ctx.accounts.beneficiary_token_account.mint,
        st.mint,
        LedgerError::InvalidTokenMint
    );
    require_keys_eq!(
        ctx.accounts.beneficiary_token_account.owner,
        ctx.accounts.beneficiary.key(),
        LedgerError::InvalidTokenAccount
    );

    let entry = ctx
        .accounts
        .beneficiaries
        .find_mut(&key)
        .ok_or(LedgerError::BeneficiaryNotFound)?;

    let now = Clock::get()?.unix_timestamp;
    let available = st.available_funds()?;
    let amount = vesting::releasable_amount(
        entry.allocated,
        entry.released,
        available,
        now,
        st.start_ts,
        st.duration_secs,
    )?;
    // One error for all three causes: schedule not started, already fully
    // released, or underfunded.
    require!(amount > 0, LedgerError::NothingToRelease);

    require!(
        ctx.accounts.vault.amount >= amount,
        LedgerError::InsufficientVaultBalance
    );

    let signer_seeds: &[&[&[u8]]] = &[&[b"ledger_state", &[ledger_state_bump]]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.beneficiary_token_account.to_account_info(),
                authority: ledger_state_ai,
            },
            signer_seeds,
        ),
        amount,
    )?;

    entry.released = entry
        .released
        .checked_add(amount)
        .ok_or(LedgerError::MathOverflow)?;
    let released_total = entry.released;
    st.total_released = st
        .total_released
        .checked_add(amount)
        .ok_or(LedgerError::MathOverflow)?;

    emit!(TokensReleased {
        beneficiary: ctx.accounts.beneficiary.key(),
        evm_key: key,
        amount,
        released_total,
        available_funds: st.available_funds()?,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Release<'info> {
    #[account(mut, seeds = [b"ledger_state"], bump)]
    pub ledger_state: Account<'info, LedgerState>,

    #[account(
        mut,
        seeds = [b"beneficiaries", ledger_state.key().as_ref()],
        bump
    )]
    pub beneficiaries: Box<Account<'info, Beneficiaries>>,

    #[account(
        mut,
        seeds = [b"vault", ledger_state.key().as_ref()],
        bump,
        constraint = vault.mint == ledger_state.mint @ LedgerError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub beneficiary_token_account: Account<'info, TokenAccount>,

    pub beneficiary: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct TokensReleased {
    pub beneficiary: Pubkey,
    pub evm_key: [u8; 20],
    pub amount: u64,
    pub released_total: u64,
    pub available_funds: u64,
}
