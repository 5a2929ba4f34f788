use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::error::LedgerError;
use crate::state::{Beneficiaries, Donors, LedgerState};

pub fn initialize_ledger(
    ctx: Context<InitializeLedger>,
    start_ts: i64,
    duration_secs: i64,
) -> Result<()> {
    require!(start_ts > 0, LedgerError::InvalidTimestamp);
    require!(duration_secs > 0, LedgerError::InvalidConfig);

    let st = &mut ctx.accounts.ledger_state;
    st.admin = ctx.accounts.admin.key();
    st.mint = ctx.accounts.mint.key();
    st.start_ts = start_ts;
    st.duration_secs = duration_secs;
    st.total_allocated = 0;
    st.total_donated = 0;
    st.total_released = 0;

    ctx.accounts.beneficiaries.entries = Vec::new();
    ctx.accounts.donors.entries = Vec::new();

    emit!(LedgerInitialized {
        admin: st.admin,
        mint: st.mint,
        start_ts: st.start_ts,
        duration_secs: st.duration_secs,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeLedger<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + LedgerState::SIZE,
        seeds = [b"ledger_state"],
        bump
    )]
    pub ledger_state: Account<'info, LedgerState>,

    #[account(
        init,
        payer = admin,
        space = Beneficiaries::space(),
        seeds = [b"beneficiaries", ledger_state.key().as_ref()],
        bump
    )]
    pub beneficiaries: Box<Account<'info, Beneficiaries>>,

    #[account(
        init,
        payer = admin,
        space = Donors::space(),
        seeds = [b"donors", ledger_state.key().as_ref()],
        bump
    )]
    pub donors: Box<Account<'info, Donors>>,

    #[account(
        init,
        payer = admin,
        token::mint = mint,
        token::authority = ledger_state,
        seeds = [b"vault", ledger_state.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct LedgerInitialized {
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub start_ts: i64,
    pub duration_secs: i64,
}
