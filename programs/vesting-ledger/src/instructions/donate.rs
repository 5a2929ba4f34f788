use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::error::LedgerError;
use crate::state::{Donors, LedgerState};

pub fn donate(ctx: Context<Donate>, amount: u64) -> Result<()> {
    require!(amount > 0, LedgerError::InvalidConfig);

    let st = &mut ctx.accounts.ledger_state;
    require_keys_eq!(
        ctx.accounts.donor_token_account.mint,
        st.mint,
        LedgerError::InvalidTokenMint
    );
    require_keys_eq!(
        ctx.accounts.donor_token_account.owner,
        ctx.accounts.donor.key(),
        LedgerError::InvalidTokenAccount
    );

    // No upper bound and no schedule gating: over-funding stays reclaimable
    // as refund, and donations after the schedule end are accepted.
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.donor_token_account.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.donor.to_account_info(),
            },
        ),
        amount,
    )?;

    ctx.accounts.donors.credit(ctx.accounts.donor.key(), amount)?;
    st.total_donated = st
        .total_donated
        .checked_add(amount)
        .ok_or(LedgerError::MathOverflow)?;

    emit!(DonationReceived {
        donor: ctx.accounts.donor.key(),
        amount,
        total_donated: st.total_donated,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Donate<'info> {
    #[account(mut, seeds = [b"ledger_state"], bump)]
    pub ledger_state: Account<'info, LedgerState>,

    #[account(
        mut,
        seeds = [b"donors", ledger_state.key().as_ref()],
        bump
    )]
    pub donors: Box<Account<'info, Donors>>,

    #[account(
        mut,
        seeds = [b"vault", ledger_state.key().as_ref()],
        bump,
        constraint = vault.mint == ledger_state.mint @ LedgerError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub donor_token_account: Account<'info, TokenAccount>,

    pub donor: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct DonationReceived {
    pub donor: Pubkey,
    pub amount: u64,
    pub total_donated: u64,
}
