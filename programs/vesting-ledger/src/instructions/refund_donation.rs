use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::error::LedgerError;
use crate::state::{Donors, LedgerState};

pub fn refund_donation(ctx: Context<RefundDonation>, amount: u64) -> Result<()> {
    require!(amount > 0, LedgerError::InvalidConfig);

    let ledger_state_ai = ctx.accounts.ledger_state.to_account_info();
    let ledger_state_bump = ctx.bumps.ledger_state;

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

    // The shared pool must keep covering everything already released:
    // a refund may never push total_donated below total_released.
    require!(
        amount <= st.available_funds()?,
        LedgerError::RefundExceedsAvailable
    );

    // Caps the refund to this donor's own unrefunded contribution.
    ctx.accounts
        .donors
        .debit_refund(&ctx.accounts.donor.key(), amount)?;

    let signer_seeds: &[&[&[u8]]] = &[&[b"ledger_state", &[ledger_state_bump]]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.donor_token_account.to_account_info(),
                authority: ledger_state_ai,
            },
            signer_seeds,
        ),
        amount,
    )?;

    st.total_donated = st
        .total_donated
        .checked_sub(amount)
        .ok_or(LedgerError::MathOverflow)?;

    let remaining = ctx
        .accounts
        .donors
        .find(&ctx.accounts.donor.key())
        .ok_or(LedgerError::DonorNotFound)?
        .outstanding()?;

    emit!(DonationRefunded {
        donor: ctx.accounts.donor.key(),
        amount,
        remaining_contribution: remaining,
        total_donated: st.total_donated,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct RefundDonation<'info> {
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
pub struct DonationRefunded {
    pub donor: Pubkey,
    pub amount: u64,
    pub remaining_contribution: u64,
    pub total_donated: u64,
}
