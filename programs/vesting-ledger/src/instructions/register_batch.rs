use anchor_lang::prelude::*;

use crate::error::LedgerError;
use crate::identity::CrossAddress;
use crate::state::{Beneficiaries, LedgerState};

pub fn register_batch(
    ctx: Context<RegisterBatch>,
    identities: Vec<CrossAddress>,
    amounts: Vec<u64>,
) -> Result<()> {
    let st = &mut ctx.accounts.ledger_state;
    require_keys_eq!(
        ctx.accounts.admin.key(),
        st.admin,
        LedgerError::Unauthorized
    );

    // Validates the full batch before appending anything; the instruction
    // aborts atomically on the first violation.
    let sum = ctx
        .accounts
        .beneficiaries
        .register_batch(&identities, &amounts)?;

    st.total_allocated = st
        .total_allocated
        .checked_add(sum)
        .ok_or(LedgerError::MathOverflow)?;

    emit!(BeneficiariesRegistered {
        count_added: identities.len() as u16,
        new_total: ctx.accounts.beneficiaries.entries.len() as u16,
        total_allocated: st.total_allocated,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct RegisterBatch<'info> {
    #[account(mut, seeds = [b"ledger_state"], bump)]
    pub ledger_state: Account<'info, LedgerState>,

    #[account(
        mut,
        seeds = [b"beneficiaries", ledger_state.key().as_ref()],
        bump
    )]
    pub beneficiaries: Box<Account<'info, Beneficiaries>>,

    pub admin: Signer<'info>,
}

#[event]
pub struct BeneficiariesRegistered {
    pub count_added: u16,
    pub new_total: u16,
    pub total_allocated: u64,
}
