use anchor_lang::prelude::*;

use crate::constants::MAX_DONORS;
use crate::error::LedgerError;

/// Cumulative contribution record for one donor wallet. `refunded` never
/// exceeds `contributed`; both only grow.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DonorEntry {
    pub wallet: Pubkey,
    pub contributed: u64,
    pub refunded: u64,
}

impl DonorEntry {
    pub const SIZE: usize =
        32 + // wallet
        8 +  // contributed
        8;   // refunded

    /// Contribution not yet reclaimed by this donor.
    pub fn outstanding(&self) -> std::result::Result<u64, LedgerError> {
        self.contributed
            .checked_sub(self.refunded)
            .ok_or(LedgerError::MathOverflow)
    }
}

/// PDA holding the append-only donor table. An entry is created on a
/// donor's first donation and never deleted.
#[account]
pub struct Donors {
    pub entries: Vec<DonorEntry>,
}

impl Donors {
    pub const fn space() -> usize {
        8 + 4 + MAX_DONORS * DonorEntry::SIZE
    }

    pub fn find(&self, wallet: &Pubkey) -> Option<&DonorEntry> {
        self.entries.iter().find(|e| e.wallet == *wallet)
    }

    /// Credits a donation, creating the entry on the donor's first call.
    pub fn credit(&mut self, wallet: Pubkey, amount: u64) -> std::result::Result<(), LedgerError> {
        if let Some(e) = self.entries.iter_mut().find(|e| e.wallet == wallet) {
            e.contributed = e
                .contributed
                .checked_add(amount)
                .ok_or(LedgerError::MathOverflow)?;
            return Ok(());
        }
        if self.entries.len() >= MAX_DONORS {
            return Err(LedgerError::DonorListFull);
        }
        self.entries.push(DonorEntry {
            wallet,
            contributed: amount,
            refunded: 0,
        });
        Ok(())
    }

    /// Debits a refund against the donor's unrefunded contribution.
    pub fn debit_refund(
        &mut self,
        wallet: &Pubkey,
        amount: u64,
    ) -> std::result::Result<(), LedgerError> {
        let e = self
            .entries
            .iter_mut()
            .find(|e| e.wallet == *wallet)
            .ok_or(LedgerError::DonorNotFound)?;
        let outstanding = e
            .contributed
            .checked_sub(e.refunded)
            .ok_or(LedgerError::MathOverflow)?;
        if amount > outstanding {
            return Err(LedgerError::RefundExceedsAvailable);
        }
        e.refunded = e
            .refunded
            .checked_add(amount)
            .ok_or(LedgerError::MathOverflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> Donors {
        Donors {
            entries: Vec::new(),
        }
    }

    #[test]
    fn first_donation_creates_entry_and_later_ones_accumulate() {
        let mut table = empty();
        let donor = Pubkey::new_unique();

        table.credit(donor, 10).unwrap();
        table.credit(donor, 5).unwrap();
        assert_eq!(table.entries.len(), 1);

        let e = table.find(&donor).unwrap();
        assert_eq!(e.contributed, 15);
        assert_eq!(e.refunded, 0);
        assert_eq!(e.outstanding().unwrap(), 15);
    }

    #[test]
    fn refund_capped_to_unrefunded_contribution() {
        let mut table = empty();
        let donor = Pubkey::new_unique();
        table.credit(donor, 10).unwrap();
        table.debit_refund(&donor, 3).unwrap();

        // contributed 10, refunded 3: requesting 8 must fail.
        let res = table.debit_refund(&donor, 8);
        assert!(matches!(res, Err(LedgerError::RefundExceedsAvailable)));
        assert_eq!(table.find(&donor).unwrap().refunded, 3);

        table.debit_refund(&donor, 7).unwrap();
        assert_eq!(table.find(&donor).unwrap().outstanding().unwrap(), 0);
    }

    #[test]
    fn unknown_donor_cannot_refund() {
        let mut table = empty();
        let res = table.debit_refund(&Pubkey::new_unique(), 1);
        assert!(matches!(res, Err(LedgerError::DonorNotFound)));
    }
}
