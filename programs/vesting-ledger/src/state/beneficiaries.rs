use anchor_lang::prelude::*;

use crate::constants::{EVM_ADDRESS_LEN, MAX_BENEFICIARIES};
use crate::error::LedgerError;
use crate::identity::{self, CrossAddress, DualIdentity};

/// One allocation record. `allocated` is write-once; `released` only grows
/// and never exceeds `allocated`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeneficiaryEntry {
    pub identity: CrossAddress,
    pub allocated: u64,
    pub released: u64,
}

impl BeneficiaryEntry {
    pub const SIZE: usize =
        EVM_ADDRESS_LEN + 32 + // identity
        8 +                    // allocated
        8;                     // released

    /// Ledger key of the stored identity. Entries are validated at
    /// registration, so exactly one representation is set.
    pub fn canonical_key(&self) -> [u8; EVM_ADDRESS_LEN] {
        if self.identity.evm != [0u8; EVM_ADDRESS_LEN] {
            self.identity.evm
        } else {
            identity::to_canonical_evm(&self.identity.native)
        }
    }
}

/// PDA holding the append-only allocation table. Entries are never
/// deleted; only `released` is mutated after creation.
#[account]
pub struct Beneficiaries {
    pub entries: Vec<BeneficiaryEntry>,
}

impl Beneficiaries {
    pub const fn space() -> usize {
        8 + 4 + MAX_BENEFICIARIES * BeneficiaryEntry::SIZE
    }

    pub fn find(&self, key: &[u8; EVM_ADDRESS_LEN]) -> Option<&BeneficiaryEntry> {
        self.entries.iter().find(|e| e.canonical_key() == *key)
    }

    pub fn find_mut(&mut self, key: &[u8; EVM_ADDRESS_LEN]) -> Option<&mut BeneficiaryEntry> {
        self.entries.iter_mut().find(|e| e.canonical_key() == *key)
    }

    /// Registers the whole batch or nothing. Validation runs over the full
    /// input before any entry is appended, so a rejected batch leaves the
    /// table untouched. Returns the sum of allocations added.
    pub fn register_batch(
        &mut self,
        identities: &[CrossAddress],
        amounts: &[u64],
    ) -> std::result::Result<u64, LedgerError> {
        if identities.len() != amounts.len() {
            return Err(LedgerError::ArrayLengthMismatch);
        }
        if identities.is_empty() {
            return Err(LedgerError::EmptyBatch);
        }
        if self.entries.len() + identities.len() > MAX_BENEFICIARIES {
            return Err(LedgerError::BeneficiaryListFull);
        }

        let mut sum: u64 = 0;
        let mut batch_keys: Vec<[u8; EVM_ADDRESS_LEN]> = Vec::with_capacity(identities.len());
        for (raw, &amount) in identities.iter().zip(amounts) {
            let identity = DualIdentity::try_from(*raw)?;
            if amount == 0 {
                return Err(LedgerError::InvalidAllocation);
            }
            let key = identity.canonical_key();
            if self.find(&key).is_some() || batch_keys.contains(&key) {
                return Err(LedgerError::AlreadyAllocated);
            }
            batch_keys.push(key);
            sum = sum.checked_add(amount).ok_or(LedgerError::MathOverflow)?;
        }

        for (raw, &amount) in identities.iter().zip(amounts) {
            self.entries.push(BeneficiaryEntry {
                identity: *raw,
                allocated: amount,
                released: 0,
            });
        }
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::to_canonical_evm;

    fn empty() -> Beneficiaries {
        Beneficiaries {
            entries: Vec::new(),
        }
    }

    #[test]
    fn registers_batch_and_sums_allocations() {
        let mut table = empty();
        let a = CrossAddress::from_native(Pubkey::new_unique());
        let b = CrossAddress::from_native(Pubkey::new_unique());

        let sum = table.register_batch(&[a, b], &[10, 15]).unwrap();
        assert_eq!(sum, 25);
        assert_eq!(table.entries.len(), 2);
        assert_eq!(table.entries[0].allocated, 10);
        assert_eq!(table.entries[0].released, 0);
    }

    #[test]
    fn length_mismatch_rejects_whole_batch() {
        let mut table = empty();
        let a = CrossAddress::from_native(Pubkey::new_unique());
        let b = CrossAddress::from_native(Pubkey::new_unique());

        let res = table.register_batch(&[a, b], &[10]);
        assert!(matches!(res, Err(LedgerError::ArrayLengthMismatch)));
        assert!(table.entries.is_empty());
    }

    #[test]
    fn rejects_already_allocated_beneficiary() {
        let mut table = empty();
        let a = CrossAddress::from_native(Pubkey::new_unique());
        table.register_batch(&[a], &[10]).unwrap();

        let res = table.register_batch(&[a], &[5]);
        assert!(matches!(res, Err(LedgerError::AlreadyAllocated)));
        assert_eq!(table.entries.len(), 1);
    }

    #[test]
    fn rejects_duplicate_within_batch_without_partial_apply() {
        let mut table = empty();
        let key = Pubkey::new_unique();
        let native = CrossAddress::from_native(key);
        // Same identity under its derived EVM representation.
        let evm = CrossAddress::from_evm(to_canonical_evm(&key));

        let res = table.register_batch(&[native, evm], &[10, 10]);
        assert!(matches!(res, Err(LedgerError::AlreadyAllocated)));
        assert!(table.entries.is_empty());
    }

    #[test]
    fn registered_evm_identity_resolves_from_native_key() {
        let mut table = empty();
        let key = Pubkey::new_unique();
        let evm = CrossAddress::from_evm(to_canonical_evm(&key));
        table.register_batch(&[evm], &[10]).unwrap();

        let from_native = DualIdentity::from_public_key(key).canonical_key();
        let entry = table.find(&from_native).unwrap();
        assert_eq!(entry.allocated, 10);
    }

    #[test]
    fn rejects_zero_allocation_and_malformed_identity() {
        let mut table = empty();
        let a = CrossAddress::from_native(Pubkey::new_unique());
        assert!(matches!(
            table.register_batch(&[a], &[0]),
            Err(LedgerError::InvalidAllocation)
        ));
        assert!(matches!(
            table.register_batch(&[CrossAddress::default()], &[10]),
            Err(LedgerError::InvalidAddressFormat)
        ));
        assert!(matches!(
            table.register_batch(&[], &[]),
            Err(LedgerError::EmptyBatch)
        ));
        assert!(table.entries.is_empty());
    }
}
