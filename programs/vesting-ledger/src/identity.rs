//! Cross-chain identity translation.
//!
//! Every ledger key is addressable from two chain representations: an
//! EVM-style 20-byte address and a native 32-byte public key. The
//! derivation from native key to EVM address is fixed and public (first
//! 20 bytes of the key), so off-chain tooling can precompute the same
//! ledger keys that the program derives at execution time.

use anchor_lang::prelude::*;
use solana_keccak_hasher as keccak;

use crate::constants::EVM_ADDRESS_LEN;
use crate::error::LedgerError;

/// Raw dual-representation address as carried in instruction data and
/// stored per beneficiary. Exactly one side must be non-zero; the other
/// stays at its type's zero value.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CrossAddress {
    pub evm: [u8; EVM_ADDRESS_LEN],
    pub native: Pubkey,
}

impl CrossAddress {
    pub fn from_evm(evm: [u8; EVM_ADDRESS_LEN]) -> Self {
        Self {
            evm,
            native: Pubkey::default(),
        }
    }

    pub fn from_native(native: Pubkey) -> Self {
        Self {
            evm: [0u8; EVM_ADDRESS_LEN],
            native,
        }
    }
}

/// Validated identity with exactly one active representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DualIdentity {
    Evm([u8; EVM_ADDRESS_LEN]),
    Native(Pubkey),
}

impl TryFrom<CrossAddress> for DualIdentity {
    type Error = LedgerError;

    fn try_from(raw: CrossAddress) -> std::result::Result<Self, LedgerError> {
        let evm_zero = raw.evm == [0u8; EVM_ADDRESS_LEN];
        let native_zero = raw.native == Pubkey::default();
        match (evm_zero, native_zero) {
            (false, true) => Ok(DualIdentity::Evm(raw.evm)),
            (true, false) => Ok(DualIdentity::Native(raw.native)),
            _ => Err(LedgerError::InvalidAddressFormat),
        }
    }
}

impl From<DualIdentity> for CrossAddress {
    fn from(identity: DualIdentity) -> Self {
        match identity {
            DualIdentity::Evm(evm) => CrossAddress::from_evm(evm),
            DualIdentity::Native(native) => CrossAddress::from_native(native),
        }
    }
}

impl DualIdentity {
    pub fn from_public_key(key: Pubkey) -> Self {
        DualIdentity::Native(key)
    }

    /// The ledger key. Both representations of the same identity collapse
    /// to the same 20-byte value, so a beneficiary registered under its
    /// derived EVM address resolves for a caller holding the native key.
    pub fn canonical_key(&self) -> [u8; EVM_ADDRESS_LEN] {
        match self {
            DualIdentity::Evm(evm) => *evm,
            DualIdentity::Native(key) => to_canonical_evm(key),
        }
    }
}

/// Derivation rule from native key to EVM-style address: the first 20
/// bytes of the 32-byte public key.
pub fn to_canonical_evm(key: &Pubkey) -> [u8; EVM_ADDRESS_LEN] {
    let mut out = [0u8; EVM_ADDRESS_LEN];
    out.copy_from_slice(&key.to_bytes()[..EVM_ADDRESS_LEN]);
    out
}

/// EIP-55 mixed-case hex encoding of a 20-byte address, for events and
/// off-chain tooling parity.
pub fn to_checksum_hex(addr: &[u8; EVM_ADDRESS_LEN]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut lower = [0u8; EVM_ADDRESS_LEN * 2];
    for (i, b) in addr.iter().enumerate() {
        lower[i * 2] = HEX[(b >> 4) as usize];
        lower[i * 2 + 1] = HEX[(b & 0x0f) as usize];
    }
    let hash = keccak::hash(&lower).to_bytes();

    let mut out = String::with_capacity(2 + lower.len());
    out.push_str("0x");
    for (i, &c) in lower.iter().enumerate() {
        let nibble = (hash[i / 2] >> (4 * (1 - i % 2))) & 0x0f;
        if c.is_ascii_alphabetic() && nibble > 7 {
            out.push(c.to_ascii_uppercase() as char);
        } else {
            out.push(c as char);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_and_derived_evm_share_one_ledger_key() {
        let key = Pubkey::new_unique();
        let native = DualIdentity::from_public_key(key);
        let evm = DualIdentity::Evm(to_canonical_evm(&key));
        assert_eq!(native.canonical_key(), evm.canonical_key());
    }

    #[test]
    fn round_trip_through_raw_form() {
        let key = Pubkey::new_unique();
        let identity = DualIdentity::from_public_key(key);
        let raw = CrossAddress::from(identity);
        assert_eq!(DualIdentity::try_from(raw).unwrap(), identity);

        let evm = DualIdentity::Evm(to_canonical_evm(&key));
        let raw = CrossAddress::from(evm);
        assert_eq!(DualIdentity::try_from(raw).unwrap(), evm);
    }

    #[test]
    fn rejects_empty_and_doubly_set_addresses() {
        let both_zero = CrossAddress::default();
        assert!(matches!(
            DualIdentity::try_from(both_zero),
            Err(LedgerError::InvalidAddressFormat)
        ));

        let both_set = CrossAddress {
            evm: [1u8; EVM_ADDRESS_LEN],
            native: Pubkey::new_unique(),
        };
        assert!(matches!(
            DualIdentity::try_from(both_set),
            Err(LedgerError::InvalidAddressFormat)
        ));
    }

    #[test]
    fn checksum_encoding_matches_eip55_vector() {
        let addr: [u8; EVM_ADDRESS_LEN] = [
            0x5a, 0xae, 0xb6, 0x05, 0x3f, 0x3e, 0x94, 0xc9, 0xb9, 0xa0, 0x9f, 0x33, 0x66, 0x94,
            0x35, 0xe7, 0xef, 0x1b, 0xea, 0xed,
        ];
        assert_eq!(
            to_checksum_hex(&addr),
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        );
    }
}
