//! Program-wide constants.

/// Max beneficiary entries held in the beneficiaries PDA. The bound comes
/// from the one-transaction account init size limit; larger registration
/// lists are submitted in chunks by the caller, each chunk checked for
/// uniqueness on its own.
pub const MAX_BENEFICIARIES: usize = 128;

/// Max donor entries held in the donors PDA.
pub const MAX_DONORS: usize = 128;

/// Byte length of an EVM-style address.
pub const EVM_ADDRESS_LEN: usize = 20;
