use anchor_lang::prelude::*;

/// Custom error codes for the vesting ledger program.
#[error_code]
pub enum LedgerError {
    #[msg("Unauthorized caller")]
    Unauthorized,

    #[msg("Invalid cross-chain address: exactly one representation must be set")]
    InvalidAddressFormat,

    #[msg("Arrays length mismatch")]
    ArrayLengthMismatch,

    #[msg("Beneficiary already has allocation")]
    AlreadyAllocated,

    #[msg("Empty batch")]
    EmptyBatch,

    #[msg("Invalid allocation (must be > 0)")]
    InvalidAllocation,

    #[msg("Beneficiary list is full")]
    BeneficiaryListFull,

    #[msg("Donor list is full")]
    DonorListFull,

    #[msg("Beneficiary not found")]
    BeneficiaryNotFound,

    #[msg("Donor not found")]
    DonorNotFound,

    #[msg("Nothing to release")]
    NothingToRelease,

    #[msg("Refund exceeds the donor's refundable amount or the ledger's spare funds")]
    RefundExceedsAvailable,

    #[msg("Invalid configuration")]
    InvalidConfig,

    #[msg("Invalid timestamp")]
    InvalidTimestamp,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Insufficient vault balance")]
    InsufficientVaultBalance,

    #[msg("Math overflow")]
    MathOverflow,
}
