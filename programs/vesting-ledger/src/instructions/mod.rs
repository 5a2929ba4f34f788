pub mod donate;
pub mod emit_ledger_quote;
pub mod initialize_ledger;
pub mod refund_donation;
pub mod register_batch;
pub mod release;

pub use donate::*;
pub use emit_ledger_quote::*;
pub use initialize_ledger::*;
pub use refund_donation::*;
pub use register_batch::*;
pub use release::*;
