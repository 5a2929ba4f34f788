pub mod beneficiaries;
pub mod donors;
pub mod ledger_state;

pub use beneficiaries::*;
pub use donors::*;
pub use ledger_state::*;
