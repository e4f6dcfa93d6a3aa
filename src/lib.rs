//! Exchange Math Library
//!
//! Accounting core of a two-asset constant-product exchange: the paired
//! amount a deposit needs, the shares a withdrawal returns, and swap quotes.
//! Every function prices against an immutable `ReserveSnapshot`; only a
//! `Ledger` implementation mutates reserves.

pub mod constants;
pub mod errors;
pub mod ledger;
pub mod liquidity;
pub mod state;
pub mod swap;
pub mod utils;
// Re-export functions for convenience
pub use constants::MAX_PERCENTAGE;
pub use errors::ErrorCode;
pub use ledger::{Ledger, LedgerInstruction, MemoryLedger, Receipt};
pub use liquidity::{
    lp_tokens_for_deposit, propose_deposit, propose_withdrawal, required_paired_amount,
    shares_for_withdrawal,
};
pub use state::{DepositProposal, PoolConfig, ReserveSnapshot, SwapQuote, WithdrawalProposal};
pub use swap::{quote, quote_with_config};
pub use utils::*;
