use borsh::{BorshDeserialize, BorshSerialize};

use crate::{ErrorCode, MAX_PERCENTAGE};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolConfig {
    pub trade_fee_rate: u64,          // 10^6 = 100%
    pub slippage_tolerance_rate: u64, // 10^6 = 100%
}

impl PoolConfig {
    pub fn new(trade_fee_rate: u64, slippage_tolerance_rate: u64) -> Result<Self, ErrorCode> {
        let config = Self {
            trade_fee_rate,
            slippage_tolerance_rate,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ErrorCode> {
        if self.trade_fee_rate >= MAX_PERCENTAGE || self.slippage_tolerance_rate >= MAX_PERCENTAGE {
            return Err(ErrorCode::InvalidInput);
        }
        Ok(())
    }
}

/// Point-in-time read of the pool balances and LP supply.
///
/// Captured from the ledger right before a computation and never refreshed
/// during it. Everything in this crate prices against one of these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ReserveSnapshot {
    pub base_reserve: u64,
    pub paired_reserve: u64,
    pub lp_total_supply: u64,
}

impl ReserveSnapshot {
    pub fn new(base_reserve: u64, paired_reserve: u64, lp_total_supply: u64) -> Self {
        Self {
            base_reserve,
            paired_reserve,
            lp_total_supply,
        }
    }

    /// No paired liquidity yet, so the first depositor sets the price.
    pub fn is_bootstrap(&self) -> bool {
        self.paired_reserve == 0
    }

    /// Returns `(reserve_in, reserve_out)` for a swap in the given direction.
    pub fn reserves_for(&self, input_is_base: bool) -> (u64, u64) {
        if input_is_base {
            (self.base_reserve, self.paired_reserve)
        } else {
            (self.paired_reserve, self.base_reserve)
        }
    }

    pub fn constant_product(&self) -> u128 {
        self.base_reserve as u128 * self.paired_reserve as u128
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct DepositProposal {
    pub base_in: u64,
    pub paired_in: u64,
    /// LP expected at quote time; the ledger treats a lower mint as stale
    pub lp_minted: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct WithdrawalProposal {
    pub base_out: u64,
    pub paired_out: u64,
    pub lp_burned: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SwapQuote {
    /// Amount supplied by the trader, before trade fees
    pub amount_in: u64,
    pub amount_out: u64,
    pub input_is_base: bool,

    pub trade_fee: u64,
    pub min_amount_out: u64,
}

impl SwapQuote {
    pub(crate) fn empty(input_is_base: bool) -> Self {
        Self {
            amount_in: 0,
            amount_out: 0,
            input_is_base,
            trade_fee: 0,
            min_amount_out: 0,
        }
    }
}
