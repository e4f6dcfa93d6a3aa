//! Ledger boundary
//!
//! The ledger owns reserves and LP supply. Proposals built by this crate are
//! advisory: the ledger re-prices each one against its current reserves at
//! submission time and rejects it with `StaleProposal` if another party has
//! moved the pool in the meantime.

use anchor_lang::prelude::msg;
use borsh::{BorshDeserialize, BorshSerialize};

use crate::{
    liquidity::{lp_tokens_for_deposit, required_paired_amount, shares_for_withdrawal},
    state::{DepositProposal, PoolConfig, ReserveSnapshot, SwapQuote, WithdrawalProposal},
    swap::quote_with_config,
    ErrorCode,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum LedgerInstruction {
    Deposit(DepositProposal),
    Withdraw(WithdrawalProposal),
    Swap(SwapQuote),
}

impl LedgerInstruction {
    pub fn pack(&self) -> Result<Vec<u8>, ErrorCode> {
        self.try_to_vec().map_err(|_| ErrorCode::InvalidInput)
    }

    fn name(&self) -> &'static str {
        match self {
            LedgerInstruction::Deposit(_) => "deposit",
            LedgerInstruction::Withdraw(_) => "withdraw",
            LedgerInstruction::Swap(_) => "swap",
        }
    }
}

/// What the ledger actually moved for an accepted instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Receipt {
    pub sequence: u64,
    /// Base units moved, in or out depending on the instruction
    pub base_amount: u64,
    pub paired_amount: u64,
    /// LP minted on deposit, burned on withdrawal, zero for swaps
    pub lp_amount: u64,
    /// Pool state after the instruction
    pub reserves: ReserveSnapshot,
}

pub trait Ledger {
    fn read_reserves(&self) -> Result<ReserveSnapshot, ErrorCode>;

    fn submit(&mut self, instruction: &LedgerInstruction) -> Result<Receipt, ErrorCode>;

    /// Decode a borsh-packed instruction and submit it.
    fn submit_packed(&mut self, data: &[u8]) -> Result<Receipt, ErrorCode> {
        let instruction =
            LedgerInstruction::try_from_slice(data).map_err(|_| ErrorCode::InvalidInput)?;
        self.submit(&instruction)
    }
}

/// Ledger kept entirely in memory.
///
/// Applies instructions with the same accounting the core uses for quoting,
/// so proposals can be exercised end to end without a live contract.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    config: PoolConfig,
    reserves: ReserveSnapshot,
    sequence: u64,
}

impl MemoryLedger {
    pub fn new(config: PoolConfig) -> Result<Self, ErrorCode> {
        Self::with_reserves(config, ReserveSnapshot::default())
    }

    pub fn with_reserves(config: PoolConfig, reserves: ReserveSnapshot) -> Result<Self, ErrorCode> {
        config.validate()?;
        Ok(Self {
            config,
            reserves,
            sequence: 0,
        })
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Number of instructions applied so far
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    fn next_sequence(&self) -> Result<u64, ErrorCode> {
        self.sequence.checked_add(1).ok_or(ErrorCode::MathOverflow)
    }

    fn apply_deposit(&self, proposal: &DepositProposal) -> Result<Receipt, ErrorCode> {
        let current = self.reserves;
        if proposal.base_in == 0 || proposal.paired_in == 0 {
            return Err(ErrorCode::InvalidAmount);
        }

        let (paired_taken, lp_minted) = if current.is_bootstrap() {
            let lp_minted = lp_tokens_for_deposit(proposal.base_in, proposal.paired_in, &current)?;
            (proposal.paired_in, lp_minted)
        } else {
            let required = required_paired_amount(proposal.base_in, &current)?;
            if required == 0 {
                return Err(ErrorCode::LiquidityTooLow);
            }
            if proposal.paired_in < required {
                return Err(ErrorCode::StaleProposal);
            }
            let lp_minted = lp_tokens_for_deposit(proposal.base_in, required, &current)?;
            (required, lp_minted)
        };

        if lp_minted == 0 {
            return Err(ErrorCode::LiquidityTooLow);
        }
        if lp_minted < proposal.lp_minted {
            return Err(ErrorCode::StaleProposal);
        }

        let reserves = ReserveSnapshot::new(
            current
                .base_reserve
                .checked_add(proposal.base_in)
                .ok_or(ErrorCode::MathOverflow)?,
            current
                .paired_reserve
                .checked_add(paired_taken)
                .ok_or(ErrorCode::MathOverflow)?,
            current
                .lp_total_supply
                .checked_add(lp_minted)
                .ok_or(ErrorCode::MathOverflow)?,
        );

        Ok(Receipt {
            sequence: self.next_sequence()?,
            base_amount: proposal.base_in,
            paired_amount: paired_taken,
            lp_amount: lp_minted,
            reserves,
        })
    }

    fn apply_withdrawal(&self, proposal: &WithdrawalProposal) -> Result<Receipt, ErrorCode> {
        let current = self.reserves;
        let fresh = shares_for_withdrawal(proposal.lp_burned, &current)?;
        if fresh.base_out == 0 && fresh.paired_out == 0 {
            return Err(ErrorCode::ZeroTokenOutput);
        }
        if fresh.base_out < proposal.base_out || fresh.paired_out < proposal.paired_out {
            return Err(ErrorCode::StaleProposal);
        }

        let reserves = ReserveSnapshot::new(
            current
                .base_reserve
                .checked_sub(fresh.base_out)
                .ok_or(ErrorCode::MathUnderflow)?,
            current
                .paired_reserve
                .checked_sub(fresh.paired_out)
                .ok_or(ErrorCode::MathUnderflow)?,
            current
                .lp_total_supply
                .checked_sub(fresh.lp_burned)
                .ok_or(ErrorCode::MathUnderflow)?,
        );

        Ok(Receipt {
            sequence: self.next_sequence()?,
            base_amount: fresh.base_out,
            paired_amount: fresh.paired_out,
            lp_amount: fresh.lp_burned,
            reserves,
        })
    }

    fn apply_swap(&self, quote: &SwapQuote) -> Result<Receipt, ErrorCode> {
        let current = self.reserves;
        if quote.amount_in == 0 {
            return Err(ErrorCode::InvalidAmount);
        }

        let fresh = quote_with_config(quote.amount_in, quote.input_is_base, &current, &self.config)?;
        if fresh.amount_out == 0 {
            return Err(ErrorCode::OutputIsZero);
        }
        if fresh.amount_out < quote.min_amount_out {
            return Err(ErrorCode::StaleProposal);
        }

        let (reserve_in, reserve_out) = current.reserves_for(quote.input_is_base);
        // trade fee stays in the pool
        let reserve_in = reserve_in
            .checked_add(fresh.amount_in)
            .ok_or(ErrorCode::MathOverflow)?;
        let reserve_out = reserve_out
            .checked_sub(fresh.amount_out)
            .ok_or(ErrorCode::MathUnderflow)?;

        let (reserves, base_amount, paired_amount) = if quote.input_is_base {
            (
                ReserveSnapshot::new(reserve_in, reserve_out, current.lp_total_supply),
                fresh.amount_in,
                fresh.amount_out,
            )
        } else {
            (
                ReserveSnapshot::new(reserve_out, reserve_in, current.lp_total_supply),
                fresh.amount_out,
                fresh.amount_in,
            )
        };

        Ok(Receipt {
            sequence: self.next_sequence()?,
            base_amount,
            paired_amount,
            lp_amount: 0,
            reserves,
        })
    }
}

impl Ledger for MemoryLedger {
    fn read_reserves(&self) -> Result<ReserveSnapshot, ErrorCode> {
        Ok(self.reserves)
    }

    fn submit(&mut self, instruction: &LedgerInstruction) -> Result<Receipt, ErrorCode> {
        let result = match instruction {
            LedgerInstruction::Deposit(proposal) => self.apply_deposit(proposal),
            LedgerInstruction::Withdraw(proposal) => self.apply_withdrawal(proposal),
            LedgerInstruction::Swap(quote) => self.apply_swap(quote),
        };

        match result {
            Ok(receipt) => {
                self.reserves = receipt.reserves;
                self.sequence = receipt.sequence;
                msg!(
                    "{} #{} applied: base={} paired={} lp={}",
                    instruction.name(),
                    receipt.sequence,
                    receipt.base_amount,
                    receipt.paired_amount,
                    receipt.lp_amount
                );
                Ok(receipt)
            }
            Err(err) => {
                msg!("{} rejected: {:?}", instruction.name(), err);
                Err(err)
            }
        }
    }
}
