//! Swap operations for the exchange
//!
//! Pricing for single-asset-in, single-asset-out swaps. Output is floored so
//! the pool never pays out more than `x * y = k` allows.

use crate::{
    state::{PoolConfig, ReserveSnapshot, SwapQuote},
    utils::{apply_slippage, get_trade_fee, swap_base_input_without_fees, to_amount},
    ErrorCode,
};

/// Calculate the output amount for a given input amount under the
/// constant-product rule, with no trade fee
///
/// # Arguments
/// * `amount_in` - The amount of input tokens
/// * `input_is_base` - Whether the input is the base asset
/// * `snapshot` - Pool reserves to price against
///
/// # Returns
/// The output amount as u64. A zero input quotes zero without touching the
/// reserves.
pub fn quote(
    amount_in: u64,
    input_is_base: bool,
    snapshot: &ReserveSnapshot,
) -> Result<u64, ErrorCode> {
    quote_with_config(amount_in, input_is_base, snapshot, &PoolConfig::default())
        .map(|quote| quote.amount_out)
}

/// Same as [`quote`], withholding `config.trade_fee_rate` from the input
/// and attaching the slippage floor the ledger will enforce.
pub fn quote_with_config(
    amount_in: u64,
    input_is_base: bool,
    snapshot: &ReserveSnapshot,
    config: &PoolConfig,
) -> Result<SwapQuote, ErrorCode> {
    if amount_in == 0 {
        return Ok(SwapQuote::empty(input_is_base));
    }
    config.validate()?;

    if snapshot.base_reserve == 0 || snapshot.paired_reserve == 0 {
        return Err(ErrorCode::InsufficientReserves);
    }
    let (reserve_in, reserve_out) = snapshot.reserves_for(input_is_base);

    let trade_fee =
        get_trade_fee(amount_in as u128, config.trade_fee_rate).ok_or(ErrorCode::MathOverflow)?;
    let amount_in_post_fee = (amount_in as u128)
        .checked_sub(trade_fee)
        .ok_or(ErrorCode::MathUnderflow)?;
    if amount_in_post_fee == 0 {
        return Err(ErrorCode::InputAmountTooSmall);
    }

    let amount_out = swap_base_input_without_fees(
        amount_in_post_fee,
        reserve_in as u128,
        reserve_out as u128,
    )
    .ok_or(ErrorCode::MathOverflow)?;
    let amount_out = to_amount(amount_out)?;

    Ok(SwapQuote {
        amount_in,
        amount_out,
        input_is_base,
        trade_fee: to_amount(trade_fee)?,
        min_amount_out: apply_slippage(amount_out, config.slippage_tolerance_rate)?,
    })
}
