use crate::{ErrorCode, MAX_PERCENTAGE};

pub fn ceil_div(amount: u128, numerator: u128, denominator: u128) -> Option<u128> {
    amount
        .checked_mul(numerator)?
        .checked_add(denominator)?
        .checked_sub(1)?
        .checked_div(denominator)
}

/// `floor(amount * numerator / denominator)`, `None` on a zero denominator.
pub fn floor_div(amount: u128, numerator: u128, denominator: u128) -> Option<u128> {
    amount.checked_mul(numerator)?.checked_div(denominator)
}

pub fn get_trade_fee(amount: u128, trade_fee_rate: u64) -> Option<u128> {
    ceil_div(
        amount,
        u128::from(trade_fee_rate),
        u128::from(MAX_PERCENTAGE),
    )
}

/// Lowest acceptable output once `tolerance_rate` of slippage is allowed.
pub fn apply_slippage(amount: u64, tolerance_rate: u64) -> Result<u64, ErrorCode> {
    let keep_rate = MAX_PERCENTAGE
        .checked_sub(tolerance_rate)
        .ok_or(ErrorCode::MathUnderflow)?;
    let floor = floor_div(
        u128::from(amount),
        u128::from(keep_rate),
        u128::from(MAX_PERCENTAGE),
    )
    .ok_or(ErrorCode::MathOverflow)?;
    to_amount(floor)
}

/// Narrow an intermediate back to a token amount.
pub fn to_amount(value: u128) -> Result<u64, ErrorCode> {
    u64::try_from(value).map_err(|_| ErrorCode::MathOverflow)
}

pub fn swap_base_input_without_fees(
    source_amount: u128,
    swap_source_amount: u128,
    swap_destination_amount: u128,
) -> Option<u128> {
    // (x + delta_x) * (y - delta_y) = x * y
    // delta_y = (delta_x * y) / (x + delta_x)
    let numerator = source_amount.checked_mul(swap_destination_amount)?;
    let denominator = swap_source_amount.checked_add(source_amount)?;
    numerator.checked_div(denominator)
}
