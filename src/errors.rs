use anchor_lang::prelude::error_code;

#[error_code]
pub enum ErrorCode {
    #[msg("Invalid input")]
    InvalidInput,
    #[msg("Amount must be greater than zero")]
    InvalidAmount,
    #[msg("Division by zero, pool is empty or has no LP supply")]
    DivisionByZero,
    #[msg("Pool reserves are empty")]
    InsufficientReserves,
    #[msg("Proposal no longer matches pool reserves")]
    StaleProposal,
    #[msg("Invalid deposit, too few tokens")]
    TooFewTokensSupplied,
    #[msg("Liquidity too low")]
    LiquidityTooLow,
    #[msg("Liquidity tokens did not yield any pair tokens")]
    ZeroTokenOutput,
    #[msg("Input amount too small")]
    InputAmountTooSmall,
    #[msg("Output is zero")]
    OutputIsZero,
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Math underflow")]
    MathUnderflow,
}
