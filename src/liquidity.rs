//! Liquidity operations for the exchange
//!
//! Deposits keep the pool price ratio intact and withdrawals pay out a
//! proportional share of both reserves. Every division truncates, so any
//! rounding dust stays with the pool.

use crate::{
    state::{DepositProposal, ReserveSnapshot, WithdrawalProposal},
    utils::{floor_div, to_amount},
    ErrorCode,
};

/// Paired amount that must accompany `base_in` to keep the pool ratio.
///
/// An empty paired reserve means the pool is still waiting for its first
/// deposit. There is no ratio to preserve in that case and the call fails
/// with `DivisionByZero`; the depositor picks both amounts instead (see
/// [`propose_deposit`]).
pub fn required_paired_amount(base_in: u64, snapshot: &ReserveSnapshot) -> Result<u64, ErrorCode> {
    if base_in == 0 {
        return Err(ErrorCode::InvalidAmount);
    }
    if snapshot.paired_reserve == 0 || snapshot.base_reserve == 0 {
        return Err(ErrorCode::DivisionByZero);
    }

    let paired_amount = floor_div(
        base_in as u128,
        snapshot.paired_reserve as u128,
        snapshot.base_reserve as u128,
    )
    .ok_or(ErrorCode::DivisionByZero)?;

    to_amount(paired_amount)
}

/// Calculate the base and paired amounts returned for burning `lp_burned`
///
/// # Arguments
/// * `lp_burned` - Amount of LP tokens being burned, at most the total supply
/// * `snapshot` - Pool reserves and LP supply to redeem against
///
/// # Returns
/// A `WithdrawalProposal` with the floored proportional share of each reserve
pub fn shares_for_withdrawal(
    lp_burned: u64,
    snapshot: &ReserveSnapshot,
) -> Result<WithdrawalProposal, ErrorCode> {
    if snapshot.lp_total_supply == 0 {
        return Err(ErrorCode::DivisionByZero);
    }
    if lp_burned == 0 || lp_burned > snapshot.lp_total_supply {
        return Err(ErrorCode::InvalidAmount);
    }

    let total_supply = snapshot.lp_total_supply as u128;
    let base_out = floor_div(snapshot.base_reserve as u128, lp_burned as u128, total_supply)
        .ok_or(ErrorCode::DivisionByZero)?;
    let paired_out = floor_div(snapshot.paired_reserve as u128, lp_burned as u128, total_supply)
        .ok_or(ErrorCode::DivisionByZero)?;

    Ok(WithdrawalProposal {
        base_out: to_amount(base_out)?,
        paired_out: to_amount(paired_out)?,
        lp_burned,
    })
}

/// Calculate the amount of LP tokens minted for a deposit
///
/// # Arguments
/// * `base_in` - Amount of base asset being deposited
/// * `paired_in` - Amount of paired asset being deposited
/// * `snapshot` - Pool reserves and LP supply before the deposit
///
/// # Returns
/// The LP tokens to mint. The first deposit mints `base_in` one to one;
/// later deposits mint the smaller of the two proportional shares.
pub fn lp_tokens_for_deposit(
    base_in: u64,
    paired_in: u64,
    snapshot: &ReserveSnapshot,
) -> Result<u64, ErrorCode> {
    if base_in == 0 || paired_in == 0 {
        return Err(ErrorCode::InvalidAmount);
    }

    if snapshot.is_bootstrap() {
        // LP outstanding against an empty paired side would be diluted
        if snapshot.lp_total_supply != 0 {
            return Err(ErrorCode::InvalidInput);
        }
        // Initial liquidity provision
        return Ok(base_in);
    }

    if snapshot.base_reserve == 0 || snapshot.lp_total_supply == 0 {
        return Err(ErrorCode::DivisionByZero);
    }

    let total_supply = snapshot.lp_total_supply as u128;
    let base_lp = floor_div(total_supply, base_in as u128, snapshot.base_reserve as u128)
        .ok_or(ErrorCode::DivisionByZero)?;
    let paired_lp = floor_div(total_supply, paired_in as u128, snapshot.paired_reserve as u128)
        .ok_or(ErrorCode::DivisionByZero)?;

    // Return the minimum to maintain pool balance
    to_amount(base_lp.min(paired_lp))
}

/// Build a deposit the ledger can accept.
///
/// On an empty pool both amounts are taken as given. Otherwise only the
/// ratio-preserving paired amount is requested, and `paired_offered` must
/// cover it.
pub fn propose_deposit(
    base_in: u64,
    paired_offered: u64,
    snapshot: &ReserveSnapshot,
) -> Result<DepositProposal, ErrorCode> {
    if base_in == 0 {
        return Err(ErrorCode::InvalidAmount);
    }

    if snapshot.is_bootstrap() {
        if paired_offered == 0 {
            return Err(ErrorCode::InvalidAmount);
        }
        return Ok(DepositProposal {
            base_in,
            paired_in: paired_offered,
            lp_minted: lp_tokens_for_deposit(base_in, paired_offered, snapshot)?,
        });
    }

    let paired_in = required_paired_amount(base_in, snapshot)?;
    if paired_in == 0 {
        return Err(ErrorCode::LiquidityTooLow);
    }
    if paired_offered < paired_in {
        return Err(ErrorCode::TooFewTokensSupplied);
    }

    let lp_minted = lp_tokens_for_deposit(base_in, paired_in, snapshot)?;
    if lp_minted == 0 {
        return Err(ErrorCode::LiquidityTooLow);
    }

    Ok(DepositProposal {
        base_in,
        paired_in,
        lp_minted,
    })
}

pub fn propose_withdrawal(
    lp_burned: u64,
    snapshot: &ReserveSnapshot,
) -> Result<WithdrawalProposal, ErrorCode> {
    let proposal = shares_for_withdrawal(lp_burned, snapshot)?;
    if proposal.base_out == 0 && proposal.paired_out == 0 {
        return Err(ErrorCode::ZeroTokenOutput);
    }
    Ok(proposal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pool() -> ReserveSnapshot {
        ReserveSnapshot::new(1000, 2000, 1000)
    }

    #[test]
    fn test_required_paired_amount() {
        assert_eq!(required_paired_amount(100, &pool()).unwrap(), 200);
    }

    #[test]
    fn test_required_paired_amount_truncates() {
        let snapshot = ReserveSnapshot::new(3, 10, 3);
        // 1 * 10 / 3 = 3.33
        assert_eq!(required_paired_amount(1, &snapshot).unwrap(), 3);
    }

    #[test]
    fn test_required_paired_amount_bootstrap() {
        let snapshot = ReserveSnapshot::new(0, 0, 0);
        assert!(matches!(
            required_paired_amount(100, &snapshot),
            Err(ErrorCode::DivisionByZero)
        ));
        let base_only = ReserveSnapshot::new(1000, 0, 0);
        assert!(matches!(
            required_paired_amount(100, &base_only),
            Err(ErrorCode::DivisionByZero)
        ));
    }

    #[test]
    fn test_required_paired_amount_inconsistent_snapshot() {
        let snapshot = ReserveSnapshot::new(0, 2000, 1000);
        assert!(matches!(
            required_paired_amount(100, &snapshot),
            Err(ErrorCode::DivisionByZero)
        ));
    }

    #[test]
    fn test_required_paired_amount_zero_input() {
        assert!(matches!(
            required_paired_amount(0, &pool()),
            Err(ErrorCode::InvalidAmount)
        ));
    }

    #[test]
    fn test_shares_for_withdrawal() {
        let proposal = shares_for_withdrawal(100, &pool()).unwrap();
        assert_eq!(proposal.base_out, 100);
        assert_eq!(proposal.paired_out, 200);
        assert_eq!(proposal.lp_burned, 100);
    }

    #[test]
    fn test_shares_for_withdrawal_full_supply() {
        let proposal = shares_for_withdrawal(1000, &pool()).unwrap();
        assert_eq!((proposal.base_out, proposal.paired_out), (1000, 2000));
    }

    #[test]
    fn test_shares_for_withdrawal_zero_supply() {
        let snapshot = ReserveSnapshot::new(1000, 2000, 0);
        assert!(matches!(
            shares_for_withdrawal(100, &snapshot),
            Err(ErrorCode::DivisionByZero)
        ));
    }

    #[test]
    fn test_shares_for_withdrawal_bad_amounts() {
        assert!(matches!(
            shares_for_withdrawal(0, &pool()),
            Err(ErrorCode::InvalidAmount)
        ));
        assert!(matches!(
            shares_for_withdrawal(1001, &pool()),
            Err(ErrorCode::InvalidAmount)
        ));
    }

    #[test]
    fn test_lp_tokens_initial() {
        let minted = lp_tokens_for_deposit(1000, 2000, &ReserveSnapshot::default()).unwrap();
        assert_eq!(minted, 1000);
    }

    #[test]
    fn test_lp_tokens_inconsistent_bootstrap() {
        let snapshot = ReserveSnapshot::new(1000, 0, 1000);
        assert!(matches!(
            lp_tokens_for_deposit(100, 200, &snapshot),
            Err(ErrorCode::InvalidInput)
        ));
        assert!(matches!(
            propose_deposit(100, 200, &snapshot),
            Err(ErrorCode::InvalidInput)
        ));
    }

    #[test]
    fn test_lp_tokens_existing() {
        assert_eq!(lp_tokens_for_deposit(100, 200, &pool()).unwrap(), 100);
        // excess paired side does not mint extra
        assert_eq!(lp_tokens_for_deposit(100, 500, &pool()).unwrap(), 100);
        assert_eq!(lp_tokens_for_deposit(100, 100, &pool()).unwrap(), 50);
    }

    #[test]
    fn test_propose_deposit_bootstrap() {
        let proposal = propose_deposit(1000, 2000, &ReserveSnapshot::default()).unwrap();
        assert_eq!(
            proposal,
            DepositProposal {
                base_in: 1000,
                paired_in: 2000,
                lp_minted: 1000,
            }
        );
        assert!(matches!(
            propose_deposit(1000, 0, &ReserveSnapshot::default()),
            Err(ErrorCode::InvalidAmount)
        ));
    }

    #[test]
    fn test_propose_deposit_takes_required_amount() {
        let proposal = propose_deposit(100, 250, &pool()).unwrap();
        assert_eq!(proposal.paired_in, 200);
        assert_eq!(proposal.lp_minted, 100);
    }

    #[test]
    fn test_propose_deposit_too_few_tokens() {
        assert!(matches!(
            propose_deposit(100, 199, &pool()),
            Err(ErrorCode::TooFewTokensSupplied)
        ));
    }

    #[test]
    fn test_propose_deposit_dust() {
        // 1 base buys less than one paired unit
        let snapshot = ReserveSnapshot::new(2000, 1000, 1000);
        assert!(matches!(
            propose_deposit(1, 10, &snapshot),
            Err(ErrorCode::LiquidityTooLow)
        ));
    }

    #[test]
    fn test_propose_withdrawal_zero_output() {
        let snapshot = ReserveSnapshot::new(10, 10, 1_000);
        assert!(matches!(
            propose_withdrawal(1, &snapshot),
            Err(ErrorCode::ZeroTokenOutput)
        ));
        assert!(propose_withdrawal(100, &snapshot).is_ok());
    }

    proptest! {
        #[test]
        fn prop_required_paired_never_overestimates(
            base_in in 1u64..=u32::MAX as u64,
            base_reserve in 1u64..=u32::MAX as u64,
            paired_reserve in 1u64..=u32::MAX as u64,
        ) {
            let snapshot = ReserveSnapshot::new(base_reserve, paired_reserve, 1);
            let paired = required_paired_amount(base_in, &snapshot).unwrap();
            prop_assert!(
                paired as u128 * base_reserve as u128 <= base_in as u128 * paired_reserve as u128
            );
            // and never short by a whole unit
            prop_assert!(
                (paired as u128 + 1) * base_reserve as u128 > base_in as u128 * paired_reserve as u128
            );
        }

        #[test]
        fn prop_withdraw_redeposit_conjures_nothing(
            base_reserve in 1u64..1_000_000_000_000,
            paired_reserve in 1u64..1_000_000_000_000,
            lp_total_supply in 1u64..1_000_000_000_000,
            lp_seed in any::<u64>(),
        ) {
            let lp_burned = 1 + lp_seed % lp_total_supply;
            let snapshot = ReserveSnapshot::new(base_reserve, paired_reserve, lp_total_supply);
            let out = shares_for_withdrawal(lp_burned, &snapshot).unwrap();
            prop_assert!(out.base_out <= base_reserve);
            prop_assert!(out.paired_out <= paired_reserve);

            if out.base_out > 0 && out.paired_out > 0 {
                let minted = lp_tokens_for_deposit(out.base_out, out.paired_out, &snapshot).unwrap();
                prop_assert!(minted <= lp_burned);

                let after = ReserveSnapshot::new(
                    base_reserve - out.base_out,
                    paired_reserve - out.paired_out,
                    lp_total_supply - lp_burned,
                );
                if after.base_reserve > 0 && after.paired_reserve > 0 && after.lp_total_supply > 0 {
                    let minted = lp_tokens_for_deposit(out.base_out, out.paired_out, &after).unwrap();
                    prop_assert!(minted <= lp_burned);
                }
            }
        }
    }
}
