//! Payout and yield arithmetic.
//!
//! All products are formed in 256 bits. For a plan over every holder of the
//! supply, `paid_out ≤ pool ≤ paid_out + (recipient_count − 1)`.

use super::record::{Payout, PayoutPlan};
use crate::error::{DistributionError, DistributionResult};
use shared_types::{
    mul_div_floor, u256_to_u128, Address, Amount, BASIS_POINTS, DAYS_PER_YEAR, SECONDS_PER_DAY,
    U256,
};

/// `10^exp` in 256 bits, `None` past the type's range.
pub fn pow10(exp: u8) -> Option<U256> {
    U256::from(10u8).checked_pow(U256::from(exp))
}

/// Split `pool` across `balances` pro rata to `total_supply`.
///
/// `share = floor(pool × balance / total_supply)`, in input order.
pub fn plan_payouts(
    pool: Amount,
    total_supply: Amount,
    balances: &[(Address, Amount)],
    unit_scale_decimals: u8,
) -> DistributionResult<PayoutPlan> {
    if total_supply == 0 {
        return Err(DistributionError::ZeroTotalSupply);
    }

    let mut payouts = Vec::with_capacity(balances.len());
    let mut paid_out: Amount = 0;
    for (holder, balance) in balances {
        let amount = mul_div_floor(pool, *balance, total_supply)
            .ok_or(DistributionError::ArithmeticOverflow)?;
        paid_out = paid_out
            .checked_add(amount)
            .ok_or(DistributionError::ArithmeticOverflow)?;
        payouts.push(Payout {
            holder: *holder,
            balance: *balance,
            amount,
        });
    }
    if paid_out > pool {
        return Err(DistributionError::InconsistentBalances { paid_out, pool });
    }

    Ok(PayoutPlan {
        pool,
        total_supply,
        per_unit_amount: per_unit_amount(pool, total_supply, unit_scale_decimals),
        payouts,
        paid_out,
    })
}

/// `floor(pool × 10^scale / total_supply)`, saturating at `u128::MAX`.
///
/// Informational only; it never blocks a payout. Returns 0 for a zero supply.
pub fn per_unit_amount(pool: Amount, total_supply: Amount, unit_scale_decimals: u8) -> Amount {
    if total_supply == 0 {
        return 0;
    }
    pow10(unit_scale_decimals)
        .and_then(|scale| U256::from(pool).checked_mul(scale))
        .map(|scaled| scaled / U256::from(total_supply))
        .and_then(u256_to_u128)
        .unwrap_or(u128::MAX)
}

/// Annualised yield in basis points.
///
/// `floor(total_scaled × 365 × 10000 / (valuation × days))` where
/// `total_scaled` is `total` converted to valuation decimals and `days` is
/// whole days elapsed. Returns 0 for zero days, zero total or zero
/// valuation; saturates at `u128::MAX`.
pub fn annualized_yield_bps(
    total: Amount,
    valuation: Amount,
    payment_decimals: u8,
    valuation_decimals: u8,
    elapsed_secs: u64,
) -> u128 {
    let days = elapsed_secs / SECONDS_PER_DAY;
    if days == 0 || total == 0 || valuation == 0 {
        return 0;
    }

    let total_scaled = if valuation_decimals >= payment_decimals {
        pow10(valuation_decimals - payment_decimals)
            .and_then(|factor| U256::from(total).checked_mul(factor))
    } else {
        Some(match pow10(payment_decimals - valuation_decimals) {
            Some(divisor) => U256::from(total) / divisor,
            None => U256::zero(),
        })
    };

    let numerator = total_scaled
        .and_then(|t| t.checked_mul(U256::from(DAYS_PER_YEAR)))
        .and_then(|t| t.checked_mul(U256::from(BASIS_POINTS)));
    let Some(numerator) = numerator else {
        return u128::MAX;
    };
    let denominator = U256::from(valuation) * U256::from(days);

    u256_to_u128(numerator / denominator).unwrap_or(u128::MAX)
}
