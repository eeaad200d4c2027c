//! Fixed-point arithmetic for pricing and share accounting.
//! Every `a * b / c` is widened to `U256` so reserves at 1e18 scale never
//! overflow `i128`. All divisions floor.

use soroban_sdk::{Env, U256};

use crate::errors::ExchangeError;

/// Swap fee taken on input: the pool keeps 1 of every 100 units traded in.
pub const FEE_NUMERATOR: i128 = 99;
pub const FEE_DENOMINATOR: i128 = 100;

fn widen(env: &Env, value: i128) -> U256 {
    U256::from_u128(env, value as u128)
}

fn narrow(value: &U256) -> Option<i128> {
    value.to_u128().and_then(|v| i128::try_from(v).ok())
}

/// Computes `a * b / denominator` with a 256-bit intermediate.
///
/// Returns `None` for negative operands, a non-positive denominator, or a
/// quotient that does not fit back into `i128`.
pub fn mul_div(env: &Env, a: i128, b: i128, denominator: i128) -> Option<i128> {
    if a < 0 || b < 0 || denominator <= 0 {
        return None;
    }
    let product = widen(env, a).mul(&widen(env, b));
    narrow(&product.div(&widen(env, denominator)))
}

/// Constant-product reserve product `a * b`, exact.
pub fn product(env: &Env, a: i128, b: i128) -> U256 {
    widen(env, a.max(0)).mul(&widen(env, b.max(0)))
}

/// `x * y / d` for `x`, `d` below 2^190, without ever forming the full
/// product: `y` is split into 64-bit halves and the division is carried
/// through the high half first.
fn mul_div_split(env: &Env, x: &U256, y: u128, d: &U256) -> U256 {
    let base = U256::from_u128(env, 1u128 << 64);
    let y_hi = U256::from_u128(env, y >> 64);
    let y_lo = U256::from_u128(env, y & u64::MAX as u128);

    let high = x.mul(&y_hi);
    let q_high = high.div(d);
    let r_high = high.sub(&q_high.mul(d));
    let tail = r_high.mul(&base).add(&x.mul(&y_lo)).div(d);
    q_high.mul(&base).add(&tail)
}

/// Output of a swap of `input_amount` against the given reserves, fee on input.
///
/// ```text
/// with_fee = input * 99
/// out      = with_fee * output_reserve / (input_reserve * 100 + with_fee)
/// ```
///
/// Every step runs in `U256`; only the quotient is narrowed. The denominator
/// always exceeds `with_fee`, so the output is strictly below `output_reserve`
/// and one side of the pool can never be emptied.
pub fn get_amount_of_tokens(
    env: &Env,
    input_amount: i128,
    input_reserve: i128,
    output_reserve: i128,
) -> Result<i128, ExchangeError> {
    if input_reserve <= 0 || output_reserve <= 0 {
        return Err(ExchangeError::InvalidReserves);
    }
    if input_amount < 0 {
        return Err(ExchangeError::InvalidAmount);
    }

    let input_amount_with_fee = widen(env, input_amount).mul(&widen(env, FEE_NUMERATOR));
    let denominator = widen(env, input_reserve)
        .mul(&widen(env, FEE_DENOMINATOR))
        .add(&input_amount_with_fee);

    let output = mul_div_split(env, &input_amount_with_fee, output_reserve as u128, &denominator);
    narrow(&output).ok_or(ExchangeError::Overflow)
}

/// Token a proportional add must bring alongside `native_amount`.
pub fn required_token_amount(
    env: &Env,
    native_amount: i128,
    reserve_native: i128,
    reserve_token: i128,
) -> Result<i128, ExchangeError> {
    if reserve_native <= 0 || reserve_token <= 0 {
        return Err(ExchangeError::InvalidReserves);
    }
    mul_div(env, native_amount, reserve_token, reserve_native).ok_or(ExchangeError::Overflow)
}

/// Shares minted for a proportional add of `native_amount`.
pub fn shares_for_deposit(
    env: &Env,
    native_amount: i128,
    share_supply: i128,
    reserve_native: i128,
) -> Result<i128, ExchangeError> {
    if reserve_native <= 0 {
        return Err(ExchangeError::InvalidReserves);
    }
    mul_div(env, share_supply, native_amount, reserve_native).ok_or(ExchangeError::Overflow)
}

/// Holder's floor pro-rata claim on `reserve` for `shares` of `share_supply`.
pub fn pro_rata(
    env: &Env,
    reserve: i128,
    shares: i128,
    share_supply: i128,
) -> Result<i128, ExchangeError> {
    if share_supply <= 0 {
        return Err(ExchangeError::EmptyPool);
    }
    mul_div(env, reserve, shares, share_supply).ok_or(ExchangeError::Overflow)
}
