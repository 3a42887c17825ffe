//! USD valuation of contributions against an external price feed.
//!
//! Prices and USD values are fixed point with [`PRECISION_DECIMALS`] decimals.

use crate::errors::FundMeError;
use price_feed_interface::PriceFeedClient;
use soroban_sdk::{Address, Env};

pub const PRECISION_DECIMALS: u32 = 18;

/// Latest feed answer, normalized to [`PRECISION_DECIMALS`].
pub fn get_price(env: &Env, price_feed: &Address) -> Result<i128, FundMeError> {
    let feed = PriceFeedClient::new(env, price_feed);
    let answer = feed.latest_round_data().answer;
    if answer <= 0 {
        return Err(FundMeError::InvalidPrice);
    }
    rescale(answer, feed.decimals(), PRECISION_DECIMALS)
}

/// USD value of `amount`, given in units with `amount_decimals` decimals.
///
/// Non-positive amounts are worth nothing.
pub fn get_conversion_rate(
    env: &Env,
    price_feed: &Address,
    amount: i128,
    amount_decimals: u32,
) -> Result<i128, FundMeError> {
    if amount <= 0 {
        return Ok(0);
    }
    let price = get_price(env, price_feed)?;
    let amount = rescale(amount, amount_decimals, PRECISION_DECIMALS)?;
    mul_div_floor(amount, price, pow10(PRECISION_DECIMALS)?)
}

pub(crate) fn pow10(exp: u32) -> Result<i128, FundMeError> {
    10i128
        .checked_pow(exp)
        .ok_or(FundMeError::ArithmeticOverflow)
}

/// Moves `value` from `from` decimals to `to` decimals, truncating when
/// precision is dropped.
pub(crate) fn rescale(value: i128, from: u32, to: u32) -> Result<i128, FundMeError> {
    if from <= to {
        value
            .checked_mul(pow10(to - from)?)
            .ok_or(FundMeError::ArithmeticOverflow)
    } else {
        Ok(value / pow10(from - to)?)
    }
}

/// `floor(a * b / d)` for non-negative operands.
///
/// The full product is never formed, so results that fit in `i128` are
/// exact even when `a * b` alone would not.
pub(crate) fn mul_div_floor(a: i128, b: i128, d: i128) -> Result<i128, FundMeError> {
    // a = q*d + r, b = s*d + t  =>  a*b/d = q*b + r*s + r*t/d
    let (q, r) = (a / d, a % d);
    let (s, t) = (b / d, b % d);
    let rt = r
        .checked_mul(t)
        .ok_or(FundMeError::ArithmeticOverflow)?;
    q.checked_mul(b)
        .and_then(|qb| qb.checked_add(r.checked_mul(s)?))
        .and_then(|sum| sum.checked_add(rt / d))
        .ok_or(FundMeError::ArithmeticOverflow)
}
