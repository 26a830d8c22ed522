use std::cmp;

use cosmwasm_std::{StdError, StdResult, Uint128};

use crate::state::Auction;

/// Leading digits kept when a dropped price is quantized
pub const SIGNIFICANT_DIGITS: u32 = 2;

/// Number of base-10 digits of value, 0 having none
pub fn num_digits(value: Uint128) -> u32 {
    match value.u128().checked_ilog10() {
        Some(log) => log + 1,
        None => 0,
    }
}

/// Power of ten sitting `exponent_offset` places below the leading digit of
/// value, never below 1. Zero maps to zero.
pub fn quantum(value: Uint128, exponent_offset: u32) -> Uint128 {
    if value.is_zero() {
        return Uint128::zero();
    }
    let exponent = num_digits(value)
        .saturating_sub(1)
        .saturating_sub(exponent_offset);
    Uint128::new(10u128.pow(exponent))
}

/// Truncates value to its leading `significant_digits` digits
pub fn quantize(value: Uint128, significant_digits: u32) -> Uint128 {
    let unit = quantum(value, significant_digits.saturating_sub(1));
    if unit.is_zero() {
        return value;
    }
    (value / unit) * unit
}

/// Price asked at block time `now`. Before the start it is the start price,
/// from the end of the window on it is exactly the end price. In between the
/// price drops once per completed step, a step boundary still asking the
/// price of the step it closes. Dropped prices are quantized and never go
/// under the end price.
pub fn sale_price(auction: &Auction, now: u64) -> StdResult<Uint128> {
    if !auction.has_started(now) {
        return Ok(auction.start_price);
    }
    if auction.is_over(now) {
        return Ok(auction.end_price);
    }
    if auction.step_time == 0 {
        return Err(StdError::generic_err("auction has no step time"));
    }

    let elapsed = now - auction.start_timestamp;
    if elapsed == 0 {
        return Ok(auction.start_price);
    }
    let steps = (elapsed - 1) / auction.step_time;
    if steps == 0 {
        return Ok(auction.start_price);
    }
    let dropped = auction.step_price.checked_mul(Uint128::from(steps))?;
    let raw = auction.start_price.saturating_sub(dropped);
    Ok(cmp::max(quantize(raw, SIGNIFICANT_DIGITS), auction.end_price))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AssetInfo;
    use cosmwasm_std::Addr;
    use market_edition::{EditionTarget, Implementation};

    const START: u64 = 1_000;
    const ONE: u128 = 1_000_000_000_000_000_000;

    fn auction(start_price: u128, end_price: u128, drops: u32, duration: u64) -> Auction {
        Auction {
            id: 1,
            target: EditionTarget {
                contract_addr: Addr::unchecked("edition"),
                implementation: Implementation::Standard,
            },
            creator: Addr::unchecked("creator"),
            start_timestamp: START,
            duration,
            start_price: Uint128::new(start_price),
            end_price: Uint128::new(end_price),
            number_of_price_drops: drops,
            step_time: duration / drops as u64,
            step_price: Uint128::new((start_price - end_price) / drops as u128),
            curator: None,
            curator_royalty_bps: 0,
            approved: true,
            auction_currency: AssetInfo::NativeToken {
                denom: "orai".to_string(),
            },
            collector_give_away: false,
        }
    }

    #[test]
    fn quantum_of_values() {
        assert_eq!(quantum(Uint128::new(1), 0), Uint128::new(1));
        assert_eq!(quantum(Uint128::new(123), 0), Uint128::new(100));
        assert_eq!(quantum(Uint128::new(123), 1), Uint128::new(10));
        assert_eq!(quantum(Uint128::new(123), 2), Uint128::new(1));
        assert_eq!(quantum(Uint128::new(123), 3), Uint128::new(1));
        assert_eq!(quantum(Uint128::new(1), 2), Uint128::new(1));
        assert_eq!(quantum(Uint128::new(123_456_789), 0), Uint128::new(100_000_000));
        assert_eq!(quantum(Uint128::new(123_456_789), 9), Uint128::new(1));
        for offset in 0..5 {
            assert_eq!(quantum(Uint128::zero(), offset), Uint128::zero());
        }
        assert_eq!(quantum(Uint128::MAX, 0), Uint128::new(10u128.pow(38)));
    }

    #[test]
    fn quantize_keeps_leading_digits() {
        assert_eq!(quantize(Uint128::new(6_856), 2), Uint128::new(6_800));
        assert_eq!(quantize(Uint128::new(9), 2), Uint128::new(9));
        assert_eq!(quantize(Uint128::zero(), 2), Uint128::zero());
    }

    #[test]
    fn price_drops_each_step() {
        let auction = auction(ONE, ONE / 5, 4, 480);
        assert_eq!(auction.step_time, 120);
        assert_eq!(auction.step_price, Uint128::new(ONE / 5));

        assert_eq!(sale_price(&auction, 0).unwrap(), Uint128::new(ONE));
        assert_eq!(sale_price(&auction, START - 1).unwrap(), Uint128::new(ONE));
        assert_eq!(sale_price(&auction, START).unwrap(), Uint128::new(ONE));
        // at start + 120 * i the price is 1.0 - 0.2 * (i - 1)
        for i in 1..=3u128 {
            let expected = Uint128::new(ONE - ONE / 5 * (i - 1));
            let at = START + 120 * i as u64;
            assert_eq!(sale_price(&auction, at).unwrap(), expected);
            assert_eq!(sale_price(&auction, at - 119).unwrap(), expected);
            assert_eq!(
                sale_price(&auction, at + 1).unwrap(),
                Uint128::new(ONE - ONE / 5 * i)
            );
        }
        assert_eq!(sale_price(&auction, START + 479).unwrap(), Uint128::new(ONE * 2 / 5));
        assert_eq!(sale_price(&auction, START + 480).unwrap(), Uint128::new(ONE / 5));
        assert_eq!(sale_price(&auction, u64::MAX).unwrap(), Uint128::new(ONE / 5));
    }

    #[test]
    fn price_is_quantized() {
        // 10.23456 down to 0.1 in 3 drops over 6 minutes
        let auction = auction(10_234_560_000_000_000_000, ONE / 10, 3, 360);

        assert_eq!(
            sale_price(&auction, START).unwrap(),
            Uint128::new(10_234_560_000_000_000_000)
        );
        assert_eq!(
            sale_price(&auction, START + 120).unwrap(),
            Uint128::new(10_234_560_000_000_000_000)
        );
        assert_eq!(
            sale_price(&auction, START + 121).unwrap(),
            Uint128::new(6_800_000_000_000_000_000)
        );
        assert_eq!(
            sale_price(&auction, START + 240).unwrap(),
            Uint128::new(6_800_000_000_000_000_000)
        );
        assert_eq!(
            sale_price(&auction, START + 241).unwrap(),
            Uint128::new(3_400_000_000_000_000_000)
        );
        assert_eq!(
            sale_price(&auction, START + 359).unwrap(),
            Uint128::new(3_400_000_000_000_000_000)
        );
        assert_eq!(sale_price(&auction, START + 360).unwrap(), Uint128::new(ONE / 10));
    }

    #[test]
    fn price_never_increases_nor_goes_under_floor() {
        let auction = auction(7_777_777, 123_457, 7, 7 * 3_600 + 59);
        let mut last = sale_price(&auction, START).unwrap();
        for now in (START..START + auction.duration + 200).step_by(97) {
            let price = sale_price(&auction, now).unwrap();
            assert!(price <= last);
            assert!(price >= auction.end_price);
            last = price;
        }
        assert!(auction.step_price * Uint128::from(auction.number_of_price_drops)
            <= auction.start_price - auction.end_price);
        assert!(auction.step_time * auction.number_of_price_drops as u64 <= auction.duration);
    }

    #[test]
    fn free_drop_stays_free() {
        let auction = auction(0, 0, 2, 240);
        assert_eq!(sale_price(&auction, START + 130).unwrap(), Uint128::zero());
    }
}
