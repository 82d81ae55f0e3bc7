//! Fixed-point swap math.
//!
//! wXMR carries 12 decimals (piconero), USDC carries 6. All conversions go
//! through u128 intermediates scaled by 1e12; floating point never touches
//! an amount.

use anchor_lang::prelude::*;

use crate::errors::ErrorCode;

pub const PICONERO_PER_WXMR: u128 = 1_000_000_000_000;

/// wXMR received for `usdc_amount` at `buy_price` (USDC atomic units per
/// whole wXMR). Truncates toward zero.
pub fn wxmr_out_for_usdc(usdc_amount: u64, buy_price: u64) -> Result<u64> {
    require!(buy_price > 0, ErrorCode::InvalidPrice);
    let out = (usdc_amount as u128)
        .checked_mul(PICONERO_PER_WXMR)
        .ok_or(ErrorCode::Overflow)?
        / buy_price as u128;
    u64::try_from(out).map_err(|_| error!(ErrorCode::Overflow))
}

/// USDC received for `wxmr_amount` at `sell_price`. Truncates toward zero.
pub fn usdc_out_for_wxmr(wxmr_amount: u64, sell_price: u64) -> Result<u64> {
    let out = (wxmr_amount as u128)
        .checked_mul(sell_price as u128)
        .ok_or(ErrorCode::Overflow)?
        / PICONERO_PER_WXMR;
    u64::try_from(out).map_err(|_| error!(ErrorCode::Overflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    const USDC: u64 = 1_000_000;
    const WXMR: u64 = 1_000_000_000_000;

    #[test]
    fn buy_at_150_with_300_usdc_yields_exactly_2_wxmr() {
        let buy_price = 150 * USDC;
        let out = wxmr_out_for_usdc(300 * USDC, buy_price).unwrap();
        assert_eq!(out, 2 * WXMR);
    }

    #[test]
    fn sell_is_inverse_of_buy_minus_spread() {
        let buy_price = 150 * USDC;
        let sell_price = 148 * USDC;
        let usdc_in = 300 * USDC;

        let wxmr = wxmr_out_for_usdc(usdc_in, buy_price).unwrap();
        let usdc_back = usdc_out_for_wxmr(wxmr, sell_price).unwrap();

        assert!(usdc_back <= usdc_in);
        assert_eq!(usdc_back, 296 * USDC);
    }

    #[test]
    fn round_trip_at_flat_price_never_gains() {
        // With zero spread the only loss is integer truncation.
        for usdc_in in [1u64, 999, 123_456, 5 * USDC, 987_654_321] {
            let price = 163_250_000;
            let wxmr = wxmr_out_for_usdc(usdc_in, price).unwrap();
            let back = usdc_out_for_wxmr(wxmr, price).unwrap();
            assert!(back <= usdc_in, "gained on round trip: {back} > {usdc_in}");
        }
    }

    #[test]
    fn truncation_drops_sub_unit_remainders() {
        // 1 USDC atomic unit at a price above 1e6 rounds down to dust.
        let out = wxmr_out_for_usdc(1, 150 * USDC).unwrap();
        assert_eq!(out, 6_666);

        let usdc = usdc_out_for_wxmr(6_666, 150 * USDC).unwrap();
        assert_eq!(usdc, 0);
    }

    #[test]
    fn zero_buy_price_is_rejected() {
        assert!(wxmr_out_for_usdc(USDC, 0).is_err());
    }

    #[test]
    fn large_amounts_stay_in_range() {
        // 1 million USDC against a $10 price.
        let out = wxmr_out_for_usdc(1_000_000 * USDC, 10 * USDC).unwrap();
        assert_eq!(out, 100_000 * WXMR);
    }
}
