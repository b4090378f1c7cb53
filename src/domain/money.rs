//! Monetary types for price and volume representation.

use rust_decimal::Decimal;

/// Price represented as a Decimal for precision.
///
/// Binary-market prices are probabilities and live in (0, 1).
pub type Price = Decimal;

/// Volume or liquidity represented as a Decimal for precision.
pub type Volume = Decimal;

/// What one winning share of a binary market pays out.
pub const PAYOUT: Price = Decimal::ONE;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn complementary_prices_sum_to_payout() {
        let yes: Price = dec!(0.35);
        let no: Price = dec!(0.65);

        assert_eq!(yes + no, PAYOUT);
    }
}
