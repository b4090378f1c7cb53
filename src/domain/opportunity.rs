//! Cross-platform arbitrage opportunity.
//!
//! An [`ArbitrageOpportunity`] is a matched pair plus the complementary
//! positions that together cost less than the guaranteed payout.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::listing::{Listing, Outcome};
use super::matching::MatchedPair;
use super::money::{Price, Volume, PAYOUT};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Which complementary positions to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Buy YES on platform A and NO on platform B.
    YesANoB,
    /// Buy NO on platform A and YES on platform B.
    NoAYesB,
}

impl Strategy {
    /// Both strategies, in tie-break order.
    pub const ALL: [Strategy; 2] = [Strategy::YesANoB, Strategy::NoAYesB];

    /// Side bought on platform A and side bought on platform B.
    #[must_use]
    pub const fn legs(self) -> (Outcome, Outcome) {
        match self {
            Strategy::YesANoB => (Outcome::Yes, Outcome::No),
            Strategy::NoAYesB => (Outcome::No, Outcome::Yes),
        }
    }

    /// Cost of holding both legs on the given listings.
    #[must_use]
    pub fn cost(self, a: &Listing, b: &Listing) -> Price {
        let (leg_a, leg_b) = self.legs();
        a.price(leg_a) + b.price(leg_b)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::YesANoB => f.write_str("yes_a_no_b"),
            Strategy::NoAYesB => f.write_str("no_a_yes_b"),
        }
    }
}

/// Human-readable trade instructions for an opportunity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyDescription {
    pub action_a: String,
    pub action_b: String,
    pub explanation: &'static str,
}

/// A priced, gated arbitrage between two matched listings.
///
/// Constructed by the arbitrage calculator; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ArbitrageOpportunity {
    pair: MatchedPair,
    strategy: Strategy,
    price_a: Price,
    price_b: Price,
    total_cost: Price,
    profit: Price,
    profit_pct: Decimal,
    return_on_cost_pct: Decimal,
    min_liquidity: Volume,
    detected_at: DateTime<Utc>,
}

impl ArbitrageOpportunity {
    /// Price the given strategy on `pair`, deriving cost, profit and percentages.
    ///
    /// No gating happens here.
    #[must_use]
    pub fn price(pair: MatchedPair, strategy: Strategy, detected_at: DateTime<Utc>) -> Self {
        let (leg_a, leg_b) = strategy.legs();
        let price_a = pair.a().price(leg_a);
        let price_b = pair.b().price(leg_b);
        let total_cost = price_a + price_b;
        let profit = PAYOUT - total_cost;
        let profit_pct = profit * HUNDRED;
        let return_on_cost_pct = if total_cost > Decimal::ZERO {
            (profit / total_cost * HUNDRED).round_dp(4)
        } else {
            Decimal::ZERO
        };
        let min_liquidity = pair.a().liquidity().min(pair.b().liquidity());

        Self {
            pair,
            strategy,
            price_a,
            price_b,
            total_cost,
            profit,
            profit_pct,
            return_on_cost_pct,
            min_liquidity,
            detected_at,
        }
    }

    #[must_use]
    pub const fn pair(&self) -> &MatchedPair {
        &self.pair
    }

    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Price paid for the platform A leg.
    #[must_use]
    pub const fn price_a(&self) -> Price {
        self.price_a
    }

    /// Price paid for the platform B leg.
    #[must_use]
    pub const fn price_b(&self) -> Price {
        self.price_b
    }

    #[must_use]
    pub const fn total_cost(&self) -> Price {
        self.total_cost
    }

    /// Always 1.0 for a binary market.
    #[must_use]
    pub const fn payout(&self) -> Price {
        PAYOUT
    }

    #[must_use]
    pub const fn profit(&self) -> Price {
        self.profit
    }

    /// Profit as a percentage of the 1.0 payout.
    #[must_use]
    pub const fn profit_pct(&self) -> Decimal {
        self.profit_pct
    }

    /// Profit as a percentage of the capital committed.
    #[must_use]
    pub const fn return_on_cost_pct(&self) -> Decimal {
        self.return_on_cost_pct
    }

    /// Smaller of the two listings' liquidity.
    #[must_use]
    pub const fn min_liquidity(&self) -> Volume {
        self.min_liquidity
    }

    #[must_use]
    pub const fn confidence(&self) -> f64 {
        self.pair.confidence()
    }

    #[must_use]
    pub const fn detected_at(&self) -> DateTime<Utc> {
        self.detected_at
    }

    /// Trade instructions in the form sent to alert channels.
    #[must_use]
    pub fn describe(&self) -> StrategyDescription {
        let (leg_a, leg_b) = self.strategy.legs();
        let a = self.pair.a();
        let b = self.pair.b();
        let action = |outcome: Outcome, listing: &Listing, price: Price| {
            let side = match outcome {
                Outcome::Yes => "Yes",
                Outcome::No => "No",
            };
            format!("Buy {side} on {} ({price:.3})", listing.platform())
        };

        StrategyDescription {
            action_a: action(leg_a, a, self.price_a),
            action_b: action(leg_b, b, self.price_b),
            explanation: match self.strategy {
                Strategy::YesANoB => "If event happens, profit from A. If not, profit from B.",
                Strategy::NoAYesB => "If event happens, profit from B. If not, profit from A.",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ListingId, MatchScore, Platform};
    use rust_decimal_macros::dec;

    fn listing(platform: Platform, id: &str, yes: Price, no: Price, liquidity: Volume) -> Listing {
        Listing::builder(platform, ListingId::from(id))
            .question("Will it happen?")
            .prices(yes, no)
            .liquidity(liquidity)
            .build()
            .unwrap()
    }

    fn pair() -> MatchedPair {
        MatchedPair::new(
            listing(Platform::A, "a", dec!(0.35), dec!(0.65), dec!(5000)),
            listing(Platform::B, "b", dec!(0.62), dec!(0.38), dec!(800)),
            MatchScore::identical(),
        )
    }

    #[test]
    fn strategy_costs() {
        let pair = pair();
        assert_eq!(Strategy::YesANoB.cost(pair.a(), pair.b()), dec!(0.73));
        assert_eq!(Strategy::NoAYesB.cost(pair.a(), pair.b()), dec!(1.27));
    }

    #[test]
    fn pricing_derives_all_figures() {
        let opp = ArbitrageOpportunity::price(pair(), Strategy::YesANoB, Utc::now());

        assert_eq!(opp.price_a(), dec!(0.35));
        assert_eq!(opp.price_b(), dec!(0.38));
        assert_eq!(opp.total_cost(), dec!(0.73));
        assert_eq!(opp.payout(), dec!(1));
        assert_eq!(opp.profit(), dec!(0.27));
        assert_eq!(opp.profit_pct(), dec!(27.0));
        assert_eq!(opp.return_on_cost_pct(), dec!(36.9863));
        assert_eq!(opp.min_liquidity(), dec!(800));
        assert!((opp.confidence() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn description_names_platforms_and_prices() {
        let opp = ArbitrageOpportunity::price(pair(), Strategy::YesANoB, Utc::now());
        let description = opp.describe();

        assert_eq!(description.action_a, "Buy Yes on Polymarket (0.350)");
        assert_eq!(description.action_b, "Buy No on Kalshi (0.380)");
        assert!(description.explanation.contains("profit from A"));
    }

    #[test]
    fn strategy_display_matches_wire_names() {
        assert_eq!(Strategy::YesANoB.to_string(), "yes_a_no_b");
        assert_eq!(Strategy::NoAYesB.to_string(), "no_a_yes_b");
    }
}
