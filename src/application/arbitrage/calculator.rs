//! Arbitrage calculator for matched cross-platform pairs.
//!
//! For a pair (A, B) of listings on the same event, holding YES on one
//! platform and NO on the other pays exactly 1.0 whichever way the event
//! resolves. When the two legs together cost less than that, the difference
//! is locked-in profit.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::{ArbitrageOpportunity, Listing, MatchedPair, Outcome, Strategy, Volume};

/// Configuration for arbitrage evaluation.
#[derive(Debug, Clone, Deserialize)]
pub struct ArbitrageConfig {
    /// Minimum profit, as a percentage of the 1.0 payout.
    #[serde(default = "default_min_profit_pct")]
    pub min_profit_pct: Decimal,

    /// Minimum liquidity required on both legs.
    #[serde(default = "default_min_liquidity")]
    pub min_liquidity: Volume,

    /// Maximum distance of YES + NO from 1.0 on either listing.
    #[serde(default = "default_price_sum_tolerance")]
    pub price_sum_tolerance: Decimal,

    /// Reject pairs whose quotes fail the YES + NO sanity check.
    #[serde(default = "default_check_price_sum")]
    pub check_price_sum: bool,
}

fn default_min_profit_pct() -> Decimal {
    Decimal::new(2, 0)
}

fn default_min_liquidity() -> Volume {
    Decimal::new(100, 0)
}

fn default_price_sum_tolerance() -> Decimal {
    Decimal::new(5, 2) // 0.05
}

const fn default_check_price_sum() -> bool {
    true
}

impl Default for ArbitrageConfig {
    fn default() -> Self {
        Self {
            min_profit_pct: default_min_profit_pct(),
            min_liquidity: default_min_liquidity(),
            price_sum_tolerance: default_price_sum_tolerance(),
            check_price_sum: default_check_price_sum(),
        }
    }
}

impl ArbitrageConfig {
    /// The sum tolerance in effect, `None` when the check is off.
    #[must_use]
    pub fn effective_tolerance(&self) -> Option<Decimal> {
        self.check_price_sum.then_some(self.price_sum_tolerance)
    }
}

/// Turns a matched pair into an opportunity, or nothing.
#[derive(Debug, Clone)]
pub struct ArbitrageCalculator {
    min_profit_pct: Decimal,
    min_liquidity: Volume,
    price_sum_tolerance: Option<Decimal>,
}

impl ArbitrageCalculator {
    #[must_use]
    pub const fn new(
        min_profit_pct: Decimal,
        min_liquidity: Volume,
        price_sum_tolerance: Option<Decimal>,
    ) -> Self {
        Self {
            min_profit_pct,
            min_liquidity,
            price_sum_tolerance,
        }
    }

    #[must_use]
    pub fn from_config(config: &ArbitrageConfig) -> Self {
        Self::new(
            config.min_profit_pct,
            config.min_liquidity,
            config.effective_tolerance(),
        )
    }

    /// Evaluate `pair` at the current time.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] when a quote is degenerate (≤ 0 or ≥ 1) or
    /// the YES + NO sum of a listing is outside the tolerance. The pair is
    /// unpriceable and should be skipped.
    pub fn evaluate(
        &self,
        pair: &MatchedPair,
    ) -> Result<Option<ArbitrageOpportunity>, DomainError> {
        self.evaluate_at(pair, Utc::now())
    }

    /// Evaluate `pair`, stamping any opportunity with `detected_at`.
    ///
    /// # Errors
    ///
    /// See [`evaluate`](Self::evaluate).
    pub fn evaluate_at(
        &self,
        pair: &MatchedPair,
        detected_at: DateTime<Utc>,
    ) -> Result<Option<ArbitrageOpportunity>, DomainError> {
        self.validate_quotes(pair.a())?;
        self.validate_quotes(pair.b())?;

        let (strategy, profit) = best_strategy(pair);
        if profit <= Decimal::ZERO {
            return Ok(None);
        }

        let opportunity = ArbitrageOpportunity::price(pair.clone(), strategy, detected_at);

        if opportunity.profit_pct() < self.min_profit_pct {
            debug!(
                listing_a = %pair.a().id(),
                listing_b = %pair.b().id(),
                profit_pct = %opportunity.profit_pct(),
                "Below minimum profit"
            );
            return Ok(None);
        }
        if opportunity.min_liquidity() < self.min_liquidity {
            debug!(
                listing_a = %pair.a().id(),
                listing_b = %pair.b().id(),
                liquidity = %opportunity.min_liquidity(),
                "Below minimum liquidity"
            );
            return Ok(None);
        }

        Ok(Some(opportunity))
    }

    fn validate_quotes(&self, listing: &Listing) -> Result<(), DomainError> {
        for outcome in [Outcome::Yes, Outcome::No] {
            let price = listing.price(outcome);
            if price <= Decimal::ZERO || price >= Decimal::ONE {
                return Err(DomainError::DegeneratePrice {
                    platform: listing.platform(),
                    listing_id: listing.id().to_string(),
                    outcome,
                    price,
                });
            }
        }

        if let Some(tolerance) = self.price_sum_tolerance {
            let sum = listing.yes_price() + listing.no_price();
            if (sum - Decimal::ONE).abs() > tolerance {
                return Err(DomainError::QuoteSumOutOfRange {
                    platform: listing.platform(),
                    listing_id: listing.id().to_string(),
                    sum,
                    tolerance,
                });
            }
        }

        Ok(())
    }
}

impl Default for ArbitrageCalculator {
    fn default() -> Self {
        Self::from_config(&ArbitrageConfig::default())
    }
}

/// Most profitable strategy; `YesANoB` wins ties.
fn best_strategy(pair: &MatchedPair) -> (Strategy, Decimal) {
    let mut best = (Strategy::YesANoB, Decimal::ONE - Strategy::YesANoB.cost(pair.a(), pair.b()));
    for strategy in Strategy::ALL {
        let profit = Decimal::ONE - strategy.cost(pair.a(), pair.b());
        if profit > best.1 {
            best = (strategy, profit);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ListingId, MatchScore, Platform, Price};
    use rust_decimal_macros::dec;

    fn listing(platform: Platform, yes: Price, no: Price, liquidity: Volume) -> Listing {
        Listing::builder(platform, ListingId::from(format!("{platform}-1")))
            .question("Will the event happen?")
            .prices(yes, no)
            .liquidity(liquidity)
            .build()
            .unwrap()
    }

    fn pair(a: (Price, Price), b: (Price, Price)) -> MatchedPair {
        MatchedPair::new(
            listing(Platform::A, a.0, a.1, dec!(1000)),
            listing(Platform::B, b.0, b.1, dec!(1000)),
            MatchScore::identical(),
        )
    }

    /// Calculator without the sum check, for quotes that are deliberately far apart.
    fn lenient() -> ArbitrageCalculator {
        ArbitrageCalculator::new(dec!(2.0), dec!(100), None)
    }

    #[test]
    fn picks_yes_a_no_b() {
        let pair = pair((dec!(0.35), dec!(0.65)), (dec!(0.62), dec!(0.38)));
        let opp = ArbitrageCalculator::default().evaluate(&pair).unwrap().unwrap();

        assert_eq!(opp.strategy(), Strategy::YesANoB);
        assert_eq!(opp.total_cost(), dec!(0.73));
        assert_eq!(opp.profit(), dec!(0.27));
        assert_eq!(opp.profit_pct(), dec!(27.0));
    }

    #[test]
    fn picks_no_a_yes_b() {
        let pair = pair((dec!(0.52), dec!(0.48)), (dec!(0.45), dec!(0.55)));
        let opp = ArbitrageCalculator::default().evaluate(&pair).unwrap().unwrap();

        assert_eq!(opp.strategy(), Strategy::NoAYesB);
        assert_eq!(opp.total_cost(), dec!(0.93));
        assert_eq!(opp.profit(), dec!(0.07));
        assert_eq!(opp.profit_pct(), dec!(7.00));
    }

    #[test]
    fn no_opportunity_when_every_strategy_costs_at_least_one() {
        let pair = pair((dec!(0.50), dec!(0.50)), (dec!(0.50), dec!(0.50)));
        assert!(ArbitrageCalculator::default().evaluate(&pair).unwrap().is_none());

        let pair = pair_with_spread();
        assert!(ArbitrageCalculator::default().evaluate(&pair).unwrap().is_none());
    }

    fn pair_with_spread() -> MatchedPair {
        pair((dec!(0.52), dec!(0.50)), (dec!(0.51), dec!(0.49)))
    }

    #[test]
    fn tie_prefers_yes_a_no_b() {
        let pair = pair((dec!(0.40), dec!(0.40)), (dec!(0.40), dec!(0.40)));
        let opp = lenient().evaluate(&pair).unwrap().unwrap();
        assert_eq!(opp.strategy(), Strategy::YesANoB);
    }

    #[test]
    fn below_min_profit_is_suppressed() {
        // profit 0.01 -> 1%
        let pair = pair((dec!(0.49), dec!(0.51)), (dec!(0.50), dec!(0.50)));
        assert!(ArbitrageCalculator::default().evaluate(&pair).unwrap().is_none());

        let permissive = ArbitrageCalculator::new(dec!(1.0), dec!(100), None);
        assert!(permissive.evaluate(&pair).unwrap().is_some());
    }

    #[test]
    fn liquidity_gate_suppresses() {
        let pair = MatchedPair::new(
            listing(Platform::A, dec!(0.35), dec!(0.65), dec!(5000)),
            listing(Platform::B, dec!(0.62), dec!(0.38), dec!(99)),
            MatchScore::identical(),
        );
        assert!(ArbitrageCalculator::default().evaluate(&pair).unwrap().is_none());

        let pair = MatchedPair::new(
            listing(Platform::A, dec!(0.35), dec!(0.65), dec!(5000)),
            listing(Platform::B, dec!(0.62), dec!(0.38), dec!(100)),
            MatchScore::identical(),
        );
        let opp = ArbitrageCalculator::default().evaluate(&pair).unwrap().unwrap();
        assert_eq!(opp.min_liquidity(), dec!(100));
    }

    #[test]
    fn degenerate_price_is_an_anomaly() {
        let pair = pair((dec!(0), dec!(1)), (dec!(0.62), dec!(0.38)));
        let err = ArbitrageCalculator::default().evaluate(&pair).unwrap_err();
        assert!(matches!(
            err,
            DomainError::DegeneratePrice {
                platform: Platform::A,
                outcome: Outcome::Yes,
                ..
            }
        ));

        let pair = pair_b_no_at_one();
        let err = lenient().evaluate(&pair).unwrap_err();
        assert!(matches!(
            err,
            DomainError::DegeneratePrice {
                platform: Platform::B,
                outcome: Outcome::No,
                ..
            }
        ));
    }

    fn pair_b_no_at_one() -> MatchedPair {
        pair((dec!(0.35), dec!(0.65)), (dec!(0.30), dec!(1)))
    }

    #[test]
    fn quote_sum_outside_tolerance_is_an_anomaly() {
        let pair = pair((dec!(0.35), dec!(0.55)), (dec!(0.62), dec!(0.38)));
        let err = ArbitrageCalculator::default().evaluate(&pair).unwrap_err();
        assert!(matches!(err, DomainError::QuoteSumOutOfRange { .. }));

        // same quotes pass once the check is off
        assert!(lenient().evaluate(&pair).unwrap().is_some());
    }

    #[test]
    fn quote_sum_at_tolerance_edge_is_accepted() {
        let pair = pair((dec!(0.35), dec!(0.60)), (dec!(0.62), dec!(0.38)));
        assert!(ArbitrageCalculator::default().evaluate(&pair).is_ok());
    }

    #[test]
    fn stamps_detection_time_and_confidence() {
        let now = Utc::now();
        let pair = MatchedPair::new(
            listing(Platform::A, dec!(0.35), dec!(0.65), dec!(1000)),
            listing(Platform::B, dec!(0.62), dec!(0.38), dec!(1000)),
            MatchScore {
                lexical: 0.9,
                semantic: None,
                confidence: 0.9,
                year_conflict: false,
            },
        );
        let opp = ArbitrageCalculator::default()
            .evaluate_at(&pair, now)
            .unwrap()
            .unwrap();

        assert_eq!(opp.detected_at(), now);
        assert_eq!(opp.confidence(), 0.9);
    }

    #[test]
    fn config_defaults() {
        let config = ArbitrageConfig::default();
        assert_eq!(config.min_profit_pct, dec!(2));
        assert_eq!(config.min_liquidity, dec!(100));
        assert_eq!(config.effective_tolerance(), Some(dec!(0.05)));

        let off = ArbitrageConfig {
            check_price_sum: false,
            ..ArbitrageConfig::default()
        };
        assert_eq!(off.effective_tolerance(), None);
    }
}
