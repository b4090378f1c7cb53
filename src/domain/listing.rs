//! Listing-related domain types.
//!
//! - [`Platform`] - Which of the two venues a listing was fetched from
//! - [`Outcome`] - The YES or NO side of a binary market
//! - [`Listing`] - A single binary market question with its quotes and liquidity

use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{Category, ListingId};
use super::money::{Price, Volume};

/// The two venues compared by the engine.
///
/// Platform `A` is Polymarket and platform `B` is Kalshi. The matcher and the
/// calculator only care about the A/B distinction; the display name is used
/// in alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    /// Polymarket.
    A,
    /// Kalshi.
    B,
}

impl Platform {
    /// Human-readable venue name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Platform::A => "Polymarket",
            Platform::B => "Kalshi",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One side of a binary market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Yes,
    No,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Yes => f.write_str("YES"),
            Outcome::No => f.write_str("NO"),
        }
    }
}

/// A binary market question as quoted by one platform.
///
/// Listings are immutable once fetched. Every cycle replaces the snapshot it
/// works on wholesale, so there are no setters.
///
/// Prices are not range-checked here: a listing with a degenerate quote still
/// takes part in matching, and the arbitrage calculator reports the quote as
/// a data anomaly for that pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    platform: Platform,
    id: ListingId,
    question: String,
    category: Option<Category>,
    yes_price: Price,
    no_price: Price,
    liquidity: Volume,
    event_year: Option<u16>,
    end_date: Option<DateTime<Utc>>,
}

impl Listing {
    /// Start building a listing for the given platform and source id.
    pub fn builder(platform: Platform, id: ListingId) -> ListingBuilder {
        ListingBuilder::new(platform, id)
    }

    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    #[must_use]
    pub const fn id(&self) -> &ListingId {
        &self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub const fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    /// Price of one YES share.
    #[must_use]
    pub const fn yes_price(&self) -> Price {
        self.yes_price
    }

    /// Price of one NO share.
    #[must_use]
    pub const fn no_price(&self) -> Price {
        self.no_price
    }

    /// Price of one share on the given side.
    #[must_use]
    pub const fn price(&self, outcome: Outcome) -> Price {
        match outcome {
            Outcome::Yes => self.yes_price,
            Outcome::No => self.no_price,
        }
    }

    #[must_use]
    pub const fn liquidity(&self) -> Volume {
        self.liquidity
    }

    /// Year the event resolves in, when the source reports one.
    #[must_use]
    pub const fn event_year(&self) -> Option<u16> {
        self.event_year
    }

    #[must_use]
    pub const fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    /// Whether this listing belongs to `category`.
    ///
    /// `None` is the undifferentiated category and admits every listing.
    #[must_use]
    pub fn in_category(&self, category: Option<&Category>) -> bool {
        match category {
            None => true,
            Some(wanted) => self.category.as_ref() == Some(wanted),
        }
    }
}

/// Builder for [`Listing`] that enforces the presence invariants.
///
/// # Example
///
/// ```
/// use crossarb::domain::{Listing, ListingId, Platform};
/// use rust_decimal_macros::dec;
///
/// let listing = Listing::builder(Platform::B, ListingId::new("KXFED-25"))
///     .question("Will the Fed cut rates in 2025?")
///     .category("economy")
///     .prices(dec!(0.42), dec!(0.58))
///     .liquidity(dec!(6000))
///     .build()
///     .unwrap();
///
/// assert_eq!(listing.no_price(), dec!(0.58));
/// ```
#[derive(Debug)]
pub struct ListingBuilder {
    platform: Platform,
    id: ListingId,
    question: Option<String>,
    category: Option<Category>,
    yes_price: Option<Price>,
    no_price: Option<Price>,
    liquidity: Option<Volume>,
    event_year: Option<u16>,
    end_date: Option<DateTime<Utc>>,
}

impl ListingBuilder {
    fn new(platform: Platform, id: ListingId) -> Self {
        Self {
            platform,
            id,
            question: None,
            category: None,
            yes_price: None,
            no_price: None,
            liquidity: None,
            event_year: None,
            end_date: None,
        }
    }

    pub fn question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    pub fn category(mut self, category: impl Into<Category>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the YES and NO prices.
    pub fn prices(mut self, yes: Price, no: Price) -> Self {
        self.yes_price = Some(yes);
        self.no_price = Some(no);
        self
    }

    pub fn yes_price(mut self, price: Price) -> Self {
        self.yes_price = Some(price);
        self
    }

    pub fn no_price(mut self, price: Price) -> Self {
        self.no_price = Some(price);
        self
    }

    pub fn liquidity(mut self, liquidity: Volume) -> Self {
        self.liquidity = Some(liquidity);
        self
    }

    pub fn event_year(mut self, year: u16) -> Self {
        self.event_year = Some(year);
        self
    }

    /// Set the resolution date. Also fills the event year when none was given.
    pub fn end_date(mut self, end_date: DateTime<Utc>) -> Self {
        if self.event_year.is_none() {
            self.event_year = u16::try_from(end_date.year()).ok();
        }
        self.end_date = Some(end_date);
        self
    }

    /// Build the listing.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the id or question is empty, a price or the
    /// liquidity is missing, or the liquidity is negative.
    pub fn build(self) -> Result<Listing, DomainError> {
        if self.id.as_str().trim().is_empty() {
            return Err(DomainError::EmptyId);
        }
        let question = self
            .question
            .filter(|q| !q.trim().is_empty())
            .ok_or(DomainError::EmptyQuestion)?;
        let yes_price = self
            .yes_price
            .ok_or(DomainError::MissingField { field: "yes_price" })?;
        let no_price = self
            .no_price
            .ok_or(DomainError::MissingField { field: "no_price" })?;
        let liquidity = self
            .liquidity
            .ok_or(DomainError::MissingField { field: "liquidity" })?;
        if liquidity < Decimal::ZERO {
            return Err(DomainError::NegativeLiquidity { liquidity });
        }

        Ok(Listing {
            platform: self.platform,
            id: self.id,
            question,
            category: self.category,
            yes_price,
            no_price,
            liquidity,
            event_year: self.event_year,
            end_date: self.end_date,
        })
    }
}
