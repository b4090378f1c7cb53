//! Gamma API events and markets.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::error::DomainError;
use crate::domain::{Category, Listing, ListingId, Platform};

/// An event groups one or more binary markets under a tag.
#[derive(Debug, Clone, Deserialize)]
pub struct GammaEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub markets: Vec<GammaMarket>,
}

/// A single Gamma market.
///
/// `outcomePrices` arrives as a JSON-encoded string (`"[\"0.35\", \"0.65\"]"`)
/// on most endpoints and as a plain array on some, so it is kept raw.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaMarket {
    #[serde(default)]
    pub condition_id: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub outcome_prices: Option<Value>,
    #[serde(default)]
    pub liquidity_num: Option<Decimal>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Why a Gamma market did not become a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Closed,
    NotBinary,
    Unquoted,
    Malformed(String),
    Invalid(DomainError),
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "market is closed"),
            Self::NotBinary => write!(f, "market does not have exactly two outcomes"),
            Self::Unquoted => write!(f, "both outcome prices are zero"),
            Self::Malformed(reason) => write!(f, "malformed market: {reason}"),
            Self::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl GammaMarket {
    /// Convert into a listing tagged with `category`.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] for closed, non-binary, unquoted or malformed
    /// markets, including those without `liquidityNum`. These are skipped,
    /// not propagated.
    pub fn into_listing(self, category: Option<&Category>) -> Result<Listing, Rejection> {
        if self.closed {
            return Err(Rejection::Closed);
        }

        let (yes, no) = parse_outcome_prices(self.outcome_prices.as_ref())?;
        if yes.is_zero() && no.is_zero() {
            return Err(Rejection::Unquoted);
        }

        let id = self.condition_id.unwrap_or_default();
        let mut builder = Listing::builder(Platform::A, ListingId::new(id))
            .question(self.question.unwrap_or_default())
            .prices(yes, no);
        if let Some(liquidity) = self.liquidity_num {
            builder = builder.liquidity(liquidity);
        }

        match (category, self.category.as_deref()) {
            (Some(category), _) => builder = builder.category(category.clone()),
            (None, Some(tag)) if !tag.trim().is_empty() => builder = builder.category(tag),
            _ => {}
        }
        if let Some(end_date) = self.end_date.as_deref().and_then(parse_timestamp) {
            builder = builder.end_date(end_date);
        }

        builder.build().map_err(Rejection::Invalid)
    }
}

fn parse_outcome_prices(raw: Option<&Value>) -> Result<(Decimal, Decimal), Rejection> {
    let values: Vec<Value> = match raw {
        None | Some(Value::Null) => return Err(Rejection::NotBinary),
        Some(Value::String(encoded)) => serde_json::from_str(encoded)
            .map_err(|e| Rejection::Malformed(format!("outcomePrices: {e}")))?,
        Some(Value::Array(values)) => values.clone(),
        Some(other) => {
            return Err(Rejection::Malformed(format!(
                "outcomePrices has unexpected type: {other}"
            )))
        }
    };

    if values.len() != 2 {
        return Err(Rejection::NotBinary);
    }

    Ok((parse_price(&values[0])?, parse_price(&values[1])?))
}

fn parse_price(value: &Value) -> Result<Decimal, Rejection> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => return Err(Rejection::Malformed(format!("price {other}"))),
    };
    text.trim()
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(text.trim()))
        .map_err(|e| Rejection::Malformed(format!("price {text:?}: {e}")))
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
