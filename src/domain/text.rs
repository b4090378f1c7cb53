//! Question text normalization.
//!
//! Two platforms phrase the same event differently ("Will Donald Trump win the
//! 2028 election?" vs "Trump wins 2028 presidential election"). [`normalize`]
//! maps both onto a canonical form that the similarity scorer compares.
//!
//! The pipeline is:
//!
//! 1. lowercase, every non-alphanumeric character becomes a separator
//! 2. drop short framing stopwords
//! 3. replace well-known entity aliases with their canonical token
//! 4. collapse whitespace
//! 5. record 4-digit year tokens (they also stay in the text)
//!
//! Normalization is total and idempotent.

use std::fmt;

/// Short framing words that carry no meaning for event identity.
const STOPWORDS: &[&str] = &[
    "the", "a", "an", "in", "on", "at", "to", "for", "of", "by", "with", "will", "be", "is",
    "are", "was", "were",
];

/// Canonical token and the spellings that collapse onto it.
const ALIASES: &[(&str, &[&str])] = &[
    (
        "trump",
        &["donald trump", "djt", "d. trump", "donald j. trump", "donald j trump"],
    ),
    ("biden", &["joe biden", "joseph biden", "j. biden"]),
    ("harris", &["kamala harris", "k. harris", "kamala d. harris"]),
    ("desantis", &["ron desantis", "ronald desantis", "r. desantis"]),
    (
        "us",
        &["united states", "united states of america", "usa", "u.s.", "u.s.a."],
    ),
    ("uk", &["united kingdom", "u.k.", "great britain", "britain"]),
    ("fed", &["federal reserve", "federal reserve bank"]),
    ("gdp", &["gross domestic product"]),
];

const MIN_YEAR: u16 = 1900;
const MAX_YEAR: u16 = 2099;

/// Canonical question text plus the years it mentions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedText {
    text: String,
    years: Vec<u16>,
}

impl NormalizedText {
    /// The canonical text: lowercase tokens separated by single spaces.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Years mentioned in the text, sorted and deduplicated.
    #[must_use]
    pub fn years(&self) -> &[u16] {
        &self.years
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.text.split(' ').filter(|t| !t.is_empty())
    }

    /// Fall back to `year` as the text's year when it names none.
    ///
    /// Used with a listing's resolution year so an undated question still
    /// conflicts with one dated to a different year.
    #[must_use]
    pub fn with_year_context(mut self, year: Option<u16>) -> Self {
        if self.years.is_empty() {
            if let Some(year) = year {
                self.years.push(year);
            }
        }
        self
    }

    /// True when both texts name years and the year sets differ.
    ///
    /// A text without years never conflicts: "Will BTC hit 100k?" may well be
    /// the same event as "BTC above 100k in 2025".
    #[must_use]
    pub fn year_conflict(&self, other: &NormalizedText) -> bool {
        !self.years.is_empty() && !other.years.is_empty() && self.years != other.years
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Normalize raw question text.
///
/// # Example
///
/// ```
/// use crossarb::domain::normalize;
///
/// let text = normalize("Will Donald Trump win the 2028 election?");
/// assert_eq!(text.as_str(), "trump win 2028 election");
/// assert_eq!(text.years(), &[2028]);
/// ```
#[must_use]
pub fn normalize(raw: &str) -> NormalizedText {
    let tokens = canonicalize_aliases(significant_tokens(raw));
    let years = extract_years(&tokens);

    NormalizedText {
        text: tokens.join(" "),
        years,
    }
}

/// Steps 1 and 2: lowercase, split on anything non-alphanumeric, drop stopwords.
fn significant_tokens(raw: &str) -> Vec<String> {
    let lowered: String = raw
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    lowered
        .split_whitespace()
        .filter(|token| !STOPWORDS.contains(token))
        .map(str::to_owned)
        .collect()
}

/// Replace alias spellings until nothing changes.
///
/// Each variant is tokenized with the same rules as the input, so "u.s.a."
/// and "U.S.A" both match. Longer variants are tried first at each position.
fn canonicalize_aliases(mut tokens: Vec<String>) -> Vec<String> {
    let table = alias_table();

    loop {
        let (next, changed) = replace_aliases_once(&tokens, &table);
        tokens = next;
        if !changed {
            return tokens;
        }
    }
}

fn alias_table() -> Vec<(Vec<String>, &'static str)> {
    let mut table: Vec<(Vec<String>, &'static str)> = ALIASES
        .iter()
        .flat_map(|(canonical, variants)| {
            variants
                .iter()
                .map(move |variant| (significant_tokens(variant), *canonical))
        })
        .filter(|(variant, canonical)| {
            !variant.is_empty() && !(variant.len() == 1 && variant[0] == *canonical)
        })
        .collect();
    table.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    table
}

fn replace_aliases_once(
    tokens: &[String],
    table: &[(Vec<String>, &'static str)],
) -> (Vec<String>, bool) {
    let mut out = Vec::with_capacity(tokens.len());
    let mut changed = false;
    let mut i = 0;

    'scan: while i < tokens.len() {
        for (variant, canonical) in table {
            let end = i + variant.len();
            if end <= tokens.len() && tokens[i..end] == variant[..] {
                out.push((*canonical).to_owned());
                changed = true;
                i = end;
                continue 'scan;
            }
        }
        out.push(tokens[i].clone());
        i += 1;
    }

    (out, changed)
}

fn extract_years(tokens: &[String]) -> Vec<u16> {
    let mut years: Vec<u16> = tokens
        .iter()
        .filter(|t| t.len() == 4 && t.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|t| t.parse::<u16>().ok())
        .filter(|year| (MIN_YEAR..=MAX_YEAR).contains(year))
        .collect();
    years.sort_unstable();
    years.dedup();
    years
}
