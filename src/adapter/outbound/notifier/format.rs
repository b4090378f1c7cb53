//! Plain-text rendering of opportunity alerts.

use rust_decimal::Decimal;

use crate::port::outbound::notifier::{LegDetail, OpportunityEvent};

const RULE_WIDTH: usize = 70;

/// Render an opportunity as the multi-line alert block used by the console
/// and webhook notifiers.
#[must_use]
pub fn format_opportunity(e: &OpportunityEvent) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        rule.clone(),
        "ARBITRAGE OPPORTUNITY FOUND".to_string(),
        rule.clone(),
        format!("Match Confidence: {:.1}%", e.confidence * 100.0),
    ];
    push_leg(&mut lines, &e.leg_a);
    push_leg(&mut lines, &e.leg_b);
    lines.extend([
        String::new(),
        "STRATEGY:".to_string(),
        format!("  1. {}", e.action_a),
        format!("  2. {}", e.action_b),
        format!("  {}", e.explanation),
        String::new(),
        format!("Total Cost: {:.3}", e.total_cost),
        format!("Guaranteed Profit: {:.3} ({:.2}%)", e.profit, e.profit_pct),
        format!("Return on Cost: {:.2}%", e.return_on_cost_pct),
        rule,
    ]);
    lines.join("\n")
}

fn push_leg(lines: &mut Vec<String>, leg: &LegDetail) {
    lines.push(String::new());
    lines.push(format!("{}: \"{}\"", leg.platform.to_uppercase(), leg.question));
    lines.push(format!("  Yes: {:.3} | No: {:.3}", leg.yes_price, leg.no_price));
    if !leg.liquidity.is_zero() {
        lines.push(format!("  Liquidity: ${}", with_thousands(leg.liquidity)));
    }
}

/// Whole-dollar amount with comma separators.
#[must_use]
pub fn with_thousands(amount: Decimal) -> String {
    let rounded = amount.round().abs().trunc().to_string();
    let mut out = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, c) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if amount.is_sign_negative() && !out.chars().all(|c| c == '0') {
        out.insert(0, '-');
    }
    out
}

/// Truncate to `max_chars` characters (Unicode-safe), marking the cut.
#[must_use]
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...\n(truncated)")
    } else {
        s.to_string()
    }
}
