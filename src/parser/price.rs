use std::sync::LazyLock;

use regex::Regex;

/// Amounts like "1,234.50", "0.99" or "1234", optionally preceded by "$".
static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$?\s*([0-9]{1,3}(?:,[0-9]{3})*(?:\.[0-9]+)?|[0-9]+(?:\.[0-9]+)?)").unwrap()
});

/// How many bytes before a matched amount a "$" may sit and still count as
/// denominating it.
const DOLLAR_WINDOW: usize = 4;

/// Find the first dollar-denominated amount in `text` and return its numeric
/// text with the currency symbol and surrounding whitespace stripped
/// ("$1,234.50" → "1,234.50").
///
/// Amounts with no "$" nearby (ranks, volumes, holder counts) are skipped,
/// so a listing row's price column wins over its other numeric columns.
pub fn find_usd_amount(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    for caps in AMOUNT_RE.captures_iter(text) {
        let full = caps.get(0).unwrap();

        // Window from DOLLAR_WINDOW bytes before the match to one byte past
        // it, clamped to char boundaries.
        let mut start = full.start().saturating_sub(DOLLAR_WINDOW);
        while !text.is_char_boundary(start) {
            start -= 1;
        }
        let mut end = (full.end() + 1).min(text.len());
        while !text.is_char_boundary(end) {
            end += 1;
        }

        if !text[start..end].contains('$') {
            continue;
        }

        let number = caps[1].to_string();
        if parse_price(&number).is_some() {
            return Some(number);
        }
    }

    None
}

/// Parse a price string into a non-negative finite f64, tolerating a
/// currency symbol, thousands separators and stray whitespace.
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '$' && *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let value: f64 = cleaned.parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}
