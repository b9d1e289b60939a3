use tracing::debug;

use crate::output::TokenRecord;
use crate::parser::{price, RawToken};

/// Validate raw rows, order them by descending USD price, cap the count.
///
/// Rows without a usable name or price are dropped here rather than
/// escalated; ties keep their document order.
pub fn normalize_and_rank(raw: Vec<RawToken>, limit: usize) -> Vec<TokenRecord> {
    let mut records: Vec<TokenRecord> = raw.into_iter().filter_map(validate).collect();
    records.sort_by(|a, b| b.price_usd.total_cmp(&a.price_usd));
    records.truncate(limit);
    records
}

fn validate(raw: RawToken) -> Option<TokenRecord> {
    let name = match raw.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            debug!("Dropping row without a name: {:?}", raw);
            return None;
        }
    };

    let Some(price_usd) = raw.price.as_deref().and_then(price::parse_price) else {
        debug!("Dropping row without a parsable price: {}", name);
        return None;
    };

    Some(TokenRecord {
        name,
        price_usd,
        url: raw.url.unwrap_or_default(),
    })
}
