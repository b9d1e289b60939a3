use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// One extracted listing: display name, USD price, detail-page URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenRecord {
    pub name: String,
    pub price_usd: f64,
    pub url: String,
}

/// Serialize the ranked records as a pretty-printed JSON array, overwriting
/// `path` in a single write after the pipeline has fully completed.
pub fn write_json(path: &Path, records: &[TokenRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, price_usd: f64, url: &str) -> TokenRecord {
        TokenRecord {
            name: name.to_string(),
            price_usd,
            url: url.to_string(),
        }
    }

    #[test]
    fn writes_array_with_exact_keys() {
        let path = std::env::temp_dir().join("token_scraper_write_test.json");
        let records = vec![
            record("Ether", 3456.78, "https://etherscan.io/token/0xaaa"),
            record("Tether USD (USDT)", 0.999, "https://etherscan.io/token/0xbbb"),
        ];

        write_json(&path, &records).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        let array = parsed.as_array().unwrap();

        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["name"], "Ether");
        assert_eq!(array[0]["price_usd"], 3456.78);
        assert_eq!(array[0]["url"], "https://etherscan.io/token/0xaaa");
        assert_eq!(array[0].as_object().unwrap().len(), 3);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn zero_records_write_an_empty_array() {
        let path = std::env::temp_dir().join("token_scraper_empty_test.json");

        write_json(&path, &[]).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "[]");

        fs::remove_file(&path).ok();
    }

    #[test]
    fn overwrites_previous_content() {
        let path = std::env::temp_dir().join("token_scraper_overwrite_test.json");
        fs::write(&path, "stale content that is much longer than the new file").unwrap();

        write_json(&path, &[record("Ether", 1.0, "")]).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);

        fs::remove_file(&path).ok();
    }
}
