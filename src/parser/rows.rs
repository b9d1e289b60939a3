use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::price;

// Row-matching rules for the target listing markup. Markup drift on the
// site should only ever require touching these definitions.
const TOKEN_ANCHOR_SELECTOR: &str =
    r#"a[href*="/token/"], a[href*="/tokens/"], a[href*="/tokenholdings"]"#;
const TABLE_ROW_SELECTOR: &str = "tr";
const ANCHOR_SELECTOR: &str = "a[href]";
const SYMBOL_ATTRS: &[&str] = &["data-symbol", "data-coin-symbol", "data-symbol-short"];

static TOKEN_ANCHORS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(TOKEN_ANCHOR_SELECTOR).unwrap());
static TABLE_ROWS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(TABLE_ROW_SELECTOR).unwrap());
static ANCHORS: LazyLock<Selector> = LazyLock::new(|| Selector::parse(ANCHOR_SELECTOR).unwrap());

/// One candidate listing row, fields as found in the markup. The normalizer
/// decides which absences are fatal.
#[derive(Debug, Clone, PartialEq)]
pub struct RawToken {
    pub name: Option<String>,
    pub price: Option<String>,
    pub url: Option<String>,
}

/// Collect candidate rows in document order.
///
/// Anchor-driven matching runs first; when that tier finds no priced row at
/// all, every table row is scanned for a dollar amount sitting next to a
/// link.
pub fn candidate_rows(doc: &Html) -> Vec<RawToken> {
    let anchored = anchored_rows(doc);
    if anchored.iter().any(|row| row.price.is_some()) {
        return anchored;
    }

    let scanned = scan_table_rows(doc);
    if scanned.is_empty() {
        anchored
    } else {
        scanned
    }
}

/// Tier 1: anchors whose href points at a token detail page, each read
/// together with its enclosing row.
fn anchored_rows(doc: &Html) -> Vec<RawToken> {
    let mut rows = Vec::new();

    for anchor in doc.select(&TOKEN_ANCHORS) {
        let Some(href) = anchor
            .value()
            .attr("href")
            .map(str::trim)
            .filter(|h| !h.is_empty())
        else {
            continue;
        };

        let row = enclosing_row(anchor);
        let anchor_text = collapse_text(anchor);

        let mut pieces = Vec::new();
        if let Some(row) = row {
            pieces.push(collapse_text(row));
        }
        if !anchor_text.is_empty() {
            pieces.push(anchor_text.clone());
        }
        let context = pieces.join(" | ");

        rows.push(RawToken {
            name: symbol_attr(row, anchor).or_else(|| non_empty(anchor_text)),
            price: price::find_usd_amount(&context),
            url: Some(href.to_string()),
        });
    }

    rows
}

/// Tier 2: any table row whose text carries a dollar amount and that links
/// somewhere.
fn scan_table_rows(doc: &Html) -> Vec<RawToken> {
    let mut rows = Vec::new();

    for tr in doc.select(&TABLE_ROWS) {
        let Some(amount) = price::find_usd_amount(&collapse_text(tr)) else {
            continue;
        };
        let Some(anchor) = tr.select(&ANCHORS).next() else {
            continue;
        };
        let Some(href) = anchor
            .value()
            .attr("href")
            .map(str::trim)
            .filter(|h| !h.is_empty())
        else {
            continue;
        };

        rows.push(RawToken {
            name: symbol_attr(None, anchor).or_else(|| non_empty(collapse_text(anchor))),
            price: Some(amount),
            url: Some(href.to_string()),
        });
    }

    rows
}

/// Nearest `tr` ancestor, else the nearest `div`/`li` ancestor.
fn enclosing_row(anchor: ElementRef) -> Option<ElementRef> {
    let mut generic = None;

    for node in anchor.ancestors() {
        let Some(el) = ElementRef::wrap(node) else {
            continue;
        };
        match el.value().name() {
            "tr" => return Some(el),
            "div" | "li" if generic.is_none() => generic = Some(el),
            _ => {}
        }
    }

    generic
}

/// First non-empty symbol attribute, row element first, then the anchor.
fn symbol_attr(row: Option<ElementRef>, anchor: ElementRef) -> Option<String> {
    for attr in SYMBOL_ATTRS {
        let value = row
            .and_then(|el| el.value().attr(attr))
            .or_else(|| anchor.value().attr(attr));
        if let Some(symbol) = value.map(str::trim).filter(|s| !s.is_empty()) {
            return Some(symbol.to_string());
        }
    }
    None
}

/// Element text with every chunk trimmed and single-space joined, the way a
/// browser collapses a row's visible text.
fn collapse_text(el: ElementRef) -> String {
    let mut out = String::new();
    for chunk in el.text() {
        let piece = chunk.trim();
        if piece.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(piece);
    }
    out
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
