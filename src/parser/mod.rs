pub mod links;
pub mod price;
pub mod rows;

use scraper::Html;

pub use rows::RawToken;

/// Single extraction pass: parse the document, locate candidate listing
/// rows, absolutize their detail-page hrefs.
pub fn extract_tokens(html: &str, source_hint: Option<&str>) -> Vec<RawToken> {
    let doc = Html::parse_document(html);
    let base_url = links::guess_base_url(source_hint, &doc);

    rows::candidate_rows(&doc)
        .into_iter()
        .map(|mut row| {
            row.url = row.url.map(|href| links::absolutize(&base_url, &href));
            row
        })
        .collect()
}
