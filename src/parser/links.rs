use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

use crate::fetch::DEFAULT_SOURCE;

static BASE_TAG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("base[href]").unwrap());
static LINK_TAG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("link[href]").unwrap());

/// Infer the origin used to absolutize relative detail-page hrefs.
///
/// Candidates in priority order: the source argument when it is itself a
/// URL, a `<base href>` tag, a canonical `<link>`, then the default listing
/// URL. The first candidate that parses with a host wins.
pub fn guess_base_url(source_hint: Option<&str>, doc: &Html) -> String {
    let mut candidates: Vec<String> = Vec::new();

    if let Some(hint) = source_hint {
        candidates.push(hint.to_string());
    }

    if let Some(href) = doc
        .select(&BASE_TAG)
        .next()
        .and_then(|el| el.value().attr("href"))
    {
        candidates.push(href.to_string());
    }

    let canonical = doc.select(&LINK_TAG).find(|el| {
        el.value()
            .attr("rel")
            .is_some_and(|rel| rel.to_lowercase().contains("canonical"))
    });
    if let Some(href) = canonical.and_then(|el| el.value().attr("href")) {
        candidates.push(href.to_string());
    }

    candidates.push(DEFAULT_SOURCE.to_string());

    candidates
        .iter()
        .find_map(|cand| origin_of(cand))
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string())
}

/// Join `href` against the inferred base. Absolute hrefs pass through
/// unchanged; a href that cannot be joined is returned as-is.
pub fn absolutize(base_url: &str, href: &str) -> String {
    match Url::parse(base_url).and_then(|base| base.join(href)) {
        Ok(joined) => joined.to_string(),
        Err(_) => href.to_string(),
    }
}

/// "scheme://host[:port]" for candidates that carry a real host.
fn origin_of(candidate: &str) -> Option<String> {
    let parsed = Url::parse(candidate).ok()?;
    if !parsed.has_host() {
        return None;
    }
    let origin = parsed.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}
