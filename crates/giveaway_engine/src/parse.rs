use giveaway_core::Listing;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use url::Url;

use crate::{ListingParseError, SessionError};

const ROW: &str = "div.giveaway__row-inner-wrap";
const NAME: &str = "a.giveaway__heading__name";
const COST: &str = "span.giveaway__heading__thin";
const FADED_CLASS: &str = "is-faded";
const PINNED_BLOCK_CLASS: &str = "pinned-giveaways__outer-wrap";

/// What an authenticated landing page tells us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub xsrf_token: String,
    pub points: u32,
}

pub fn parse_landing(html: &str) -> Result<SessionInfo, SessionError> {
    let doc = Html::parse_document(html);

    let xsrf_token = select_in_document(&doc, r#"input[name="xsrf_token"]"#)
        .and_then(|input| input.value().attr("value"))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(SessionError::MissingToken)?
        .to_string();

    let points_text = select_in_document(&doc, "span.nav__points")
        .map(|span| span.text().collect::<String>())
        .ok_or(SessionError::MissingPoints)?;
    let points = points_text
        .trim()
        .parse()
        .map_err(|_| SessionError::InvalidPoints(points_text.trim().to_string()))?;

    Ok(SessionInfo { xsrf_token, points })
}

/// Decodes every listing row on a search page, top to bottom.
///
/// A malformed row yields an error in its slot; the other rows are unaffected.
pub fn parse_listings(html: &str) -> Vec<Result<Listing, ListingParseError>> {
    let doc = Html::parse_document(html);
    let Ok(row_sel) = Selector::parse(ROW) else {
        return Vec::new();
    };
    doc.select(&row_sel).map(parse_row).collect()
}

fn parse_row(row: ElementRef<'_>) -> Result<Listing, ListingParseError> {
    let anchor = select_in(row, NAME).next().ok_or(ListingParseError::MissingName)?;
    let name = anchor.text().collect::<String>().trim().to_string();
    let href = anchor.value().attr("href").unwrap_or_default();
    let id = giveaway_code(href).ok_or_else(|| ListingParseError::MissingCode(href.to_string()))?;

    let cost_text = select_in(row, COST)
        .last()
        .map(|span| span.text().collect::<String>())
        .ok_or(ListingParseError::MissingCost)?;
    let cost = parse_cost(&cost_text)?;

    Ok(Listing {
        id,
        name,
        cost,
        is_pinned: in_pinned_block(row),
        is_faded: row.value().classes().any(|class| class == FADED_CLASS),
    })
}

/// Decodes a cost heading such as `(150P)`.
pub fn parse_cost(text: &str) -> Result<u32, ListingParseError> {
    let stripped: String = text.chars().filter(|c| *c != '(' && *c != ')').collect();
    let stripped = stripped.trim();
    let digits = stripped.strip_suffix('P').unwrap_or(stripped).trim();
    digits
        .parse()
        .map_err(|_| ListingParseError::InvalidCost(text.to_string()))
}

/// Third path segment of `/giveaway/<code>/<slug>`.
fn giveaway_code(href: &str) -> Option<String> {
    let path = match Url::parse(href) {
        Ok(url) => url.path().to_string(),
        Err(_) => href.to_string(),
    };
    path.split('/')
        .nth(2)
        .filter(|code| !code.is_empty())
        .map(ToOwned::to_owned)
}

fn in_pinned_block(row: ElementRef<'_>) -> bool {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|el| el.value().classes().any(|class| class == PINNED_BLOCK_CLASS))
}

fn select_in<'a>(scope: ElementRef<'a>, css: &str) -> impl Iterator<Item = ElementRef<'a>> {
    let selected: Vec<_> = match Selector::parse(css) {
        Ok(sel) => scope.select(&sel).collect(),
        Err(_) => Vec::new(),
    };
    selected.into_iter()
}

fn select_in_document<'a>(doc: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(css).ok()?;
    doc.select(&sel).next()
}

/// JSON answer of the entry endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EntryResponse {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub msg: Option<String>,
}

impl EntryResponse {
    pub fn is_success(&self) -> bool {
        self.kind == "success"
    }
}

pub fn parse_entry_response(body: &str) -> Result<EntryResponse, serde_json::Error> {
    serde_json::from_str(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_strips_parens_and_unit() {
        assert_eq!(parse_cost("(150P)"), Ok(150));
        assert_eq!(parse_cost("(0P)"), Ok(0));
        assert_eq!(parse_cost(" (25P) "), Ok(25));
    }

    #[test]
    fn cost_without_digits_is_an_error() {
        assert_eq!(
            parse_cost("(P)"),
            Err(ListingParseError::InvalidCost("(P)".to_string()))
        );
        assert!(parse_cost("(3 Copies)").is_err());
    }

    #[test]
    fn code_is_third_path_segment() {
        assert_eq!(giveaway_code("/giveaway/AbC12/portal-2").as_deref(), Some("AbC12"));
        assert_eq!(
            giveaway_code("https://www.steamgifts.com/giveaway/XyZ9/halo").as_deref(),
            Some("XyZ9")
        );
        assert_eq!(giveaway_code("/giveaway"), None);
        assert_eq!(giveaway_code(""), None);
    }
}
