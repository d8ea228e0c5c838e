//! HTML shaped like the site's landing and search pages.
#![allow(dead_code)]

pub fn landing(token: Option<&str>, points: Option<&str>) -> String {
    let token = token
        .map(|t| format!(r#"<input type="hidden" name="xsrf_token" value="{t}" />"#))
        .unwrap_or_default();
    let points = points
        .map(|p| format!(r#"<span class="nav__points">{p}</span>"#))
        .unwrap_or_default();
    format!(
        r#"<html><head><title>Giveaways</title></head><body>
        <header><a class="nav__button" href="/account">{points}</a></header>
        <form>{token}</form>
        </body></html>"#
    )
}

pub fn row(code: &str, name: &str, cost: &str) -> String {
    row_with_class(code, name, cost, "")
}

pub fn faded_row(code: &str, name: &str, cost: &str) -> String {
    row_with_class(code, name, cost, " is-faded")
}

fn row_with_class(code: &str, name: &str, cost: &str, extra_class: &str) -> String {
    format!(
        r#"<div class="giveaway__row-outer-wrap"><div class="giveaway__row-inner-wrap{extra_class}">
        <h2 class="giveaway__heading">
          <a class="giveaway__heading__name" href="/giveaway/{code}/{slug}">{name}</a>
          <span class="giveaway__heading__thin">(3 Copies)</span>
          <span class="giveaway__heading__thin">{cost}</span>
        </h2></div></div>"#,
        slug = name.to_lowercase().replace(' ', "-"),
    )
}

pub fn broken_row() -> String {
    r#"<div class="giveaway__row-outer-wrap"><div class="giveaway__row-inner-wrap">
    <h2 class="giveaway__heading"><span class="giveaway__heading__thin">(10P)</span></h2>
    </div></div>"#
        .to_string()
}

pub fn pinned(rows: &[String]) -> String {
    format!(
        r#"<div class="pinned-giveaways__outer-wrap"><div class="pinned-giveaways__inner-wrap">{}</div></div>"#,
        rows.concat()
    )
}

pub fn page(rows: &[String]) -> String {
    format!(
        r#"<html><body><div class="page__heading">Giveaways</div>{}</body></html>"#,
        rows.concat()
    )
}

pub fn entry_json(kind: &str) -> String {
    format!(r#"{{"type":"{kind}","entry_count":"12","points":"0"}}"#)
}
