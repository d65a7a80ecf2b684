use pretty_assertions::assert_eq;
use sheets_core::{RenderOptions, SheetId, SpreadsheetId, UpstreamEndpoints};

#[test]
fn listing_url_follows_template() {
    let endpoints = UpstreamEndpoints::default();
    let sid = SpreadsheetId::new("1AbC_d-E");
    assert_eq!(
        endpoints.listing_url(&sid),
        "https://docs.google.com/spreadsheets/d/1AbC_d-E/pubhtml?widget=true"
    );
}

#[test]
fn published_ids_keep_their_prefix_in_urls() {
    let endpoints = UpstreamEndpoints::default();
    let sid = SpreadsheetId::published("2PACX-1vT");
    assert_eq!(
        endpoints.listing_url(&sid),
        "https://docs.google.com/spreadsheets/d/e/2PACX-1vT/pubhtml?widget=true"
    );
}

#[test]
fn sheet_url_keeps_separator_for_empty_options() {
    let endpoints = UpstreamEndpoints::default();
    let sid = SpreadsheetId::new("abc");
    let gid = SheetId::parse("7").unwrap();
    assert_eq!(
        endpoints.sheet_url(&sid, &gid, &RenderOptions::none()),
        "https://docs.google.com/spreadsheets/d/abc/htmlembed/sheet?gid=7&"
    );
    assert_eq!(
        endpoints.sheet_url(&sid, &gid, &RenderOptions::new("gridlines=false&single=true")),
        "https://docs.google.com/spreadsheets/d/abc/htmlembed/sheet?gid=7&gridlines=false&single=true"
    );
}

#[test]
fn absolutize_resolves_relative_references() {
    let endpoints = UpstreamEndpoints::default();
    assert_eq!(
        endpoints.absolutize("/static/spreadsheets2/client/css/waffle.css"),
        "https://docs.google.com/static/spreadsheets2/client/css/waffle.css"
    );
    assert_eq!(
        endpoints.absolutize("static/a.js?v=1"),
        "https://docs.google.com/static/a.js?v=1"
    );
    assert_eq!(
        endpoints.absolutize("//ssl.gstatic.com/docs/favicon.ico"),
        "https://ssl.gstatic.com/docs/favicon.ico"
    );
}

#[test]
fn absolutize_keeps_absolute_references() {
    let endpoints = UpstreamEndpoints::default();
    assert_eq!(
        endpoints.absolutize("https://fonts.googleapis.com/css?family=Roboto"),
        "https://fonts.googleapis.com/css?family=Roboto"
    );
    assert_eq!(endpoints.absolutize(""), "");
}
