use std::collections::HashSet;

use pretty_assertions::assert_eq;
use sheets_core::{SheetDescriptor, SheetId, SpreadsheetListing};

fn gid(raw: &str) -> SheetId {
    SheetId::parse(raw).unwrap()
}

fn listing() -> SpreadsheetListing {
    SpreadsheetListing::new(
        "Budget",
        vec![
            SheetDescriptor::new("Sheet1", gid("0")),
            SheetDescriptor::new("Sheet2", gid("123456")),
            SheetDescriptor::new("Sheet3", gid("42")),
        ],
    )
    .unwrap()
}

#[test]
fn empty_listing_is_rejected() {
    assert!(SpreadsheetListing::new("Empty", Vec::new()).is_none());
}

#[test]
fn subset_preserves_listing_order() {
    let gids: HashSet<SheetId> = [gid("42"), gid("0")].into_iter().collect();
    let subset = listing().subset(&gids).unwrap();
    assert_eq!(subset.title(), "Budget");
    assert_eq!(
        subset.sheets(),
        &[
            SheetDescriptor::new("Sheet1", gid("0")),
            SheetDescriptor::new("Sheet3", gid("42")),
        ]
    );
}

#[test]
fn subset_drops_unknown_gids_silently() {
    let gids: HashSet<SheetId> = [gid("123456"), gid("999")].into_iter().collect();
    let subset = listing().subset(&gids).unwrap();
    assert_eq!(subset.sheets(), &[SheetDescriptor::new("Sheet2", gid("123456"))]);
}

#[test]
fn subset_with_no_match_is_none() {
    let gids: HashSet<SheetId> = [gid("999")].into_iter().collect();
    assert!(listing().subset(&gids).is_none());
}

#[test]
fn listing_serializes_as_plain_json() {
    let json = serde_json::to_value(listing()).unwrap();
    assert_eq!(json["title"], "Budget");
    assert_eq!(json["sheets"][1]["name"], "Sheet2");
    assert_eq!(json["sheets"][1]["gid"], "123456");
}
