//! Text scanner for the sheet descriptors embedded in the listing page.
//!
//! Upstream emits one object literal per sheet, e.g.
//! `{name: "Sheet1", pageUrl: "...", gid: "0", initialSheet: true}`.
//! Each brace group is scanned on its own. Quoted strings are opaque, so a
//! name may contain braces; otherwise a group ends at the first `}`. Format
//! drift yields an empty result.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{SheetDescriptor, SheetId};

static BRACE_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\{(?:[^{}"]|"[^"]*")*\}"#).expect("Invalid brace group regex"));

static NAME_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"name:\s*"([^"]+)""#).expect("Invalid name field regex"));

static GID_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"gid:\s*"([0-9]+)""#).expect("Invalid gid field regex"));

/// Returns every descriptor found in `script`, in order of appearance.
pub fn scan_sheet_descriptors(script: &str) -> Vec<SheetDescriptor> {
    BRACE_GROUP
        .find_iter(script)
        .filter_map(|group| descriptor_in_group(group.as_str()))
        .collect()
}

fn descriptor_in_group(group: &str) -> Option<SheetDescriptor> {
    let name = NAME_FIELD.captures(group)?.get(1)?.as_str();
    let gid = GID_FIELD.captures(group)?.get(1)?.as_str();
    Some(SheetDescriptor::new(name, SheetId::parse(gid)?))
}
