use std::collections::HashSet;

use serde::Serialize;

use crate::SheetId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetDescriptor {
    pub name: String,
    pub gid: SheetId,
}

impl SheetDescriptor {
    pub fn new(name: impl Into<String>, gid: SheetId) -> Self {
        Self {
            name: name.into(),
            gid,
        }
    }
}

/// Title plus sheets in display order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpreadsheetListing {
    title: String,
    sheets: Vec<SheetDescriptor>,
}

impl SpreadsheetListing {
    /// Returns `None` for an empty sheet list.
    pub fn new(title: impl Into<String>, sheets: Vec<SheetDescriptor>) -> Option<Self> {
        if sheets.is_empty() {
            return None;
        }
        Some(Self {
            title: title.into(),
            sheets,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sheets(&self) -> &[SheetDescriptor] {
        &self.sheets
    }

    pub fn into_parts(self) -> (String, Vec<SheetDescriptor>) {
        (self.title, self.sheets)
    }

    /// Keeps sheets whose gid is in `gids`, in listing order. Requested gids
    /// with no matching sheet are ignored; `None` when nothing matches.
    pub fn subset(&self, gids: &HashSet<SheetId>) -> Option<Self> {
        let sheets = self
            .sheets
            .iter()
            .filter(|sheet| gids.contains(&sheet.gid))
            .cloned()
            .collect();
        Self::new(self.title.clone(), sheets)
    }
}
