use std::time::Duration;

use ego_tree::NodeId;
use html_escape::encode_double_quoted_attribute;
use sheets_core::{PipelineError, RenderOptions, SheetId, SpreadsheetId, UpstreamEndpoints};
use sheets_logging::{short_id, sheets_info, sheets_warn};

use crate::document::HtmlDocument;
use crate::fetch::{fetch_bounded, Fetcher};

/// Every rewritten document starts with these bytes.
pub const DOCUMENT_PREAMBLE: &str = "<!DOCTYPE html>\n<meta charset=\"UTF-8\">\n";

pub const JQUERY_URL: &str = "https://ajax.googleapis.com/ajax/libs/jquery/3.1.1/jquery.min.js";

pub const DEFAULT_STATIC_BASE: &str = "http://localhost:8080/static/";

const CHARTS_EXPORT_MARKER: &str = "CHARTS_EXPORT_URI.push('";

// Column widths are summed from the frozen header cells `#0C1`, `#0C2`, ...
// and applied to the 2nd and 4th `table.waffle`. Tied to upstream markup.
const INIT_SCRIPT: &str = concat!(
    "$(init); ",
    "function init() { ",
    "$('body').css('overflow', 'hidden'); ",
    "var $table = $('#sheets-viewport table').detach(); ",
    "var $metatable = create_metatable($table); ",
    "$('body').empty().append($metatable); ",
    "$metatable.resize(); ",
    " }",
    "$('.row-header-wrapper').remove();",
    "$(window).bind('load', function() {",
    "i=1;",
    "tableWidth=0;",
    "while (true) {  idStr = '#0C'+i.toString(); obj = $(idStr); if (obj[0]==undefined) {break;}; ",
    "wstr=obj[0].style.width.replace('px', ''); tableWidth+=parseInt(wstr); i++; }",
    "tblList = $('table.waffle');",
    "tblList[1].style.width=tableWidth.toString()+'px';",
    "tblList[3].style.width=tableWidth.toString()+'px';",
    "initCharts();",
    "});",
);

/// Absolute URLs of the assets injected into every rewritten sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSettings {
    pub stylesheet_url: String,
    pub behavior_script_url: String,
    pub utility_script_url: String,
}

impl AssetSettings {
    /// Local assets served as `metatable.css` / `metatable.js` under `base`.
    pub fn with_static_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            stylesheet_url: format!("{base}/metatable.css"),
            behavior_script_url: format!("{base}/metatable.js"),
            utility_script_url: JQUERY_URL.to_string(),
        }
    }
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self::with_static_base(DEFAULT_STATIC_BASE)
    }
}

/// Fetches a single-sheet embed page and rewrites it into a standalone
/// document.
pub struct SheetTransformer<'a> {
    fetcher: &'a dyn Fetcher,
    endpoints: &'a UpstreamEndpoints,
    assets: &'a AssetSettings,
    timeout: Duration,
}

impl<'a> SheetTransformer<'a> {
    pub fn new(
        fetcher: &'a dyn Fetcher,
        endpoints: &'a UpstreamEndpoints,
        assets: &'a AssetSettings,
        timeout: Duration,
    ) -> Self {
        Self {
            fetcher,
            endpoints,
            assets,
            timeout,
        }
    }

    pub async fn render_sheet(
        &self,
        sid: &SpreadsheetId,
        gid: &SheetId,
        options: &RenderOptions,
    ) -> Result<Vec<u8>, PipelineError> {
        let url = self.endpoints.sheet_url(sid, gid, options);
        let bytes = fetch_bounded(self.fetcher, &url, self.timeout)
            .await
            .map_err(|err| PipelineError::from(err).with_sid(sid).with_gid(gid))?;

        let mut document = HtmlDocument::parse(&bytes);
        let output = rewrite_document(&mut document, self.endpoints, self.assets)
            .map_err(|err| err.with_sid(sid).with_gid(gid))?;
        sheets_info!(
            "rendered sheet {}/{} ({} bytes)",
            short_id(sid.as_str()),
            gid,
            output.len()
        );
        Ok(output)
    }
}

/// Rewrites an embed page in place and serializes it behind
/// [`DOCUMENT_PREAMBLE`].
pub fn rewrite_document(
    document: &mut HtmlDocument,
    endpoints: &UpstreamEndpoints,
    assets: &AssetSettings,
) -> Result<Vec<u8>, PipelineError> {
    let head = require(document, "head")?;
    let body = require(document, "body")?;

    absolutize_scripts(document, endpoints);
    for link in document.find_all("head/link") {
        document.rewrite_links(link, |reference| endpoints.absolutize(reference));
    }

    document.append_html(head, &stylesheet_tag(&assets.stylesheet_url));
    document.append_html(body, &script_tag(&assets.utility_script_url));
    document.append_html(body, &script_tag(&assets.behavior_script_url));
    document.append_html(body, &format!("<script>{INIT_SCRIPT}</script>"));

    let mut output = DOCUMENT_PREAMBLE.as_bytes().to_vec();
    output.extend_from_slice(&document.serialize_node(document.root()));
    Ok(output)
}

fn require(document: &HtmlDocument, path: &str) -> Result<NodeId, PipelineError> {
    document.find_first(path).ok_or_else(|| {
        sheets_warn!("sheet document has no <{}>", path);
        PipelineError::not_found(format!("sheet document has no <{path}>"))
    })
}

fn absolutize_scripts(document: &mut HtmlDocument, endpoints: &UpstreamEndpoints) {
    let scripts: Vec<NodeId> = document.descendants("script").collect();
    for script in scripts {
        match document.attr(script, "src").map(str::to_string) {
            Some(src) => {
                document.set_attr(script, "src", &endpoints.absolutize(&src));
            }
            None => document.rewrite_text(script, |text| {
                absolutize_chart_exports(text, endpoints.origin())
            }),
        }
    }
}

/// Prefixes root-relative arguments of `CHARTS_EXPORT_URI.push('...')` with
/// the upstream origin.
fn absolutize_chart_exports(script: &str, origin: &str) -> String {
    let mut output = String::with_capacity(script.len());
    let mut rest = script;
    while let Some(idx) = rest.find(CHARTS_EXPORT_MARKER) {
        let split = idx + CHARTS_EXPORT_MARKER.len();
        output.push_str(&rest[..split]);
        rest = &rest[split..];
        if rest.starts_with('/') && !rest.starts_with("//") {
            output.push_str(origin);
        }
    }
    output.push_str(rest);
    output
}

fn stylesheet_tag(href: &str) -> String {
    format!(
        r#"<link rel="stylesheet" href="{}">"#,
        encode_double_quoted_attribute(href)
    )
}

fn script_tag(src: &str) -> String {
    format!(
        r#"<script src="{}"></script>"#,
        encode_double_quoted_attribute(src)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_exports_get_origin_prefix() {
        let script = "CHARTS_EXPORT_URI.push('/spreadsheets/d/x/export?a=1');\
                      CHARTS_EXPORT_URI.push('/b');";
        assert_eq!(
            absolutize_chart_exports(script, "https://docs.google.com"),
            "CHARTS_EXPORT_URI.push('https://docs.google.com/spreadsheets/d/x/export?a=1');\
             CHARTS_EXPORT_URI.push('https://docs.google.com/b');"
        );
    }

    #[test]
    fn absolute_chart_exports_are_untouched() {
        let script = "CHARTS_EXPORT_URI.push('https://docs.google.com/a');\
                      CHARTS_EXPORT_URI.push('//cdn.example/b');";
        assert_eq!(absolutize_chart_exports(script, "https://docs.google.com"), script);
    }

    #[test]
    fn scripts_without_marker_are_unchanged() {
        let script = "var x = 1; initCharts();";
        assert_eq!(absolutize_chart_exports(script, "https://docs.google.com"), script);
    }

    #[test]
    fn static_base_trailing_slash_is_optional() {
        assert_eq!(
            AssetSettings::with_static_base("https://sheets.example/static"),
            AssetSettings::with_static_base("https://sheets.example/static/")
        );
        let assets = AssetSettings::default();
        assert_eq!(assets.stylesheet_url, "http://localhost:8080/static/metatable.css");
        assert_eq!(assets.behavior_script_url, "http://localhost:8080/static/metatable.js");
        assert_eq!(assets.utility_script_url, JQUERY_URL);
    }

    #[test]
    fn injected_tags_escape_attribute_values() {
        assert_eq!(
            script_tag(r#"https://x.example/a.js?q="1""#),
            r#"<script src="https://x.example/a.js?q=&quot;1&quot;"></script>"#
        );
    }
}
