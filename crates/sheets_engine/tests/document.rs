use pretty_assertions::assert_eq;
use sheets_engine::HtmlDocument;

const PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>T</title>
<link rel="stylesheet" href="/a.css"><link rel="icon" href="b.ico">
</head><body><p>one<script>var a = 1;</script></p><script src="/c.js"></script></body></html>"#;

#[test]
fn find_first_follows_child_paths() {
    let doc = HtmlDocument::parse_str(PAGE);
    let title = doc.find_first("head/title").unwrap();
    assert_eq!(doc.text(title).as_deref(), Some("T"));
    let link = doc.find_first("head/link").unwrap();
    assert_eq!(doc.attr(link, "href"), Some("/a.css"));
    assert!(doc.find_first("head/script").is_none());
    assert!(doc.find_first("body/table").is_none());
}

#[test]
fn find_all_returns_every_match_in_order() {
    let doc = HtmlDocument::parse_str(PAGE);
    let hrefs: Vec<_> = doc
        .find_all("head/link")
        .into_iter()
        .map(|link| doc.attr(link, "href").unwrap().to_string())
        .collect();
    assert_eq!(hrefs, vec!["/a.css", "b.ico"]);
}

#[test]
fn descendants_are_in_document_order_and_restartable() {
    let doc = HtmlDocument::parse_str(PAGE);
    let first: Vec<_> = doc.descendants("script").collect();
    let second: Vec<_> = doc.descendants("script").collect();
    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
    assert_eq!(doc.text(first[0]).as_deref(), Some("var a = 1;"));
    assert_eq!(doc.attr(first[1], "src"), Some("/c.js"));
}

#[test]
fn set_attr_and_rewrite_text_mutate_in_place() {
    let mut doc = HtmlDocument::parse_str(PAGE);
    let scripts: Vec<_> = doc.descendants("script").collect();
    assert!(doc.set_attr(scripts[1], "src", "https://cdn.example/c.js"));
    doc.rewrite_text(scripts[0], |text| text.replace('1', "2"));

    let html = String::from_utf8(doc.serialize()).unwrap();
    assert!(html.contains(r#"<script src="https://cdn.example/c.js"></script>"#));
    assert!(html.contains("<script>var a = 2;</script>"));
}

#[test]
fn rewrite_links_covers_the_subtree() {
    let mut doc = HtmlDocument::parse_str(
        r#"<div id="x"><a href="/1">a</a><img src="/2"><span title="/3">s</span></div><a href="/4">b</a>"#,
    );
    let div = doc.find_first("body/div").unwrap();
    let visited = doc.rewrite_links(div, |url| format!("https://up.example{url}"));
    assert_eq!(visited, 2);

    let html = String::from_utf8(doc.serialize()).unwrap();
    assert!(html.contains(r#"href="https://up.example/1""#));
    assert!(html.contains(r#"src="https://up.example/2""#));
    assert!(html.contains(r#"title="/3""#));
    assert!(html.contains(r#"href="/4""#));
}

#[test]
fn append_html_adds_children_in_order() {
    let mut doc = HtmlDocument::parse_str(PAGE);
    let body = doc.find_first("body").unwrap();
    assert!(doc.append_html(body, r#"<script src="/x.js"></script><script>go();</script>"#));

    let scripts: Vec<_> = doc.descendants("script").collect();
    assert_eq!(scripts.len(), 4);
    assert_eq!(doc.attr(scripts[2], "src"), Some("/x.js"));
    assert_eq!(doc.text(scripts[3]).as_deref(), Some("go();"));
}

#[test]
fn serialize_keeps_doctype_and_node_serialization_drops_it() {
    let doc = HtmlDocument::parse_str(PAGE);
    let full = String::from_utf8(doc.serialize()).unwrap();
    assert!(full.starts_with("<!DOCTYPE html>"));
    let root = String::from_utf8(doc.serialize_node(doc.root())).unwrap();
    assert!(root.starts_with("<html>"));
    assert!(root.ends_with("</html>"));
}

#[test]
fn tag_soup_and_garbage_still_parse() {
    let doc = HtmlDocument::parse_str("<p><b>unclosed <i>tags");
    assert!(doc.find_first("body/p").is_some());

    let doc = HtmlDocument::parse(b"{\"not\": \"html\"}");
    assert!(doc.find_first("head/title").is_none());
    assert_eq!(doc.descendants("script").count(), 0);

    let doc = HtmlDocument::parse(b"");
    assert!(doc.find_first("head/link").is_none());
}
