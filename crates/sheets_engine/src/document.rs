use ego_tree::{NodeId, NodeRef, Tree};
use scraper::node::Node;
use scraper::{ElementRef, Html};
use sheets_logging::sheets_warn;

use crate::decode::decode_html;

/// Attributes treated as URL-valued by [`HtmlDocument::rewrite_links`].
pub const URL_ATTRIBUTES: &[&str] = &[
    "href",
    "src",
    "action",
    "formaction",
    "background",
    "cite",
    "poster",
    "longdesc",
    "codebase",
    "data",
];

/// Parsed, mutable HTML document.
///
/// Nodes are addressed by [`NodeId`]; look ups return ids so callers can
/// mutate between queries. Parsing is tag-soup tolerant and never fails, so
/// an empty or non-HTML body simply has no matching nodes.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(bytes: &[u8]) -> Self {
        let decoded = decode_html(bytes);
        if decoded.lossy {
            sheets_warn!("upstream document is not valid UTF-8; decoded lossily");
        }
        Self::parse_str(&decoded.html)
    }

    pub fn parse_str(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// The `<html>` element.
    pub fn root(&self) -> NodeId {
        self.html.root_element().id()
    }

    /// First element matching a child path such as `head/title`, starting
    /// below the `<html>` element.
    pub fn find_first(&self, path: &str) -> Option<NodeId> {
        self.walk(path).first().map(|element| element.id())
    }

    /// Every element matching a child path, in document order.
    pub fn find_all(&self, path: &str) -> Vec<NodeId> {
        self.walk(path).iter().map(|element| element.id()).collect()
    }

    /// All elements named `tag` anywhere in the document, in document order.
    pub fn descendants<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(move |element| element.value().name().eq_ignore_ascii_case(tag))
            .map(|element| element.id())
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.value().attr(name)
    }

    /// Replaces the value of an attribute the element already carries.
    /// Returns false when the node or attribute does not exist.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) -> bool {
        let Some(mut node) = self.html.tree.get_mut(node) else {
            return false;
        };
        let Node::Element(element) = node.value() else {
            return false;
        };
        for (key, current) in element.attrs.iter_mut() {
            if &*key.local == name {
                *current = value.into();
                return true;
            }
        }
        false
    }

    /// Concatenated text content of an element.
    pub fn text(&self, node: NodeId) -> Option<String> {
        Some(self.element(node)?.text().collect())
    }

    /// Applies `rewrite` to each direct text child of `node`.
    pub fn rewrite_text(&mut self, node: NodeId, mut rewrite: impl FnMut(&str) -> String) {
        let Some(parent) = self.html.tree.get(node) else {
            return;
        };
        let text_nodes: Vec<NodeId> = parent
            .children()
            .filter(|child| child.value().is_text())
            .map(|child| child.id())
            .collect();
        for id in text_nodes {
            if let Some(mut child) = self.html.tree.get_mut(id) {
                if let Node::Text(text) = child.value() {
                    let rewritten = rewrite(&*text.text);
                    text.text = rewritten.as_str().into();
                }
            }
        }
    }

    /// Applies `rewrite` to every URL-valued attribute on `node` and its
    /// descendants. Returns the number of attributes visited.
    pub fn rewrite_links(&mut self, node: NodeId, mut rewrite: impl FnMut(&str) -> String) -> usize {
        let Some(start) = self.html.tree.get(node) else {
            return 0;
        };
        let elements: Vec<NodeId> = start
            .descendants()
            .filter(|descendant| descendant.value().is_element())
            .map(|descendant| descendant.id())
            .collect();

        let mut rewritten = 0;
        for id in elements {
            let Some(mut current) = self.html.tree.get_mut(id) else {
                continue;
            };
            let Node::Element(element) = current.value() else {
                continue;
            };
            for (key, value) in element.attrs.iter_mut() {
                if URL_ATTRIBUTES.iter().any(|attr| *attr == &*key.local) {
                    let next = rewrite(&**value);
                    *value = next.as_str().into();
                    rewritten += 1;
                }
            }
        }
        rewritten
    }

    /// Parses `markup` as a body fragment and appends its top-level nodes to
    /// `parent`, in order. Returns false when `parent` does not exist.
    pub fn append_html(&mut self, parent: NodeId, markup: &str) -> bool {
        if self.html.tree.get(parent).is_none() {
            return false;
        }
        let fragment = Html::parse_fragment(markup);
        for node in fragment.root_element().children() {
            graft(&mut self.html.tree, parent, node);
        }
        true
    }

    /// Full document, including the doctype if upstream sent one.
    pub fn serialize(&self) -> Vec<u8> {
        self.html.html().into_bytes()
    }

    /// Outer HTML of a single element.
    pub fn serialize_node(&self, node: NodeId) -> Vec<u8> {
        self.element(node)
            .map(|element| element.html().into_bytes())
            .unwrap_or_default()
    }

    fn element(&self, node: NodeId) -> Option<ElementRef<'_>> {
        self.html.tree.get(node).and_then(ElementRef::wrap)
    }

    fn walk(&self, path: &str) -> Vec<ElementRef<'_>> {
        let mut current = vec![self.html.root_element()];
        for segment in path.split('/').filter(|segment| !segment.is_empty()) {
            let next: Vec<ElementRef<'_>> = current
                .iter()
                .flat_map(|element| element.children().filter_map(ElementRef::wrap))
                .filter(|child| child.value().name().eq_ignore_ascii_case(segment))
                .collect();
            if next.is_empty() {
                return next;
            }
            current = next;
        }
        current
    }
}

fn graft(tree: &mut Tree<Node>, parent: NodeId, source: NodeRef<'_, Node>) {
    let Some(mut parent) = tree.get_mut(parent) else {
        return;
    };
    let id = parent.append(source.value().clone()).id();
    for child in source.children() {
        graft(tree, id, child);
    }
}

#[cfg(test)]
mod tests {
    use super::HtmlDocument;

    #[test]
    fn walk_of_empty_path_is_root() {
        let doc = HtmlDocument::parse_str("<p>x</p>");
        assert_eq!(doc.find_first(""), Some(doc.root()));
    }

    #[test]
    fn set_attr_ignores_missing_attribute() {
        let mut doc = HtmlDocument::parse_str(r#"<html><head><script></script></head></html>"#);
        let script = doc.descendants("script").next().unwrap();
        assert!(!doc.set_attr(script, "src", "/x.js"));
        assert_eq!(doc.attr(script, "src"), None);
    }
}
