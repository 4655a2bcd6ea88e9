use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html};

/// Elements whose text is never rendered.
const HIDDEN_TEXT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Parsed HTML tree. Parsing is best-effort and never fails.
pub struct ParsedDocument {
    html: Html,
}

impl ParsedDocument {
    pub fn parse(content: &str) -> Self {
        Self {
            html: Html::parse_document(content),
        }
    }

    /// Elements named `tag` (ASCII case-insensitive), depth-first in document order.
    pub fn elements<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(move |element| element.value().name().eq_ignore_ascii_case(tag))
    }

    /// Concatenated text of every visible text node, in document order.
    pub fn inner_text(&self) -> String {
        let mut text = String::new();
        collect_text(self.html.tree.root(), &mut text);
        text
    }
}

/// Attribute value, or `default` when the attribute is absent.
pub fn attr_or<'a>(element: &ElementRef<'a>, name: &str, default: &'a str) -> &'a str {
    element.value().attr(name).unwrap_or(default)
}

fn collect_text(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => out.push_str(text),
        Node::Element(element)
            if HIDDEN_TEXT_TAGS
                .iter()
                .any(|tag| element.name().eq_ignore_ascii_case(tag)) => {}
        _ => {
            for child in node.children() {
                collect_text(child, out);
            }
        }
    }
}
