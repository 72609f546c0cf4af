use std::collections::BTreeSet;
use crate::content::Content;


/// One node of a compiled template. A template is parsed into a tree of
/// these nodes, rooted at [`Node::Root`].
///
/// The tree is never mutated by rendering or serialization, so a single tree
/// can be rendered any number of times, from independent contexts.
#[derive(Clone, Debug, PartialEq)]
pub enum Node<C: Content = String> {
    /// Parse of an empty input.
    Empty,

    /// Top-level node of a template.
    Root(Vec<Node<C>>),

    /// Literal content.
    Text(C),

    /// `{{#key}}...{{/key}}`: rendered once per item if the value is a
    /// sequence, once within the value if it is a record, once as-is for any
    /// other truthy value. Skipped for falsy or missing values.
    Section(String, Vec<Node<C>>),

    /// `{{^key}}...{{/key}}`: rendered once when the value is falsy or
    /// missing, never repeated.
    InvertedSection(String, Vec<Node<C>>),

    /// `{{key}}`, HTML escaped in the plain flavor. In the rich flavor the
    /// key carries the formatting applied to the value.
    Tag(C),

    /// `{{{key}}}` or `{{& key}}`.
    UnescapedTag(C),

    /// `{{> name}}`, looked up by the rendering context.
    Partial(String)
}

impl<C: Content> Node<C> {
    /// Template source of this node, in the default `{{ }}` spelling.
    pub fn to_source(&self) -> String {
        self.to_content().to_text()
    }

    /// Template source of this node as content: in the rich flavor, text and
    /// tag keys keep their formatting.
    pub fn to_content(&self) -> C {
        let mut out = C::default();
        self.write_source(&mut out);
        out
    }

    pub(crate) fn write_source(&self, out: &mut C) {
        match self {
            Node::Empty => {},
            Node::Root(nodes) => write_nodes(nodes, out),
            Node::Text(text) => out.append(text),
            Node::Section(key, nodes) => {
                out.push_text(&format!("{{{{#{key}}}}}"));
                write_nodes(nodes, out);
                out.push_text(&format!("{{{{/{key}}}}}"));
            },
            Node::InvertedSection(key, nodes) => {
                out.push_text(&format!("{{{{^{key}}}}}"));
                write_nodes(nodes, out);
                out.push_text(&format!("{{{{/{key}}}}}"));
            },
            Node::Tag(key) => {
                out.push_text("{{");
                out.append(key);
                out.push_text("}}");
            },
            Node::UnescapedTag(key) => {
                out.push_text("{{{");
                out.append(key);
                out.push_text("}}}");
            },
            Node::Partial(name) => out.push_text(&format!("{{{{> {name}}}}}"))
        }
    }

    /// Whether rendering this node depends on any value or partial.
    pub fn has_keys(&self) -> bool {
        match self {
            Node::Empty | Node::Text(_) => false,
            Node::Root(nodes) => nodes.iter().any(Node::has_keys),
            _ => true
        }
    }

    /// Every key looked up by sections, inverted sections and tags.
    pub fn keys(&self) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        self.add_keys(&mut keys);
        keys
    }

    fn add_keys(&self, keys: &mut BTreeSet<String>) {
        match self {
            Node::Empty | Node::Text(_) | Node::Partial(_) => {},
            Node::Root(nodes) => nodes.iter().for_each(|node| node.add_keys(keys)),
            Node::Section(key, nodes) | Node::InvertedSection(key, nodes) => {
                keys.insert(key.clone());
                nodes.iter().for_each(|node| node.add_keys(keys));
            },
            Node::Tag(key) | Node::UnescapedTag(key) => {
                keys.insert(key.to_text());
            }
        }
    }
}

pub(crate) fn write_nodes<C: Content>(nodes: &[Node<C>], out: &mut C) {
    for node in nodes {
        node.write_source(out);
    }
}
