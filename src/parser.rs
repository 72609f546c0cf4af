use log::warn;
use serde::{Deserialize, Serialize};
use crate::content::Content;
use crate::error::{Error, Result};
use crate::node::Node;
use crate::reader::{Reader, Token};


/// Parser settings.
///
/// ```
/// use mustache_rich::Options;
///
/// let options = Options::from_yaml("open_delimiter: '<'\nclose_delimiter: '>'").unwrap();
/// assert_eq!(options.open_delimiter, '<');
/// assert!(!options.strict);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Doubled to open a tag, tripled to open an unescaped tag.
    pub open_delimiter: char,
    pub close_delimiter: char,
    /// Reject unbalanced sections instead of logging them.
    pub strict: bool
}

impl Default for Options {
    fn default() -> Self {
        Options {
            open_delimiter: '{',
            close_delimiter: '}',
            strict: false
        }
    }
}

impl Options {
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}


/// Builds template trees. A parser only holds settings; every call to
/// [`Parser::parse`] runs its own scan session.
#[derive(Clone, Debug, Default)]
pub struct Parser {
    options: Options
}

impl Parser {
    pub fn new() -> Self {
        Parser::default()
    }

    pub fn with_options(options: Options) -> Self {
        Parser { options }
    }

    pub fn open_delimiter(mut self, c: char) -> Self {
        self.options.open_delimiter = c;
        self
    }

    pub fn close_delimiter(mut self, c: char) -> Self {
        self.options.close_delimiter = c;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Parses `input` into a [`Node::Root`], or [`Node::Empty`] for empty
    /// input.
    ///
    /// Unless strict, parsing never fails: a closing tag naming another
    /// section is logged and closes the current section anyway.
    pub fn parse<C: Content>(&self, input: &C) -> Result<Node<C>> {
        if input.is_empty() {
            return Ok(Node::Empty);
        }
        let mut reader = Reader::new(
            input, self.options.open_delimiter, self.options.close_delimiter
        );
        let nodes = self.parse_nodes(&mut reader, None)?;
        Ok(Node::Root(nodes))
    }

    fn parse_nodes<C: Content>(
        &self, reader: &mut Reader<C>, section: Option<&str>
    ) -> Result<Vec<Node<C>>> {
        let mut nodes = Vec::new();
        loop {
            let token = match reader.pop_front() {
                Some(token) => token,
                None => {
                    if let (Some(name), true) = (section, self.options.strict) {
                        return Err(Error::UnclosedSection { name: name.to_owned() });
                    }
                    break;
                }
            };
            match token {
                Token::Text(text) => nodes.push(Node::Text(text)),
                Token::Tag(key) => nodes.push(Node::Tag(key)),
                Token::UnescapedTag(key) => nodes.push(Node::UnescapedTag(key)),
                Token::Partial(name) => nodes.push(Node::Partial(name)),
                Token::SectionStart(name) => {
                    let children = self.parse_nodes(reader, Some(&name))?;
                    nodes.push(Node::Section(name, children));
                },
                Token::InvertedSectionStart(name) => {
                    let children = self.parse_nodes(reader, Some(&name))?;
                    nodes.push(Node::InvertedSection(name, children));
                },
                Token::SectionEnd(name) => {
                    if !name.is_empty() && section != Some(name.as_str()) {
                        if self.options.strict {
                            return Err(Error::MalformedTemplate {
                                expected: section.map(str::to_owned),
                                found: name
                            });
                        }
                        warn!(
                            "section tags not balanced: {} expected {}",
                            name, section.unwrap_or("no open section")
                        );
                    }
                    if section.is_some() {
                        break;
                    }
                    // nothing to close at top level
                }
            }
        }
        Ok(nodes)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn text(s: &str) -> Node {
        Node::Text(s.to_owned())
    }

    fn parse(input: &str) -> Node {
        Parser::new().parse(&input.to_owned()).unwrap()
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse(""), Node::Empty);
    }

    #[test]
    fn nested_sections() {
        assert_eq!(
            parse("{{#a}}x{{^b}}{{c}}{{/b}}{{/a}}y"),
            Node::Root(vec![
                Node::Section("a".to_owned(), vec![
                    text("x"),
                    Node::InvertedSection("b".to_owned(), vec![
                        Node::Tag("c".to_owned())
                    ])
                ]),
                text("y")
            ])
        );
    }

    #[test]
    fn mismatched_end_closes_current_section() {
        assert_eq!(
            parse("{{#a}}x{{/b}}y"),
            Node::Root(vec![
                Node::Section("a".to_owned(), vec![text("x")]),
                text("y")
            ])
        );
    }

    #[test]
    fn nameless_end_closes_current_section() {
        assert_eq!(
            parse("{{#a}}x{{/}}"),
            Node::Root(vec![
                Node::Section("a".to_owned(), vec![text("x")])
            ])
        );
    }

    #[test]
    fn stray_end_at_top_level_is_skipped() {
        assert_eq!(
            parse("x{{/a}}y"),
            Node::Root(vec![text("x"), text("y")])
        );
    }

    #[test]
    fn end_of_input_closes_open_sections() {
        assert_eq!(
            parse("{{#a}}{{#b}}x"),
            Node::Root(vec![
                Node::Section("a".to_owned(), vec![
                    Node::Section("b".to_owned(), vec![text("x")])
                ])
            ])
        );
    }

    #[test]
    fn strict_rejects_mismatch() {
        let result = Parser::new().strict(true).parse(&"{{#a}}x{{/b}}".to_owned());
        match result {
            Err(Error::MalformedTemplate { expected, found }) => {
                assert_eq!(expected.as_deref(), Some("a"));
                assert_eq!(found, "b");
            },
            other => panic!("unexpected {:?}", other)
        }
    }

    #[test]
    fn strict_rejects_unclosed_section() {
        let result = Parser::new().strict(true).parse(&"{{#a}}x".to_owned());
        assert!(matches!(result, Err(Error::UnclosedSection { name }) if name == "a"));
    }

    #[test]
    fn strict_accepts_balanced() {
        let result = Parser::new().strict(true).parse(&"{{#a}}{{/a}}".to_owned());
        assert!(result.is_ok());
    }

    #[test]
    fn custom_delimiters() {
        let parser = Parser::new().open_delimiter('<').close_delimiter('>');
        assert_eq!(
            parser.parse(&"<<#a>><<b>><</a>>".to_owned()).unwrap(),
            Node::Root(vec![
                Node::Section("a".to_owned(), vec![Node::Tag("b".to_owned())])
            ])
        );
    }

    #[test]
    fn options_defaults_from_yaml() {
        let options = Options::from_yaml("strict: true").unwrap();
        assert_eq!(options, Options { strict: true, ..Options::default() });
    }
}
