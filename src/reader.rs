use crate::content::Content;


const SECTION: char = '#';
const INVERTED_SECTION: char = '^';
const END_SECTION: char = '/';
const PARTIAL: char = '>';
const UNESCAPED: char = '&';


/// One scan session over a template.
///
/// The reader works on an immutable snapshot of the input units and cuts
/// each token back out of the input, so rich input keeps its formatting.
pub(crate) struct Reader<'a, C: Content> {
    input: &'a C,
    units: Vec<char>,
    open_delimiter: char,
    close_delimiter: char,
    pos: usize
}

impl<'a, C: Content> Reader<'a, C> {
    pub(crate) fn new(input: &'a C, open_delimiter: char, close_delimiter: char) -> Self {
        Reader {
            input,
            units: input.units(),
            open_delimiter,
            close_delimiter,
            pos: 0
        }
    }

    pub(crate) fn pop_front(&mut self) -> Option<Token<C>> {
        if self.pos >= self.units.len() {
            None
        } else if self.at_open() {
            Some(self.read_tag())
        } else {
            Some(self.read_text())
        }
    }

    fn la(&self, offset: usize) -> Option<char> {
        self.units.get(self.pos + offset).copied()
    }

    fn at_open(&self) -> bool {
        self.la(0) == Some(self.open_delimiter) && self.la(1) == Some(self.open_delimiter)
    }

    fn at_close(&self, is_unescaped: bool) -> bool {
        let close = Some(self.close_delimiter);
        self.la(0) == close && self.la(1) == close && (!is_unescaped || self.la(2) == close)
    }

    fn read_text(&mut self) -> Token<C> {
        let start = self.pos;
        while self.pos < self.units.len() && !self.at_open() {
            self.pos += 1;
        }
        Token::Text(self.input.slice(start, self.pos))
    }

    fn read_tag(&mut self) -> Token<C> {
        let start = self.pos;
        let is_unescaped = self.la(2) == Some(self.open_delimiter);
        self.pos += if is_unescaped { 3 } else { 2 };
        let content_start = self.pos;
        while self.pos < self.units.len() {
            if self.at_close(is_unescaped) {
                let content_end = self.pos;
                self.pos += if is_unescaped { 3 } else { 2 };
                return if is_unescaped {
                    Token::UnescapedTag(self.input.slice(content_start, content_end))
                } else {
                    self.classify(start, content_start, content_end)
                };
            }
            self.pos += 1;
        }
        // unterminated tag degrades to text
        Token::Text(self.input.slice(start, self.pos))
    }

    fn classify(&self, start: usize, content_start: usize, content_end: usize) -> Token<C> {
        let name = |from: usize| self.text(from, content_end);
        let content = &self.units[..content_end];
        match content.get(content_start).copied() {
            Some(SECTION) | Some(INVERTED_SECTION) if content_end == content_start + 1 => {
                // a section needs a name
                Token::Text(self.input.slice(start, self.pos))
            },
            Some(SECTION) => Token::SectionStart(name(content_start + 1)),
            Some(INVERTED_SECTION) => Token::InvertedSectionStart(name(content_start + 1)),
            Some(END_SECTION) => Token::SectionEnd(name(content_start + 1)),
            Some(PARTIAL) => {
                let mut from = content_start + 1;
                while from < content_end && self.units[from] == ' ' {
                    from += 1;
                }
                Token::Partial(name(from))
            },
            Some(UNESCAPED) if content.get(content_start + 1) == Some(&' ') => {
                Token::UnescapedTag(self.input.slice(content_start + 2, content_end))
            },
            _ => Token::Tag(self.input.slice(content_start, content_end))
        }
    }

    fn text(&self, start: usize, end: usize) -> String {
        self.units[start.min(end)..end].iter().collect()
    }
}


#[derive(PartialEq, Debug)]
pub(crate) enum Token<C> {
    Text(C),
    Tag(C),
    UnescapedTag(C),
    SectionStart(String),
    InvertedSectionStart(String),
    SectionEnd(String),
    Partial(String)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::rich::{Attributes, RichText};

    fn text(s: &str) -> Token<String> {
        Token::Text(s.to_owned())
    }

    fn tag(s: &str) -> Token<String> {
        Token::Tag(s.to_owned())
    }

    fn unescaped(s: &str) -> Token<String> {
        Token::UnescapedTag(s.to_owned())
    }

    #[test]
    fn text_only() {
        expect_sequence(
            " 123456 ",
            vec![
                text(" 123456 ")
            ]
        );
    }

    #[test]
    fn single_braces_are_text() {
        expect_sequence(
            "a { b } c}",
            vec![
                text("a { b } c}")
            ]
        );
    }

    #[test]
    fn value_with_escape() {
        expect_sequence(
            "hello {{ v }}!",
            vec![
                text("hello "),
                tag(" v "),
                text("!")
            ]
        );
    }

    #[test]
    fn value_without_escape() {
        expect_sequence(
            "{{{v}}}{{& w}}",
            vec![
                unescaped("v"),
                unescaped("w")
            ]
        );
    }

    #[test]
    fn ampersand_needs_a_space() {
        expect_sequence(
            "{{&w}}",
            vec![
                tag("&w")
            ]
        );
    }

    #[test]
    fn sections() {
        expect_sequence(
            "{{#a}}x{{^b}}{{/b}}{{/a}}",
            vec![
                Token::SectionStart("a".to_owned()),
                text("x"),
                Token::InvertedSectionStart("b".to_owned()),
                Token::SectionEnd("b".to_owned()),
                Token::SectionEnd("a".to_owned())
            ]
        );
    }

    #[test]
    fn nameless_section_is_text() {
        expect_sequence(
            "{{#}}",
            vec![
                text("{{#}}")
            ]
        );
    }

    #[test]
    fn partial_name_is_trimmed() {
        expect_sequence(
            "{{>     user}}{{>x}}",
            vec![
                Token::Partial("user".to_owned()),
                Token::Partial("x".to_owned())
            ]
        );
    }

    #[test]
    fn unterminated_tag() {
        expect_sequence(
            "abc {{open",
            vec![
                text("abc "),
                text("{{open")
            ]
        );
    }

    #[test]
    fn unterminated_unescaped_tag() {
        expect_sequence(
            "{{{open}}",
            vec![
                text("{{{open}}")
            ]
        );
    }

    #[test]
    fn custom_delimiters() {
        let input = "<<name>> {{name}} <<<raw>>> <<#s>><</s>>".to_owned();
        let mut reader = Reader::new(&input, '<', '>');
        let mut tokens = vec![];
        while let Some(token) = reader.pop_front() {
            tokens.push(token);
        }
        assert_eq!(tokens, vec![
            tag("name"),
            text(" {{name}} "),
            unescaped("raw"),
            text(" "),
            Token::SectionStart("s".to_owned()),
            Token::SectionEnd("s".to_owned())
        ]);
    }

    #[test]
    fn empty_tag_has_no_sigil() {
        let input = "<<>>".to_owned();
        let mut reader = Reader::new(&input, '<', '>');
        assert_eq!(reader.pop_front(), Some(tag("")));
        assert_eq!(reader.pop_front(), None);
        expect_sequence("{{}}", vec![tag("")]);
    }

    #[test]
    fn rich_tag_keeps_formatting() {
        let red = Attributes::from([("color".to_owned(), "red".to_owned())]);
        let mut input = RichText::plain("Hi {{name}}");
        input.set_attributes(5, 9, red.clone());
        let mut reader = Reader::new(&input, '{', '}');
        assert_eq!(reader.pop_front(), Some(Token::Text(RichText::plain("Hi "))));
        assert_eq!(reader.pop_front(), Some(Token::Tag(RichText::styled("name", red))));
        assert_eq!(reader.pop_front(), None);
    }


    fn expect_sequence(input: &str, tokens: Vec<Token<String>>) {
        let input = input.to_owned();
        let mut reader = Reader::new(&input, '{', '}');
        let mut expected = tokens.into_iter();
        loop {
            let token = reader.pop_front();
            assert_eq!(token, expected.next());
            if token.is_none() {
                break;
            }
        }
    }
}
