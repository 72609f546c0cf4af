use std::fmt::Debug;
use crate::rich::RichText;


/// The output model a template is written in and rendered to.
///
/// Both flavors share the scanner, the tree and the renderer; only the
/// content primitive differs. [`String`] is the plain flavor, [`RichText`]
/// carries formatting on every fragment.
///
/// Scanning works on [`units`](Content::units), a snapshot of the
/// characters, and cuts tokens back out with [`slice`](Content::slice) so
/// that the rich flavor keeps the formatting of every cut.
pub trait Content: Clone + Default + PartialEq + Debug + 'static {
    fn from_text(text: &str) -> Self;

    fn to_text(&self) -> String;

    fn is_empty(&self) -> bool;

    fn units(&self) -> Vec<char>;

    /// Sub-content between two unit indices.
    fn slice(&self, start: usize, end: usize) -> Self;

    fn append(&mut self, other: &Self);

    fn push_text(&mut self, text: &str);

    fn concat<'c, I>(parts: I) -> Self
    where
        I: IntoIterator<Item = &'c Self>,
    {
        let mut result = Self::default();
        for part in parts {
            result.append(part);
        }
        result
    }

    /// Output of a tag whose value renders as `text`.
    fn interpolate(text: &str, key: &Self, escape: bool) -> Self;

    /// Output of a tag whose value is already rich text.
    fn from_rich(rich: &RichText, escape: bool) -> Self;
}


impl Content for String {
    fn from_text(text: &str) -> Self {
        text.to_owned()
    }

    fn to_text(&self) -> String {
        self.clone()
    }

    fn is_empty(&self) -> bool {
        str::is_empty(self)
    }

    fn units(&self) -> Vec<char> {
        self.chars().collect()
    }

    fn slice(&self, start: usize, end: usize) -> Self {
        self.chars()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect()
    }

    fn append(&mut self, other: &Self) {
        self.push_str(other);
    }

    fn push_text(&mut self, text: &str) {
        self.push_str(text);
    }

    fn interpolate(text: &str, _key: &Self, escape: bool) -> Self {
        if escape {
            html_escape(text)
        } else {
            text.to_owned()
        }
    }

    fn from_rich(rich: &RichText, escape: bool) -> Self {
        Self::interpolate(&rich.to_string(), &String::new(), escape)
    }
}


pub(crate) fn html_escape(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c)
        }
    }
    result
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_html_specials() {
        assert_eq!(html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;");
    }

    #[test]
    fn slices_by_character() {
        let text = String::from("héllo");
        assert_eq!(text.slice(1, 4), "éll");
        assert_eq!(text.slice(4, 4), "");
    }

    #[test]
    fn plain_interpolation() {
        let key = String::from("name");
        assert_eq!(String::interpolate("<b>", &key, true), "&lt;b&gt;");
        assert_eq!(String::interpolate("<b>", &key, false), "<b>");
    }
}
