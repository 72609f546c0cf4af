use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};
use crate::content::Content;


/// Formatting carried by a fragment, e.g. `color: red`.
pub type Attributes = BTreeMap<String, String>;


#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub text: String,
    #[serde(default)]
    pub attributes: Attributes
}


/// Text made of fragments that each carry their own [`Attributes`].
///
/// Fragments are never empty and two neighbours never share the same
/// attributes: pushing merges them. Equality is therefore the equality of
/// the visible text and of the formatting of each of its characters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRichText")]
pub struct RichText {
    fragments: Vec<Fragment>
}

#[derive(Deserialize)]
struct RawRichText {
    #[serde(default)]
    fragments: Vec<Fragment>
}

impl From<RawRichText> for RichText {
    fn from(raw: RawRichText) -> Self {
        raw.fragments.into_iter().collect()
    }
}

impl RichText {
    pub fn new() -> Self {
        RichText::default()
    }

    pub fn plain(text: &str) -> Self {
        RichText::styled(text, Attributes::new())
    }

    pub fn styled(text: &str, attributes: Attributes) -> Self {
        let mut rich = RichText::new();
        rich.push_styled(text, attributes);
        rich
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.fragments.iter()
            .map(|fragment| fragment.text.chars().count())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn push_str(&mut self, text: &str) {
        self.push_styled(text, Attributes::new());
    }

    pub fn push_styled(&mut self, text: &str, attributes: Attributes) {
        self.push_fragment(Fragment { text: text.to_owned(), attributes });
    }

    pub fn push_fragment(&mut self, fragment: Fragment) {
        if fragment.text.is_empty() {
            return;
        }
        match self.fragments.last_mut() {
            Some(last) if last.attributes == fragment.attributes => {
                last.text.push_str(&fragment.text);
            },
            _ => self.fragments.push(fragment)
        }
    }

    /// Attributes of the character at `index`.
    pub fn attributes_at(&self, index: usize) -> Option<&Attributes> {
        let mut start = 0;
        for fragment in &self.fragments {
            let len = fragment.text.chars().count();
            if index < start + len {
                return Some(&fragment.attributes);
            }
            start += len;
        }
        None
    }

    /// Replaces the attributes of the characters in `start..end`.
    pub fn set_attributes(&mut self, start: usize, end: usize, attributes: Attributes) {
        let len = self.len();
        let end = end.min(len);
        if start >= end {
            return;
        }
        let middle = self.slice(start, end).to_string();
        let mut result = self.slice(0, start);
        result.push_styled(&middle, attributes);
        result.append(&self.slice(end, len));
        *self = result;
    }
}

impl fmt::Display for RichText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in &self.fragments {
            f.write_str(&fragment.text)?;
        }
        Ok(())
    }
}

impl From<&str> for RichText {
    fn from(text: &str) -> Self {
        RichText::plain(text)
    }
}

impl FromIterator<Fragment> for RichText {
    fn from_iter<I: IntoIterator<Item = Fragment>>(iter: I) -> Self {
        let mut rich = RichText::new();
        for fragment in iter {
            rich.push_fragment(fragment);
        }
        rich
    }
}


impl Content for RichText {
    fn from_text(text: &str) -> Self {
        RichText::plain(text)
    }

    fn to_text(&self) -> String {
        self.to_string()
    }

    fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    fn units(&self) -> Vec<char> {
        self.fragments.iter()
            .flat_map(|fragment| fragment.text.chars())
            .collect()
    }

    fn slice(&self, start: usize, end: usize) -> Self {
        let mut result = RichText::new();
        if start >= end {
            return result;
        }
        let mut pos = 0;
        for fragment in &self.fragments {
            if pos >= end {
                break;
            }
            let len = fragment.text.chars().count();
            if pos + len > start {
                let from = start.saturating_sub(pos);
                let to = (end - pos).min(len);
                let text = fragment.text.chars()
                    .skip(from)
                    .take(to - from)
                    .collect::<String>();
                result.push_styled(&text, fragment.attributes.clone());
            }
            pos += len;
        }
        result
    }

    fn append(&mut self, other: &Self) {
        for fragment in &other.fragments {
            self.push_fragment(fragment.clone());
        }
    }

    fn push_text(&mut self, text: &str) {
        self.push_str(text);
    }

    // formatting already tells markup from text: no escaping
    fn interpolate(text: &str, key: &Self, _escape: bool) -> Self {
        let attributes = key.attributes_at(0).cloned().unwrap_or_default();
        RichText::styled(text, attributes)
    }

    fn from_rich(rich: &RichText, _escape: bool) -> Self {
        rich.clone()
    }
}
