//! Inline styles and per-character style sets

use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A character-range-scoped visual attribute
///
/// Styles compare by their tag, so `Other("BOLD")` equals `Bold`.
#[derive(Debug, Clone)]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
    Code,
    Strikethrough,
    /// Custom red text color
    Red,
    /// Unrecognised tag read from storage
    Other(String),
}

impl InlineStyle {
    /// Parse a style tag as stored in the raw document format
    pub fn from_tag(tag: &str) -> Self {
        KNOWN_STYLES
            .iter()
            .find(|style| style.tag() == tag)
            .cloned()
            .unwrap_or_else(|| InlineStyle::Other(tag.to_string()))
    }

    /// The style tag for the raw document format
    pub fn tag(&self) -> &str {
        match self {
            InlineStyle::Bold => "BOLD",
            InlineStyle::Italic => "ITALIC",
            InlineStyle::Underline => "UNDERLINE",
            InlineStyle::Code => "CODE",
            InlineStyle::Strikethrough => "STRIKETHROUGH",
            InlineStyle::Red => "RED",
            InlineStyle::Other(tag) => tag,
        }
    }

    /// Position among the known styles; unknown tags sort last
    fn rank(&self) -> usize {
        let tag = self.tag();
        KNOWN_STYLES
            .iter()
            .position(|style| style.tag() == tag)
            .unwrap_or(KNOWN_STYLES.len())
    }
}

const KNOWN_STYLES: [InlineStyle; 6] = [
    InlineStyle::Bold,
    InlineStyle::Italic,
    InlineStyle::Underline,
    InlineStyle::Code,
    InlineStyle::Strikethrough,
    InlineStyle::Red,
];

impl PartialEq for InlineStyle {
    fn eq(&self, other: &Self) -> bool {
        self.tag() == other.tag()
    }
}

impl Eq for InlineStyle {}

impl Ord for InlineStyle {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank()
            .cmp(&other.rank())
            .then_with(|| self.tag().cmp(other.tag()))
    }
}

impl PartialOrd for InlineStyle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for InlineStyle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag().hash(state);
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Sorted, duplicate-free set of inline styles
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StyleSet(SmallVec<[InlineStyle; 2]>);

impl StyleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, style: &InlineStyle) -> bool {
        self.0.binary_search(style).is_ok()
    }

    /// Add a style; returns false if it was already present
    pub fn insert(&mut self, style: InlineStyle) -> bool {
        match self.0.binary_search(&style) {
            Ok(_) => false,
            Err(pos) => {
                self.0.insert(pos, style);
                true
            }
        }
    }

    /// Remove a style; returns false if it was absent
    pub fn remove(&mut self, style: &InlineStyle) -> bool {
        match self.0.binary_search(style) {
            Ok(pos) => {
                self.0.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Copy of this set with `style` flipped
    pub fn toggled(&self, style: &InlineStyle) -> Self {
        let mut next = self.clone();
        if !next.remove(style) {
            next.insert(style.clone());
        }
        next
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InlineStyle> {
        self.0.iter()
    }
}

impl FromIterator<InlineStyle> for StyleSet {
    fn from_iter<I: IntoIterator<Item = InlineStyle>>(iter: I) -> Self {
        let mut set = StyleSet::new();
        for style in iter {
            set.insert(style);
        }
        set
    }
}
