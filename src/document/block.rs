//! Block-level elements: kind tags and the block itself

use super::key::BlockKey;
use super::style::StyleSet;
use std::hash::{Hash, Hasher};
use unicode_segmentation::UnicodeSegmentation;

/// The kind of block element
///
/// Kinds compare by their type tag: `Heading { level: 0 }` is a
/// `header-one` and equals `Other("header-one")`.
#[derive(Debug, Clone, Default)]
pub enum BlockKind {
    /// Plain paragraph
    #[default]
    Unstyled,
    /// Heading with level (1-6)
    Heading { level: u8 },
    Blockquote,
    CodeBlock,
    UnorderedListItem,
    OrderedListItem,
    /// Any type tag we do not interpret, kept so it survives a save
    Other(String),
}

const HEADING_TAGS: [&str; 6] = [
    "header-one",
    "header-two",
    "header-three",
    "header-four",
    "header-five",
    "header-six",
];

impl BlockKind {
    /// The block kind the `#` shortcut produces
    pub const HEADER_ONE: BlockKind = BlockKind::Heading { level: 1 };

    /// Create a heading, clamping the level to 1-6
    pub fn heading(level: u8) -> Self {
        BlockKind::Heading {
            level: level.clamp(1, 6),
        }
    }

    /// Parse a type tag as stored in the raw document format
    pub fn from_tag(tag: &str) -> Self {
        if let Some(pos) = HEADING_TAGS.iter().position(|t| *t == tag) {
            return BlockKind::Heading {
                level: pos as u8 + 1,
            };
        }
        match tag {
            "unstyled" | "paragraph" => BlockKind::Unstyled,
            "blockquote" => BlockKind::Blockquote,
            "code-block" => BlockKind::CodeBlock,
            "unordered-list-item" => BlockKind::UnorderedListItem,
            "ordered-list-item" => BlockKind::OrderedListItem,
            other => BlockKind::Other(other.to_string()),
        }
    }

    /// The type tag for the raw document format
    pub fn tag(&self) -> &str {
        match self {
            BlockKind::Unstyled => "unstyled",
            BlockKind::Heading { level } => {
                HEADING_TAGS[(*level).clamp(1, 6) as usize - 1]
            }
            BlockKind::Blockquote => "blockquote",
            BlockKind::CodeBlock => "code-block",
            BlockKind::UnorderedListItem => "unordered-list-item",
            BlockKind::OrderedListItem => "ordered-list-item",
            BlockKind::Other(tag) => tag,
        }
    }
}

impl PartialEq for BlockKind {
    fn eq(&self, other: &Self) -> bool {
        self.tag() == other.tag()
    }
}

impl Eq for BlockKind {}

impl Hash for BlockKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag().hash(state);
    }
}

/// A paragraph-level unit: text plus one style set per character
#[derive(Debug, Clone, PartialEq)]
pub struct ContentBlock {
    pub key: BlockKey,
    pub kind: BlockKind,
    /// Nesting depth (lists)
    pub depth: u32,
    text: String,
    /// Invariant: one entry per `char` of `text`
    styles: Vec<StyleSet>,
    /// Arbitrary per-block metadata carried through persistence
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl ContentBlock {
    /// Create an empty unstyled block
    pub fn empty(key: BlockKey) -> Self {
        Self {
            key,
            kind: BlockKind::Unstyled,
            depth: 0,
            text: String::new(),
            styles: Vec::new(),
            data: serde_json::Map::new(),
        }
    }

    /// Create a block with unstyled text
    pub fn with_text(key: BlockKey, kind: BlockKind, text: &str) -> Self {
        Self {
            key,
            kind,
            depth: 0,
            text: text.to_string(),
            styles: vec![StyleSet::new(); text.chars().count()],
            data: serde_json::Map::new(),
        }
    }

    /// Create a block from text and matching per-character styles
    pub(crate) fn from_parts(
        key: BlockKey,
        kind: BlockKind,
        text: String,
        styles: Vec<StyleSet>,
    ) -> Self {
        debug_assert_eq!(text.chars().count(), styles.len());
        Self {
            key,
            kind,
            depth: 0,
            text,
            styles,
            data: serde_json::Map::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Per-character styles
    pub fn styles(&self) -> &[StyleSet] {
        &self.styles
    }

    /// Style of the character at `offset`, empty past the end
    pub fn style_at(&self, offset: usize) -> StyleSet {
        self.styles.get(offset).cloned().unwrap_or_default()
    }

    pub(crate) fn style_at_mut(&mut self, offset: usize) -> Option<&mut StyleSet> {
        self.styles.get_mut(offset)
    }

    /// Convert a character offset to a byte index into `text`
    pub fn byte_index(&self, offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(offset)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }

    /// Text between two character offsets
    pub fn slice(&self, start: usize, end: usize) -> &str {
        let end = end.min(self.len());
        let start = start.min(end);
        &self.text[self.byte_index(start)..self.byte_index(end)]
    }

    /// Insert text at a character offset with a single style
    pub(crate) fn insert(&mut self, offset: usize, text: &str, style: &StyleSet) {
        let offset = offset.min(self.len());
        let byte = self.byte_index(offset);
        self.text.insert_str(byte, text);
        let added = text.chars().count();
        self.styles
            .splice(offset..offset, std::iter::repeat(style.clone()).take(added));
    }

    /// Remove a character range
    pub(crate) fn remove(&mut self, start: usize, end: usize) {
        let end = end.min(self.len());
        let start = start.min(end);
        let (b_start, b_end) = (self.byte_index(start), self.byte_index(end));
        self.text.replace_range(b_start..b_end, "");
        self.styles.drain(start..end);
    }

    /// Split off everything from `offset`, returning the tail
    pub(crate) fn split_off(&mut self, offset: usize) -> (String, Vec<StyleSet>) {
        let offset = offset.min(self.len());
        let byte = self.byte_index(offset);
        let tail_text = self.text.split_off(byte);
        let tail_styles = self.styles.split_off(offset);
        (tail_text, tail_styles)
    }

    /// Append text with per-character styles
    pub(crate) fn append(&mut self, text: &str, styles: Vec<StyleSet>) {
        debug_assert_eq!(text.chars().count(), styles.len());
        self.text.push_str(text);
        self.styles.extend(styles);
    }

    /// Offset of the grapheme boundary before `offset`
    pub fn prev_grapheme_offset(&self, offset: usize) -> usize {
        let byte = self.byte_index(offset);
        let prev_byte = self
            .text
            .grapheme_indices(true)
            .map(|(idx, _)| idx)
            .take_while(|idx| *idx < byte)
            .last()
            .unwrap_or(0);
        self.text[..prev_byte].chars().count()
    }

    /// Offset of the grapheme boundary after `offset`
    pub fn next_grapheme_offset(&self, offset: usize) -> usize {
        let byte = self.byte_index(offset);
        for (idx, grapheme) in self.text.grapheme_indices(true) {
            if idx >= byte {
                return offset + grapheme.chars().count();
            }
        }
        self.len()
    }

    /// Start of the word before `offset`, skipping whitespace in between
    pub fn prev_word_offset(&self, offset: usize) -> usize {
        let byte = self.byte_index(offset);
        let target = self
            .text
            .split_word_bound_indices()
            .filter(|(idx, _)| *idx < byte)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .find(|(_, word)| !word.trim().is_empty())
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        self.text[..target].chars().count()
    }

    /// End of the word after `offset`, skipping whitespace in between
    pub fn next_word_offset(&self, offset: usize) -> usize {
        let byte = self.byte_index(offset);
        self.text
            .split_word_bound_indices()
            .filter(|(idx, word)| idx + word.len() > byte)
            .find(|(_, word)| !word.trim().is_empty())
            .map(|(idx, word)| self.text[..idx + word.len()].chars().count())
            .unwrap_or(self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::InlineStyle;

    fn block(text: &str) -> ContentBlock {
        ContentBlock::with_text(BlockKey::from("a"), BlockKind::Unstyled, text)
    }

    #[test]
    fn test_block_kind_tags() {
        assert_eq!(BlockKind::from_tag("header-one"), BlockKind::HEADER_ONE);
        assert_eq!(BlockKind::from_tag("header-six"), BlockKind::heading(6));
        assert_eq!(BlockKind::HEADER_ONE.tag(), "header-one");
        assert_eq!(BlockKind::from_tag("unstyled"), BlockKind::Unstyled);
        assert_eq!(
            BlockKind::from_tag("atomic"),
            BlockKind::Other("atomic".to_string())
        );
        assert_eq!(BlockKind::from_tag("atomic").tag(), "atomic");
    }

    #[test]
    fn test_kinds_compare_by_tag() {
        assert_eq!(BlockKind::heading(9).tag(), "header-six");
        assert_eq!(BlockKind::Heading { level: 0 }, BlockKind::HEADER_ONE);
        assert_eq!(
            BlockKind::Other("header-one".to_string()),
            BlockKind::HEADER_ONE
        );
        assert_ne!(BlockKind::heading(2), BlockKind::HEADER_ONE);
        assert_ne!(BlockKind::Unstyled, BlockKind::Other("atomic".to_string()));
    }

    #[test]
    fn test_insert_and_remove_keep_styles_aligned() {
        let mut b = block("héllo");
        let bold = StyleSet::from_iter([InlineStyle::Bold]);
        b.insert(1, "XY", &bold);
        assert_eq!(b.text(), "hXYéllo");
        assert_eq!(b.len(), 7);
        assert!(b.style_at(1).contains(&InlineStyle::Bold));
        assert!(b.style_at(3).is_empty());

        b.remove(1, 3);
        assert_eq!(b.text(), "héllo");
        assert_eq!(b.styles().len(), 5);
    }

    #[test]
    fn test_split_and_append() {
        let mut b = block("hello world");
        let (tail, styles) = b.split_off(5);
        assert_eq!(b.text(), "hello");
        assert_eq!(tail, " world");
        b.append(&tail, styles);
        assert_eq!(b.text(), "hello world");
        assert_eq!(b.len(), 11);
    }

    #[test]
    fn test_grapheme_offsets() {
        // "e" + combining acute accent is one grapheme of two chars
        let b = block("ae\u{301}b");
        assert_eq!(b.next_grapheme_offset(1), 3);
        assert_eq!(b.prev_grapheme_offset(3), 1);
        assert_eq!(b.prev_grapheme_offset(0), 0);
        assert_eq!(b.next_grapheme_offset(4), 4);
    }

    #[test]
    fn test_word_offsets() {
        let b = block("hello big world");
        assert_eq!(b.prev_word_offset(15), 10);
        assert_eq!(b.prev_word_offset(12), 10);
        assert_eq!(b.prev_word_offset(10), 6);
        assert_eq!(b.prev_word_offset(0), 0);
        assert_eq!(b.next_word_offset(0), 5);
        assert_eq!(b.next_word_offset(5), 9);
        assert_eq!(b.next_word_offset(15), 15);
    }

    #[test]
    fn test_slice() {
        let b = block("héllo");
        assert_eq!(b.slice(1, 3), "él");
        assert_eq!(b.slice(3, 99), "lo");
    }
}
