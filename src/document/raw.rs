//! Raw document representation: the plain-data form used for persistence
//!
//! Layout (JSON, camelCase):
//! ```text
//! {
//!   "blocks": [
//!     { "key": "0", "text": "Hi", "type": "header-one", "depth": 0,
//!       "inlineStyleRanges": [{ "offset": 0, "length": 2, "style": "BOLD" }],
//!       "entityRanges": [], "data": {} }
//!   ],
//!   "entityMap": {}
//! }
//! ```
//!
//! Offsets and lengths count UTF-16 code units so snapshots written by
//! browser-side editors load unchanged.

use super::{BlockKey, BlockKind, ContentBlock, ContentState, InlineStyle, StyleSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Reasons a raw snapshot cannot become a `ContentState`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RawContentError {
    #[error("raw content has no blocks")]
    NoBlocks,
    #[error("duplicate block key {0:?}")]
    DuplicateKey(String),
    #[error("style range {offset}+{length} is outside block {key:?}")]
    RangeOutOfBounds {
        key: String,
        offset: usize,
        length: usize,
    },
    #[error("offset {offset} in block {key:?} splits a character")]
    SplitCharacter { key: String, offset: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContent {
    pub blocks: Vec<RawBlock>,
    #[serde(default)]
    pub entity_map: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    #[serde(default)]
    pub key: Option<String>,
    pub text: String,
    #[serde(rename = "type", default = "default_block_type")]
    pub block_type: String,
    #[serde(default)]
    pub depth: u32,
    #[serde(default)]
    pub inline_style_ranges: Vec<RawInlineStyleRange>,
    #[serde(default)]
    pub entity_ranges: Vec<RawEntityRange>,
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

fn default_block_type() -> String {
    "unstyled".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInlineStyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: String,
}

/// Entity ranges are accepted on read; entities are not modelled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntityRange {
    pub offset: usize,
    pub length: usize,
    pub key: serde_json::Value,
}

/// UTF-16 offset of every char boundary in `text` (len + 1 entries)
fn utf16_boundaries(text: &str) -> Vec<usize> {
    let mut boundaries = Vec::with_capacity(text.len() + 1);
    let mut pos = 0;
    boundaries.push(pos);
    for ch in text.chars() {
        pos += ch.len_utf16();
        boundaries.push(pos);
    }
    boundaries
}

/// Encode maximal runs of each style in a block
fn encode_style_ranges(block: &ContentBlock) -> Vec<RawInlineStyleRange> {
    let boundaries = utf16_boundaries(block.text());
    let mut styles: Vec<&InlineStyle> = block.styles().iter().flat_map(|s| s.iter()).collect();
    styles.sort();
    styles.dedup();

    let mut ranges = Vec::new();
    for style in styles {
        let mut run_start = None;
        for (offset, set) in block.styles().iter().enumerate() {
            match (set.contains(style), run_start) {
                (true, None) => run_start = Some(offset),
                (false, Some(start)) => {
                    ranges.push(style_range(&boundaries, start, offset, style));
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            ranges.push(style_range(&boundaries, start, block.len(), style));
        }
    }
    ranges
}

fn style_range(boundaries: &[usize], start: usize, end: usize, style: &InlineStyle) -> RawInlineStyleRange {
    RawInlineStyleRange {
        offset: boundaries[start],
        length: boundaries[end] - boundaries[start],
        style: style.tag().to_string(),
    }
}

impl ContentState {
    /// Project the content into its raw, serializable form
    pub fn to_raw(&self) -> RawContent {
        let blocks = self
            .blocks()
            .iter()
            .map(|block| RawBlock {
                key: Some(block.key.to_string()),
                text: block.text().to_string(),
                block_type: block.kind.tag().to_string(),
                depth: block.depth,
                inline_style_ranges: encode_style_ranges(block),
                entity_ranges: Vec::new(),
                data: block.data.clone(),
            })
            .collect();

        RawContent {
            blocks,
            entity_map: BTreeMap::new(),
        }
    }

    /// Rebuild content from its raw form
    pub fn from_raw(raw: RawContent) -> Result<Self, RawContentError> {
        let mut keyless = Vec::new();
        let mut blocks = Vec::with_capacity(raw.blocks.len());

        for (idx, raw_block) in raw.blocks.into_iter().enumerate() {
            let key = match raw_block.key {
                Some(key) => BlockKey(key),
                None => {
                    keyless.push(idx);
                    BlockKey::default()
                }
            };

            let boundaries = utf16_boundaries(&raw_block.text);
            let mut styles = vec![StyleSet::new(); boundaries.len() - 1];
            for range in &raw_block.inline_style_ranges {
                let text_len16 = boundaries[boundaries.len() - 1];
                let end16 = range
                    .offset
                    .checked_add(range.length)
                    .filter(|end| *end <= text_len16)
                    .ok_or_else(|| RawContentError::RangeOutOfBounds {
                        key: key.to_string(),
                        offset: range.offset,
                        length: range.length,
                    })?;
                let to_char = |offset16: usize| {
                    boundaries
                        .binary_search(&offset16)
                        .map_err(|_| RawContentError::SplitCharacter {
                            key: key.to_string(),
                            offset: offset16,
                        })
                };
                let (start, end) = (to_char(range.offset)?, to_char(end16)?);
                let style = InlineStyle::from_tag(&range.style);
                for set in &mut styles[start..end] {
                    set.insert(style.clone());
                }
            }

            let mut block = ContentBlock::from_parts(
                key,
                BlockKind::from_tag(&raw_block.block_type),
                raw_block.text,
                styles,
            );
            block.depth = raw_block.depth;
            block.data = raw_block.data;
            blocks.push(block);
        }

        ContentState::from_blocks_unkeyed(blocks, &keyless)
    }

    /// `from_blocks`, first assigning fresh keys to the blocks at `keyless`
    fn from_blocks_unkeyed(
        mut blocks: Vec<ContentBlock>,
        keyless: &[usize],
    ) -> Result<Self, RawContentError> {
        if keyless.is_empty() {
            return ContentState::from_blocks(blocks);
        }
        let keyed: Vec<ContentBlock> = blocks
            .iter()
            .enumerate()
            .filter(|(idx, _)| !keyless.contains(idx))
            .map(|(_, b)| b.clone())
            .collect();
        // validate explicit keys, then borrow the generator to fill the gaps
        let mut generator = if keyed.is_empty() {
            ContentState::new()
        } else {
            ContentState::from_blocks(keyed)?
        };
        for &idx in keyless {
            blocks[idx].key = generator.generate_key();
        }
        let mut content = ContentState::from_blocks(blocks)?;
        content.next_key = generator.next_key;
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{EditOp, Selection};

    fn styled_content() -> ContentState {
        let mut content = ContentState::from_text("Hello world\nsecond");
        let key = content.first_block().key.clone();
        content.apply_edit(EditOp::SetBlockKind {
            range: Selection::caret(key.clone(), 0),
            kind: BlockKind::HEADER_ONE,
        });
        content.apply_edit(EditOp::ApplyInlineStyle {
            range: Selection::within_block(key.clone(), 0, 5),
            style: InlineStyle::Bold,
        });
        content.apply_edit(EditOp::ApplyInlineStyle {
            range: Selection::within_block(key, 3, 8),
            style: InlineStyle::Red,
        });
        content
    }

    #[test]
    fn test_to_raw_encodes_runs() {
        let raw = styled_content().to_raw();
        assert_eq!(raw.blocks.len(), 2);
        let first = &raw.blocks[0];
        assert_eq!(first.block_type, "header-one");
        assert_eq!(
            first.inline_style_ranges,
            vec![
                RawInlineStyleRange { offset: 0, length: 5, style: "BOLD".into() },
                RawInlineStyleRange { offset: 3, length: 5, style: "RED".into() },
            ]
        );
        assert!(raw.blocks[1].inline_style_ranges.is_empty());
    }

    #[test]
    fn test_raw_round_trip() {
        let content = styled_content();
        let json = serde_json::to_string(&content.to_raw()).unwrap();
        let raw: RawContent = serde_json::from_str(&json).unwrap();
        let restored = ContentState::from_raw(raw).unwrap();
        assert_eq!(restored, content);
    }

    #[test]
    fn test_aliased_tags_round_trip() {
        let mut content = ContentState::from_text("ab\ncd");
        let first = content.first_block().key.clone();
        let last = content.last_block().key.clone();
        content.apply_edit(EditOp::SetBlockKind {
            range: Selection::caret(first.clone(), 0),
            kind: BlockKind::Heading { level: 0 },
        });
        content.apply_edit(EditOp::SetBlockKind {
            range: Selection::caret(last, 0),
            kind: BlockKind::Other("header-one".to_string()),
        });
        content.apply_edit(EditOp::ApplyInlineStyle {
            range: Selection::within_block(first, 0, 2),
            style: InlineStyle::Other("BOLD".to_string()),
        });

        let restored = ContentState::from_raw(content.to_raw()).unwrap();
        assert_eq!(restored, content);
        assert_eq!(restored.first_block().kind, BlockKind::HEADER_ONE);
        assert!(restored.first_block().style_at(0).contains(&InlineStyle::Bold));
    }

    #[test]
    fn test_reads_browser_snapshot() {
        let json = r#"{
            "blocks": [
                {"key": "9adb3", "text": "😀 hi", "type": "header-one", "depth": 0,
                 "inlineStyleRanges": [{"offset": 3, "length": 2, "style": "UNDERLINE"}],
                 "entityRanges": [], "data": {}},
                {"text": "plain"}
            ],
            "entityMap": {}
        }"#;
        let raw: RawContent = serde_json::from_str(json).unwrap();
        let content = ContentState::from_raw(raw).unwrap();
        assert_eq!(content.block_count(), 2);

        let first = content.first_block();
        assert_eq!(first.key.as_str(), "9adb3");
        assert_eq!(first.kind, BlockKind::HEADER_ONE);
        // the emoji is two UTF-16 units but one char
        assert!(!first.style_at(1).contains(&InlineStyle::Underline));
        assert!(first.style_at(2).contains(&InlineStyle::Underline));
        assert!(first.style_at(3).contains(&InlineStyle::Underline));

        let second = content.last_block();
        assert_eq!(second.kind, BlockKind::Unstyled);
        assert!(!second.key.as_str().is_empty());
        assert_ne!(second.key, first.key);
    }

    #[test]
    fn test_utf16_offsets_written() {
        let mut content = ContentState::from_text("😀ab");
        let key = content.first_block().key.clone();
        content.apply_edit(EditOp::ApplyInlineStyle {
            range: Selection::within_block(key, 1, 3),
            style: InlineStyle::Bold,
        });
        let range = &content.to_raw().blocks[0].inline_style_ranges[0];
        assert_eq!((range.offset, range.length), (2, 2));
    }

    #[test]
    fn test_rejects_bad_ranges() {
        let raw = RawContent {
            blocks: vec![RawBlock {
                key: Some("a".into()),
                text: "ab".into(),
                block_type: "unstyled".into(),
                depth: 0,
                inline_style_ranges: vec![RawInlineStyleRange {
                    offset: 1,
                    length: 5,
                    style: "BOLD".into(),
                }],
                entity_ranges: Vec::new(),
                data: Default::default(),
            }],
            entity_map: BTreeMap::new(),
        };
        assert!(matches!(
            ContentState::from_raw(raw),
            Err(RawContentError::RangeOutOfBounds { .. })
        ));

        let wrapping: RawContent = serde_json::from_str(&format!(
            r#"{{"blocks":[{{"key":"a","text":"ab","inlineStyleRanges":[{{"offset":{},"length":2,"style":"BOLD"}}]}}]}}"#,
            usize::MAX
        ))
        .unwrap();
        assert!(matches!(
            ContentState::from_raw(wrapping),
            Err(RawContentError::RangeOutOfBounds { .. })
        ));

        let split: RawContent = serde_json::from_str(
            r#"{"blocks":[{"key":"a","text":"😀","inlineStyleRanges":[{"offset":1,"length":1,"style":"BOLD"}]}]}"#,
        )
        .unwrap();
        assert!(matches!(
            ContentState::from_raw(split),
            Err(RawContentError::SplitCharacter { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_blocks() {
        let raw: RawContent = serde_json::from_str(r#"{"blocks":[],"entityMap":{}}"#).unwrap();
        assert_eq!(ContentState::from_raw(raw), Err(RawContentError::NoBlocks));
    }

    #[test]
    fn test_unknown_tags_survive() {
        let json = r#"{"blocks":[{"key":"a","text":"x","type":"atomic",
            "inlineStyleRanges":[{"offset":0,"length":1,"style":"HIGHLIGHT"}]}],"entityMap":{}}"#;
        let content = ContentState::from_raw(serde_json::from_str(json).unwrap()).unwrap();
        let raw = content.to_raw();
        assert_eq!(raw.blocks[0].block_type, "atomic");
        assert_eq!(raw.blocks[0].inline_style_ranges[0].style, "HIGHLIGHT");
    }
}
