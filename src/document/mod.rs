//! Document model: an ordered list of styled blocks

mod block;
mod key;
pub mod raw;
mod style;

pub use block::{BlockKind, ContentBlock};
pub use key::BlockKey;
pub use raw::{RawBlock, RawContent, RawContentError, RawEntityRange, RawInlineStyleRange};
pub use style::{InlineStyle, StyleSet};

use crate::editing::{DocPosition, EditOp, EditResult, Selection};
use rustc_hash::FxHashMap;

/// (block index, character offset)
type Resolved = (usize, usize);

/// The document content: never empty, keys unique
#[derive(Debug, Clone)]
pub struct ContentState {
    /// Blocks in document order
    blocks: Vec<ContentBlock>,
    /// Block key to position in `blocks`
    index: FxHashMap<BlockKey, usize>,
    /// Monotonic version counter
    version: u64,
    /// Next counter value for key generation
    next_key: u64,
}

impl Default for ContentState {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for ContentState {
    fn eq(&self, other: &Self) -> bool {
        self.blocks == other.blocks
    }
}

impl ContentState {
    /// Create a document holding one empty unstyled block
    pub fn new() -> Self {
        let mut content = Self {
            blocks: Vec::new(),
            index: FxHashMap::default(),
            version: 0,
            next_key: 0,
        };
        let key = content.generate_key();
        content.blocks.push(ContentBlock::empty(key));
        content.reindex();
        content
    }

    /// Create a document with one unstyled block per line
    pub fn from_text(text: &str) -> Self {
        let mut content = Self::new();
        content.blocks.clear();
        content.index.clear();
        for line in text.split('\n') {
            let key = content.generate_key();
            content
                .blocks
                .push(ContentBlock::with_text(key, BlockKind::Unstyled, line));
            content.reindex();
        }
        content
    }

    /// Create a document from prepared blocks
    pub fn from_blocks(blocks: Vec<ContentBlock>) -> Result<Self, RawContentError> {
        if blocks.is_empty() {
            return Err(RawContentError::NoBlocks);
        }
        let mut index = FxHashMap::default();
        for (idx, block) in blocks.iter().enumerate() {
            if index.insert(block.key.clone(), idx).is_some() {
                return Err(RawContentError::DuplicateKey(block.key.to_string()));
            }
        }
        Ok(Self {
            blocks,
            index,
            version: 0,
            next_key: 0,
        })
    }

    /// Generate a key not used by any block
    pub fn generate_key(&mut self) -> BlockKey {
        loop {
            let key = BlockKey::from_counter(self.next_key);
            self.next_key += 1;
            if !self.index.contains_key(&key) {
                return key;
            }
        }
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (idx, block) in self.blocks.iter().enumerate() {
            self.index.insert(block.key.clone(), idx);
        }
    }

    /// Get the content version
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Blocks in document order
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn block(&self, key: &BlockKey) -> Option<&ContentBlock> {
        self.index.get(key).map(|&idx| &self.blocks[idx])
    }

    pub fn block_index(&self, key: &BlockKey) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn block_before(&self, key: &BlockKey) -> Option<&ContentBlock> {
        let idx = self.block_index(key)?;
        idx.checked_sub(1).map(|prev| &self.blocks[prev])
    }

    pub fn block_after(&self, key: &BlockKey) -> Option<&ContentBlock> {
        let idx = self.block_index(key)?;
        self.blocks.get(idx + 1)
    }

    pub fn first_block(&self) -> &ContentBlock {
        &self.blocks[0]
    }

    pub fn last_block(&self) -> &ContentBlock {
        &self.blocks[self.blocks.len() - 1]
    }

    /// Full text, blocks joined by newlines
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether any block contains text
    pub fn has_text(&self) -> bool {
        self.blocks.len() > 1 || !self.blocks[0].is_empty()
    }

    /// Clamp a position onto an existing block and offset
    pub fn clamp_position(&self, pos: &DocPosition) -> DocPosition {
        match self.block(&pos.key) {
            Some(block) => DocPosition::new(pos.key.clone(), pos.offset.min(block.len())),
            None => DocPosition::new(self.first_block().key.clone(), 0),
        }
    }

    pub fn clamp_selection(&self, sel: &Selection) -> Selection {
        Selection::new(self.clamp_position(&sel.anchor), self.clamp_position(&sel.focus))
    }

    /// Start and end of a selection in document order
    pub fn ordered(&self, sel: &Selection) -> (DocPosition, DocPosition) {
        if self.is_backward(sel) {
            (sel.focus.clone(), sel.anchor.clone())
        } else {
            (sel.anchor.clone(), sel.focus.clone())
        }
    }

    /// Whether the focus precedes the anchor
    pub fn is_backward(&self, sel: &Selection) -> bool {
        let anchor = (self.block_index(&sel.anchor.key), sel.anchor.offset);
        let focus = (self.block_index(&sel.focus.key), sel.focus.offset);
        focus < anchor
    }

    fn resolve(&self, pos: &DocPosition) -> Option<Resolved> {
        let idx = self.block_index(&pos.key)?;
        Some((idx, pos.offset.min(self.blocks[idx].len())))
    }

    fn resolve_range(&self, range: &Selection) -> Option<(Resolved, Resolved)> {
        let a = self.resolve(&range.anchor)?;
        let f = self.resolve(&range.focus)?;
        Some(if f < a { (f, a) } else { (a, f) })
    }

    fn new_result(&self, selection_after: Selection) -> EditResult {
        EditResult {
            version: self.version,
            selection_after,
            ..Default::default()
        }
    }

    /// Apply an edit operation
    pub fn apply_edit(&mut self, op: EditOp) -> EditResult {
        self.version += 1;

        match op {
            EditOp::ReplaceText { range, text, style } => self.apply_replace(range, &text, &style),
            EditOp::SplitBlock { at } => self.apply_split(at),
            EditOp::SetBlockKind { range, kind } => self.apply_block_kind(range, kind),
            EditOp::ApplyInlineStyle { range, style } => self.apply_inline_style(range, &style, true),
            EditOp::RemoveInlineStyle { range, style } => {
                self.apply_inline_style(range, &style, false)
            }
            EditOp::Transaction { ops } => {
                let mut result = self.new_result(Selection::default());

                for op in ops {
                    let sub_result = self.apply_edit(op);
                    result.affected_blocks.extend(sub_result.affected_blocks);
                    result.created_blocks.extend(sub_result.created_blocks);
                    result.deleted_blocks.extend(sub_result.deleted_blocks);
                    result.selection_after = sub_result.selection_after;
                }

                result.version = self.version;
                result
            }
        }
    }

    /// Remove the text between two resolved positions, merging blocks
    fn remove_range(&mut self, start: Resolved, end: Resolved, result: &mut EditResult) {
        if start.0 == end.0 {
            self.blocks[start.0].remove(start.1, end.1);
        } else {
            let (tail, tail_styles) = self.blocks[end.0].split_off(end.1);
            let first = &mut self.blocks[start.0];
            first.split_off(start.1);
            first.append(&tail, tail_styles);
            for removed in self.blocks.drain(start.0 + 1..=end.0) {
                result.deleted_blocks.push(removed.key);
            }
            self.reindex();
        }
        result.affected_blocks.push(self.blocks[start.0].key.clone());
    }

    fn apply_replace(&mut self, range: Selection, text: &str, style: &StyleSet) -> EditResult {
        debug_assert!(!text.contains('\n'), "replace text must be a single line");
        let Some((start, end)) = self.resolve_range(&range) else {
            return self.new_result(range);
        };
        let mut result = self.new_result(range);
        self.remove_range(start, end, &mut result);

        let block = &mut self.blocks[start.0];
        block.insert(start.1, text, style);
        result.selection_after = Selection::caret(block.key.clone(), start.1 + text.chars().count());
        result
    }

    fn apply_split(&mut self, at: Selection) -> EditResult {
        let Some((start, end)) = self.resolve_range(&at) else {
            return self.new_result(at);
        };
        let mut result = self.new_result(at);
        self.remove_range(start, end, &mut result);

        let (tail, tail_styles) = self.blocks[start.0].split_off(start.1);
        let key = self.generate_key();
        let source = &self.blocks[start.0];
        let mut below = ContentBlock::from_parts(key.clone(), source.kind.clone(), tail, tail_styles);
        below.depth = source.depth;
        self.blocks.insert(start.0 + 1, below);
        self.reindex();

        result.created_blocks.push(key.clone());
        result.selection_after = Selection::caret(key, 0);
        result
    }

    fn apply_block_kind(&mut self, range: Selection, kind: BlockKind) -> EditResult {
        let Some((start, end)) = self.resolve_range(&range) else {
            return self.new_result(range);
        };
        let mut result = self.new_result(range);
        for block in &mut self.blocks[start.0..=end.0] {
            block.kind = kind.clone();
            result.affected_blocks.push(block.key.clone());
        }
        result
    }

    fn apply_inline_style(&mut self, range: Selection, style: &InlineStyle, add: bool) -> EditResult {
        let Some((start, end)) = self.resolve_range(&range) else {
            return self.new_result(range);
        };
        let mut result = self.new_result(range);
        for idx in start.0..=end.0 {
            let block = &mut self.blocks[idx];
            let from = if idx == start.0 { start.1 } else { 0 };
            let to = if idx == end.0 { end.1 } else { block.len() };
            for offset in from..to {
                if let Some(set) = block.style_at_mut(offset) {
                    if add {
                        set.insert(style.clone());
                    } else {
                        set.remove(style);
                    }
                }
            }
            result.affected_blocks.push(block.key.clone());
        }
        result
    }
}
