//! Caret positions and selections

use crate::document::BlockKey;

/// Position in document as (block key, character offset within the block)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DocPosition {
    /// The block containing this position
    pub key: BlockKey,
    /// Character offset within the block
    pub offset: usize,
}

impl DocPosition {
    /// Create a new document position
    pub fn new(key: BlockKey, offset: usize) -> Self {
        Self { key, offset }
    }
}

/// Text selection (anchor + focus point)
///
/// Ordering between positions depends on block order, so the ordered
/// start/end of a selection is resolved against a `ContentState`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    /// The anchor point (fixed during extension)
    pub anchor: DocPosition,
    /// The focus point (moves during extension)
    pub focus: DocPosition,
}

impl Selection {
    /// Create a new selection
    pub fn new(anchor: DocPosition, focus: DocPosition) -> Self {
        Self { anchor, focus }
    }

    /// Create a collapsed selection (caret)
    pub fn collapsed(position: DocPosition) -> Self {
        Self {
            anchor: position.clone(),
            focus: position,
        }
    }

    /// Caret at `offset` in block `key`
    pub fn caret(key: BlockKey, offset: usize) -> Self {
        Self::collapsed(DocPosition::new(key, offset))
    }

    /// Range inside a single block
    pub fn within_block(key: BlockKey, start: usize, end: usize) -> Self {
        Self {
            anchor: DocPosition::new(key.clone(), start),
            focus: DocPosition::new(key, end),
        }
    }

    /// Check if selection is collapsed (no text selected)
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// Whether anchor and focus sit in different blocks
    pub fn spans_blocks(&self) -> bool {
        self.anchor.key != self.focus.key
    }
}
