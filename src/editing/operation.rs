//! Edit operations and results

use crate::document::{BlockKey, BlockKind, InlineStyle, StyleSet};
use crate::editing::Selection;
use smallvec::SmallVec;
use std::fmt;

/// An atomic edit operation on a `ContentState`
#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    /// Remove a range (merging blocks if it spans several), then insert
    /// single-line text with one style
    ReplaceText {
        range: Selection,
        text: String,
        style: StyleSet,
    },
    /// Remove a range, then split the block at the caret
    SplitBlock { at: Selection },
    /// Set the kind of every block touched by the range
    SetBlockKind { range: Selection, kind: BlockKind },
    /// Add a style to every character in the range
    ApplyInlineStyle { range: Selection, style: InlineStyle },
    /// Remove a style from every character in the range
    RemoveInlineStyle { range: Selection, style: InlineStyle },
    /// A composite transaction of multiple operations
    Transaction { ops: Vec<EditOp> },
}

impl EditOp {
    /// Remove a range without inserting anything
    pub fn remove_range(range: Selection) -> Self {
        Self::ReplaceText {
            range,
            text: String::new(),
            style: StyleSet::new(),
        }
    }

    /// Insert (or replace the range with) text carrying `style`
    pub fn replace_text(range: Selection, text: impl Into<String>, style: StyleSet) -> Self {
        Self::ReplaceText {
            range,
            text: text.into(),
            style,
        }
    }

    /// Create a transaction
    pub fn transaction(ops: Vec<EditOp>) -> Self {
        Self::Transaction { ops }
    }
}

/// Result of applying an edit operation
#[derive(Debug, Clone, Default)]
pub struct EditResult {
    /// New content version after this edit
    pub version: u64,
    /// Blocks that were modified
    pub affected_blocks: SmallVec<[BlockKey; 4]>,
    /// Blocks that were created
    pub created_blocks: SmallVec<[BlockKey; 2]>,
    /// Blocks that were removed
    pub deleted_blocks: SmallVec<[BlockKey; 2]>,
    /// Selection after the edit
    pub selection_after: Selection,
}

impl EditResult {
    /// Check if any blocks were affected
    pub fn has_changes(&self) -> bool {
        !self.affected_blocks.is_empty()
            || !self.created_blocks.is_empty()
            || !self.deleted_blocks.is_empty()
    }
}

/// Kind of change recorded with each undo step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeType {
    InsertCharacters,
    BackspaceCharacter,
    DeleteCharacter,
    RemoveRange,
    SplitBlock,
    ChangeBlockType,
    ChangeInlineStyle,
    /// Multi-line insertion
    InsertFragment,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::InsertCharacters => "insert-characters",
            ChangeType::BackspaceCharacter => "backspace-character",
            ChangeType::DeleteCharacter => "delete-character",
            ChangeType::RemoveRange => "remove-range",
            ChangeType::SplitBlock => "split-block",
            ChangeType::ChangeBlockType => "change-block-type",
            ChangeType::ChangeInlineStyle => "change-inline-style",
            ChangeType::InsertFragment => "insert-fragment",
        }
    }

    /// Changes after which a pending inline-style override stays armed
    pub fn preserves_style_override(&self) -> bool {
        matches!(self, ChangeType::SplitBlock | ChangeType::ChangeBlockType)
    }

    /// Changes that coalesce with an immediately preceding change of the same type
    pub fn coalesces(&self) -> bool {
        matches!(
            self,
            ChangeType::InsertCharacters
                | ChangeType::BackspaceCharacter
                | ChangeType::DeleteCharacter
        )
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_range_is_empty_replace() {
        let range = Selection::within_block(BlockKey::from("a"), 0, 2);
        match EditOp::remove_range(range.clone()) {
            EditOp::ReplaceText { range: r, text, style } => {
                assert_eq!(r, range);
                assert!(text.is_empty());
                assert!(style.is_empty());
            }
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn test_edit_result() {
        let result = EditResult {
            version: 1,
            affected_blocks: smallvec::smallvec![BlockKey::from("a")],
            ..Default::default()
        };
        assert!(result.has_changes());
        assert!(!EditResult::default().has_changes());
    }

    #[test]
    fn test_change_type_flags() {
        assert!(ChangeType::SplitBlock.preserves_style_override());
        assert!(!ChangeType::RemoveRange.preserves_style_override());
        assert!(ChangeType::InsertCharacters.coalesces());
        assert!(!ChangeType::ChangeInlineStyle.coalesces());
        assert_eq!(ChangeType::RemoveRange.to_string(), "remove-range");
    }
}
