//! Editor state: content, selection, pending inline style and history

use crate::document::{BlockKey, ContentBlock, ContentState, StyleSet};
use crate::editing::{ChangeType, Selection};
use crate::undo::UndoManager;

/// Immutable-by-convention snapshot of everything the editor shows
///
/// All content changes go through [`EditorState::push`], which records
/// undo history and settles the inline-style override.
#[derive(Debug, Clone)]
pub struct EditorState {
    content: ContentState,
    selection: Selection,
    /// Style to apply to the next inserted characters, set by toggling a
    /// style with a collapsed caret
    inline_style_override: Option<StyleSet>,
    undo_manager: UndoManager,
}

impl EditorState {
    /// Empty document, caret at its start
    pub fn create_empty(undo_depth: usize) -> Self {
        Self::create_with_content(ContentState::new(), undo_depth)
    }

    /// Caret at the start of the given content
    pub fn create_with_content(content: ContentState, undo_depth: usize) -> Self {
        let selection = Selection::caret(content.first_block().key.clone(), 0);
        Self {
            content,
            selection,
            inline_style_override: None,
            undo_manager: UndoManager::new(undo_depth),
        }
    }

    pub fn content(&self) -> &ContentState {
        &self.content
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn inline_style_override(&self) -> Option<&StyleSet> {
        self.inline_style_override.as_ref()
    }

    pub fn set_inline_style_override(&mut self, style: Option<StyleSet>) {
        self.inline_style_override = style;
    }

    /// Key of the block holding the start of the selection
    pub fn start_key(&self) -> BlockKey {
        self.content.ordered(&self.selection).0.key
    }

    /// Block holding the start of the selection
    pub fn start_block(&self) -> &ContentBlock {
        self.content
            .block(&self.start_key())
            .unwrap_or_else(|| self.content.first_block())
    }

    /// Commit new content as one history step
    pub fn push(&mut self, content: ContentState, selection_after: Selection, change_type: ChangeType) {
        self.undo_manager
            .record(&self.content, &self.selection, change_type);
        self.content = content;
        self.selection = self.content.clamp_selection(&selection_after);
        if !change_type.preserves_style_override() {
            self.inline_style_override = None;
        }
    }

    /// Move the selection; drops any pending inline style
    pub fn force_selection(&mut self, selection: Selection) {
        self.selection = self.content.clamp_selection(&selection);
        self.inline_style_override = None;
        self.undo_manager.break_run();
    }

    /// Style the next typed characters get
    pub fn current_inline_style(&self) -> StyleSet {
        if let Some(style) = &self.inline_style_override {
            return style.clone();
        }

        let (start, _) = self.content.ordered(&self.selection);
        let Some(block) = self.content.block(&start.key) else {
            return StyleSet::new();
        };

        if self.selection.is_collapsed() {
            if start.offset > 0 {
                return block.style_at(start.offset - 1);
            }
            if !block.is_empty() {
                return block.style_at(0);
            }
            return self.look_upward_for_style(&start.key);
        }

        if start.offset < block.len() {
            return block.style_at(start.offset);
        }
        if start.offset > 0 {
            return block.style_at(start.offset - 1);
        }
        self.look_upward_for_style(&start.key)
    }

    /// Style of the last character of the nearest non-empty block above
    fn look_upward_for_style(&self, key: &BlockKey) -> StyleSet {
        let Some(idx) = self.content.block_index(key) else {
            return StyleSet::new();
        };
        self.content.blocks()[..idx]
            .iter()
            .rev()
            .find(|b| !b.is_empty())
            .map(|b| b.style_at(b.len() - 1))
            .unwrap_or_default()
    }

    /// Undo the last change
    pub fn undo(&mut self) -> bool {
        match self.undo_manager.undo(&self.content, &self.selection) {
            Some(snapshot) => {
                self.restore(snapshot.content, snapshot.selection);
                true
            }
            None => false,
        }
    }

    /// Redo the last undone change
    pub fn redo(&mut self) -> bool {
        match self.undo_manager.redo(&self.content, &self.selection) {
            Some(snapshot) => {
                self.restore(snapshot.content, snapshot.selection);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, content: ContentState, selection: Selection) {
        self.content = content;
        self.selection = self.content.clamp_selection(&selection);
        self.inline_style_override = None;
    }

    pub fn can_undo(&self) -> bool {
        self.undo_manager.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo_manager.can_redo()
    }
}
