//! Undo/Redo history of content snapshots

use crate::document::ContentState;
use crate::editing::{ChangeType, Selection};

/// Content and selection as they were before a change
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub content: ContentState,
    pub selection: Selection,
    /// The change that moved the document away from this snapshot
    pub change_type: ChangeType,
}

/// Undo/Redo manager
#[derive(Debug, Clone)]
pub struct UndoManager {
    /// Stack of undoable snapshots
    undo_stack: Vec<Snapshot>,
    /// Stack of redoable snapshots
    redo_stack: Vec<Snapshot>,
    /// Maximum history depth
    max_depth: usize,
    /// Type of the most recent recorded change, for coalescing
    last_change: Option<ChangeType>,
}

impl UndoManager {
    /// Create a new undo manager
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth,
            last_change: None,
        }
    }

    /// Record the state before a change
    pub fn record(&mut self, before: &ContentState, selection: &Selection, change_type: ChangeType) {
        // Clear redo stack on new edit
        self.redo_stack.clear();

        if self.should_merge(change_type) {
            return;
        }
        self.last_change = Some(change_type);

        self.undo_stack.push(Snapshot {
            content: before.clone(),
            selection: selection.clone(),
            change_type,
        });

        // Enforce depth limit
        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
    }

    /// A run of typing (or deleting) collapses into one undo step
    fn should_merge(&self, change_type: ChangeType) -> bool {
        change_type.coalesces() && self.last_change == Some(change_type) && !self.undo_stack.is_empty()
    }

    /// Start a new undo step on the next change even if it would coalesce
    pub fn break_run(&mut self) {
        self.last_change = None;
    }

    /// Step back: returns the snapshot to restore, saving `current` for redo
    pub fn undo(&mut self, current: &ContentState, selection: &Selection) -> Option<Snapshot> {
        let snapshot = self.undo_stack.pop()?;
        self.redo_stack.push(Snapshot {
            content: current.clone(),
            selection: selection.clone(),
            change_type: snapshot.change_type,
        });
        self.last_change = None;
        Some(snapshot)
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current: &ContentState, selection: &Selection) -> Option<Snapshot> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(Snapshot {
            content: current.clone(),
            selection: selection.clone(),
            change_type: snapshot.change_type,
        });
        self.last_change = None;
        Some(snapshot)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get undo stack depth
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caret(content: &ContentState) -> Selection {
        Selection::caret(content.first_block().key.clone(), 0)
    }

    #[test]
    fn test_undo_manager_creation() {
        let manager = UndoManager::new(100);
        assert!(!manager.can_undo());
        assert!(!manager.can_redo());
    }

    #[test]
    fn test_undo_redo() {
        let mut manager = UndoManager::new(100);
        let before = ContentState::new();
        let after = ContentState::from_text("Hello");
        let sel = caret(&before);

        manager.record(&before, &sel, ChangeType::InsertCharacters);
        assert_eq!(manager.undo_depth(), 1);

        let restored = manager.undo(&after, &sel).unwrap();
        assert_eq!(restored.content, before);
        assert!(manager.can_redo());

        let again = manager.redo(&before, &sel).unwrap();
        assert_eq!(again.content, after);
        assert!(!manager.can_redo());
        assert!(manager.can_undo());
    }

    #[test]
    fn test_typing_coalesces() {
        let mut manager = UndoManager::new(100);
        let content = ContentState::new();
        let sel = caret(&content);

        manager.record(&content, &sel, ChangeType::InsertCharacters);
        manager.record(&content, &sel, ChangeType::InsertCharacters);
        assert_eq!(manager.undo_depth(), 1);

        manager.record(&content, &sel, ChangeType::SplitBlock);
        manager.record(&content, &sel, ChangeType::SplitBlock);
        assert_eq!(manager.undo_depth(), 3);

        manager.break_run();
        manager.record(&content, &sel, ChangeType::InsertCharacters);
        manager.record(&content, &sel, ChangeType::InsertCharacters);
        assert_eq!(manager.undo_depth(), 4);
    }

    #[test]
    fn test_new_change_clears_redo() {
        let mut manager = UndoManager::new(100);
        let content = ContentState::new();
        let sel = caret(&content);

        manager.record(&content, &sel, ChangeType::RemoveRange);
        manager.undo(&content, &sel);
        assert!(manager.can_redo());
        manager.record(&content, &sel, ChangeType::RemoveRange);
        assert!(!manager.can_redo());
    }

    #[test]
    fn test_max_depth() {
        let mut manager = UndoManager::new(3);
        let content = ContentState::new();
        let sel = caret(&content);

        for _ in 0..5 {
            manager.record(&content, &sel, ChangeType::ChangeBlockType);
        }

        // Should be limited to max_depth
        assert_eq!(manager.undo_depth(), 3);
    }
}
