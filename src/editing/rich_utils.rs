//! Style and block-type toggles, and the default key command handler

use crate::document::{BlockKind, InlineStyle};
use crate::editing::{ChangeType, DocPosition, EditOp, EditorState, Selection};
use std::fmt;

/// Named editing command produced by a key binding
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    Bold,
    Italic,
    Underline,
    Code,
    Strikethrough,
    Backspace,
    BackspaceWord,
    BackspaceToStartOfLine,
    Delete,
    DeleteWord,
    DeleteToEndOfBlock,
    SplitBlock,
    Undo,
    Redo,
    /// A command this crate has no behaviour for
    Other(String),
}

impl KeyCommand {
    pub fn from_name(name: &str) -> Self {
        match name {
            "bold" => KeyCommand::Bold,
            "italic" => KeyCommand::Italic,
            "underline" => KeyCommand::Underline,
            "code" => KeyCommand::Code,
            "strikethrough" => KeyCommand::Strikethrough,
            "backspace" => KeyCommand::Backspace,
            "backspace-word" => KeyCommand::BackspaceWord,
            "backspace-to-start-of-line" => KeyCommand::BackspaceToStartOfLine,
            "delete" => KeyCommand::Delete,
            "delete-word" => KeyCommand::DeleteWord,
            "delete-to-end-of-block" => KeyCommand::DeleteToEndOfBlock,
            "split-block" => KeyCommand::SplitBlock,
            "undo" => KeyCommand::Undo,
            "redo" => KeyCommand::Redo,
            other => KeyCommand::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            KeyCommand::Bold => "bold",
            KeyCommand::Italic => "italic",
            KeyCommand::Underline => "underline",
            KeyCommand::Code => "code",
            KeyCommand::Strikethrough => "strikethrough",
            KeyCommand::Backspace => "backspace",
            KeyCommand::BackspaceWord => "backspace-word",
            KeyCommand::BackspaceToStartOfLine => "backspace-to-start-of-line",
            KeyCommand::Delete => "delete",
            KeyCommand::DeleteWord => "delete-word",
            KeyCommand::DeleteToEndOfBlock => "delete-to-end-of-block",
            KeyCommand::SplitBlock => "split-block",
            KeyCommand::Undo => "undo",
            KeyCommand::Redo => "redo",
            KeyCommand::Other(name) => name,
        }
    }
}

impl fmt::Display for KeyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Toggle an inline style at the selection
///
/// With a collapsed caret this only arms the override for the next typed
/// characters; with a range it restyles the range as one history step.
pub fn toggle_inline_style(state: &mut EditorState, style: InlineStyle) {
    let current = state.current_inline_style();

    if state.selection().is_collapsed() {
        state.set_inline_style_override(Some(current.toggled(&style)));
        return;
    }

    let range = state.selection().clone();
    let op = if current.contains(&style) {
        EditOp::RemoveInlineStyle { range, style }
    } else {
        EditOp::ApplyInlineStyle { range, style }
    };
    let mut content = state.content().clone();
    let result = content.apply_edit(op);
    state.push(content, result.selection_after, ChangeType::ChangeInlineStyle);
}

/// Set `kind` on every selected block, or reset them to unstyled when the
/// first one already has it
///
/// A selection ending at offset 0 of a later block (a triple click) leaves
/// that block alone.
pub fn toggle_block_type(state: &mut EditorState, kind: BlockKind) {
    let target = if state.start_block().kind == kind {
        BlockKind::Unstyled
    } else {
        kind
    };
    let mut content = state.content().clone();
    let (start, mut end) = content.ordered(state.selection());
    if start.key != end.key && end.offset == 0 {
        if let Some(prev) = content.block_before(&end.key) {
            end = DocPosition::new(prev.key.clone(), prev.len());
        }
    }
    content.apply_edit(EditOp::SetBlockKind {
        range: Selection::new(start, end),
        kind: target,
    });
    let selection = state.selection().clone();
    state.push(content, selection, ChangeType::ChangeBlockType);
}

/// Code toggles a code block across blocks, inline code otherwise
pub fn toggle_code(state: &mut EditorState) {
    if state.selection().spans_blocks() {
        toggle_block_type(state, BlockKind::CodeBlock);
    } else {
        toggle_inline_style(state, InlineStyle::Code);
    }
}

/// Reset the caret's block to unstyled when the caret sits at its start
pub fn try_to_remove_block_style(state: &mut EditorState) -> bool {
    let sel = state.selection();
    if !sel.is_collapsed() || sel.anchor.offset != 0 {
        return false;
    }
    if state.start_block().kind == BlockKind::Unstyled {
        return false;
    }
    let mut content = state.content().clone();
    let result = content.apply_edit(EditOp::SetBlockKind {
        range: Selection::caret(state.start_key(), 0),
        kind: BlockKind::Unstyled,
    });
    state.push(content, result.selection_after, ChangeType::ChangeBlockType);
    true
}

/// Apply the built-in handling for formatting commands
///
/// Returns true when the state changed. Deletion, undo and split commands
/// are left to the caller's default behaviour.
pub fn handle_key_command(state: &mut EditorState, command: &KeyCommand) -> bool {
    match command {
        KeyCommand::Bold => toggle_inline_style(state, InlineStyle::Bold),
        KeyCommand::Italic => toggle_inline_style(state, InlineStyle::Italic),
        KeyCommand::Underline => toggle_inline_style(state, InlineStyle::Underline),
        KeyCommand::Strikethrough => toggle_inline_style(state, InlineStyle::Strikethrough),
        KeyCommand::Code => toggle_code(state),
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ContentState;
    use crate::editing::DocPosition;

    fn state_with(text: &str) -> EditorState {
        EditorState::create_with_content(ContentState::from_text(text), 100)
    }

    #[test]
    fn test_command_names() {
        assert_eq!(KeyCommand::from_name("bold"), KeyCommand::Bold);
        assert_eq!(KeyCommand::from_name("backspace-word"), KeyCommand::BackspaceWord);
        assert_eq!(
            KeyCommand::from_name("transpose-characters"),
            KeyCommand::Other("transpose-characters".to_string())
        );
        assert_eq!(KeyCommand::DeleteToEndOfBlock.to_string(), "delete-to-end-of-block");
    }

    #[test]
    fn test_toggle_collapsed_sets_override() {
        let mut state = state_with("");
        toggle_inline_style(&mut state, InlineStyle::Bold);
        assert!(state.current_inline_style().contains(&InlineStyle::Bold));
        assert!(!state.can_undo());

        toggle_inline_style(&mut state, InlineStyle::Bold);
        assert!(state.current_inline_style().is_empty());
    }

    #[test]
    fn test_toggle_range_applies_then_removes() {
        let mut state = state_with("hello");
        let key = state.content().first_block().key.clone();
        state.force_selection(Selection::within_block(key.clone(), 1, 4));

        toggle_inline_style(&mut state, InlineStyle::Underline);
        let block = state.content().block(&key).unwrap();
        assert!(!block.style_at(0).contains(&InlineStyle::Underline));
        assert!(block.style_at(1).contains(&InlineStyle::Underline));
        assert!(block.style_at(3).contains(&InlineStyle::Underline));
        assert!(state.can_undo());

        toggle_inline_style(&mut state, InlineStyle::Underline);
        let block = state.content().block(&key).unwrap();
        assert!(block.styles().iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_toggle_block_type() {
        let mut state = state_with("title");
        toggle_block_type(&mut state, BlockKind::HEADER_ONE);
        assert_eq!(state.start_block().kind, BlockKind::HEADER_ONE);
        toggle_block_type(&mut state, BlockKind::HEADER_ONE);
        assert_eq!(state.start_block().kind, BlockKind::Unstyled);
    }

    #[test]
    fn test_toggle_block_type_over_range() {
        let mut state = state_with("a\nb\nc");
        let first = state.content().blocks()[0].key.clone();
        let second = state.content().blocks()[1].key.clone();
        state.force_selection(Selection::new(
            DocPosition::new(first, 0),
            DocPosition::new(second, 1),
        ));
        toggle_block_type(&mut state, BlockKind::Blockquote);
        let kinds: Vec<_> = state.content().blocks().iter().map(|b| b.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![BlockKind::Blockquote, BlockKind::Blockquote, BlockKind::Unstyled]
        );
    }

    #[test]
    fn test_toggle_block_type_skips_block_at_selection_end() {
        let mut state = state_with("one\ntwo");
        let first = state.content().blocks()[0].key.clone();
        let second = state.content().blocks()[1].key.clone();
        let selection = Selection::new(
            DocPosition::new(first, 1),
            DocPosition::new(second, 0),
        );
        state.force_selection(selection.clone());
        toggle_block_type(&mut state, BlockKind::HEADER_ONE);

        let kinds: Vec<_> = state.content().blocks().iter().map(|b| b.kind.clone()).collect();
        assert_eq!(kinds, vec![BlockKind::HEADER_ONE, BlockKind::Unstyled]);
        assert_eq!(state.selection(), &selection);
    }

    #[test]
    fn test_code_across_blocks_is_code_block() {
        let mut state = state_with("a\nb");
        let first = state.content().blocks()[0].key.clone();
        let second = state.content().blocks()[1].key.clone();
        state.force_selection(Selection::new(
            DocPosition::new(first, 0),
            DocPosition::new(second, 1),
        ));
        assert!(handle_key_command(&mut state, &KeyCommand::Code));
        assert_eq!(state.start_block().kind, BlockKind::CodeBlock);
    }

    #[test]
    fn test_unhandled_commands() {
        let mut state = state_with("abc");
        assert!(!handle_key_command(&mut state, &KeyCommand::Backspace));
        assert!(!handle_key_command(&mut state, &KeyCommand::Undo));
        assert!(!handle_key_command(&mut state, &KeyCommand::Other("x".into())));
        assert_eq!(state.content().plain_text(), "abc");
    }

    #[test]
    fn test_try_to_remove_block_style() {
        let mut state = state_with("title");
        assert!(!try_to_remove_block_style(&mut state));
        toggle_block_type(&mut state, BlockKind::HEADER_ONE);
        assert!(try_to_remove_block_style(&mut state));
        assert_eq!(state.start_block().kind, BlockKind::Unstyled);
    }
}
