//! Default editing behaviour for input the autoformat rules pass on

use crate::document::{BlockKind, ContentBlock};
use crate::editing::{rich_utils, ChangeType, DocPosition, EditOp, EditorState, Selection};

/// Replace the selection with typed or pasted text
///
/// Characters take the current inline style. Newlines split blocks.
pub fn insert_characters(state: &mut EditorState, text: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    let style = state.current_inline_style();
    let mut content = state.content().clone();
    let mut selection = state.selection().clone();
    let mut change_type = ChangeType::InsertCharacters;

    for (idx, line) in text.split('\n').enumerate() {
        if idx > 0 {
            selection = content
                .apply_edit(EditOp::SplitBlock { at: selection })
                .selection_after;
            change_type = ChangeType::InsertFragment;
        }
        selection = content
            .apply_edit(EditOp::replace_text(selection, line, style.clone()))
            .selection_after;
    }

    state.push(content, selection, change_type);
    true
}

/// Split the block at the selection
pub fn insert_newline(state: &mut EditorState) -> bool {
    let mut content = state.content().clone();
    let result = content.apply_edit(EditOp::SplitBlock {
        at: state.selection().clone(),
    });
    state.push(content, result.selection_after, ChangeType::SplitBlock);
    true
}

fn remove(state: &mut EditorState, range: Selection, change_type: ChangeType) -> bool {
    let mut content = state.content().clone();
    let result = content.apply_edit(EditOp::remove_range(range));
    state.push(content, result.selection_after, change_type);
    true
}

/// Delete backward from the caret
pub fn backspace(state: &mut EditorState) -> bool {
    let selection = state.selection().clone();
    if !selection.is_collapsed() {
        return remove(state, selection, ChangeType::RemoveRange);
    }

    let caret = selection.focus;
    let Some(block) = state.content().block(&caret.key) else {
        return false;
    };

    if caret.offset > 0 {
        let prev = block.prev_grapheme_offset(caret.offset);
        let range = Selection::within_block(caret.key, prev, caret.offset);
        return remove(state, range, ChangeType::BackspaceCharacter);
    }

    if block.kind != BlockKind::Unstyled {
        return rich_utils::try_to_remove_block_style(state);
    }

    match state.content().block_before(&caret.key) {
        Some(above) => {
            let range = Selection::new(DocPosition::new(above.key.clone(), above.len()), caret);
            remove(state, range, ChangeType::BackspaceCharacter)
        }
        None => false,
    }
}

/// Delete forward from the caret
pub fn delete_forward(state: &mut EditorState) -> bool {
    let selection = state.selection().clone();
    if !selection.is_collapsed() {
        return remove(state, selection, ChangeType::RemoveRange);
    }

    let caret = selection.focus;
    let Some(block) = state.content().block(&caret.key) else {
        return false;
    };

    if caret.offset < block.len() {
        let next = block.next_grapheme_offset(caret.offset);
        let range = Selection::within_block(caret.key, caret.offset, next);
        return remove(state, range, ChangeType::DeleteCharacter);
    }

    match state.content().block_after(&caret.key) {
        Some(below) => {
            let range = Selection::new(caret, DocPosition::new(below.key.clone(), 0));
            remove(state, range, ChangeType::DeleteCharacter)
        }
        None => false,
    }
}

/// Remove from a caret-derived offset within the caret's block
///
/// Falls back to `fallback` with a range selection or when the computed
/// range is empty.
fn remove_within_block(
    state: &mut EditorState,
    target: impl Fn(&ContentBlock, usize) -> usize,
    fallback: fn(&mut EditorState) -> bool,
) -> bool {
    let selection = state.selection().clone();
    if !selection.is_collapsed() {
        return fallback(state);
    }
    let caret = selection.focus;
    let Some(block) = state.content().block(&caret.key) else {
        return false;
    };
    let other = target(block, caret.offset);
    if other == caret.offset {
        return fallback(state);
    }
    let (start, end) = (other.min(caret.offset), other.max(caret.offset));
    remove(state, Selection::within_block(caret.key, start, end), ChangeType::RemoveRange)
}

/// Delete back to the start of the previous word
pub fn backspace_word(state: &mut EditorState) -> bool {
    remove_within_block(state, |block, offset| block.prev_word_offset(offset), backspace)
}

/// Delete back to the start of the block
pub fn backspace_to_start_of_line(state: &mut EditorState) -> bool {
    remove_within_block(state, |_, _| 0, backspace)
}

/// Delete forward to the end of the next word
pub fn delete_word(state: &mut EditorState) -> bool {
    remove_within_block(state, |block, offset| block.next_word_offset(offset), delete_forward)
}

/// Delete forward to the end of the block
pub fn delete_to_end_of_block(state: &mut EditorState) -> bool {
    remove_within_block(state, |block, _| block.len(), delete_forward)
}
