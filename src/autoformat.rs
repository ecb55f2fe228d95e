//! Markdown-style shortcuts typed at the start of a block
//!
//! | block text | then   | effect                          |
//! |------------|--------|---------------------------------|
//! | `#`        | space  | block becomes `header-one`      |
//! | `*`        | space  | toggle `BOLD` at the caret      |
//! | `**`       | space  | toggle `RED` at the caret       |
//! | `***`      | space  | toggle `UNDERLINE` at the caret |
//!
//! Enter inside a `header-one` block starts an unstyled block.

use crate::document::{BlockKind, InlineStyle};
use crate::editing::{rich_utils, ChangeType, EditOp, EditorState, KeyCommand, Selection};

/// Whether a handler consumed the event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleResult {
    Handled,
    NotHandled,
}

impl HandleResult {
    pub fn is_handled(self) -> bool {
        self == HandleResult::Handled
    }
}

impl From<bool> for HandleResult {
    fn from(handled: bool) -> Self {
        if handled {
            HandleResult::Handled
        } else {
            HandleResult::NotHandled
        }
    }
}

/// Character that triggers the shortcuts
pub const TRIGGER: &str = " ";

/// Prefix that turns a block into a heading
pub const HEADING_MARKER: &str = "#";

/// Markers that toggle an inline style, shortest first
const STYLE_MARKERS: [(&str, InlineStyle); 3] = [
    ("*", InlineStyle::Bold),
    ("**", InlineStyle::Red),
    ("***", InlineStyle::Underline),
];

/// Intercept a character about to be inserted
///
/// Only the space character is inspected. The heading rule matches any
/// block text starting with `#` and removes just the first character; the
/// style rules need the block text to be exactly the marker.
pub fn handle_before_input(state: &mut EditorState, chars: &str) -> HandleResult {
    if chars != TRIGGER {
        return HandleResult::NotHandled;
    }

    let text = state.start_block().text().to_string();

    if text.starts_with(HEADING_MARKER) {
        remove_marker(state, HEADING_MARKER.len());
        rich_utils::toggle_block_type(state, BlockKind::HEADER_ONE);
        log::debug!("autoformat: heading shortcut in block {}", state.start_key());
        return HandleResult::Handled;
    }

    for (marker, style) in STYLE_MARKERS.iter() {
        if text.starts_with(marker) && text.chars().count() == marker.len() {
            remove_marker(state, marker.len());
            log::debug!("autoformat: {} shortcut toggles {}", marker, style);
            rich_utils::toggle_inline_style(state, style.clone());
            return HandleResult::Handled;
        }
    }

    HandleResult::NotHandled
}

/// Delete the first `len` characters of the caret's block
fn remove_marker(state: &mut EditorState, len: usize) {
    let key = state.start_key();
    let mut content = state.content().clone();
    let result = content.apply_edit(EditOp::remove_range(Selection::within_block(key, 0, len)));
    state.push(content, result.selection_after, ChangeType::RemoveRange);
}

/// Route a key command to the built-in formatting handler
pub fn handle_key_command(state: &mut EditorState, command: &KeyCommand) -> HandleResult {
    rich_utils::handle_key_command(state, command).into()
}

/// End heading formatting on Enter
///
/// In a `header-one` block the block is split at the selection and the new
/// block below is made unstyled. Other blocks are left to the default split.
pub fn handle_return(state: &mut EditorState) -> HandleResult {
    if state.start_block().kind != BlockKind::HEADER_ONE {
        return HandleResult::NotHandled;
    }

    let mut content = state.content().clone();
    let split = content.apply_edit(EditOp::SplitBlock {
        at: state.selection().clone(),
    });
    let Some(created) = split.created_blocks.first().cloned() else {
        return HandleResult::NotHandled;
    };
    content.apply_edit(EditOp::SetBlockKind {
        range: Selection::caret(created, 0),
        kind: BlockKind::Unstyled,
    });
    state.push(content, split.selection_after, ChangeType::SplitBlock);
    HandleResult::Handled
}
