//! Editing model: selection, edit operations, editor state and the
//! primitives that transform it

pub mod commands;
mod cursor;
mod operation;
pub mod rich_utils;
mod state;

pub use cursor::{DocPosition, Selection};
pub use operation::{ChangeType, EditOp, EditResult};
pub use rich_utils::KeyCommand;
pub use state::EditorState;
