//! Shortcut Editor: a rich-text editing core with markdown-style shortcuts
//!
//! This crate provides:
//! - A block/inline-style document model with a Draft-compatible raw format
//! - Editor state with snapshot undo/redo and a pending inline style
//! - Autoformat rules: `#`, `*`, `**`, `***` followed by a space
//! - Local persistence with a periodic autosave
//! - WASM bindings for use from a browser page

pub mod autoformat;
pub mod config;
pub mod document;
pub mod editing;
pub mod error;
pub mod render;
pub mod storage;
pub mod ui;
pub mod undo;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmEditor;

// Re-export primary types
pub use autoformat::HandleResult;
pub use config::EditorConfig;
pub use document::{BlockKey, BlockKind, ContentBlock, ContentState, InlineStyle, RawContent, StyleSet};
pub use editing::{ChangeType, DocPosition, EditOp, EditResult, EditorState, KeyCommand, Selection};
pub use error::{EditorError, Result, StorageError};
pub use render::{RenderedBlock, StyledSpan};
pub use storage::{Autosave, KeyValueStore, MemoryStore};
pub use undo::UndoManager;

use editing::commands;
use storage::current_timestamp;

/// The editor component: state, its store and the autosave schedule
pub struct Editor<S: KeyValueStore> {
    state: EditorState,
    store: S,
    config: EditorConfig,
    autosave: Autosave,
}

impl<S: KeyValueStore> Editor<S> {
    /// Mount an editor over `store`, loading any saved document
    pub fn new(store: S, config: EditorConfig) -> Self {
        Self::mount(store, config, current_timestamp())
    }

    /// Mount with an explicit clock reading
    ///
    /// Missing or unreadable saved content yields an empty document. The
    /// first autosave falls due one interval after `now_ms`.
    pub fn mount(store: S, config: EditorConfig, now_ms: u64) -> Self {
        let content = storage::load(&store, &config.storage_key);
        let state = EditorState::create_with_content(content, config.undo_depth);
        let mut autosave = Autosave::new(config.autosave_interval_ms);
        autosave.start(now_ms);
        log::debug!(
            "editor mounted, autosave every {} ms under {:?}",
            autosave.interval_ms(),
            config.storage_key
        );

        Self {
            state,
            store,
            config,
            autosave,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn content(&self) -> &ContentState {
        self.state.content()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tear down the editor and hand back its store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Handle characters about to be inserted
    ///
    /// Shortcut rules get the first look; anything they pass on is inserted
    /// at the selection. Returns `Handled` when a shortcut consumed the input.
    pub fn handle_input(&mut self, chars: &str) -> HandleResult {
        let result = autoformat::handle_before_input(&mut self.state, chars);
        if !result.is_handled() {
            commands::insert_characters(&mut self.state, chars);
        }
        result
    }

    /// Handle the Enter key
    pub fn press_return(&mut self) -> HandleResult {
        let result = autoformat::handle_return(&mut self.state);
        if !result.is_handled() {
            commands::insert_newline(&mut self.state);
        }
        result
    }

    /// Run a named key command; returns true when the state changed
    pub fn key_command(&mut self, command: &KeyCommand) -> bool {
        if autoformat::handle_key_command(&mut self.state, command).is_handled() {
            return true;
        }
        if *command == KeyCommand::SplitBlock {
            self.press_return();
            return true;
        }

        let state = &mut self.state;
        match command {
            KeyCommand::Backspace => commands::backspace(state),
            KeyCommand::BackspaceWord => commands::backspace_word(state),
            KeyCommand::BackspaceToStartOfLine => commands::backspace_to_start_of_line(state),
            KeyCommand::Delete => commands::delete_forward(state),
            KeyCommand::DeleteWord => commands::delete_word(state),
            KeyCommand::DeleteToEndOfBlock => commands::delete_to_end_of_block(state),
            KeyCommand::Undo => state.undo(),
            KeyCommand::Redo => state.redo(),
            other => {
                log::debug!("unhandled key command {}", other);
                false
            }
        }
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.state.force_selection(selection);
    }

    pub fn undo(&mut self) -> bool {
        self.state.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.state.redo()
    }

    /// Write the current document to the store
    pub fn save(&mut self) -> Result<()> {
        storage::save(&mut self.store, &self.config.storage_key, self.state.content())
    }

    /// Advance the autosave clock; saves when due
    ///
    /// Returns true when a save was attempted. A failed automatic save is
    /// logged and otherwise ignored.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.autosave.poll(now_ms) {
            return false;
        }
        if let Err(e) = self.save() {
            log::warn!("autosave failed: {}", e);
        }
        true
    }

    pub fn is_mounted(&self) -> bool {
        self.autosave.is_running()
    }

    /// Stop automatic saves
    pub fn unmount(&mut self) {
        self.autosave.stop();
        log::debug!("editor unmounted");
    }

    /// Styled blocks ready for display
    pub fn render(&self) -> Vec<RenderedBlock> {
        render::render_content(self.state.content())
    }

    pub fn show_placeholder(&self) -> bool {
        render::show_placeholder(self.state.content())
    }

    /// The document in its persisted form
    pub fn raw_content(&self) -> RawContent {
        self.state.content().to_raw()
    }
}
