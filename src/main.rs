//! Shortcut Editor CLI (for trying the core from a terminal)
//! The main interface is through WASM bindings.
//!
//! Each stdin line is typed into the editor one character at a time,
//! followed by Enter. Lines starting with `:` are commands: `:save`,
//! `:quit`, or any key command name such as `:bold` or `:undo`.
//!
//! Usage: `shortcut-editor [DIR]`. The document lives in `DIR/<key>.json`;
//! an optional `DIR/config.json` holds an editor config.

use shortcut_editor::storage::{current_timestamp, FileStore};
use shortcut_editor::{ui, Editor, EditorConfig, KeyCommand, RenderedBlock, StorageError};
use std::fs;
use std::io::{self, BufRead, ErrorKind};
use std::path::Path;

const DEFAULT_DIR: &str = ".shortcut-editor";

fn read_config(dir: &Path) -> shortcut_editor::Result<EditorConfig> {
    match fs::read_to_string(dir.join("config.json")) {
        Ok(json) => EditorConfig::from_json(&json),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(EditorConfig::default()),
        Err(e) => Err(StorageError::from(e).into()),
    }
}

fn print_help() {
    println!("{}", ui::TITLE);
    for item in ui::HELP_ITEMS {
        println!("  {}", item);
    }
    println!("  {}", ui::HELP_FOOTER);
    println!("  :save, :quit, or a key command (:bold, :undo, :backspace, ...)");
    println!();
}

fn print_block(block: &RenderedBlock) {
    let mut line = String::new();
    for span in &block.spans {
        if span.styles.is_empty() {
            line.push_str(&span.text);
        } else {
            line.push_str(&format!("[{}]{}[/]", span.styles.join("+"), span.text));
        }
    }
    println!("  {:<10} | {}", block.block_type, line);
}

fn print_document<S: shortcut_editor::KeyValueStore>(editor: &Editor<S>) {
    if editor.show_placeholder() {
        println!("  {}", ui::PLACEHOLDER);
        return;
    }
    for block in editor.render() {
        print_block(&block);
    }
}

fn main() -> shortcut_editor::Result<()> {
    let dir = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_DIR.to_string());
    let dir = Path::new(&dir);
    let config = read_config(dir)?;
    let mut editor = Editor::new(FileStore::new(dir), config);

    print_help();
    print_document(&editor);

    for line in io::stdin().lock().lines() {
        let line = line.map_err(StorageError::from)?;
        editor.tick(current_timestamp());

        match line.strip_prefix(':') {
            Some("quit") => break,
            Some("save") => {
                editor.save()?;
                println!("saved to {}", dir.display());
            }
            Some(name) => {
                if !editor.key_command(&KeyCommand::from_name(name)) {
                    println!("{}: nothing to do", name);
                }
            }
            None => {
                for ch in line.chars() {
                    editor.handle_input(&ch.to_string());
                }
                editor.press_return();
            }
        }

        print_document(&editor);
    }

    editor.unmount();
    editor.save()
}
