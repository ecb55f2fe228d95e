//! Benchmarks for the editor core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shortcut_editor::render::render_content;
use shortcut_editor::storage::{deserialize, serialize};
use shortcut_editor::{ContentState, Editor, EditorConfig, KeyCommand, MemoryStore, RawContent};

fn editor() -> Editor<MemoryStore> {
    Editor::mount(MemoryStore::new(), EditorConfig::default(), 0)
}

fn type_line(editor: &mut Editor<MemoryStore>, text: &str) {
    for ch in text.chars() {
        editor.handle_input(&ch.to_string());
    }
    editor.press_return();
}

/// A document of headings, bold and red paragraphs
fn sample_editor(sections: usize) -> Editor<MemoryStore> {
    let mut editor = editor();
    for i in 0..sections {
        type_line(&mut editor, &format!("# Section {}", i));
        type_line(&mut editor, "* Bold opening words of the paragraph");
        type_line(&mut editor, "** and a red remark, then some plain text to follow.");
    }
    editor
}

fn bench_type_char(c: &mut Criterion) {
    c.bench_function("type_single_char", |b| {
        let mut editor = editor();
        b.iter(|| {
            editor.handle_input(black_box("x"));
        });
    });
}

fn bench_heading_shortcut(c: &mut Criterion) {
    c.bench_function("heading_shortcut", |b| {
        b.iter(|| {
            let mut editor = editor();
            editor.handle_input("#");
            black_box(editor.handle_input(" "));
        });
    });
}

fn bench_toggle_bold(c: &mut Criterion) {
    c.bench_function("toggle_bold_key_command", |b| {
        let mut editor = sample_editor(5);
        b.iter(|| {
            editor.key_command(black_box(&KeyCommand::Bold));
        });
    });
}

fn bench_raw_round_trip(c: &mut Criterion) {
    let editor = sample_editor(50);
    let json = serialize(editor.content()).unwrap_or_default();

    c.bench_function("to_raw_50_sections", |b| {
        b.iter(|| black_box(editor.content().to_raw()));
    });

    c.bench_function("parse_raw_50_sections", |b| {
        b.iter(|| {
            let raw: RawContent = serde_json::from_str(black_box(&json)).unwrap();
            black_box(ContentState::from_raw(raw).unwrap())
        });
    });

    c.bench_function("deserialize_50_sections", |b| {
        b.iter(|| black_box(deserialize(black_box(&json)).unwrap()));
    });
}

fn bench_render(c: &mut Criterion) {
    c.bench_function("render_50_sections", |b| {
        let editor = sample_editor(50);
        b.iter(|| black_box(render_content(editor.content())));
    });
}

fn bench_undo_redo(c: &mut Criterion) {
    c.bench_function("undo_redo_cycle", |b| {
        let mut editor = sample_editor(5);
        b.iter(|| {
            if editor.undo() {
                editor.redo();
            }
        });
    });
}

criterion_group!(
    benches,
    bench_type_char,
    bench_heading_shortcut,
    bench_toggle_bold,
    bench_raw_round_trip,
    bench_render,
    bench_undo_redo,
);

criterion_main!(benches);
