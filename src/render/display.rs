//! Render-ready projection of the document

use super::style_map::{block_style_class, style_set_css};
use crate::document::{BlockKind, ContentBlock, ContentState, StyleSet};
use serde::{Deserialize, Serialize};

/// A run of characters sharing one style set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledSpan {
    pub text: String,
    /// Inline style tags, e.g. `["BOLD", "RED"]`
    pub styles: Vec<String>,
    /// Inline CSS for the mapped styles
    pub css: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedBlock {
    pub key: String,
    pub block_type: String,
    pub class_name: String,
    pub spans: Vec<StyledSpan>,
}

fn span(block: &ContentBlock, start: usize, end: usize, styles: &StyleSet) -> StyledSpan {
    StyledSpan {
        text: block.slice(start, end).to_string(),
        styles: styles.iter().map(|s| s.tag().to_string()).collect(),
        css: style_set_css(styles),
    }
}

/// Split a block into maximal equally-styled spans
pub fn render_block(block: &ContentBlock) -> RenderedBlock {
    let mut spans = Vec::new();
    let mut run_start = 0;
    for offset in 1..=block.len() {
        let run_style = &block.styles()[run_start];
        if offset == block.len() || block.styles()[offset] != *run_style {
            spans.push(span(block, run_start, offset, run_style));
            run_start = offset;
        }
    }

    RenderedBlock {
        key: block.key.to_string(),
        block_type: block.kind.tag().to_string(),
        class_name: block_style_class(block).to_string(),
        spans,
    }
}

/// Render every block in document order
pub fn render_content(content: &ContentState) -> Vec<RenderedBlock> {
    content.blocks().iter().map(render_block).collect()
}

/// The placeholder shows only over an empty, unstyled document
pub fn show_placeholder(content: &ContentState) -> bool {
    !content.has_text() && content.first_block().kind == BlockKind::Unstyled
}
