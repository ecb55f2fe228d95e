//! Render output: style lookup tables and styled spans

mod display;
pub mod style_map;

pub use display::{render_block, render_content, show_placeholder, RenderedBlock, StyledSpan};
pub use style_map::{block_style_class, inline_style_css, CssDeclaration};
