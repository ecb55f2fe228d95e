//! Static lookup tables from style and block tags to presentation

use crate::document::{BlockKind, ContentBlock, InlineStyle, StyleSet};

/// One CSS property/value pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CssDeclaration {
    pub property: &'static str,
    pub value: &'static str,
}

/// Inline style tag to its visual property
pub const CUSTOM_STYLE_MAP: [(&str, CssDeclaration); 3] = [
    (
        "BOLD",
        CssDeclaration {
            property: "font-weight",
            value: "bold",
        },
    ),
    (
        "RED",
        CssDeclaration {
            property: "color",
            value: "red",
        },
    ),
    (
        "UNDERLINE",
        CssDeclaration {
            property: "text-decoration",
            value: "underline",
        },
    ),
];

/// Display class for `header-one` blocks
pub const HEADER_ONE_CLASS: &str = "text-3xl font-bold";

/// Visual attribute for an inline style, `None` for unmapped tags
pub fn inline_style_css(style: &InlineStyle) -> Option<CssDeclaration> {
    CUSTOM_STYLE_MAP
        .iter()
        .find(|(tag, _)| *tag == style.tag())
        .map(|(_, css)| *css)
}

/// Inline CSS text for a set of styles, e.g. `font-weight: bold; color: red`
pub fn style_set_css(styles: &StyleSet) -> String {
    styles
        .iter()
        .filter_map(inline_style_css)
        .map(|css| format!("{}: {}", css.property, css.value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Display class for a block, empty for everything but `header-one`
pub fn block_style_class(block: &ContentBlock) -> &'static str {
    if block.kind == BlockKind::HEADER_ONE {
        HEADER_ONE_CLASS
    } else {
        ""
    }
}
