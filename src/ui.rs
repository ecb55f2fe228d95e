//! Fixed strings shown around the editing surface

pub const TITLE: &str = "Simple Editor";

pub const SAVE_LABEL: &str = "Save";

/// Shown over an empty unstyled document
pub const PLACEHOLDER: &str = "Start typing here...";

/// Shortcut reference shown beside the editor
pub const HELP_ITEMS: [&str; 4] = [
    "# [space] for heading",
    "* [space] for bold",
    "** [space] for red",
    "*** [space] for underline",
];

pub const HELP_FOOTER: &str = "Enter new line to end formatting.";
