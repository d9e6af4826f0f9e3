//! Terminal styles for the tree view.
//!
//! Rendering code asks for a style by what the text *is* (a position, a
//! filter match, a reviewed folder) and never picks colors itself.
//! Messages are colored separately in `render::print_messages`.

use console::Style;

/// Dotted positions (`1.2.1`).
pub fn position() -> Style {
    Style::new().dim()
}

/// Expand / collapse markers.
pub fn marker() -> Style {
    Style::new().cyan()
}

pub fn name() -> Style {
    Style::new()
}

/// Parts of a name matching the active filter.
pub fn matched() -> Style {
    Style::new().black().on_yellow()
}

pub fn reviewed() -> Style {
    Style::new().green()
}

/// Hidden-children counts, ids and other secondary details.
pub fn muted() -> Style {
    Style::new().color256(246)
}

pub fn current() -> Style {
    Style::new().bold()
}
