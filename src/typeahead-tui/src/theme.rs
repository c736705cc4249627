//! Colors used by the selector widgets.

use ratatui::style::Color;

/// Accent for the caret, focused border and highlighted row.
pub const ACCENT: Color = Color::Rgb(0, 255, 163); // #00FFA3

/// Input background.
pub const SURFACE: Color = Color::Rgb(27, 40, 56); // #1B2838

/// Highlighted row background.
pub const SURFACE_HIGHLIGHT: Color = Color::Rgb(36, 59, 83); // #243B53

pub const TEXT: Color = Color::Rgb(255, 255, 255); // #FFFFFF

pub const TEXT_DIM: Color = Color::Rgb(130, 154, 177); // #829AB1

pub const TEXT_MUTED: Color = Color::Rgb(72, 101, 129); // #486581

pub const BORDER: Color = Color::Rgb(27, 73, 101); // #1B4965

pub const ERROR: Color = Color::Rgb(255, 107, 107); // #FF6B6B
