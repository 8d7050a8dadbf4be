//! Shared color constants for the UI.

use egui::Color32;

/// Red color for a failed fetch.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Amber color while a fetch is in flight.
pub const COLOR_AMBER: Color32 = Color32::from_rgb(255, 193, 7);

/// Border color for the table frame (subtle gray).
pub const TABLE_BORDER_COLOR: Color32 = Color32::from_rgb(200, 200, 200);
