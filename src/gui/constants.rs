//! Layout and timing constants for the launcher window

use std::time::Duration;

pub const WINDOW_TITLE: &str = "Video Launcher";

pub const ITEM_SPACING: f32 = 8.0;
pub const SECTION_SPACING: f32 = 15.0;

/// Gap around each grid button
pub const GRID_PADDING: f32 = 5.0;
pub const BUTTON_BORDER_WIDTH: f32 = 4.0;

pub const SETTINGS_WINDOW_WIDTH: f32 = 400.0;
pub const FONT_WINDOW_WIDTH: f32 = 300.0;
pub const FONT_LIST_HEIGHT: f32 = 220.0;
pub const HELP_WINDOW_WIDTH: f32 = 500.0;

/// Window moves settle for this long before the geometry is written
pub const GEOMETRY_SAVE_DELAY: Duration = Duration::from_millis(500);
/// Keeps player and signal polling alive while the UI is idle
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);
