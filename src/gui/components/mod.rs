//! UI components. Each renders itself and reports user intent as [`Action`]s
//! which the launcher applies after the frame is drawn.

use std::path::PathBuf;

pub mod button_editor;
pub mod context_menu;
pub mod font_picker;
pub mod grid;
pub mod help;
pub mod notice;
pub mod settings_window;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Play(usize),
    StopPlayback,
    /// A file was dropped on a launch button; `None` when the drop carried no path
    AssignDropped { index: usize, path: Option<PathBuf> },
    OpenSettings,
    OpenFontPicker,
    ToggleFullscreen,
    OpenHelp,
    Quit,
    PickPlayerPath,
    /// Colors were edited in place and need saving
    StyleChanged,
    RequestReset,
    ConfirmReset,
    ConfigureButton(usize),
    ApplyButton { index: usize, title: String, video: Option<String> },
    ApplyFont { family: Option<String>, size: u8 },
}
