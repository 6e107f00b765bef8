//! Help window

use eframe::egui;

use crate::gui::constants::HELP_WINDOW_WIDTH;

const HELP_TEXT: &[(&str, &[&str])] = &[
    ("Main Screen", &["Displays 9 buttons in a 3x3 grid."]),
    (
        "Button Actions",
        &[
            "Click a button to play the assigned video on loop using mpv.",
            "The 9th button ('VR Experience') closes mpv.",
            "Pressing another button switches videos; only one player runs at a time.",
        ],
    ),
    (
        "Customization",
        &[
            "Right-click to access the context menu.",
            "Settings: Customize background color, button colors, titles, and video files.",
            "Drag and Drop: Drag video files onto buttons 1-8 to assign them.",
        ],
    ),
    (
        "Modes",
        &[
            "Toggle between fullscreen and windowed modes via the context menu.",
            "Fullscreen covers the monitor the window is on and is remembered per monitor.",
            "The application remembers the last mode and window position.",
        ],
    ),
    (
        "Additional Options",
        &[
            "Select Font: Choose the font and size for button text.",
            "Reset Settings: Restore default settings.",
            "Quit: Exit the application and stop playback.",
        ],
    ),
];

pub fn show(ctx: &egui::Context, open: &mut bool) {
    egui::Window::new("Help")
        .open(open)
        .resizable(false)
        .collapsible(false)
        .default_width(HELP_WINDOW_WIDTH)
        .show(ctx, |ui| {
            ui.heading("Video Launcher Application Help");
            for (number, (section, lines)) in HELP_TEXT.iter().enumerate() {
                ui.add_space(6.0);
                ui.label(egui::RichText::new(format!("{}. {section}", number + 1)).strong());
                for line in *lines {
                    ui.label(format!("   - {line}"));
                }
            }
        });
}
