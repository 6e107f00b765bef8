//! Right-click menu shared by the grid background and every button

use eframe::egui;

use super::Action;

pub fn ui(ui: &mut egui::Ui, actions: &mut Vec<Action>) {
    let entries = [
        ("Settings", Action::OpenSettings),
        ("Select Font", Action::OpenFontPicker),
        ("Toggle Fullscreen", Action::ToggleFullscreen),
        ("Help", Action::OpenHelp),
        ("Quit", Action::Quit),
    ];
    for (label, action) in entries {
        if ui.button(label).clicked() {
            actions.push(action);
            ui.close_menu();
        }
    }
}
