//! Settings window: player path, colors, reset, per-button configuration

use eframe::egui::{self, Color32};

use super::Action;
use crate::color::HexColor;
use crate::constants::grid::{BUTTON_COUNT, STOP_SLOT};
use crate::gui::constants::*;
use crate::settings::Settings;

pub fn show(ctx: &egui::Context, open: &mut bool, settings: &mut Settings, actions: &mut Vec<Action>) {
    egui::Window::new("Settings")
        .open(open)
        .resizable(false)
        .collapsible(false)
        .default_width(SETTINGS_WINDOW_WIDTH)
        .show(ctx, |ui| {
            ui.group(|ui| {
                ui.label(egui::RichText::new("Player").strong());
                ui.add_space(ITEM_SPACING);
                let current = if settings.mpv_path.is_empty() {
                    "mpv from PATH"
                } else {
                    settings.mpv_path.as_str()
                };
                ui.label(egui::RichText::new(current).small().weak());
                if ui.button("Set mpv Executable Path").clicked() {
                    actions.push(Action::PickPlayerPath);
                }
            });

            ui.add_space(SECTION_SPACING);

            ui.group(|ui| {
                ui.label(egui::RichText::new("Appearance").strong());
                ui.add_space(ITEM_SPACING);

                let mut changed = false;
                changed |= color_row(ui, "Background Color:", &mut settings.background_color);
                changed |= color_row(ui, "Button Border Color:", &mut settings.button_border_color);
                changed |= color_row(ui, "Button Text Color:", &mut settings.button_text_color);
                if changed {
                    actions.push(Action::StyleChanged);
                }
            });

            ui.add_space(SECTION_SPACING);

            ui.group(|ui| {
                ui.label(egui::RichText::new("Buttons").strong());
                ui.add_space(ITEM_SPACING);
                for index in 0..BUTTON_COUNT {
                    let label = if index == STOP_SLOT {
                        "Configure VR Experience Button".to_string()
                    } else {
                        format!("Configure Button {}", index + 1)
                    };
                    let button = egui::Button::new(label).min_size(egui::vec2(ui.available_width(), 0.0));
                    if ui.add(button).clicked() {
                        actions.push(Action::ConfigureButton(index));
                    }
                }
            });

            ui.add_space(SECTION_SPACING);

            if ui.button("Reset Settings").clicked() {
                actions.push(Action::RequestReset);
            }
        });
}

/// Color picker bound to a hex string; returns true when the string changed
fn color_row(ui: &mut egui::Ui, label: &str, hex: &mut String) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(label);
        let mut color = HexColor::parse(hex.as_str())
            .map(HexColor::to_color32)
            .unwrap_or(Color32::BLACK);
        if ui.color_edit_button_srgba(&mut color).changed() {
            *hex = HexColor::from_color32(color).to_hex_string();
            changed = true;
        }
        ui.label(egui::RichText::new(hex.as_str()).monospace().small());
    });
    changed
}
