//! Font family and size picker

use eframe::egui;

use super::Action;
use crate::constants::validation::{MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::gui::constants::*;
use crate::gui::fonts::FontCatalog;

pub struct FontPickerState {
    selected: Option<String>,
    size: u8,
    filter: String,
    scrolled: bool,
}

impl FontPickerState {
    /// Preselects the current family when the system has it
    pub fn new(catalog: &FontCatalog, family: &str, size: u8) -> Self {
        Self {
            selected: catalog.contains(family).then(|| family.to_string()),
            size,
            filter: String::new(),
            scrolled: false,
        }
    }
}

pub fn show(
    ctx: &egui::Context,
    state: &mut Option<FontPickerState>,
    catalog: &FontCatalog,
    actions: &mut Vec<Action>,
) {
    let Some(picker) = state.as_mut() else {
        return;
    };

    let mut open = true;
    let mut applied = false;
    egui::Window::new("Select Font")
        .open(&mut open)
        .resizable(false)
        .collapsible(false)
        .default_width(FONT_WINDOW_WIDTH)
        .show(ctx, |ui| {
            ui.label("Select Font Family:");
            ui.horizontal(|ui| {
                ui.label("Filter:");
                ui.text_edit_singleline(&mut picker.filter);
            });
            ui.add_space(ITEM_SPACING / 2.0);

            if catalog.is_empty() {
                ui.label(egui::RichText::new("No system fonts found").italics().weak());
            }

            let filter = picker.filter.to_lowercase();
            egui::ScrollArea::vertical()
                .max_height(FONT_LIST_HEIGHT)
                .show(ui, |ui| {
                    for family in catalog.families().filter(|f| f.to_lowercase().contains(&filter)) {
                        let is_selected = picker.selected.as_deref() == Some(family);
                        let response = ui.selectable_label(is_selected, family);
                        if response.clicked() {
                            picker.selected = Some(family.to_string());
                        }
                        if is_selected && !picker.scrolled {
                            response.scroll_to_me(Some(egui::Align::Center));
                            picker.scrolled = true;
                        }
                    }
                });

            ui.add_space(ITEM_SPACING);
            ui.horizontal(|ui| {
                ui.label("Select Font Size:");
                ui.add(egui::DragValue::new(&mut picker.size).range(MIN_FONT_SIZE..=MAX_FONT_SIZE));
            });

            ui.add_space(ITEM_SPACING);
            if ui.button("Apply").clicked() {
                actions.push(Action::ApplyFont {
                    family: picker.selected.clone(),
                    size: picker.size,
                });
                // Without a family the window stays open behind the warning
                applied = picker.selected.is_some();
            }
        });

    if applied || !open {
        *state = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_preselects_only_known_family() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Arial.ttf"), b"").unwrap();
        let catalog = FontCatalog::scan_dirs(&[dir.path().to_path_buf()]);

        let state = FontPickerState::new(&catalog, "Arial", 14);
        assert_eq!(state.selected.as_deref(), Some("Arial"));
        assert_eq!(state.size, 14);

        let state = FontPickerState::new(&catalog, "Comic Sans", 14);
        assert_eq!(state.selected, None);
    }
}
