//! Per-button title and video editor

use eframe::egui;

use super::Action;
use crate::constants::grid::STOP_SLOT;
use crate::constants::player::VIDEO_EXTENSIONS;
use crate::gui::constants::ITEM_SPACING;
use crate::settings::ButtonSlot;

/// Edit buffers for the button being configured
pub struct ButtonEditorState {
    index: usize,
    title: String,
    video: String,
}

impl ButtonEditorState {
    pub fn new(index: usize, slot: &ButtonSlot) -> Self {
        Self {
            index,
            title: slot.title.clone(),
            video: slot.video.clone(),
        }
    }

    fn is_stop_slot(&self) -> bool {
        self.index == STOP_SLOT
    }

    fn window_title(&self) -> String {
        if self.is_stop_slot() {
            "Configure VR Experience Button".to_string()
        } else {
            format!("Configure Button {}", self.index + 1)
        }
    }

    fn to_action(&self) -> Action {
        let video = (!self.is_stop_slot() && !self.video.trim().is_empty())
            .then(|| self.video.trim().to_string());
        Action::ApplyButton {
            index: self.index,
            title: self.title.clone(),
            video,
        }
    }
}

/// Renders the editor; clears `state` when the window is closed or applied
pub fn show(ctx: &egui::Context, state: &mut Option<ButtonEditorState>, actions: &mut Vec<Action>) {
    let Some(editor) = state.as_mut() else {
        return;
    };

    let mut open = true;
    let mut done = false;
    egui::Window::new(editor.window_title())
        .id(egui::Id::new("button_editor"))
        .open(&mut open)
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Title:");
                ui.text_edit_singleline(&mut editor.title);
            });

            if !editor.is_stop_slot() {
                ui.add_space(ITEM_SPACING);
                ui.horizontal(|ui| {
                    ui.label("Video:");
                    ui.text_edit_singleline(&mut editor.video);
                    if ui.button("Browse…").clicked()
                        && let Some(path) = rfd::FileDialog::new()
                            .set_title("Select Video File")
                            .add_filter("Video Files", VIDEO_EXTENSIONS)
                            .add_filter("All Files", &["*"])
                            .pick_file()
                    {
                        editor.video = path.to_string_lossy().into_owned();
                    }
                });
                ui.label(egui::RichText::new("Files can also be dragged onto the button").small().weak());
            } else {
                ui.label(egui::RichText::new("This button stops playback").small().weak());
            }

            ui.add_space(ITEM_SPACING);
            ui.horizontal(|ui| {
                if ui.button("Apply").clicked() {
                    actions.push(editor.to_action());
                    done = true;
                }
                if ui.button("Cancel").clicked() {
                    done = true;
                }
            });
        });

    if done || !open {
        *state = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_omits_blank_video() {
        let slot = ButtonSlot {
            title: "Lobby".to_string(),
            video: "  ".to_string(),
        };
        let action = ButtonEditorState::new(3, &slot).to_action();
        assert_eq!(
            action,
            Action::ApplyButton {
                index: 3,
                title: "Lobby".to_string(),
                video: None
            }
        );
    }

    #[test]
    fn test_stop_slot_never_carries_video() {
        let slot = ButtonSlot {
            title: "VR Experience".to_string(),
            video: "/videos/vr.mp4".to_string(),
        };
        let state = ButtonEditorState::new(STOP_SLOT, &slot);
        assert_eq!(state.window_title(), "Configure VR Experience Button");
        assert!(matches!(state.to_action(), Action::ApplyButton { video: None, .. }));
    }
}
