//! Modal-style message boxes

use eframe::egui::{self, Align2, Color32, RichText};

use super::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, title, message)
    }

    fn new(kind: NoticeKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Shows the current notice, clearing it on OK
pub fn show(ctx: &egui::Context, notice: &mut Option<Notice>) {
    let Some(current) = notice else {
        return;
    };

    let accent = match current.kind {
        NoticeKind::Info => ctx.style().visuals.text_color(),
        NoticeKind::Warning => Color32::from_rgb(0xE0, 0xA0, 0x20),
        NoticeKind::Error => ctx.style().visuals.error_fg_color,
    };

    let mut dismissed = false;
    egui::Window::new(current.title.as_str())
        .id(egui::Id::new("notice"))
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(RichText::new(&current.message).color(accent));
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        *notice = None;
    }
}

/// Yes/No confirmation before wiping settings
pub fn confirm_reset(ctx: &egui::Context, open: &mut bool, actions: &mut Vec<Action>) {
    if !*open {
        return;
    }
    egui::Window::new("Reset Settings")
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label("Are you sure you want to reset all settings to default?");
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Yes").clicked() {
                    actions.push(Action::ConfirmReset);
                    *open = false;
                }
                if ui.button("No").clicked() {
                    *open = false;
                }
            });
        });
}
