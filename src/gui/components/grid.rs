//! The 3×3 launch grid

use eframe::egui::{self, Color32, FontId, Pos2, Rect, RichText, Sense, Stroke, Vec2};

use super::{Action, context_menu};
use crate::constants::grid::{BUTTON_COUNT, COLUMNS, ROWS, STOP_SLOT};
use crate::gui::constants::{BUTTON_BORDER_WIDTH, GRID_PADDING};
use crate::settings::ButtonSlot;

/// Resolved colors and font for the grid buttons
pub struct GridStyle {
    pub background: Color32,
    pub border: Color32,
    pub text: Color32,
    pub font: FontId,
}

/// Draws the grid filling the panel and returns each button's rect,
/// indexed like `buttons`
pub fn ui(
    ui: &mut egui::Ui,
    buttons: &[ButtonSlot],
    style: &GridStyle,
    actions: &mut Vec<Action>,
) -> Vec<Rect> {
    // Background first so buttons win hit-testing
    let background = ui.interact(ui.max_rect(), ui.id().with("grid_background"), Sense::click());
    background.context_menu(|ui| context_menu::ui(ui, actions));

    let rects = cell_rects(ui.max_rect());
    for (index, (slot, rect)) in buttons.iter().zip(&rects).enumerate() {
        let label = RichText::new(&slot.title)
            .font(style.font.clone())
            .color(style.text);
        let button = egui::Button::new(label)
            .fill(style.background)
            .stroke(Stroke::new(BUTTON_BORDER_WIDTH, style.border));

        let response = ui.put(*rect, button);
        if response.clicked() {
            actions.push(if index == STOP_SLOT {
                Action::StopPlayback
            } else {
                Action::Play(index)
            });
        }
        response.context_menu(|ui| context_menu::ui(ui, actions));
    }
    rects
}

/// Split `area` into equal cells, row-major, each shrunk by the padding
pub fn cell_rects(area: Rect) -> Vec<Rect> {
    let cell = Vec2::new(area.width() / COLUMNS as f32, area.height() / ROWS as f32);
    (0..BUTTON_COUNT)
        .map(|i| {
            let (row, col) = (i / COLUMNS, i % COLUMNS);
            let min = area.min + Vec2::new(col as f32 * cell.x, row as f32 * cell.y);
            Rect::from_min_size(min, cell).shrink(GRID_PADDING)
        })
        .collect()
}

/// Launch button under `pos`. The stop button and the gaps accept no drops
pub fn drop_target(rects: &[Rect], pos: Pos2) -> Option<usize> {
    rects
        .iter()
        .position(|r| r.contains(pos))
        .filter(|&index| index != STOP_SLOT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(600.0, 600.0))
    }

    #[test]
    fn test_cell_rects_row_major_with_padding() {
        let rects = cell_rects(area());
        assert_eq!(rects.len(), 9);
        assert_eq!(rects[0], Rect::from_min_max(Pos2::new(5.0, 5.0), Pos2::new(195.0, 195.0)));
        // Second row, third column
        assert_eq!(rects[5].min, Pos2::new(405.0, 205.0));
        assert_eq!(rects[8].max, Pos2::new(595.0, 595.0));
    }

    #[test]
    fn test_drop_target_ignores_stop_button_and_gaps() {
        let rects = cell_rects(area());
        assert_eq!(drop_target(&rects, Pos2::new(100.0, 100.0)), Some(0));
        assert_eq!(drop_target(&rects, Pos2::new(300.0, 500.0)), Some(7));
        assert_eq!(drop_target(&rects, Pos2::new(500.0, 500.0)), None);
        // Between buttons 0 and 1
        assert_eq!(drop_target(&rects, Pos2::new(200.0, 100.0)), None);
    }
}
