// LinkSphere - ui/panels/note_dialog.rs
//
// Add Note dialog: title, free-text body, OK / Cancel.

use crate::app::state::AppState;
use crate::ui::theme::{self, Palette};

/// Render the dialog (if `state.note_dialog` is Some).
pub fn render(ctx: &egui::Context, state: &mut AppState, palette: &Palette) {
    let Some(draft) = state.note_dialog.as_mut() else {
        return;
    };

    let mut open = true;
    let mut submit = false;
    let mut cancel = false;

    egui::Window::new("Add Note")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .min_width(theme::DIALOG_WIDTH)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label("Title:");
            ui.add(egui::TextEdit::singleline(&mut draft.title).desired_width(f32::INFINITY));
            ui.add_space(4.0);
            ui.label("Note:");
            ui.add(
                egui::TextEdit::multiline(&mut draft.body)
                    .desired_rows(6)
                    .desired_width(f32::INFINITY),
            );

            if let Some(ref err) = draft.error {
                ui.colored_label(palette.error_text, err);
            }

            ui.separator();
            ui.horizontal(|ui| {
                submit = ui.button("OK").clicked();
                cancel = ui.button("Cancel").clicked();
            });
        });

    if !open || cancel {
        state.note_dialog = None;
    } else if submit {
        state.submit_note_dialog();
    }
}
