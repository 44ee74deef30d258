// LinkSphere - ui/panels/shortcut_dialog.rs
//
// Add Shortcut dialog: a path field with native Browse pickers, an optional
// display name, and OK / Cancel.
//
// OK sets `state.request_submit_shortcut`; gui.rs checks whether the path is
// a directory and calls `AppState::submit_shortcut_dialog`.

use crate::app::state::AppState;
use crate::ui::theme::{self, Palette};

/// Render the dialog (if `state.shortcut_dialog` is Some).
pub fn render(ctx: &egui::Context, state: &mut AppState, palette: &Palette) {
    let Some(draft) = state.shortcut_dialog.as_mut() else {
        return;
    };

    let mut open = true;
    let mut submit = false;
    let mut cancel = false;

    egui::Window::new("Add Shortcut")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(theme::DIALOG_WIDTH)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label("Select folder or application:");
            let path_resp = ui.add(
                egui::TextEdit::singleline(&mut draft.path)
                    .hint_text("/path/to/app-or-folder")
                    .desired_width(f32::INFINITY),
            );

            ui.horizontal(|ui| {
                if ui.button("Browse\u{2026}").clicked() {
                    if let Some(file) = rfd::FileDialog::new().pick_file() {
                        draft.path = file.display().to_string();
                    }
                }
                if ui.button("Folder\u{2026}").clicked() {
                    if let Some(dir) = rfd::FileDialog::new().pick_folder() {
                        draft.path = dir.display().to_string();
                    }
                }
            });

            ui.add_space(6.0);
            ui.label("Name (optional):");
            ui.add(
                egui::TextEdit::singleline(&mut draft.name)
                    .hint_text("Defaults to the file name")
                    .desired_width(f32::INFINITY),
            );

            if let Some(ref err) = draft.error {
                ui.add_space(4.0);
                ui.colored_label(palette.error_text, err);
            }

            ui.add_space(8.0);
            ui.separator();
            ui.horizontal(|ui| {
                let enter = path_resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("OK").clicked() || enter {
                    submit = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

    if !open || cancel {
        state.shortcut_dialog = None;
    } else if submit {
        state.request_submit_shortcut = true;
    }
}
