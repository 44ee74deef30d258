// LinkSphere - ui/panels/about.rs
//
// Help > About: version, platform, and where the library lives.

use crate::app::state::AppState;
use crate::util::constants::{APP_NAME, APP_VERSION};

pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_about {
        return;
    }

    let mut open = state.show_about;
    egui::Window::new(format!("About {APP_NAME}"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(340.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.heading(APP_NAME);
            ui.label("A shortcut organiser for applications, folders, and files.");
            ui.add_space(8.0);

            egui::Grid::new("about_grid")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    ui.weak("Version");
                    ui.label(APP_VERSION);
                    ui.end_row();

                    ui.weak("Platform");
                    ui.label(state.os_kind.label());
                    ui.end_row();

                    ui.weak("Library");
                    match state.library_path {
                        Some(ref path) => ui.monospace(path.display().to_string()),
                        None => ui.label("not saved"),
                    };
                    ui.end_row();

                    ui.weak("Contents");
                    ui.label(format!(
                        "{} shortcut(s), {} note(s)",
                        state.library.shortcuts().len(),
                        state.library.notes().len()
                    ));
                    ui.end_row();
                });
        });

    state.show_about = open;
}
