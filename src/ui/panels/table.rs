// LinkSphere - ui/panels/table.rs
//
// Central area: the shortcut table for the selected sidebar category, or the
// notes list when the Notes category is selected.
//
// Click selects a row; double click requests the platform opener; the row
// context menu offers Open / Show in Folder / Remove. All actions are
// requests on AppState, consumed by gui.rs.

use crate::app::state::AppState;
use crate::core::model::Category;
use crate::ui::theme::{self, Palette};

/// Render the central table.
pub fn render(ui: &mut egui::Ui, state: &mut AppState, palette: &Palette) {
    ui.heading(state.selected_category.label());
    ui.separator();

    if state.selected_category == Category::Notes {
        render_notes(ui, state, palette);
    } else {
        render_shortcuts(ui, state, palette);
    }
}

/// What the user asked for on a row this frame.
enum RowAction {
    Select(u64),
    Open(u64),
    Reveal(u64),
    Remove(u64),
}

fn render_shortcuts(ui: &mut egui::Ui, state: &mut AppState, palette: &Palette) {
    let rows: Vec<(u64, String, crate::core::model::ShortcutKind, String, String)> = state
        .visible_shortcuts()
        .into_iter()
        .map(|s| {
            (
                s.id,
                s.name.clone(),
                s.kind,
                s.target.display().to_string(),
                s.added
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string(),
            )
        })
        .collect();

    if rows.is_empty() {
        ui.add_space(12.0);
        ui.label(
            egui::RichText::new(
                "No shortcuts here yet. Use Add Shortcut or Scan for Applications.",
            )
            .color(palette.muted_text),
        );
        return;
    }

    let mut action: Option<RowAction> = None;

    egui::ScrollArea::both()
        .id_salt("shortcut_table")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            egui::Grid::new("shortcut_grid")
                .num_columns(4)
                .striped(true)
                .min_row_height(theme::ROW_HEIGHT)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    ui.strong("Name");
                    ui.strong("Kind");
                    ui.strong("Target");
                    ui.strong("Added");
                    ui.end_row();

                    for (id, name, kind, target, added) in &rows {
                        let selected = state.selected_shortcut == Some(*id);
                        let resp = ui.selectable_label(selected, name);
                        if resp.double_clicked() {
                            action = Some(RowAction::Open(*id));
                        } else if resp.clicked() {
                            action = Some(RowAction::Select(*id));
                        }
                        resp.context_menu(|ui| {
                            if ui.button("Open").clicked() {
                                action = Some(RowAction::Open(*id));
                                ui.close_menu();
                            }
                            if ui.button("Show in Folder").clicked() {
                                action = Some(RowAction::Reveal(*id));
                                ui.close_menu();
                            }
                            ui.separator();
                            if ui.button("Remove").clicked() {
                                action = Some(RowAction::Remove(*id));
                                ui.close_menu();
                            }
                        });

                        ui.colored_label(palette.kind_colour(*kind), kind.label());
                        ui.label(egui::RichText::new(target).monospace())
                            .on_hover_text(target);
                        ui.label(egui::RichText::new(added).color(palette.muted_text));
                        ui.end_row();
                    }
                });
        });

    match action {
        Some(RowAction::Select(id)) => state.selected_shortcut = Some(id),
        Some(RowAction::Open(id)) => {
            state.selected_shortcut = Some(id);
            state.pending_open = state.library.shortcut(id).map(|s| s.target.clone());
        }
        Some(RowAction::Reveal(id)) => {
            state.pending_reveal = state.library.shortcut(id).map(|s| s.target.clone());
        }
        Some(RowAction::Remove(id)) => {
            state.selected_shortcut = Some(id);
            state.remove_selected();
        }
        None => {}
    }
}

fn render_notes(ui: &mut egui::Ui, state: &mut AppState, palette: &Palette) {
    if state.library.notes().is_empty() {
        ui.add_space(12.0);
        ui.label(egui::RichText::new("No notes yet. Use Add Note.").color(palette.muted_text));
        return;
    }

    let mut clicked: Option<u64> = None;
    egui::ScrollArea::vertical()
        .id_salt("notes_list")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for note in state.library.notes() {
                let selected = state.selected_note == Some(note.id);
                ui.horizontal(|ui| {
                    if ui.selectable_label(selected, &note.title).clicked() {
                        clicked = Some(note.id);
                    }
                    ui.label(
                        egui::RichText::new(
                            note.created
                                .with_timezone(&chrono::Local)
                                .format("%Y-%m-%d")
                                .to_string(),
                        )
                        .small()
                        .color(palette.muted_text),
                    );
                });
                if selected && !note.body.is_empty() {
                    ui.indent(("note_body", note.id), |ui| {
                        ui.label(&note.body);
                    });
                }
            }
        });

    if let Some(id) = clicked {
        state.selected_note = Some(id);
    }
}
