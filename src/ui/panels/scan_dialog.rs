// LinkSphere - ui/panels/scan_dialog.rs
//
// Scan for Applications dialog.
//
// While the background scan runs: progress bar + Cancel.
// Afterwards: summary line and a checklist of discovered applications with
// Import Selected / Close. Partial results from a cancelled scan are listed
// the same way.
//
// Writes `state.request_cancel` / `state.request_import`; gui.rs consumes them.

use crate::app::state::AppState;
use crate::ui::theme::{self, Palette};

/// Render the scan dialog (if `state.scan_dialog.open` is true).
pub fn render(ctx: &egui::Context, state: &mut AppState, palette: &Palette) {
    if !state.scan_dialog.open {
        return;
    }

    let mut open = true;
    egui::Window::new("Scan for Applications")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .min_width(theme::DIALOG_WIDTH + 80.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if state.scan_dialog.running {
                render_running(ui, state);
            } else if let Some(ref notice) = state.scan_dialog.notice {
                ui.label(notice);
                ui.add_space(8.0);
                if ui.button("Close").clicked() {
                    state.scan_dialog.open = false;
                }
            } else {
                render_results(ui, state, palette);
            }
        });

    if !open {
        // Closing the window mid-scan also stops the worker.
        if state.scan_dialog.running {
            state.request_cancel = true;
        }
        state.scan_dialog.open = false;
    }
}

fn render_running(ui: &mut egui::Ui, state: &mut AppState) {
    ui.label(format!(
        "Searching {} application folders\u{2026}",
        state.os_kind
    ));
    ui.add_space(6.0);
    ui.add(
        egui::ProgressBar::new(f32::from(state.scan_dialog.percent) / 100.0)
            .show_percentage()
            .animate(true),
    );
    ui.add_space(6.0);
    if ui.button("Cancel").clicked() {
        state.request_cancel = true;
    }
}

fn render_results(ui: &mut egui::Ui, state: &mut AppState, palette: &Palette) {
    let dialog = &mut state.scan_dialog;

    if let Some(ref report) = dialog.report {
        let mut summary = format!(
            "{} application(s) found in {} file(s)",
            report.paths.len(),
            report.files_scanned
        );
        if report.cancelled {
            summary.push_str(" (cancelled; partial results)");
        }
        if report.skipped > 0 {
            summary.push_str(&format!(", {} unreadable entries skipped", report.skipped));
        }
        ui.label(summary);
    }

    if dialog.results.is_empty() {
        ui.label(egui::RichText::new("Nothing to import.").color(palette.muted_text));
    } else {
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                dialog.selected.iter_mut().for_each(|s| *s = true);
            }
            if ui.small_button("Select None").clicked() {
                dialog.selected.iter_mut().for_each(|s| *s = false);
            }
        });

        egui::ScrollArea::vertical()
            .id_salt("scan_results")
            .max_height(theme::SCAN_RESULTS_HEIGHT)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for (path, checked) in dialog.results.iter().zip(dialog.selected.iter_mut()) {
                    ui.checkbox(checked, egui::RichText::new(path).monospace());
                }
            });
    }

    ui.separator();
    let chosen = dialog.selected.iter().filter(|s| **s).count();
    ui.horizontal(|ui| {
        let import = ui.add_enabled(
            chosen > 0,
            egui::Button::new(format!("Import Selected ({chosen})")),
        );
        if import.clicked() {
            state.request_import = true;
        }
        if ui.button("Close").clicked() {
            state.scan_dialog.open = false;
        }
    });
}
