// LinkSphere - gui.rs
//
// Top-level eframe::App implementation.
// Wires together all UI panels, consumes the request flags they set, and
// manages the scan lifecycle.

use crate::app::scan::ScanManager;
use crate::app::state::AppState;
use crate::core::model::Theme;
use crate::platform;
use crate::ui;
use crate::ui::theme::Palette;

/// The LinkSphere application.
pub struct LinkSphereApp {
    pub state: AppState,
    pub scan_manager: ScanManager,
    /// Theme and font size last installed on the egui context.
    applied_style: Option<(Theme, f32)>,
}

impl LinkSphereApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            scan_manager: ScanManager::new(),
            applied_style: None,
        }
    }

    /// Re-install the theme only when it changed.
    fn sync_style(&mut self, ctx: &egui::Context) {
        let wanted = (self.state.theme, self.state.font_size);
        if self.applied_style != Some(wanted) {
            ui::theme::apply(ctx, wanted.0, wanted.1);
            self.applied_style = Some(wanted);
        }
    }

    /// Act on the request flags panels set during the previous frame.
    fn handle_requests(&mut self) {
        if std::mem::take(&mut self.state.request_scan) {
            self.state.begin_scan();
            self.scan_manager
                .start_scan(self.state.os_kind, self.state.extra_scan_roots.clone());
        }

        if std::mem::take(&mut self.state.request_cancel) {
            self.scan_manager.cancel_scan();
        }

        if std::mem::take(&mut self.state.request_submit_shortcut) {
            let is_dir = self
                .state
                .shortcut_dialog
                .as_ref()
                .is_some_and(|d| platform::fs::is_dir(std::path::Path::new(d.path.trim())));
            self.state.submit_shortcut_dialog(is_dir);
        }

        if std::mem::take(&mut self.state.request_import) {
            self.state
                .import_selected_scan_results(platform::fs::application_display_name);
        }

        if let Some(path) = self.state.pending_open.take() {
            self.state.status_message = if platform::fs::open_target(&path) {
                format!("Opened {}", path.display())
            } else {
                format!("Could not open {}", path.display())
            };
        }

        if let Some(path) = self.state.pending_reveal.take() {
            platform::fs::reveal_in_file_manager(&path);
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Add Shortcut\u{2026}").clicked() {
                        self.state.open_shortcut_dialog();
                        ui.close_menu();
                    }
                    if ui.button("Add Note\u{2026}").clicked() {
                        self.state.open_note_dialog();
                        ui.close_menu();
                    }
                    ui.separator();
                    let idle = !self.state.scan_running();
                    if ui
                        .add_enabled(idle, egui::Button::new("Scan for Applications\u{2026}"))
                        .clicked()
                    {
                        self.state.request_scan = true;
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("Edit", |ui| {
                    let has_selection = self.state.has_removable_selection();
                    if ui
                        .add_enabled(has_selection, egui::Button::new("Remove Selected"))
                        .clicked()
                    {
                        self.state.remove_selected();
                        ui.close_menu();
                    }
                });
                ui.menu_button("View", |ui| {
                    let target = self.state.selected_shortcut().map(|s| s.target.clone());
                    if ui
                        .add_enabled(target.is_some(), egui::Button::new("Show in Folder"))
                        .clicked()
                    {
                        self.state.pending_reveal = target;
                        ui.close_menu();
                    }
                    if ui.button("Reload Library").clicked() {
                        self.state.reload_library();
                        ui.close_menu();
                    }
                });
                ui.menu_button("Theme", |ui| {
                    for theme in [Theme::Light, Theme::Dark] {
                        if ui
                            .radio(self.state.theme == theme, theme.menu_label())
                            .clicked()
                        {
                            self.state.set_theme(theme);
                            ui.close_menu();
                        }
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("\u{2795} Add Shortcut").clicked() {
                    self.state.open_shortcut_dialog();
                }
                if ui.button("\u{1f4dd} Add Note").clicked() {
                    self.state.open_note_dialog();
                }
                ui.separator();
                let idle = !self.state.scan_running();
                if ui
                    .add_enabled(idle, egui::Button::new("\u{1f50d} Scan"))
                    .on_hover_text("Search the standard application folders")
                    .clicked()
                {
                    self.state.request_scan = true;
                }
            });
        });
    }

    fn status_bar(&mut self, ctx: &egui::Context, palette: &Palette) {
        egui::TopBottomPanel::bottom("status_bar")
            .frame(egui::Frame::side_top_panel(&ctx.style()).fill(palette.status_bg))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(palette.status_text, &self.state.status_message);
                    if self.state.scan_running() {
                        ui.add(
                            egui::ProgressBar::new(
                                f32::from(self.state.scan_dialog.percent) / 100.0,
                            )
                            .desired_width(160.0)
                            .show_percentage(),
                        );
                        if ui.small_button("Cancel").clicked() {
                            self.state.request_cancel = true;
                        }
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.colored_label(
                            palette.status_text,
                            format!("{} shortcut(s)", self.state.library.shortcuts().len()),
                        );
                        if !self.state.warnings.is_empty() {
                            ui.colored_label(
                                palette.error_text,
                                format!("\u{26a0} {} warning(s)", self.state.warnings.len()),
                            )
                            .on_hover_text(self.state.warnings.join("\n"));
                        }
                        if self.state.debug_mode {
                            ui.colored_label(palette.muted_text, "debug");
                        }
                    });
                });
            });
    }
}

impl eframe::App for LinkSphereApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_style(ctx);

        // Poll for scan progress
        let messages = self.scan_manager.poll_progress();
        let had_messages = !messages.is_empty();
        for msg in messages {
            self.state.apply_scan_event(msg);
        }
        // Repaint while scanning so progress updates appear promptly.
        if had_messages || self.state.scan_running() {
            ctx.request_repaint();
        }

        self.handle_requests();

        // Delete removes the selection unless a dialog or text field is active.
        if !self.state.dialog_open()
            && !ctx.wants_keyboard_input()
            && ctx.input(|i| i.key_pressed(egui::Key::Delete))
        {
            self.state.remove_selected();
        }

        let palette = Palette::for_theme(self.state.theme);

        self.menu_bar(ctx);
        self.toolbar(ctx);
        self.status_bar(ctx, &palette);

        egui::SidePanel::left("sidebar")
            .exact_width(ui::theme::SIDEBAR_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("sidebar_tree")
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        ui::panels::sidebar::render(ui, &mut self.state, &palette);
                    });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::table::render(ui, &mut self.state, &palette);
        });

        // Dialogs
        ui::panels::shortcut_dialog::render(ctx, &mut self.state, &palette);
        ui::panels::note_dialog::render(ctx, &mut self.state, &palette);
        ui::panels::scan_dialog::render(ctx, &mut self.state, &palette);
        ui::panels::about::render(ctx, &mut self.state);
    }

    /// Called by eframe when the application window is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.scan_manager.cancel_scan();
        self.state.save_library();
    }
}
