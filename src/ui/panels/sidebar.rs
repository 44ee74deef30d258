// LinkSphere - ui/panels/sidebar.rs
//
// Left sidebar: category tree built from `Library::sidebar_tree`.
// Grouping nodes render as collapsing headers, leaves as selectable rows.

use crate::app::state::AppState;
use crate::core::model::SidebarNode;
use crate::ui::theme::Palette;

/// Render the sidebar tree.
pub fn render(ui: &mut egui::Ui, state: &mut AppState, palette: &Palette) {
    // Built fresh each frame from the library; never edited in place.
    let tree = state.library.sidebar_tree();
    for node in &tree {
        render_node(ui, state, palette, node);
    }
}

fn render_node(ui: &mut egui::Ui, state: &mut AppState, palette: &Palette, node: &SidebarNode) {
    if node.children.is_empty() {
        render_leaf(ui, state, palette, node);
        return;
    }

    egui::CollapsingHeader::new(egui::RichText::new(&node.label).strong())
        .id_salt(("sidebar_group", &node.label))
        .default_open(true)
        .show(ui, |ui| {
            for child in &node.children {
                render_node(ui, state, palette, child);
            }
        });
}

fn render_leaf(ui: &mut egui::Ui, state: &mut AppState, palette: &Palette, node: &SidebarNode) {
    let Some(category) = node.category else {
        ui.label(&node.label);
        return;
    };
    let selected = state.selected_category == category;

    ui.horizontal(|ui| {
        if ui.selectable_label(selected, &node.label).clicked() {
            state.select_category(category);
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                egui::RichText::new(node.count.to_string())
                    .small()
                    .color(palette.muted_text),
            );
        });
    });
}
