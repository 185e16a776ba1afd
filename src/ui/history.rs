// src/ui/history.rs
use eframe::egui;
use crate::state::AppState;
use crate::utils::{file_name_from_path, truncate_preview};

const PREVIEW_CHARS: usize = 120;

pub fn show_history_panel(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading("History");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("⟳").on_hover_text("Refresh").clicked() {
                state.refresh_history();
            }
        });
    });
    ui.add_space(4.0);
    ui.separator();
    ui.add_space(4.0);

    let mut open_id = None;

    egui::ScrollArea::vertical()
        .id_source("history_list_scroll")
        .show(ui, |ui| {
            let recent = state.recent_history();
            if recent.is_empty() {
                ui.label(egui::RichText::new("No previous analyses").weak());
            }

            for entry in recent {
                ui.group(|ui| {
                    ui.set_width(ui.available_width());

                    let response = ui.selectable_label(
                        false,
                        egui::RichText::new(format!("📋 {}", file_name_from_path(&entry.file_path))).strong(),
                    );
                    ui.label(egui::RichText::new(entry.created_display()).small().weak());
                    ui.label(egui::RichText::new(truncate_preview(&entry.narrative, PREVIEW_CHARS)).small());

                    if response.clicked() {
                        open_id = Some(entry.id);
                    }
                });
                ui.add_space(4.0);
            }
        });

    if let Some(id) = open_id {
        state.open_history_entry(id);
    }
}

pub fn show_history_detail(ctx: &egui::Context, state: &mut AppState) {
    let Some(entry) = &state.history_detail else { return };
    let mut open = true;

    egui::Window::new(format!("Analysis #{}", entry.id))
        .open(&mut open)
        .collapsible(false)
        .default_width(520.0)
        .show(ctx, |ui| {
            ui.label(egui::RichText::new(file_name_from_path(&entry.file_path)).strong());
            ui.label(egui::RichText::new(entry.created_display()).small().weak());
            ui.add_space(8.0);

            egui::ScrollArea::vertical()
                .id_source("history_detail_scroll")
                .max_height(420.0)
                .show(ui, |ui| {
                    ui.heading("Narrative");
                    ui.label(&entry.narrative);

                    if !entry.recs.is_empty() {
                        ui.add_space(8.0);
                        ui.heading("Recommendations");
                        for (idx, rec) in entry.recs.iter().enumerate() {
                            ui.label(egui::RichText::new(format!("{}. {}", idx + 1, rec.title)).strong());
                            ui.label(&rec.content);
                            ui.add_space(4.0);
                        }
                    }
                });
        });

    if !open {
        state.history_detail = None;
    }
}
