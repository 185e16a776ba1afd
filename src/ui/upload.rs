// src/ui/upload.rs
use eframe::egui;
use rfd::FileDialog;
use crate::file::{LOG_EXTENSIONS, PLAYBOOK_EXTENSIONS};
use crate::state::AppState;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(0, 255, 170);
const ERROR_RED: egui::Color32 = egui::Color32::from_rgb(255, 71, 87);

enum CardAction {
    None,
    Browse,
    Clear,
}

pub fn pick_log_file(state: &mut AppState) {
    let file_dialog = FileDialog::new()
        .add_filter("Log files", LOG_EXTENSIONS)
        .set_title("Select Security Log File");

    if let Some(path) = file_dialog.pick_file() {
        state.selection.set_logfile(path);
    }
}

pub fn pick_playbook(state: &mut AppState) {
    let file_dialog = FileDialog::new()
        .add_filter("Playbooks", PLAYBOOK_EXTENSIONS)
        .set_title("Select Incident Playbook");

    if let Some(path) = file_dialog.pick_file() {
        state.selection.set_playbook(path);
    }
}

fn file_card(ui: &mut egui::Ui, icon: &str, title: &str, hint: &str, selected: Option<String>, clearable: bool) -> CardAction {
    let mut action = CardAction::None;

    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(icon).size(28.0));
            ui.label(egui::RichText::new(title).strong());
            ui.label(egui::RichText::new(hint).small().weak());
            ui.add_space(4.0);

            match &selected {
                Some(name) => {
                    ui.label(egui::RichText::new(format!("✓ {}", name)).color(ACCENT));
                }
                None => {
                    ui.label(egui::RichText::new("No file selected").weak());
                }
            }

            ui.horizontal(|ui| {
                if ui.button("📂 Browse...").clicked() {
                    action = CardAction::Browse;
                }
                if clearable && selected.is_some() && ui.button("✖ Remove").clicked() {
                    action = CardAction::Clear;
                }
            });
        });
    });

    action
}

pub fn show_upload_view(ui: &mut egui::Ui, state: &mut AppState, now: f64) {
    ui.heading("📁 Upload Files for Analysis");
    ui.add_space(8.0);

    let log_name = state.selection.logfile_name();
    let playbook_name = state.selection.playbook_name();

    let (log_action, playbook_action) = ui.columns(2, |columns| {
        let log_action = file_card(
            &mut columns[0],
            "📋",
            "Security Log File",
            "auth.log, syslog, or any .log/.txt file",
            log_name,
            false,
        );
        let playbook_action = file_card(
            &mut columns[1],
            "📖",
            "Incident Playbook (Optional)",
            "Custom response playbook (.md or .txt)",
            playbook_name,
            true,
        );
        (log_action, playbook_action)
    });

    if let CardAction::Browse = log_action {
        pick_log_file(state);
    }
    match playbook_action {
        CardAction::Browse => pick_playbook(state),
        CardAction::Clear => state.selection.clear_playbook(),
        CardAction::None => {}
    }

    let hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
    if hovering {
        ui.label(egui::RichText::new("Drop a .log or .txt file to select it").color(ACCENT));
    } else {
        ui.label(egui::RichText::new("Tip: drag and drop a log file anywhere on the window").small().weak());
    }

    ui.add_space(12.0);

    ui.horizontal(|ui| {
        let label = if state.is_analyzing() {
            "Analyzing Threats..."
        } else {
            "⚡ Analyze & Generate Report"
        };
        let button = egui::Button::new(egui::RichText::new(label).strong().size(16.0))
            .min_size(egui::vec2(260.0, 36.0));

        let response = ui.add_enabled(state.can_submit(), button)
            .on_disabled_hover_text("Select a log file first");
        if response.clicked() {
            state.submit(now);
        }

        if let (Some(stage), Some(elapsed)) = (state.progress_label(now), state.progress_elapsed(now)) {
            ui.spinner();
            ui.label(stage);
            ui.label(egui::RichText::new(format!("{:.0}s", elapsed)).weak());
        }
    });
}

pub fn show_error_banner(ui: &mut egui::Ui, state: &mut AppState) {
    let Some(error) = state.error_message.clone() else { return };

    ui.add_space(12.0);
    egui::Frame::none()
        .fill(ERROR_RED.linear_multiply(0.15))
        .stroke(egui::Stroke::new(1.0, ERROR_RED))
        .rounding(6.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("⚠").color(ERROR_RED).size(18.0));
                ui.label(egui::RichText::new(&error).color(ERROR_RED));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("✖").clicked() {
                        state.error_message = None;
                    }
                });
            });
        });
}
