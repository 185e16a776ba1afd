// src/app.rs
use std::sync::Arc;
use std::time::Duration;
use eframe::egui;

use crate::api::Backend;
use crate::config::Settings;
use crate::state::{AppState, BackendHealth};
use crate::ui;

pub struct SherlockApp {
    state: AppState,
}

impl SherlockApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, backend: Arc<dyn Backend>) -> Self {
        let mut state = AppState::new(settings, backend);
        state.set_repaint_context(cc.egui_ctx.clone());
        state.start();
        Self { state }
    }

    fn show_menu(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open Log File...").clicked() {
                    ui::upload::pick_log_file(&mut self.state);
                    ui.close_menu();
                }
                if ui.button("Open Playbook...").clicked() {
                    ui::upload::pick_playbook(&mut self.state);
                    ui.close_menu();
                }
                if ui.add_enabled(self.state.selection.playbook.is_some(), egui::Button::new("Remove Playbook")).clicked() {
                    self.state.selection.clear_playbook();
                    ui.close_menu();
                }
                ui.separator();
                if ui.add_enabled(self.state.result.is_some(), egui::Button::new("Export Findings...")).clicked() {
                    ui::results::export_findings(&mut self.state);
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Backend", |ui| {
                if ui.button("Check Connection").clicked() {
                    self.state.check_health();
                    ui.close_menu();
                }
                if ui.button("Refresh History").clicked() {
                    self.state.refresh_history();
                    ui.close_menu();
                }
            });

            ui.menu_button("View", |ui| {
                ui.checkbox(&mut self.state.show_trail, "Mouse trail");
            });

            ui.separator();
            ui.label(egui::RichText::new("🔍 SherlockLogs").strong());
            ui.label(egui::RichText::new("AI-Powered Security Log Analysis & Incident Response").weak());

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let (text, color) = match &self.state.health {
                    BackendHealth::Online(service) => (format!("● {}", service), egui::Color32::from_rgb(46, 213, 115)),
                    BackendHealth::Offline => ("● Backend offline".to_string(), egui::Color32::from_rgb(255, 71, 87)),
                    BackendHealth::Checking => ("● Connecting...".to_string(), egui::Color32::GRAY),
                    BackendHealth::Unknown => ("●".to_string(), egui::Color32::GRAY),
                };
                ui.label(egui::RichText::new(text).color(color))
                    .on_hover_text(&self.state.settings.api_url);
            });
        });
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            self.state.selection.accept_drop(&file.name, file.path);
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context, now: f64) {
        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Enter)) {
            self.state.submit(now);
        }
    }

    fn track_pointer(&mut self, ctx: &egui::Context, now: f64) {
        if !self.state.show_trail {
            self.state.trail.clear();
            return;
        }
        if let Some(pos) = ctx.input(|i| i.pointer.hover_pos()) {
            self.state.trail.push(pos, now);
        }
        self.state.trail.prune(now);
    }
}

impl eframe::App for SherlockApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);

        self.state.poll();
        self.handle_dropped_files(ctx);
        self.handle_shortcuts(ctx, now);
        self.track_pointer(ctx, now);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.show_menu(ui);
        });

        egui::SidePanel::right("history_panel")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                ui::history::show_history_panel(ui, &mut self.state);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_source("main_scroll")
                .show(ui, |ui| {
                    ui::upload::show_upload_view(ui, &mut self.state, now);
                    ui::upload::show_error_banner(ui, &mut self.state);
                    ui::results::show_results_view(ui, &mut self.state);
                });
        });

        ui::history::show_history_detail(ctx, &mut self.state);

        if self.state.show_trail {
            ui::trail::paint_trail(ctx, &self.state.trail, now);
        }

        // The stage ticker and the fading trail animate without input events.
        if self.state.is_analyzing() || !self.state.trail.is_empty() {
            ctx.request_repaint();
        } else if self.state.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
