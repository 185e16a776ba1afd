// src/ui/results.rs
use eframe::egui;
use rfd::FileDialog;
use crate::analysis::{top_failing_ips, Severity, Stats, StatusFilter};
use crate::api::{Finding, Recommendation, Summary, Threat};
use crate::file::save_findings_csv;
use crate::state::{AppState, FINDINGS_DISPLAY_LIMIT};

const FAILED_RED: egui::Color32 = egui::Color32::from_rgb(255, 71, 87);
const SUCCESS_GREEN: egui::Color32 = egui::Color32::from_rgb(46, 213, 115);
const IP_PURPLE: egui::Color32 = egui::Color32::from_rgb(168, 85, 247);
const TOP_IP_COUNT: usize = 8;

pub fn show_results_view(ui: &mut egui::Ui, state: &mut AppState) {
    let (Some(stats), Some(result)) = (state.stats(), &state.result) else { return };

    ui.add_space(16.0);
    draw_stats(ui, &stats);
    if let Some(summary) = &result.summary {
        ui.label(egui::RichText::new(summary_line(summary)).small().weak());
    }

    ui.add_space(12.0);
    section(ui, "📝", "Incident Narrative", "AI-generated story of what happened", |ui| {
        ui.label(&result.narrative);
    });

    if !result.recs.is_empty() {
        section(ui, "🎯", "Response Recommendations", "Playbook-based incident response steps", |ui| {
            draw_recommendations(ui, &result.recs);
        });
    }

    if !result.threats.is_empty() {
        section(ui, "🚨", "Threat Detections", "Patterns flagged by the analyzer", |ui| {
            draw_threats(ui, &result.threats);
        });
    }

    if stats.failed_events > 0 {
        section(ui, "📊", "Top Failing IPs", "Failed attempts per source address", |ui| {
            draw_failing_ips_chart(ui, &result.findings);
        });
    }

    if result.findings.is_empty() {
        return;
    }

    let mut export_requested = false;
    section(ui, "🔎", "Detailed Findings", "Parsed log events with threat indicators", |ui| {
        ui.horizontal(|ui| {
            ui.label("Search:");
            ui.add(
                egui::TextEdit::singleline(&mut state.filter.search)
                    .hint_text("user, IP or timestamp")
                    .desired_width(220.0)
            );

            egui::ComboBox::from_id_source("status_filter")
                .selected_text(state.filter.status.label())
                .show_ui(ui, |ui| {
                    for status in StatusFilter::ALL {
                        ui.selectable_value(&mut state.filter.status, status, status.label());
                    }
                });

            if state.filter.is_active() && ui.button("Reset").clicked() {
                state.filter = Default::default();
            }

            if ui.button("💾 Export CSV...").clicked() {
                export_requested = true;
            }
        });
        ui.add_space(8.0);

        if let Some(result) = &state.result {
            let filtered = state.filter.apply(&result.findings);
            draw_findings_table(ui, &filtered);
        }
    });

    if export_requested {
        export_findings(state);
    }
}

/// Saves the findings currently passing the filter to a CSV file picked by
/// the user.
pub fn export_findings(state: &mut AppState) {
    let findings = state.filtered_findings();
    if findings.is_empty() {
        return;
    }

    let file_dialog = FileDialog::new()
        .add_filter("CSV files", &["csv"])
        .set_file_name("findings.csv")
        .set_title("Export Findings");

    if let Some(path) = file_dialog.save_file() {
        if let Err(e) = save_findings_csv(&path, &findings) {
            state.error_message = Some(format!("Error exporting findings: {}", e));
        }
    }
}

fn section(ui: &mut egui::Ui, icon: &str, title: &str, subtitle: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(icon).size(22.0));
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(title).strong().size(16.0));
                ui.label(egui::RichText::new(subtitle).small().weak());
            });
        });
        ui.add_space(8.0);
        add_contents(ui);
    });
    ui.add_space(8.0);
}

fn stat_card(ui: &mut egui::Ui, value: String, label: &str, color: Option<egui::Color32>) {
    ui.group(|ui| {
        ui.set_min_width(120.0);
        ui.vertical_centered(|ui| {
            let mut text = egui::RichText::new(value).size(26.0).strong();
            if let Some(color) = color {
                text = text.color(color);
            }
            ui.label(text);
            ui.label(egui::RichText::new(label).small().weak());
        });
    });
}

fn draw_stats(ui: &mut egui::Ui, stats: &Stats) {
    let severity = stats.severity();

    ui.horizontal_wrapped(|ui| {
        stat_card(ui, stats.total_events.to_string(), "Total Events", None);
        stat_card(ui, stats.failed_events.to_string(), "Failed Attempts", Some(FAILED_RED));
        stat_card(ui, stats.success_events.to_string(), "Successful Logins", Some(SUCCESS_GREEN));
        stat_card(ui, stats.unique_ips.to_string(), "Unique IPs", Some(IP_PURPLE));
        stat_card(ui, stats.unique_users.to_string(), "Unique Users", None);
        severity_badge(ui, severity);
    });
}

fn severity_badge(ui: &mut egui::Ui, severity: Severity) {
    egui::Frame::none()
        .fill(severity.color().linear_multiply(0.2))
        .stroke(egui::Stroke::new(1.5, severity.color()))
        .rounding(6.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(severity.label()).size(22.0).strong().color(severity.color()));
                ui.label(egui::RichText::new("Threat Level").small().weak());
            });
        });
}

fn draw_recommendations(ui: &mut egui::Ui, recs: &[Recommendation]) {
    for (idx, rec) in recs.iter().enumerate() {
        ui.horizontal_top(|ui| {
            ui.label(egui::RichText::new(format!("{}", idx + 1)).strong().color(IP_PURPLE));
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&rec.title).strong());
                ui.label(&rec.content);
            });
        });
        ui.add_space(6.0);
    }
}

fn draw_threats(ui: &mut egui::Ui, threats: &[Threat]) {
    for threat in threats {
        ui.horizontal_wrapped(|ui| {
            let kind = threat.kind.replace('_', " ").to_uppercase();
            ui.label(egui::RichText::new(kind).strong().color(FAILED_RED));
            ui.label(&threat.description);
        });
        if let Some(details) = threat_details(threat) {
            ui.label(egui::RichText::new(details).small().weak());
        }
    }
}

fn draw_failing_ips_chart(ui: &mut egui::Ui, findings: &[Finding]) {
    let ranked = top_failing_ips(findings, TOP_IP_COUNT);

    let plot = egui_plot::Plot::new("failing_ips")
        .height(180.0)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show_background(false)
        .show_axes([false, true])
        .include_y(0.0);

    plot.show(ui, |plot_ui| {
        let bars: Vec<egui_plot::Bar> = ranked.iter()
            .enumerate()
            .map(|(i, (ip, count))| {
                egui_plot::Bar::new(i as f64, *count as f64)
                    .name(ip)
                    .width(0.7)
                    .fill(FAILED_RED)
            })
            .collect();

        plot_ui.bar_chart(egui_plot::BarChart::new(bars));
    });

    ui.horizontal_wrapped(|ui| {
        for (i, (ip, count)) in ranked.iter().enumerate() {
            ui.label(egui::RichText::new(format!("{}. {} ({})", i + 1, ip, count)).small());
        }
    });
}

fn draw_findings_table(ui: &mut egui::Ui, findings: &[&Finding]) {
    if findings.is_empty() {
        ui.label(egui::RichText::new("No events match the current filter").weak());
        return;
    }

    egui::Grid::new("findings_table")
        .num_columns(4)
        .striped(true)
        .spacing([24.0, 6.0])
        .show(ui, |ui| {
            for header in ["Timestamp", "User", "IP Address", "Status"] {
                ui.label(egui::RichText::new(header).strong());
            }
            ui.end_row();

            for finding in findings.iter().take(FINDINGS_DISPLAY_LIMIT) {
                let timestamp = ui.label(finding.timestamp_or_na());
                if let Some(raw) = &finding.raw {
                    timestamp.on_hover_text(egui::RichText::new(raw).monospace());
                }
                ui.label(finding.user_or_unknown());
                ui.label(egui::RichText::new(finding.ip_or_na()).monospace());

                let (mark, color) = if finding.status.is_failed() {
                    ("✗", FAILED_RED)
                } else {
                    ("✓", SUCCESS_GREEN)
                };
                ui.label(egui::RichText::new(format!("{} {}", mark, finding.status)).color(color));
                ui.end_row();
            }
        });

    if let Some(note) = truncation_note(findings.len()) {
        ui.add_space(6.0);
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(note).weak());
        });
    }
}

fn summary_line(summary: &Summary) -> String {
    format!(
        "Backend counted {} events: {} failed, {} successful, {} IPs, {} users",
        summary.total_events,
        summary.failed_attempts,
        summary.successful_logins,
        summary.unique_ips,
        summary.unique_users
    )
}

/// Detection-specific fields as `key: value` pairs, sorted by key.
fn threat_details(threat: &Threat) -> Option<String> {
    if threat.extra.is_empty() {
        return None;
    }
    let parts: Vec<String> = threat.extra.iter()
        .map(|(key, value)| match value {
            serde_json::Value::String(s) => format!("{}: {}", key, s),
            other => format!("{}: {}", key, other),
        })
        .collect();
    Some(parts.join("  ·  "))
}

fn truncation_note(total: usize) -> Option<String> {
    (total > FINDINGS_DISPLAY_LIMIT)
        .then(|| format!("Showing {} of {} events", FINDINGS_DISPLAY_LIMIT, total))
}
