// src/state/mod.rs
use std::sync::Arc;
use eframe::egui;
use log::{info, warn};

use crate::analysis::{FindingFilter, Stats};
use crate::api::{AnalysisResult, ApiError, Backend, Finding, HealthStatus, HistoryEntry};
use crate::api::error::GENERIC_FAILURE;
use crate::config::Settings;
use crate::file::UploadSelection;
use crate::state::progress::ProgressTicker;
use crate::state::tasks::{BackgroundTask, TaskPoll};
use crate::state::trail::MouseTrail;

pub mod progress;
pub mod tasks;
pub mod trail;

pub const VALIDATION_MESSAGE: &str = "Please upload a log file to analyze";
pub const HISTORY_DISPLAY_LIMIT: usize = 5;
pub const FINDINGS_DISPLAY_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub enum BackendHealth {
    Unknown,
    Checking,
    Online(String),
    Offline,
}

struct PendingAnalysis {
    task: BackgroundTask<Result<AnalysisResult, ApiError>>,
    ticker: ProgressTicker,
}

// Core application state
pub struct AppState {
    pub settings: Settings,
    backend: Arc<dyn Backend>,
    repaint: Option<egui::Context>,

    // Inputs
    pub selection: UploadSelection,
    pub filter: FindingFilter,

    // Latest outcome
    pub result: Option<AnalysisResult>,
    pub error_message: Option<String>,

    // History
    pub history: Vec<HistoryEntry>,
    pub history_detail: Option<HistoryEntry>,

    pub health: BackendHealth,

    // Cosmetic
    pub trail: MouseTrail,
    pub show_trail: bool,

    analysis_task: Option<PendingAnalysis>,
    history_task: Option<BackgroundTask<Result<Vec<HistoryEntry>, ApiError>>>,
    history_stale: bool,
    detail_task: Option<BackgroundTask<Result<HistoryEntry, ApiError>>>,
    health_task: Option<BackgroundTask<Result<HealthStatus, ApiError>>>,
}

impl AppState {
    pub fn new(settings: Settings, backend: Arc<dyn Backend>) -> Self {
        Self {
            settings,
            backend,
            repaint: None,
            selection: UploadSelection::default(),
            filter: FindingFilter::default(),
            result: None,
            error_message: None,
            history: Vec::new(),
            history_detail: None,
            health: BackendHealth::Unknown,
            trail: MouseTrail::default(),
            show_trail: true,
            analysis_task: None,
            history_task: None,
            history_stale: false,
            detail_task: None,
            health_task: None,
        }
    }

    /// Workers wake the UI through this context when they finish.
    pub fn set_repaint_context(&mut self, ctx: egui::Context) {
        self.repaint = Some(ctx);
    }

    /// Initial fetches made once the window is up.
    pub fn start(&mut self) {
        self.refresh_history();
        self.check_health();
    }

    pub fn is_analyzing(&self) -> bool {
        self.analysis_task.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.analysis_task.is_some()
            || self.history_task.is_some()
            || self.detail_task.is_some()
            || self.health_task.is_some()
    }

    pub fn can_submit(&self) -> bool {
        !self.is_analyzing() && self.selection.logfile.is_some()
    }

    /// Starts an analysis of the current selection. Returns false when nothing
    /// was sent, either because one is already running or no log file is set.
    pub fn submit(&mut self, now: f64) -> bool {
        if self.is_analyzing() {
            return false;
        }

        let Some(request) = self.selection.to_request() else {
            self.error_message = Some(VALIDATION_MESSAGE.to_string());
            return false;
        };

        self.error_message = None;
        self.result = None;

        let backend = Arc::clone(&self.backend);
        let task = BackgroundTask::spawn("analyze", self.repaint.clone(), move || {
            backend.analyze(&request)
        });
        self.analysis_task = Some(PendingAnalysis {
            task,
            ticker: ProgressTicker::start(now),
        });
        true
    }

    pub fn progress_label(&self, now: f64) -> Option<&'static str> {
        self.analysis_task.as_ref().map(|p| p.ticker.label(now))
    }

    pub fn progress_elapsed(&self, now: f64) -> Option<f64> {
        self.analysis_task.as_ref().map(|p| p.ticker.elapsed(now))
    }

    /// Fetches the history list. A request made while a fetch is running
    /// starts another fetch as soon as that one finishes.
    pub fn refresh_history(&mut self) {
        if self.history_task.is_some() {
            self.history_stale = true;
            return;
        }
        self.history_stale = false;
        let backend = Arc::clone(&self.backend);
        self.history_task = Some(BackgroundTask::spawn("history", self.repaint.clone(), move || {
            backend.history()
        }));
    }

    pub fn open_history_entry(&mut self, id: i64) {
        let backend = Arc::clone(&self.backend);
        self.detail_task = Some(BackgroundTask::spawn("history-entry", self.repaint.clone(), move || {
            backend.history_entry(id)
        }));
    }

    pub fn check_health(&mut self) {
        if self.health_task.is_some() {
            return;
        }
        self.health = BackendHealth::Checking;
        let backend = Arc::clone(&self.backend);
        self.health_task = Some(BackgroundTask::spawn("health", self.repaint.clone(), move || {
            backend.health()
        }));
    }

    /// Collects whatever the workers have finished. Called once per frame.
    pub fn poll(&mut self) {
        self.poll_analysis();
        self.poll_history();
        self.poll_detail();
        self.poll_health();
    }

    fn poll_analysis(&mut self) {
        let Some(pending) = &self.analysis_task else { return };
        match pending.task.poll() {
            TaskPoll::Pending => {}
            TaskPoll::Ready(Ok(result)) => {
                self.analysis_task = None;
                self.result = Some(result);
                self.refresh_history();
            }
            TaskPoll::Ready(Err(e)) => {
                self.analysis_task = None;
                warn!("Analysis failed: {}", e);
                self.error_message = Some(e.user_message());
            }
            TaskPoll::Lost => {
                self.analysis_task = None;
                warn!("Analysis worker exited without a result");
                self.error_message = Some(GENERIC_FAILURE.to_string());
            }
        }
    }

    fn poll_history(&mut self) {
        let Some(task) = &self.history_task else { return };
        match task.poll() {
            TaskPoll::Pending => {}
            TaskPoll::Ready(Ok(entries)) => {
                self.history_task = None;
                info!("Loaded {} history entries", entries.len());
                self.history = entries;
            }
            TaskPoll::Ready(Err(e)) => {
                self.history_task = None;
                warn!("Failed to fetch history: {}", e);
                self.history.clear();
            }
            TaskPoll::Lost => {
                self.history_task = None;
                self.history.clear();
            }
        }

        if self.history_task.is_none() && self.history_stale {
            self.refresh_history();
        }
    }

    fn poll_detail(&mut self) {
        let Some(task) = &self.detail_task else { return };
        match task.poll() {
            TaskPoll::Pending => {}
            TaskPoll::Ready(Ok(entry)) => {
                self.detail_task = None;
                self.history_detail = Some(entry);
            }
            TaskPoll::Ready(Err(e)) => {
                self.detail_task = None;
                warn!("Failed to fetch history entry: {}", e);
                self.error_message = Some(e.user_message());
            }
            TaskPoll::Lost => {
                self.detail_task = None;
            }
        }
    }

    fn poll_health(&mut self) {
        let Some(task) = &self.health_task else { return };
        match task.poll() {
            TaskPoll::Pending => {}
            TaskPoll::Ready(Ok(status)) if status.is_healthy() => {
                self.health_task = None;
                self.health = BackendHealth::Online(status.service);
            }
            TaskPoll::Ready(Ok(status)) => {
                self.health_task = None;
                warn!("Backend reports status {:?}", status.status);
                self.health = BackendHealth::Offline;
            }
            TaskPoll::Ready(Err(e)) => {
                self.health_task = None;
                warn!("Health check failed: {}", e);
                self.health = BackendHealth::Offline;
            }
            TaskPoll::Lost => {
                self.health_task = None;
                self.health = BackendHealth::Offline;
            }
        }
    }

    pub fn stats(&self) -> Option<Stats> {
        self.result.as_ref().map(|r| Stats::from_findings(&r.findings))
    }

    pub fn filtered_findings(&self) -> Vec<&Finding> {
        match &self.result {
            Some(result) => self.filter.apply(&result.findings),
            None => Vec::new(),
        }
    }

    /// Newest entries first, at most five.
    pub fn recent_history(&self) -> Vec<&HistoryEntry> {
        let mut entries: Vec<&HistoryEntry> = self.history.iter().collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries.truncate(HISTORY_DISPLAY_LIMIT);
        entries
    }
}
