// src/file/selection.rs
use std::path::{Path, PathBuf};
use log::{debug, info};
use crate::api::UploadRequest;

pub const LOG_EXTENSIONS: &[&str] = &["log", "txt"];
pub const PLAYBOOK_EXTENSIONS: &[&str] = &["md", "txt"];

fn has_extension(name: &str, extensions: &[&str]) -> bool {
    let lower = name.to_lowercase();
    extensions.iter().any(|ext| lower.ends_with(&format!(".{}", ext)))
}

pub fn is_log_file_name(name: &str) -> bool {
    has_extension(name, LOG_EXTENSIONS)
}

/// The log file and optional playbook chosen for the next analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadSelection {
    pub logfile: Option<PathBuf>,
    pub playbook: Option<PathBuf>,
}

impl UploadSelection {
    pub fn set_logfile(&mut self, path: PathBuf) {
        info!("Selected log file {}", path.display());
        self.logfile = Some(path);
    }

    pub fn set_playbook(&mut self, path: PathBuf) {
        info!("Selected playbook {}", path.display());
        self.playbook = Some(path);
    }

    pub fn clear_playbook(&mut self) {
        self.playbook = None;
    }

    /// Handles a file dropped onto the window. Only `.log`/`.txt` names are
    /// taken, and only as the log file; anything else leaves the selection
    /// as it was.
    pub fn accept_drop(&mut self, name: &str, path: Option<PathBuf>) -> bool {
        let Some(path) = path else {
            debug!("Ignoring drop of {} without a filesystem path", name);
            return false;
        };

        let name = if name.is_empty() {
            display_name(&path)
        } else {
            name.to_string()
        };

        if !is_log_file_name(&name) {
            debug!("Ignoring dropped file {}", name);
            return false;
        }

        self.set_logfile(path);
        true
    }

    pub fn logfile_name(&self) -> Option<String> {
        self.logfile.as_deref().map(display_name)
    }

    pub fn playbook_name(&self) -> Option<String> {
        self.playbook.as_deref().map(display_name)
    }

    pub fn to_request(&self) -> Option<UploadRequest> {
        Some(UploadRequest {
            logfile: self.logfile.clone()?,
            playbook: self.playbook.clone(),
        })
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
