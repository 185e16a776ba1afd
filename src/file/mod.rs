// src/file/mod.rs
pub mod export;
pub mod selection;

pub use export::save_findings_csv;
pub use selection::{UploadSelection, LOG_EXTENSIONS, PLAYBOOK_EXTENSIONS};
