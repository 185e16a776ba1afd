// src/api/mod.rs
pub mod client;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use client::{ApiClient, Backend, UploadRequest};
pub use error::ApiError;
pub use models::{
    AnalysisResult,
    Finding,
    FindingStatus,
    HealthStatus,
    HistoryEntry,
    Recommendation,
    Summary,
    Threat,
};
