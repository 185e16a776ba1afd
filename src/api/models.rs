// src/api/models.rs
use serde::{Serialize, Deserialize};
use std::fmt;

/// Outcome of a single authentication event as reported by the backend.
/// Anything other than `Failed`/`Accepted` is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FindingStatus {
    Failed,
    Accepted,
    Other(String),
}

impl FindingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            FindingStatus::Failed => "Failed",
            FindingStatus::Accepted => "Accepted",
            FindingStatus::Other(s) => s,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FindingStatus::Failed)
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, FindingStatus::Accepted)
    }
}

impl Default for FindingStatus {
    fn default() -> Self {
        FindingStatus::Other(String::new())
    }
}

impl From<String> for FindingStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Failed" => FindingStatus::Failed,
            "Accepted" => FindingStatus::Accepted,
            _ => FindingStatus::Other(value),
        }
    }
}

impl From<FindingStatus> for String {
    fn from(value: FindingStatus) -> Self {
        match value {
            FindingStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for FindingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub status: FindingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl Finding {
    pub fn user_or_unknown(&self) -> &str {
        match self.user.as_deref() {
            Some(user) if !user.is_empty() => user,
            _ => "unknown",
        }
    }

    pub fn timestamp_or_na(&self) -> &str {
        if self.timestamp.is_empty() { "N/A" } else { &self.timestamp }
    }

    pub fn ip_or_na(&self) -> &str {
        if self.ip.is_empty() { "N/A" } else { &self.ip }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Pattern detection emitted by the backend (brute force bursts,
/// success after failures). Fields beyond `type`/`description` vary per
/// detection kind and are kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threat {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub total_events: usize,
    #[serde(default)]
    pub failed_attempts: usize,
    #[serde(default)]
    pub successful_logins: usize,
    #[serde(default)]
    pub unique_ips: usize,
    #[serde(default)]
    pub unique_users: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub narrative: String,
    #[serde(default)]
    pub recs: Vec<Recommendation>,
    #[serde(default)]
    pub findings: Vec<Finding>,
    #[serde(default)]
    pub threats: Vec<Threat>,
    #[serde(default)]
    pub summary: Option<Summary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub narrative: String,
    #[serde(default)]
    pub recs: Vec<Recommendation>,
}

impl HistoryEntry {
    /// `created_at` formatted for display, or the raw string if it doesn't parse.
    pub fn created_display(&self) -> String {
        use chrono::NaiveDateTime;

        match NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%dT%H:%M:%S%.f") {
            Ok(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
            Err(_) => self.created_at.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub analyses: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub service: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_result_from_backend_payload() {
        let body = r#"{
            "id": 7,
            "narrative": "Brute force from 10.0.0.5",
            "recs": [{"title": "Block IP", "content": "Add a firewall rule"}],
            "findings": [
                {"timestamp": "2024-03-01 10:00:00", "user": "root", "ip": "10.0.0.5", "status": "Failed", "raw": "..."},
                {"timestamp": "2024-03-01 10:01:00", "user": null, "ip": "10.0.0.6", "status": "Accepted"},
                {"timestamp": "N/A", "ip": "10.0.0.7", "status": "Disconnected"}
            ],
            "threats": [{"type": "brute_force", "description": "6 failed logins", "count": 6}],
            "summary": {"total_events": 3, "failed_attempts": 1}
        }"#;

        let result: AnalysisResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.id, Some(7));
        assert_eq!(result.recs.len(), 1);
        assert_eq!(result.findings[0].status, FindingStatus::Failed);
        assert_eq!(result.findings[1].status, FindingStatus::Accepted);
        assert_eq!(result.findings[1].user_or_unknown(), "unknown");
        assert_eq!(result.findings[2].status, FindingStatus::Other("Disconnected".into()));
        assert_eq!(result.threats[0].kind, "brute_force");
        assert_eq!(result.threats[0].extra.get("count"), Some(&serde_json::json!(6)));
        assert_eq!(result.summary.unwrap().failed_attempts, 1);
    }

    #[test]
    fn test_minimal_result_defaults_supplementary_fields() {
        let result: AnalysisResult = serde_json::from_str(r#"{"narrative": "quiet day"}"#).unwrap();
        assert_eq!(result.narrative, "quiet day");
        assert!(result.recs.is_empty());
        assert!(result.findings.is_empty());
        assert!(result.threats.is_empty());
        assert!(result.summary.is_none());
    }

    #[test]
    fn test_status_serializes_back_to_wire_string() {
        let json = serde_json::to_string(&FindingStatus::Other("Timeout".into())).unwrap();
        assert_eq!(json, "\"Timeout\"");
        let json = serde_json::to_string(&FindingStatus::Failed).unwrap();
        assert_eq!(json, "\"Failed\"");
    }

    #[test]
    fn test_history_created_display() {
        let entry = HistoryEntry {
            id: 1,
            file_path: "/srv/uploads/auth.log".into(),
            created_at: "2024-05-02T08:15:42.123456".into(),
            narrative: String::new(),
            recs: Vec::new(),
        };
        assert_eq!(entry.created_display(), "2024-05-02 08:15");

        let odd = HistoryEntry { created_at: "yesterday".into(), ..entry };
        assert_eq!(odd.created_display(), "yesterday");
    }
}
