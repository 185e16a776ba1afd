// src/api/client.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};
use reqwest::blocking::{multipart, Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;

use super::error::{detail_from_body, ApiError};
use super::models::{AnalysisResult, HealthStatus, HistoryEntry, HistoryResponse};
use crate::config::Settings;

/// Files to upload for one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub logfile: PathBuf,
    pub playbook: Option<PathBuf>,
}

/// Operations the UI needs from the analysis service. Calls block, so they
/// are only ever made from worker threads.
pub trait Backend: Send + Sync {
    fn analyze(&self, request: &UploadRequest) -> Result<AnalysisResult, ApiError>;
    fn history(&self) -> Result<Vec<HistoryEntry>, ApiError>;
    fn history_entry(&self, id: i64) -> Result<HistoryEntry, ApiError>;
    fn health(&self) -> Result<HealthStatus, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let base_url = settings.api_url.trim_end_matches('/').to_string();

        let mut builder = ClientBuilder::new()
            .timeout(Duration::from_secs(settings.request_timeout_secs));
        // A backend on this machine is never reached through a proxy.
        if is_loopback(&base_url) {
            builder = builder.no_proxy();
        }

        Ok(Self {
            base_url,
            client: builder.build()?,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn file_part(path: &Path) -> Result<multipart::Part, ApiError> {
        let bytes = fs::read(path).map_err(|source| ApiError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        debug!("Attaching {} ({} bytes)", file_name, bytes.len());
        Ok(multipart::Part::bytes(bytes).file_name(file_name))
    }

    fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            warn!("Server answered {} ({} byte body)", status, body.len());
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn is_loopback(url: &str) -> bool {
    let host = url.split("://").nth(1).unwrap_or(url);
    ["127.0.0.1", "localhost", "[::1]"].iter().any(|h| host.starts_with(h))
}

impl Backend for ApiClient {
    fn analyze(&self, request: &UploadRequest) -> Result<AnalysisResult, ApiError> {
        let mut form = multipart::Form::new()
            .part("logfile", Self::file_part(&request.logfile)?);
        if let Some(playbook) = &request.playbook {
            form = form.part("playbook", Self::file_part(playbook)?);
        }

        let url = self.url("/analyze");
        info!("POST {} (playbook: {})", url, request.playbook.is_some());

        let response = self.client.post(&url).multipart(form).send()?;
        let result: AnalysisResult = Self::read_json(response)?;

        info!(
            "Analysis complete: {} findings, {} recommendations",
            result.findings.len(),
            result.recs.len()
        );
        Ok(result)
    }

    fn history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        let url = self.url("/history");
        debug!("GET {}", url);

        let response = self.client.get(&url).send()?;
        let history: HistoryResponse = Self::read_json(response)?;
        Ok(history.analyses)
    }

    fn history_entry(&self, id: i64) -> Result<HistoryEntry, ApiError> {
        let url = self.url(&format!("/history/{}", id));
        debug!("GET {}", url);

        let response = self.client.get(&url).send()?;
        let value: serde_json::Value = Self::read_json(response)?;

        // A missing record comes back as `[{"error": ...}, 404]` with a 200.
        let payload = match &value {
            serde_json::Value::Array(items) => items.first().cloned().unwrap_or_default(),
            other => other.clone(),
        };
        if payload.get("error").is_some() {
            return Err(ApiError::Status {
                status: 404,
                detail: detail_from_body(&payload.to_string()),
            });
        }

        Ok(serde_json::from_value(payload)?)
    }

    fn health(&self) -> Result<HealthStatus, ApiError> {
        let url = self.url("/health");
        let response = self.client.get(&url).send()?;
        Self::read_json(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread::{self, JoinHandle};

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(header_end) = find(&buf, b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
                let content_length = headers.lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok());

                let complete = match content_length {
                    Some(len) => buf.len() >= header_end + 4 + len,
                    None if headers.contains("transfer-encoding: chunked") => buf.ends_with(b"0\r\n\r\n"),
                    None => true,
                };
                if complete {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Accepts one connection, answers it with `status`/`body` and hands back
    /// the raw request it received.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            request
        });

        (format!("http://{}", addr), handle)
    }

    fn client_for(base_url: &str) -> ApiClient {
        let settings = Settings {
            api_url: base_url.to_string(),
            request_timeout_secs: 10,
        };
        ApiClient::new(&settings).unwrap()
    }

    fn write_log(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_analyze_posts_multipart_without_playbook() {
        let dir = tempfile::tempdir().unwrap();
        let logfile = write_log(&dir, "auth.log", "Mar  1 10:00:00 host sshd: Failed password for root from 10.0.0.5");

        let (url, server) = serve_once(
            "200 OK",
            r#"{"narrative":"one failure","recs":[],"findings":[{"timestamp":"t","user":"root","ip":"10.0.0.5","status":"Failed"}]}"#,
        );
        let result = client_for(&url)
            .analyze(&UploadRequest { logfile, playbook: None })
            .unwrap();
        let request = server.join().unwrap();

        assert!(request.starts_with("POST /analyze "));
        assert!(request.contains(r#"name="logfile"; filename="auth.log""#));
        assert!(request.contains("Failed password for root"));
        assert!(!request.contains(r#"name="playbook""#));
        assert_eq!(result.narrative, "one failure");
        assert_eq!(result.findings.len(), 1);
    }

    #[test]
    fn test_analyze_includes_playbook_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let logfile = write_log(&dir, "auth.log", "line");
        let playbook = write_log(&dir, "playbook.md", "# Brute force\nBlock the source.");

        let (url, server) = serve_once("200 OK", r#"{"narrative":"","recs":[],"findings":[]}"#);
        client_for(&url)
            .analyze(&UploadRequest { logfile, playbook: Some(playbook) })
            .unwrap();
        let request = server.join().unwrap();

        assert!(request.contains(r#"name="playbook"; filename="playbook.md""#));
        assert!(request.contains("Block the source."));
    }

    #[test]
    fn test_analyze_error_banner_uses_detail() {
        let dir = tempfile::tempdir().unwrap();
        let logfile = write_log(&dir, "auth.log", "line");

        let (url, server) = serve_once("400 Bad Request", r#"{"detail":"bad file"}"#);
        let err = client_for(&url)
            .analyze(&UploadRequest { logfile, playbook: None })
            .unwrap_err();
        server.join().unwrap();

        assert_eq!(err.user_message(), "bad file");
    }

    #[test]
    fn test_analyze_missing_file_fails_before_sending() {
        let client = client_for("http://127.0.0.1:9");
        let err = client
            .analyze(&UploadRequest { logfile: PathBuf::from("/nonexistent/auth.log"), playbook: None })
            .unwrap_err();

        assert!(matches!(err, ApiError::File { .. }));
    }

    #[test]
    fn test_history_unwraps_analyses() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"analyses":[{"id":2,"file_path":"/u/b.log","narrative":"b","recs":[],"created_at":"2024-01-02T00:00:00"},{"id":1,"file_path":"/u/a.log","narrative":"a","recs":[],"created_at":"2024-01-01T00:00:00"}]}"#,
        );
        let history = client_for(&url).history().unwrap();
        let request = server.join().unwrap();

        assert!(request.starts_with("GET /history "));
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, 2);
    }

    #[test]
    fn test_history_entry_not_found_payload() {
        let (url, server) = serve_once("200 OK", r#"[{"error":"Analysis not found"},404]"#);
        let err = client_for(&url).history_entry(99).unwrap_err();
        let request = server.join().unwrap();

        assert!(request.starts_with("GET /history/99 "));
        assert_eq!(err.user_message(), "Analysis not found");
    }

    #[test]
    fn test_health() {
        let (url, server) = serve_once("200 OK", r#"{"status":"healthy","service":"SherlockLogs API"}"#);
        let health = client_for(&format!("{}/", url)).health().unwrap();
        server.join().unwrap();

        assert!(health.is_healthy());
    }
}
