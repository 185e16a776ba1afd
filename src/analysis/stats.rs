// src/analysis/stats.rs

use std::collections::{HashMap, HashSet};
use eframe::egui::Color32;
use crate::api::Finding;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total_events: usize,
    pub failed_events: usize,
    pub success_events: usize,
    pub unique_ips: usize,
    pub unique_users: usize,
    pub failed_ips: usize,
}

impl Stats {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut ips = HashSet::new();
        let mut users = HashSet::new();
        let mut failed_ips = HashSet::new();
        let mut failed_events = 0;
        let mut success_events = 0;

        for finding in findings {
            ips.insert(finding.ip.as_str());
            users.insert(finding.user_or_unknown());
            if finding.status.is_failed() {
                failed_events += 1;
                failed_ips.insert(finding.ip.as_str());
            } else if finding.status.is_accepted() {
                success_events += 1;
            }
        }

        Self {
            total_events: findings.len(),
            failed_events,
            success_events,
            unique_ips: ips.len(),
            unique_users: users.len(),
            failed_ips: failed_ips.len(),
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::classify(self.failed_events, self.failed_ips)
    }
}

/// Display-only threat level. Not used for alerting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn classify(failed_events: usize, failed_ips: usize) -> Self {
        if failed_events >= 50 || failed_ips >= 10 {
            Severity::Critical
        } else if failed_events >= 20 || failed_ips >= 5 {
            Severity::High
        } else if failed_events >= 5 || failed_ips >= 2 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }

    pub fn color(&self) -> Color32 {
        match self {
            Severity::Critical => Color32::from_rgb(255, 71, 87),
            Severity::High => Color32::from_rgb(255, 165, 2),
            Severity::Medium => Color32::from_rgb(236, 204, 104),
            Severity::Low => Color32::from_rgb(46, 213, 115),
        }
    }
}

/// Failed-attempt counts per IP, highest first, ties broken by IP.
pub fn top_failing_ips(findings: &[Finding], limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for finding in findings.iter().filter(|f| f.status.is_failed()) {
        *counts.entry(finding.ip_or_na()).or_default() += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter()
        .map(|(ip, count)| (ip.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::FindingStatus;

    pub(crate) fn finding(user: Option<&str>, ip: &str, status: &str) -> Finding {
        Finding {
            timestamp: "2024-03-01 10:00:00".to_string(),
            user: user.map(str::to_string),
            ip: ip.to_string(),
            status: FindingStatus::from(status.to_string()),
            raw: None,
        }
    }

    fn failures(count: usize, distinct_ips: usize) -> Vec<Finding> {
        (0..count)
            .map(|i| finding(Some("root"), &format!("10.0.0.{}", i % distinct_ips), "Failed"))
            .collect()
    }

    #[test]
    fn test_counts() {
        let findings = vec![
            finding(Some("root"), "10.0.0.1", "Failed"),
            finding(Some("root"), "10.0.0.1", "Failed"),
            finding(Some("alice"), "10.0.0.2", "Accepted"),
            finding(None, "10.0.0.3", "Disconnected"),
        ];
        let stats = Stats::from_findings(&findings);

        assert_eq!(stats.total_events, findings.len());
        assert_eq!(stats.failed_events, 2);
        assert_eq!(stats.success_events, 1);
        assert!(stats.failed_events + stats.success_events <= stats.total_events);
        assert_eq!(stats.unique_ips, 3);
        assert_eq!(stats.unique_users, 3);
        assert_eq!(stats.failed_ips, 1);
    }

    #[test]
    fn test_empty_findings() {
        let stats = Stats::from_findings(&[]);
        assert_eq!(stats, Stats::default());
        assert_eq!(stats.severity(), Severity::Low);
    }

    #[test]
    fn test_severity_thresholds() {
        assert_eq!(Severity::classify(60, 12), Severity::Critical);
        assert_eq!(Severity::classify(3, 1), Severity::Low);
        assert_eq!(Severity::classify(50, 1), Severity::Critical);
        assert_eq!(Severity::classify(0, 10), Severity::Critical);
        assert_eq!(Severity::classify(20, 1), Severity::High);
        assert_eq!(Severity::classify(4, 5), Severity::High);
        assert_eq!(Severity::classify(5, 1), Severity::Medium);
        assert_eq!(Severity::classify(1, 2), Severity::Medium);
        assert_eq!(Severity::classify(4, 1), Severity::Low);
    }

    #[test]
    fn test_severity_from_stats() {
        let stats = Stats::from_findings(&failures(60, 12));
        assert_eq!(stats.failed_ips, 12);
        assert_eq!(stats.severity().label(), "CRITICAL");

        let stats = Stats::from_findings(&failures(3, 1));
        assert_eq!(stats.severity().label(), "LOW");
    }

    #[test]
    fn test_top_failing_ips() {
        let mut findings = failures(5, 1);
        findings.push(finding(Some("bob"), "10.0.0.9", "Failed"));
        findings.push(finding(Some("bob"), "10.0.0.8", "Failed"));
        findings.push(finding(Some("bob"), "10.0.0.7", "Accepted"));

        let top = top_failing_ips(&findings, 2);
        assert_eq!(top, vec![("10.0.0.0".to_string(), 5), ("10.0.0.8".to_string(), 1)]);
    }
}
