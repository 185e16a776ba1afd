// src/analysis/filter.rs
use crate::api::Finding;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Failed,
    Success,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [StatusFilter::All, StatusFilter::Failed, StatusFilter::Success];

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Failed => "Failed",
            StatusFilter::Success => "Success only",
        }
    }

    pub fn matches(&self, finding: &Finding) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Failed => finding.status.is_failed(),
            StatusFilter::Success => finding.status.is_accepted(),
        }
    }
}

/// Search box plus status selector for the findings table. Applying it never
/// touches the findings themselves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindingFilter {
    pub search: String,
    pub status: StatusFilter,
}

impl FindingFilter {
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.status != StatusFilter::All
    }

    pub fn matches(&self, finding: &Finding) -> bool {
        self.status.matches(finding) && self.matches_search(finding)
    }

    fn matches_search(&self, finding: &Finding) -> bool {
        let term = self.search.trim();
        if term.is_empty() {
            return true;
        }

        let user_hit = finding.user.as_deref()
            .map(|u| u.to_lowercase().contains(&term.to_lowercase()))
            .unwrap_or(false);

        user_hit || finding.ip.contains(term) || finding.timestamp.contains(term)
    }

    pub fn apply<'a>(&self, findings: &'a [Finding]) -> Vec<&'a Finding> {
        findings.iter().filter(|f| self.matches(f)).collect()
    }
}
