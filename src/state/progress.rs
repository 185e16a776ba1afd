// src/state/progress.rs

/// Labels shown while an analysis is pending. They rotate on a timer and
/// say nothing about what the backend is actually doing.
pub const STAGES: &[&str] = &[
    "Uploading log file...",
    "Parsing log events...",
    "Detecting threat patterns...",
    "Generating incident narrative...",
    "Matching playbook recommendations...",
];

pub const STAGE_INTERVAL_SECS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressTicker {
    started_at: f64,
}

impl ProgressTicker {
    pub fn start(now: f64) -> Self {
        Self { started_at: now }
    }

    pub fn stage_index(&self, now: f64) -> usize {
        let elapsed = (now - self.started_at).max(0.0);
        (elapsed / STAGE_INTERVAL_SECS) as usize % STAGES.len()
    }

    pub fn label(&self, now: f64) -> &'static str {
        STAGES[self.stage_index(now)]
    }

    pub fn elapsed(&self, now: f64) -> f64 {
        (now - self.started_at).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycles_through_stages() {
        let ticker = ProgressTicker::start(10.0);
        assert_eq!(ticker.label(10.0), STAGES[0]);
        assert_eq!(ticker.label(11.9), STAGES[0]);
        assert_eq!(ticker.label(12.0), STAGES[1]);
        assert_eq!(ticker.label(10.0 + STAGE_INTERVAL_SECS * STAGES.len() as f64), STAGES[0]);
    }

    #[test]
    fn test_clock_going_backwards_stays_on_first_stage() {
        let ticker = ProgressTicker::start(10.0);
        assert_eq!(ticker.stage_index(5.0), 0);
        assert_eq!(ticker.elapsed(5.0), 0.0);
    }
}
