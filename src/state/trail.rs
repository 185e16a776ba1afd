// src/state/trail.rs
use std::collections::VecDeque;
use eframe::egui::Pos2;

pub const TRAIL_CAPACITY: usize = 50;
pub const TRAIL_LIFETIME_SECS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub pos: Pos2,
    pub time: f64,
}

/// Recent pointer positions for the decorative cursor trail.
#[derive(Debug, Clone)]
pub struct MouseTrail {
    points: VecDeque<TrailPoint>,
}

impl Default for MouseTrail {
    fn default() -> Self {
        Self {
            points: VecDeque::with_capacity(TRAIL_CAPACITY),
        }
    }
}

impl MouseTrail {
    pub fn push(&mut self, pos: Pos2, time: f64) {
        if self.points.back().map(|p| p.pos) == Some(pos) {
            return;
        }
        if self.points.len() == TRAIL_CAPACITY {
            self.points.pop_front();
        }
        self.points.push_back(TrailPoint { pos, time });
    }

    pub fn prune(&mut self, now: f64) {
        while let Some(front) = self.points.front() {
            if now - front.time > TRAIL_LIFETIME_SECS {
                self.points.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 1.0 for a fresh point fading linearly to 0.0 at the end of its lifetime.
    pub fn opacity(point: &TrailPoint, now: f64) -> f32 {
        (1.0 - (now - point.time) / TRAIL_LIFETIME_SECS).clamp(0.0, 1.0) as f32
    }
}
