// src/ui/trail.rs
use eframe::egui::{self, Color32, Id, LayerId, Order, Stroke};
use crate::state::trail::MouseTrail;

const GLOW_RADIUS: f32 = 14.0;
const GLOW_RINGS: usize = 5;

fn glow(alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(0, 255, 170, (alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

/// Paints the cursor trail on top of everything else. Input is untouched.
pub fn paint_trail(ctx: &egui::Context, trail: &MouseTrail, now: f64) {
    let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("mouse_trail")));
    let mut previous = None;

    for point in trail.points() {
        let alpha = MouseTrail::opacity(point, now);

        if let Some(prev) = previous {
            painter.line_segment([prev, point.pos], Stroke::new(1.5 * alpha, glow(alpha * 0.4)));
        }

        // radial falloff: wide faint discs under narrow bright ones
        for ring in (1..=GLOW_RINGS).rev() {
            let t = ring as f32 / GLOW_RINGS as f32;
            painter.circle_filled(point.pos, GLOW_RADIUS * t * alpha.max(0.2), glow(alpha * (1.2 - t) * 0.5));
        }

        previous = Some(point.pos);
    }
}
