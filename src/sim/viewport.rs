use eframe::egui::Vec2;

use super::{Bounds, Simulation};

pub const MIN_WIDTH: f32 = 400.0;
pub const MIN_HEIGHT: f32 = 240.0;

/// Folds a host-surface size change into the simulation's bounds. Sizes
/// below the usable minimum are clamped instead of rejected. Positions are
/// never touched here; nodes left outside the new bounds get reeled back in
/// by the next steps' containment clamp.
pub fn apply_viewport(sim: &mut Simulation, size: Vec2) {
    let next = Bounds {
        width: size.x.max(MIN_WIDTH),
        height: size.y.max(MIN_HEIGHT),
    };

    let current = sim.bounds();
    if next == current {
        return;
    }

    tracing::trace!(
        from_width = current.width,
        from_height = current.height,
        to_width = next.width,
        to_height = next.height,
        "viewport bounds changed"
    );
    sim.set_bounds(next);
}
