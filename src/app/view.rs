use std::collections::HashMap;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Stroke, Ui, Vec2, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::sim::{
    self, Bounds, GraphError, PhysicsConfig, RenderSurface, SimLink, SimNode, WARM_UP_PASSES,
};
use crate::util::format_count;

use super::ViewModel;
use super::render_utils::{blend_color, dim_color, draw_background, group_color, world_to_screen};

/// The egui render adapter: projects reflected world geometry into screen
/// space. The painter reads these buffers; the simulation is never written
/// through here.
pub(in crate::app) struct ScreenSurface {
    origin: Pos2,
    pan: Vec2,
    zoom: f32,
    pub(in crate::app) positions: Vec<Pos2>,
    pub(in crate::app) radii: Vec<f32>,
    pub(in crate::app) segments: Vec<(Pos2, Pos2, f32)>,
}

impl Default for ScreenSurface {
    fn default() -> Self {
        Self {
            origin: Pos2::ZERO,
            pan: Vec2::ZERO,
            zoom: 1.0,
            positions: Vec::new(),
            radii: Vec::new(),
            segments: Vec::new(),
        }
    }
}

impl ScreenSurface {
    fn set_view(&mut self, origin: Pos2, pan: Vec2, zoom: f32) {
        self.origin = origin;
        self.pan = pan;
        self.zoom = zoom;
    }
}

impl RenderSurface for ScreenSurface {
    fn reflect(&mut self, nodes: &[SimNode], links: &[SimLink]) {
        self.positions.clear();
        self.radii.clear();
        for node in nodes {
            self.positions
                .push(world_to_screen(self.origin, self.pan, self.zoom, node.pos));
            self.radii
                .push((node.radius * self.zoom).clamp(2.0, 72.0));
        }

        self.segments.clear();
        for link in links {
            self.segments.push((
                self.positions[link.source],
                self.positions[link.target],
                link.strength,
            ));
        }
    }
}

impl ViewModel {
    /// Tears down the superseded simulation and builds a fresh one from the
    /// current profile, cap and seed. An empty profile routes to the
    /// empty-state view instead of a simulation.
    pub(in crate::app) fn rebuild_simulation(&mut self) {
        if let Some(sim) = self.sim.as_mut() {
            sim.stop();
        }

        let bounds = self
            .sim
            .as_ref()
            .map(|sim| sim.bounds())
            .unwrap_or(Bounds {
                width: 900.0,
                height: 560.0,
            });

        let mut layout_rng = StdRng::seed_from_u64(self.seed);
        match sim::build_graph(&self.profile.repos, self.max_nodes, bounds, &mut layout_rng) {
            Ok(mut sim) => {
                sim::warm_up(&mut sim, WARM_UP_PASSES);
                self.sim = Some(sim);
            }
            Err(GraphError::EmptyInput) => {
                self.sim = None;
            }
        }

        // Separate stream from placement, so mid-run coincidence
        // perturbations cannot shift the initial layout of a later rebuild.
        self.step_rng = StdRng::seed_from_u64(self.seed.wrapping_add(1));
        self.sim_dirty = false;
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        if self.sim_dirty {
            self.rebuild_simulation();
        }

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, self.pan, self.zoom);

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);

        let pan = self.pan;
        let zoom = self.zoom;
        let config = PhysicsConfig {
            repulsion_scale: self.repulsion_scale,
            spring_scale: self.spring_scale,
            damping: self.damping,
        };

        let Some(sim) = self.sim.as_mut() else {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No repositories available",
                FontId::proportional(14.0),
                Color32::from_gray(150),
            );
            return;
        };

        sim::apply_viewport(sim, rect.size());

        // One step, one reflection per frame, only while running.
        if self.live_physics && sim.is_running() {
            sim::step(sim, &config, &mut self.step_rng);
            ui.ctx().request_repaint();
        }

        self.surface.set_view(rect.left_top(), pan, zoom);
        self.surface.reflect(sim.nodes(), sim.links());

        let search_query = self.search.trim();
        let matches = if search_query.is_empty() {
            None
        } else {
            let matcher = SkimMatcherV2::default();
            Some(
                sim.nodes()
                    .iter()
                    .map(|node| matcher.fuzzy_match(&node.id, search_query).is_some())
                    .collect::<Vec<_>>(),
            )
        };
        let search_active = matches
            .as_ref()
            .is_some_and(|flags| flags.iter().any(|&flag| flag));

        let hovered = Self::hovered_index(ui, &self.surface.positions, &self.surface.radii);
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let pending_selection = if response.clicked_by(egui::PointerButton::Primary) {
            Some(hovered.and_then(|index| sim.nodes().get(index).map(|node| node.id.clone())))
        } else {
            None
        };

        let selected_index = self
            .selected
            .as_deref()
            .and_then(|id| sim.nodes().iter().position(|node| node.id == id));

        let mut group_indices = HashMap::new();
        for node in sim.nodes() {
            let next = group_indices.len();
            group_indices.entry(node.group.as_str()).or_insert(next);
        }

        let zoom_sqrt = zoom.sqrt();
        for (link, &(start, end, strength)) in sim.links().iter().zip(&self.surface.segments) {
            let touches_selected = selected_index
                .is_some_and(|index| link.source == index || link.target == index);
            let width = ((1.0 + strength * 10.0).clamp(0.6, 2.5)) * zoom_sqrt;
            let color = if touches_selected {
                Color32::from_rgba_unmultiplied(245, 206, 93, 150)
            } else {
                Color32::from_rgba_unmultiplied(148, 163, 184, 36)
            };
            painter.line_segment([start, end], Stroke::new(width, color));
        }

        let selected_color = Color32::from_rgb(245, 206, 93);
        let mut selection_animating = false;

        for (index, node) in sim.nodes().iter().enumerate() {
            let position = self.surface.positions[index];
            let base_radius = self.surface.radii[index];

            let is_selected = selected_index == Some(index);
            let is_hovered = hovered == Some(index);
            let is_match = matches.as_ref().is_some_and(|flags| flags[index]);

            let hover_mix = ui.ctx().animate_bool(
                ui.make_persistent_id(("node-hover", node.id.as_str())),
                is_hovered,
            );
            let radius = base_radius * (1.0 + 0.25 * hover_mix);

            let group_index = group_indices
                .get(node.group.as_str())
                .copied()
                .unwrap_or_default();
            let base_color = group_color(group_index);
            let unselected_color = if is_hovered {
                blend_color(base_color, Color32::from_rgb(255, 164, 101), 0.35)
            } else if search_active && !is_match {
                dim_color(base_color, 0.35)
            } else {
                base_color
            };

            let selection_mix = ui.ctx().animate_bool(
                ui.make_persistent_id(("node-selection", node.id.as_str())),
                is_selected,
            );
            if selection_mix > 0.0 && selection_mix < 1.0 {
                selection_animating = true;
            }
            let color = blend_color(unselected_color, selected_color, selection_mix);

            painter.circle_filled(position, radius, color);
            painter.circle_stroke(
                position,
                radius,
                Stroke::new(
                    1.0 + (selection_mix * 1.2),
                    Color32::from_rgba_unmultiplied(6, 10, 18, 190),
                ),
            );

            let should_draw_label = is_selected
                || is_hovered
                || (is_match && zoom > 0.5)
                || radius > 17.0
                || zoom > 1.35;
            if should_draw_label {
                painter.text(
                    position + vec2(radius + 6.0, 0.0),
                    Align2::LEFT_CENTER,
                    &node.id,
                    FontId::proportional(12.0),
                    Color32::from_gray(238),
                );
            }
        }

        if selection_animating {
            ui.ctx().request_repaint();
        }

        if let Some(index) = hovered {
            let node = &sim.nodes()[index];
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                format!(
                    "{} | \u{2605} {} | {}",
                    node.id,
                    format_count(node.repo.stargazers),
                    node.group
                ),
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        if let Some(selection) = pending_selection {
            self.selected = selection;
        }
    }
}
