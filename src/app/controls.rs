use eframe::egui::{self, Ui};

use super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.add_space(6.0);
        ui.heading("Graph");

        let cap_limit = self.profile.repo_count().clamp(1, 60);
        let mut rebuild = false;

        rebuild |= ui
            .add(egui::Slider::new(&mut self.max_nodes, 1..=cap_limit).text("node cap"))
            .changed();

        ui.horizontal(|ui| {
            ui.label("seed");
            rebuild |= ui.add(egui::DragValue::new(&mut self.seed)).changed();
            if ui.button("Rescatter").clicked() {
                self.seed = rand::random();
                rebuild = true;
            }
        });

        if rebuild {
            self.sim_dirty = true;
        }

        ui.separator();
        ui.heading("Physics");
        ui.checkbox(&mut self.live_physics, "Live physics");
        ui.add(egui::Slider::new(&mut self.damping, 0.50..=0.98).text("damping"));
        ui.add(egui::Slider::new(&mut self.repulsion_scale, 0.2..=3.0).text("repulsion"));
        ui.add(egui::Slider::new(&mut self.spring_scale, 0.2..=3.0).text("spring"));
        if ui.button("Reset tuning").clicked() {
            self.damping = 0.85;
            self.repulsion_scale = 1.0;
            self.spring_scale = 1.0;
        }

        ui.separator();
        ui.heading("Search");
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.search);
            if !self.search.is_empty() && ui.button("Clear").clicked() {
                self.search.clear();
            }
        });

        ui.separator();
        ui.checkbox(&mut self.show_fps_bar, "Show FPS");
    }
}
