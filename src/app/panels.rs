use std::collections::VecDeque;

use eframe::egui::{self, Align, Context, Layout, Vec2};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::profile::ProfileData;
use crate::util::format_count;

use super::view::ScreenSurface;
use super::ViewModel;

impl ViewModel {
    pub(in crate::app) const TOP_STARRED_ROWS: usize = 8;

    pub(in crate::app) fn new(profile: ProfileData, max_nodes: usize, seed: u64) -> Self {
        let top_starred = profile.top_by_stars(Self::TOP_STARRED_ROWS);

        Self {
            profile,
            top_starred,
            max_nodes,
            seed,
            search: String::new(),
            selected: None,
            pan: Vec2::ZERO,
            zoom: 1.0,
            live_physics: true,
            damping: 0.85,
            repulsion_scale: 1.0,
            spring_scale: 1.0,
            sim: None,
            sim_dirty: true,
            step_rng: StdRng::seed_from_u64(seed),
            surface: ScreenSurface::default(),
            show_fps_bar: true,
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        repos_path: &str,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        self.update_fps_counter(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("repo-orbit");
                    ui.separator();
                    ui.label(format!("export: {repos_path}"));
                    ui.label(format!("repos: {}", self.profile.repo_count()));
                    ui.label(format!("stars: {}", format_count(self.profile.total_stars())));
                    ui.label(format!("forks: {}", format_count(self.profile.total_forks())));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload export"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(graph_text) = self.graph_summary_text() {
                            ui.label(graph_text);
                        }
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_graph(ui));
    }

    pub(in crate::app) fn graph_summary_text(&self) -> Option<String> {
        self.sim.as_ref().map(|sim| {
            format!(
                "graph: {} nodes / {} links",
                sim.nodes().len(),
                sim.links().len()
            )
        })
    }
}
