use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};
use rand::rngs::StdRng;

use crate::profile::{ProfileData, RepoRecord, load_profile};
use crate::sim::Simulation;

mod controls;
mod details;
mod fps;
mod interaction;
mod panels;
mod render_utils;
mod view;

use view::ScreenSurface;

pub struct RepoOrbitApp {
    repos_path: String,
    initial_max_nodes: usize,
    initial_seed: u64,
    state: AppState,
    reload_rx: Option<Receiver<Result<ProfileData, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<ProfileData, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    profile: ProfileData,
    top_starred: Vec<Arc<RepoRecord>>,
    max_nodes: usize,
    seed: u64,
    search: String,
    selected: Option<String>,
    pan: Vec2,
    zoom: f32,
    live_physics: bool,
    damping: f32,
    repulsion_scale: f32,
    spring_scale: f32,
    sim: Option<Simulation>,
    sim_dirty: bool,
    step_rng: StdRng,
    surface: ScreenSurface,
    show_fps_bar: bool,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
}

impl RepoOrbitApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        repos_path: String,
        max_nodes: usize,
        seed: u64,
    ) -> Self {
        let state = Self::start_load(repos_path.clone());
        Self {
            repos_path,
            initial_max_nodes: max_nodes,
            initial_seed: seed,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(repos_path: String) -> Receiver<Result<ProfileData, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_profile(&repos_path).map_err(|error| error.to_string());
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(repos_path: String) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(repos_path),
        }
    }
}

impl eframe::App for RepoOrbitApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        // A reload carries the current cap and seed forward; the CLI values
        // apply to the first build and any retry after an error.
        let (carry_max_nodes, carry_seed) = match &self.state {
            AppState::Ready(model) => (model.max_nodes, model.seed),
            _ => (self.initial_max_nodes, self.initial_seed),
        };

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(profile) => AppState::Ready(Box::new(ViewModel::new(
                            profile,
                            carry_max_nodes,
                            carry_seed,
                        ))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading repository export...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load repository export");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.repos_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.repos_path, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.repos_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            transition = Some(match result {
                                Ok(profile) => AppState::Ready(Box::new(ViewModel::new(
                                    profile,
                                    carry_max_nodes,
                                    carry_seed,
                                ))),
                                Err(error) => AppState::Error(error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(AppState::Error("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            // The superseded view model (and its simulation) is dropped
            // here; its loop never gets another frame.
            if let AppState::Ready(model) = &mut self.state
                && let Some(sim) = model.sim.as_mut()
            {
                sim.stop();
            }
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
