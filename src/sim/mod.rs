//! Headless force-graph core: node/link model, the owning simulation with
//! its running flag, and the surface capability the frame loop reflects
//! into. Nothing here knows how drawing happens.

mod build;
mod physics;
mod viewport;

use std::sync::Arc;

use eframe::egui::Vec2;
use thiserror::Error;

use crate::profile::RepoRecord;

pub use build::build_graph;
pub use physics::{PhysicsConfig, WARM_UP_PASSES, step, warm_up};
pub use viewport::{MIN_HEIGHT, MIN_WIDTH, apply_viewport};

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("no repositories to lay out")]
    EmptyInput,
}

/// Spatial bounds of the simulation, independent of node membership.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

/// One repository as a physical particle. Velocity stays private to the
/// engine; everything else is read-only for the rest of the app.
pub struct SimNode {
    pub id: String,
    /// Language label used for link formation; `"Other"` when undeclared.
    pub group: String,
    pub radius: f32,
    pub pos: Vec2,
    pub(in crate::sim) vel: Vec2,
    /// Back-reference to the originating record, never mutated here.
    pub repo: Arc<RepoRecord>,
}

/// Spring between two nodes of the same group. Endpoints are indices into
/// the owning simulation's node vector, whose membership is frozen after
/// build, so a link can never dangle.
pub struct SimLink {
    pub source: usize,
    pub target: usize,
    pub strength: f32,
}

/// The aggregate the frame loop drives: nodes, links, bounds and the
/// running flag. `stop()` is the only state transition; a superseded
/// simulation is rebuilt, never resumed.
pub struct Simulation {
    nodes: Vec<SimNode>,
    links: Vec<SimLink>,
    bounds: Bounds,
    running: bool,
    pub(in crate::sim) forces: Vec<Vec2>,
}

impl Simulation {
    pub(in crate::sim) fn new(nodes: Vec<SimNode>, links: Vec<SimLink>, bounds: Bounds) -> Self {
        let forces = vec![Vec2::ZERO; nodes.len()];
        Self {
            nodes,
            links,
            bounds,
            running: true,
            forces,
        }
    }

    pub fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    pub(in crate::sim) fn nodes_mut(&mut self) -> &mut [SimNode] {
        &mut self.nodes
    }

    pub fn links(&self) -> &[SimLink] {
        &self.links
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub(in crate::sim) fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Marks the simulation superseded. The frame loop checks this before
    /// scheduling another step, so a stopped simulation never touches the
    /// render surface again.
    pub fn stop(&mut self) {
        self.running = false;
    }
}

/// Capability the frame loop hands node/link state to once per completed
/// step. Implementations map world geometry onto a visual surface; the
/// slice borrows keep them from mutating simulation state.
pub trait RenderSurface {
    fn reflect(&mut self, nodes: &[SimNode], links: &[SimLink]);
}

#[cfg(test)]
pub(in crate::sim) mod testutil {
    use std::sync::Arc;

    use crate::profile::RepoRecord;

    pub fn repo(name: &str, stars: u64, language: Option<&str>) -> Arc<RepoRecord> {
        Arc::new(RepoRecord {
            name: name.to_string(),
            description: None,
            language: language.map(str::to_string),
            stargazers: stars,
            forks: 0,
            html_url: format!("https://github.com/example/{name}"),
            pushed_at: None,
            fork: false,
        })
    }
}
