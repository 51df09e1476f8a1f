use eframe::egui::Vec2;
use rand::Rng;
use rand::rngs::StdRng;

use super::Simulation;

const REPEL_STRENGTH: f32 = 4000.0;
const FORCE_SCALE: f32 = 0.001;
const REST_LENGTH: f32 = 60.0;
const BASE_STIFFNESS: f32 = 0.0015;
const STRENGTH_STIFFNESS: f32 = 0.01;
const BOUNDS_MARGIN: f32 = 8.0;
const COINCIDENT_EPSILON_SQ: f32 = 0.01;
const WARM_UP_DECAY: f32 = 0.9;

/// Velocity-decay passes applied once between build and the first rendered
/// step, to bleed off initialization noise.
pub const WARM_UP_PASSES: usize = 120;

/// Frame-to-frame tuning knobs; the constants above are the shape of the
/// system, these just scale it.
#[derive(Clone, Copy, Debug)]
pub struct PhysicsConfig {
    pub repulsion_scale: f32,
    pub spring_scale: f32,
    pub damping: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            repulsion_scale: 1.0,
            spring_scale: 1.0,
            damping: 0.85,
        }
    }
}

/// Advances the simulation by one step: pairwise repulsion, per-link
/// springs, damped Euler integration, then boundary containment. Forces
/// accumulate into the scratch buffer first; positions are only read
/// during accumulation, so the result matches applying each force to the
/// velocities directly.
pub fn step(sim: &mut Simulation, config: &PhysicsConfig, rng: &mut StdRng) {
    let node_count = sim.nodes.len();
    sim.forces.resize(node_count, Vec2::ZERO);
    sim.forces.fill(Vec2::ZERO);

    for i in 0..node_count {
        for j in (i + 1)..node_count {
            let mut delta = sim.nodes[i].pos - sim.nodes[j].pos;
            let mut distance_sq = delta.length_sq();
            if distance_sq < COINCIDENT_EPSILON_SQ {
                // Coincident pair: nudge apart along a pseudo-random axis
                // instead of dividing by zero.
                delta = Vec2::new(
                    (rng.random::<f32>() - 0.5) * 0.01,
                    (rng.random::<f32>() - 0.5) * 0.01,
                );
                distance_sq = delta.length_sq();
                if distance_sq <= f32::EPSILON {
                    continue;
                }
            }

            let distance = distance_sq.sqrt();
            let magnitude = (REPEL_STRENGTH * (sim.nodes[i].radius + sim.nodes[j].radius)
                / distance_sq)
                * FORCE_SCALE
                * config.repulsion_scale;
            let push = (delta / distance) * magnitude;
            sim.forces[i] += push;
            sim.forces[j] -= push;
        }
    }

    for link in &sim.links {
        let delta = sim.nodes[link.target].pos - sim.nodes[link.source].pos;
        let distance = delta.length().max(f32::EPSILON);
        let diff = distance - REST_LENGTH;
        let stiffness =
            (BASE_STIFFNESS + link.strength * STRENGTH_STIFFNESS) * config.spring_scale;
        let pull = (delta / distance) * (diff * stiffness);
        sim.forces[link.source] += pull;
        sim.forces[link.target] -= pull;
    }

    let bounds = sim.bounds;
    for (node, force) in sim.nodes.iter_mut().zip(&sim.forces) {
        node.vel = (node.vel + *force) * config.damping;
        node.pos += node.vel;

        // min-then-max never panics when the band collapses; a too-small
        // axis pins nodes to the low edge until the viewport recovers.
        let lo_x = node.radius + BOUNDS_MARGIN;
        let hi_x = bounds.width - node.radius - BOUNDS_MARGIN;
        node.pos.x = node.pos.x.min(hi_x).max(lo_x);

        let lo_y = node.radius + BOUNDS_MARGIN;
        let hi_y = bounds.height - node.radius - BOUNDS_MARGIN;
        node.pos.y = node.pos.y.min(hi_y).max(lo_y);
    }
}

/// Pre-render quieting: decays velocities without moving anything or
/// computing forces.
pub fn warm_up(sim: &mut Simulation, passes: usize) {
    for _ in 0..passes {
        for node in sim.nodes_mut() {
            node.vel *= WARM_UP_DECAY;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::super::testutil::repo;
    use super::super::{Bounds, build_graph};
    use super::*;

    fn bounds() -> Bounds {
        Bounds {
            width: 600.0,
            height: 420.0,
        }
    }

    fn dense_go_graph(seed: u64) -> Simulation {
        let repos = (0..16)
            .map(|i| repo(&format!("r{i}"), (i * i) as u64, Some("Go")))
            .collect::<Vec<_>>();
        let mut rng = StdRng::seed_from_u64(seed);
        build_graph(&repos, 28, bounds(), &mut rng).expect("graph builds")
    }

    fn kinetic_energy(sim: &Simulation) -> f32 {
        sim.nodes.iter().map(|node| node.vel.length_sq()).sum()
    }

    #[test]
    fn positions_stay_inside_the_bounds_band_after_every_step() {
        let mut sim = dense_go_graph(21);
        let mut rng = StdRng::seed_from_u64(22);
        let config = PhysicsConfig::default();

        for _ in 0..200 {
            step(&mut sim, &config, &mut rng);
            let b = sim.bounds();
            for node in sim.nodes() {
                assert!(node.pos.x >= node.radius + 8.0);
                assert!(node.pos.x <= b.width - node.radius - 8.0);
                assert!(node.pos.y >= node.radius + 8.0);
                assert!(node.pos.y <= b.height - node.radius - 8.0);
                assert!(node.pos.x.is_finite() && node.pos.y.is_finite());
            }
        }
    }

    #[test]
    fn seeded_runs_reproduce_identical_trajectories() {
        let mut first = dense_go_graph(33);
        let mut second = dense_go_graph(33);
        let mut rng_a = StdRng::seed_from_u64(34);
        let mut rng_b = StdRng::seed_from_u64(34);
        let config = PhysicsConfig::default();

        for _ in 0..120 {
            step(&mut first, &config, &mut rng_a);
            step(&mut second, &config, &mut rng_b);
            for (a, b) in first.nodes().iter().zip(second.nodes()) {
                assert_eq!(a.pos, b.pos);
            }
        }
    }

    #[test]
    fn coincident_nodes_are_pushed_apart_without_nans() {
        let repos = vec![repo("a", 5, Some("Go")), repo("b", 5, Some("Go"))];
        let mut rng = StdRng::seed_from_u64(41);
        let mut sim = build_graph(&repos, 28, bounds(), &mut rng).expect("graph builds");

        // Force an exact overlap, then step through the perturbation path.
        let overlap = sim.nodes()[0].pos;
        sim.nodes_mut()[1].pos = overlap;

        let config = PhysicsConfig::default();
        for _ in 0..10 {
            step(&mut sim, &config, &mut rng);
        }

        let delta = sim.nodes()[0].pos - sim.nodes()[1].pos;
        assert!(delta.length() > 0.0);
        for node in sim.nodes() {
            assert!(node.pos.x.is_finite() && node.pos.y.is_finite());
        }
    }

    #[test]
    fn warm_up_decays_energy_and_never_moves_nodes() {
        let mut sim = dense_go_graph(55);
        let mut rng = StdRng::seed_from_u64(56);
        let config = PhysicsConfig::default();

        // A few live steps give every node a non-trivial velocity.
        for _ in 0..5 {
            step(&mut sim, &config, &mut rng);
        }

        let frozen = sim.nodes().iter().map(|n| n.pos).collect::<Vec<_>>();
        let mut previous = kinetic_energy(&sim);
        assert!(previous > 0.0);

        for _ in 0..WARM_UP_PASSES {
            warm_up(&mut sim, 1);
            let current = kinetic_energy(&sim);
            assert!(current <= previous);
            previous = current;
        }

        for (before, node) in frozen.iter().zip(sim.nodes()) {
            assert_eq!(*before, node.pos);
        }
    }

    #[test]
    fn isolated_node_velocity_decays_geometrically() {
        let repos = vec![repo("solo", 3, Some("Go"))];
        let mut rng = StdRng::seed_from_u64(61);
        let mut sim = build_graph(&repos, 28, bounds(), &mut rng).expect("graph builds");
        sim.nodes_mut()[0].vel = Vec2::new(4.0, -2.0);

        let config = PhysicsConfig::default();
        step(&mut sim, &config, &mut rng);

        // No pair, no link: only damping acts on the velocity.
        assert_eq!(sim.nodes()[0].vel, Vec2::new(4.0 * 0.85, -2.0 * 0.85));
    }

    #[test]
    fn linked_pair_is_pulled_toward_rest_length() {
        let repos = vec![repo("a", 0, Some("Go")), repo("b", 0, Some("Go"))];
        let mut rng = StdRng::seed_from_u64(71);
        let mut sim = build_graph(&repos, 28, bounds(), &mut rng).expect("graph builds");

        sim.nodes_mut()[0].pos = Vec2::new(100.0, 210.0);
        sim.nodes_mut()[1].pos = Vec2::new(500.0, 210.0);

        let config = PhysicsConfig::default();
        for _ in 0..400 {
            step(&mut sim, &config, &mut rng);
        }
        let distance = (sim.nodes()[1].pos - sim.nodes()[0].pos).length();

        // Spring wins over repulsion at long range; the pair settles well
        // below its starting separation, near the rest length.
        assert!(distance < 200.0, "distance {distance} did not contract");
    }
}
