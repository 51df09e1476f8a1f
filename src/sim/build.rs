use std::sync::Arc;

use eframe::egui::{Vec2, vec2};
use rand::Rng;
use rand::rngs::StdRng;

use crate::profile::RepoRecord;

use super::{Bounds, GraphError, SimLink, SimNode, Simulation};

const BASE_RADIUS: f32 = 6.0;
const MAX_RADIUS_BONUS: f32 = 30.0;
const STAR_SCALE: f32 = 2.0;
const LINK_STRENGTH: f32 = 0.02;
const FALLBACK_GROUP: &str = "Other";

/// Sub-linear star-to-radius mapping so heavily starred outliers do not
/// swallow the canvas.
pub(in crate::sim) fn node_radius(stars: u64) -> f32 {
    BASE_RADIUS + ((stars as f32) * STAR_SCALE).sqrt().min(MAX_RADIUS_BONUS)
}

/// Builds a fresh simulation from the first `max_nodes` records. Input is
/// taken in order; the caller is responsible for recency sorting. Nodes of
/// the same language form a complete subgraph; a missing language falls
/// back to a shared `"Other"` group.
pub fn build_graph(
    repos: &[Arc<RepoRecord>],
    max_nodes: usize,
    bounds: Bounds,
    rng: &mut StdRng,
) -> Result<Simulation, GraphError> {
    if repos.is_empty() {
        return Err(GraphError::EmptyInput);
    }

    let count = repos.len().min(max_nodes.max(1));
    let mut nodes = Vec::with_capacity(count);
    for repo in &repos[..count] {
        let pos = vec2(
            rng.random::<f32>() * bounds.width,
            rng.random::<f32>() * bounds.height,
        );
        nodes.push(SimNode {
            id: repo.name.clone(),
            group: repo
                .language
                .clone()
                .unwrap_or_else(|| FALLBACK_GROUP.to_string()),
            radius: node_radius(repo.stargazers),
            pos,
            vel: Vec2::ZERO,
            repo: Arc::clone(repo),
        });
    }

    // Ascending (i, j) order keeps link iteration deterministic, which the
    // seeded-trajectory guarantee depends on.
    let mut links = Vec::new();
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            if nodes[i].group == nodes[j].group {
                links.push(SimLink {
                    source: i,
                    target: j,
                    strength: LINK_STRENGTH,
                });
            }
        }
    }

    tracing::debug!(
        nodes = nodes.len(),
        links = links.len(),
        width = bounds.width,
        height = bounds.height,
        "built repository graph"
    );

    Ok(Simulation::new(nodes, links, bounds))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::super::testutil::repo;
    use super::*;

    fn bounds() -> Bounds {
        Bounds {
            width: 600.0,
            height: 420.0,
        }
    }

    #[test]
    fn empty_input_is_surfaced() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            build_graph(&[], 28, bounds(), &mut rng),
            Err(GraphError::EmptyInput)
        ));
    }

    #[test]
    fn single_language_group_forms_complete_triangle() {
        let repos = vec![
            repo("a", 10, Some("Go")),
            repo("b", 0, Some("Go")),
            repo("c", 100, Some("Go")),
        ];
        let mut rng = StdRng::seed_from_u64(2);
        let sim = build_graph(&repos, 28, bounds(), &mut rng).expect("graph builds");

        assert_eq!(sim.nodes().len(), 3);
        assert_eq!(sim.links().len(), 3);

        // Radii strictly follow star ranking: 100 > 10 > 0.
        let radii = sim.nodes().iter().map(|n| n.radius).collect::<Vec<_>>();
        assert!(radii[2] > radii[0]);
        assert!(radii[0] > radii[1]);
    }

    #[test]
    fn links_stay_within_groups() {
        let repos = vec![
            repo("g1", 1, Some("Go")),
            repo("g2", 2, Some("Go")),
            repo("r1", 3, Some("Rust")),
            repo("r2", 4, Some("Rust")),
            repo("r3", 5, Some("Rust")),
        ];
        let mut rng = StdRng::seed_from_u64(3);
        let sim = build_graph(&repos, 28, bounds(), &mut rng).expect("graph builds");

        // 1 link among the Go pair, 3 among the Rust triple, none across.
        assert_eq!(sim.links().len(), 4);
        for link in sim.links() {
            assert_ne!(link.source, link.target);
            assert_eq!(
                sim.nodes()[link.source].group,
                sim.nodes()[link.target].group
            );
        }
        let rust_links = sim
            .links()
            .iter()
            .filter(|link| sim.nodes()[link.source].group == "Rust")
            .count();
        assert_eq!(rust_links, 3);
    }

    #[test]
    fn missing_language_gets_the_fallback_group() {
        let repos = vec![repo("a", 0, None), repo("b", 0, None), repo("c", 0, Some("C"))];
        let mut rng = StdRng::seed_from_u64(4);
        let sim = build_graph(&repos, 28, bounds(), &mut rng).expect("graph builds");

        assert_eq!(sim.nodes()[0].group, "Other");
        assert_eq!(sim.nodes()[1].group, "Other");
        // Only the two undeclared repos pair up.
        assert_eq!(sim.links().len(), 1);
        assert_eq!((sim.links()[0].source, sim.links()[0].target), (0, 1));
    }

    #[test]
    fn node_cap_is_enforced() {
        let repos = (0..10)
            .map(|i| repo(&format!("repo-{i}"), i, Some("Go")))
            .collect::<Vec<_>>();

        let mut rng = StdRng::seed_from_u64(5);
        let capped = build_graph(&repos, 2, bounds(), &mut rng).expect("graph builds");
        assert_eq!(capped.nodes().len(), 2);
        // First two records in input order, regardless of the other eight.
        assert_eq!(capped.nodes()[0].id, "repo-0");
        assert_eq!(capped.nodes()[1].id, "repo-1");

        let mut rng = StdRng::seed_from_u64(5);
        let uncapped = build_graph(&repos, 28, bounds(), &mut rng).expect("graph builds");
        assert_eq!(uncapped.nodes().len(), 10);
    }

    #[test]
    fn group_link_count_is_quadratic() {
        let repos = (0..7)
            .map(|i| repo(&format!("r{i}"), 0, Some("Zig")))
            .collect::<Vec<_>>();
        let mut rng = StdRng::seed_from_u64(6);
        let sim = build_graph(&repos, 28, bounds(), &mut rng).expect("graph builds");
        assert_eq!(sim.links().len(), 7 * 6 / 2);
    }

    #[test]
    fn radius_mapping_is_bounded_and_monotonic() {
        assert_eq!(node_radius(0), 6.0);
        assert!(node_radius(10) > node_radius(1));
        // sqrt(2 * stars) saturates at +30.
        assert_eq!(node_radius(1_000_000), 36.0);
    }

    #[test]
    fn initial_positions_land_inside_the_viewport() {
        let repos = (0..20)
            .map(|i| repo(&format!("r{i}"), i, Some("Go")))
            .collect::<Vec<_>>();
        let mut rng = StdRng::seed_from_u64(7);
        let sim = build_graph(&repos, 28, bounds(), &mut rng).expect("graph builds");
        for node in sim.nodes() {
            assert!(node.pos.x >= 0.0 && node.pos.x <= 600.0);
            assert!(node.pos.y >= 0.0 && node.pos.y <= 420.0);
        }
    }
}
