mod app;
mod profile;
mod sim;
mod util;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to a JSON export of the GitHub repository list
    /// (the `/users/:name/repos?sort=pushed` payload).
    repos_json: String,

    /// Maximum number of repositories rendered as graph nodes.
    #[arg(long, default_value_t = 28)]
    max_nodes: usize,

    /// Seed for node placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(path = %args.repos_json, max_nodes = args.max_nodes, seed, "starting repo-orbit");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        "repo-orbit",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::RepoOrbitApp::new(
                cc,
                args.repos_json.clone(),
                args.max_nodes,
                seed,
            )))
        }),
    )
}
