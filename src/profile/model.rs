use std::sync::Arc;

use serde::Deserialize;

/// One repository as returned by the GitHub repos listing. Unknown fields
/// are ignored and missing ones default, so partial exports still load.
#[derive(Clone, Debug, Deserialize)]
pub struct RepoRecord {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, rename = "stargazers_count")]
    pub stargazers: u64,
    #[serde(default, rename = "forks_count")]
    pub forks: u64,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub pushed_at: Option<String>,
    #[serde(default)]
    pub fork: bool,
}

/// The loaded repository list, ordered by push recency (newest first).
#[derive(Clone, Debug)]
pub struct ProfileData {
    pub repos: Vec<Arc<RepoRecord>>,
}

impl ProfileData {
    pub fn repo_count(&self) -> usize {
        self.repos.len()
    }

    pub fn total_stars(&self) -> u64 {
        self.repos.iter().map(|repo| repo.stargazers).sum()
    }

    pub fn total_forks(&self) -> u64 {
        self.repos.iter().map(|repo| repo.forks).sum()
    }

    pub fn top_by_stars(&self, limit: usize) -> Vec<Arc<RepoRecord>> {
        let mut ranked = self.repos.clone();
        ranked.sort_by(|a, b| {
            b.stargazers
                .cmp(&a.stargazers)
                .then_with(|| b.forks.cmp(&a.forks))
                .then_with(|| a.name.cmp(&b.name))
        });
        ranked.truncate(limit);
        ranked
    }
}
