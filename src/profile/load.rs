use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};

use super::model::{ProfileData, RepoRecord};

/// Reads a repository list export from disk. The GitHub API already sorts
/// by `pushed` when asked; re-sort here so hand-assembled exports behave
/// the same and the graph builder can rely on input order.
pub fn load_profile(path: &str) -> Result<ProfileData> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read repository export at {path}"))?;

    let mut repos: Vec<RepoRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("invalid repository JSON in {path}"))?;

    // ISO-8601 timestamps compare correctly as strings; undated repos sink.
    repos.sort_by(|a, b| b.pushed_at.cmp(&a.pushed_at));

    tracing::info!(path, repos = repos.len(), "loaded repository export");

    Ok(ProfileData {
        repos: repos.into_iter().map(Arc::new).collect(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn loads_and_sorts_by_push_recency() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"[
                {{"name": "older", "stargazers_count": 5, "pushed_at": "2023-01-01T00:00:00Z"}},
                {{"name": "newer", "language": "Rust", "pushed_at": "2024-06-01T00:00:00Z"}},
                {{"name": "undated"}}
            ]"#
        )
        .expect("write json");

        let profile = load_profile(file.path().to_str().expect("utf-8 path")).expect("load");
        assert_eq!(profile.repo_count(), 3);
        assert_eq!(profile.repos[0].name, "newer");
        assert_eq!(profile.repos[1].name, "older");
        assert_eq!(profile.repos[2].name, "undated");
        assert_eq!(profile.repos[0].language.as_deref(), Some("Rust"));
        assert_eq!(profile.repos[1].stargazers, 5);
    }

    #[test]
    fn rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{not json").expect("write");
        assert!(load_profile(file.path().to_str().expect("utf-8 path")).is_err());
    }

    #[test]
    fn empty_list_loads_fine() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "[]").expect("write");
        let profile = load_profile(file.path().to_str().expect("utf-8 path")).expect("load");
        assert_eq!(profile.repo_count(), 0);
    }
}
