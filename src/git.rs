// This file is part of the terraform-provider-context project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Debug;
use std::process::Output;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_process::Command;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::{timeout, Instant};

/// How long repository metadata stays valid after a refresh
pub const REPO_METADATA_TTL: Duration = Duration::from_secs(5 * 60);

const GIT_COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RepoMetadata {
    pub repo_url: String,
    pub commit_hash: String,
}

/// Source of the raw repository information
#[async_trait]
pub trait RepoQuery: Send + Sync + Debug + 'static {
    /// URL of the `origin` remote, as configured
    async fn origin_url(&self) -> Result<String>;

    /// Hash of the checked out commit
    async fn commit_hash(&self) -> Result<String>;
}

/// Queries the repository of the current directory with the `git` executable
#[derive(Debug, Default, Clone)]
pub struct GitCli {}

/// Run a command to completion, killing it if it outlives `limit`
async fn output_within(command: &mut Command, limit: Duration) -> Result<Output> {
    let output = timeout(limit, command.kill_on_drop(true).output())
        .await
        .map_err(|_| anyhow!("timed out after {limit:?}"))??;
    Ok(output)
}

impl GitCli {
    async fn git(&self, args: &[&str]) -> Result<String> {
        let output = output_within(Command::new("git").args(args), GIT_COMMAND_TIMEOUT)
            .await
            .with_context(|| format!("failed to run `git {}`", args.join(" ")))?;

        if !output.status.success() {
            return Err(anyhow!(
                "`git {}` failed with {}: {}",
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl RepoQuery for GitCli {
    async fn origin_url(&self) -> Result<String> {
        self.git(&["config", "--get", "remote.origin.url"]).await
    }

    async fn commit_hash(&self) -> Result<String> {
        self.git(&["rev-parse", "HEAD"]).await
    }
}

#[derive(Debug)]
struct CacheEntry {
    metadata: RepoMetadata,
    refreshed_at: Instant,
}

/// Repository metadata shared by all the reads of the process
#[derive(Debug)]
pub struct RepoMetadataCache {
    query: Arc<dyn RepoQuery>,
    ttl: Duration,
    entry: RwLock<Option<CacheEntry>>,
}

impl Default for RepoMetadataCache {
    fn default() -> Self {
        Self::new(Arc::new(GitCli::default()))
    }
}

impl RepoMetadataCache {
    pub fn new(query: Arc<dyn RepoQuery>) -> Self {
        Self::with_ttl(query, REPO_METADATA_TTL)
    }

    pub fn with_ttl(query: Arc<dyn RepoQuery>, ttl: Duration) -> Self {
        Self {
            query,
            ttl,
            entry: RwLock::new(None),
        }
    }

    /// Get the repository metadata, refreshing it once it is older than the ttl.
    ///
    /// Query failures leave the corresponding field empty.
    pub async fn get(&self) -> RepoMetadata {
        if let Some(metadata) = self.fresh(&*self.entry.read().await) {
            return metadata;
        }

        let mut entry = self.entry.write().await;
        // Another reader may have refreshed while we were waiting for the lock
        if let Some(metadata) = self.fresh(&entry) {
            return metadata;
        }

        let (repo_url, commit_hash) =
            futures::join!(self.query.origin_url(), self.query.commit_hash());

        let repo_url = repo_url
            .map(|url| ssh_to_https(&url))
            .unwrap_or_else(|err| {
                tracing::debug!("repository url unavailable: {err:#}");
                String::new()
            });
        let commit_hash = commit_hash.unwrap_or_else(|err| {
            tracing::debug!("repository commit unavailable: {err:#}");
            String::new()
        });

        let metadata = RepoMetadata {
            repo_url,
            commit_hash,
        };
        tracing::debug!(
            repo_url = %metadata.repo_url,
            commit_hash = %metadata.commit_hash,
            "refreshed repository metadata"
        );

        *entry = Some(CacheEntry {
            metadata: metadata.clone(),
            refreshed_at: Instant::now(),
        });
        metadata
    }

    /// Forget the cached metadata
    pub async fn invalidate(&self) {
        *self.entry.write().await = None;
    }

    fn fresh(&self, entry: &Option<CacheEntry>) -> Option<RepoMetadata> {
        entry
            .as_ref()
            .filter(|entry| entry.refreshed_at.elapsed() < self.ttl)
            .map(|entry| entry.metadata.clone())
    }
}

/// Convert an ssh remote url into its https form, without the `.git` suffix
pub fn ssh_to_https(url: &str) -> String {
    let https = if let Some(rest) = url.strip_prefix("git@") {
        format!("https://{}", rest.replacen(':', "/", 1))
    } else if let Some(rest) = url.strip_prefix("ssh://") {
        let rest = rest.strip_prefix("git@").unwrap_or(rest);
        format!("https://{}", rest.replacen(':', "/", 1))
    } else {
        url.to_string()
    };

    match https.strip_suffix(".git") {
        Some(stripped) => stripped.to_string(),
        None => https,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Debug, Default)]
    struct FakeRepo {
        url: Option<&'static str>,
        commit: Option<&'static str>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RepoQuery for FakeRepo {
        async fn origin_url(&self) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.url
                .map(str::to_string)
                .ok_or_else(|| anyhow!("no remote"))
        }

        async fn commit_hash(&self) -> Result<String> {
            self.commit
                .map(str::to_string)
                .ok_or_else(|| anyhow!("no commit"))
        }
    }

    fn fake(url: Option<&'static str>, commit: Option<&'static str>) -> Arc<FakeRepo> {
        Arc::new(FakeRepo {
            url,
            commit,
            calls: AtomicUsize::new(0),
        })
    }

    #[test]
    fn converts_ssh_to_https() {
        let cases = [
            ("git@github.com:user/repo.git", "https://github.com/user/repo"),
            (
                "ssh://git@bitbucket.org/user/repo.git",
                "https://bitbucket.org/user/repo",
            ),
            (
                "ssh://git@host.example.com:7999/team/repo.git",
                "https://host.example.com/7999/team/repo",
            ),
            ("ssh://host.example.com/repo", "https://host.example.com/repo"),
            ("https://github.com/user/repo.git", "https://github.com/user/repo"),
            ("https://github.com/user/repo", "https://github.com/user/repo"),
            ("git@gitlab.com:user/repo.git", "https://gitlab.com/user/repo"),
            ("", ""),
        ];
        for (input, expected) in cases {
            assert_eq!(ssh_to_https(input), expected, "{input}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn caches_until_ttl() {
        let repo = fake(Some("git@github.com:user/repo.git"), Some("abc123"));
        let cache = RepoMetadataCache::new(repo.clone());

        let metadata = cache.get().await;
        assert_eq!(metadata.repo_url, "https://github.com/user/repo");
        assert_eq!(metadata.commit_hash, "abc123");

        tokio::time::advance(REPO_METADATA_TTL - Duration::from_secs(1)).await;
        assert_eq!(cache.get().await, metadata);
        assert_eq!(repo.calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.get().await, metadata);
        assert_eq!(repo.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn invalidate_forces_refresh() {
        let repo = fake(Some("https://github.com/user/repo"), Some("abc123"));
        let cache = RepoMetadataCache::new(repo.clone());

        cache.get().await;
        cache.invalidate().await;
        cache.get().await;
        assert_eq!(repo.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_misses_refresh_once() {
        let repo = fake(Some("https://github.com/user/repo"), Some("abc123"));
        let cache = RepoMetadataCache::new(repo.clone());

        let results = futures::future::join_all((0..8).map(|_| cache.get())).await;

        assert_eq!(repo.calls.load(Ordering::SeqCst), 1);
        assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[tokio::test]
    async fn failures_leave_fields_empty() {
        let cache = RepoMetadataCache::new(fake(None, Some("abc123")));
        assert_eq!(
            cache.get().await,
            RepoMetadata {
                repo_url: String::new(),
                commit_hash: "abc123".to_string(),
            }
        );

        let cache = RepoMetadataCache::new(fake(None, None));
        assert_eq!(cache.get().await, RepoMetadata::default());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn timed_out_command_is_killed() {
        let marker = std::env::temp_dir().join(format!("context-timeout-{}", std::process::id()));
        let _ = std::fs::remove_file(&marker);

        let mut command = Command::new("sh");
        command
            .arg("-c")
            .arg(format!("sleep 1 && touch '{}'", marker.display()));
        let err = output_within(&mut command, Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("timed out"), "{err}");

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!marker.exists());
    }

    #[tokio::test]
    async fn git_cli_never_fails() {
        // Runs whether or not git and a repository are available
        let metadata = RepoMetadataCache::default().get().await;
        assert!(!metadata.repo_url.ends_with(".git"));
        assert!(!metadata.commit_hash.contains('\n'));
    }
}
