//! Per-site purge pipeline
//!
//! For every configured site: compute the retention window, fetch the posts published
//! inside it, then delete each post's featured media followed by the post itself.
//! Delete failures are isolated to the item; a fetch failure aborts only that site.

use chrono::{DateTime, Utc};

use crate::config::{AppConfig, SiteConfig};
use crate::window::RetentionPolicy;
use crate::wordpress::{Post, WordPressClient};
use crate::Result;

/// Counters for one site's run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Posts returned by the fetch
    pub matched: usize,
    pub deleted: usize,
    pub errors: usize,
    pub dry_run: bool,
}

/// Outcome of processing one site
#[derive(Debug)]
pub struct SiteReport {
    pub site: String,
    pub outcome: Result<RunSummary>,
}

pub struct PostRemover {
    client: WordPressClient,
    policy: RetentionPolicy,
}

impl PostRemover {
    pub fn new(client: WordPressClient, policy: RetentionPolicy) -> Self {
        Self { client, policy }
    }

    /// Fetch the posts in the window ending `threshold` days before `now` and delete them
    ///
    /// With `dry_run` the matching posts are only listed.
    pub async fn remove_posts(&self, now: DateTime<Utc>, dry_run: bool) -> Result<RunSummary> {
        let window = self.policy.window_at(now)?;
        let posts = self.client.fetch_posts(&window).await?;

        let mut summary = RunSummary {
            matched: posts.len(),
            dry_run,
            ..RunSummary::default()
        };

        if dry_run {
            for post in &posts {
                tracing::info!(
                    "Would delete post ID: {} ({}), featured media: {}",
                    post.id,
                    post.slug.as_deref().unwrap_or("-"),
                    post.featured_media_id()
                        .map(|id| id.to_string())
                        .unwrap_or_else(|| "none".to_string())
                );
            }
            return Ok(summary);
        }

        for (index, post) in posts.iter().enumerate() {
            tracing::info!(
                "======= Processing post {}, post ID: {} =======",
                index,
                post.id
            );

            if self.delete_post(post).await {
                summary.deleted += 1;
            } else {
                summary.errors += 1;
            }
        }

        Ok(summary)
    }

    /// Delete the featured media (best effort) and then the post
    ///
    /// Returns whether the post itself was deleted. Media failures are logged only.
    async fn delete_post(&self, post: &Post) -> bool {
        if let Some(media_id) = post.featured_media_id() {
            tracing::info!("Deleting media ID: {}", media_id);
            match self.client.delete_media(media_id).await {
                Ok(()) => tracing::info!("Deleted media ID: {}", media_id),
                Err(e) => tracing::warn!("Error deleting media {}: {}", media_id, e),
            }
        }

        tracing::info!("Deleting post ID: {}", post.id);
        match self.client.delete_post(post.id).await {
            Ok(()) => {
                tracing::info!("Deleted post ID: {}", post.id);
                true
            }
            Err(e) => {
                tracing::error!("Error deleting post {}: {}", post.id, e);
                false
            }
        }
    }
}

async fn purge_site(
    config: &AppConfig,
    site: &SiteConfig,
    now: DateTime<Utc>,
    dry_run: bool,
) -> Result<RunSummary> {
    let client = WordPressClient::from_site(site, &config.http)?;
    let remover = PostRemover::new(client, RetentionPolicy::from(&config.general));
    remover.remove_posts(now, dry_run).await
}

/// Process `sites` one after another
///
/// A site that fails (bad URL, failed fetch) is reported and the next site still runs.
pub async fn purge_sites(
    config: &AppConfig,
    sites: &[&SiteConfig],
    now: DateTime<Utc>,
    dry_run: bool,
) -> Vec<SiteReport> {
    let mut reports = Vec::with_capacity(sites.len());

    for site in sites {
        tracing::info!("======= Processing {} =======", site.name);

        let outcome = purge_site(config, site, now, dry_run).await;
        if let Err(e) = &outcome {
            tracing::error!("Site '{}' aborted: {}", site.name, e);
        }

        reports.push(SiteReport {
            site: site.name.clone(),
            outcome,
        });
    }

    reports
}
