// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;
use std::time::Duration;

use chrono::{Local, NaiveDate};

use crate::api::{DEFAULT_LATEST_COUNT, DEFAULT_LIMIT, episodes_url, fetch_home_data};
use crate::error::SiteError;
use crate::http::HttpClient;
use crate::manifest::{BuildManifest, content_hash, read_manifest, write_manifest};
use crate::progress::{BuildEvent, SharedBuildReporter};
use crate::render::{
    EPISODES_DIR, HomePage, SiteInfo, render_episode, render_feed, render_home,
};

/// How often the site is rebuilt in watch mode (8 hours)
pub const DEFAULT_REVALIDATE_INTERVAL: Duration = Duration::from_secs(60 * 60 * 8);

/// Options for a site build
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Base URL of the episode API
    pub api_url: String,
    /// Number of episodes requested from the API
    pub limit: usize,
    /// Number of episodes highlighted as latest
    pub latest_count: usize,
    pub site: SiteInfo,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3333".to_string(),
            limit: DEFAULT_LIMIT,
            latest_count: DEFAULT_LATEST_COUNT,
            site: SiteInfo::default(),
        }
    }
}

/// Result of a site build
#[derive(Debug, Clone, Default)]
pub struct BuildResult {
    /// Number of episodes the pages were rendered from
    pub episodes: usize,
    /// Number of pages written
    pub written: usize,
    /// Number of pages skipped because they did not change
    pub unchanged: usize,
    /// Number of stale episode pages deleted
    pub removed: usize,
    /// Fetch failure message, if the build fell back
    pub fetch_error: Option<String>,
    /// True if a failed fetch left the previous build in place
    pub kept_previous: bool,
}

/// Build the site into `output_dir`, dated today
pub async fn build_site<C: HttpClient>(
    client: &C,
    options: &BuildOptions,
    output_dir: &Path,
    reporter: &SharedBuildReporter,
) -> Result<BuildResult, SiteError> {
    let today = Local::now().date_naive();
    build_site_on(client, options, output_dir, today, reporter).await
}

/// Build the site into `output_dir`, dated `today`
///
/// This is the main entry point for the library. It:
/// 1. Fetches the latest episodes and splits them for the home page
/// 2. Renders the home page, one page per episode and the RSS feed
/// 3. Writes every page whose content changed since the last build
/// 4. Removes episode pages that are no longer listed
/// 5. Writes the build manifest
///
/// A failed fetch never fails the build. Without a previous build an empty
/// site is written; otherwise the previous pages are kept.
pub async fn build_site_on<C: HttpClient>(
    client: &C,
    options: &BuildOptions,
    output_dir: &Path,
    today: NaiveDate,
    reporter: &SharedBuildReporter,
) -> Result<BuildResult, SiteError> {
    let url = episodes_url(&options.api_url, options.limit)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| options.api_url.clone());
    reporter.report(BuildEvent::FetchingEpisodes { url });

    let data = fetch_home_data(
        client,
        &options.api_url,
        options.limit,
        options.latest_count,
    )
    .await;

    // A corrupt manifest only costs a full rewrite
    let previous = read_manifest(output_dir).ok().flatten();

    let fetch_error = data.error.as_ref().map(|e| e.to_string());
    if let Some(error) = &fetch_error {
        let kept_previous = previous.as_ref().is_some_and(|m| m.episode_count > 0);
        reporter.report(BuildEvent::FetchFailed {
            error: error.clone(),
            kept_previous,
        });

        if kept_previous {
            return Ok(BuildResult {
                fetch_error,
                kept_previous,
                ..Default::default()
            });
        }
    } else {
        reporter.report(BuildEvent::EpisodesFetched {
            total: data.partition.len(),
            latest: data.partition.latest.len(),
            archived: data.partition.all.len(),
        });
    }

    let previous = previous.unwrap_or_default();
    let page = HomePage::new(data.partition);
    let episode_count = page.page_paths().len();

    // Episode page paths are unique per build, so no page overwrites another
    let mut pages = vec![(
        "index.html".to_string(),
        render_home(&page, &options.site, today)?,
    )];
    for (episode, path) in page.pages() {
        pages.push((
            path.to_string(),
            render_episode(episode, &options.site, today),
        ));
    }
    pages.push(("feed.xml".to_string(), render_feed(&options.site, &page)?));

    create_dir(&output_dir.join(EPISODES_DIR)).await?;

    let mut manifest = BuildManifest::new(episode_count);
    let mut written = 0;
    let mut unchanged = 0;

    for (relative_path, content) in pages {
        let hash = content_hash(content.as_bytes());
        let path = output_dir.join(&relative_path);

        if previous.is_unchanged(&relative_path, &hash) && path.exists() {
            reporter.report(BuildEvent::PageUnchanged {
                path: relative_path.clone(),
            });
            unchanged += 1;
        } else {
            tokio::fs::write(&path, content.as_bytes())
                .await
                .map_err(|e| SiteError::WriteFailed {
                    path: path.clone(),
                    source: e,
                })?;
            reporter.report(BuildEvent::PageWritten {
                path: relative_path.clone(),
                bytes: content.len(),
            });
            written += 1;
        }

        manifest.pages.insert(relative_path, hash);
    }

    let removed = remove_stale_pages(&previous, &manifest, output_dir, reporter).await;

    write_manifest(&manifest, output_dir)?;

    reporter.report(BuildEvent::BuildCompleted {
        written_count: written,
        unchanged_count: unchanged,
        removed_count: removed,
    });

    Ok(BuildResult {
        episodes: episode_count,
        written,
        unchanged,
        removed,
        fetch_error,
        kept_previous: false,
    })
}

/// Rebuild the site now and then every `interval`, forever
///
/// A failed build is reported as [`BuildEvent::BuildFailed`] and retried on
/// the next tick. The future only ends when it is dropped.
pub async fn revalidate<C: HttpClient>(
    client: &C,
    options: &BuildOptions,
    output_dir: &Path,
    interval: Duration,
    reporter: &SharedBuildReporter,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        // The first tick completes immediately
        ticker.tick().await;
        if let Err(e) = build_site(client, options, output_dir, reporter).await {
            reporter.report(BuildEvent::BuildFailed {
                error: e.to_string(),
            });
        }
        reporter.report(BuildEvent::Revalidating {
            interval_secs: interval.as_secs(),
        });
    }
}

async fn create_dir(path: &Path) -> Result<(), SiteError> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| SiteError::CreateDirectoryFailed {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Delete episode pages written by the previous build but not by this one
async fn remove_stale_pages(
    previous: &BuildManifest,
    current: &BuildManifest,
    output_dir: &Path,
    reporter: &SharedBuildReporter,
) -> usize {
    let mut removed = 0;

    let stale = previous
        .pages
        .keys()
        .filter(|path| path.starts_with(EPISODES_DIR) && !current.pages.contains_key(*path));

    for relative_path in stale {
        if tokio::fs::remove_file(output_dir.join(relative_path))
            .await
            .is_ok()
        {
            reporter.report(BuildEvent::PageRemoved {
                path: relative_path.clone(),
            });
            removed += 1;
        }
    }

    removed
}
