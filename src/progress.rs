use std::sync::Arc;

/// Events emitted while building the site, for progress reporting
#[derive(Debug, Clone)]
pub enum BuildEvent {
    /// Episodes are being requested from the API
    FetchingEpisodes { url: String },

    /// Episodes were fetched and split for the home page
    EpisodesFetched {
        total: usize,
        latest: usize,
        archived: usize,
    },

    /// Fetching failed; the build continues with the fallback
    FetchFailed {
        error: String,
        /// True when the pages of the previous build are left in place
        kept_previous: bool,
    },

    /// A page was written because its content changed
    PageWritten { path: String, bytes: usize },

    /// A page was skipped because its content hash matched the last build
    PageUnchanged { path: String },

    /// A page from the last build no longer has an episode and was deleted
    PageRemoved { path: String },

    /// Build finished
    BuildCompleted {
        written_count: usize,
        unchanged_count: usize,
        removed_count: usize,
    },

    /// A build aborted; in watch mode the next tick tries again
    BuildFailed { error: String },

    /// Waiting for the next revalidation
    Revalidating { interval_secs: u64 },
}

/// Trait for reporting progress events during a build.
///
/// Implementations can use this to display spinners, log messages,
/// or collect statistics.
pub trait BuildReporter: Send + Sync {
    /// Report a build event
    fn report(&self, event: BuildEvent);
}

/// A shared reference to a build reporter
pub type SharedBuildReporter = Arc<dyn BuildReporter>;

/// A no-op reporter that silently ignores all events.
/// Useful for tests or quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl BuildReporter for NoopReporter {
    fn report(&self, _event: BuildEvent) {
        // Intentionally empty
    }
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedBuildReporter {
        Arc::new(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_reporter_handles_all_events() {
        let reporter = NoopReporter::shared();

        reporter.report(BuildEvent::FetchingEpisodes {
            url: "http://localhost:3333/episodes".to_string(),
        });

        reporter.report(BuildEvent::EpisodesFetched {
            total: 5,
            latest: 2,
            archived: 3,
        });

        reporter.report(BuildEvent::FetchFailed {
            error: "connection refused".to_string(),
            kept_previous: false,
        });

        reporter.report(BuildEvent::PageWritten {
            path: "index.html".to_string(),
            bytes: 1024,
        });

        reporter.report(BuildEvent::PageUnchanged {
            path: "feed.xml".to_string(),
        });

        reporter.report(BuildEvent::PageRemoved {
            path: "episodes/old.html".to_string(),
        });

        reporter.report(BuildEvent::BuildCompleted {
            written_count: 4,
            unchanged_count: 1,
            removed_count: 1,
        });

        reporter.report(BuildEvent::BuildFailed {
            error: "Failed to create directory site/episodes".to_string(),
        });

        reporter.report(BuildEvent::Revalidating {
            interval_secs: 28800,
        });
    }
}
