pub mod api;
pub mod episode;
pub mod error;
pub mod http;
pub mod manifest;
pub mod player;
pub mod progress;
pub mod render;
pub mod site;

// Re-export main types for convenience
pub use api::{
    EpisodePartition, HomeData, episodes_url, fetch_episodes, fetch_home_data, parse_episodes,
    partition_episodes,
};
pub use episode::{Episode, duration_to_time_string, format_long_date_pt_br};
pub use error::{FetchError, ManifestError, PlayerError, RenderError, SiteError};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use player::{NoopObserver, PlayerEvent, PlayerObserver, PlayerState, PlayerStore};
pub use progress::{BuildEvent, BuildReporter, NoopReporter, SharedBuildReporter};
pub use render::{HomePage, QueueSection, SiteInfo};
pub use site::{
    BuildOptions, BuildResult, DEFAULT_REVALIDATE_INTERVAL, build_site, build_site_on, revalidate,
};
