mod fetch;
mod parse;

pub use fetch::{
    DEFAULT_LIMIT, HomeData, episodes_url, fetch_episodes, fetch_home_data, is_url,
};
pub use parse::{
    DEFAULT_LATEST_COUNT, EpisodePartition, RawEpisode, RawFile, RawId, map_episode, parse_episodes,
    partition_episodes,
};
