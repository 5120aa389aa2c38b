mod episode_page;
mod feed;
mod home;
mod layout;

pub use episode_page::{EPISODES_DIR, episode_page_filename, render_episode, unique_page_paths};
pub use feed::render_feed;
pub use home::{HomePage, QueueEntry, QueueSection, render_home};
pub use layout::SiteInfo;
