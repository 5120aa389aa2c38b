mod format;
mod model;

pub use format::{duration_to_time_string, format_long_date_pt_br, parse_published_at};
pub use model::Episode;
