// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashSet;

use chrono::NaiveDate;
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::episode::Episode;

use super::layout::{SiteInfo, document};

/// Directory (relative to the site root) holding the episode pages
pub const EPISODES_DIR: &str = "episodes";

/// File name of an episode's detail page
///
/// Ids come straight from the API, so they are sanitized before they touch
/// the filesystem.
pub fn episode_page_filename(id: &str) -> String {
    let options = sanitize_filename::Options {
        truncate: true,
        windows: true,
        replacement: "-",
    };
    let sanitized = sanitize_filename::sanitize_with_options(id, options);
    let stem = sanitized.trim_matches(|c: char| matches!(c, '.' | '-') || c.is_whitespace());

    if stem.is_empty() {
        "episode.html".to_string()
    } else {
        format!("{stem}.html")
    }
}

/// Page paths relative to the site root, one per id, in the given order
///
/// Distinct ids may sanitize to the same file name ("a/b" and "a-b"). Later
/// ids then get a numeric suffix, so every episode keeps its own page.
/// Names are compared case-insensitively.
pub fn unique_page_paths<'a>(ids: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut taken = HashSet::new();

    ids.into_iter()
        .map(|id| {
            let filename = episode_page_filename(id);
            let stem = filename.strip_suffix(".html").unwrap_or(&filename);

            let mut candidate = filename.clone();
            let mut suffix = 2;
            while !taken.insert(candidate.to_lowercase()) {
                candidate = format!("{stem}-{suffix}.html");
                suffix += 1;
            }

            format!("{EPISODES_DIR}/{candidate}")
        })
        .collect()
}

/// Render the detail page of one episode
pub fn render_episode(episode: &Episode, site: &SiteInfo, today: NaiveDate) -> String {
    let mime_type = episode.mime_type.as_deref().unwrap_or("audio/mpeg");

    // The API serves the description as HTML, so it is embedded as-is
    let body = format!(
        r#"<div class="episode">
<div class="thumbnail-container">
<a href="../index.html"><button type="button"><img src="/arrow-left.svg" alt="Voltar"></button></a>
<img width="700" height="160" src="{thumbnail}" alt="{title_attr}">
</div>
<header>
<h1>{title}</h1>
<span>{members}</span>
<span>{published_at}</span>
<span>{duration}</span>
</header>
<audio controls preload="none" src="{url}" type="{mime_type}"></audio>
<div class="description">{description}</div>
</div>
"#,
        thumbnail = encode_double_quoted_attribute(&episode.thumbnail),
        title_attr = encode_double_quoted_attribute(&episode.title),
        title = encode_text(&episode.title),
        members = encode_text(&episode.members),
        published_at = encode_text(&episode.published_at),
        duration = encode_text(&episode.duration_as_string),
        url = encode_double_quoted_attribute(&episode.url),
        mime_type = encode_double_quoted_attribute(mime_type),
        description = episode.description,
    );

    document(site, &episode.title, "../", today, &body)
}
