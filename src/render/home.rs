// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::NaiveDate;
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Serialize;

use crate::api::EpisodePartition;
use crate::episode::Episode;
use crate::error::{PlayerError, RenderError};
use crate::player::PlayerStore;

use super::episode_page::unique_page_paths;
use super::layout::{SiteInfo, document};

/// Which of the two home page lists a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueSection {
    Latest,
    All,
}

/// The player-facing view of an episode, embedded into the page as JSON
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    pub id: String,
    pub title: String,
    pub members: String,
    pub thumbnail: String,
    pub duration: u64,
    pub url: String,
}

impl From<&Episode> for QueueEntry {
    fn from(episode: &Episode) -> Self {
        Self {
            id: episode.id.clone(),
            title: episode.title.clone(),
            members: episode.members.clone(),
            thumbnail: episode.thumbnail.clone(),
            duration: episode.duration,
            url: episode.url.clone(),
        }
    }
}

/// Home page model: the latest episodes and the archive, addressed as one queue
///
/// Latest rows occupy queue indices `[0, latest.len())` and archive rows
/// follow directly after. Each queue entry owns a distinct page path.
#[derive(Debug, Clone, Default)]
pub struct HomePage {
    partition: EpisodePartition,
    page_paths: Vec<String>,
}

impl HomePage {
    pub fn new(partition: EpisodePartition) -> Self {
        let page_paths = unique_page_paths(
            partition
                .latest
                .iter()
                .chain(partition.all.iter())
                .map(|episode| episode.id.as_str()),
        );

        Self {
            partition,
            page_paths,
        }
    }

    pub fn latest(&self) -> &[Episode] {
        &self.partition.latest
    }

    pub fn all(&self) -> &[Episode] {
        &self.partition.all
    }

    /// Both lists concatenated in display order
    pub fn queue(&self) -> Vec<Episode> {
        self.partition
            .latest
            .iter()
            .chain(self.partition.all.iter())
            .cloned()
            .collect()
    }

    /// Page path of every queue entry, relative to the site root
    pub fn page_paths(&self) -> &[String] {
        &self.page_paths
    }

    /// Queue entries paired with their page paths
    pub fn pages(&self) -> impl Iterator<Item = (&Episode, &str)> {
        self.partition
            .latest
            .iter()
            .chain(self.partition.all.iter())
            .zip(self.page_paths.iter().map(String::as_str))
    }

    /// Map a row of either list to its position in the combined queue
    pub fn queue_index(&self, section: QueueSection, index: usize) -> Result<usize, PlayerError> {
        let (rows, offset) = match section {
            QueueSection::Latest => (&self.partition.latest, 0),
            QueueSection::All => (&self.partition.all, self.partition.latest.len()),
        };

        if index >= rows.len() {
            return Err(PlayerError::OutOfRange {
                index,
                len: rows.len(),
            });
        }

        Ok(index + offset)
    }

    /// Play the combined queue starting at the given row
    pub fn play_row(
        &self,
        store: &mut PlayerStore,
        section: QueueSection,
        index: usize,
    ) -> Result<(), PlayerError> {
        let queue_index = self.queue_index(section, index)?;
        store.play_list(self.queue(), queue_index)
    }

    fn queue_entries(&self) -> Vec<QueueEntry> {
        self.partition
            .latest
            .iter()
            .chain(self.partition.all.iter())
            .map(QueueEntry::from)
            .collect()
    }
}

/// Render the home page document
pub fn render_home(
    page: &HomePage,
    site: &SiteInfo,
    today: NaiveDate,
) -> Result<String, RenderError> {
    let mut body = String::new();

    body.push_str("<div class=\"homepage\">\n");
    body.push_str(&latest_section(page));
    body.push_str(&archive_section(page));
    body.push_str("</div>\n");
    body.push_str(&queue_script(page)?);

    Ok(document(site, "", "", today, &body))
}

fn latest_section(page: &HomePage) -> String {
    let mut html = String::from("<section class=\"latest-episodes\">\n<h2>Últimos lançamentos</h2>\n<ul>\n");

    for (index, (episode, href)) in page.latest().iter().zip(page.page_paths()).enumerate() {
        // Latest rows open the queue, so no offset
        html.push_str(&format!(
            r#"<li>
<img width="192" height="192" src="{thumbnail}" alt="{title_attr}">
<div class="episode-details">
<a href="{href}">{title}</a>
<p>{members}</p>
<span>{published_at}</span>
<span>{duration}</span>
</div>
{button}
</li>
"#,
            thumbnail = encode_double_quoted_attribute(&episode.thumbnail),
            title_attr = encode_double_quoted_attribute(&episode.title),
            href = encode_double_quoted_attribute(href),
            title = encode_text(&episode.title),
            members = encode_text(&episode.members),
            published_at = encode_text(&episode.published_at),
            duration = encode_text(&episode.duration_as_string),
            button = play_button(episode, index),
        ));
    }

    html.push_str("</ul>\n</section>\n");
    html
}

fn archive_section(page: &HomePage) -> String {
    let offset = page.latest().len();
    let mut html = String::from(
        r#"<section class="all-episodes">
<h2>Todos episódios</h2>
<table cellspacing="0">
<thead>
<tr>
<th></th>
<th>Podcast</th>
<th>Integrantes</th>
<th>Data</th>
<th>Duração</th>
<th></th>
</tr>
</thead>
<tbody>
"#,
    );

    let hrefs = page.page_paths().iter().skip(offset);
    for (index, (episode, href)) in page.all().iter().zip(hrefs).enumerate() {
        html.push_str(&format!(
            r#"<tr>
<td style="width: 72px"><img width="120" height="120" src="{thumbnail}" alt="{title_attr}"></td>
<td><a href="{href}">{title}</a></td>
<td>{members}</td>
<td style="width: 100px">{published_at}</td>
<td>{duration}</td>
<td>{button}</td>
</tr>
"#,
            thumbnail = encode_double_quoted_attribute(&episode.thumbnail),
            title_attr = encode_double_quoted_attribute(&episode.title),
            href = encode_double_quoted_attribute(href),
            title = encode_text(&episode.title),
            members = encode_text(&episode.members),
            published_at = encode_text(&episode.published_at),
            duration = encode_text(&episode.duration_as_string),
            button = play_button(episode, index + offset),
        ));
    }

    html.push_str("</tbody>\n</table>\n</section>\n");
    html
}

fn play_button(episode: &Episode, queue_index: usize) -> String {
    format!(
        r#"<button type="button" class="play" data-queue-index="{queue_index}" data-episode-id="{id}"><img src="/play-green.svg" alt="Tocar episódio"></button>"#,
        id = encode_double_quoted_attribute(&episode.id),
    )
}

fn queue_script(page: &HomePage) -> Result<String, RenderError> {
    let json = serde_json::to_string(&page.queue_entries())?;

    Ok(format!(
        "<script type=\"application/json\" id=\"player-queue\">{}</script>\n",
        json.replace("</", "<\\/")
    ))
}
