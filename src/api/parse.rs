// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::Deserialize;

use crate::episode::{Episode, duration_to_time_string, format_long_date_pt_br, parse_published_at};
use crate::error::FetchError;

/// Number of episodes highlighted at the top of the home page
pub const DEFAULT_LATEST_COUNT: usize = 2;

/// Episode record as served by the API
#[derive(Debug, Clone, Deserialize)]
pub struct RawEpisode {
    pub id: RawId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub members: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub description: String,
    pub published_at: String,
    pub file: RawFile,
}

/// Audio file attached to a raw episode
#[derive(Debug, Clone, Deserialize)]
pub struct RawFile {
    pub url: String,
    #[serde(rename = "type", default)]
    pub mime_type: Option<String>,
    pub duration: u64,
}

/// json-server hands out numeric ids for generated records
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(u64),
}

impl std::fmt::Display for RawId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawId::Text(s) => f.write_str(s),
            RawId::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Episodes split into the highlighted latest entries and the archive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodePartition {
    pub latest: Vec<Episode>,
    pub all: Vec<Episode>,
}

impl EpisodePartition {
    /// Total number of episodes across both lists
    pub fn len(&self) -> usize {
        self.latest.len() + self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty() && self.all.is_empty()
    }
}

/// Map a raw API record into a display-ready episode
pub fn map_episode(raw: RawEpisode) -> Result<Episode, FetchError> {
    let id = raw.id.to_string();

    let published_on =
        parse_published_at(&raw.published_at).ok_or_else(|| FetchError::InvalidDate {
            id: id.clone(),
            date_str: raw.published_at.clone(),
        })?;

    Ok(Episode {
        id,
        title: raw.title,
        members: raw.members,
        thumbnail: raw.thumbnail,
        description: raw.description,
        duration: raw.file.duration,
        duration_as_string: duration_to_time_string(raw.file.duration),
        url: raw.file.url,
        mime_type: raw.file.mime_type.filter(|s| !s.is_empty()),
        published_at: format_long_date_pt_br(published_on),
        published_on,
    })
}

/// Parse the JSON array returned by the episodes endpoint
pub fn parse_episodes(json_bytes: &[u8]) -> Result<Vec<Episode>, FetchError> {
    let raw: Vec<RawEpisode> = serde_json::from_slice(json_bytes)?;
    raw.into_iter().map(map_episode).collect()
}

/// Split episodes into the first `latest_count` and the remainder, keeping order
pub fn partition_episodes(mut episodes: Vec<Episode>, latest_count: usize) -> EpisodePartition {
    let split_at = latest_count.min(episodes.len());
    let all = episodes.split_off(split_at);

    EpisodePartition {
        latest: episodes,
        all,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_EPISODES: &str = r#"[
      {
        "id": "a-importancia-da-contribuicao-em-open-source",
        "title": "Faladev #30 | A importância da contribuição em Open Source",
        "members": "Diego Fernandes, João Pedro, Diego Haz e Bruno Lemos",
        "published_at": "2021-01-22 19:55:18",
        "thumbnail": "https://example.com/opensource.jpg",
        "description": "<p>Neste episódio do Faladev, Diego Fernandes se reúne.</p>",
        "file": {
          "url": "https://example.com/opensource.m4a",
          "type": "audio/x-m4a",
          "duration": 3981
        }
      },
      {
        "id": 7,
        "title": "Faladev #29",
        "published_at": "2021-01-15T10:00:00Z",
        "file": { "url": "https://example.com/29.mp3", "duration": 61 }
      }
    ]"#;

    fn make_episodes(count: usize) -> Vec<Episode> {
        (0..count)
            .map(|i| {
                map_episode(RawEpisode {
                    id: RawId::Text(format!("ep-{i}")),
                    title: format!("Episode {i}"),
                    members: String::new(),
                    thumbnail: String::new(),
                    description: String::new(),
                    published_at: "2021-01-01".to_string(),
                    file: RawFile {
                        url: format!("https://example.com/{i}.mp3"),
                        mime_type: None,
                        duration: 60,
                    },
                })
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn map_episode_formats_duration_and_date() {
        let raw: RawEpisode = serde_json::from_str(
            r#"{"id":"1","title":"T","file":{"duration":3661,"url":"u"},"published_at":"2021-01-01"}"#,
        )
        .unwrap();

        let episode = map_episode(raw).unwrap();

        assert_eq!(episode.id, "1");
        assert_eq!(episode.duration, 3661);
        assert_eq!(episode.duration_as_string, "01:01:01");
        assert_eq!(episode.url, "u");
        assert_eq!(episode.published_at, "1 de janeiro de 2021");
    }

    #[test]
    fn parse_episodes_reads_api_payload() {
        let episodes = parse_episodes(SAMPLE_EPISODES.as_bytes()).unwrap();

        assert_eq!(episodes.len(), 2);

        let first = &episodes[0];
        assert_eq!(first.id, "a-importancia-da-contribuicao-em-open-source");
        assert_eq!(first.members, "Diego Fernandes, João Pedro, Diego Haz e Bruno Lemos");
        assert_eq!(first.duration_as_string, "01:06:21");
        assert_eq!(first.mime_type, Some("audio/x-m4a".to_string()));
        assert_eq!(first.published_at, "22 de janeiro de 2021");
    }

    #[test]
    fn parse_episodes_accepts_numeric_ids_and_missing_fields() {
        let episodes = parse_episodes(SAMPLE_EPISODES.as_bytes()).unwrap();

        let second = &episodes[1];
        assert_eq!(second.id, "7");
        assert!(second.members.is_empty());
        assert!(second.thumbnail.is_empty());
        assert!(second.mime_type.is_none());
        assert_eq!(second.duration_as_string, "00:01:01");
    }

    #[test]
    fn parse_episodes_rejects_invalid_dates() {
        let payload = r#"[{"id":"x","published_at":"soon","file":{"url":"u","duration":1}}]"#;

        match parse_episodes(payload.as_bytes()).unwrap_err() {
            FetchError::InvalidDate { id, date_str } => {
                assert_eq!(id, "x");
                assert_eq!(date_str, "soon");
            }
            other => panic!("Expected InvalidDate error, got {other:?}"),
        }
    }

    #[test]
    fn parse_episodes_rejects_malformed_json() {
        let result = parse_episodes(b"{not json");
        assert!(matches!(result, Err(FetchError::JsonParseFailed(_))));
    }

    #[test]
    fn partition_splits_latest_from_archive() {
        let partition = partition_episodes(make_episodes(5), DEFAULT_LATEST_COUNT);

        assert_eq!(partition.latest.len(), 2);
        assert_eq!(partition.all.len(), 3);
        assert_eq!(partition.latest[0].id, "ep-0");
        assert_eq!(partition.latest[1].id, "ep-1");
        assert_eq!(partition.all[0].id, "ep-2");
        assert_eq!(partition.len(), 5);
    }

    #[test]
    fn partition_handles_short_lists() {
        let partition = partition_episodes(make_episodes(1), DEFAULT_LATEST_COUNT);
        assert_eq!(partition.latest.len(), 1);
        assert!(partition.all.is_empty());

        let partition = partition_episodes(Vec::new(), DEFAULT_LATEST_COUNT);
        assert!(partition.is_empty());
    }
}
