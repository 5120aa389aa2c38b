// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use url::Url;

use crate::episode::Episode;
use crate::error::FetchError;
use crate::http::HttpClient;

use super::parse::{EpisodePartition, parse_episodes, partition_episodes};

/// Number of episodes requested from the API per build
pub const DEFAULT_LIMIT: usize = 12;

/// Result of loading the home page data
///
/// A failed fetch still yields a (empty) partition so the page can render,
/// with the failure kept alongside for reporting.
#[derive(Debug, Default)]
pub struct HomeData {
    pub partition: EpisodePartition,
    pub error: Option<FetchError>,
}

/// Build the episodes request URL, newest first
pub fn episodes_url(base_url: &str, limit: usize) -> Result<Url, FetchError> {
    let mut url = Url::parse(base_url)?;

    // Url::join would drop the last segment of a base without a trailing slash
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    let mut url = url.join("episodes")?;
    url.query_pairs_mut()
        .append_pair("_limit", &limit.to_string())
        .append_pair("_sort", "published_at")
        .append_pair("_order", "desc");

    Ok(url)
}

/// Fetch and map the latest `limit` episodes from the API
pub async fn fetch_episodes<C: HttpClient>(
    client: &C,
    base_url: &str,
    limit: usize,
) -> Result<Vec<Episode>, FetchError> {
    let url = episodes_url(base_url, limit)?;

    let response = client
        .get(url.as_str())
        .await
        .map_err(|e| FetchError::RequestFailed {
            url: url.to_string(),
            source: e,
        })?;

    if response.is_error() {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status: response.status,
        });
    }

    parse_episodes(&response.body)
}

/// Fetch episodes and split them for the home page, never failing
pub async fn fetch_home_data<C: HttpClient>(
    client: &C,
    base_url: &str,
    limit: usize,
    latest_count: usize,
) -> HomeData {
    match fetch_episodes(client, base_url, limit).await {
        Ok(episodes) => HomeData {
            partition: partition_episodes(episodes, latest_count),
            error: None,
        },
        Err(e) => HomeData {
            partition: EpisodePartition::default(),
            error: Some(e),
        },
    }
}

/// Determine if a string looks like an HTTP(S) URL
pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::http::HttpResponse;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::Mutex;

    struct MockHttpClient {
        status: u16,
        body: String,
        requested: Mutex<Vec<String>>,
    }

    impl MockHttpClient {
        fn new(status: u16, body: &str) -> Self {
            Self {
                status,
                body: body.to_string(),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl HttpClient for MockHttpClient {
        async fn get(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
            self.requested.lock().unwrap().push(url.to_string());
            Ok(HttpResponse {
                status: self.status,
                body: Bytes::from(self.body.clone()),
            })
        }
    }

    fn episodes_json(count: usize) -> String {
        let items: Vec<String> = (0..count)
            .map(|i| {
                format!(
                    r#"{{"id":"ep-{i}","title":"Episode {i}","published_at":"2021-01-{:02}","file":{{"url":"https://example.com/{i}.mp3","duration":60}}}}"#,
                    20 - i
                )
            })
            .collect();
        format!("[{}]", items.join(","))
    }

    #[test]
    fn episodes_url_appends_query() {
        let url = episodes_url("http://localhost:3333", 12).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3333/episodes?_limit=12&_sort=published_at&_order=desc"
        );
    }

    #[test]
    fn episodes_url_keeps_base_path() {
        let url = episodes_url("https://api.example.com/v1", 5).unwrap();
        assert_eq!(url.path(), "/v1/episodes");

        let url = episodes_url("https://api.example.com/v1/", 5).unwrap();
        assert_eq!(url.path(), "/v1/episodes");
    }

    #[test]
    fn episodes_url_rejects_invalid_base() {
        assert!(matches!(
            episodes_url("not a url", 5),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn is_url_detects_http() {
        assert!(is_url("http://localhost:3333"));
        assert!(is_url("https://example.com"));
        assert!(!is_url("localhost:3333"));
    }

    #[tokio::test]
    async fn fetch_episodes_requests_sorted_list() {
        let client = MockHttpClient::new(200, &episodes_json(3));

        let episodes = fetch_episodes(&client, "http://localhost:3333", 3)
            .await
            .unwrap();

        assert_eq!(episodes.len(), 3);
        assert_eq!(episodes[0].id, "ep-0");

        let requested = client.requested.lock().unwrap();
        assert_eq!(requested.len(), 1);
        assert!(requested[0].contains("_sort=published_at"));
        assert!(requested[0].contains("_order=desc"));
    }

    #[tokio::test]
    async fn fetch_episodes_fails_on_http_error() {
        let client = MockHttpClient::new(500, "Internal Server Error");

        let result = fetch_episodes(&client, "http://localhost:3333", 3).await;

        match result.unwrap_err() {
            FetchError::HttpStatus { status, .. } => assert_eq!(status, 500),
            other => panic!("Expected HttpStatus error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn home_data_partitions_five_episodes() {
        let client = MockHttpClient::new(200, &episodes_json(5));

        let data = fetch_home_data(&client, "http://localhost:3333", 12, 2).await;

        assert!(data.error.is_none());
        assert_eq!(data.partition.latest.len(), 2);
        assert_eq!(data.partition.all.len(), 3);
        assert_eq!(data.partition.latest[0].id, "ep-0");
        assert_eq!(data.partition.latest[1].id, "ep-1");
    }

    #[tokio::test]
    async fn home_data_falls_back_to_empty_on_failure() {
        let client = MockHttpClient::new(404, "Not Found");

        let data = fetch_home_data(&client, "http://localhost:3333", 12, 2).await;

        assert!(data.partition.is_empty());
        assert!(matches!(
            data.error,
            Some(FetchError::HttpStatus { status: 404, .. })
        ));
    }
}
