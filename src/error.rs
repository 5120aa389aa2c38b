// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when fetching or parsing the episode list
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to fetch episodes from {url}: {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to parse episode JSON: {0}")]
    JsonParseFailed(#[from] serde_json::Error),

    #[error("Episode '{id}' has an invalid publish date '{date_str}'")]
    InvalidDate { id: String, date_str: String },
}

/// Errors raised by the player queue
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    #[error("Episode index {index} is out of range for a queue of {len}")]
    OutOfRange { index: usize, len: usize },
}

/// Errors that can occur while rendering pages
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to write RSS feed: {0}")]
    FeedWriteFailed(#[from] rss::Error),

    #[error("RSS feed is not valid UTF-8: {0}")]
    FeedNotUtf8(#[from] std::string::FromUtf8Error),

    #[error("Failed to serialize player queue: {0}")]
    QueueSerializeFailed(#[from] serde_json::Error),
}

/// Errors that can occur when reading or writing the build manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write manifest {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest JSON in {path}: {source}")]
    JsonParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize manifest: {0}")]
    JsonSerializeFailed(#[from] serde_json::Error),
}

/// Top-level errors for site builds
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Failed to create directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write page {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
