// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::NaiveDate;

/// A single podcast episode, ready for display and playback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub id: String,
    pub title: String,
    pub members: String,
    pub thumbnail: String,
    pub description: String,
    /// Length in seconds
    pub duration: u64,
    /// Length as "HH:MM:SS"
    pub duration_as_string: String,
    /// Source audio URL
    pub url: String,
    pub mime_type: Option<String>,
    /// Long-form pt-BR publish date, e.g. "1 de janeiro de 2021"
    pub published_at: String,
    pub published_on: NaiveDate,
}
