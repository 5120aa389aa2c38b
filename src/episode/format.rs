// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, NaiveTime};

/// Format a duration in seconds as "HH:MM:SS"
///
/// Hours are padded to two digits but never truncated, so a 100 hour
/// duration renders as "100:00:00".
pub fn duration_to_time_string(duration: u64) -> String {
    let hours = duration / 3600;
    let minutes = (duration % 3600) / 60;
    let seconds = duration % 60;

    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Format a date the way pt-BR long dates read, e.g. "1 de janeiro de 2021"
pub fn format_long_date_pt_br(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .format_localized("%-d de %B de %Y", Locale::pt_BR)
        .to_string()
}

/// Parse the publish date sent by the episode API
///
/// Accepts plain dates, RFC 3339 timestamps and the "YYYY-MM-DD HH:MM:SS"
/// form json-server fixtures commonly use.
pub fn parse_published_at(date_str: &str) -> Option<NaiveDate> {
    let date_str = date_str.trim();

    if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.date_naive());
    }

    let formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
    formats
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(date_str, format).ok())
        .map(|dt| dt.date())
}
