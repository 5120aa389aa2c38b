// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::NaiveDate;
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::episode::format_long_date_pt_br;

/// Site-wide settings shared by every rendered page
#[derive(Debug, Clone)]
pub struct SiteInfo {
    pub title: String,
    pub tagline: String,
    /// Public URL the site is served from, used for feed links
    pub site_url: Option<String>,
    pub logo: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Podcastr".to_string(),
            tagline: "O melhor para você ouvir, sempre".to_string(),
            site_url: None,
            logo: "/logo.svg".to_string(),
        }
    }
}

/// Wrap `body` in the shared document shell and header
///
/// `root` is the relative path back to the site root ("" or "../").
pub(crate) fn document(
    site: &SiteInfo,
    page_title: &str,
    root: &str,
    today: NaiveDate,
    body: &str,
) -> String {
    let title = if page_title.is_empty() {
        site.title.clone()
    } else {
        format!("{page_title} | {}", site.title)
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="alternate" type="application/rss+xml" title="{feed_title}" href="{root}feed.xml">
</head>
<body>
<div class="wrapper">
<main>
{header}
{body}
</main>
</div>
</body>
</html>
"#,
        title = encode_text(&title),
        feed_title = encode_double_quoted_attribute(&site.title),
        root = encode_double_quoted_attribute(root),
        header = header(site, root, today),
        body = body,
    )
}

fn header(site: &SiteInfo, root: &str, today: NaiveDate) -> String {
    format!(
        r#"<header class="header-container">
<a href="{root}index.html"><img src="{logo}" alt="{alt}"></a>
<p>{tagline}</p>
<span>{date}</span>
</header>"#,
        root = encode_double_quoted_attribute(root),
        logo = encode_double_quoted_attribute(&site.logo),
        alt = encode_double_quoted_attribute(&site.title),
        tagline = encode_text(&site.tagline),
        date = encode_text(&format_long_date_pt_br(today)),
    )
}
