// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::NaiveTime;
use rss::extension::itunes::{ITunesChannelExtensionBuilder, ITunesItemExtensionBuilder};
use rss::{ChannelBuilder, EnclosureBuilder, GuidBuilder, Item, ItemBuilder};

use crate::episode::Episode;
use crate::error::RenderError;

use super::home::HomePage;
use super::layout::SiteInfo;

/// Render an RSS 2.0 feed listing the page's queue in order
///
/// Item links point at the same page paths the home page uses.
pub fn render_feed(site: &SiteInfo, page: &HomePage) -> Result<String, RenderError> {
    let site_url = site
        .site_url
        .as_deref()
        .map(|url| url.trim_end_matches('/').to_string());

    let items: Vec<Item> = page
        .pages()
        .map(|(episode, path)| feed_item(episode, path, site_url.as_deref()))
        .collect();

    let channel = ChannelBuilder::default()
        .title(site.title.clone())
        .link(site_url.clone().unwrap_or_default())
        .description(site.tagline.clone())
        .language(Some("pt-BR".to_string()))
        .itunes_ext(Some(
            ITunesChannelExtensionBuilder::default()
                .author(Some(site.title.clone()))
                .build(),
        ))
        .items(items)
        .build();

    let bytes = channel.pretty_write_to(Vec::new(), b' ', 2)?;
    Ok(String::from_utf8(bytes)?)
}

fn feed_item(episode: &Episode, path: &str, site_url: Option<&str>) -> Item {
    let pub_date = episode
        .published_on
        .and_time(NaiveTime::MIN)
        .and_utc()
        .to_rfc2822();

    let link = site_url.map(|url| format!("{url}/{path}"));

    let enclosure = EnclosureBuilder::default()
        .url(episode.url.clone())
        .length("0".to_string())
        .mime_type(
            episode
                .mime_type
                .clone()
                .unwrap_or_else(|| "audio/mpeg".to_string()),
        )
        .build();

    let itunes = ITunesItemExtensionBuilder::default()
        .author(Some(episode.members.clone()).filter(|s| !s.is_empty()))
        .image(Some(episode.thumbnail.clone()).filter(|s| !s.is_empty()))
        .duration(Some(episode.duration_as_string.clone()))
        .build();

    ItemBuilder::default()
        .title(Some(episode.title.clone()))
        .link(link)
        .description(Some(episode.description.clone()).filter(|s| !s.is_empty()))
        .author(Some(episode.members.clone()).filter(|s| !s.is_empty()))
        .guid(Some(
            GuidBuilder::default()
                .value(episode.id.clone())
                .permalink(false)
                .build(),
        ))
        .pub_date(Some(pub_date))
        .enclosure(Some(enclosure))
        .itunes_ext(Some(itunes))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    use crate::api::partition_episodes;

    fn make_episode(id: &str, day: u32) -> Episode {
        Episode {
            id: id.to_string(),
            title: format!("Episode {id}"),
            members: "Diego Fernandes".to_string(),
            thumbnail: String::new(),
            description: "<p>About things</p>".to_string(),
            duration: 3661,
            duration_as_string: "01:01:01".to_string(),
            url: format!("https://example.com/{id}.mp3"),
            mime_type: None,
            published_at: String::new(),
            published_on: NaiveDate::from_ymd_opt(2021, 1, day).unwrap(),
        }
    }

    #[test]
    fn feed_lists_episodes_as_items() {
        let site = SiteInfo {
            site_url: Some("https://podcastr.example.com/".to_string()),
            ..Default::default()
        };
        let page = HomePage::new(partition_episodes(
            vec![make_episode("2", 2), make_episode("1", 1)],
            1,
        ));

        let xml = render_feed(&site, &page).unwrap();
        let channel = rss::Channel::read_from(xml.as_bytes()).unwrap();

        assert_eq!(channel.title(), "Podcastr");
        assert_eq!(channel.link(), "https://podcastr.example.com");
        assert_eq!(channel.items().len(), 2);

        let first = &channel.items()[0];
        assert_eq!(first.title(), Some("Episode 2"));
        assert_eq!(first.guid().map(|g| g.value()), Some("2"));
        assert_eq!(
            first.link(),
            Some("https://podcastr.example.com/episodes/2.html")
        );
        let pub_date = chrono::DateTime::parse_from_rfc2822(first.pub_date().unwrap()).unwrap();
        assert_eq!(pub_date.date_naive(), NaiveDate::from_ymd_opt(2021, 1, 2).unwrap());

        let enclosure = first.enclosure().unwrap();
        assert_eq!(enclosure.url(), "https://example.com/2.mp3");
        assert_eq!(enclosure.mime_type(), "audio/mpeg");
    }

    #[test]
    fn feed_links_follow_unique_page_paths() {
        let site = SiteInfo {
            site_url: Some("https://podcastr.example.com".to_string()),
            ..Default::default()
        };
        let page = HomePage::new(partition_episodes(
            vec![make_episode("a/b", 2), make_episode("a-b", 1)],
            2,
        ));

        let xml = render_feed(&site, &page).unwrap();
        let channel = rss::Channel::read_from(xml.as_bytes()).unwrap();

        let links: Vec<_> = channel.items().iter().map(|item| item.link()).collect();
        assert_eq!(
            links,
            vec![
                Some("https://podcastr.example.com/episodes/a-b.html"),
                Some("https://podcastr.example.com/episodes/a-b-2.html"),
            ]
        );
    }

    #[test]
    fn feed_without_site_url_omits_links() {
        let page = HomePage::new(partition_episodes(vec![make_episode("1", 1)], 2));
        let xml = render_feed(&SiteInfo::default(), &page).unwrap();
        let channel = rss::Channel::read_from(xml.as_bytes()).unwrap();

        assert!(channel.items()[0].link().is_none());
    }

    #[test]
    fn feed_with_no_episodes_is_valid() {
        let xml = render_feed(&SiteInfo::default(), &HomePage::default()).unwrap();
        let channel = rss::Channel::read_from(xml.as_bytes()).unwrap();

        assert!(channel.items().is_empty());
    }
}
