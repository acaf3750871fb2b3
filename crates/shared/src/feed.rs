use anyhow::{Context, Result};
use async_trait::async_trait;
use feed_rs::parser;
use reqwest::Client;
use url::Url;

pub const MAX_HEADLINES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    pub title: String,
    pub link: String,
}

impl Headline {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}

/// Anything that can produce the current headlines for a feed URL.
///
/// Implementations never fail: an unreachable or malformed feed is reported
/// as an empty list.
#[async_trait]
pub trait HeadlineSource: Send + Sync {
    async fn fetch_headlines(&self, feed_url: &str) -> Vec<Headline>;
}

pub struct FeedFetcher {
    client: Client,
}

impl FeedFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (compatible; NewsDigest/1.0)")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    async fn try_fetch(&self, feed_url: &str) -> Result<Vec<Headline>> {
        let response = self
            .client
            .get(feed_url)
            .send()
            .await
            .context("Failed to send HTTP request")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("HTTP error: {}", status);
        }

        let bytes = response
            .bytes()
            .await
            .context("Failed to read response body")?;

        parse_headlines(&bytes, MAX_HEADLINES)
    }
}

#[async_trait]
impl HeadlineSource for FeedFetcher {
    async fn fetch_headlines(&self, feed_url: &str) -> Vec<Headline> {
        match self.try_fetch(feed_url).await {
            Ok(headlines) => headlines,
            Err(e) => {
                tracing::warn!(url = feed_url, error = %format!("{:#}", e), "feed fetch failed");
                Vec::new()
            }
        }
    }
}

/// Parse RSS/Atom bytes into at most `limit` headlines, in feed order.
///
/// Entries without a title or without an absolute http(s) link are dropped.
pub fn parse_headlines(bytes: &[u8], limit: usize) -> Result<Vec<Headline>> {
    let feed = parser::parse(bytes).context("Failed to parse feed")?;

    let headlines = feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let title = entry.title.map(|t| t.content.trim().to_string())?;
            if title.is_empty() {
                return None;
            }
            let link = entry.links.into_iter().next()?.href;
            let link = link.trim();
            if !is_web_link(link) {
                return None;
            }
            Some(Headline::new(title, link))
        })
        .take(limit)
        .collect();

    Ok(headlines)
}

fn is_web_link(link: &str) -> bool {
    Url::parse(link)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>연합뉴스 스포츠</title>
    <link>https://www.yna.co.kr/sports</link>
    <description>Yonhap sports</description>
    <item>
      <title>손흥민, 시즌 10호 골</title>
      <link>https://www.yna.co.kr/view/AKR20261016000100007</link>
      <pubDate>Fri, 16 Oct 2026 09:00:00 +0900</pubDate>
    </item>
    <item>
      <title>프로야구 포스트시즌 일정 발표</title>
      <link>https://www.yna.co.kr/view/AKR20261016000200007</link>
      <pubDate>Fri, 16 Oct 2026 08:30:00 +0900</pubDate>
    </item>
  </channel>
</rss>"#;

    fn rss_with_items(count: usize) -> Vec<u8> {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>t</title><link>https://www.yna.co.kr/</link><description>d</description>"#,
        );
        for i in 0..count {
            xml.push_str(&format!(
                "<item><title>Headline {i}</title><link>https://www.yna.co.kr/view/{i}</link></item>"
            ));
        }
        xml.push_str("</channel></rss>");
        xml.into_bytes()
    }

    #[test]
    fn test_parse_keeps_feed_order() {
        let headlines = parse_headlines(SAMPLE_RSS.as_bytes(), MAX_HEADLINES).unwrap();

        assert_eq!(headlines.len(), 2);
        assert_eq!(headlines[0].title, "손흥민, 시즌 10호 골");
        assert_eq!(
            headlines[0].link,
            "https://www.yna.co.kr/view/AKR20261016000100007"
        );
        assert_eq!(headlines[1].title, "프로야구 포스트시즌 일정 발표");
    }

    #[test]
    fn test_parse_truncates_to_limit() {
        let headlines = parse_headlines(&rss_with_items(25), MAX_HEADLINES).unwrap();

        assert_eq!(headlines.len(), 10);
        assert_eq!(headlines[0].title, "Headline 0");
        assert_eq!(headlines[9].title, "Headline 9");
    }

    #[test]
    fn test_parse_drops_entries_without_title_or_link() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>t</title><link>https://www.yna.co.kr/</link><description>d</description>
  <item><title>   </title><link>https://www.yna.co.kr/view/1</link></item>
  <item><title>No link</title></item>
  <item><title>Bad link</title><link>javascript:alert(1)</link></item>
  <item><title>Good</title><link>https://www.yna.co.kr/view/4</link></item>
</channel></rss>"#;

        let headlines = parse_headlines(xml, MAX_HEADLINES).unwrap();

        assert_eq!(headlines, vec![Headline::new("Good", "https://www.yna.co.kr/view/4")]);
    }

    #[test]
    fn test_parse_atom_feed() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Example</title>
  <id>https://example.com/feed.atom</id>
  <updated>2026-10-16T00:00:00Z</updated>
  <entry>
    <title>Atom entry</title>
    <link href="https://example.com/posts/1"/>
    <id>https://example.com/posts/1</id>
    <updated>2026-10-16T00:00:00Z</updated>
  </entry>
</feed>"#;

        let headlines = parse_headlines(xml, MAX_HEADLINES).unwrap();
        assert_eq!(headlines.len(), 1);
        assert_eq!(headlines[0].link, "https://example.com/posts/1");
    }

    #[test]
    fn test_parse_malformed_feed_is_error() {
        assert!(parse_headlines(b"<html><body>not a feed", MAX_HEADLINES).is_err());
    }

    #[test]
    fn test_parse_truncated_or_empty_body_is_error() {
        let truncated = &SAMPLE_RSS.as_bytes()[..SAMPLE_RSS.len() / 2];
        assert!(parse_headlines(truncated, MAX_HEADLINES).is_err());
        assert!(parse_headlines(b"", MAX_HEADLINES).is_err());
    }

    #[test]
    fn test_cdata_title_is_kept_as_text() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>t</title><link>https://www.yna.co.kr/</link><description>d</description>
  <item><title><![CDATA[A &amp; <b>B</b>]]></title><link>https://www.yna.co.kr/view/1</link></item>
</channel></rss>"#;

        let headlines = parse_headlines(xml.as_bytes(), MAX_HEADLINES).unwrap();

        assert_eq!(headlines.len(), 1);
        assert!(headlines[0].title.contains("<b>B</b>"));

        let html = crate::page::PageRenderer::render(&crate::page::PageContext {
            topic: crate::catalog::find("latest").unwrap(),
            date: "2026-10-16",
            headlines: &headlines,
            summary: "",
        });
        assert!(!html.contains("<b>B</b>"));
        assert!(html.contains("&lt;b&gt;B&lt;/b&gt;"));
    }

    #[tokio::test]
    async fn test_unreachable_feed_yields_no_headlines() {
        let fetcher = FeedFetcher::new().unwrap();
        let headlines = fetcher.fetch_headlines("http://127.0.0.1:9/rss.xml").await;
        assert!(headlines.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_url_yields_no_headlines() {
        let fetcher = FeedFetcher::new().unwrap();
        assert!(fetcher.fetch_headlines("not a url").await.is_empty());
    }
}
