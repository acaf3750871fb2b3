/// A news category with its Korean display label and Yonhap feed URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topic {
    pub id: &'static str,
    pub label: &'static str,
    pub feed_url: &'static str,
}

impl Topic {
    const fn new(id: &'static str, label: &'static str, feed_url: &'static str) -> Self {
        Self {
            id,
            label,
            feed_url,
        }
    }

    /// File name of the rendered page, also used as the navigation href
    pub fn page_filename(&self) -> String {
        format!("latest_{}.html", self.id)
    }
}

/// All topics in navigation order
pub const TOPICS: &[Topic] = &[
    Topic::new("latest", "최신기사", "https://www.yna.co.kr/rss/news.xml"),
    Topic::new("politics", "정치", "https://www.yna.co.kr/rss/politics.xml"),
    Topic::new("northkorea", "북한", "https://www.yna.co.kr/rss/northkorea.xml"),
    Topic::new("economy", "경제", "https://www.yna.co.kr/rss/economy.xml"),
    Topic::new("market", "마켓", "https://www.yna.co.kr/rss/market.xml"),
    Topic::new("industry", "산업", "https://www.yna.co.kr/rss/industry.xml"),
    Topic::new("society", "사회", "https://www.yna.co.kr/rss/society.xml"),
    Topic::new("local", "전국", "https://www.yna.co.kr/rss/local.xml"),
    Topic::new(
        "international",
        "세계",
        "https://www.yna.co.kr/rss/international.xml",
    ),
    Topic::new("culture", "문화", "https://www.yna.co.kr/rss/culture.xml"),
    Topic::new("health", "건강", "https://www.yna.co.kr/rss/health.xml"),
    Topic::new(
        "entertainment",
        "연예",
        "https://www.yna.co.kr/rss/entertainment.xml",
    ),
    Topic::new("sports", "스포츠", "https://www.yna.co.kr/rss/sports.xml"),
    Topic::new("people", "사람들", "https://www.yna.co.kr/rss/people.xml"),
    Topic::new("opinion", "오피니언", "https://www.yna.co.kr/rss/opinion.xml"),
];

/// Look up a topic by its identifier
pub fn find(id: &str) -> Option<&'static Topic> {
    TOPICS.iter().find(|t| t.id == id)
}
