use std::time::{Duration, Instant};

use url::Url;

use crate::domain::ArticleRecord;

/// How long the closing transition plays before the overlay is removed.
pub const CLOSE_TRANSITION: Duration = Duration::from_millis(200);
/// At most this many of the author's articles are listed.
pub const MAX_AUTHOR_ARTICLES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalPhase {
    Open,
    Closing { until: Instant },
}

/// The singleton author overlay. A new `show` replaces the previous
/// instance wholesale rather than stacking.
#[derive(Debug, Clone)]
pub struct AuthorModal {
    pub author: String,
    pub avatar: String,
    /// Origin of the clicked article's link, serving as the author's home.
    pub origin: String,
    /// Up to five of the author's articles, in repository order.
    pub articles: Vec<ArticleRecord>,
    pub phase: ModalPhase,
}

impl AuthorModal {
    pub fn show(
        author: &str,
        avatar: &str,
        link: &str,
        all: &[ArticleRecord],
        fallback_avatar: &str,
    ) -> Self {
        let articles = all
            .iter()
            .filter(|a| a.author == author)
            .take(MAX_AUTHOR_ARTICLES)
            .cloned()
            .collect();

        let origin = Url::parse(link)
            .ok()
            .map(|u| u.origin().ascii_serialization())
            .unwrap_or_else(|| link.to_string());

        // The overlay resolves its own avatar; same one-shot fallback rule.
        let avatar = if Url::parse(avatar).is_ok() {
            avatar.to_string()
        } else {
            fallback_avatar.to_string()
        };

        Self {
            author: author.to_string(),
            avatar,
            origin,
            articles,
            phase: ModalPhase::Open,
        }
    }

    /// Start the closing transition; repeated requests keep the first
    /// deadline.
    pub fn begin_close(&mut self) {
        if self.phase == ModalPhase::Open {
            self.phase = ModalPhase::Closing {
                until: Instant::now() + CLOSE_TRANSITION,
            };
        }
    }

    pub fn closed(&self, now: Instant) -> bool {
        matches!(self.phase, ModalPhase::Closing { until } if now >= until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "https://cdn.example.com/favicon.ico";

    fn article(author: &str, n: usize) -> ArticleRecord {
        ArticleRecord {
            title: format!("{} post {}", author, n),
            link: format!("https://{}.example.com/{}", author, n),
            author: author.to_string(),
            avatar: format!("https://{}.example.com/a.png", author),
            created: "2024-06-01".to_string(),
        }
    }

    #[test]
    fn test_show_lists_at_most_five_in_order() {
        let mut all = Vec::new();
        for n in 0..4 {
            all.push(article("alice", n));
            all.push(article("bob", n));
        }
        all.push(article("alice", 4));
        all.push(article("alice", 5));

        let modal = AuthorModal::show(
            "alice",
            "https://alice.example.com/a.png",
            "https://alice.example.com/0",
            &all,
            FALLBACK,
        );

        assert_eq!(modal.articles.len(), MAX_AUTHOR_ARTICLES);
        let titles: Vec<&str> = modal.articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "alice post 0",
                "alice post 1",
                "alice post 2",
                "alice post 3",
                "alice post 4"
            ]
        );
    }

    #[test]
    fn test_origin_derived_from_link() {
        let modal = AuthorModal::show(
            "alice",
            "https://alice.example.com/a.png",
            "https://alice.example.com/posts/2024/hello",
            &[],
            FALLBACK,
        );
        assert_eq!(modal.origin, "https://alice.example.com");
    }

    #[test]
    fn test_unusable_avatar_falls_back() {
        let modal = AuthorModal::show("alice", "not a url", "https://a.example.com/", &[], FALLBACK);
        assert_eq!(modal.avatar, FALLBACK);
    }

    #[test]
    fn test_close_transition() {
        let mut modal = AuthorModal::show("alice", "https://a.example.com/a.png", "https://a.example.com/", &[], FALLBACK);
        assert!(!modal.closed(Instant::now()));

        modal.begin_close();
        assert!(!modal.closed(Instant::now()));
        assert!(modal.closed(Instant::now() + CLOSE_TRANSITION + Duration::from_millis(50)));
    }

    #[test]
    fn test_begin_close_keeps_first_deadline() {
        let mut modal = AuthorModal::show("alice", "https://a.example.com/a.png", "https://a.example.com/", &[], FALLBACK);
        modal.begin_close();
        let first = modal.phase.clone();
        modal.begin_close();
        assert_eq!(modal.phase, first);
    }
}
