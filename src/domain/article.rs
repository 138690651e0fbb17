use serde::{Deserialize, Serialize};

/// One friend-blog post summary as delivered by the feed endpoint.
/// Immutable once fetched; the whole set is replaced on every load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub link: String,
    pub author: String,
    pub avatar: String,
    #[serde(default)]
    pub created: String,
}

impl ArticleRecord {
    /// Date portion of `created` (first 10 characters, `YYYY-MM-DD`).
    pub fn created_date(&self) -> &str {
        self.created.get(..10).unwrap_or(&self.created)
    }
}

/// Aggregate numbers shown in the stats panel. Display-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalSummary {
    pub friends_num: i64,
    pub active_num: i64,
    pub article_num: i64,
    #[serde(default)]
    pub last_updated_time: String,
}

/// Wire shape of the `all.json` document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedDocument {
    pub article_data: Vec<ArticleRecord>,
    #[serde(default)]
    pub statistical_data: Option<StatisticalSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(created: &str) -> ArticleRecord {
        ArticleRecord {
            title: "Hello".to_string(),
            link: "https://example.com/post".to_string(),
            author: "Alice".to_string(),
            avatar: "https://example.com/a.png".to_string(),
            created: created.to_string(),
        }
    }

    #[test]
    fn test_created_date_truncates_to_day() {
        assert_eq!(record("2024-05-01T10:00:00").created_date(), "2024-05-01");
    }

    #[test]
    fn test_created_date_short_value_passed_through() {
        assert_eq!(record("2024").created_date(), "2024");
        assert_eq!(record("").created_date(), "");
    }

    #[test]
    fn test_document_requires_article_data() {
        let err = serde_json::from_str::<FeedDocument>(r#"{"statistical_data":null}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_document_stats_optional() {
        let doc: FeedDocument = serde_json::from_str(r#"{"article_data":[]}"#).unwrap();
        assert!(doc.statistical_data.is_none());
        assert!(doc.article_data.is_empty());
    }
}
