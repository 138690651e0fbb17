use reqwest::blocking::Client;

use crate::domain::FeedDocument;
use crate::errors::CircliteResult;

/// Remote feed endpoint. One request shape: the full article+stats document.
#[cfg_attr(test, mockall::automock)]
pub trait FeedApi: Send + Sync {
    fn fetch_all(&self) -> CircliteResult<FeedDocument>;
}

pub struct HttpFeedApi {
    client: Client,
    base_url: String,
}

impl HttpFeedApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.to_string(),
        }
    }

    /// The document lives at `<base>all.json`; the base is used verbatim,
    /// so it normally carries a trailing slash.
    fn endpoint(&self) -> String {
        format!("{}all.json", self.base_url)
    }
}

impl FeedApi for HttpFeedApi {
    fn fetch_all(&self) -> CircliteResult<FeedDocument> {
        let response = self.client.get(self.endpoint()).send()?;
        let body = response.text()?;
        let document = serde_json::from_str(&body)?;
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_appends_document_name() {
        let api = HttpFeedApi::new("https://fc.example.com/");
        assert_eq!(api.endpoint(), "https://fc.example.com/all.json");
    }

    #[test]
    fn test_endpoint_base_used_verbatim() {
        // No slash is inserted; a base without one concatenates directly.
        let api = HttpFeedApi::new("https://fc.example.com");
        assert_eq!(api.endpoint(), "https://fc.example.comall.json");
    }
}
