//! Article-to-tweet service adapter

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tweet_scheduler_domain::{ArticleService, ArticleTweet, ServiceError};

use super::ServiceClient;

/// Calls `POST {endpoint}` with `{ "url": ... }`
pub struct HttpArticleService {
    client: ServiceClient,
    endpoint: String,
}

impl HttpArticleService {
    pub fn new(endpoint: String, timeout: Duration) -> Self {
        Self {
            client: ServiceClient::new("Article service", timeout),
            endpoint,
        }
    }
}

#[derive(Serialize)]
struct ArticleRequest<'a> {
    url: &'a str,
}

#[async_trait]
impl ArticleService for HttpArticleService {
    async fn article_to_tweet(&self, url: &str) -> Result<ArticleTweet, ServiceError> {
        let request = self
            .client
            .client()
            .post(&self.endpoint)
            .json(&ArticleRequest { url });

        self.client.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_article_to_tweet() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/article-to-tweet"))
            .and(body_json(serde_json::json!({"url": "https://news.example.com/a"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "tweet": "Big news today",
                "articleContent": "Full article body"
            })))
            .mount(&mock_server)
            .await;

        let service = HttpArticleService::new(
            format!("{}/api/article-to-tweet", mock_server.uri()),
            Duration::from_secs(5),
        );

        let result = service
            .article_to_tweet("https://news.example.com/a")
            .await
            .unwrap();

        assert_eq!(result.tweet, "Big news today");
        assert_eq!(result.article_content.as_deref(), Some("Full article body"));
    }

    #[tokio::test]
    async fn test_article_without_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"tweet": "Short"})),
            )
            .mount(&mock_server)
            .await;

        let service = HttpArticleService::new(mock_server.uri(), Duration::from_secs(5));
        let result = service.article_to_tweet("https://a.example").await.unwrap();

        assert_eq!(result.article_content, None);
    }

    #[tokio::test]
    async fn test_article_error_payload() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_json(serde_json::json!({"error": "Could not extract article"})),
            )
            .mount(&mock_server)
            .await;

        let service = HttpArticleService::new(mock_server.uri(), Duration::from_secs(5));
        let error = service.article_to_tweet("https://a.example").await.unwrap_err();

        assert_eq!(error.to_string(), "Could not extract article");
    }
}
