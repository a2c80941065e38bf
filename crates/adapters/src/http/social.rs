//! Social-media-to-tweet service adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tweet_scheduler_domain::{ServiceError, SocialMediaService};

use super::ServiceClient;

pub struct HttpSocialMediaService {
    client: ServiceClient,
    endpoint: String,
}

impl HttpSocialMediaService {
    pub fn new(endpoint: String, timeout: Duration) -> Self {
        Self {
            client: ServiceClient::new("Social media service", timeout),
            endpoint,
        }
    }
}

#[derive(Serialize)]
struct PostRequest<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct PostResponse {
    tweet: String,
}

#[async_trait]
impl SocialMediaService for HttpSocialMediaService {
    async fn post_to_tweet(&self, url: &str) -> Result<String, ServiceError> {
        let request = self
            .client
            .client()
            .post(&self.endpoint)
            .json(&PostRequest { url });

        let response: PostResponse = self.client.send(request).await?;
        Ok(response.tweet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_post_to_tweet() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/social-to-tweet"))
            .and(body_json(serde_json::json!({"url": "https://www.instagram.com/p/abc/"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"tweet": "Caption turned tweet"})),
            )
            .mount(&mock_server)
            .await;

        let service = HttpSocialMediaService::new(
            format!("{}/api/social-to-tweet", mock_server.uri()),
            Duration::from_secs(5),
        );

        let tweet = service
            .post_to_tweet("https://www.instagram.com/p/abc/")
            .await
            .unwrap();

        assert_eq!(tweet, "Caption turned tweet");
    }

    #[tokio::test]
    async fn test_missing_tweet_field_is_invalid_format() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"text": "wrong"})),
            )
            .mount(&mock_server)
            .await;

        let service = HttpSocialMediaService::new(mock_server.uri(), Duration::from_secs(5));
        let result = service.post_to_tweet("https://youtu.be/x").await;

        assert!(matches!(result, Err(ServiceError::InvalidFormat(_))));
    }
}
