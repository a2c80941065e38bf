//! Image/text processing service adapter (multipart upload)

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;
use tweet_scheduler_domain::{ProcessRequest, ServiceError, TweetProcessor};

use super::ServiceClient;

pub struct HttpTweetProcessor {
    client: ServiceClient,
    endpoint: String,
}

impl HttpTweetProcessor {
    pub fn new(endpoint: String, timeout: Duration) -> Self {
        Self {
            client: ServiceClient::new("Processing service", timeout),
            endpoint,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProcessResponse {
    processed_tweets: String,
}

/// Multipart body with each field present only when it has content
fn build_form(request: &ProcessRequest) -> Result<Form, ServiceError> {
    let mut form = Form::new();

    if let Some(tweets) = &request.tweets {
        form = form.text("tweets", tweets.clone());
    }

    for (index, image) in request.images.iter().enumerate() {
        let part = Part::bytes(image.data.clone())
            .file_name(image.file_name(index))
            .mime_str(&image.mime_type)
            .map_err(|e| {
                ServiceError::Transport(format!("Invalid image type {}: {}", image.mime_type, e))
            })?;
        form = form.part("images", part);
    }

    if let Some(instructions) = &request.instructions {
        form = form.text("imageInstructions", instructions.clone());
    }

    Ok(form)
}

#[async_trait]
impl TweetProcessor for HttpTweetProcessor {
    async fn process(&self, request: &ProcessRequest) -> Result<String, ServiceError> {
        let form = build_form(request)?;
        let http_request = self.client.client().post(&self.endpoint).multipart(form);

        let response: ProcessResponse = self.client.send(http_request).await?;
        Ok(response.processed_tweets)
    }
}
