//! Stub services for testing and offline mode

use async_trait::async_trait;
use std::sync::Mutex;
use tweet_scheduler_domain::{
    ArticleService, ArticleTweet, Clipboard, ClipboardError, ProcessRequest, ScheduleReceipt,
    Scheduler, ServiceError, SocialMediaService, TweetProcessor, text::split_tweets,
};

/// Article service that summarizes nothing and echoes the URL
#[derive(Default)]
pub struct StubArticleService {
    error: Option<ServiceError>,
}

impl StubArticleService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error(error: ServiceError) -> Self {
        Self { error: Some(error) }
    }
}

#[async_trait]
impl ArticleService for StubArticleService {
    async fn article_to_tweet(&self, url: &str) -> Result<ArticleTweet, ServiceError> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        Ok(ArticleTweet {
            tweet: format!("Stub tweet for article {}", url),
            article_content: None,
        })
    }
}

#[derive(Default)]
pub struct StubSocialMediaService;

#[async_trait]
impl SocialMediaService for StubSocialMediaService {
    async fn post_to_tweet(&self, url: &str) -> Result<String, ServiceError> {
        Ok(format!("Stub tweet for post {}", url))
    }
}

/// Processor that tidies the drafts and adds one line per image
#[derive(Default)]
pub struct StubTweetProcessor {
    requests: Mutex<Vec<ProcessRequest>>,
}

impl StubTweetProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ProcessRequest> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl TweetProcessor for StubTweetProcessor {
    async fn process(&self, request: &ProcessRequest) -> Result<String, ServiceError> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        let mut tweets = request
            .tweets
            .as_deref()
            .map(split_tweets)
            .unwrap_or_default();
        tweets.extend(
            request
                .images
                .iter()
                .enumerate()
                .map(|(index, image)| format!("Stub tweet from {}", image.file_name(index))),
        );

        if tweets.is_empty() {
            return Err(ServiceError::Service(
                "No tweets were generated from either images or text".to_string(),
            ));
        }

        Ok(tweets.join("\n\n"))
    }
}

/// Scheduler that accepts everything and counts the tweets
#[derive(Default)]
pub struct StubScheduler {
    error: Option<ServiceError>,
    scheduled: Mutex<Vec<String>>,
}

impl StubScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error(error: ServiceError) -> Self {
        Self {
            error: Some(error),
            scheduled: Mutex::new(vec![]),
        }
    }

    /// Buffers handed to the scheduler so far
    pub fn scheduled(&self) -> Vec<String> {
        self.scheduled
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl Scheduler for StubScheduler {
    async fn schedule(&self, tweets: &str) -> Result<ScheduleReceipt, ServiceError> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }

        self.scheduled
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(tweets.to_string());

        Ok(ScheduleReceipt {
            message: "Tweets scheduled successfully".to_string(),
            output: Some(format!("Stub scheduled {} tweets", split_tweets(tweets).len())),
        })
    }
}

/// In-memory clipboard
#[derive(Default)]
pub struct StubClipboard {
    copied: Mutex<Vec<String>>,
}

impl StubClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copied(&self) -> Vec<String> {
        self.copied.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Clipboard for StubClipboard {
    async fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        self.copied
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(text.to_string());
        Ok(())
    }
}
