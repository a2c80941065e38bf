//! Port definitions (traits) for external services
//!
//! These traits define the boundaries between the domain and external systems.
//! Adapters implement these traits to connect to real infrastructure.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::model::{ArticleTweet, HookCategory, ProcessRequest, ScheduleReceipt};

/// Error type shared by all external service calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Service unreachable, or a non-2xx response without an error payload
    #[error("Transport error: {0}")]
    Transport(String),
    /// Error message reported by the service itself
    #[error("{0}")]
    Service(String),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),
}

/// Port for turning an article URL into a tweet
#[async_trait]
pub trait ArticleService: Send + Sync {
    async fn article_to_tweet(&self, url: &str) -> Result<ArticleTweet, ServiceError>;
}

/// Port for turning a social-media post URL into a tweet
#[async_trait]
pub trait SocialMediaService: Send + Sync {
    async fn post_to_tweet(&self, url: &str) -> Result<String, ServiceError>;
}

/// Port for the image/text processing service
#[async_trait]
pub trait TweetProcessor: Send + Sync {
    /// Process drafts and/or images, returning the processed tweet text
    async fn process(&self, request: &ProcessRequest) -> Result<String, ServiceError>;
}

/// Port for the scheduling back end
#[async_trait]
pub trait Scheduler: Send + Sync {
    async fn schedule(&self, tweets: &str) -> Result<ScheduleReceipt, ServiceError>;
}

/// Port for fetching hook categories from a remote source
#[async_trait]
pub trait HookSource: Send + Sync {
    /// Fetch categories in declared order
    async fn fetch(&self) -> Result<Vec<HookCategory>, ServiceError>;
}

/// Error type for clipboard operations
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Port for writing text to the system clipboard
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}
