//! Content normalizer - turns one input modality into a tweet buffer merge
//!
//! The normalizer never touches form state. It validates its input, issues a
//! single external call and returns a [`Merge`] for the controller to apply.

use std::sync::Arc;

use crate::{
    model::{Merge, PastedImage, ProcessRequest, SocialPlatform},
    ports::{ArticleService, ServiceError, SocialMediaService, TweetProcessor},
    usecases::controller::ComposeError,
};

/// Normalizer over the article, social-media and image processing services
pub struct ContentNormalizer<A, S, P>
where
    A: ArticleService + ?Sized,
    S: SocialMediaService + ?Sized,
    P: TweetProcessor + ?Sized,
{
    article: Arc<A>,
    social: Arc<S>,
    processor: Arc<P>,
}

impl<A, S, P> ContentNormalizer<A, S, P>
where
    A: ArticleService + ?Sized,
    S: SocialMediaService + ?Sized,
    P: TweetProcessor + ?Sized,
{
    pub fn new(article: Arc<A>, social: Arc<S>, processor: Arc<P>) -> Self {
        Self {
            article,
            social,
            processor,
        }
    }

    /// Article URL to an appended tweet block
    pub async fn article(&self, url: &str) -> Result<Merge, ComposeError> {
        let url = require(url, "Please enter an article URL")?;

        tracing::info!(url = %url, "Processing article");
        let result = self.article.article_to_tweet(url).await?;

        if let Some(content) = &result.article_content {
            tracing::debug!(chars = content.chars().count(), "Article content extracted");
        }

        Ok(Merge::Append(non_blank(result.tweet, "article service")?))
    }

    /// Social-media post URL to an appended tweet block
    pub async fn social_media(&self, url: &str) -> Result<Merge, ComposeError> {
        let url = require(url, "Please enter a social media URL")?;

        let platform = SocialPlatform::detect(url);
        tracing::info!(
            url = %url,
            platform = platform.map(SocialPlatform::as_str).unwrap_or("unknown"),
            "Processing social media post"
        );
        let tweet = self.social.post_to_tweet(url).await?;

        Ok(Merge::Append(non_blank(tweet, "social media service")?))
    }

    /// Pasted images to a replacement of the whole buffer
    pub async fn pasted_images(
        &self,
        images: Vec<PastedImage>,
        instructions: &str,
    ) -> Result<Merge, ComposeError> {
        if images.is_empty() {
            return Err(ComposeError::Validation(
                "Please paste at least one image".to_string(),
            ));
        }

        tracing::info!(images = images.len(), "Processing pasted images");
        let request = ProcessRequest::new("", images, instructions);
        let text = self.processor.process(&request).await?;

        Ok(Merge::Replace(non_blank(text, "image processing service")?))
    }
}

fn require<'a>(value: &'a str, message: &str) -> Result<&'a str, ComposeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ComposeError::Validation(message.to_string()));
    }
    Ok(trimmed)
}

fn non_blank(text: String, service: &str) -> Result<String, ServiceError> {
    if text.trim().is_empty() {
        return Err(ServiceError::InvalidFormat(format!(
            "{} returned no text",
            service
        )));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ArticleTweet;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeArticle {
        calls: Mutex<Vec<String>>,
        tweet: String,
    }

    #[async_trait]
    impl ArticleService for FakeArticle {
        async fn article_to_tweet(&self, url: &str) -> Result<ArticleTweet, ServiceError> {
            self.calls.lock().unwrap().push(url.to_string());
            Ok(ArticleTweet {
                tweet: self.tweet.clone(),
                article_content: Some("Body".to_string()),
            })
        }
    }

    struct FakeSocial;

    #[async_trait]
    impl SocialMediaService for FakeSocial {
        async fn post_to_tweet(&self, url: &str) -> Result<String, ServiceError> {
            Ok(format!("Saw this: {}", url))
        }
    }

    struct FakeProcessor {
        requests: Mutex<Vec<ProcessRequest>>,
    }

    #[async_trait]
    impl TweetProcessor for FakeProcessor {
        async fn process(&self, request: &ProcessRequest) -> Result<String, ServiceError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok("Extracted".to_string())
        }
    }

    fn normalizer(
        tweet: &str,
    ) -> (
        ContentNormalizer<FakeArticle, FakeSocial, FakeProcessor>,
        Arc<FakeArticle>,
        Arc<FakeProcessor>,
    ) {
        let article = Arc::new(FakeArticle {
            calls: Mutex::new(vec![]),
            tweet: tweet.to_string(),
        });
        let processor = Arc::new(FakeProcessor {
            requests: Mutex::new(vec![]),
        });
        let normalizer = ContentNormalizer::new(
            Arc::clone(&article),
            Arc::new(FakeSocial),
            Arc::clone(&processor),
        );
        (normalizer, article, processor)
    }

    #[tokio::test]
    async fn test_article_appends_trimmed_url_result() {
        let (normalizer, article, _) = normalizer("Article tweet");

        let merge = normalizer.article("  https://news.example.com/a  ").await.unwrap();

        assert_eq!(merge, Merge::Append("Article tweet".to_string()));
        assert_eq!(
            *article.calls.lock().unwrap(),
            vec!["https://news.example.com/a".to_string()]
        );
    }

    #[tokio::test]
    async fn test_article_rejects_empty_url_without_call() {
        let (normalizer, article, _) = normalizer("unused");

        let result = normalizer.article("   ").await;

        assert!(matches!(result, Err(ComposeError::Validation(_))));
        assert!(article.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_article_rejects_blank_tweet() {
        let (normalizer, _, _) = normalizer("  ");

        let result = normalizer.article("https://example.com").await;

        assert!(matches!(
            result,
            Err(ComposeError::Service(ServiceError::InvalidFormat(_)))
        ));
    }

    #[tokio::test]
    async fn test_social_media_accepts_any_platform() {
        let (normalizer, _, _) = normalizer("unused");

        for url in [
            "https://www.tiktok.com/@a/video/1",
            "https://www.instagram.com/p/xyz/",
            "https://www.youtube.com/watch?v=1",
            "https://unknown.example/thing",
        ] {
            let merge = normalizer.social_media(url).await.unwrap();
            assert_eq!(merge, Merge::Append(format!("Saw this: {}", url)));
        }
    }

    #[tokio::test]
    async fn test_pasted_images_replace_and_omit_tweets() {
        let (normalizer, _, processor) = normalizer("unused");
        let images = vec![PastedImage::new("image/png", vec![1, 2, 3])];

        let merge = normalizer
            .pasted_images(images.clone(), "Extract quotes")
            .await
            .unwrap();

        assert_eq!(merge, Merge::Replace("Extracted".to_string()));
        let requests = processor.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].tweets, None);
        assert_eq!(requests[0].images, images);
        assert_eq!(requests[0].instructions.as_deref(), Some("Extract quotes"));
    }

    #[tokio::test]
    async fn test_pasted_images_requires_images() {
        let (normalizer, _, processor) = normalizer("unused");

        let result = normalizer.pasted_images(vec![], "").await;

        assert!(matches!(result, Err(ComposeError::Validation(_))));
        assert!(processor.requests.lock().unwrap().is_empty());
    }
}
