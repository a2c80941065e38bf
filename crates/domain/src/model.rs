//! Domain models and value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::text::append_block;

/// Stage of the operation currently in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    PreparingData,
    ProcessingImages,
    SendingToServer,
    ProcessingArticle,
    ProcessingSocialMedia,
    Scheduling,
}

impl Step {
    /// Human-readable label shown while the step runs
    pub fn label(self) -> &'static str {
        match self {
            Step::PreparingData => "Preparing data...",
            Step::ProcessingImages => "Processing images...",
            Step::SendingToServer => "Sending to server...",
            Step::ProcessingArticle => "Processing article...",
            Step::ProcessingSocialMedia => "Processing social media...",
            Step::Scheduling => "Scheduling tweets...",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An image captured from a paste event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PastedImage {
    /// MIME type, e.g. `image/png`
    pub mime_type: String,
    /// Decoded image bytes
    pub data: Vec<u8>,
}

impl PastedImage {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// File extension matching the MIME type
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/gif" => "gif",
            "image/webp" => "webp",
            _ => "png",
        }
    }

    /// Upload file name for the image at `index` (e.g. `image0.png`)
    pub fn file_name(&self, index: usize) -> String {
        format!("image{}.{}", index, self.extension())
    }
}

/// How a normalizer or gateway result is merged into the tweet buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Merge {
    /// Append as a new block, separated by a blank line
    Append(String),
    /// Replace the whole buffer
    Replace(String),
}

/// The form aggregate owned by the controller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    /// Accumulated drafts, blocks separated by blank lines
    pub tweet_text: String,
    /// Images in paste order
    pub pasted_images: Vec<PastedImage>,
    /// Free-text instructions forwarded with the images
    pub image_instructions: String,
    pub article_url: String,
    pub social_media_url: String,
    /// `Some` while an operation is in flight
    pub current_step: Option<Step>,
    /// Last surfaced failure message
    pub last_error: Option<String>,
}

impl FormState {
    pub fn is_busy(&self) -> bool {
        self.current_step.is_some()
    }

    /// Return the state with `merge` applied to the tweet buffer
    pub fn merged(mut self, merge: Merge) -> Self {
        self.tweet_text = match merge {
            Merge::Append(block) => append_block(&self.tweet_text, &block),
            Merge::Replace(text) => text,
        };
        self
    }

    /// Return the state without the image at `index`, or `None` when out of bounds
    pub fn without_image(mut self, index: usize) -> Option<(Self, PastedImage)> {
        if index >= self.pasted_images.len() {
            return None;
        }
        let removed = self.pasted_images.remove(index);
        Some((self, removed))
    }

    /// Whether replacing the buffer with processed image text would drop a draft
    pub fn would_discard_draft(&self) -> bool {
        !self.pasted_images.is_empty() && !self.tweet_text.trim().is_empty()
    }
}

/// A category of hook templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookCategory {
    /// Category key, e.g. `question`
    pub id: String,
    /// Display title
    pub title: String,
    /// Templates in declared order
    pub examples: Vec<String>,
}

/// Response of the article-to-tweet service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleTweet {
    pub tweet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_content: Option<String>,
}

/// Payload sent to the image/text processing service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessRequest {
    /// Draft text, only present when non-empty
    pub tweets: Option<String>,
    /// Images in paste order
    pub images: Vec<PastedImage>,
    /// Image instructions, only present when non-empty
    pub instructions: Option<String>,
}

impl ProcessRequest {
    pub fn new(tweets: &str, images: Vec<PastedImage>, instructions: &str) -> Self {
        Self {
            tweets: non_empty(tweets),
            images,
            instructions: non_empty(instructions),
        }
    }

    /// True when there is neither text nor images to process
    pub fn is_empty(&self) -> bool {
        self.tweets.is_none() && self.images.is_empty()
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Confirmation returned by the scheduling service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleReceipt {
    pub message: String,
    /// Script output, when the back end reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Platform a social-media or article URL points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialPlatform {
    TikTok,
    Instagram,
    YouTube,
    Article,
}

const ARTICLE_DOMAINS: &[&str] = &[
    "bbc.",
    "cnn.",
    "reuters.",
    "news.",
    "medium.",
    "blog.",
    "forbes.",
    "techcrunch.",
    "theverge.",
    "wired.",
    "nytimes.",
    "washingtonpost.",
    "guardian.",
    "bloomberg.",
];

const ARTICLE_PATH_MARKERS: &[&str] = &["/article/", "/post/", "/blog/", "/news/", ".html", ".htm"];

impl SocialPlatform {
    /// Detect the platform from a URL; `None` for unparseable or unknown URLs
    pub fn detect(url: &str) -> Option<Self> {
        let parsed = Url::parse(url.trim()).ok()?;
        let host = parsed.host_str()?.to_lowercase();

        if host.contains("tiktok") {
            return Some(SocialPlatform::TikTok);
        }
        if host.contains("instagram") {
            return Some(SocialPlatform::Instagram);
        }
        if host.contains("youtube") || host.contains("youtu.be") {
            return Some(SocialPlatform::YouTube);
        }
        if ARTICLE_DOMAINS.iter().any(|domain| host.contains(domain)) {
            return Some(SocialPlatform::Article);
        }

        let path = parsed.path().to_lowercase();
        if ARTICLE_PATH_MARKERS.iter().any(|marker| path.contains(marker)) {
            return Some(SocialPlatform::Article);
        }

        None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SocialPlatform::TikTok => "tiktok",
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::YouTube => "youtube",
            SocialPlatform::Article => "article",
        }
    }
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(tag: u8) -> PastedImage {
        PastedImage::new("image/png", vec![tag])
    }

    #[test]
    fn test_merge_append_into_empty_buffer() {
        let state = FormState::default().merged(Merge::Append("First".to_string()));
        assert_eq!(state.tweet_text, "First");
    }

    #[test]
    fn test_merge_append_inserts_blank_line() {
        let state = FormState {
            tweet_text: "Draft".to_string(),
            ..Default::default()
        }
        .merged(Merge::Append("New".to_string()));
        assert_eq!(state.tweet_text, "Draft\n\nNew");
    }

    #[test]
    fn test_merge_replace_discards_previous() {
        let state = FormState {
            tweet_text: "Draft".to_string(),
            ..Default::default()
        }
        .merged(Merge::Replace("Processed".to_string()));
        assert_eq!(state.tweet_text, "Processed");
    }

    #[test]
    fn test_without_image_preserves_order() {
        let state = FormState {
            pasted_images: vec![image(0), image(1), image(2), image(3)],
            ..Default::default()
        };

        let (state, removed) = state.without_image(1).unwrap();

        assert_eq!(removed, image(1));
        assert_eq!(state.pasted_images, vec![image(0), image(2), image(3)]);
    }

    #[test]
    fn test_without_image_out_of_bounds() {
        let state = FormState {
            pasted_images: vec![image(0)],
            ..Default::default()
        };
        assert!(state.without_image(1).is_none());
    }

    #[test]
    fn test_would_discard_draft() {
        let mut state = FormState {
            tweet_text: "Draft".to_string(),
            ..Default::default()
        };
        assert!(!state.would_discard_draft());

        state.pasted_images.push(image(0));
        assert!(state.would_discard_draft());

        state.tweet_text = "  ".to_string();
        assert!(!state.would_discard_draft());
    }

    #[test]
    fn test_process_request_drops_blank_fields() {
        let request = ProcessRequest::new("tweets", vec![], "  ");
        assert_eq!(request.tweets.as_deref(), Some("tweets"));
        assert!(request.instructions.is_none());
        assert!(!request.is_empty());

        assert!(ProcessRequest::new("", vec![], "instructions").is_empty());
    }

    #[test]
    fn test_image_file_name() {
        assert_eq!(image(0).file_name(3), "image3.png");
        assert_eq!(
            PastedImage::new("image/jpeg", vec![]).file_name(0),
            "image0.jpg"
        );
    }

    #[test]
    fn test_detect_social_platforms() {
        assert_eq!(
            SocialPlatform::detect("https://www.tiktok.com/@user/video/1"),
            Some(SocialPlatform::TikTok)
        );
        assert_eq!(
            SocialPlatform::detect("https://www.instagram.com/p/abc123/"),
            Some(SocialPlatform::Instagram)
        );
        assert_eq!(
            SocialPlatform::detect("https://youtu.be/dQw4w9WgXcQ"),
            Some(SocialPlatform::YouTube)
        );
        assert_eq!(
            SocialPlatform::detect("https://www.bbc.co.uk/sport/1"),
            Some(SocialPlatform::Article)
        );
        assert_eq!(
            SocialPlatform::detect("https://example.com/blog/post-title"),
            Some(SocialPlatform::Article)
        );
        assert_eq!(SocialPlatform::detect("https://example.com/"), None);
        assert_eq!(SocialPlatform::detect("not a url"), None);
    }

    #[test]
    fn test_step_labels() {
        assert_eq!(Step::SendingToServer.to_string(), "Sending to server...");
        assert_eq!(Step::Scheduling.label(), "Scheduling tweets...");
    }
}
