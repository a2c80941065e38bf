//! Submission gateway - delivers the tweet buffer to the processing and scheduling back ends

use std::sync::Arc;

use crate::{
    model::{Merge, PastedImage, ProcessRequest, ScheduleReceipt},
    ports::{Scheduler, ServiceError, TweetProcessor},
    usecases::controller::ComposeError,
};

/// Build a processing request, rejecting submissions with neither text nor images
pub fn prepare_submission(
    tweet_text: &str,
    images: Vec<PastedImage>,
    instructions: &str,
) -> Result<ProcessRequest, ComposeError> {
    let request = ProcessRequest::new(tweet_text, images, instructions);
    if request.is_empty() {
        return Err(ComposeError::Validation(
            "Please enter tweets or paste images".to_string(),
        ));
    }
    Ok(request)
}

/// Gateway over the processing and scheduling services
pub struct SubmissionGateway<P, Sc>
where
    P: TweetProcessor + ?Sized,
    Sc: Scheduler + ?Sized,
{
    processor: Arc<P>,
    scheduler: Arc<Sc>,
}

impl<P, Sc> SubmissionGateway<P, Sc>
where
    P: TweetProcessor + ?Sized,
    Sc: Scheduler + ?Sized,
{
    pub fn new(processor: Arc<P>, scheduler: Arc<Sc>) -> Self {
        Self {
            processor,
            scheduler,
        }
    }

    /// Send a prepared request; the processed text replaces the buffer
    pub async fn submit(&self, request: &ProcessRequest) -> Result<Merge, ComposeError> {
        tracing::info!(
            has_text = request.tweets.is_some(),
            images = request.images.len(),
            has_instructions = request.instructions.is_some(),
            "Submitting for processing"
        );

        let text = self.processor.process(request).await?;
        if text.trim().is_empty() {
            return Err(ServiceError::InvalidFormat(
                "No tweets were generated from either images or text".to_string(),
            )
            .into());
        }

        Ok(Merge::Replace(text))
    }

    /// Hand the buffer to the scheduling back end
    pub async fn schedule(&self, tweet_text: &str) -> Result<ScheduleReceipt, ComposeError> {
        if tweet_text.trim().is_empty() {
            return Err(ComposeError::Validation(
                "Please enter tweets to schedule".to_string(),
            ));
        }

        tracing::info!(chars = tweet_text.chars().count(), "Scheduling tweets");
        let receipt = self.scheduler.schedule(tweet_text).await?;
        tracing::info!(message = %receipt.message, "Tweets scheduled");

        Ok(receipt)
    }
}
