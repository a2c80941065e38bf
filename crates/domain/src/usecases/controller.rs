//! Form state controller
//!
//! Owns the [`FormState`] and runs one operation at a time. Every operation
//! follows the same path: claim the busy flag, issue the external call under a
//! timeout, then merge the result or record the failure. The busy flag and the
//! current step are released by [`OperationGuard`] when it drops, so a cancelled
//! operation also returns the controller to idle.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::{
    model::{FormState, Merge, PastedImage, ScheduleReceipt, Step},
    ports::{ArticleService, Scheduler, ServiceError, SocialMediaService, TweetProcessor},
    usecases::{
        gateway::{SubmissionGateway, prepare_submission},
        normalizer::ContentNormalizer,
        paste::{PasteItem, decode_paste_event},
    },
};

/// Failure of a controller operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComposeError {
    /// Missing input, caught before any external call
    #[error("{0}")]
    Validation(String),
    #[error("Another operation is in progress: {0}")]
    Busy(Step),
    #[error("Image index {index} is out of range ({len} images)")]
    ImageIndex { index: usize, len: usize },
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Controller settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Upper bound for each external call
    pub call_timeout: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(60),
        }
    }
}

/// Outcome of merging a paste event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasteOutcome {
    /// Images appended to the form
    pub added: usize,
    /// Image items that failed to decode
    pub skipped: usize,
}

fn lock(state: &Mutex<FormState>) -> MutexGuard<'_, FormState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds the busy flag for one operation
struct OperationGuard<'a> {
    state: &'a Mutex<FormState>,
    busy: &'a AtomicBool,
}

impl OperationGuard<'_> {
    fn advance(&self, step: Step) {
        tracing::debug!(step = %step, "Advancing operation");
        lock(self.state).current_step = Some(step);
    }

    /// Record a failure in `last_error` and hand it back
    fn fail(&self, error: ComposeError) -> ComposeError {
        tracing::warn!(error = %error, "Operation failed");
        lock(self.state).last_error = Some(error.to_string());
        error
    }
}

impl Drop for OperationGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).current_step = None;
        self.busy.store(false, Ordering::Release);
    }
}

/// Controller for one compose session
pub struct FormController<A, S, P, Sc>
where
    A: ArticleService + ?Sized,
    S: SocialMediaService + ?Sized,
    P: TweetProcessor + ?Sized,
    Sc: Scheduler + ?Sized,
{
    normalizer: ContentNormalizer<A, S, P>,
    gateway: SubmissionGateway<P, Sc>,
    config: ControllerConfig,
    state: Mutex<FormState>,
    busy: AtomicBool,
}

impl<A, S, P, Sc> FormController<A, S, P, Sc>
where
    A: ArticleService + ?Sized,
    S: SocialMediaService + ?Sized,
    P: TweetProcessor + ?Sized,
    Sc: Scheduler + ?Sized,
{
    pub fn new(
        article: Arc<A>,
        social: Arc<S>,
        processor: Arc<P>,
        scheduler: Arc<Sc>,
        config: ControllerConfig,
    ) -> Self {
        Self {
            normalizer: ContentNormalizer::new(article, social, Arc::clone(&processor)),
            gateway: SubmissionGateway::new(processor, scheduler),
            config,
            state: Mutex::new(FormState::default()),
            busy: AtomicBool::new(false),
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> FormState {
        lock(&self.state).clone()
    }

    pub fn set_tweet_text(&self, text: impl Into<String>) {
        lock(&self.state).tweet_text = text.into();
    }

    pub fn set_image_instructions(&self, instructions: impl Into<String>) {
        lock(&self.state).image_instructions = instructions.into();
    }

    pub fn set_article_url(&self, url: impl Into<String>) {
        lock(&self.state).article_url = url.into();
    }

    pub fn set_social_media_url(&self, url: impl Into<String>) {
        lock(&self.state).social_media_url = url.into();
    }

    /// Whether processing the pasted images now would drop the current draft
    pub fn would_discard_draft(&self) -> bool {
        lock(&self.state).would_discard_draft()
    }

    /// Decode a paste event and append its images in event order
    pub async fn paste(&self, items: Vec<PasteItem>) -> PasteOutcome {
        let decoded = decode_paste_event(items).await;

        let mut outcome = PasteOutcome::default();
        let mut images = Vec::with_capacity(decoded.len());
        for item in decoded {
            match item.result {
                Ok(image) => images.push(image),
                Err(e) => {
                    tracing::warn!(index = item.index, error = %e, "Skipping pasted item");
                    outcome.skipped += 1;
                }
            }
        }
        outcome.added = images.len();

        lock(&self.state).pasted_images.extend(images);
        tracing::debug!(added = outcome.added, skipped = outcome.skipped, "Paste merged");

        outcome
    }

    /// Remove the image at `index`; out-of-range indices leave the form unchanged
    pub fn remove_image(&self, index: usize) -> Result<PastedImage, ComposeError> {
        let mut state = lock(&self.state);
        let len = state.pasted_images.len();
        if index >= len {
            return Err(ComposeError::ImageIndex { index, len });
        }

        let (next, removed) = std::mem::take(&mut *state)
            .without_image(index)
            .ok_or(ComposeError::ImageIndex { index, len })?;
        *state = next;
        tracing::debug!(index, remaining = len - 1, "Removed pasted image");
        Ok(removed)
    }

    /// Article URL to a new tweet block
    pub async fn process_article(&self, url: &str) -> Result<(), ComposeError> {
        let guard = self.begin(Step::ProcessingArticle)?;
        self.set_article_url(url);

        match self.call(self.normalizer.article(url)).await {
            Ok(merge) => {
                let mut state = lock(&self.state);
                *state = std::mem::take(&mut *state).merged(merge);
                state.article_url.clear();
                Ok(())
            }
            Err(e) => Err(guard.fail(e)),
        }
    }

    /// Social-media post URL to a new tweet block
    pub async fn process_social_media(&self, url: &str) -> Result<(), ComposeError> {
        let guard = self.begin(Step::ProcessingSocialMedia)?;
        self.set_social_media_url(url);

        match self.call(self.normalizer.social_media(url)).await {
            Ok(merge) => {
                let mut state = lock(&self.state);
                *state = std::mem::take(&mut *state).merged(merge);
                state.social_media_url.clear();
                Ok(())
            }
            Err(e) => Err(guard.fail(e)),
        }
    }

    /// Replace the buffer with text extracted from the pasted images
    pub async fn process_pasted_images(&self) -> Result<(), ComposeError> {
        let guard = self.begin(Step::ProcessingImages)?;
        let (images, instructions) = {
            let state = lock(&self.state);
            (state.pasted_images.clone(), state.image_instructions.clone())
        };

        match self
            .call(self.normalizer.pasted_images(images, &instructions))
            .await
        {
            Ok(merge) => {
                self.apply(merge);
                Ok(())
            }
            Err(e) => Err(guard.fail(e)),
        }
    }

    /// Send the buffer and images for processing; the result replaces the buffer
    pub async fn submit_for_processing(&self) -> Result<String, ComposeError> {
        let guard = self.begin(Step::PreparingData)?;
        let request = {
            let state = lock(&self.state);
            prepare_submission(
                &state.tweet_text,
                state.pasted_images.clone(),
                &state.image_instructions,
            )
        };
        let request = request.map_err(|e| guard.fail(e))?;

        if !request.images.is_empty() {
            guard.advance(Step::ProcessingImages);
        }
        guard.advance(Step::SendingToServer);

        match self.call(self.gateway.submit(&request)).await {
            Ok(merge) => Ok(self.apply(merge)),
            Err(e) => Err(guard.fail(e)),
        }
    }

    /// Hand the buffer to the scheduling back end; the buffer is left as is
    pub async fn schedule_tweets(&self) -> Result<ScheduleReceipt, ComposeError> {
        let guard = self.begin(Step::Scheduling)?;
        let text = lock(&self.state).tweet_text.clone();

        self.call(self.gateway.schedule(&text))
            .await
            .map_err(|e| guard.fail(e))
    }

    /// Claim the busy flag, or report the step already in flight
    fn begin(&self, step: Step) -> Result<OperationGuard<'_>, ComposeError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            let current = lock(&self.state).current_step.unwrap_or(step);
            tracing::debug!(requested = %step, current = %current, "Rejected while busy");
            return Err(ComposeError::Busy(current));
        }

        {
            let mut state = lock(&self.state);
            state.current_step = Some(step);
            state.last_error = None;
        }
        tracing::info!(step = %step, "Operation started");

        Ok(OperationGuard {
            state: &self.state,
            busy: &self.busy,
        })
    }

    async fn call<T, F>(&self, operation: F) -> Result<T, ComposeError>
    where
        F: Future<Output = Result<T, ComposeError>>,
    {
        match tokio::time::timeout(self.config.call_timeout, operation).await {
            Ok(result) => result,
            Err(_) => Err(ServiceError::Timeout(self.config.call_timeout).into()),
        }
    }

    /// Merge into the buffer, returning the new buffer
    fn apply(&self, merge: Merge) -> String {
        let mut state = lock(&self.state);
        *state = std::mem::take(&mut *state).merged(merge);
        state.tweet_text.clone()
    }
}
