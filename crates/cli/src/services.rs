//! Wiring of configured adapters into the domain ports

use anyhow::{Result, bail};
use std::sync::Arc;
use std::time::Duration;
use tweet_scheduler_adapters::{
    CommandClipboard, CommandScheduler, FsHookSource, HttpArticleService, HttpHookSource,
    HttpScheduler, HttpSocialMediaService, HttpTweetProcessor, StubArticleService, StubClipboard,
    StubScheduler, StubSocialMediaService, StubTweetProcessor,
};
use tweet_scheduler_domain::usecases::{ControllerConfig, FormController, HookLibrary};
use tweet_scheduler_domain::{
    ArticleService, Clipboard, Scheduler, SocialMediaService, TweetProcessor,
};

use crate::config::AppConfig;

/// Controller over whichever adapters the config selects
pub type Controller =
    FormController<dyn ArticleService, dyn SocialMediaService, dyn TweetProcessor, dyn Scheduler>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Http,
    Stub,
}

impl Backend {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        match config.services.backend.trim() {
            "http" => Ok(Backend::Http),
            "stub" => Ok(Backend::Stub),
            other => bail!("Unknown services backend: {} (expected http or stub)", other),
        }
    }
}

pub fn build_controller(config: &AppConfig) -> Result<Controller> {
    let timeout = config.general.request_timeout();
    let controller_config = ControllerConfig {
        call_timeout: timeout,
    };

    let controller = match Backend::from_config(config)? {
        Backend::Http => {
            let services = &config.services;
            let article: Arc<dyn ArticleService> = Arc::new(HttpArticleService::new(
                services.article_url.clone(),
                timeout,
            ));
            let social: Arc<dyn SocialMediaService> = Arc::new(HttpSocialMediaService::new(
                services.social_media_url.clone(),
                timeout,
            ));
            let processor: Arc<dyn TweetProcessor> = Arc::new(HttpTweetProcessor::new(
                services.processing_url.clone(),
                timeout,
            ));
            let scheduler: Arc<dyn Scheduler> = Arc::new(HttpScheduler::new(
                services.schedule_url.clone(),
                timeout,
            ));
            FormController::new(article, social, processor, scheduler, controller_config)
        }
        Backend::Stub => {
            let article: Arc<dyn ArticleService> = Arc::new(StubArticleService::new());
            let social: Arc<dyn SocialMediaService> = Arc::new(StubSocialMediaService);
            let processor: Arc<dyn TweetProcessor> = Arc::new(StubTweetProcessor::new());
            let scheduler: Arc<dyn Scheduler> = Arc::new(StubScheduler::new());
            FormController::new(article, social, processor, scheduler, controller_config)
        }
    };

    Ok(controller)
}

/// Hook library from the configured remote source, falling back to the embedded hooks
pub async fn load_hooks(config: &AppConfig) -> Result<HookLibrary> {
    let url = config.services.hooks_url.trim();
    if Backend::from_config(config)? == Backend::Stub || url.is_empty() {
        return Ok(HookLibrary::embedded());
    }

    let source = HttpHookSource::new(url.to_string(), config.general.request_timeout());
    Ok(HookLibrary::load(&source).await)
}

/// Hook library served by `serve`
pub async fn load_served_hooks(config: &AppConfig) -> HookLibrary {
    match &config.server.hooks_file {
        Some(path) => HookLibrary::load(&FsHookSource::new(path)).await,
        None => HookLibrary::embedded(),
    }
}

pub fn build_clipboard(config: &AppConfig) -> Result<Box<dyn Clipboard>> {
    Ok(match Backend::from_config(config)? {
        Backend::Http => Box::new(CommandClipboard::new(
            config.clipboard.command.clone(),
            config.clipboard.args.clone(),
        )),
        Backend::Stub => Box::new(StubClipboard::new()),
    })
}

/// Scheduler behind the server's `/api/schedule`
pub fn build_script_scheduler(config: &AppConfig) -> Result<Arc<dyn Scheduler>> {
    Ok(match Backend::from_config(config)? {
        Backend::Http => Arc::new(CommandScheduler::new(
            config.server.script_command.clone(),
            config.server.script_args.clone(),
            Duration::from_secs(config.server.script_timeout_secs),
        )),
        Backend::Stub => Arc::new(StubScheduler::new()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_selection() {
        let mut config = AppConfig::default();
        assert_eq!(Backend::from_config(&config).unwrap(), Backend::Http);

        config.services.backend = "stub".to_string();
        assert_eq!(Backend::from_config(&config).unwrap(), Backend::Stub);

        config.services.backend = "carrier-pigeon".to_string();
        assert!(Backend::from_config(&config).is_err());
        assert!(build_controller(&config).is_err());
    }

    #[tokio::test]
    async fn test_stub_backend_uses_embedded_hooks() {
        let mut config = AppConfig::default();
        config.services.backend = "stub".to_string();

        let library = load_hooks(&config).await.unwrap();

        assert_eq!(library, HookLibrary::embedded());
    }

    #[tokio::test]
    async fn test_stub_controller_round_trip() {
        let mut config = AppConfig::default();
        config.services.backend = "stub".to_string();
        let controller = build_controller(&config).unwrap();

        controller
            .process_article("https://news.example.com/a")
            .await
            .unwrap();

        assert_eq!(
            controller.snapshot().tweet_text,
            "Stub tweet for article https://news.example.com/a"
        );
    }
}
