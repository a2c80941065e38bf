//! Compose command - one controller session driven by flags

use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tweet_scheduler_domain::text::split_tweets;
use tweet_scheduler_domain::usecases::{ComposeError, PasteItem};
use tweet_scheduler_domain::{FormState, ScheduleReceipt, SocialPlatform};

use crate::args::ComposeArgs;
use crate::config::AppConfig;
use crate::input::read_text;
use crate::services::{Controller, build_controller};

pub async fn execute(args: ComposeArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let controller = build_controller(&config)?;

    if let Some(text) = read_text(args.text.as_deref(), args.file.as_deref())? {
        controller.set_tweet_text(text);
    }
    if let Some(instructions) = &args.instructions {
        controller.set_image_instructions(instructions.clone());
    }
    if !args.images.is_empty() {
        paste_images(&controller, &args.images).await?;
    }

    let outcome = run_operations(&controller, &args).await;
    let state = controller.snapshot();

    if args.json {
        let report = ComposeReport::new(&state, outcome.as_ref().ok().and_then(Option::as_ref));
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize state")?;
        println!("{}", json);
    } else {
        if !state.tweet_text.is_empty() {
            println!("{}", state.tweet_text);
        }
        if let Ok(Some(receipt)) = &outcome {
            println!();
            println!("{}", receipt.message);
            if let Some(output) = receipt.output.as_deref().filter(|o| !o.trim().is_empty()) {
                println!("{}", output.trim_end());
            }
        }
    }

    if let Err(e) = outcome {
        bail!("{}", e);
    }

    Ok(())
}

/// Run the requested operations in order, stopping at the first failure
async fn run_operations(
    controller: &Controller,
    args: &ComposeArgs,
) -> Result<Option<ScheduleReceipt>, ComposeError> {
    if let Some(url) = &args.article {
        controller.process_article(url).await?;
    }

    if let Some(url) = &args.social {
        if let Some(platform) = SocialPlatform::detect(url) {
            eprintln!("Detected {} link", platform);
        }
        controller.process_social_media(url).await?;
    }

    if args.process_images {
        if controller.would_discard_draft() {
            eprintln!("Warning: processing images replaces the current tweet text");
        }
        controller.process_pasted_images().await?;
    }

    if args.submit {
        controller.submit_for_processing().await?;
    }

    if args.schedule {
        return controller.schedule_tweets().await.map(Some);
    }

    Ok(None)
}

async fn paste_images(controller: &Controller, paths: &[PathBuf]) -> Result<()> {
    let mut items = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(mime_type) = image_mime_type(path) else {
            eprintln!("Skipping {}: not a supported image", path.display());
            continue;
        };
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image: {}", path.display()))?;
        items.push(PasteItem::image_bytes(mime_type, data));
    }

    let outcome = controller.paste(items).await;
    if outcome.skipped > 0 {
        eprintln!("Skipped {} image(s) that could not be read", outcome.skipped);
    }
    tracing::info!(added = outcome.added, "Pasted images");

    Ok(())
}

/// Image MIME type from the file extension
fn image_mime_type(path: &Path) -> Option<&'static str> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => Some("image/png"),
        Some("jpg" | "jpeg") => Some("image/jpeg"),
        Some("gif") => Some("image/gif"),
        Some("webp") => Some("image/webp"),
        _ => None,
    }
}

#[derive(Serialize)]
struct ComposeReport<'a> {
    tweet_text: &'a str,
    tweets: Vec<String>,
    images: usize,
    image_instructions: &'a str,
    last_error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    receipt: Option<&'a ScheduleReceipt>,
}

impl<'a> ComposeReport<'a> {
    fn new(state: &'a FormState, receipt: Option<&'a ScheduleReceipt>) -> Self {
        Self {
            tweet_text: &state.tweet_text,
            tweets: split_tweets(&state.tweet_text),
            images: state.pasted_images.len(),
            image_instructions: &state.image_instructions,
            last_error: state.last_error.as_deref(),
            receipt,
        }
    }
}
