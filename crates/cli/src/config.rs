//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub services: ServicesConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub clipboard: ClipboardConfig,

    #[serde(default)]
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Upper bound for every external call
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// `http` or `stub`
    #[serde(default = "default_backend")]
    pub backend: String,

    #[serde(default = "default_article_url")]
    pub article_url: String,

    #[serde(default = "default_social_media_url")]
    pub social_media_url: String,

    #[serde(default = "default_processing_url")]
    pub processing_url: String,

    #[serde(default = "default_schedule_url")]
    pub schedule_url: String,

    /// Remote hook data; empty uses the embedded hooks
    #[serde(default = "default_hooks_url")]
    pub hooks_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_script_command")]
    pub script_command: String,

    /// `{tweets_file}` is replaced with the temporary tweets file
    #[serde(default = "default_script_args")]
    pub script_args: Vec<String>,

    #[serde(default = "default_script_timeout")]
    pub script_timeout_secs: u64,

    /// Hook data served on `/api/hooks`; unset serves the embedded hooks
    #[serde(default)]
    pub hooks_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipboardConfig {
    #[serde(default = "default_clipboard_command")]
    pub command: String,

    #[serde(default = "default_clipboard_args")]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// First sheet date (`DD/MM/YYYY`); today when unset
    #[serde(default)]
    pub start_date: Option<String>,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

fn default_backend() -> String {
    "http".to_string()
}

fn default_article_url() -> String {
    "http://localhost:5000/api/article-to-tweet".to_string()
}

fn default_social_media_url() -> String {
    "http://localhost:5000/api/social-media-to-tweet".to_string()
}

fn default_processing_url() -> String {
    "http://localhost:5000/api/process".to_string()
}

fn default_schedule_url() -> String {
    "http://localhost:3000/api/schedule".to_string()
}

fn default_hooks_url() -> String {
    "http://localhost:3000/api/hooks".to_string()
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_script_command() -> String {
    "python3".to_string()
}

fn default_script_args() -> Vec<String> {
    vec![
        "GPT4_make_scheduler.py".to_string(),
        "{tweets_file}".to_string(),
    ]
}

fn default_script_timeout() -> u64 {
    300
}

fn default_clipboard_command() -> String {
    if cfg!(target_os = "macos") {
        "pbcopy".to_string()
    } else {
        "xclip".to_string()
    }
}

fn default_clipboard_args() -> Vec<String> {
    if cfg!(target_os = "macos") {
        vec![]
    } else {
        vec!["-selection".to_string(), "clipboard".to_string()]
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            article_url: default_article_url(),
            social_media_url: default_social_media_url(),
            processing_url: default_processing_url(),
            schedule_url: default_schedule_url(),
            hooks_url: default_hooks_url(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            script_command: default_script_command(),
            script_args: default_script_args(),
            script_timeout_secs: default_script_timeout(),
            hooks_file: None,
        }
    }
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            command: default_clipboard_command(),
            args: default_clipboard_args(),
        }
    }
}

impl GeneralConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./config.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("TWEET_SCHEDULER")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# tweet-scheduler configuration

[general]
log_level = "info"
# Upper bound for every external call
request_timeout_secs = 60

[services]
backend = "http"  # http, stub
article_url = "http://localhost:5000/api/article-to-tweet"
social_media_url = "http://localhost:5000/api/social-media-to-tweet"
processing_url = "http://localhost:5000/api/process"
schedule_url = "http://localhost:3000/api/schedule"
# Leave empty to use the embedded hooks
hooks_url = "http://localhost:3000/api/hooks"

[server]
bind = "127.0.0.1:3000"
script_command = "python3"
# {tweets_file} is replaced with the temporary tweets file;
# without it the tweets are piped to the script's stdin
script_args = ["GPT4_make_scheduler.py", "{tweets_file}"]
script_timeout_secs = 300
# hooks_file = "./hooks.json"

[clipboard]
command = "xclip"  # pbcopy on macOS
args = ["-selection", "clipboard"]

[schedule]
# First sheet date, DD/MM/YYYY (defaults to today)
# start_date = "15/02/2025"
"#
        .to_string()
    }
}
