//! tweet-scheduler adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `http`: reqwest clients for the article, social media, processing and
//!   scheduling services, plus the remote hook source
//! - `command`: scheduling script runner and command-backed clipboard
//! - `hooks_fs`: hook data file written by `hooks export`
//! - `stub`: offline stand-ins for every service

pub mod command;
pub mod hooks_fs;
pub mod http;
pub mod stub;

pub use command::{CommandClipboard, CommandScheduler};
pub use hooks_fs::FsHookSource;
pub use http::{
    HttpArticleService, HttpHookSource, HttpSocialMediaService, HttpScheduler, HttpTweetProcessor,
};
pub use stub::{
    StubArticleService, StubClipboard, StubScheduler, StubSocialMediaService, StubTweetProcessor,
};
