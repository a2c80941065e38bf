//! Scheduler that runs the local scheduling script

use async_trait::async_trait;
use std::io::Write;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tweet_scheduler_domain::{ScheduleReceipt, Scheduler, ServiceError};

use super::expand_args;

/// Argument placeholder replaced with the path of the temporary tweets file
pub const TWEETS_FILE_PLACEHOLDER: &str = "{tweets_file}";

/// Writes the tweets to a temporary file and runs the configured script on it.
///
/// When no argument mentions [`TWEETS_FILE_PLACEHOLDER`] the tweets are piped to
/// the script's stdin instead. The temporary file is removed once the script ends.
pub struct CommandScheduler {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandScheduler {
    pub fn new(command: String, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            command,
            args,
            timeout,
        }
    }

    fn write_tweets_file(tweets: &str) -> Result<tempfile::NamedTempFile, ServiceError> {
        let mut file = tempfile::Builder::new()
            .prefix("tweets-")
            .suffix(".txt")
            .tempfile()
            .map_err(|e| ServiceError::Transport(format!("Failed to create tweets file: {}", e)))?;
        file.write_all(tweets.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| ServiceError::Transport(format!("Failed to write tweets file: {}", e)))?;
        Ok(file)
    }
}

#[async_trait]
impl Scheduler for CommandScheduler {
    async fn schedule(&self, tweets: &str) -> Result<ScheduleReceipt, ServiceError> {
        let tweets_file = Self::write_tweets_file(tweets)?;
        let path = tweets_file.path().to_string_lossy().into_owned();
        let (args, used_file_arg) = expand_args(&self.args, TWEETS_FILE_PLACEHOLDER, &path);

        tracing::info!(command = %self.command, tweets_file = %path, "Running scheduling script");

        let mut command = Command::new(&self.command);
        command
            .args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if used_file_arg {
            command.stdin(Stdio::null());
        } else {
            command.stdin(Stdio::piped());
        }

        let mut child = command.spawn().map_err(|e| {
            ServiceError::Transport(format!("Failed to spawn command {}: {}", self.command, e))
        })?;

        let run = async move {
            if let Some(mut stdin) = child.stdin.take() {
                match stdin.write_all(tweets.as_bytes()).await {
                    // Script exited without reading stdin; its exit status says why
                    Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                    Err(e) => {
                        return Err(ServiceError::Transport(format!(
                            "Failed to write to stdin: {}",
                            e
                        )));
                    }
                    Ok(()) => {}
                }
            }
            child
                .wait_with_output()
                .await
                .map_err(|e| ServiceError::Transport(e.to_string()))
        };

        let output = match tokio::time::timeout(self.timeout, run).await {
            Ok(result) => result?,
            Err(_) => {
                tracing::warn!(
                    command = %self.command,
                    timeout = ?self.timeout,
                    "Scheduling script timed out"
                );
                return Err(ServiceError::Timeout(self.timeout));
            }
        };
        drop(tweets_file);

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ServiceError::Service(format!(
                "Command exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        tracing::debug!(bytes = stdout.len(), "Scheduling script finished");

        Ok(ScheduleReceipt {
            message: "Tweets scheduled successfully".to_string(),
            output: Some(stdout),
        })
    }
}
