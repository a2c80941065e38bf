//! HTTP adapters for the content and scheduling services

mod article;
mod hooks;
mod processor;
mod scheduler;
mod social;

pub use article::HttpArticleService;
pub use hooks::HttpHookSource;
pub(crate) use hooks::parse_hook_map;
pub use processor::HttpTweetProcessor;
pub use scheduler::HttpScheduler;
pub use social::HttpSocialMediaService;

use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;
use tweet_scheduler_domain::ServiceError;

/// Client shared by one service adapter, with the error mapping all services follow
#[derive(Clone)]
pub(crate) struct ServiceClient {
    client: Client,
    timeout: Duration,
    service: &'static str,
}

/// Error payload returned by the services with a non-2xx status
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ServiceClient {
    pub(crate) fn new(service: &'static str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            timeout,
            service,
        }
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    /// Send `request` and decode a JSON success body
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ServiceError> {
        let response = request.send().await.map_err(|e| self.transport(e))?;
        let response = self.check_status(response).await?;

        let body = response.bytes().await.map_err(|e| self.transport(e))?;
        serde_json::from_slice(&body).map_err(|e| {
            ServiceError::InvalidFormat(format!("{} response: {}", self.service, e))
        })
    }

    async fn check_status(&self, response: Response) -> Result<Response, ServiceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(
            service = self.service,
            status = %status,
            body = %body,
            "Service returned error status"
        );

        match serde_json::from_str::<ErrorBody>(&body) {
            Ok(payload) if !payload.error.trim().is_empty() => {
                Err(ServiceError::Service(payload.error))
            }
            _ => Err(ServiceError::Transport(format!(
                "{} returned HTTP {}",
                self.service,
                status.as_u16()
            ))),
        }
    }

    fn transport(&self, error: reqwest::Error) -> ServiceError {
        if error.is_timeout() {
            ServiceError::Timeout(self.timeout)
        } else {
            ServiceError::Transport(format!("{}: {}", self.service, error))
        }
    }
}
