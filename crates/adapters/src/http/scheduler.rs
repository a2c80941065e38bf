//! Scheduling service adapter

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tweet_scheduler_domain::{ScheduleReceipt, Scheduler, ServiceError};

use super::ServiceClient;

/// Posts `{ "tweets": ... }` to the scheduling back end
pub struct HttpScheduler {
    client: ServiceClient,
    endpoint: String,
}

impl HttpScheduler {
    pub fn new(endpoint: String, timeout: Duration) -> Self {
        Self {
            client: ServiceClient::new("Scheduling service", timeout),
            endpoint,
        }
    }
}

#[derive(Serialize)]
struct ScheduleRequest<'a> {
    tweets: &'a str,
}

#[async_trait]
impl Scheduler for HttpScheduler {
    async fn schedule(&self, tweets: &str) -> Result<ScheduleReceipt, ServiceError> {
        let request = self
            .client
            .client()
            .post(&self.endpoint)
            .json(&ScheduleRequest { tweets });

        self.client.send(request).await
    }
}
