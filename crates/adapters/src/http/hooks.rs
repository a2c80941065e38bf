//! Remote hook data source

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tweet_scheduler_domain::{HookCategory, HookSource, ServiceError};

use super::ServiceClient;

/// Fetches `GET {endpoint}`: a JSON object of category id to `{ title, examples }`
pub struct HttpHookSource {
    client: ServiceClient,
    endpoint: String,
}

impl HttpHookSource {
    pub fn new(endpoint: String, timeout: Duration) -> Self {
        Self {
            client: ServiceClient::new("Hook source", timeout),
            endpoint,
        }
    }
}

#[derive(Deserialize)]
struct HookEntry {
    title: String,
    #[serde(default)]
    examples: Vec<String>,
}

/// Convert the ordered hook mapping into categories, keeping key order
pub(crate) fn parse_hook_map(
    map: serde_json::Map<String, serde_json::Value>,
) -> Result<Vec<HookCategory>, ServiceError> {
    map.into_iter()
        .map(|(id, value)| {
            let entry: HookEntry = serde_json::from_value(value).map_err(|e| {
                ServiceError::InvalidFormat(format!("hook category '{}': {}", id, e))
            })?;
            Ok(HookCategory {
                id,
                title: entry.title,
                examples: entry.examples,
            })
        })
        .collect()
}

#[async_trait]
impl HookSource for HttpHookSource {
    async fn fetch(&self) -> Result<Vec<HookCategory>, ServiceError> {
        let request = self.client.client().get(&self.endpoint);
        let map: serde_json::Map<String, serde_json::Value> = self.client.send(request).await?;

        parse_hook_map(map)
    }
}
