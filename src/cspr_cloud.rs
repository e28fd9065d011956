use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::error::FetchError;
use crate::model::{EraId, ValidatorObservation};

/// Upper bound on reward samples considered per validator.
pub const REWARD_HISTORY_LIMIT: usize = 10;

/// Read-only view of the network's validator and reward state.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn latest_era(&self) -> Result<EraId, FetchError>;
    async fn top_validators(
        &self,
        era: EraId,
        limit: usize,
    ) -> Result<Vec<ValidatorObservation>, FetchError>;
    /// At most [`REWARD_HISTORY_LIMIT`] amounts, in API order.
    async fn reward_history(&self, public_key: &str) -> Result<Vec<f64>, FetchError>;
}

// ---------------------------------------------------------------------------
// API types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ApiEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct BlockEntry {
    era_id: EraId,
}

#[derive(Deserialize)]
struct ValidatorEntry {
    public_key: String,
    /// Motes; CSPR.cloud serializes U512 values as strings.
    #[serde(default)]
    total_stake: Value,
}

#[derive(Deserialize)]
struct RewardEntry {
    #[serde(default)]
    amount: Value,
}

fn decode_stake(raw: &Value) -> Option<u128> {
    match raw {
        Value::String(s) => s.trim().parse::<u128>().ok(),
        Value::Number(n) => n.as_u64().map(u128::from),
        _ => None,
    }
}

fn decode_amount(raw: &Value) -> Option<f64> {
    let amount = match raw {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }?;
    amount.is_finite().then_some(amount)
}

pub(crate) fn decode_envelope<T: DeserializeOwned>(
    endpoint: &str,
    body: &str,
) -> Result<T, FetchError> {
    serde_json::from_str::<ApiEnvelope<T>>(body)
        .map(|envelope| envelope.data)
        .map_err(|e| FetchError::Decode {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
}

pub(crate) fn parse_latest_era(body: &str) -> Result<EraId, FetchError> {
    let blocks: Vec<BlockEntry> = decode_envelope("blocks", body)?;
    blocks
        .first()
        .map(|b| b.era_id)
        .ok_or_else(|| FetchError::Empty {
            endpoint: "blocks".to_string(),
        })
}

pub(crate) fn parse_validators(body: &str) -> Result<Vec<ValidatorObservation>, FetchError> {
    let entries: Vec<ValidatorEntry> = decode_envelope("validators", body)?;
    let total = entries.len();
    let observations = entries
        .into_iter()
        .filter_map(|entry| {
            let stake = decode_stake(&entry.total_stake)?;
            let public_key = entry.public_key.trim().to_string();
            (!public_key.is_empty()).then_some(ValidatorObservation { public_key, stake })
        })
        .collect::<Vec<_>>();
    if observations.len() < total {
        tracing::debug!(
            "[DATA] Skipped {} validator entries with undecodable stake/key",
            total - observations.len()
        );
    }
    Ok(observations)
}

pub(crate) fn parse_rewards(body: &str) -> Result<Vec<f64>, FetchError> {
    let entries: Vec<RewardEntry> = decode_envelope("rewards", body)?;
    Ok(entries
        .iter()
        .filter_map(|e| decode_amount(&e.amount))
        .take(REWARD_HISTORY_LIMIT)
        .collect())
}

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

/// CSPR.cloud REST client. Every request carries the API key and a bounded timeout.
pub struct CsprCloudClient {
    base_url: Url,
    api_key: String,
    timeout: Duration,
    client: Client,
}

impl CsprCloudClient {
    pub fn new(base_url: Url, api_key: impl Into<String>, timeout: Duration) -> Self {
        let client = match Client::builder().timeout(timeout).build() {
            Ok(client) => client,
            Err(err) => {
                tracing::warn!(
                    "[DATA] Failed to construct timeout HTTP client: {}. Falling back to default client.",
                    err
                );
                Client::new()
            }
        };
        Self {
            base_url,
            api_key: api_key.into(),
            timeout,
            client,
        }
    }

    fn endpoint_url(&self, endpoint: &str, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl {
                endpoint: endpoint.to_string(),
                reason: format!("`{}` cannot be a base URL", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_body(
        &self,
        endpoint: &str,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(url)
            .header(AUTHORIZATION, &self.api_key)
            .query(query)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify_transport(endpoint, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
        resp.text()
            .await
            .map_err(|e| self.classify_transport(endpoint, e))
    }

    fn classify_transport(&self, endpoint: &str, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                endpoint: endpoint.to_string(),
                timeout_ms: self.timeout.as_millis().min(u64::MAX as u128) as u64,
            }
        } else {
            FetchError::Transport {
                endpoint: endpoint.to_string(),
                reason: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl DataSource for CsprCloudClient {
    async fn latest_era(&self) -> Result<EraId, FetchError> {
        let url = self.endpoint_url("blocks", &["blocks"])?;
        let query = [
            ("page", "1".to_string()),
            ("page_size", "1".to_string()),
            ("order_by", "block_height".to_string()),
            ("order_direction", "DESC".to_string()),
        ];
        let body = self.get_body("blocks", url, &query).await?;
        parse_latest_era(&body)
    }

    async fn top_validators(
        &self,
        era: EraId,
        limit: usize,
    ) -> Result<Vec<ValidatorObservation>, FetchError> {
        let url = self.endpoint_url("validators", &["validators"])?;
        let query = [
            ("era_id", era.to_string()),
            ("page", "1".to_string()),
            ("page_size", limit.to_string()),
            ("order_by", "total_stake".to_string()),
            ("order_direction", "DESC".to_string()),
        ];
        let body = self.get_body("validators", url, &query).await?;
        let mut validators = parse_validators(&body)?;
        validators.truncate(limit);
        Ok(validators)
    }

    async fn reward_history(&self, public_key: &str) -> Result<Vec<f64>, FetchError> {
        let url = self.endpoint_url("rewards", &["validators", public_key, "rewards"])?;
        let query = [
            ("page", "1".to_string()),
            ("page_size", REWARD_HISTORY_LIMIT.to_string()),
        ];
        let body = self.get_body("rewards", url, &query).await?;
        parse_rewards(&body)
    }
}
