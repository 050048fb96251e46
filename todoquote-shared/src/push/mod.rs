/// Push-notification gateway client
///
/// Sends one message to many device registration ids through an FCM-style
/// HTTP endpoint (`POST {registration_ids, data}` authorized with
/// `Authorization: key=<server key>`).
///
/// The client never retries. A failed broadcast is reported to the caller,
/// which decides how loudly to surface it.
///
/// # Example
///
/// ```no_run
/// use todoquote_shared::push::{PushClient, PushConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = PushClient::new(PushConfig {
///     endpoint: "https://fcm.googleapis.com/fcm/send".to_string(),
///     server_key: Some("server-key".to_string()),
///     timeout_seconds: 10,
/// })?;
///
/// let report = client
///     .broadcast("Stay hungry", &["device-token".to_string()])
///     .await?;
/// println!("{} of {} delivered", report.success, report.recipients);
/// # Ok(())
/// # }
/// ```

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Default FCM legacy HTTP endpoint
pub const DEFAULT_ENDPOINT: &str = "https://fcm.googleapis.com/fcm/send";

/// Most registration ids the gateway accepts in one request
pub const MAX_IDS_PER_REQUEST: usize = 1000;

/// Gateway settings
#[derive(Debug, Clone)]
pub struct PushConfig {
    /// URL the broadcast is POSTed to
    pub endpoint: String,

    /// Server key, broadcasts fail with [`PushError::NotConfigured`] when unset
    pub server_key: Option<String>,

    /// Whole-request timeout
    pub timeout_seconds: u64,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            server_key: None,
            timeout_seconds: 10,
        }
    }
}

/// Push delivery errors
#[derive(Debug, Error)]
pub enum PushError {
    #[error("Push gateway is not configured")]
    NotConfigured,

    #[error("Push gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Push gateway rejected the broadcast with status {status}")]
    Rejected { status: u16 },
}

/// Outcome of one broadcast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BroadcastReport {
    /// Number of registration ids the message was addressed to
    pub recipients: usize,

    /// Deliveries the gateway accepted
    pub success: u64,

    /// Deliveries the gateway refused
    pub failure: u64,
}

#[derive(Debug, Serialize)]
struct BroadcastRequest<'a> {
    registration_ids: &'a [String],
    data: BroadcastData<'a>,
}

#[derive(Debug, Serialize)]
struct BroadcastData<'a> {
    message: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GatewayResponse {
    #[serde(default)]
    success: u64,
    #[serde(default)]
    failure: u64,
}

/// Cloneable handle to the gateway, shares one connection pool
#[derive(Debug, Clone)]
pub struct PushClient {
    http: reqwest::Client,
    config: PushConfig,
}

impl PushClient {
    /// Builds the HTTP client with the configured timeout
    pub fn new(config: PushConfig) -> Result<Self, PushError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { http, config })
    }

    /// Whether a server key is present
    pub fn is_configured(&self) -> bool {
        self.config
            .server_key
            .as_deref()
            .is_some_and(|key| !key.is_empty())
    }

    /// Sends `message` to every id in `registration_ids`.
    ///
    /// Ids go out in batches of [`MAX_IDS_PER_REQUEST`] and the per-batch
    /// counts are summed. With no recipients nothing is sent and an empty
    /// report is returned.
    ///
    /// # Errors
    ///
    /// - [`PushError::NotConfigured`] when there is no server key
    /// - [`PushError::Transport`] on connection failures and timeouts
    /// - [`PushError::Rejected`] on a non-2xx gateway status
    ///
    /// The first failing batch aborts the broadcast; later batches are not sent.
    pub async fn broadcast(
        &self,
        message: &str,
        registration_ids: &[String],
    ) -> Result<BroadcastReport, PushError> {
        let key = match self.config.server_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => return Err(PushError::NotConfigured),
        };

        if registration_ids.is_empty() {
            debug!("No push recipients, skipping broadcast");
            return Ok(BroadcastReport::default());
        }

        let mut report = BroadcastReport::default();
        for batch in registration_ids.chunks(MAX_IDS_PER_REQUEST) {
            let sent = self.send_batch(key, message, batch).await?;
            report.recipients += sent.recipients;
            report.success += sent.success;
            report.failure += sent.failure;
        }

        info!(
            recipients = report.recipients,
            success = report.success,
            failure = report.failure,
            "Push broadcast sent"
        );

        Ok(report)
    }

    async fn send_batch(
        &self,
        key: &str,
        message: &str,
        registration_ids: &[String],
    ) -> Result<BroadcastReport, PushError> {
        let body = BroadcastRequest {
            registration_ids,
            data: BroadcastData { message },
        };

        let response = self
            .http
            .post(&self.config.endpoint)
            .header(AUTHORIZATION, format!("key={}", key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PushError::Rejected {
                status: status.as_u16(),
            });
        }

        // Gateways that answer 2xx with an empty or foreign body count as
        // accepted for every recipient.
        let text = response.text().await?;
        let report = match serde_json::from_str::<GatewayResponse>(&text) {
            Ok(parsed) => BroadcastReport {
                recipients: registration_ids.len(),
                success: parsed.success,
                failure: parsed.failure,
            },
            Err(_) => BroadcastReport {
                recipients: registration_ids.len(),
                success: registration_ids.len() as u64,
                failure: 0,
            },
        };

        debug!(
            recipients = report.recipients,
            success = report.success,
            "Push batch sent"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer, key: Option<&str>) -> PushConfig {
        PushConfig {
            endpoint: format!("{}/fcm/send", server.uri()),
            server_key: key.map(str::to_string),
            timeout_seconds: 5,
        }
    }

    #[tokio::test]
    async fn test_broadcast_posts_ids_and_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/fcm/send"))
            .and(header("authorization", "key=secret"))
            .and(body_json(serde_json::json!({
                "registration_ids": ["a", "b"],
                "data": { "message": "Stay hungry" }
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"success": 1, "failure": 1})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = PushClient::new(config_for(&server, Some("secret"))).unwrap();
        let report = client
            .broadcast("Stay hungry", &["a".to_string(), "b".to_string()])
            .await
            .unwrap();

        assert_eq!(
            report,
            BroadcastReport {
                recipients: 2,
                success: 1,
                failure: 1
            }
        );
    }

    #[tokio::test]
    async fn test_broadcast_without_key_is_not_configured() {
        let server = MockServer::start().await;
        let client = PushClient::new(config_for(&server, None)).unwrap();

        assert!(!client.is_configured());
        let result = client.broadcast("hi", &["a".to_string()]).await;
        assert!(matches!(result, Err(PushError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_broadcast_with_no_recipients_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = PushClient::new(config_for(&server, Some("secret"))).unwrap();
        let report = client.broadcast("hi", &[]).await.unwrap();

        assert_eq!(report, BroadcastReport::default());
    }

    #[tokio::test]
    async fn test_gateway_error_status_is_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/fcm/send"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = PushClient::new(config_for(&server, Some("wrong"))).unwrap();
        let result = client.broadcast("hi", &["a".to_string()]).await;

        assert!(matches!(result, Err(PushError::Rejected { status: 401 })));
    }

    #[tokio::test]
    async fn test_unparseable_success_body_counts_all_delivered() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let client = PushClient::new(config_for(&server, Some("secret"))).unwrap();
        let report = client.broadcast("hi", &["a".to_string()]).await.unwrap();

        assert_eq!(report.recipients, 1);
        assert_eq!(report.success, 1);
        assert_eq!(report.failure, 0);
    }

    #[tokio::test]
    async fn test_large_broadcast_is_split_into_batches() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/fcm/send"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(3)
            .mount(&server)
            .await;

        let ids: Vec<String> = (0..MAX_IDS_PER_REQUEST * 2 + 1)
            .map(|n| format!("device-{}", n))
            .collect();

        let client = PushClient::new(config_for(&server, Some("secret"))).unwrap();
        let report = client.broadcast("hi", &ids).await.unwrap();

        assert_eq!(report.recipients, ids.len());
        assert_eq!(report.success, ids.len() as u64);
        assert_eq!(report.failure, 0);

        let requests = server.received_requests().await.unwrap();
        let sizes: Vec<usize> = requests
            .iter()
            .map(|request| {
                let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
                body["registration_ids"].as_array().unwrap().len()
            })
            .collect();
        assert_eq!(sizes, vec![1000, 1000, 1]);
    }
}
