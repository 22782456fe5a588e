//! Status-change alerting.
//!
//! An alert is raised only on a state transition, never on steady state or a
//! first-ever probe. Delivery is one-shot: no retry, no queue, no backoff —
//! a failed delivery is a terminal, logged event for that alert instance.

use crate::types::Check;
use async_trait::async_trait;
use common::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Outbound notification transport, addressed by owner id.
///
/// Credentials and wire details live behind this seam; the engine only
/// composes messages.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn send(&self, owner_id: &str, message: &str) -> Result<()>;
}

/// Formats and delivers state-transition alerts.
pub struct AlertDispatcher {
    gateway: Arc<dyn NotificationGateway>,
}

impl AlertDispatcher {
    pub fn new(gateway: Arc<dyn NotificationGateway>) -> Self {
        Self { gateway }
    }

    /// Compose the alert message for a check's current state.
    pub fn message(check: &Check) -> String {
        format!(
            "Alert: your check for {} {}://{} is currently {}",
            check.method.as_str().to_uppercase(),
            check.protocol,
            check.target,
            check.state,
        )
    }

    /// Deliver one alert.
    pub async fn alert(&self, check: &Check) {
        let message = Self::message(check);
        match self.gateway.send(&check.owner_id, &message).await {
            Ok(()) => {
                info!(id = %check.id, state = %check.state, "Alerted owner to status change");
            }
            Err(e) => {
                warn!(id = %check.id, error = %e, "Failed to deliver status-change alert");
            }
        }
    }
}

/// HTTP gateway adapter: posts each alert as form data to one endpoint.
pub struct HttpGateway {
    client: reqwest::Client,
    endpoint: String,
    sender: String,
    account: String,
    token: String,
}

impl HttpGateway {
    pub fn new(
        endpoint: impl Into<String>,
        sender: impl Into<String>,
        account: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(Error::notification)?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            sender: sender.into(),
            account: account.into(),
            token: token.into(),
        })
    }
}

#[async_trait]
impl NotificationGateway for HttpGateway {
    async fn send(&self, owner_id: &str, message: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.account, Some(&self.token))
            .form(&[
                ("From", self.sender.as_str()),
                ("To", owner_id),
                ("Body", message),
            ])
            .send()
            .await
            .map_err(Error::notification)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::notification(format!(
                "gateway returned status {}",
                response.status().as_u16()
            )))
        }
    }
}
