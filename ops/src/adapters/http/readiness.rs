//! HTTP readiness probe

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};

use crate::domain::ports::ReadinessProbe;
use crate::error::ProbeError;

/// Treats any HTTP response as "listening"
///
/// A login redirect or a 404 still means the server is up, so redirects are
/// not followed and status codes are ignored.
#[derive(Debug, Clone)]
pub struct HttpReadinessProbe {
    http: Client,
}

impl HttpReadinessProbe {
    pub fn new() -> Result<Self, ProbeError> {
        let http = Client::builder().redirect(Policy::none()).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl ReadinessProbe for HttpReadinessProbe {
    async fn is_ready(&self, url: &str, timeout: Duration) -> bool {
        match self.http.get(url).timeout(timeout).send().await {
            Ok(response) => {
                tracing::debug!(url, status = %response.status(), "Server answered");
                true
            }
            Err(e) => {
                tracing::trace!(url, error = %e, "Server not answering yet");
                false
            }
        }
    }
}
