//! Shared outbound HTTP plumbing for provider clients.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};

use crate::config::HttpConfig;
use crate::error::{AssistantError, Result};

/// Client with the configured per-call timeout
pub(crate) fn build_client(http: &HttpConfig) -> Client {
    Client::builder()
        .timeout(http.timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Run `op`, retrying transient failures up to `max_retries` times with
/// exponential backoff starting at 250ms.
pub(crate) async fn with_retries<T, F, Fut>(
    provider: &'static str,
    max_retries: u32,
    mut op: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Err(e) if e.is_retryable() && attempt < max_retries => {
                let delay = Duration::from_millis(250 << attempt.min(4));
                attempt += 1;
                tracing::debug!(provider, attempt, error = %e, "Retrying provider call");
                tokio::time::sleep(delay).await;
            }
            other => return other,
        }
    }
}

/// Split a response into its status and body text
pub(crate) async fn read_body(provider: &'static str, response: Response) -> Result<(StatusCode, String)> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| AssistantError::transport(provider, e))?;
    Ok((status, body))
}

/// Error for a non-2xx status when the body carried no better message
pub(crate) fn status_error(provider: &'static str, status: StatusCode) -> AssistantError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        AssistantError::RateLimited { provider }
    } else {
        AssistantError::Http {
            provider,
            status: status.as_u16(),
        }
    }
}
