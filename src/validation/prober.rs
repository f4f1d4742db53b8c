use reqwest::redirect::Policy;
use std::time::Duration;

use crate::config::Config;
use crate::core::error::Result;
use crate::reporting::logging;

/// Build the HTTP client shared by the probing and manifest-fetching paths.
///
/// The client carries no total timeout of its own; each request is bounded
/// individually so a slow manifest fetch cannot inherit stale limits.
pub(crate) fn build_http_client(config: &Config) -> Result<reqwest::Client> {
    let user_agent = config.user_agent.as_deref().unwrap_or(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));

    let mut client_builder = reqwest::Client::builder()
        .redirect(Policy::limited(10))
        .user_agent(user_agent)
        .tcp_keepalive(Duration::from_secs(60));

    // SSL verification
    if config.skip_ssl_verification.unwrap_or(false) {
        client_builder = client_builder.danger_accept_invalid_certs(true);
    }

    // Proxy configuration
    if let Some(ref proxy_url) = config.proxy
        && let Ok(proxy) = reqwest::Proxy::all(proxy_url)
    {
        client_builder = client_builder.proxy(proxy);
    }

    Ok(client_builder.build()?)
}

/// Issues a single bounded-time request and reports whether the endpoint
/// answered at all.
///
/// Header arrival is the success evidence: `send()` resolves as soon as the
/// response headers are in, and the response is dropped without ever reading
/// the body. A timeout surfaces as its own error kind, so an endpoint that
/// never produced headers can never be mistaken for a live one.
#[derive(Debug, Clone)]
pub struct Prober {
    client: reqwest::Client,
    timeout: Duration,
}

impl Prober {
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            build_http_client(config)?,
            config.timeout_duration(),
        ))
    }

    /// Probe a URI for reachability. Never fails; all transport errors
    /// degrade to `false`.
    pub async fn probe(&self, uri: &str) -> bool {
        match self.client.get(uri).timeout(self.timeout).send().await {
            Ok(response) => {
                // Headers are in; the body is intentionally never read.
                logging::log_probe_result(uri, Some(response.status().as_u16()), None);
                true
            }
            Err(err) => {
                let description = if err.is_timeout() {
                    "timed out".to_string()
                } else {
                    std::error::Error::source(&err)
                        .map(|e| e.to_string())
                        .unwrap_or_else(|| err.to_string())
                };
                logging::log_probe_result(uri, None, Some(&description));
                false
            }
        }
    }
}
