use std::time::Duration;
use url::Url;

use crate::config::Config;
use crate::core::constants::hls;
use crate::core::error::Result;
use crate::reporting::logging;
use crate::validation::prober::build_http_client;

/// Fetches an HLS playlist document and extracts its stream-entry URIs.
///
/// Only one level of manifest is parsed; nested playlists referenced by an
/// entry are not resolved further.
#[derive(Debug, Clone)]
pub struct ManifestResolver {
    client: reqwest::Client,
    timeout: Duration,
}

impl ManifestResolver {
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            build_http_client(config)?,
            config.timeout_duration(),
        ))
    }

    /// Fetch and parse a manifest, returning resolved absolute entry URIs in
    /// file order. Every failure mode degrades to an empty sequence.
    pub async fn resolve(&self, manifest_uri: &str) -> Vec<String> {
        let response = match self
            .client
            .get(manifest_uri)
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                logging::log_manifest_failure(manifest_uri, &err.to_string());
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            logging::log_manifest_failure(
                manifest_uri,
                &format!("status {}", response.status().as_u16()),
            );
            return Vec::new();
        }

        let document = match response.text().await {
            Ok(document) => document,
            Err(err) => {
                logging::log_manifest_failure(manifest_uri, &err.to_string());
                return Vec::new();
            }
        };

        parse_manifest(&document, manifest_uri)
    }
}

/// Extract stream-entry URIs from a playlist document.
///
/// Directive (`#...`) and blank lines are skipped. Absolute `http(s)` entries
/// are kept verbatim; anything else is resolved as a relative reference
/// against the manifest's own URI, and lines that fail to resolve are dropped.
/// First entry is conventionally the lowest-bitrate variant.
pub fn parse_manifest(document: &str, base_uri: &str) -> Vec<String> {
    let base = Url::parse(base_uri).ok();

    document
        .lines()
        .filter_map(|line| {
            let entry = line.trim();
            if entry.is_empty() || entry.starts_with(hls::DIRECTIVE_PREFIX) {
                return None;
            }
            if entry.starts_with("http://") || entry.starts_with("https://") {
                return Some(entry.to_string());
            }
            base.as_ref()?.join(entry).ok().map(String::from)
        })
        .collect()
}
