use url::Url;

use crate::config::Config;
use crate::core::constants::hls;
use crate::core::error::Result;
use crate::validation::manifest::ManifestResolver;
use crate::validation::prober::{Prober, build_http_client};

/// What kind of endpoint a stream URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    /// A direct audio stream; the initial probe verdict is authoritative
    Direct,
    /// An HLS manifest that must be resolved before a meaningful check
    Hls,
}

/// Every intermediate decision taken while validating one stream URL.
///
/// Produced by [`StreamValidator::validate_traced`] so the verbose single-URI
/// mode can show its work while sharing the exact policy code used for fleet
/// runs.
#[derive(Debug, Clone)]
pub struct ValidationTrace {
    pub kind: StreamKind,
    pub initial_reachable: bool,
    pub entry_count: Option<usize>,
    pub sampled_entry: Option<String>,
    pub sampled_reachable: Option<bool>,
    pub is_valid: bool,
}

/// Combines the reachability prober and manifest resolver into a single
/// liveness verdict per stream URL.
///
/// Stateless: each call is independent and performs reads and probes only.
#[derive(Debug, Clone)]
pub struct StreamValidator {
    prober: Prober,
    resolver: ManifestResolver,
}

impl StreamValidator {
    pub fn new(prober: Prober, resolver: ManifestResolver) -> Self {
        Self { prober, resolver }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = build_http_client(config)?;
        let timeout = config.timeout_duration();
        Ok(Self::new(
            Prober::new(client.clone(), timeout),
            ManifestResolver::new(client, timeout),
        ))
    }

    /// Whether the URI's path ends in the HLS manifest suffix.
    ///
    /// The check inspects the URL path so query strings do not defeat it;
    /// unparseable URIs fall back to a raw suffix check.
    pub fn is_hls_manifest(uri: &str) -> bool {
        match Url::parse(uri) {
            Ok(parsed) => parsed.path().ends_with(hls::MANIFEST_SUFFIX),
            Err(_) => uri.ends_with(hls::MANIFEST_SUFFIX),
        }
    }

    /// Validate a stream URL, returning the liveness verdict.
    pub async fn validate(&self, stream_url: &str) -> bool {
        self.validate_traced(stream_url).await.is_valid
    }

    /// Validate a stream URL, recording every intermediate decision.
    ///
    /// 1. Probe the URL itself; unreachable ends the check immediately.
    /// 2. Direct streams take the probe verdict as authoritative.
    /// 3. Manifests are resolved; an empty entry list is invalid, otherwise
    ///    only the first listed variant is probed and its verdict returned.
    pub async fn validate_traced(&self, stream_url: &str) -> ValidationTrace {
        let kind = if Self::is_hls_manifest(stream_url) {
            StreamKind::Hls
        } else {
            StreamKind::Direct
        };

        let mut trace = ValidationTrace {
            kind,
            initial_reachable: false,
            entry_count: None,
            sampled_entry: None,
            sampled_reachable: None,
            is_valid: false,
        };

        trace.initial_reachable = self.prober.probe(stream_url).await;
        if !trace.initial_reachable {
            return trace;
        }

        if kind == StreamKind::Direct {
            trace.is_valid = true;
            return trace;
        }

        let mut entries = self.resolver.resolve(stream_url).await;
        trace.entry_count = Some(entries.len());

        // Sampling only the first variant bounds cost; it is conventionally
        // the lowest-bitrate entry and assumed representative.
        if entries.is_empty() {
            return trace;
        }
        let first = entries.remove(0);
        let sampled_reachable = self.prober.probe(&first).await;
        trace.sampled_entry = Some(first);
        trace.sampled_reachable = Some(sampled_reachable);
        trace.is_valid = sampled_reachable;
        trace
    }
}
