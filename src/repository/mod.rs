//! Station store access
//!
//! This module defines the repository boundary the validation engine talks
//! to, plus the REST-backed implementation used in production. Tests inject
//! fakes through the same trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use std::time::Duration;

use crate::config::Config;
use crate::core::constants::{env_vars, timeouts};
use crate::core::error::{Result, StreamsUpError};
use crate::core::types::Station;

/// Read/write access to the registered station fleet.
#[async_trait]
pub trait StationRepository: Send + Sync {
    /// Fetch the full station list. An error here is fatal to a run.
    async fn list_stations(&self) -> Result<Vec<Station>>;

    /// Write back one station's liveness verdict. Failures are station-scoped
    /// and absorbed by the caller.
    async fn update_station_status(&self, station_id: &str, is_online: bool) -> Result<()>;
}

/// Body of a status write-back, typed at the boundary.
#[derive(Debug, Serialize)]
struct StatusUpdate {
    is_online: bool,
    updated_at: DateTime<Utc>,
}

/// Station repository speaking a PostgREST-style HTTP API.
///
/// The endpoint and credential come from configuration (environment layer
/// included); the engine itself never reads the environment.
#[derive(Debug)]
pub struct RestStationRepository {
    client: reqwest::Client,
    base_url: String,
}

impl RestStationRepository {
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = config.api_url.clone().ok_or_else(|| {
            StreamsUpError::Config(format!(
                "No station API endpoint configured. Set {} or `api_url` in the config file.",
                env_vars::API_URL
            ))
        })?;

        let mut headers = HeaderMap::new();
        if let Some(ref api_key) = config.api_key {
            let value = HeaderValue::from_str(api_key).map_err(|_| {
                StreamsUpError::Config(
                    "Station API credential contains characters not valid in a header".to_string(),
                )
            })?;
            headers.insert("apikey", value);
            let bearer =
                HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|_| {
                    StreamsUpError::Config(
                        "Station API credential contains characters not valid in a header"
                            .to_string(),
                    )
                })?;
            headers.insert(AUTHORIZATION, bearer);
        }

        let user_agent = config.user_agent.as_deref().unwrap_or(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts::REPOSITORY_TIMEOUT_SECONDS))
            .default_headers(headers)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn stations_endpoint(&self) -> String {
        format!(
            "{}/stations?select=id,name,stream_url,is_online,updated_at",
            self.base_url
        )
    }

    fn station_endpoint(&self, station_id: &str) -> String {
        format!("{}/stations?id=eq.{}", self.base_url, station_id)
    }
}

#[async_trait]
impl StationRepository for RestStationRepository {
    async fn list_stations(&self) -> Result<Vec<Station>> {
        let response = self.client.get(self.stations_endpoint()).send().await?;

        if !response.status().is_success() {
            return Err(StreamsUpError::Repository(format!(
                "Station list request failed with status {}",
                response.status().as_u16()
            )));
        }

        Ok(response.json::<Vec<Station>>().await?)
    }

    async fn update_station_status(&self, station_id: &str, is_online: bool) -> Result<()> {
        let update = StatusUpdate {
            is_online,
            updated_at: Utc::now(),
        };

        let response = self
            .client
            .patch(self.station_endpoint(station_id))
            .json(&update)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StreamsUpError::Repository(format!(
                "Status update for station '{}' failed with status {}",
                station_id,
                response.status().as_u16()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use mockito::{Matcher, Server};

    fn repository_for(server: &Server) -> RestStationRepository {
        let config = Config {
            api_url: Some(server.url()),
            api_key: Some("service-key".to_string()),
            ..Default::default()
        };
        RestStationRepository::from_config(&config).unwrap()
    }

    #[test]
    fn test_from_config__requires_api_url() {
        let config = Config::default();
        let result = RestStationRepository::from_config(&config);

        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("No station API endpoint configured")
        );
    }

    #[test]
    fn test_from_config__strips_trailing_slash() {
        let config = Config {
            api_url: Some("https://store.test/rest/v1/".to_string()),
            ..Default::default()
        };
        let repository = RestStationRepository::from_config(&config).unwrap();

        assert_eq!(
            repository.station_endpoint("abc"),
            "https://store.test/rest/v1/stations?id=eq.abc"
        );
    }

    #[tokio::test]
    async fn test_list_stations__returns_typed_records() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/stations")
            .match_query(Matcher::UrlEncoded(
                "select".into(),
                "id,name,stream_url,is_online,updated_at".into(),
            ))
            .match_header("apikey", "service-key")
            .match_header("authorization", "Bearer service-key")
            .with_status(200)
            .with_body(
                r#"[
                    {"id": "s1", "name": "Jazz 24/7", "stream_url": "https://radio.test/jazz", "is_online": true, "updated_at": "2026-01-01T00:00:00Z"},
                    {"id": "s2", "name": "News", "stream_url": "https://radio.test/news.m3u8", "is_online": false, "updated_at": null}
                ]"#,
            )
            .create();

        let stations = repository_for(&server).list_stations().await.unwrap();

        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].id, "s1");
        assert!(stations[0].is_online);
        assert_eq!(stations[1].stream_url, "https://radio.test/news.m3u8");
        assert!(stations[1].updated_at.is_none());
    }

    #[tokio::test]
    async fn test_list_stations__propagates_server_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/stations")
            .match_query(Matcher::Any)
            .with_status(503)
            .create();

        let result = repository_for(&server).list_stations().await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_list_stations__propagates_malformed_body() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/stations")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create();

        assert!(repository_for(&server).list_stations().await.is_err());
    }

    #[tokio::test]
    async fn test_update_station_status__patches_verdict_and_timestamp() {
        let mut server = Server::new_async().await;
        let patch = server
            .mock("PATCH", "/stations")
            .match_query(Matcher::UrlEncoded("id".into(), "eq.s1".into()))
            .match_body(Matcher::PartialJson(
                serde_json::json!({"is_online": false}),
            ))
            .with_status(204)
            .expect(1)
            .create();

        repository_for(&server)
            .update_station_status("s1", false)
            .await
            .unwrap();

        patch.assert();
    }

    #[tokio::test]
    async fn test_update_station_status__propagates_failure() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("PATCH", "/stations")
            .match_query(Matcher::Any)
            .with_status(500)
            .create();

        let result = repository_for(&server)
            .update_station_status("s1", true)
            .await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("s1"));
    }
}
