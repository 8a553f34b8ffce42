//! Open-Meteo geocoding adapter - City coordinates and population

use async_trait::async_trait;
use serde::Deserialize;

use super::http_client::HttpClient;
use crate::domain::cost_data::{CityLookup, CityPatch, DataQuality};
use crate::domain::{DataSource, DomainError};

pub const OPEN_METEO_SOURCE: &str = "open-meteo";
pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com";

/// Candidates requested per search; the first one in the right country wins
const SEARCH_RESULT_COUNT: &str = "10";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<GeoResult>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    latitude: f64,
    longitude: f64,
    country_code: Option<String>,
    population: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct OpenMeteoGeocodingSource {
    http: HttpClient,
    base_url: String,
}

impl OpenMeteoGeocodingSource {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl DataSource<CityLookup, CityPatch> for OpenMeteoGeocodingSource {
    fn name(&self) -> &'static str {
        OPEN_METEO_SOURCE
    }

    async fn fetch(&self, query: &CityLookup) -> Result<Option<CityPatch>, DomainError> {
        let url = format!("{}/v1/search", self.base_url);
        let response: Option<SearchResponse> = self
            .http
            .get_json(
                OPEN_METEO_SOURCE,
                &url,
                &[
                    ("name", query.key.name()),
                    ("count", SEARCH_RESULT_COUNT),
                    ("language", "en"),
                    ("format", "json"),
                ],
            )
            .await?;

        let country = query.key.country_code().as_str();
        let result = response.and_then(|r| {
            r.results.into_iter().find(|result| {
                result
                    .country_code
                    .as_deref()
                    .is_some_and(|code| code.eq_ignore_ascii_case(country))
            })
        });

        Ok(result.map(|result| {
            let mut patch = CityPatch::new(OPEN_METEO_SOURCE, DataQuality::Verified);
            patch.latitude = Some(result.latitude);
            patch.longitude = Some(result.longitude);
            patch.population = result.population;
            patch
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::domain::cost_data::{CityKey, CountryCode};

    fn source(server: &MockServer) -> OpenMeteoGeocodingSource {
        let http = HttpClient::with_timeout(Duration::from_secs(2)).unwrap();
        OpenMeteoGeocodingSource::new(http, server.uri())
    }

    fn lookup(name: &str, code: &str) -> CityLookup {
        CityLookup {
            key: CityKey::new(name, CountryCode::parse(code).unwrap()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_picks_first_result_in_requested_country() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "Busan"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {"name": "Busan", "latitude": 1.0, "longitude": 2.0, "country_code": "PH"},
                    {"name": "Busan", "latitude": 35.1, "longitude": 129.04,
                     "country_code": "KR", "population": 3678555}
                ]
            })))
            .mount(&server)
            .await;

        let patch = source(&server)
            .fetch(&lookup("Busan", "KR"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(patch.latitude, Some(35.1));
        assert_eq!(patch.population, Some(3_678_555));
        assert_eq!(patch.multipliers, None);
        assert_eq!(patch.data_source, "open-meteo");
    }

    #[tokio::test]
    async fn test_no_results_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "generationtime_ms": 0.5
            })))
            .mount(&server)
            .await;

        let patch = source(&server).fetch(&lookup("Nowhere", "KR")).await.unwrap();
        assert_eq!(patch, None);
    }

    #[tokio::test]
    async fn test_other_country_only_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"latitude": 1.0, "longitude": 2.0, "country_code": "US"}]
            })))
            .mount(&server)
            .await;

        let patch = source(&server).fetch(&lookup("Paris", "FR")).await.unwrap();
        assert_eq!(patch, None);
    }
}
