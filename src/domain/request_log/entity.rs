//! Request log entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::cost_data::CountryCode;
use crate::domain::storage::{StorageEntity, StorageKey};

/// Request log ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestLogId(String);

impl StorageKey for RequestLogId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

impl RequestLogId {
    pub fn generate() -> Self {
        Self(format!("req-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestLogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolver operation being logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointKind {
    Country,
    City,
}

impl EndpointKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointKind::Country => "country",
            EndpointKind::City => "city",
        }
    }
}

impl std::fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One resolver call, successful or not
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestLog {
    pub id: RequestLogId,
    pub endpoint: EndpointKind,
    pub country_code: CountryCode,
    pub city_name: Option<String>,
    pub success: bool,
    pub response_time_ms: u64,
    pub error_message: Option<String>,
    /// Origin tag of the returned record
    pub data_source: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl StorageEntity for RequestLog {
    type Key = RequestLogId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

impl RequestLog {
    pub fn country(country_code: CountryCode) -> Self {
        Self::new(EndpointKind::Country, country_code, None)
    }

    pub fn city(country_code: CountryCode, city_name: impl Into<String>) -> Self {
        Self::new(EndpointKind::City, country_code, Some(city_name.into()))
    }

    fn new(endpoint: EndpointKind, country_code: CountryCode, city_name: Option<String>) -> Self {
        Self {
            id: RequestLogId::generate(),
            endpoint,
            country_code,
            city_name,
            success: false,
            response_time_ms: 0,
            error_message: None,
            data_source: None,
            created_at: Utc::now(),
        }
    }

    pub fn succeeded(mut self, data_source: impl Into<String>, response_time_ms: u64) -> Self {
        self.success = true;
        self.data_source = Some(data_source.into());
        self.response_time_ms = response_time_ms;
        self
    }

    pub fn failed(mut self, error_message: impl Into<String>, response_time_ms: u64) -> Self {
        self.success = false;
        self.error_message = Some(error_message.into());
        self.response_time_ms = response_time_ms;
        self
    }
}
