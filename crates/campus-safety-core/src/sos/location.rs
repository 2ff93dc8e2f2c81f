//! Single-shot location requests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Parameters for one location update. The provider delivers at most one fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRequest {
    pub high_accuracy: bool,
    pub interval_ms: u64,
    pub min_update_interval_ms: u64,
}

impl Default for LocationRequest {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            interval_ms: 5_000,
            min_update_interval_ms: 1_000,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("location permission not granted")]
    PermissionDenied,

    #[error("location unavailable: {0}")]
    Unavailable(String),
}

/// The device's location fix source.
///
/// One call is one request: it resolves once, with a fix, with `None` when
/// the provider produced no result, or with an error.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn request_location(
        &self,
        request: &LocationRequest,
    ) -> Result<Option<GeoPoint>, LocationError>;
}

/// How the location part of one SOS went.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LocationStatus {
    NotRequested,
    Fixed { point: GeoPoint },
    NoFix,
    PermissionDenied,
    Unavailable { reason: String },
    TimedOut { after_ms: u64 },
}

impl LocationStatus {
    pub fn point(&self) -> Option<GeoPoint> {
        match self {
            LocationStatus::Fixed { point } => Some(*point),
            _ => None,
        }
    }

    fn from_result(result: Result<Option<GeoPoint>, LocationError>) -> Self {
        match result {
            Ok(Some(point)) => LocationStatus::Fixed { point },
            Ok(None) => LocationStatus::NoFix,
            Err(LocationError::PermissionDenied) => LocationStatus::PermissionDenied,
            Err(LocationError::Unavailable(reason)) => LocationStatus::Unavailable { reason },
        }
    }
}

/// Issue one request and wait at most `timeout` for it.
pub async fn fetch_once(
    provider: &dyn LocationProvider,
    request: &LocationRequest,
    timeout: Duration,
) -> LocationStatus {
    match tokio::time::timeout(timeout, provider.request_location(request)).await {
        Ok(result) => LocationStatus::from_result(result),
        Err(_) => LocationStatus::TimedOut {
            after_ms: timeout.as_millis() as u64,
        },
    }
}

/// A provider that always answers with the same result.
#[derive(Debug, Clone)]
pub struct StaticLocation {
    result: Result<Option<GeoPoint>, LocationError>,
}

impl StaticLocation {
    pub fn at(point: GeoPoint) -> Self {
        Self { result: Ok(Some(point)) }
    }

    pub fn no_fix() -> Self {
        Self { result: Ok(None) }
    }

    pub fn denied() -> Self {
        Self {
            result: Err(LocationError::PermissionDenied),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            result: Err(LocationError::Unavailable(reason.into())),
        }
    }
}

#[async_trait]
impl LocationProvider for StaticLocation {
    async fn request_location(
        &self,
        _request: &LocationRequest,
    ) -> Result<Option<GeoPoint>, LocationError> {
        self.result.clone()
    }
}
