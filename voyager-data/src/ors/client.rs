//! HTTP-based `GeoService` backed by OpenRouteService.
//!
//! [`OrsGeoService`] implements the synchronous [`GeoService`] trait by
//! blocking on asynchronous `reqwest` calls, so the scheduler stays usable
//! from plain synchronous code.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;
use voyager_core::{Coordinate, GeoError, GeoService, GeocodeFocus, TravelProfile, TravelSegment};

use super::api::{GeocodeResponse, MatrixRequest, MatrixResponse, error_message};

/// Public OpenRouteService endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Default user agent for ORS requests.
pub const DEFAULT_USER_AGENT: &str = "voyager-engine/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Pause before the single retry of a rate-limited request.
const RATE_LIMIT_BACKOFF: Duration = Duration::from_secs(1);

/// Error type for [`OrsGeoService`] construction failures.
#[derive(Debug)]
pub enum ProviderBuildError {
    /// The configured base URL does not parse.
    InvalidBaseUrl(url::ParseError),
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
}

impl std::fmt::Display for ProviderBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBaseUrl(err) => write!(f, "invalid ORS base URL: {err}"),
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
        }
    }
}

impl std::error::Error for ProviderBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidBaseUrl(err) => Some(err),
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

/// Configuration for [`OrsGeoService`].
#[derive(Clone)]
pub struct OrsConfig {
    /// Base URL of the ORS deployment.
    pub base_url: String,
    /// API key sent in the `Authorization` header.
    pub api_key: Option<String>,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl std::fmt::Debug for OrsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrsConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for OrsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl OrsConfig {
    /// Create a configuration for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// OpenRouteService geocoding and matrix client.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the client drives requests on its own
/// `current_thread` runtime, reused across calls. Inside a multi-threaded
/// runtime it borrows that runtime's handle through
/// [`tokio::task::block_in_place`]. Inside a `current_thread` runtime it
/// falls back to its own runtime, which can deadlock if the caller's runtime
/// drives IO this request depends on.
///
/// # Rate limiting
///
/// A `429 Too Many Requests` answer is retried once after one second. Any
/// other error status is reported as [`GeoError::HttpError`].
pub struct OrsGeoService {
    client: Client,
    base_url: Url,
    config: OrsConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for OrsGeoService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrsGeoService")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl OrsGeoService {
    /// Create a client for the public ORS endpoint with the given key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(OrsConfig::default().with_api_key(api_key))
    }

    /// Create a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(config: OrsConfig) -> Result<Self, ProviderBuildError> {
        let base_url = Url::parse(&config.base_url).map_err(ProviderBuildError::InvalidBaseUrl)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            base_url,
            config,
            runtime,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &OrsConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    fn api_key(&self) -> Result<&str, GeoError> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(GeoError::MissingApiKey)
    }

    /// Query parameters for a Pelias search, with optional focus and
    /// boundary circle.
    fn geocode_params(query: &str, focus: Option<&GeocodeFocus>) -> Vec<(&'static str, String)> {
        let mut params = vec![("text", query.to_owned()), ("size", "1".to_owned())];
        if let Some(GeocodeFocus { center, radius_km }) = focus {
            params.push(("focus.point.lat", center.lat.to_string()));
            params.push(("focus.point.lon", center.lng.to_string()));
            if let Some(radius) = radius_km {
                params.push(("boundary.circle.lat", center.lat.to_string()));
                params.push(("boundary.circle.lon", center.lng.to_string()));
                params.push(("boundary.circle.radius", radius.to_string()));
            }
        }
        params
    }

    async fn geocode_async(
        &self,
        query: &str,
        focus: Option<&GeocodeFocus>,
    ) -> Result<Vec<Coordinate>, GeoError> {
        let key = self.api_key()?;
        let url = self.endpoint("geocode/search");
        let params = Self::geocode_params(query, focus);
        let response = self
            .send_with_retry(&url, || {
                self.client
                    .get(&url)
                    .header(reqwest::header::AUTHORIZATION, key)
                    .query(&params)
            })
            .await?;
        let body: GeocodeResponse = response.json().await.map_err(|err| GeoError::ParseError {
            message: err.to_string(),
        })?;
        let found = body.coordinates();
        log::debug!("geocoded {query:?} to {} candidate(s)", found.len());
        Ok(found)
    }

    async fn distance_async(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
        profile: TravelProfile,
    ) -> Result<Vec<TravelSegment>, GeoError> {
        let key = self.api_key()?;
        let url = self.endpoint(&format!("v2/matrix/{profile}"));
        let request = MatrixRequest::one_to_many(origin, destinations);
        let response = self
            .send_with_retry(&url, || {
                self.client
                    .post(&url)
                    .header(reqwest::header::AUTHORIZATION, key)
                    .json(&request)
            })
            .await?;
        let body: MatrixResponse = response.json().await.map_err(|err| GeoError::ParseError {
            message: err.to_string(),
        })?;
        let segments = body.into_segments(destinations.len())?;
        let unavailable = segments.iter().filter(|s| !s.is_available()).count();
        if unavailable > 0 {
            log::warn!(
                "ORS matrix returned no route for {unavailable} of {} destination(s)",
                destinations.len()
            );
        }
        Ok(segments)
    }

    /// Send a request, retrying once after a rate-limit answer.
    async fn send_with_retry<F>(&self, url: &str, build: F) -> Result<Response, GeoError>
    where
        F: Fn() -> RequestBuilder,
    {
        let first = build()
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?;
        let response = if first.status() == StatusCode::TOO_MANY_REQUESTS {
            log::warn!("ORS rate limit hit for {url}; retrying in {RATE_LIMIT_BACKOFF:?}");
            tokio::time::sleep(RATE_LIMIT_BACKOFF).await;
            build()
                .send()
                .await
                .map_err(|err| self.convert_reqwest_error(&err, url))?
        } else {
            first
        };
        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeoError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(response)
    }

    /// Convert a reqwest error to a `GeoError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> GeoError {
        if error.is_timeout() {
            return GeoError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return GeoError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        GeoError::NetworkError {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    /// Drive `future` to completion from synchronous code.
    fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

impl GeoService for OrsGeoService {
    fn geocode(
        &self,
        query: &str,
        focus: Option<&GeocodeFocus>,
    ) -> Result<Vec<Coordinate>, GeoError> {
        self.block_on(self.geocode_async(query, focus))
    }

    fn distance(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
        profile: TravelProfile,
    ) -> Result<Vec<TravelSegment>, GeoError> {
        if destinations.is_empty() {
            return Ok(Vec::new());
        }
        self.block_on(self.distance_async(origin, destinations, profile))
    }
}
