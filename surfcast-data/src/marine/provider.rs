//! HTTP-based `MarineDataSource` over Open-Meteo and NOAA CO-OPS.
//!
//! The [`MarineDataSource`] trait is synchronous to keep the pipeline
//! embeddable in synchronous contexts. This source bridges the async HTTP
//! calls to the sync interface by blocking on a Tokio runtime internally.

use std::future::Future;
use std::time::Duration;

use futures_util::future::join_all;
use geo::Coord;
use reqwest::Client;
use surfcast_core::{
    FetchError, MarineDataSource, MarineRequest, MarineSnapshot, StationReading, TideSeries,
    collect_tide,
};
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::noaa::decode_tide;
use super::open_meteo::{FORECAST_VARIABLES, MARINE_VARIABLES, decode_stations};

/// Error type for [`HttpMarineSource`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// A configured base URL could not be parsed.
    #[error("invalid {endpoint} base URL {url:?}")]
    InvalidBaseUrl {
        /// Which endpoint the URL was configured for.
        endpoint: &'static str,
        /// The rejected value.
        url: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime")]
    Runtime(#[source] std::io::Error),
}

/// Default user agent for upstream requests.
pub const DEFAULT_USER_AGENT: &str = "surfcast/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

const DEFAULT_MARINE_BASE_URL: &str = "https://marine-api.open-meteo.com";
const DEFAULT_FORECAST_BASE_URL: &str = "https://api.open-meteo.com";
const DEFAULT_TIDE_BASE_URL: &str = "https://api.tidesandcurrents.noaa.gov";

/// Configuration for [`HttpMarineSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpMarineSourceConfig {
    /// Base URL of the marine service (waves, swell, sea temperature).
    pub marine_base_url: String,
    /// Base URL of the forecast service (wind, air temperature).
    pub forecast_base_url: String,
    /// Base URL of the tide-gauge service.
    pub tide_base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpMarineSourceConfig {
    fn default() -> Self {
        Self {
            marine_base_url: DEFAULT_MARINE_BASE_URL.to_owned(),
            forecast_base_url: DEFAULT_FORECAST_BASE_URL.to_owned(),
            tide_base_url: DEFAULT_TIDE_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpMarineSourceConfig {
    /// Set the marine service base URL.
    #[must_use]
    pub fn with_marine_base_url(mut self, url: impl Into<String>) -> Self {
        self.marine_base_url = url.into();
        self
    }

    /// Set the forecast service base URL.
    #[must_use]
    pub fn with_forecast_base_url(mut self, url: impl Into<String>) -> Self {
        self.forecast_base_url = url.into();
        self
    }

    /// Set the tide service base URL.
    #[must_use]
    pub fn with_tide_base_url(mut self, url: impl Into<String>) -> Self {
        self.tide_base_url = url.into();
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

#[derive(Debug, Clone)]
struct Endpoints {
    marine: Url,
    forecast: Url,
    tide: Url,
}

impl Endpoints {
    fn new(config: &HttpMarineSourceConfig) -> Result<Self, ProviderBuildError> {
        Ok(Self {
            marine: endpoint("marine", &config.marine_base_url, "v1/marine")?,
            forecast: endpoint("forecast", &config.forecast_base_url, "v1/forecast")?,
            tide: endpoint("tide", &config.tide_base_url, "api/prod/datagetter")?,
        })
    }
}

fn endpoint(name: &'static str, base: &str, path: &str) -> Result<Url, ProviderBuildError> {
    let raw = format!("{}/{path}", base.trim_end_matches('/'));
    Url::parse(&raw).map_err(|source| ProviderBuildError::InvalidBaseUrl {
        endpoint: name,
        url: base.to_owned(),
        source,
    })
}

type Decoder<T> = fn(&str, &[u8]) -> Result<T, FetchError>;

/// Marine data source backed by Open-Meteo and NOAA CO-OPS.
///
/// Owns a Tokio runtime that is reused across calls.
///
/// # Runtime behaviour
///
/// When called from outside any Tokio runtime, the source uses its own
/// stored runtime. When called from within a multi-threaded Tokio runtime it
/// uses that runtime's handle with [`tokio::task::block_in_place`]. Inside a
/// `current_thread` runtime it falls back to its own runtime, which may
/// deadlock if the caller's runtime drives IO this request depends on.
///
/// # Concurrency
///
/// [`MarineDataSource::fetch_snapshot`] issues the wave request, the wind
/// request and every tide request concurrently.
pub struct HttpMarineSource {
    client: Client,
    config: HttpMarineSourceConfig,
    endpoints: Endpoints,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpMarineSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMarineSource")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl HttpMarineSource {
    /// Create a source using the public services.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new() -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpMarineSourceConfig::default())
    }

    /// Create a source with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a base URL is invalid or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn with_config(config: HttpMarineSourceConfig) -> Result<Self, ProviderBuildError> {
        let endpoints = Endpoints::new(&config)?;
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
            config,
            endpoints,
            runtime,
        })
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &HttpMarineSourceConfig {
        &self.config
    }

    fn marine_url(&self, stations: &[Coord<f64>]) -> Url {
        open_meteo_url(&self.endpoints.marine, stations, MARINE_VARIABLES, &[])
    }

    fn forecast_url(&self, stations: &[Coord<f64>]) -> Url {
        open_meteo_url(
            &self.endpoints.forecast,
            stations,
            FORECAST_VARIABLES,
            &[("wind_speed_unit", "kn")],
        )
    }

    fn tide_url(&self, station_id: &str) -> Url {
        let mut url = self.endpoints.tide.clone();
        url.query_pairs_mut()
            .append_pair("product", "water_level")
            .append_pair("station", station_id)
            .append_pair("date", "recent")
            .append_pair("datum", "MLLW")
            .append_pair("units", "english")
            .append_pair("time_zone", "gmt")
            .append_pair("format", "json")
            .append_pair("application", "surfcast");
        url
    }

    /// Issue a GET request and decode the body.
    async fn fetch<T>(&self, url: Url, decode: Decoder<T>) -> Result<T, FetchError> {
        log::debug!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?;
        let body = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?;
        decode(url.as_str(), &body)
    }

    async fn fetch_snapshot_async(
        &self,
        request: &MarineRequest,
    ) -> Result<MarineSnapshot, FetchError> {
        let tide_requests = request.tide_stations.iter().map(|station| async move {
            let outcome = self
                .fetch(self.tide_url(&station.station_id), decode_tide)
                .await;
            (station, outcome)
        });
        let (waves, wind, tides) = tokio::join!(
            self.fetch(self.marine_url(&request.stations), decode_stations),
            self.fetch(self.forecast_url(&request.stations), decode_stations),
            join_all(tide_requests),
        );
        let tides = tides
            .into_iter()
            .filter_map(|(station, outcome)| collect_tide(station, outcome))
            .collect();
        Ok(MarineSnapshot {
            waves: waves?,
            wind: wind?,
            tides,
        })
    }

    /// Convert a reqwest error to a `FetchError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> FetchError {
        if error.is_timeout() {
            return FetchError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return FetchError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        FetchError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    /// Drive `future` to completion from synchronous code.
    fn block_on<F: Future>(&self, future: F) -> F::Output {
        // Only a multi-thread runtime can host block_in_place.
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

fn open_meteo_url(
    endpoint: &Url,
    stations: &[Coord<f64>],
    variables: &str,
    extra: &[(&str, &str)],
) -> Url {
    let mut url = endpoint.clone();
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("latitude", &join_axis(stations, |coord| coord.y))
            .append_pair("longitude", &join_axis(stations, |coord| coord.x))
            .append_pair("current", variables)
            .append_pair("hourly", variables)
            .append_pair("temperature_unit", "fahrenheit")
            .append_pair("timezone", "GMT")
            .append_pair("forecast_days", "1");
        query.extend_pairs(extra);
    }
    url
}

fn join_axis(stations: &[Coord<f64>], axis: fn(&Coord<f64>) -> f64) -> String {
    stations
        .iter()
        .map(|coord| format!("{:.4}", axis(coord)))
        .collect::<Vec<_>>()
        .join(",")
}

impl MarineDataSource for HttpMarineSource {
    fn fetch_waves(&self, stations: &[Coord<f64>]) -> Result<Vec<StationReading>, FetchError> {
        if stations.is_empty() {
            return Err(FetchError::NoStations);
        }
        self.block_on(self.fetch(self.marine_url(stations), decode_stations))
    }

    fn fetch_wind(&self, stations: &[Coord<f64>]) -> Result<Vec<StationReading>, FetchError> {
        if stations.is_empty() {
            return Err(FetchError::NoStations);
        }
        self.block_on(self.fetch(self.forecast_url(stations), decode_stations))
    }

    fn fetch_tide(&self, station_id: &str) -> Result<TideSeries, FetchError> {
        self.block_on(self.fetch(self.tide_url(station_id), decode_tide))
    }

    /// Fetch waves, wind and every tide station concurrently.
    ///
    /// # Runtime requirements
    ///
    /// When called from within an existing Tokio runtime, the runtime must be
    /// multi-threaded. See [`HttpMarineSource`].
    fn fetch_snapshot(&self, request: &MarineRequest) -> Result<MarineSnapshot, FetchError> {
        if request.stations.is_empty() {
            return Err(FetchError::NoStations);
        }
        self.block_on(self.fetch_snapshot_async(request))
    }
}
