//! HTTP-backed marine data source.
//!
//! [`HttpMarineSource`] implements [`surfcast_core::MarineDataSource`] against
//! three upstream services:
//!
//! - an Open-Meteo-compatible marine endpoint (`/v1/marine`) for waves,
//!   swell and sea-surface temperature;
//! - an Open-Meteo-compatible forecast endpoint (`/v1/forecast`) for wind and
//!   air temperature;
//! - a NOAA CO-OPS-compatible `datagetter` endpoint for tide-gauge water
//!   levels.
//!
//! All query coordinates go into a single marine and a single forecast
//! request. Tide stations are queried one request each. The synchronous
//! trait is implemented by blocking on the async requests internally.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use surfcast_core::{MarineDataSource, MarineRequest, SectionRegistry};
//! use surfcast_data::marine::{HttpMarineSource, HttpMarineSourceConfig};
//!
//! let config = HttpMarineSourceConfig::default()
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("my-app/1.0");
//! let source = HttpMarineSource::with_config(config)?;
//!
//! let request = MarineRequest::from_registry(&SectionRegistry::san_diego());
//! let snapshot = source.fetch_snapshot(&request)?;
//! println!("{} wave stations", snapshot.waves.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod noaa;
mod open_meteo;
mod provider;

#[cfg(any(test, feature = "test-support"))]
#[doc(hidden)]
pub mod test_support;

pub use provider::{
    DEFAULT_USER_AGENT, HttpMarineSource, HttpMarineSourceConfig, ProviderBuildError,
};
