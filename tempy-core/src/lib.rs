//! Core library for the `tempy` CLI.
//!
//! This crate defines:
//! - rc file handling and the command line / rc file precedence merge
//! - Access to weatherapi.com, directly or through the public proxy
//! - Normalization of the forecast payload into a render-ready report
//!
//! It is used by `tempy-cli`, but has no terminal or argument parsing concerns of its own.

pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod rc;

pub use config::{RawConfig, ResolvedConfig, Units, resolve};
pub use error::{Result, TempyError};
pub use model::{ForecastTable, NormalizedReport, RawWeatherPayload, Row, WeatherTable};
pub use normalize::normalize;
pub use provider::{ProviderId, WeatherProvider, provider_for};
pub use rc::RcStore;
