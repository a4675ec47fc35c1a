//! Core library for the `informer` CLI.
//!
//! This crate defines:
//! - A single-flight client for the Yandex weather informers endpoint
//! - The condition catalog and comfort classifier used to describe a reading
//! - A service that combines them into presentable snapshots
//! - Configuration & credentials handling
//!
//! It is used by `informer-cli`, but can also be reused by other binaries or services.

pub mod catalog;
pub mod client;
pub mod comfort;
pub mod config;
pub mod error;
pub mod model;
pub mod service;
pub mod transport;

pub use catalog::ConditionCatalog;
pub use client::WeatherClient;
pub use comfort::Comfort;
pub use config::{Config, Location, client_from_config};
pub use error::FetchError;
pub use model::{Coordinates, WeatherFact, WeatherSnapshot};
pub use service::WeatherService;
pub use transport::{HttpResponse, InformerRequest, ReqwestTransport, Transport};
