//! Single-flight client for the informers endpoint.
//!
//! A [`WeatherClient`] keeps at most one request in flight. Starting a new
//! [`WeatherClient::fetch`] cancels the one still pending, which then resolves
//! with [`FetchError::Cancelled`].

use reqwest::Url;
use serde::Deserialize;
use std::{
    fmt::Debug,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use tokio::sync::watch;
use tracing::debug;

use crate::{
    error::FetchError,
    model::{Coordinates, WeatherFact},
    transport::{HttpResponse, InformerRequest, ReqwestTransport, Transport},
};

pub const DEFAULT_ENDPOINT: &str = "https://api.weather.yandex.ru/v2/informers";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct InformerResponse {
    fact: WeatherFact,
}

/// The current in-flight request, if any.
#[derive(Debug, Default)]
struct InFlight {
    generation: u64,
    cancel: Option<watch::Sender<bool>>,
}

pub struct WeatherClient {
    transport: Arc<dyn Transport>,
    endpoint: String,
    api_key: String,
    timeout: Duration,
    in_flight: Mutex<InFlight>,
}

impl Debug for WeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherClient")
            .field("transport", &self.transport)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl WeatherClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            transport: Arc::new(ReqwestTransport::new()),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
            in_flight: Mutex::new(InFlight::default()),
        }
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether a fetch is currently pending.
    pub fn is_fetching(&self) -> bool {
        self.slot().cancel.is_some()
    }

    /// Fetch current conditions at `coordinates`.
    ///
    /// Any fetch still pending on this client resolves with
    /// [`FetchError::Cancelled`] once this one is issued.
    pub async fn fetch(&self, coordinates: Coordinates) -> Result<WeatherFact, FetchError> {
        let request = self.build_request(coordinates)?;
        let (pending, mut cancelled) = self.begin();

        debug!(%coordinates, generation = pending.generation, "issuing informer request");

        let outcome = tokio::select! {
            biased;
            _ = cancelled.changed() => Err(FetchError::Cancelled),
            result = tokio::time::timeout(self.timeout, self.transport.get(&request)) => match result {
                Ok(Ok(response)) => decode(response),
                Ok(Err(err)) => Err(FetchError::Transport(format!("{err:#}"))),
                Err(_) => Err(FetchError::Transport(format!(
                    "request timed out after {}s",
                    self.timeout.as_secs_f64()
                ))),
            },
        };

        pending.settle(outcome)
    }

    fn build_request(&self, coordinates: Coordinates) -> Result<InformerRequest, FetchError> {
        let mut url = Url::parse(&self.endpoint).map_err(|err| {
            FetchError::InvalidRequest(format!("bad endpoint '{}': {err}", self.endpoint))
        })?;
        if url.cannot_be_a_base() {
            return Err(FetchError::InvalidRequest(format!(
                "bad endpoint '{}': not an http(s) URL",
                self.endpoint
            )));
        }

        url.query_pairs_mut()
            .append_pair("lat", &coordinates.latitude().to_string())
            .append_pair("lon", &coordinates.longitude().to_string());

        Ok(InformerRequest { url, api_key: self.api_key.clone() })
    }

    /// Supersede whatever is in flight and register a new request.
    fn begin(&self) -> (Pending<'_>, watch::Receiver<bool>) {
        let mut slot = self.slot();

        if let Some(previous) = slot.cancel.take() {
            debug!(generation = slot.generation, "superseding pending informer request");
            // The receiver is gone if the superseded future was already dropped.
            let _ = previous.send(true);
        }

        slot.generation = slot.generation.wrapping_add(1);
        let (tx, rx) = watch::channel(false);
        slot.cancel = Some(tx);

        (Pending { client: self, generation: slot.generation }, rx)
    }

    /// Clear the slot if `generation` still owns it. Returns whether it did.
    fn release(&self, generation: u64) -> bool {
        let mut slot = self.slot();
        if slot.generation != generation {
            return false;
        }
        slot.cancel = None;
        true
    }

    fn slot(&self) -> MutexGuard<'_, InFlight> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Ownership of the in-flight slot for one fetch. Releases it on drop.
struct Pending<'a> {
    client: &'a WeatherClient,
    generation: u64,
}

impl Pending<'_> {
    fn settle<T>(self, outcome: Result<T, FetchError>) -> Result<T, FetchError> {
        // A stale generation means a newer fetch was issued; it wins even if we succeeded.
        if self.client.release(self.generation) { outcome } else { Err(FetchError::Cancelled) }
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        self.client.release(self.generation);
    }
}

fn decode(response: HttpResponse) -> Result<WeatherFact, FetchError> {
    if response.status != 200 {
        return Err(FetchError::Server(response.status));
    }

    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Err(FetchError::EmptyResponse);
    }

    let parsed: InformerResponse = serde_json::from_slice(&response.body)?;
    Ok(parsed.fact)
}
