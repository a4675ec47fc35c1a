use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::fmt::Debug;

pub const API_KEY_HEADER: &str = "X-Yandex-API-Key";

/// A fully built informer request.
#[derive(Clone)]
pub struct InformerRequest {
    pub url: Url,
    pub api_key: String,
}

impl Debug for InformerRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InformerRequest")
            .field("url", &self.url.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Status and raw body of an HTTP response, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Issues the GET for an [`InformerRequest`].
///
/// Implementations report only transport-level failures as errors; any HTTP
/// status is a successful exchange. Dropping the returned future must abort
/// the request.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn get(&self, request: &InformerRequest) -> Result<HttpResponse>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, request: &InformerRequest) -> Result<HttpResponse> {
        let res = self
            .http
            .get(request.url.clone())
            .header(API_KEY_HEADER, request.api_key.as_str())
            .send()
            .await
            .with_context(|| {
                format!(
                    "Failed to send request to {}",
                    request.url.host_str().unwrap_or("informer")
                )
            })?;

        let status = res.status().as_u16();
        let body = res
            .bytes()
            .await
            .context("Failed to read informer response body")?;

        Ok(HttpResponse { status, body: body.to_vec() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_debug_hides_api_key() {
        let request = InformerRequest {
            url: Url::parse("https://api.weather.yandex.ru/v2/informers?lat=1&lon=2").unwrap(),
            api_key: "secret-key".into(),
        };

        let printed = format!("{request:?}");
        assert!(printed.contains("api.weather.yandex.ru"));
        assert!(!printed.contains("secret-key"));
    }
}
