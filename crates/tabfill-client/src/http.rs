//! HTTP implementation of [`CompletionService`].
//!
//! Issues `GET {base_url}{endpoint}?{query_param}=<text>` with
//! `Accept: application/json` and decodes a [`CompletionResponse`]. No retries
//! and no timeout: a slow service simply answers late.

use crate::{CompletionError, CompletionService};
use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper::{
    header::{self, HeaderValue},
    Request, Uri,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tabfill_core::{config::ServiceConfig, CompletionResponse, Query};
use url::Url;

/// Pooled HTTP client bound to one completion endpoint.
#[derive(Clone)]
pub struct HttpCompletionClient {
    endpoint: Url,
    query_param: String,
    cookie: Option<HeaderValue>,
    client: Client<HttpConnector, Empty<Bytes>>,
}

impl std::fmt::Debug for HttpCompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCompletionClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("query_param", &self.query_param)
            .field("cookie", &self.cookie.is_some())
            .finish()
    }
}

impl HttpCompletionClient {
    /// Build a client from the `[service]` config section.
    ///
    /// Fails when the base URL or endpoint do not form a valid URL, or when the
    /// session cookie cannot be sent as a header.
    pub fn new(service: &ServiceConfig) -> Result<Self, CompletionError> {
        let endpoint = Url::parse(&service.base_url)?.join(&service.endpoint)?;
        let cookie = service
            .cookie()
            .map(|c| HeaderValue::from_str(c).map_err(|_| CompletionError::InvalidCookie))
            .transpose()?;
        let client = Client::builder(TokioExecutor::new()).build_http();

        tracing::debug!(endpoint = %endpoint, "completion client ready");
        Ok(Self {
            endpoint,
            query_param: service.query_param.clone(),
            cookie,
            client,
        })
    }

    /// The full request URL for `query`, with the text form-encoded.
    pub fn request_url(&self, query: &Query) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair(&self.query_param, query.as_str());
        url
    }

    /// Perform one lookup and decode the body.
    pub async fn fetch(&self, query: &Query) -> Result<CompletionResponse, CompletionError> {
        let url = self.request_url(query);
        let uri: Uri = url
            .as_str()
            .parse()
            .map_err(|_| CompletionError::Uri(url.to_string()))?;

        let mut req = Request::new(Empty::<Bytes>::new());
        *req.uri_mut() = uri;
        req.headers_mut()
            .insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(cookie) = &self.cookie {
            req.headers_mut().insert(header::COOKIE, cookie.clone());
        }

        tracing::debug!(url = %url, "completion request");
        let resp = self.client.request(req).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CompletionError::Status(status));
        }

        let body = resp.into_body().collect().await?.to_bytes();
        let parsed: CompletionResponse = serde_json::from_slice(&body)?;
        tracing::debug!(query = %query, matched = ?parsed.matched, "completion response");
        Ok(parsed)
    }
}

impl CompletionService for HttpCompletionClient {
    async fn complete(&self, query: &Query) -> Result<Option<String>, CompletionError> {
        Ok(self.fetch(query).await?.into_suggestion())
    }
}
