//! The one POST helper every controller action goes through.

use crate::errors::RemoteError;
use crate::models::ActionResponse;
use crate::session::Session;
use reqwest::{Client, Url, header::COOKIE};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Connect,
    AddCategory,
    AddDocument,
    AddElement,
    AddDescription,
    AddOrder,
    AddOrderRule,
    Analyze,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Form,
    Json,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Connect => "/connect",
            Endpoint::AddCategory => "/add-category",
            Endpoint::AddDocument => "/add-document",
            Endpoint::AddElement => "/add-element",
            Endpoint::AddDescription => "/add-description",
            Endpoint::AddOrder => "/add-order",
            Endpoint::AddOrderRule => "/add-order-rule",
            Endpoint::Analyze => "/analyze",
        }
    }

    /// The backend reads these two from `request.form`, the rest from JSON.
    pub fn encoding(&self) -> Encoding {
        match self {
            Endpoint::Connect | Endpoint::AddOrderRule => Encoding::Form,
            _ => Encoding::Json,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// A base URL with a path prefix (`http://host/archive`) keeps it: the
    /// endpoints are resolved below it.
    pub fn with_client(client: Client, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { client, base_url }
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, url::ParseError> {
        self.base_url.join(endpoint.path().trim_start_matches('/'))
    }

    /// Posts `payload` and returns the full response body when the backend
    /// reports success.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        payload: &T,
        session: &Session,
    ) -> Result<serde_json::Value, RemoteError> {
        let url = self
            .endpoint_url(endpoint)
            .map_err(|err| RemoteError::transport(endpoint, err))?;

        let mut request = self.client.post(url);
        if let Some(cookie) = session.cookie_header() {
            request = request.header(COOKIE, cookie);
        }
        request = match endpoint.encoding() {
            Encoding::Form => request.form(payload),
            Encoding::Json => request.json(payload),
        };

        debug!(endpoint = endpoint.path(), "sending request");
        let response = request
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| {
                warn!(endpoint = endpoint.path(), "request failed: {err}");
                RemoteError::transport(endpoint, err)
            })?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|err| RemoteError::transport(endpoint, err))?;
        let envelope: ActionResponse = serde_json::from_value(body.clone())
            .map_err(|err| RemoteError::transport(endpoint, err))?;

        if envelope.success {
            Ok(body)
        } else {
            Err(RemoteError::Application { endpoint })
        }
    }
}
