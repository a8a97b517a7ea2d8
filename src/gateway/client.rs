//! Authenticated Request Gateway
//!
//! Every backend call goes through [`Gateway::request`], which attaches the
//! session credential, dispatches through the transport, and normalises the
//! outcome into `Result<Value, GatewayError>`.

use std::sync::Arc;

use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::error::{extract_error_message, GatewayError, GatewayResult};
use super::navigator::{LogNavigator, Navigator};
use super::request::{PreparedRequest, RawResponse, RequestOptions};
use super::transport::{ReqwestTransport, Transport};
use crate::config::GatewayConfig;
use crate::session::SessionManager;

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// OAuth entry point on the backend
pub const GOOGLE_AUTH_ENDPOINT: &str = "/api/auth/google";

/// Client for the hospital backend API
#[derive(Clone)]
pub struct Gateway {
    config: Arc<GatewayConfig>,
    session: Arc<SessionManager>,
    transport: Arc<dyn Transport>,
    navigator: Arc<dyn Navigator>,
}

impl Gateway {
    /// Gateway over `reqwest` that reports login redirects to the log
    pub fn new(config: GatewayConfig, session: Arc<SessionManager>) -> GatewayResult<Self> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_parts(
            config,
            session,
            Arc::new(transport),
            Arc::new(LogNavigator),
        ))
    }

    /// Gateway with explicit transport and navigator
    pub fn with_parts(
        config: GatewayConfig,
        session: Arc<SessionManager>,
        transport: Arc<dyn Transport>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            session,
            transport,
            navigator,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Absolute URL for an endpoint path
    pub fn url_for(&self, endpoint: &str) -> String {
        let base = self.config.normalized_base_url();
        if endpoint.is_empty() {
            base.to_string()
        } else if endpoint.starts_with('/') {
            format!("{}{}", base, endpoint)
        } else {
            format!("{}/{}", base, endpoint)
        }
    }

    /// Where the browser-style OAuth login starts
    pub fn google_login_url(&self) -> String {
        self.url_for(GOOGLE_AUTH_ENDPOINT)
    }

    pub async fn get(&self, endpoint: &str) -> GatewayResult<Value> {
        self.request(endpoint, RequestOptions::get()).await
    }

    pub async fn post(&self, endpoint: &str, body: Value) -> GatewayResult<Value> {
        self.request(endpoint, RequestOptions::post(body)).await
    }

    pub async fn put(&self, endpoint: &str, body: Value) -> GatewayResult<Value> {
        self.request(endpoint, RequestOptions::put(body)).await
    }

    pub async fn delete(&self, endpoint: &str) -> GatewayResult<Value> {
        self.request(endpoint, RequestOptions::delete()).await
    }

    /// GET and deserialize the body
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> GatewayResult<T> {
        let value = self.get(endpoint).await?;
        decode(endpoint, value)
    }

    /// POST a serializable body and deserialize the reply
    pub async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> GatewayResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let value = self.post(endpoint, serde_json::to_value(body)?).await?;
        decode(endpoint, value)
    }

    /// Issue one request against the backend
    ///
    /// A 401 is terminal: the session is cleared, the navigator is sent to
    /// the login view, and [`GatewayError::SessionExpired`] is returned.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> GatewayResult<Value> {
        let method = options.method.clone();
        let mut request_id = None;

        let result = match self.prepare(endpoint, options) {
            Ok(prepared) => {
                request_id = Some(prepared.request_id.clone());
                tracing::debug!(
                    method = %prepared.method,
                    url = %prepared.url,
                    request_id = %prepared.request_id,
                    authenticated = prepared.bearer_token().is_some(),
                    "Dispatching API request"
                );

                match self.transport.send(prepared).await {
                    Ok(response) => self.interpret(response),
                    Err(e) => Err(GatewayError::Network(e)),
                }
            }
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            tracing::error!(
                method = %method,
                endpoint = %endpoint,
                request_id = %request_id.as_deref().unwrap_or("-"),
                status = ?e.status(),
                error = %e,
                "API request failed"
            );
        }

        result
    }

    /// Resolve URL, headers, and body for a request
    pub fn prepare(&self, endpoint: &str, options: RequestOptions) -> GatewayResult<PreparedRequest> {
        let RequestOptions {
            method,
            body,
            headers: extra,
        } = options;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in extra.iter() {
            headers.insert(name.clone(), value.clone());
        }

        if let Some(token) = self.session.token() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| GatewayError::InvalidRequest("session token is not a valid header value".into()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let request_id = uuid::Uuid::new_v4().to_string();
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            headers.insert(REQUEST_ID_HEADER, value);
        }

        let body = body
            .map(|b| serde_json::to_vec(&b))
            .transpose()
            .map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;

        Ok(PreparedRequest {
            method,
            url: self.url_for(endpoint),
            headers,
            body,
            request_id,
        })
    }

    /// Turn a raw response into the call outcome
    fn interpret(&self, response: RawResponse) -> GatewayResult<Value> {
        let status = response.status;

        if status == StatusCode::UNAUTHORIZED {
            if let Err(e) = self.session.clear() {
                tracing::warn!("Failed to remove persisted session: {}", e);
            }
            self.navigator.redirect(&self.config.login_path);
            return Err(GatewayError::SessionExpired);
        }

        if !status.is_success() {
            return Err(GatewayError::Http {
                status: status.as_u16(),
                message: extract_error_message(&response.body),
            });
        }

        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&response.body)?)
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.config.base_url)
            .field("session", &self.session)
            .finish()
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, value: Value) -> GatewayResult<T> {
    serde_json::from_value(value).map_err(|e| {
        tracing::error!(endpoint = %endpoint, error = %e, "Unexpected response shape");
        GatewayError::Parse(e.to_string())
    })
}

/// The HTTP verbs the CLI exposes
pub fn method_from_str(s: &str) -> Option<Method> {
    match s.to_ascii_uppercase().as_str() {
        "GET" => Some(Method::GET),
        "POST" => Some(Method::POST),
        "PUT" => Some(Method::PUT),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}
