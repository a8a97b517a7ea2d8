//! Test doubles for the transport seam

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use super::error::TransportError;
use super::request::{PreparedRequest, RawResponse};
use super::{Gateway, Navigator, Transport};
use crate::config::GatewayConfig;
use crate::session::SessionManager;

/// Replays canned responses and records what was sent
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    sent: Mutex<Vec<PreparedRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn replying(responses: Vec<Result<RawResponse, TransportError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn sent(&self) -> Vec<PreparedRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, TransportError> {
        self.sent.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("no scripted response".into())))
    }
}

/// Remembers every redirect
#[derive(Debug, Default)]
pub(crate) struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }

    pub(crate) fn last(&self) -> Option<String> {
        self.visits.lock().unwrap().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        self.visits.lock().unwrap().push(path.to_string());
    }
}

/// Gateway answering every call with the given JSON bodies in order
pub(crate) fn gateway_replying(bodies: Vec<Value>) -> (Gateway, Arc<ScriptedTransport>) {
    let transport = ScriptedTransport::replying(
        bodies
            .iter()
            .map(|b| Ok(RawResponse::json(StatusCode::OK, b)))
            .collect(),
    );
    let gateway = Gateway::with_parts(
        GatewayConfig::default(),
        Arc::new(SessionManager::in_memory()),
        transport.clone(),
        Arc::new(RecordingNavigator::new()),
    );
    (gateway, transport)
}
