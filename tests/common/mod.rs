// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for integration tests.

#![allow(dead_code)]

use feature_gate::adapters::{PosthogAdapter, PosthogApiClient, PosthogSettings};
use feature_gate::ports::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex, OnceLock};

/// Cached result of Docker availability check.
static DOCKER_AVAILABLE: OnceLock<bool> = OnceLock::new();

/// Checks if Docker is available on the system.
///
/// This check is cached after the first call.
pub fn is_docker_available() -> bool {
    *DOCKER_AVAILABLE.get_or_init(|| {
        // Try to run `docker ps` command
        std::process::Command::new("docker")
            .args(["ps"])
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    })
}

/// Prints a warning message that a test is skipped due to Docker being unavailable.
pub fn print_docker_unavailable_warning(test_name: &str) {
    eprintln!("\n⚠️  SKIPPED: {} - Docker is not available", test_name);
    eprintln!("   To run this test, ensure Docker is installed and running.");
    eprintln!("   Installation: https://docs.docker.com/get-docker/\n");
}

/// Settings with dummy credentials and the default API base.
pub fn test_settings() -> PosthogSettings {
    PosthogSettings::builder()
        .api_key("api_key")
        .project_id("project_id")
        .build_with_env(|_| None)
        .unwrap()
}

#[derive(Default)]
struct FakeState {
    next_id: u64,
    records: Vec<Value>,
    calls: Vec<HttpRequest>,
    outage: Option<String>,
}

/// An in-process stand-in for the Posthog feature flag endpoints.
///
/// Records are kept after a soft delete, as the real service does, so listings
/// can contain several records for one key with at most one not deleted.
#[derive(Default)]
pub struct FakePosthog {
    state: Mutex<FakeState>,
}

impl FakePosthog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Makes every following request fail at the transport level.
    pub fn go_offline(&self, message: &str) {
        self.state.lock().unwrap().outage = Some(message.to_string());
    }

    pub fn records(&self) -> Vec<Value> {
        self.state.lock().unwrap().records.clone()
    }

    pub fn calls(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn mutating_calls(&self) -> usize {
        self.calls().iter().filter(|c| c.method.is_mutating()).count()
    }

    fn listing(state: &FakeState) -> HttpResponse {
        let body = json!({
            "count": state.records.len(),
            "next": null,
            "previous": null,
            "results": state.records,
        });
        HttpResponse::new(200, body.to_string())
    }
}

impl HttpTransport for FakePosthog {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(request.clone());

        if let Some(message) = &state.outage {
            return Err(TransportError::new(message.clone()));
        }

        let id = request
            .url
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse::<u64>().ok());

        match (request.method, id) {
            (HttpMethod::Get, _) => Ok(Self::listing(&state)),
            (HttpMethod::Post, _) => {
                let body = request.body.clone().unwrap_or_default();
                state.next_id += 1;
                let record = json!({
                    "id": state.next_id,
                    "key": body["key"],
                    "name": body["name"],
                    "active": false,
                    "deleted": false,
                });
                state.records.push(record.clone());
                Ok(HttpResponse::new(201, record.to_string()))
            }
            (HttpMethod::Patch, Some(id)) => {
                let patch = request.body.clone().unwrap_or_default();
                let record = state
                    .records
                    .iter_mut()
                    .find(|r| r["id"].as_u64() == Some(id));
                match (record, patch.as_object()) {
                    (Some(record), Some(fields)) => {
                        for (field, value) in fields {
                            record[field] = value.clone();
                        }
                        Ok(HttpResponse::new(200, record.to_string()))
                    }
                    _ => Ok(HttpResponse::new(404, r#"{"detail": "Not found."}"#)),
                }
            }
            (HttpMethod::Patch, None) => Ok(HttpResponse::new(405, "")),
        }
    }
}

/// Builds an adapter over a fresh fake service.
pub fn fake_adapter() -> (Arc<FakePosthog>, PosthogAdapter) {
    let fake = FakePosthog::new();
    let client = PosthogApiClient::with_transport(test_settings(), Arc::clone(&fake));
    (fake, PosthogAdapter::new(client))
}
