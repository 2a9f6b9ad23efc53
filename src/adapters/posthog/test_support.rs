// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted transport and fixtures shared by the Posthog unit tests.

use crate::adapters::posthog::settings::PosthogSettings;
use crate::ports::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Returns the body of a recorded Posthog response.
pub(crate) fn fixture(name: &str) -> &'static str {
    match name {
        "get_features_when_empty" => {
            include_str!("../../../tests/fixtures/posthog/get_features_when_empty.json")
        }
        "get_features_when_funnel" => {
            include_str!("../../../tests/fixtures/posthog/get_features_when_funnel.json")
        }
        "add_feature_funnel" => {
            include_str!("../../../tests/fixtures/posthog/add_feature_funnel.json")
        }
        "remove_feature_funnel" => {
            include_str!("../../../tests/fixtures/posthog/remove_feature_funnel.json")
        }
        "enable_feature_funnel" => {
            include_str!("../../../tests/fixtures/posthog/enable_feature_funnel.json")
        }
        "disable_feature_funnel" => {
            include_str!("../../../tests/fixtures/posthog/disable_feature_funnel.json")
        }
        "funnel_is_enabled" => {
            include_str!("../../../tests/fixtures/posthog/funnel_is_enabled.json")
        }
        "funnel_is_disabled" => {
            include_str!("../../../tests/fixtures/posthog/funnel_is_disabled.json")
        }
        "rate_limiting_error" => {
            include_str!("../../../tests/fixtures/posthog/rate_limiting_error.json")
        }
        other => panic!("unknown fixture {other}"),
    }
}

/// Settings pointing at the public Posthog host with dummy credentials.
pub(crate) fn settings() -> PosthogSettings {
    PosthogSettings::builder()
        .api_key("api_key")
        .project_id("project_id")
        .build_with_env(|_| None)
        .unwrap()
}

enum Reply {
    Respond(HttpResponse),
    Fail(String),
}

/// A transport that replays scripted replies per method and records every call.
///
/// Replies for a method are consumed in order; the last one keeps repeating.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: Mutex<HashMap<HttpMethod, VecDeque<Reply>>>,
    calls: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn on(self, method: HttpMethod, status: u16, body: impl Into<String>) -> Self {
        self.push(method, Reply::Respond(HttpResponse::new(status, body)))
    }

    pub(crate) fn failing(self, method: HttpMethod, message: &str) -> Self {
        self.push(method, Reply::Fail(message.to_string()))
    }

    fn push(self, method: HttpMethod, reply: Reply) -> Self {
        self.replies
            .lock()
            .unwrap()
            .entry(method)
            .or_default()
            .push_back(reply);
        self
    }

    pub(crate) fn calls(&self) -> Vec<HttpRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn calls_for(&self, method: HttpMethod) -> Vec<HttpRequest> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method)
            .collect()
    }

    pub(crate) fn count(&self, method: HttpMethod) -> usize {
        self.calls_for(method).len()
    }

    pub(crate) fn mutating_calls(&self) -> usize {
        self.calls().iter().filter(|c| c.method.is_mutating()).count()
    }
}

impl HttpTransport for ScriptedTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.calls.lock().unwrap().push(request.clone());

        let mut replies = self.replies.lock().unwrap();
        let queue = replies
            .get_mut(&request.method)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| TransportError::new(format!("no scripted reply for {}", request.method)))?;

        let reply = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().map(|r| match r {
                Reply::Respond(response) => Reply::Respond(response.clone()),
                Reply::Fail(message) => Reply::Fail(message.clone()),
            })
        };

        match reply {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail(message)) => Err(TransportError::new(message)),
            None => Err(TransportError::new("empty reply queue")),
        }
    }
}
