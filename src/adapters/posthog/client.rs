// SPDX-License-Identifier: MIT OR Apache-2.0

//! Posthog feature flag API client.
//!
//! The remote API addresses flags by a provider-assigned id, while callers only
//! know keys. Every operation on an existing flag therefore resolves the key
//! first (list, then scan for a matching `key`) and only then issues the
//! mutating request against the discovered id. A key that does not resolve
//! fails with `FeatureNotFound` before anything is mutated.
//!
//! Every completed request is logged at INFO with method, path, status code and
//! body. Transport failures are logged at ERROR and returned as
//! `ConnectionError`.

use crate::adapters::posthog::settings::PosthogSettings;
use crate::adapters::posthog::transport::ReqwestTransport;
use crate::domain::{FeatureGateError, FlagRecord, NormalizedResponse, Result};
use crate::ports::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;
use tracing::Span;

/// Upper bound on listing pages fetched by one walk over the listing.
pub const MAX_LISTING_PAGES: usize = 50;

/// Client for the Posthog feature flag endpoints of one project.
///
/// # Examples
///
/// ```rust,no_run
/// use feature_gate::adapters::posthog::{PosthogApiClient, PosthogSettings};
///
/// # fn main() -> feature_gate::domain::Result<()> {
/// let settings = PosthogSettings::builder()
///     .api_key("phx_secret")
///     .project_id("1234")
///     .build()?;
/// let client = PosthogApiClient::new(settings)?;
///
/// if let Some(record) = client.fetch_feature("funnel_test")? {
///     println!("funnel_test is {}", record.active);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PosthogApiClient {
    settings: PosthogSettings,
    transport: Arc<dyn HttpTransport>,
    span: Span,
}

impl PosthogApiClient {
    /// Creates a client using a `reqwest` transport with the configured timeout.
    pub fn new(settings: PosthogSettings) -> Result<Self> {
        let transport = ReqwestTransport::new(settings.timeout())?;
        Ok(Self::with_transport(settings, transport))
    }

    /// Creates a client using the given transport.
    pub fn with_transport(settings: PosthogSettings, transport: impl HttpTransport + 'static) -> Self {
        let span = tracing::info_span!(
            "posthog_api_client",
            project_id = %settings.project_id()
        );
        Self {
            settings,
            transport: Arc::new(transport),
            span,
        }
    }

    /// Replaces the span every request is logged under.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Returns the resolved settings.
    pub fn settings(&self) -> &PosthogSettings {
        &self.settings
    }

    /// Returns the API base.
    pub fn api_base(&self) -> &str {
        self.settings.api_base()
    }

    /// Returns the API key.
    pub fn api_key(&self) -> &str {
        self.settings.api_key()
    }

    /// Returns the project identifier.
    pub fn project_id(&self) -> &str {
        self.settings.project_id()
    }

    /// Lists the first page of feature flags.
    ///
    /// Returns `{data: results, pagination: {next, previous}}` on success or the
    /// normalized error payload.
    pub fn list_features(&self) -> Result<NormalizedResponse> {
        self.list_page(&self.flags_path())
    }

    /// Walks the listing page by page, starting at the first.
    ///
    /// `next` links are only followed when they point at the configured API
    /// base, and at most [`MAX_LISTING_PAGES`] pages are fetched. An error
    /// payload has no `next` link, so it is always the last page yielded.
    pub fn pages(&self) -> ListingPages<'_> {
        ListingPages {
            client: self,
            next: Some(self.flags_path()),
            fetched: 0,
        }
    }

    /// Creates a disabled flag whose remote name is the description.
    pub fn create_feature(&self, key: &str, description: &str) -> Result<NormalizedResponse> {
        let path = self.flags_path();
        let payload = json!({
            "name": description,
            "key": key,
            "deleted": false,
            "active": false,
        });
        let response = self.send(HttpMethod::Post, &path, Some(payload))?;
        self.map_single_response(HttpMethod::Post, &path, response)
    }

    /// Resolves a key to its remote record.
    ///
    /// Scans the pages yielded by [`pages`](Self::pages) until the key is found.
    /// Soft-deleted records are skipped. A throttled listing fails with
    /// `RateLimited`; any other error payload resolves to `None`.
    pub fn fetch_feature(&self, key: &str) -> Result<Option<FlagRecord>> {
        for page in self.pages() {
            let page = page?;
            if let Some(errors) = page.errors() {
                if let Some(throttled) = errors.iter().find(|e| e.status == 429) {
                    return Err(FeatureGateError::RateLimited {
                        detail: throttled.detail.clone(),
                    });
                }
                let _guard = self.span.enter();
                tracing::warn!(key, "flag listing returned an error, treating key as absent");
                return Ok(None);
            }

            let found = page
                .entries()
                .iter()
                .filter_map(FlagRecord::from_value)
                .find(|record| record.matches(key));
            if found.is_some() {
                return Ok(found);
            }
        }

        Ok(None)
    }

    /// Soft-deletes the flag (`{deleted: true}`).
    pub fn delete_feature(&self, key: &str) -> Result<NormalizedResponse> {
        self.patch_feature(key, json!({ "deleted": true }))
    }

    /// Turns the flag on (`{active: true}`).
    pub fn enable_feature(&self, key: &str) -> Result<NormalizedResponse> {
        self.patch_feature(key, json!({ "active": true }))
    }

    /// Turns the flag off (`{active: false}`).
    pub fn disable_feature(&self, key: &str) -> Result<NormalizedResponse> {
        self.patch_feature(key, json!({ "active": false }))
    }

    /// Reads the `active` field of the resolved record.
    pub fn is_enabled(&self, key: &str) -> Result<bool> {
        let record = self
            .fetch_feature(key)?
            .ok_or_else(|| FeatureGateError::not_found(key))?;
        Ok(record.active)
    }

    fn patch_feature(&self, key: &str, payload: Value) -> Result<NormalizedResponse> {
        let record = self
            .fetch_feature(key)?
            .ok_or_else(|| FeatureGateError::not_found(key))?;
        let path = self.flag_path(&record)?;
        let response = self.send(HttpMethod::Patch, &path, Some(payload))?;
        self.map_single_response(HttpMethod::Patch, &path, response)
    }

    fn list_page(&self, path: &str) -> Result<NormalizedResponse> {
        let response = self.send(HttpMethod::Get, path, None)?;
        self.map_list_response(HttpMethod::Get, path, response)
    }

    fn flags_path(&self) -> String {
        format!("/api/projects/{}/feature_flags", self.project_id())
    }

    fn flag_path(&self, record: &FlagRecord) -> Result<String> {
        match &record.id {
            Some(id) => Ok(format!("{}/{}", self.flags_path(), id)),
            None => Err(FeatureGateError::DecodeError {
                message: format!("record for feature {} has no id", record.key),
                source: None,
            }),
        }
    }

    /// Resolves a `next` link to a path on the API base.
    ///
    /// Links to any other host are dropped with a warning.
    fn next_path(&self, link: &str) -> Option<String> {
        let path = link
            .strip_prefix(self.api_base())
            .filter(|rest| rest.starts_with('/'))
            .map(str::to_string);
        if path.is_none() {
            let _guard = self.span.enter();
            tracing::warn!(next = link, "not following pagination link to a foreign host");
        }
        path
    }

    fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.api_key()),
            ),
        ]
    }

    fn send(&self, method: HttpMethod, path: &str, body: Option<Value>) -> Result<HttpResponse> {
        let request = HttpRequest {
            method,
            url: format!("{}{}", self.api_base(), path),
            headers: self.headers(),
            body,
        };

        self.transport.send(&request).map_err(|err| {
            let _guard = self.span.enter();
            tracing::error!(method = %method, path, "Posthog connection error - {}", err);
            FeatureGateError::ConnectionError {
                message: err.message.clone(),
                source: Some(Box::new(err)),
            }
        })
    }

    fn map_single_response(
        &self,
        method: HttpMethod,
        path: &str,
        response: HttpResponse,
    ) -> Result<NormalizedResponse> {
        self.log_response(method, path, &response);
        if is_status_ok(response.status) {
            Ok(NormalizedResponse::single(decode_body(&response)?))
        } else {
            Ok(NormalizedResponse::error(response.status, &response.body))
        }
    }

    fn map_list_response(
        &self,
        method: HttpMethod,
        path: &str,
        response: HttpResponse,
    ) -> Result<NormalizedResponse> {
        self.log_response(method, path, &response);
        if is_status_ok(response.status) {
            Ok(NormalizedResponse::listing(decode_body(&response)?))
        } else {
            Ok(NormalizedResponse::error(response.status, &response.body))
        }
    }

    fn log_response(&self, method: HttpMethod, path: &str, response: &HttpResponse) {
        let _guard = self.span.enter();
        let status_code = response.status;
        if is_status_ok(status_code) {
            tracing::info!(method = %method, path, status_code, response = %response.body, "request successful");
        } else {
            tracing::info!(method = %method, path, status_code, response = %response.body, "request failed");
        }
    }
}

impl fmt::Debug for PosthogApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PosthogApiClient")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Iterator over listing pages, see [`PosthogApiClient::pages`].
#[derive(Debug)]
pub struct ListingPages<'a> {
    client: &'a PosthogApiClient,
    next: Option<String>,
    fetched: usize,
}

impl Iterator for ListingPages<'_> {
    type Item = Result<NormalizedResponse>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fetched >= MAX_LISTING_PAGES {
            if let Some(path) = self.next.take() {
                let _guard = self.client.span.enter();
                tracing::warn!(path, "listing page limit reached, not fetching further pages");
            }
            return None;
        }

        let path = self.next.take()?;
        self.fetched += 1;
        let page = match self.client.list_page(&path) {
            Ok(page) => page,
            Err(err) => return Some(Err(err)),
        };

        let client = self.client;
        self.next = page
            .pagination()
            .and_then(|p| p.next.as_deref())
            .and_then(|link| client.next_path(link));
        Some(Ok(page))
    }
}

fn is_status_ok(status: u16) -> bool {
    status == 200 || status == 201
}

fn decode_body(response: &HttpResponse) -> Result<Value> {
    serde_json::from_str(&response.body).map_err(|e| FeatureGateError::DecodeError {
        message: format!("status {} body is not valid JSON: {}", response.status, e),
        source: Some(Box::new(e)),
    })
}
