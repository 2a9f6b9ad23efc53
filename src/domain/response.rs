// SPDX-License-Identifier: MIT OR Apache-2.0

//! Normalized remote responses.
//!
//! Every remote call resolves to a [`NormalizedResponse`]: either data (with
//! pagination for listings) or a list of error entries read from the remote
//! payload. Transport failures never appear here; they surface as
//! [`FeatureGateError::ConnectionError`](crate::domain::FeatureGateError::ConnectionError)
//! before any mapping happens.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Cursor links returned alongside a listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// URL of the next page, if any
    pub next: Option<String>,
    /// URL of the previous page, if any
    pub previous: Option<String>,
}

/// One normalized error entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// The HTTP status code of the failed call
    pub status: u16,
    /// Human-readable detail from the remote payload
    pub detail: Option<String>,
    /// Machine-readable code from the remote payload
    pub code: Option<String>,
    /// Error category from the remote payload
    #[serde(rename = "type")]
    pub error_type: Option<String>,
}

impl ApiError {
    /// Reads `detail`, `code` and `type` from an error body.
    ///
    /// Fields that are missing or not strings are left empty. A body that is
    /// not a JSON object keeps its raw text as `detail`.
    pub fn from_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => {
                let field = |name: &str| map.get(name).and_then(Value::as_str).map(str::to_string);
                Self {
                    status,
                    detail: field("detail"),
                    code: field("code"),
                    error_type: field("type"),
                }
            }
            _ => {
                let raw = body.trim();
                Self {
                    status,
                    detail: (!raw.is_empty()).then(|| raw.to_string()),
                    code: None,
                    error_type: None,
                }
            }
        }
    }
}

/// The uniform result of a remote call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NormalizedResponse {
    /// The call succeeded (status 200 or 201).
    Data {
        /// The decoded body (or the `results` array for listings)
        data: Value,
        /// Cursor links; present only for listings
        #[serde(skip_serializing_if = "Option::is_none")]
        pagination: Option<Pagination>,
    },
    /// The remote service returned an error payload.
    Errors {
        /// The normalized error entries
        errors: Vec<ApiError>,
    },
}

impl NormalizedResponse {
    /// Wraps a single-resource body as `{data: body}`.
    pub fn single(body: Value) -> Self {
        NormalizedResponse::Data {
            data: body,
            pagination: None,
        }
    }

    /// Wraps a listing body as `{data: body.results, pagination: {next, previous}}`.
    pub fn listing(body: Value) -> Self {
        let link = |name: &str| body.get(name).and_then(Value::as_str).map(str::to_string);
        let pagination = Pagination {
            next: link("next"),
            previous: link("previous"),
        };
        let data = body.get("results").cloned().unwrap_or(Value::Null);
        NormalizedResponse::Data {
            data,
            pagination: Some(pagination),
        }
    }

    /// Maps an error body to `{errors: [{status, detail, code, type}]}`.
    pub fn error(status: u16, body: &str) -> Self {
        NormalizedResponse::Errors {
            errors: vec![ApiError::from_body(status, body)],
        }
    }

    /// Returns `true` for a successful response.
    pub fn is_ok(&self) -> bool {
        matches!(self, NormalizedResponse::Data { .. })
    }

    /// Returns the data payload, if this is a successful response.
    pub fn data(&self) -> Option<&Value> {
        match self {
            NormalizedResponse::Data { data, .. } => Some(data),
            NormalizedResponse::Errors { .. } => None,
        }
    }

    /// Returns the pagination links, if this is a successful listing.
    pub fn pagination(&self) -> Option<&Pagination> {
        match self {
            NormalizedResponse::Data { pagination, .. } => pagination.as_ref(),
            NormalizedResponse::Errors { .. } => None,
        }
    }

    /// Returns the error entries, if this is an error response.
    pub fn errors(&self) -> Option<&[ApiError]> {
        match self {
            NormalizedResponse::Errors { errors } => Some(errors),
            NormalizedResponse::Data { .. } => None,
        }
    }

    /// Returns the entries of a listing, or an empty slice when there are none.
    pub fn entries(&self) -> &[Value] {
        self.data()
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// A typed view over a remote flag record.
///
/// The `id` is provider-assigned and only used internally to address mutations.
/// Numeric and string ids are both kept as text; an empty id counts as missing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagRecord {
    /// Provider-assigned identifier
    #[serde(default, deserialize_with = "opaque_id")]
    pub id: Option<String>,
    /// Stable key
    #[serde(default)]
    pub key: String,
    /// Remote display name (holds the feature description)
    #[serde(default)]
    pub name: String,
    /// Whether the flag is enabled
    #[serde(default)]
    pub active: bool,
    /// Soft-delete marker
    #[serde(default)]
    pub deleted: bool,
}

impl FlagRecord {
    /// Builds a record from a raw listing entry, ignoring unknown fields.
    ///
    /// Returns `None` if a known field has the wrong type.
    pub fn from_value(value: &Value) -> Option<Self> {
        Self::deserialize(value).ok()
    }

    /// Returns true if this is the live record for `key`.
    pub fn matches(&self, key: &str) -> bool {
        !self.deleted && self.key == key
    }
}

fn opaque_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(serde_json::Number),
        Text(String),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Number(n)) => Some(n.to_string()),
        Some(RawId::Text(s)) if !s.is_empty() => Some(s),
        _ => None,
    })
}
