//! RIPE Database search adapter
//!
//! Issues one search request against the RIPE REST API per call and reshapes the
//! nested response into flat `{type, attributes}` records for network and domain
//! objects.

use std::{collections::BTreeMap, fmt, time::Duration};

use async_trait::async_trait;
use reqwest::{
    header::{HeaderValue, ACCEPT, AUTHORIZATION},
    Client,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{config::Config, errors::AppError};

/// Attribute names that mark an object as a network or domain record.
pub const MATCHING_ATTRIBUTES: [&str; 3] = ["inetnum", "inet6num", "domain"];

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DirectoryObject {
    #[serde(rename = "type")]
    pub object_type: String,
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    objects: Option<ObjectList>,
}

#[derive(Debug, Deserialize)]
struct ObjectList {
    #[serde(default)]
    object: Option<Vec<RawObject>>,
}

#[derive(Debug, Deserialize)]
struct RawObject {
    #[serde(rename = "type", default)]
    object_type: Option<String>,
    #[serde(default)]
    attributes: Option<AttributeList>,
}

#[derive(Debug, Deserialize)]
struct AttributeList {
    #[serde(default)]
    attribute: Option<Vec<RawAttribute>>,
}

// A non-string `value` anywhere in the payload fails the whole search, including
// objects the filter would have dropped.
#[derive(Debug, Deserialize)]
struct RawAttribute {
    name: String,
    value: String,
}

#[async_trait]
pub trait DirectoryProvider: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<DirectoryObject>, AppError>;
}

pub struct RipeClient {
    client: Client,
    upstream_url: String,
    credential: HeaderValue,
}

impl fmt::Debug for RipeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RipeClient")
            .field("upstream_url", &self.upstream_url)
            .field("credential", &"<redacted>")
            .finish()
    }
}

impl RipeClient {
    pub fn new(
        upstream_url: impl Into<String>,
        credential: &str,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let mut credential = HeaderValue::from_str(credential)
            .map_err(|_| AppError::internal("upstream credential is not a valid header value"))?;
        credential.set_sensitive(true);

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| {
                AppError::internal(format!("failed to build HTTP client: {}", err.without_url()))
            })?;

        Ok(Self {
            client,
            upstream_url: upstream_url.into(),
            credential,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(
            config.upstream_url.clone(),
            &config.upstream_credential,
            config.request_timeout(),
        )
    }

    async fn fetch(&self, query: &str) -> Result<SearchResponse, AppError> {
        let response = self
            .client
            .get(&self.upstream_url)
            .query(&[("query-string", query), ("flags", "no-filtering")])
            .header(AUTHORIZATION, self.credential.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::upstream(format!("upstream returned HTTP {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| self.transport_error(err))?;

        serde_json::from_slice(&body).map_err(|err| {
            AppError::upstream(self.redact(format!("malformed upstream payload: {err}")))
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> AppError {
        let cause = if err.is_timeout() {
            "upstream request timed out".to_string()
        } else {
            let err = err.without_url();
            match std::error::Error::source(&err) {
                Some(source) => format!("upstream request failed: {err}: {source}"),
                None => format!("upstream request failed: {err}"),
            }
        };
        AppError::upstream(self.redact(cause))
    }

    fn redact(&self, cause: String) -> String {
        match self.credential.to_str() {
            Ok(secret) if !secret.is_empty() => cause.replace(secret, "[REDACTED]"),
            _ => cause,
        }
    }
}

#[async_trait]
impl DirectoryProvider for RipeClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<DirectoryObject>, AppError> {
        debug!(query = %query, limit, "querying RIPE database");

        let response = match self.fetch(query).await {
            Ok(response) => response,
            Err(err) => {
                warn!(query = %query, error = %err, "RIPE database query failed");
                return Err(err);
            }
        };

        let received = response
            .objects
            .as_ref()
            .and_then(|objects| objects.object.as_ref())
            .map_or(0, Vec::len);
        let objects = shape_objects(response, limit);

        info!(
            query = %query,
            received,
            returned = objects.len(),
            "RIPE database query completed"
        );

        Ok(objects)
    }
}

fn shape_objects(response: SearchResponse, limit: usize) -> Vec<DirectoryObject> {
    let mut kept = Vec::new();
    if limit == 0 {
        return kept;
    }

    let raw_objects = response
        .objects
        .and_then(|objects| objects.object)
        .unwrap_or_default();

    for raw in raw_objects {
        let attributes = flatten_attributes(raw.attributes);
        if !is_network_or_domain(&attributes) {
            continue;
        }

        kept.push(DirectoryObject {
            object_type: raw.object_type.unwrap_or_default(),
            attributes,
        });

        if kept.len() >= limit {
            break;
        }
    }

    kept
}

fn flatten_attributes(attributes: Option<AttributeList>) -> BTreeMap<String, String> {
    // Repeated names keep the last value.
    attributes
        .and_then(|list| list.attribute)
        .unwrap_or_default()
        .into_iter()
        .map(|attribute| (attribute.name, attribute.value))
        .collect()
}

fn is_network_or_domain(attributes: &BTreeMap<String, String>) -> bool {
    MATCHING_ATTRIBUTES
        .iter()
        .any(|name| attributes.contains_key(*name))
}
