// PostgREST HTTP client
//
// Wraps `reqwest::Client` with table URL construction, the apikey /
// bearer header pair, and PostgREST verb conventions (eq filters,
// Prefer headers, Content-Range counts). The `Gateway` builds its
// per-table operations on top of these primitives.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::StoreConfig;
use crate::error::StoreError;

/// Which credential tier the client was built with.
///
/// `Anon` is the standard path; `ServiceRole` is for administrative
/// operations only and requires the privileged key to be configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRole {
    Anon,
    ServiceRole,
}

/// Raw HTTP client for a PostgREST endpoint.
///
/// Handles `rest/v1/{table}` URL construction and the error-body
/// envelope (`{ message, code, hint }`). All methods return decoded
/// rows -- callers never see a `reqwest::Response`.
pub struct PostgrestClient {
    http: reqwest::Client,
    base_url: Url,
    role: AccessRole,
}

impl PostgrestClient {
    /// Build a client for the given credential tier.
    ///
    /// Fails if the role is `ServiceRole` but no privileged key is
    /// configured, or if the key cannot be carried in a header.
    pub fn new(config: &StoreConfig, role: AccessRole) -> Result<Self, StoreError> {
        let key = match role {
            AccessRole::Anon => &config.anon_key,
            AccessRole::ServiceRole => {
                config
                    .service_role_key
                    .as_ref()
                    .ok_or_else(|| StoreError::InvalidKey {
                        reason: "service-role key not configured".into(),
                    })?
            }
        };

        let mut headers = HeaderMap::new();
        let key_value =
            HeaderValue::from_str(key.expose_secret()).map_err(|_| StoreError::InvalidKey {
                reason: "key contains non-header characters".into(),
            })?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", key.expose_secret())).map_err(
            |_| StoreError::InvalidKey {
                reason: "key contains non-header characters".into(),
            },
        )?;
        headers.insert("apikey", key_value);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.url.clone(),
            role,
        })
    }

    /// The credential tier this client was built with.
    pub fn role(&self) -> AccessRole {
        self.role
    }

    /// The endpoint base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for a table: `{base}/rest/v1/{table}`
    pub(crate) fn table_url(&self, table: &str) -> Url {
        let full = format!(
            "{}/rest/v1/{}",
            self.base_url.as_str().trim_end_matches('/'),
            table
        );
        Url::parse(&full).expect("invalid table URL")
    }

    // ── Verbs ────────────────────────────────────────────────────────

    /// `GET {table}?select=*&{query}` -- decoded row list.
    pub(crate) async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, StoreError> {
        let mut url = self.table_url(table);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("select", "*");
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        let resp = check(resp).await?;
        let body = resp.text().await?;

        serde_json::from_str(&body).map_err(|e| StoreError::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    /// `POST {table}` with a single-element row array, `return=minimal`.
    pub(crate) async fn insert(
        &self,
        table: &str,
        row: &impl Serialize,
    ) -> Result<(), StoreError> {
        let url = self.table_url(table);
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .header("Prefer", "return=minimal")
            .json(std::slice::from_ref(row))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    /// `PATCH {table}?id=eq.{id}`.
    ///
    /// The primary key is stripped from the serialized body: callers
    /// pass full rows, and PostgREST must not see `id` in a patch.
    pub(crate) async fn update(
        &self,
        table: &str,
        id: &str,
        row: &impl Serialize,
    ) -> Result<(), StoreError> {
        let mut url = self.table_url(table);
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
        debug!("PATCH {url}");

        let mut body = serde_json::to_value(row).map_err(|e| StoreError::Deserialization {
            message: e.to_string(),
            body: String::new(),
        })?;
        if let Some(map) = body.as_object_mut() {
            map.remove("id");
        }

        let resp = self
            .http
            .patch(url)
            .header("Prefer", "return=minimal")
            .json(&body)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    /// `DELETE {table}?{col}=eq.{val}&...` for every filter pair.
    pub(crate) async fn delete(
        &self,
        table: &str,
        filters: &[(&str, &str)],
    ) -> Result<(), StoreError> {
        let mut url = self.table_url(table);
        {
            let mut pairs = url.query_pairs_mut();
            for (col, val) in filters {
                pairs.append_pair(col, &format!("eq.{val}"));
            }
        }
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        check(resp).await?;
        Ok(())
    }

    /// `POST {table}` with merge-duplicates resolution, optionally
    /// keyed by an `on_conflict` column.
    pub(crate) async fn upsert(
        &self,
        table: &str,
        row: &impl Serialize,
        on_conflict: Option<&str>,
    ) -> Result<(), StoreError> {
        let mut url = self.table_url(table);
        if let Some(col) = on_conflict {
            url.query_pairs_mut().append_pair("on_conflict", col);
        }
        debug!("POST {url} (upsert)");

        let resp = self
            .http
            .post(url)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(std::slice::from_ref(row))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    /// Count-only query: `HEAD {table}` with `Prefer: count=exact`,
    /// total parsed from the `Content-Range` tail (`0-24/3051`).
    pub(crate) async fn count(&self, table: &str) -> Result<u64, StoreError> {
        let mut url = self.table_url(table);
        url.query_pairs_mut().append_pair("select", "*");
        debug!("HEAD {url}");

        let resp = self
            .http
            .head(url)
            .header("Prefer", "count=exact")
            .send()
            .await?;
        let resp = check(resp).await?;

        resp.headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(|range| range.rsplit('/').next())
            .and_then(|total| total.parse().ok())
            .ok_or(StoreError::MalformedCount)
    }
}

// ── Response checking ────────────────────────────────────────────────

/// Minimal shape of a PostgREST error body.
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
    code: Option<String>,
}

/// Map non-success statuses to `StoreError`, parsing the error body
/// when one is present.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let parsed: Option<ErrorBody> = serde_json::from_str(&body).ok();
    let message = parsed
        .as_ref()
        .and_then(|e| e.message.clone())
        .unwrap_or_else(|| {
            if body.is_empty() {
                status.to_string()
            } else {
                body.clone()
            }
        });

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(StoreError::Authentication { message });
    }

    Err(StoreError::Api {
        message,
        code: parsed.and_then(|e| e.code),
        status: status.as_u16(),
    })
}
