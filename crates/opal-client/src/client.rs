//! The content-management API client.
//!
//! Wraps `reqwest` with the URL, header, and error conventions of the
//! management API: every call returns an [`ApiReply`] on success and an
//! `Error::Upstream` carrying the status and body text otherwise.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use opal_core::{ApiReply, CmsSettings, Error, Result};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// Endpoint map
// ============================================================================

/// Content-type schema listing.
pub const CONTENT_TYPES_PATH: &str = "contenttypes";

/// Language branch definitions.
pub const LANGUAGE_BRANCHES_PATH: &str = "languagebranches";

/// Content management operations (create, patch, delete, move).
pub const CONTENT_MANAGEMENT_PATH: &str = "contentmanagement";

/// Content documents with embedded children.
pub const CONTENT_STRUCTURE_PATH: &str = "content";

/// Redirecting endpoint that locates the default root node.
pub const ROOT_REDIRECT_PATH: &str = "content/root";

/// First run of digits in a redirect location names the root node.
pub const ROOT_ID_PATTERN: &str = r"([0-9]+)";

// ============================================================================
// Client
// ============================================================================

/// Client for one CMS instance.
pub struct CmsClient {
    settings: CmsSettings,
    http: reqwest::Client,
    /// Separate client with redirects disabled, used only to observe the
    /// root redirect's `Location` header.
    probe: reqwest::Client,
    root_id: Regex,
}

impl CmsClient {
    /// Build a client, validating the settings first.
    pub fn new(settings: CmsSettings) -> Result<Self> {
        settings.validate()?;
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::http_with_source("building HTTP client", e))?;
        let probe = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| Error::http_with_source("building HTTP client", e))?;
        let root_id = Regex::new(ROOT_ID_PATTERN)
            .map_err(|e| Error::config(format!("bad pattern: {e}")))?;
        Ok(Self {
            settings,
            http,
            probe,
            root_id,
        })
    }

    /// The settings this client was built from.
    pub fn settings(&self) -> &CmsSettings {
        &self.settings
    }

    /// Joined base URL and API path, with slashes normalized.
    pub fn api_root(&self) -> String {
        let base = self.settings.base_url.trim_end_matches('/');
        let path = self.settings.api_path.trim_matches('/');
        format!("{base}/{path}")
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_root(), path.trim_start_matches('/'))
    }

    /// The `Authorization` header value, if credentials are configured.
    ///
    /// Basic credentials take priority over a bearer token.
    pub fn authorization_value(&self) -> Option<String> {
        let auth = &self.settings.auth;
        if let Some(user) = &auth.basic_username {
            let credentials = format!("{user}:{}", auth.basic_password.as_deref().unwrap_or(""));
            return Some(format!("Basic {}", BASE64.encode(credentials)));
        }
        auth.access_token
            .as_ref()
            .map(|token| format!("Bearer {token}"))
    }

    fn prepare(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request.header(reqwest::header::ACCEPT, "application/json");
        match self.authorization_value() {
            Some(value) => request.header(reqwest::header::AUTHORIZATION, value),
            None => request,
        }
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<ApiReply> {
        let response = self
            .prepare(request)
            .send()
            .await
            .map_err(|e| Error::http_with_source("request failed", e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::http_with_source("reading response body", e))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "upstream call failed");
            return Err(Error::upstream(status.as_u16(), text));
        }

        // Non-JSON success bodies come back as plain strings, empty bodies
        // as null, matching what the passthrough tools forward.
        let body = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        Ok(ApiReply {
            status: status.as_u16(),
            body,
        })
    }

    // -- Verbs ---------------------------------------------------------------

    /// GET a JSON document.
    pub async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<ApiReply> {
        tracing::debug!(%path, "GET");
        self.execute(self.http.get(self.endpoint(path)).query(query))
            .await
    }

    /// POST a JSON body.
    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiReply> {
        tracing::debug!(%path, "POST");
        self.execute(self.http.post(self.endpoint(path)).json(body))
            .await
    }

    /// PATCH with a JSON body.
    pub async fn patch_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiReply> {
        tracing::debug!(%path, "PATCH");
        self.execute(self.http.patch(self.endpoint(path)).json(body))
            .await
    }

    /// DELETE a resource.
    pub async fn delete_json(&self, path: &str) -> Result<ApiReply> {
        tracing::debug!(%path, "DELETE");
        self.execute(self.http.delete(self.endpoint(path))).await
    }

    // -- Root probing --------------------------------------------------------

    /// Follow the root redirect far enough to learn the root identifier.
    pub(crate) async fn probe_default_root(&self) -> Result<String> {
        let url = self.endpoint(ROOT_REDIRECT_PATH);
        let response = self
            .probe
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::http_with_source("root redirect probe failed", e))?;

        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| Error::http("root redirect returned no location"))?;

        self.root_id
            .captures(location)
            .map(|caps| caps[1].to_string())
            .ok_or_else(|| Error::http(format!("no node id in redirect location: {location}")))
    }
}

// ============================================================================
// Tests
// ============================================================================
