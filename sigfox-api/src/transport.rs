//! HTTP transport seam.
//!
//! The dispatcher talks to the backend through the [`Transport`]
//! trait: one request in, status plus deserialized JSON body out.
//! [`HttpTransport`] is the production implementation over
//! `reqwest::blocking`; tests substitute a scripted transport.

use std::cell::RefCell;
use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Method;
use serde_json::Value;

use sigfox_core::{SettingsHandle, SigfoxError, SigfoxResult};

/// Login identifier and secret for HTTP Basic authentication.
///
/// Immutable for the lifetime of a client; attached to every request.
#[derive(Clone)]
pub struct Credentials {
    login: String,
    password: String,
}

impl Credentials {
    /// Create credentials from the login/password pair shown on the
    /// backend's *Group* → *REST API* page.
    pub fn new(login: &str, password: &str) -> Self {
        Self {
            login: login.to_string(),
            password: password.to_string(),
        }
    }

    /// The login identifier.
    pub fn login(&self) -> &str {
        &self.login
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// One outbound HTTP request, fully described.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    /// HTTP method (the client only issues GET and POST).
    pub method: Method,
    /// Full request URL without query parameters.
    pub url: String,
    /// Query-string parameters.
    pub query: Vec<(String, String)>,
    /// JSON request body, if any.
    pub body: Option<Value>,
    /// Extra headers for this request.
    pub headers: Vec<(String, String)>,
}

/// Raw result of one HTTP round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Deserialized response body. `Null` for empty bodies; non-JSON
    /// bodies are preserved as a string value.
    pub body: Value,
}

/// One blocking HTTP round trip. No envelope or status handling here.
pub trait Transport {
    /// Perform the request and return the raw status and body.
    fn perform(&self, request: &TransportRequest) -> SigfoxResult<TransportResponse>;
}

struct CachedClient {
    client: Client,
    timeout_ms: u64,
    insecure: bool,
}

/// Production transport over `reqwest::blocking`.
///
/// Reads the timeout and TLS-validation settings at call time and
/// rebuilds its inner client when either changes, so flipping
/// `ignore_ssl_validation` on the shared settings affects the next
/// request without reconstructing the API client.
pub struct HttpTransport {
    credentials: Credentials,
    settings: SettingsHandle,
    cached: RefCell<Option<CachedClient>>,
}

impl HttpTransport {
    /// Create a transport with the given credentials and settings.
    pub fn new(credentials: Credentials, settings: SettingsHandle) -> Self {
        Self {
            credentials,
            settings,
            cached: RefCell::new(None),
        }
    }

    fn client(&self, timeout_ms: u64, insecure: bool) -> SigfoxResult<Client> {
        let mut cached = self.cached.borrow_mut();
        match cached.as_ref() {
            Some(c) if c.timeout_ms == timeout_ms && c.insecure == insecure => {
                Ok(c.client.clone())
            }
            _ => {
                let mut builder = Client::builder().timeout(Duration::from_millis(timeout_ms));
                if insecure {
                    builder = builder.danger_accept_invalid_certs(true);
                }
                let client = builder
                    .build()
                    .map_err(|e| SigfoxError::Http(format!("failed to build HTTP client: {e}")))?;
                *cached = Some(CachedClient {
                    client: client.clone(),
                    timeout_ms,
                    insecure,
                });
                Ok(client)
            }
        }
    }
}

impl Transport for HttpTransport {
    fn perform(&self, request: &TransportRequest) -> SigfoxResult<TransportResponse> {
        let (timeout_ms, insecure) = {
            let settings = self.settings.read();
            (settings.timeout_ms, settings.ignore_ssl_validation)
        };
        let client = self.client(timeout_ms, insecure)?;

        let mut builder = client
            .request(request.method.clone(), request.url.as_str())
            .basic_auth(self.credentials.login(), Some(self.credentials.password()));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().map_err(classify_transport_error)?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .map_err(|e| SigfoxError::Http(format!("failed to read response body: {e}")))?;

        Ok(TransportResponse {
            status,
            body: parse_body(text),
        })
    }
}

fn parse_body(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(_) => Value::String(text),
    }
}

fn classify_transport_error(e: reqwest::Error) -> SigfoxError {
    if e.is_timeout() {
        SigfoxError::Timeout(e.to_string())
    } else if e.is_connect() {
        SigfoxError::Http(format!("connection failed: {e}"))
    } else {
        SigfoxError::Http(e.to_string())
    }
}
