//! Client facade for the Sigfox backend REST API.
//!
//! `Sigfox` owns the credentials, the transport, and the single
//! pagination-cursor slot. Every resource method funnels through the
//! generic [`Sigfox::request`] dispatcher, which performs exactly one
//! HTTP round trip: no retries and no automatic multi-page
//! aggregation. Callers drain paged results explicitly via
//! [`Sigfox::next_page`].
//!
//! The client is deliberately not `Sync`: the cursor slot is
//! unsynchronized per-instance state, so concurrent callers must use
//! one client instance each.

use std::cell::RefCell;
use std::collections::BTreeMap;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use sigfox_core::config::ResponseMode;
use sigfox_core::{SettingsHandle, SigfoxError, SigfoxResult};

use crate::object::Object;
use crate::pagination::PageCursor;
use crate::response::{Envelope, Payload};
use crate::transport::{Credentials, HttpTransport, Transport, TransportRequest};

/// Parameters of a dispatcher call.
///
/// A map becomes the query string on GET and the JSON body on POST; a
/// list is always a JSON array body (bulk-create endpoints).
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Params {
    /// No parameters.
    #[default]
    None,
    /// Key/value parameters.
    Map(BTreeMap<String, Value>),
    /// Ordered sequence of objects.
    List(Vec<Value>),
}

impl Params {
    /// Build map parameters from a serializable query struct,
    /// dropping `None` fields.
    pub fn from_query<T: Serialize>(query: &T) -> SigfoxResult<Self> {
        match serde_json::to_value(query)? {
            Value::Object(map) if map.is_empty() => Ok(Params::None),
            Value::Object(map) => Ok(Params::Map(map.into_iter().collect())),
            Value::Null => Ok(Params::None),
            other => Err(SigfoxError::Serialization(format!(
                "query parameters must serialize to an object, got {other}"
            ))),
        }
    }
}

/// Client for the Sigfox backend REST API.
///
/// ```no_run
/// use sigfox_api::Sigfox;
///
/// let client = Sigfox::new("1234567890abcdef", "fedcba0987654321");
/// let group = client.group_info("489720a05ee16b3cc8697494")?;
/// # Ok::<(), sigfox_api::SigfoxError>(())
/// ```
pub struct Sigfox {
    transport: Box<dyn Transport>,
    settings: SettingsHandle,
    /// Single-slot pagination cursor, overwritten by every call.
    cursor: RefCell<Option<PageCursor>>,
}

impl Sigfox {
    /// Create a client with default settings.
    pub fn new(login: &str, password: &str) -> Self {
        Self::with_settings(login, password, SettingsHandle::default())
    }

    /// Create a client sharing the given settings handle.
    ///
    /// Settings are read at call time: flipping `response_mode`,
    /// `debug`, or `ignore_ssl_validation` on the handle affects the
    /// next call on this (and every other sharing) client.
    pub fn with_settings(login: &str, password: &str, settings: SettingsHandle) -> Self {
        let credentials = Credentials::new(login, password);
        let transport = Box::new(HttpTransport::new(credentials, settings.clone()));
        Self::with_transport(transport, settings)
    }

    /// Create a client over a custom transport.
    pub fn with_transport(transport: Box<dyn Transport>, settings: SettingsHandle) -> Self {
        Self {
            transport,
            settings,
            cursor: RefCell::new(None),
        }
    }

    /// The settings handle this client reads at call time.
    pub fn settings(&self) -> &SettingsHandle {
        &self.settings
    }

    /// Perform one API request and return the unwrapped payload.
    ///
    /// Single choke point for every outbound call: delegates the HTTP
    /// round trip to the transport, classifies non-success statuses
    /// into the error taxonomy, unwraps the `data` envelope, and
    /// overwrites the pagination-cursor slot (emptying it for
    /// non-paged responses).
    pub fn request(
        &self,
        method: Method,
        path: &str,
        params: Params,
        headers: Vec<(String, String)>,
    ) -> SigfoxResult<Payload> {
        let (url, debug_enabled) = {
            let settings = self.settings.read();
            (
                format!("{}{}", settings.sanitized_api_url(), path),
                settings.debug,
            )
        };

        let (query, body) = match &params {
            Params::None => (Vec::new(), None),
            Params::Map(map) if method == Method::GET => (query_pairs(map), None),
            Params::Map(map) => (
                Vec::new(),
                Some(Value::Object(map.clone().into_iter().collect())),
            ),
            Params::List(items) => (Vec::new(), Some(Value::Array(items.clone()))),
        };

        debug!("{} {}", method, path);
        let request = TransportRequest {
            method: method.clone(),
            url,
            query,
            body,
            headers: headers.clone(),
        };
        if debug_enabled {
            debug!(request = ?request, "outbound request");
        }

        let response = self.transport.perform(&request)?;
        if debug_enabled {
            debug!(status = response.status, body = %response.body, "raw response");
        }

        if !(200..300).contains(&response.status) {
            return Err(SigfoxError::from_status(
                response.status,
                error_message(&response.body),
            ));
        }

        let (payload, next) = Envelope::split(response.body);
        *self.cursor.borrow_mut() = next
            .and_then(|next_url| PageCursor::from_next_url(&method, path, &params, &headers, &next_url));

        let mode = self.settings.read().response_mode;
        Ok(match mode {
            ResponseMode::Plain => Payload::Plain(payload),
            ResponseMode::Object => Payload::Object(Object::new(payload)),
        })
    }

    /// GET a resource path.
    pub fn get(&self, path: &str, params: Params) -> SigfoxResult<Payload> {
        self.request(Method::GET, path, params, Vec::new())
    }

    /// POST to a resource path.
    pub fn post(&self, path: &str, params: Params) -> SigfoxResult<Payload> {
        self.request(Method::POST, path, params, Vec::new())
    }

    /// Whether the last call left another page to fetch.
    pub fn has_next_page(&self) -> bool {
        self.cursor.borrow().is_some()
    }

    /// The cursor stored by the last call, if any.
    pub fn page_cursor(&self) -> Option<PageCursor> {
        self.cursor.borrow().clone()
    }

    /// Fetch the next page of the last paged response.
    ///
    /// Replays the stored cursor through the dispatcher, which in turn
    /// overwrites the slot with the following page's cursor (or empties
    /// it on the last page). Returns `Ok(None)` when no page is
    /// pending, so callers drain with a loop:
    ///
    /// ```no_run
    /// # use sigfox_api::Sigfox;
    /// # let client = Sigfox::new("login", "password");
    /// let mut messages = client
    ///     .device_messages("4d3091a05ee16b3cc86699ab", &Default::default())?
    ///     .into_object();
    /// while let Some(page) = client.next_page()? {
    ///     messages += page.into_object();
    /// }
    /// # Ok::<(), sigfox_api::SigfoxError>(())
    /// ```
    pub fn next_page(&self) -> SigfoxResult<Option<Payload>> {
        let cursor = self.cursor.borrow().clone();
        match cursor {
            Some(cursor) => {
                let (method, path, params, headers) = cursor.into_request();
                self.request(method, &path, params, headers).map(Some)
            }
            None => Ok(None),
        }
    }
}

fn query_pairs(map: &BTreeMap<String, Value>) -> Vec<(String, String)> {
    map.iter()
        .map(|(name, value)| (name.clone(), query_value(value)))
        .collect()
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn error_message(body: &Value) -> String {
    match body {
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string()),
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use serde_json::json;
    use sigfox_core::Settings;

    use super::*;
    use crate::testing::FakeTransport;

    fn client_with(transport: &Rc<FakeTransport>) -> Sigfox {
        Sigfox::with_transport(Box::new(Rc::clone(transport)), SettingsHandle::default())
    }

    #[test]
    fn test_enveloped_payload_is_unwrapped() {
        let transport = Rc::new(FakeTransport::new());
        transport.push_response(200, json!({"data": {"id": "g1", "name": "Group 1"}}));
        let client = client_with(&transport);

        let payload = client.get("/groups/g1", Params::None).unwrap();
        assert_eq!(payload.into_value(), json!({"id": "g1", "name": "Group 1"}));
        assert!(!client.has_next_page());
    }

    #[test]
    fn test_bare_body_passes_through() {
        let transport = Rc::new(FakeTransport::new());
        transport.push_response(200, json!({"networkStatus": "OK"}));
        let client = client_with(&transport);

        let payload = client.get("/devices/abc/networkstate", Params::None).unwrap();
        assert_eq!(payload.into_value(), json!({"networkStatus": "OK"}));
    }

    #[test]
    fn test_acknowledgment_body_yields_null_payload() {
        let transport = Rc::new(FakeTransport::new());
        transport.push_response(200, json!({"data": null}));
        let client = client_with(&transport);

        let payload = client.post("/devicetypes/edit", Params::None).unwrap();
        assert_eq!(payload.into_value(), Value::Null);
    }

    #[test]
    fn test_status_classification() {
        let cases: [(u16, fn(&SigfoxError) -> bool); 6] = [
            (400, |e| matches!(e, SigfoxError::BadRequest { .. })),
            (401, |e| matches!(e, SigfoxError::Authentication { .. })),
            (403, |e| matches!(e, SigfoxError::AccessDenied { .. })),
            (404, |e| matches!(e, SigfoxError::NotFound { .. })),
            (500, |e| matches!(e, SigfoxError::Server { .. })),
            (418, |e| matches!(e, SigfoxError::Api { .. })),
        ];
        for (status, check) in cases {
            let transport = Rc::new(FakeTransport::new());
            transport.push_response(status, json!({"message": "nope"}));
            let client = client_with(&transport);

            let err = client.get("/groups", Params::None).unwrap_err();
            assert!(check(&err), "status {status} mapped to {err:?}");
            assert_eq!(err.status(), Some(status));
        }
    }

    #[test]
    fn test_not_found_carries_status_and_message() {
        let transport = Rc::new(FakeTransport::new());
        transport.push_response(404, json!({"message": "device unknown"}));
        let client = client_with(&transport);

        let err = client.get("/devices/missing", Params::None).unwrap_err();
        assert!(
            matches!(&err, SigfoxError::NotFound { status: 404, message } if message == "device unknown")
        );
    }

    #[test]
    fn test_get_map_params_become_query_string() {
        let transport = Rc::new(FakeTransport::new());
        transport.push_response(200, json!({"data": []}));
        let client = client_with(&transport);

        let mut map = BTreeMap::new();
        map.insert("lat".to_string(), json!(43.415));
        map.insert("mode".to_string(), json!("OUTDOOR"));
        client.get("/coverages/redundancy", Params::Map(map)).unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::GET);
        assert!(requests[0].body.is_none());
        assert!(requests[0]
            .query
            .contains(&("lat".to_string(), "43.415".to_string())));
        assert!(requests[0]
            .query
            .contains(&("mode".to_string(), "OUTDOOR".to_string())));
    }

    #[test]
    fn test_post_params_become_json_body() {
        let transport = Rc::new(FakeTransport::new());
        transport.push_response(200, json!({"data": null}));
        let client = client_with(&transport);

        let mut map = BTreeMap::new();
        map.insert("description".to_string(), json!("updated"));
        client.post("/devicetypes/edit", Params::Map(map)).unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::POST);
        assert!(requests[0].query.is_empty());
        assert_eq!(requests[0].body, Some(json!({"description": "updated"})));
    }

    #[test]
    fn test_list_params_become_array_body() {
        let transport = Rc::new(FakeTransport::new());
        transport.push_response(200, json!({"data": null}));
        let client = client_with(&transport);

        client
            .post(
                "/devicetypes/dt1/callbacks/new",
                Params::List(vec![json!({"channel": "EMAIL"})]),
            )
            .unwrap();

        assert_eq!(
            transport.requests()[0].body,
            Some(json!([{"channel": "EMAIL"}]))
        );
    }

    #[test]
    fn test_paged_response_stores_cursor() {
        let transport = Rc::new(FakeTransport::new());
        transport.push_response(
            200,
            json!({
                "data": [{"id": 1}],
                "paging": {"next": "https://backend.sigfox.com/api/users/g1?offset=100&limit=100"}
            }),
        );
        transport.push_response(200, json!({"data": [{"id": 2}]}));
        let client = client_with(&transport);

        let first = client.get("/users/g1", Params::None).unwrap();
        assert_eq!(first.len(), 1);
        assert!(client.has_next_page());

        let second = client.next_page().unwrap().unwrap();
        assert_eq!(second.len(), 1);
        assert!(!client.has_next_page());
        assert!(client.next_page().unwrap().is_none());

        // the continuation replays the same path with the next-page params
        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[1].url.ends_with("/users/g1"));
        assert!(requests[1]
            .query
            .contains(&("offset".to_string(), "100".to_string())));
        assert!(requests[1]
            .query
            .contains(&("limit".to_string(), "100".to_string())));
    }

    #[test]
    fn test_drain_loop_concatenates_all_pages_in_order() {
        let transport = Rc::new(FakeTransport::new());
        transport.push_response(
            200,
            json!({"data": ["a", "b"], "paging": {"next": "https://h/users/g1?offset=2"}}),
        );
        transport.push_response(
            200,
            json!({"data": ["c"], "paging": {"next": "https://h/users/g1?offset=3"}}),
        );
        transport.push_response(200, json!({"data": ["d"]}));
        let client = client_with(&transport);

        let mut all = client.get("/users/g1", Params::None).unwrap().into_object();
        while let Some(page) = client.next_page().unwrap() {
            all += page.into_object();
        }
        assert_eq!(all.into_value(), json!(["a", "b", "c", "d"]));
    }

    #[test]
    fn test_cursor_overwritten_by_every_call() {
        let transport = Rc::new(FakeTransport::new());
        transport.push_response(
            200,
            json!({"data": [], "paging": {"next": "https://h/users/g1?offset=1"}}),
        );
        transport.push_response(200, json!({"data": {"id": "g1"}}));
        let client = client_with(&transport);

        client.get("/users/g1", Params::None).unwrap();
        assert!(client.has_next_page());

        // an unrelated non-paged call replaces the unconsumed cursor
        client.get("/groups/g1", Params::None).unwrap();
        assert!(!client.has_next_page());
    }

    #[test]
    fn test_response_mode_read_at_call_time() {
        let transport = Rc::new(FakeTransport::new());
        transport.push_response(200, json!({"data": {"id": "g1"}}));
        transport.push_response(200, json!({"data": {"id": "g1"}}));
        let settings = SettingsHandle::default();
        let client =
            Sigfox::with_transport(Box::new(Rc::clone(&transport)), settings.clone());

        let plain = client.get("/groups/g1", Params::None).unwrap();
        assert!(matches!(plain, Payload::Plain(_)));

        settings.update(|s| s.response_mode = ResponseMode::Object);
        let object = client.get("/groups/g1", Params::None).unwrap();
        match object {
            Payload::Object(view) => {
                assert_eq!(view.field("id").unwrap().as_str(), Some("g1"));
            }
            Payload::Plain(_) => panic!("expected object view"),
        }
    }

    #[test]
    fn test_base_url_comes_from_settings() {
        let transport = Rc::new(FakeTransport::new());
        transport.push_response(200, json!({"data": []}));
        let mut settings = Settings::default();
        settings.api_url = "https://example.test/api/".into();
        let client = Sigfox::with_transport(
            Box::new(Rc::clone(&transport)),
            SettingsHandle::new(settings),
        );

        client.get("/groups", Params::None).unwrap();
        assert_eq!(transport.requests()[0].url, "https://example.test/api/groups");
    }

    #[test]
    fn test_params_from_query_drops_none_fields() {
        #[derive(Serialize)]
        struct Query {
            limit: Option<u32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            offset: Option<u32>,
        }

        let params = Params::from_query(&Query {
            limit: Some(10),
            offset: None,
        })
        .unwrap();
        match params {
            Params::Map(map) => {
                assert_eq!(map.get("limit"), Some(&json!(10)));
                // un-skipped None still serializes as null; the query
                // encoder renders it, so endpoint structs always skip
                assert!(!map.contains_key("offset"));
            }
            other => panic!("expected map params, got {other:?}"),
        }
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(error_message(&json!({"message": "m"})), "m");
        assert_eq!(error_message(&json!("plain text")), "plain text");
        assert_eq!(error_message(&Value::Null), "");
    }
}
