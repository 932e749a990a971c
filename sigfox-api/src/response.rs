//! Response envelope handling.
//!
//! The backend wraps payloads in an envelope with the real data under
//! a `data` key; list endpoints may add `paging.next` holding the URL
//! of the following page. Some endpoints return bare objects with no
//! envelope at all, in which case the raw body is the payload.

use serde::Deserialize;
use serde_json::Value;

use crate::object::Object;

/// Standard backend response envelope.
///
/// Not a deserialization target: acknowledgment endpoints answer an
/// explicit `"data": null`, which is a payload of its own and must
/// stay distinct from a body with no `data` key at all. `data` is
/// `None` only when the key is absent.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Response payload; `Some(Value::Null)` for explicit nulls,
    /// `None` when the key is absent (bare-object endpoints).
    pub data: Option<Value>,
    /// Pagination section (list endpoints only).
    pub paging: Option<Paging>,
}

/// Pagination section of the envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Paging {
    /// URL of the next page, absent on the last page.
    pub next: Option<String>,
}

impl Envelope {
    /// Read the envelope fields off a raw body.
    fn parse(body: &Value) -> Envelope {
        let map = match body.as_object() {
            Some(map) => map,
            // Bare arrays and scalars carry no envelope.
            None => {
                return Envelope {
                    data: None,
                    paging: None,
                }
            }
        };
        Envelope {
            data: map.get("data").cloned(),
            paging: map
                .get("paging")
                .cloned()
                .and_then(|paging| serde_json::from_value(paging).ok()),
        }
    }

    /// Split a raw response body into its payload and the next-page
    /// URL, if any.
    ///
    /// When the body is not an object or carries no `data` key, the
    /// body itself is the payload.
    pub fn split(body: Value) -> (Value, Option<String>) {
        let envelope = Envelope::parse(&body);
        let next = envelope
            .paging
            .and_then(|p| p.next)
            .filter(|next| !next.is_empty());
        match envelope.data {
            Some(data) => (data, next),
            None => (body, next),
        }
    }
}

/// A response payload in the representation active at call time.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The deserialized JSON value as-is.
    Plain(Value),
    /// The lazy read-only view.
    Object(Object),
}

impl Payload {
    /// Borrow the underlying value, whichever the representation.
    pub fn value(&self) -> &Value {
        match self {
            Payload::Plain(value) => value,
            Payload::Object(object) => object.value(),
        }
    }

    /// Unwrap into the underlying value.
    pub fn into_value(self) -> Value {
        match self {
            Payload::Plain(value) => value,
            Payload::Object(object) => object.into_value(),
        }
    }

    /// Convert into the view representation regardless of the mode
    /// it was produced under.
    pub fn into_object(self) -> Object {
        match self {
            Payload::Plain(value) => Object::new(value),
            Payload::Object(object) => object,
        }
    }

    /// Element/key count of the underlying structure.
    pub fn len(&self) -> usize {
        match self.value() {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => 0,
        }
    }

    /// Whether the payload holds no elements/keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_enveloped_payload() {
        let body = json!({"data": {"id": "g1", "name": "Group 1"}});
        let (payload, next) = Envelope::split(body);
        assert_eq!(payload, json!({"id": "g1", "name": "Group 1"}));
        assert!(next.is_none());
    }

    #[test]
    fn test_split_with_paging() {
        let body = json!({
            "data": [1, 2, 3],
            "paging": {"next": "https://host/path?offset=100&limit=100"}
        });
        let (payload, next) = Envelope::split(body);
        assert_eq!(payload, json!([1, 2, 3]));
        assert_eq!(next.as_deref(), Some("https://host/path?offset=100&limit=100"));
    }

    #[test]
    fn test_split_last_page_has_no_next() {
        let (_, next) = Envelope::split(json!({"data": [], "paging": {}}));
        assert!(next.is_none());
        let (_, next) = Envelope::split(json!({"data": [], "paging": {"next": ""}}));
        assert!(next.is_none());
    }

    #[test]
    fn test_explicit_null_payload_unwraps_to_null() {
        // acknowledgment endpoints answer {"data": null}; the key is
        // present, so the payload is null, not the whole body
        let (payload, next) = Envelope::split(json!({"data": null}));
        assert_eq!(payload, Value::Null);
        assert!(next.is_none());
    }

    #[test]
    fn test_bare_object_is_payload() {
        let body = json!({"networkStatus": "OK"});
        let (payload, next) = Envelope::split(body.clone());
        assert_eq!(payload, body);
        assert!(next.is_none());
    }

    #[test]
    fn test_bare_array_is_payload() {
        let body = json!([1, 2]);
        let (payload, _) = Envelope::split(body.clone());
        assert_eq!(payload, body);
    }

    #[test]
    fn test_payload_accessors() {
        let payload = Payload::Plain(json!([1, 2, 3]));
        assert_eq!(payload.len(), 3);
        assert_eq!(payload.clone().into_object().at(0).unwrap().as_i64(), Some(1));
        assert_eq!(payload.into_value(), json!([1, 2, 3]));
    }
}
