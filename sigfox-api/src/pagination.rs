//! Pagination cursor.
//!
//! Each dispatcher call stores at most one [`PageCursor`] on the
//! client: the request descriptor needed to fetch the next page. The
//! slot is overwritten by every call and emptied when the backend
//! reports no further pages.

use std::collections::BTreeMap;

use reqwest::{Method, Url};
use serde_json::Value;
use tracing::warn;

use crate::client::Params;

/// Replay descriptor for the next page of a paged response.
///
/// Built from the envelope's `paging.next` URL: its query parameters
/// are merged over the originating request's parameters (next-page
/// values win), so replaying the cursor issues the same request with
/// the advanced offset.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCursor {
    method: Method,
    path: String,
    params: BTreeMap<String, Value>,
    headers: Vec<(String, String)>,
}

impl PageCursor {
    /// Build a cursor from the `paging.next` URL of a response.
    ///
    /// Returns `None` when the URL cannot be parsed; the page is then
    /// treated as the last one.
    pub(crate) fn from_next_url(
        method: &Method,
        path: &str,
        params: &Params,
        headers: &[(String, String)],
        next_url: &str,
    ) -> Option<Self> {
        let url = match Url::parse(next_url) {
            Ok(url) => url,
            Err(e) => {
                warn!("unparseable paging.next URL {next_url:?}: {e}");
                return None;
            }
        };

        let mut merged = match params {
            Params::Map(map) => map.clone(),
            _ => BTreeMap::new(),
        };
        for (name, value) in url.query_pairs() {
            merged.insert(name.into_owned(), Value::String(value.into_owned()));
        }

        Some(Self {
            method: method.clone(),
            path: path.to_string(),
            params: merged,
            headers: headers.to_vec(),
        })
    }

    /// The parameters the replay will carry.
    pub fn params(&self) -> &BTreeMap<String, Value> {
        &self.params
    }

    /// Decompose into the pieces of a dispatcher invocation.
    pub(crate) fn into_request(self) -> (Method, String, Params, Vec<(String, String)>) {
        (
            self.method,
            self.path,
            Params::Map(self.params),
            self.headers,
        )
    }
}
