//! User endpoints.

use serde::Serialize;
use sigfox_core::SigfoxResult;

use crate::client::{Params, Sigfox};
use crate::response::Payload;

/// Query parameters for listing users.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserQuery {
    /// Maximum number of results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Pagination offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl Sigfox {
    /// List the users registered with a role on a group.
    ///
    /// Large groups span multiple pages; drain them explicitly with
    /// [`Sigfox::next_page`]. This method never aggregates pages on
    /// its own.
    pub fn user_list(&self, groupid: &str, query: &UserQuery) -> SigfoxResult<Payload> {
        self.get(&format!("/users/{groupid}"), Params::from_query(query)?)
    }
}
