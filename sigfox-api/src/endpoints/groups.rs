//! Group endpoints.

use sigfox_core::SigfoxResult;

use crate::client::{Params, Sigfox};
use crate::response::Payload;

impl Sigfox {
    /// Get the description of a particular group.
    pub fn group_info(&self, groupid: &str) -> SigfoxResult<Payload> {
        self.get(&format!("/groups/{groupid}"), Params::None)
    }

    /// List all children groups of your group.
    pub fn group_list(&self) -> SigfoxResult<Payload> {
        self.get("/groups", Params::None)
    }
}
