//! Device type endpoints.

use sigfox_core::SigfoxResult;

use crate::client::{Params, Sigfox};
use crate::endpoints::devices::MessageQuery;
use crate::response::Payload;

impl Sigfox {
    /// Get the description of a device type.
    pub fn devicetype_info(&self, devicetypeid: &str) -> SigfoxResult<Payload> {
        self.get(&format!("/devicetypes/{devicetypeid}"), Params::None)
    }

    /// List all device types available to your group.
    pub fn devicetype_list(&self) -> SigfoxResult<Payload> {
        self.get("/devicetypes", Params::None)
    }

    /// Edit a device type.
    ///
    /// `params` is the edit document described in the official
    /// documentation, sent as the request body.
    pub fn devicetype_edit(&self, params: Params) -> SigfoxResult<Payload> {
        self.post("/devicetypes/edit", params)
    }

    /// Get the communication-down events for devices of a device type.
    pub fn devicetype_errors(&self, devicetypeid: &str) -> SigfoxResult<Payload> {
        self.get(
            &format!("/devicetypes/{devicetypeid}/status/error"),
            Params::None,
        )
    }

    /// Get the network-issue events for devices of a device type.
    pub fn devicetype_warnings(&self, devicetypeid: &str) -> SigfoxResult<Payload> {
        self.get(
            &format!("/devicetypes/{devicetypeid}/status/warn"),
            Params::None,
        )
    }

    /// Get the messages sent by all devices of a device type.
    pub fn devicetype_messages(
        &self,
        devicetypeid: &str,
        query: &MessageQuery,
    ) -> SigfoxResult<Payload> {
        self.get(
            &format!("/devicetypes/{devicetypeid}/messages"),
            Params::from_query(query)?,
        )
    }

    /// Disengage the sequence-number check for the next message of
    /// each device of the device type.
    pub fn devicetype_disengage(&self, devicetypeid: &str) -> SigfoxResult<Payload> {
        self.get(
            &format!("/devicetypes/{devicetypeid}/disengage"),
            Params::None,
        )
    }
}
