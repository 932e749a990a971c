//! Callback endpoints.

use serde::Serialize;
use serde_json::Value;
use sigfox_core::SigfoxResult;

use crate::client::{Params, Sigfox};
use crate::response::Payload;

/// Query parameters for listing messages with failed callbacks.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CallbackErrorQuery {
    /// Maximum number of results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Pagination offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Only results after this time (epoch seconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<i64>,
    /// Only results before this time (epoch seconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<i64>,
    /// Filter on a device identifier (hexadecimal).
    #[serde(rename = "hexId", skip_serializing_if = "Option::is_none")]
    pub hex_id: Option<String>,
    /// Filter on a device type.
    #[serde(rename = "deviceTypeId", skip_serializing_if = "Option::is_none")]
    pub device_type_id: Option<String>,
    /// Filter on a group.
    #[serde(rename = "groupId", skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

impl Sigfox {
    /// Create new callbacks for a device type.
    ///
    /// `callbacks` is a sequence of callback documents as described
    /// in the official documentation, sent as a JSON array body.
    pub fn callback_new(&self, devicetypeid: &str, callbacks: Vec<Value>) -> SigfoxResult<Payload> {
        self.post(
            &format!("/devicetypes/{devicetypeid}/callbacks/new"),
            Params::List(callbacks),
        )
    }

    /// List the callbacks of a device type.
    pub fn callback_list(&self, devicetypeid: &str) -> SigfoxResult<Payload> {
        self.get(
            &format!("/devicetypes/{devicetypeid}/callbacks"),
            Params::None,
        )
    }

    /// Delete a callback.
    pub fn callback_delete(&self, devicetypeid: &str, callbackid: &str) -> SigfoxResult<Payload> {
        self.post(
            &format!("/devicetypes/{devicetypeid}/callbacks/{callbackid}/delete"),
            Params::None,
        )
    }

    /// Enable a callback.
    pub fn callback_enable(&self, devicetypeid: &str, callbackid: &str) -> SigfoxResult<Payload> {
        self.post(
            &format!("/devicetypes/{devicetypeid}/callbacks/{callbackid}/enable?enabled=true"),
            Params::None,
        )
    }

    /// Disable a callback.
    pub fn callback_disable(&self, devicetypeid: &str, callbackid: &str) -> SigfoxResult<Payload> {
        self.post(
            &format!("/devicetypes/{devicetypeid}/callbacks/{callbackid}/enable?enabled=false"),
            Params::None,
        )
    }

    /// Select a callback for downlink.
    pub fn callback_downlink(&self, devicetypeid: &str, callbackid: &str) -> SigfoxResult<Payload> {
        self.post(
            &format!("/devicetypes/{devicetypeid}/callbacks/{callbackid}/downlink"),
            Params::None,
        )
    }

    /// List device messages where at least one callback failed.
    pub fn callback_errors(&self, query: &CallbackErrorQuery) -> SigfoxResult<Payload> {
        self.get("/callbacks/messages/error", Params::from_query(query)?)
    }
}
