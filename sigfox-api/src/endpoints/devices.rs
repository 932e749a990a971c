//! Device endpoints.

use serde::Serialize;
use sigfox_core::SigfoxResult;

use crate::client::{Params, Sigfox};
use crate::response::Payload;

/// Query parameters for listing the devices of a device type.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeviceListQuery {
    /// Filter on the signal-to-noise ratio bucket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snr: Option<String>,
    /// Maximum number of results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Pagination offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Query parameters for message, location, and event listings.
///
/// `since` and `before` are epoch seconds. Beware the backend quirk:
/// a time range matching nothing at all answers 400 rather than an
/// empty list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageQuery {
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
}

impl Sigfox {
    /// List the devices associated to a device type.
    pub fn device_list(&self, devicetypeid: &str, query: &DeviceListQuery) -> SigfoxResult<Payload> {
        self.get(
            &format!("/devicetypes/{devicetypeid}/devices"),
            Params::from_query(query)?,
        )
    }

    /// Get information about a device.
    pub fn device_info(&self, deviceid: &str) -> SigfoxResult<Payload> {
        self.get(&format!("/devices/{deviceid}"), Params::None)
    }

    /// Get the communication-token state of a device.
    pub fn device_tokenstate(&self, deviceid: &str) -> SigfoxResult<Payload> {
        self.get(&format!("/devices/{deviceid}/token-state"), Params::None)
    }

    /// Get the messages sent by a device.
    pub fn device_messages(&self, deviceid: &str, query: &MessageQuery) -> SigfoxResult<Payload> {
        self.get(
            &format!("/devices/{deviceid}/messages"),
            Params::from_query(query)?,
        )
    }

    /// Get the network locations computed for a device.
    pub fn device_locations(&self, deviceid: &str, query: &MessageQuery) -> SigfoxResult<Payload> {
        self.get(
            &format!("/devices/{deviceid}/locations"),
            Params::from_query(query)?,
        )
    }

    /// Get the communication-down events of a device.
    pub fn device_errors(&self, deviceid: &str, query: &MessageQuery) -> SigfoxResult<Payload> {
        self.get(
            &format!("/devices/{deviceid}/status/error"),
            Params::from_query(query)?,
        )
    }

    /// Get the network-issue events of a device.
    pub fn device_warnings(&self, deviceid: &str, query: &MessageQuery) -> SigfoxResult<Payload> {
        self.get(
            &format!("/devices/{deviceid}/status/warn"),
            Params::from_query(query)?,
        )
    }

    /// Get the network state of a device.
    pub fn device_networkstate(&self, deviceid: &str) -> SigfoxResult<Payload> {
        self.get(&format!("/devices/{deviceid}/networkstate"), Params::None)
    }

    /// Get the message metrics (day/week/month counters) of a device.
    pub fn device_messagemetrics(&self, deviceid: &str) -> SigfoxResult<Payload> {
        self.get(&format!("/devices/{deviceid}/messages/metric"), Params::None)
    }

    /// Get the consumption data of a device for a given year.
    pub fn device_consumptions(&self, deviceid: &str, year: u16) -> SigfoxResult<Payload> {
        self.get(
            &format!("/devices/{deviceid}/consumptions/{year}"),
            Params::None,
        )
    }
}
