//! Wire envelopes returned by the licensing service.
//!
//! Every response is shaped `{ "data": { "signature": ..., ... } }`. The
//! signed sub-object is captured as a [`RawValue`] so verification runs
//! over the exact byte span carried on the wire; deserializing into a
//! struct and re-serializing would not be the signed message.

use serde::Deserialize;
use serde_json::value::RawValue;

/// Generic `{ "data": ... }` wrapper.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Acknowledgment response body.
#[derive(Debug, Deserialize)]
pub(crate) struct AcknowledgmentData {
    /// Base64-encoded signature over the `subscription` bytes.
    pub signature: String,
    /// The subscription payload, exactly as it appeared on the wire.
    pub subscription: Box<RawValue>,
}

/// Current-timestamp response body.
#[derive(Debug, Deserialize)]
pub(crate) struct TimestampData {
    /// Base64-encoded signature over the `time` bytes.
    pub signature: String,
    /// The time payload, exactly as it appeared on the wire.
    pub time: Box<RawValue>,
}

/// The signed time payload.
#[derive(Debug, Deserialize)]
pub(crate) struct CurrentTime {
    pub current_time: i64,
}
