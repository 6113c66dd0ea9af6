//! Wire types exchanged with the messenger backend.
//!
//! The backend is loose about a few shapes: contact ids arrive as UUID
//! strings but numeric ids are accepted too, and message timestamps may be
//! epoch milliseconds or a textual date. These types absorb that variance so
//! the rest of the client sees one representation.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
#[cfg(feature = "csr")]
use wasm_bindgen::JsValue;
#[cfg(not(feature = "csr"))]
use time::format_description::well_known::Rfc3339;
#[cfg(not(feature = "csr"))]
use time::macros::format_description;
#[cfg(not(feature = "csr"))]
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Identifier of a contact, always held in its string form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ContactId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Int(n) => Self(n.to_string()),
        })
    }
}

/// Another user the current session can chat with (`GET /api/users`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub username: String,
}

/// One message in a conversation (`GET /api/messages/{id}`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Username of the author.
    pub sender: String,
    pub content: String,
    pub timestamp: Timestamp,
}

/// Body of `POST /api/messages/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage {
    pub content: String,
}

/// `{"error": "..."}` body the backend returns alongside 4xx statuses.
#[derive(Clone, Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Message timestamp as sent by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Milliseconds since the Unix epoch.
    Millis(f64),
    /// RFC 3339, or a naive `YYYY-MM-DD HH:MM:SS[.ffffff]` date.
    Text(String),
}

impl Timestamp {
    /// Wall-clock label shown under a message.
    ///
    /// In the browser both forms go through `Date` and render in the viewer's
    /// locale and timezone. Native builds render `HH:MM:SS` in UTC, except
    /// naive text which has no zone and keeps its own clock. Text that does
    /// not parse as a date is shown verbatim.
    pub fn time_label(&self) -> String {
        match self {
            Self::Millis(ms) => millis_label(*ms),
            Self::Text(raw) => text_label(raw).unwrap_or_else(|| raw.clone()),
        }
    }
}

#[cfg(feature = "csr")]
fn millis_label(ms: f64) -> String {
    local_time_label(&JsValue::from_f64(ms)).unwrap_or_default()
}

#[cfg(feature = "csr")]
fn text_label(raw: &str) -> Option<String> {
    local_time_label(&JsValue::from_str(raw.trim()))
}

/// `None` when `Date` cannot make sense of the value.
#[cfg(feature = "csr")]
fn local_time_label(value: &JsValue) -> Option<String> {
    let date = js_sys::Date::new(value);
    if date.get_time().is_nan() {
        return None;
    }
    Some(date.to_locale_time_string("default").into())
}

#[cfg(not(feature = "csr"))]
fn millis_label(ms: f64) -> String {
    if !ms.is_finite() {
        return String::new();
    }
    #[allow(clippy::cast_possible_truncation)]
    let nanos = (ms * 1_000_000.0) as i128;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .map(|at| clock_label(at.time()))
        .unwrap_or_default()
}

#[cfg(not(feature = "csr"))]
fn text_label(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(at) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(clock_label(at.to_offset(UtcOffset::UTC).time()));
    }

    // Naive dates carry the server's local clock; drop the fraction and show it as-is.
    let whole = raw.split('.').next()?.replacen('T', " ", 1);
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let at = PrimitiveDateTime::parse(&whole, format).ok()?;
    Some(clock_label(at.time()))
}

#[cfg(not(feature = "csr"))]
fn clock_label(time: time::Time) -> String {
    let (hour, minute, second) = time.as_hms();
    format!("{hour:02}:{minute:02}:{second:02}")
}
